//! Simulator: configuration, engine and random source in one place

use crate::{
    circuit::Circuit,
    config::{Representation, SimulatorConfig},
    engine::Engine,
};
use kronsim_core::{QuantumError, QubitId, Result};
use kronsim_state::{
    measure, DensityMatrixRegister, MeasurementResult, Register, RegisterBuilder,
    StateVectorRegister,
};
use num_complex::Complex64;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

/// A register of either representation
#[derive(Clone, Debug)]
pub enum AnyRegister {
    StateVector(StateVectorRegister),
    DensityMatrix(DensityMatrixRegister),
}

impl AnyRegister {
    /// The register as a trait object
    pub fn as_register(&self) -> &dyn Register {
        match self {
            Self::StateVector(r) => r,
            Self::DensityMatrix(r) => r,
        }
    }

    /// The register as a mutable trait object
    pub fn as_register_mut(&mut self) -> &mut dyn Register {
        match self {
            Self::StateVector(r) => r,
            Self::DensityMatrix(r) => r,
        }
    }

    /// Basis-state probabilities
    pub fn probabilities(&self) -> Vec<f64> {
        self.as_register().probabilities()
    }

    /// Text table of basis-state probabilities
    pub fn probability_table(&self, only_ones: bool) -> String {
        match self {
            Self::StateVector(r) => r.probability_table(only_ones),
            Self::DensityMatrix(r) => r.probability_table(only_ones),
        }
    }
}

/// Runs circuits and measures registers with a seeded random source
///
/// # Example
///
/// ```
/// use kronsim_sim::{Circuit, Simulator, SimulatorConfig};
///
/// let mut simulator = Simulator::new(SimulatorConfig::new().with_seed(1)).unwrap();
/// let mut circuit = Circuit::new(1);
/// circuit.x(0).unwrap();
///
/// let mut register = simulator.register(1).unwrap();
/// simulator.run(&circuit, &mut register).unwrap();
/// let result = simulator.measure(&mut register, 0).unwrap();
/// assert_eq!(result.outcome, 1);
/// ```
#[derive(Debug)]
pub struct Simulator {
    config: SimulatorConfig,
    engine: Engine,
    rng: StdRng,
}

impl Simulator {
    /// Create a simulator
    ///
    /// # Errors
    /// Returns error if the configuration is invalid.
    pub fn new(config: SimulatorConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        info!(
            seed = ?config.seed,
            representation = ?config.representation,
            max_qubits = config.max_qubits,
            "created simulator"
        );
        Ok(Self {
            config,
            engine: Engine::new(),
            rng,
        })
    }

    /// Get the simulator configuration
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// The gate application engine
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    fn builder(&self, num_qubits: usize) -> Result<RegisterBuilder> {
        if num_qubits > self.config.max_qubits {
            return Err(QuantumError::Validation(format!(
                "{} qubits exceeds the configured maximum of {}",
                num_qubits, self.config.max_qubits
            )));
        }
        Ok(RegisterBuilder::new(num_qubits).tolerance(self.config.tolerance))
    }

    fn finish(&self, builder: RegisterBuilder) -> Result<AnyRegister> {
        Ok(match self.config.representation {
            Representation::StateVector => AnyRegister::StateVector(builder.build_state_vector()?),
            Representation::DensityMatrix => {
                AnyRegister::DensityMatrix(builder.build_density_matrix()?)
            }
        })
    }

    /// Register in `|0...0⟩` with the configured representation
    pub fn register(&self, num_qubits: usize) -> Result<AnyRegister> {
        self.finish(self.builder(num_qubits)?)
    }

    /// Register in basis state `index`
    pub fn register_from_basis_state(&self, num_qubits: usize, index: usize) -> Result<AnyRegister> {
        self.finish(self.builder(num_qubits)?.initial_state(index))
    }

    /// Register holding explicit amplitudes, checked against the configured tolerance
    pub fn register_from_amplitudes(
        &self,
        num_qubits: usize,
        amplitudes: Vec<Complex64>,
    ) -> Result<AnyRegister> {
        self.finish(self.builder(num_qubits)?.data(amplitudes))
    }

    /// Run `circuit` on `register`
    pub fn run(&self, circuit: &Circuit, register: &mut AnyRegister) -> Result<()> {
        circuit.run(&self.engine, register.as_register_mut())
    }

    /// Measure one qubit, drawing from the simulator's random source
    pub fn measure(&mut self, register: &mut AnyRegister, qubit: usize) -> Result<MeasurementResult> {
        let rng = &mut self.rng;
        measure(register.as_register_mut(), QubitId::new(qubit), &mut || rng.gen::<f64>())
    }

    /// Measure every qubit in label order
    pub fn measure_all(&mut self, register: &mut AnyRegister) -> Result<Vec<u8>> {
        let n = register.as_register().num_qubits();
        (0..n)
            .map(|q| self.measure(register, q).map(|r| r.outcome))
            .collect()
    }
}
