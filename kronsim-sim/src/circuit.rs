//! Quantum circuit representation

use crate::engine::Engine;
use kronsim_core::{
    permutation, Gate, GateShape, LocalGate, PermutationGate, QuantumError, QubitId, Result,
};
use kronsim_gates::{leading_ordering, standard, SwapCache};
use kronsim_state::Register;
use tracing::debug;

/// One entry of a lowered gate list
#[derive(Clone, Debug)]
pub enum LoweredStep {
    /// Swap block planned by [`Circuit::lowered`]: moves the amplitudes and
    /// relabels the ordering, so the logical state is unchanged
    Relabel(PermutationGate),
    /// A circuit gate, applied exactly as [`Engine::apply`] would
    Apply(Gate),
}

/// A sequence of gates over a fixed number of qubits
///
/// # Example
/// ```
/// use kronsim_sim::{Circuit, Engine};
/// use kronsim_state::StateVectorRegister;
///
/// let mut circuit = Circuit::new(2);
/// circuit.h(0).unwrap().cx(0, 1).unwrap();
///
/// let mut register = StateVectorRegister::new(2).unwrap();
/// circuit.run(&Engine::new(), &mut register).unwrap();
/// assert!((register.ket()[3].re - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
/// ```
#[derive(Clone, Debug)]
pub struct Circuit {
    num_qubits: usize,
    gates: Vec<Gate>,
}

impl Circuit {
    /// Create a new circuit with the specified number of qubits
    ///
    /// # Panics
    /// Panics if `num_qubits` is 0
    pub fn new(num_qubits: usize) -> Self {
        assert!(num_qubits > 0, "Circuit must have at least one qubit");
        Self {
            num_qubits,
            gates: Vec::new(),
        }
    }

    /// Number of qubits
    #[inline]
    pub const fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of gates
    #[inline]
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// Gates in append order
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Append a gate
    ///
    /// # Errors
    /// - [`QuantumError::RegistrySize`] if the gate is wider than the circuit
    /// - [`QuantumError::InvalidQubit`] if a qubit index is out of range
    pub fn add_gate(&mut self, gate: impl Into<Gate>) -> Result<&mut Self> {
        let gate = gate.into();
        if gate.size() > self.num_qubits {
            return Err(QuantumError::registry_size(
                gate.name(),
                gate.size(),
                self.num_qubits,
            ));
        }
        if let Some(qubit) = gate.qubits().iter().find(|q| q.index() >= self.num_qubits) {
            return Err(QuantumError::invalid_qubit(qubit.index(), self.num_qubits));
        }
        self.gates.push(gate);
        Ok(self)
    }

    fn push(&mut self, gate: Result<LocalGate>) -> Result<&mut Self> {
        self.add_gate(gate?)
    }

    /// Hadamard
    pub fn h(&mut self, target: usize) -> Result<&mut Self> {
        self.push(standard::h(target))
    }

    /// Pauli-X
    pub fn x(&mut self, target: usize) -> Result<&mut Self> {
        self.push(standard::x(target))
    }

    /// Pauli-Y
    pub fn y(&mut self, target: usize) -> Result<&mut Self> {
        self.push(standard::y(target))
    }

    /// Pauli-Z
    pub fn z(&mut self, target: usize) -> Result<&mut Self> {
        self.push(standard::z(target))
    }

    /// Phase gate
    pub fn s(&mut self, target: usize) -> Result<&mut Self> {
        self.push(standard::s(target))
    }

    /// π/8 gate
    pub fn t(&mut self, target: usize) -> Result<&mut Self> {
        self.push(standard::t(target))
    }

    /// Controlled-X
    pub fn cx(&mut self, control: usize, target: usize) -> Result<&mut Self> {
        self.push(standard::cx(control, target))
    }

    /// Controlled-Z
    pub fn cz(&mut self, control: usize, target: usize) -> Result<&mut Self> {
        self.push(standard::cz(control, target))
    }

    /// Toffoli
    pub fn ccx(&mut self, control0: usize, control1: usize, target: usize) -> Result<&mut Self> {
        self.push(standard::ccx(control0, control1, target))
    }

    /// Feed every gate, in order, to `engine`
    ///
    /// Stops at the first failing gate; earlier gates stay applied.
    pub fn run<R: Register + ?Sized>(&self, engine: &Engine, register: &mut R) -> Result<()> {
        self.check_register(register)?;
        for gate in &self.gates {
            engine.apply(register, gate)?;
        }
        debug!(gates = self.gates.len(), "ran circuit");
        Ok(())
    }

    /// Lower to a permutation-aware gate list
    ///
    /// Each local gate becomes `[swap block, gate, inverse swap block]`,
    /// planned against `ordering`, the ordering the register will have when
    /// the list runs. Gates already in place are emitted alone. Permutation
    /// gates from the circuit stay physical swaps and keep the ordering, so
    /// every sandwich is planned against `ordering`. The list is meant for
    /// [`Engine::run_lowered`].
    pub fn lowered(&self, cache: &SwapCache, ordering: &[QubitId]) -> Result<Vec<LoweredStep>> {
        if ordering.len() != self.num_qubits {
            return Err(QuantumError::DimensionMismatch {
                expected: self.num_qubits,
                actual: ordering.len(),
            });
        }

        let mut lowered = Vec::with_capacity(self.gates.len());
        for gate in &self.gates {
            let Gate::Local(local) = gate else {
                lowered.push(LoweredStep::Apply(gate.clone()));
                continue;
            };
            let desired = leading_ordering(local, ordering);
            let swaps = permutation::resolve(ordering, &desired)?;
            if swaps.is_empty() {
                lowered.push(LoweredStep::Apply(gate.clone()));
                continue;
            }
            let inverse = permutation::inverse(&swaps);
            lowered.push(LoweredStep::Relabel(
                cache.permutation_gate(&swaps, self.num_qubits)?,
            ));
            lowered.push(LoweredStep::Apply(gate.clone()));
            lowered.push(LoweredStep::Relabel(
                cache.permutation_gate(&inverse, self.num_qubits)?,
            ));
        }
        Ok(lowered)
    }

    fn check_register<R: Register + ?Sized>(&self, register: &R) -> Result<()> {
        if register.num_qubits() < self.num_qubits {
            return Err(QuantumError::DimensionMismatch {
                expected: self.num_qubits,
                actual: register.num_qubits(),
            });
        }
        Ok(())
    }
}
