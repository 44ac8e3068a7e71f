//! Simulator configuration

use kronsim_core::{QuantumError, Result, MAX_QUBITS};

/// Register representation the simulator creates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Representation {
    /// `2^n` amplitudes
    #[default]
    StateVector,
    /// `2^n × 2^n` density matrix
    DensityMatrix,
}

/// Configuration for the [`Simulator`](crate::Simulator)
#[derive(Debug, Clone)]
pub struct SimulatorConfig {
    /// Random number generator seed for reproducible measurements
    ///
    /// If None, the generator is seeded from entropy.
    ///
    /// Default: None
    pub seed: Option<u64>,

    /// Allowed `|norm - 1|` for registers built from explicit amplitudes
    ///
    /// Default: 1e-9
    pub tolerance: f64,

    /// Representation of registers created by the simulator
    ///
    /// Default: [`Representation::StateVector`]
    pub representation: Representation,

    /// Largest register the simulator will create
    ///
    /// Every gate application builds dense `2^n × 2^n` operators, so cost
    /// grows as `4^n`.
    ///
    /// Default: 12
    pub max_qubits: usize,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            seed: None,
            tolerance: 1e-9,
            representation: Representation::StateVector,
            max_qubits: 12,
        }
    }
}

impl SimulatorConfig {
    /// Create a new configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Deterministic configuration for debugging
    pub fn debug() -> Self {
        Self {
            seed: Some(42),
            ..Default::default()
        }
    }

    /// Set the random seed for deterministic measurement
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the normalization tolerance
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the register representation
    pub fn with_representation(mut self, representation: Representation) -> Self {
        self.representation = representation;
        self
    }

    /// Set the largest register size
    pub fn with_max_qubits(mut self, max_qubits: usize) -> Self {
        self.max_qubits = max_qubits;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !(self.tolerance > 0.0 && self.tolerance < 1.0) {
            return Err(QuantumError::Validation(format!(
                "tolerance must be in (0, 1), got {}",
                self.tolerance
            )));
        }

        if self.max_qubits == 0 || self.max_qubits > MAX_QUBITS {
            return Err(QuantumError::Validation(format!(
                "max_qubits must be in 1..={}, got {}",
                MAX_QUBITS, self.max_qubits
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SimulatorConfig::default();
        assert_eq!(config.seed, None);
        assert_eq!(config.tolerance, 1e-9);
        assert_eq!(config.representation, Representation::StateVector);
        assert_eq!(config.max_qubits, 12);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = SimulatorConfig::new()
            .with_seed(7)
            .with_tolerance(1e-6)
            .with_representation(Representation::DensityMatrix)
            .with_max_qubits(4);

        assert_eq!(config.seed, Some(7));
        assert_eq!(config.tolerance, 1e-6);
        assert_eq!(config.representation, Representation::DensityMatrix);
        assert_eq!(config.max_qubits, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_debug_config() {
        assert_eq!(SimulatorConfig::debug().seed, Some(42));
    }

    #[test]
    fn test_invalid_config() {
        assert!(SimulatorConfig::new().with_tolerance(0.0).validate().is_err());
        assert!(SimulatorConfig::new().with_tolerance(f64::NAN).validate().is_err());
        assert!(SimulatorConfig::new().with_max_qubits(0).validate().is_err());
        assert!(SimulatorConfig::new()
            .with_max_qubits(MAX_QUBITS + 1)
            .validate()
            .is_err());
    }
}
