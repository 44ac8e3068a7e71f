//! Error types for kronsim

use crate::QubitId;
use thiserror::Error;

/// Broad classification of a [`QuantumError`]
///
/// Every error reflects a usage mistake rather than a transient condition,
/// so callers typically only branch on the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed arguments at a construction or application boundary
    Validation,
    /// A gate spans more qubits than the register holds
    RegistrySize,
    /// The request is outside the domain of the operation
    Domain,
}

/// Errors that can occur while building registers, gates and operators
#[derive(Debug, Clone, Error, PartialEq)]
pub enum QuantumError {
    /// Generic validation failure
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Invalid qubit index used
    #[error("Invalid qubit index {0}: register has only {1} qubits")]
    InvalidQubit(usize, usize),

    /// Duplicate qubit in a gate
    #[error("Duplicate qubit {0} in gate operation")]
    DuplicateQubit(QubitId),

    /// Amplitudes do not have unit norm
    #[error("State vector not normalized, norm = {norm}")]
    NotNormalized { norm: f64 },

    /// Data length or matrix dimension does not fit the qubit count
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Basis index out of range or not a binary string
    #[error("Invalid initial state: {0}")]
    InvalidInitialState(String),

    /// Both explicit amplitudes and a basis index were given
    #[error("Cannot provide both amplitude data and an initial basis state")]
    ConflictingInitialState,

    /// Gate spans more qubits than the register
    #[error("Gate '{gate}' acts on {gate_qubits} qubits but the register has only {register_qubits}")]
    RegistrySize {
        gate: String,
        gate_qubits: usize,
        register_qubits: usize,
    },

    /// Two orderings are not permutations of the same labels
    #[error("Orderings {current:?} and {desired:?} are not permutations of each other")]
    PermutationMismatch {
        current: Vec<usize>,
        desired: Vec<usize>,
    },

    /// Gate qubits are not contiguous in the ordering handed to the expander
    #[error("Gate '{gate}' qubits are not contiguous in the current ordering")]
    GateNotAligned { gate: String },

    /// Bloch angles only exist for single-qubit registers
    #[error("Bloch projection is only defined for 1 qubit, register has {num_qubits}")]
    BlochUnsupported { num_qubits: usize },

    /// The sampled measurement branch has (numerically) zero probability
    #[error("Measurement of qubit {qubit} selected outcome {outcome} with zero probability")]
    DegenerateMeasurement { qubit: usize, outcome: u8 },
}

impl QuantumError {
    /// Create an invalid qubit error
    pub fn invalid_qubit(qubit: usize, num_qubits: usize) -> Self {
        Self::InvalidQubit(qubit, num_qubits)
    }

    /// Create a registry size error
    pub fn registry_size(gate: impl Into<String>, gate_qubits: usize, register_qubits: usize) -> Self {
        Self::RegistrySize {
            gate: gate.into(),
            gate_qubits,
            register_qubits,
        }
    }

    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_)
            | Self::InvalidQubit(..)
            | Self::DuplicateQubit(_)
            | Self::NotNormalized { .. }
            | Self::DimensionMismatch { .. }
            | Self::InvalidInitialState(_)
            | Self::ConflictingInitialState => ErrorKind::Validation,
            Self::RegistrySize { .. } => ErrorKind::RegistrySize,
            Self::PermutationMismatch { .. }
            | Self::GateNotAligned { .. }
            | Self::BlochUnsupported { .. }
            | Self::DegenerateMeasurement { .. } => ErrorKind::Domain,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_qubit_error() {
        let err = QuantumError::invalid_qubit(5, 3);
        let msg = format!("{}", err);
        assert!(msg.contains("5"));
        assert!(msg.contains("3"));
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_registry_size_error() {
        let err = QuantumError::registry_size("CX", 2, 1);
        let msg = format!("{}", err);
        assert!(msg.contains("CX"));
        assert!(msg.contains("2"));
        assert!(msg.contains("1"));
        assert_eq!(err.kind(), ErrorKind::RegistrySize);
    }

    #[test]
    fn test_domain_kinds() {
        let err = QuantumError::PermutationMismatch {
            current: vec![0, 1],
            desired: vec![0, 2],
        };
        assert_eq!(err.kind(), ErrorKind::Domain);
        assert_eq!(
            QuantumError::BlochUnsupported { num_qubits: 2 }.kind(),
            ErrorKind::Domain
        );
    }

    #[test]
    fn test_conflicting_initial_state() {
        let msg = QuantumError::ConflictingInitialState.to_string();
        assert!(msg.contains("both"));
    }
}
