//! The register interface shared by both state representations
//!
//! A register owns its amplitude storage and its *ordering*, the sequence
//! recording which logical qubit occupies which tensor position. All
//! mutation goes through the sequenced methods of [`Register`]; each one
//! validates first and only then commits, so a failed call leaves the
//! register untouched.

use kronsim_core::{permutation, Matrix, QuantumError, QubitId, Result};

/// Mutable quantum register
pub trait Register {
    /// Number of qubits
    fn num_qubits(&self) -> usize;

    /// Current ordering: `qubits()[p]` is the qubit at tensor position `p`
    fn qubits(&self) -> &[QubitId];

    /// Replace the ordering bookkeeping
    ///
    /// Only the label bookkeeping changes; amplitudes are not touched. The
    /// engine calls this right after applying the matching swap operator.
    fn set_ordering(&mut self, ordering: Vec<QubitId>) -> Result<()>;

    /// Evolve the state by a full-register operator
    ///
    /// State vectors are left-multiplied (`ψ → Uψ`), density matrices are
    /// conjugated (`ρ → UρU†`).
    fn apply_operator(&mut self, operator: &Matrix) -> Result<()>;

    /// Probability of each computational basis state, indexed by position bits
    fn probabilities(&self) -> Vec<f64>;

    /// Project onto `outcome` at tensor `position` and rescale by `1/sqrt(probability)`
    ///
    /// `probability` is the probability of the kept branch and must be
    /// positive.
    fn collapse(&mut self, position: usize, outcome: u8, probability: f64) -> Result<()>;

    /// Dimension of the state space (2^num_qubits)
    fn dimension(&self) -> usize {
        1 << self.num_qubits()
    }

    /// Tensor position currently holding `qubit`
    fn position_of(&self, qubit: QubitId) -> Result<usize> {
        self.qubits()
            .iter()
            .position(|&q| q == qubit)
            .ok_or_else(|| QuantumError::invalid_qubit(qubit.index(), self.num_qubits()))
    }
}

/// Check that `ordering` relabels the register's current qubits
pub(crate) fn check_ordering(current: &[QubitId], ordering: &[QubitId]) -> Result<()> {
    if permutation::same_labels(current, ordering) {
        Ok(())
    } else {
        Err(QuantumError::PermutationMismatch {
            current: current.iter().map(QubitId::index).collect(),
            desired: ordering.iter().map(QubitId::index).collect(),
        })
    }
}

/// Check that an operator has the register's dimension
pub(crate) fn check_operator(operator: &Matrix, dimension: usize) -> Result<()> {
    if operator.dim() == dimension {
        Ok(())
    } else {
        Err(QuantumError::DimensionMismatch {
            expected: dimension,
            actual: operator.dim(),
        })
    }
}

/// Check a measurement target before anything is mutated
pub(crate) fn check_collapse(
    position: usize,
    num_qubits: usize,
    outcome: u8,
    probability: f64,
) -> Result<()> {
    if position >= num_qubits {
        return Err(QuantumError::invalid_qubit(position, num_qubits));
    }
    if outcome > 1 {
        return Err(QuantumError::Validation(format!(
            "measurement outcome must be 0 or 1, got {}",
            outcome
        )));
    }
    if probability.is_nan() || probability <= 0.0 {
        return Err(QuantumError::DegenerateMeasurement {
            qubit: position,
            outcome,
        });
    }
    Ok(())
}
