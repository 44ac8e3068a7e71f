//! Single-qubit projective measurement in the computational basis
//!
//! Measuring qubit `q` selects the basis indices whose bit at `q`'s tensor
//! position is set, sums their probabilities into `p`, and draws a uniform
//! value `r ∈ [0, 1)`. `r < p` reads 1 and keeps the 1-branch, otherwise the
//! result is 0 and the 0-branch is kept. The surviving amplitudes are
//! rescaled so the state stays normalized.

use crate::register::Register;
use kronsim_core::{QuantumError, QubitId, Result};
use tracing::debug;

/// Branch probabilities at or below this are refused rather than divided by
pub const DEGENERATE_PROBABILITY: f64 = 1e-12;

/// Result of measuring one qubit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasurementResult {
    /// Measured qubit
    pub qubit: QubitId,
    /// Outcome, 0 or 1
    pub outcome: u8,
    /// Probability of the observed outcome before collapse
    pub probability: f64,
}

impl MeasurementResult {
    /// Outcome as a boolean
    pub fn is_one(&self) -> bool {
        self.outcome == 1
    }
}

/// Mask over all `2^n` basis indices selecting those with bit `position` set
///
/// The pattern is `2^position` falses followed by `2^position` trues,
/// repeated `2^(n - position - 1)` times.
pub fn outcome_mask(num_qubits: usize, position: usize) -> Vec<bool> {
    let period = 1usize << position;
    let repeats = 1usize << (num_qubits - position - 1);

    let block = std::iter::repeat(false)
        .take(period)
        .chain(std::iter::repeat(true).take(period));
    block.cycle().take(2 * period * repeats).collect()
}

/// Probability that `qubit` reads 1
///
/// # Errors
/// Returns [`QuantumError::InvalidQubit`] if the register has no such qubit.
pub fn probability_of_one<R: Register + ?Sized>(register: &R, qubit: QubitId) -> Result<f64> {
    let position = register.position_of(qubit)?;
    let mask = outcome_mask(register.num_qubits(), position);
    Ok(register
        .probabilities()
        .iter()
        .zip(&mask)
        .filter(|(_, selected)| **selected)
        .map(|(p, _)| p)
        .sum())
}

/// Measure `qubit` and collapse the register
///
/// `rng` must return uniform values in `[0, 1)`.
///
/// # Errors
/// - [`QuantumError::InvalidQubit`] if the register has no such qubit
/// - [`QuantumError::DegenerateMeasurement`] if the drawn branch has
///   (numerically) zero probability; the register is left unchanged
pub fn measure<R: Register + ?Sized>(
    register: &mut R,
    qubit: QubitId,
    rng: &mut dyn FnMut() -> f64,
) -> Result<MeasurementResult> {
    let position = register.position_of(qubit)?;
    let p_one = probability_of_one(&*register, qubit)?;

    let random_value = rng();
    let (outcome, probability) = if random_value < p_one {
        (1u8, p_one)
    } else {
        (0u8, 1.0 - p_one)
    };

    if probability <= DEGENERATE_PROBABILITY {
        return Err(QuantumError::DegenerateMeasurement {
            qubit: qubit.index(),
            outcome,
        });
    }

    register.collapse(position, outcome, probability)?;
    debug!(qubit = qubit.index(), outcome, probability, "measured qubit");

    Ok(MeasurementResult {
        qubit,
        outcome,
        probability,
    })
}
