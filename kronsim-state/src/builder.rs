//! Validated register construction
//!
//! A register starts from exactly one of: explicit amplitudes, a basis index,
//! a binary string naming a basis index, or nothing (`|0...0⟩`).
//!
//! ```
//! use kronsim_state::RegisterBuilder;
//!
//! let register = RegisterBuilder::new(3)
//!     .initial_bits("101")
//!     .build_state_vector()
//!     .unwrap();
//! assert_eq!(register.ket()[5].re, 1.0);
//! ```

use crate::{DensityMatrixRegister, StateVectorRegister};
use kronsim_core::{QuantumError, Result, MAX_QUBITS};
use num_complex::Complex64;

/// Default tolerance for the unit-norm check
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone)]
enum BasisState {
    Index(usize),
    Bits(String),
}

/// Builder for [`StateVectorRegister`] and [`DensityMatrixRegister`]
#[derive(Debug, Clone)]
pub struct RegisterBuilder {
    num_qubits: usize,
    data: Option<Vec<Complex64>>,
    basis: Option<BasisState>,
    tolerance: f64,
}

impl RegisterBuilder {
    /// Start a builder for `num_qubits` qubits
    pub fn new(num_qubits: usize) -> Self {
        Self {
            num_qubits,
            data: None,
            basis: None,
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    /// Initial amplitudes, one per basis index
    pub fn data(mut self, amplitudes: Vec<Complex64>) -> Self {
        self.data = Some(amplitudes);
        self
    }

    /// Initial computational basis index
    pub fn initial_state(mut self, index: usize) -> Self {
        self.basis = Some(BasisState::Index(index));
        self
    }

    /// Initial basis index written in binary, most significant bit first
    pub fn initial_bits(mut self, bits: impl Into<String>) -> Self {
        self.basis = Some(BasisState::Bits(bits.into()));
        self
    }

    /// Tolerance for `|norm - 1|` when explicit amplitudes are given
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Build a pure-state register
    ///
    /// # Errors
    /// - [`QuantumError::Validation`] if the qubit count is 0 or too large
    /// - [`QuantumError::ConflictingInitialState`] if both amplitudes and a basis state were set
    /// - [`QuantumError::DimensionMismatch`] if the amplitude count is not `2^n`
    /// - [`QuantumError::NotNormalized`] if the amplitudes are not unit norm
    /// - [`QuantumError::InvalidInitialState`] for a bad basis index or bit string
    pub fn build_state_vector(self) -> Result<StateVectorRegister> {
        let num_qubits = self.num_qubits;
        let state = self.into_amplitudes()?;
        Ok(StateVectorRegister::from_parts(num_qubits, state))
    }

    /// Build a density-matrix register holding the same pure state
    ///
    /// # Errors
    /// Same as [`RegisterBuilder::build_state_vector`].
    pub fn build_density_matrix(self) -> Result<DensityMatrixRegister> {
        let register = self.build_state_vector()?;
        Ok(DensityMatrixRegister::from_state_vector(&register))
    }

    fn into_amplitudes(self) -> Result<Vec<Complex64>> {
        if self.num_qubits == 0 || self.num_qubits > MAX_QUBITS {
            return Err(QuantumError::Validation(format!(
                "number of qubits must be between 1 and {}, got {}",
                MAX_QUBITS, self.num_qubits
            )));
        }
        let dimension = 1usize << self.num_qubits;

        match (self.data, self.basis) {
            (Some(_), Some(_)) => Err(QuantumError::ConflictingInitialState),
            (Some(data), None) => {
                if data.len() != dimension {
                    return Err(QuantumError::DimensionMismatch {
                        expected: dimension,
                        actual: data.len(),
                    });
                }
                let norm = data.iter().map(Complex64::norm_sqr).sum::<f64>().sqrt();
                if !norm.is_finite() || (norm - 1.0).abs() > self.tolerance {
                    return Err(QuantumError::NotNormalized { norm });
                }
                Ok(data)
            }
            (None, basis) => {
                let index = match basis {
                    None => 0,
                    Some(BasisState::Index(index)) => index,
                    Some(BasisState::Bits(bits)) => parse_bits(&bits)?,
                };
                if index >= dimension {
                    return Err(QuantumError::InvalidInitialState(format!(
                        "basis index {} is out of range for {} qubits",
                        index, self.num_qubits
                    )));
                }
                let mut state = vec![Complex64::new(0.0, 0.0); dimension];
                state[index] = Complex64::new(1.0, 0.0);
                Ok(state)
            }
        }
    }
}

fn parse_bits(bits: &str) -> Result<usize> {
    if bits.is_empty() || !bits.chars().all(|c| c == '0' || c == '1') {
        return Err(QuantumError::InvalidInitialState(format!(
            "'{}' is not a binary string",
            bits
        )));
    }
    usize::from_str_radix(bits, 2).map_err(|_| {
        QuantumError::InvalidInitialState(format!("'{}' does not fit in a basis index", bits))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use kronsim_core::ErrorKind;

    fn c(re: f64) -> Complex64 {
        Complex64::new(re, 0.0)
    }

    #[test]
    fn test_default_is_all_zero() {
        let register = RegisterBuilder::new(2).build_state_vector().unwrap();
        assert_eq!(register.ket(), &[c(1.0), c(0.0), c(0.0), c(0.0)]);
    }

    #[test]
    fn test_conflicting_initial_state() {
        let err = RegisterBuilder::new(1)
            .data(vec![c(1.0), c(0.0)])
            .initial_state(1)
            .build_state_vector()
            .unwrap_err();
        assert_eq!(err, QuantumError::ConflictingInitialState);
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_wrong_length() {
        let err = RegisterBuilder::new(2)
            .data(vec![c(1.0), c(0.0)])
            .build_state_vector()
            .unwrap_err();
        assert_eq!(err, QuantumError::DimensionMismatch { expected: 4, actual: 2 });
    }

    #[test]
    fn test_not_normalized() {
        let err = RegisterBuilder::new(1)
            .data(vec![c(1.0), c(1.0)])
            .build_state_vector()
            .unwrap_err();
        assert!(matches!(err, QuantumError::NotNormalized { .. }));
    }

    #[test]
    fn test_tolerance_is_respected() {
        let slightly_off = vec![c(1.0 + 1e-6), c(0.0)];
        assert!(RegisterBuilder::new(1)
            .data(slightly_off.clone())
            .build_state_vector()
            .is_err());
        assert!(RegisterBuilder::new(1)
            .data(slightly_off)
            .tolerance(1e-3)
            .build_state_vector()
            .is_ok());
    }

    #[test]
    fn test_basis_index_out_of_range() {
        let err = RegisterBuilder::new(2).initial_state(4).build_state_vector().unwrap_err();
        assert!(matches!(err, QuantumError::InvalidInitialState(_)));
    }

    #[test]
    fn test_bit_strings() {
        let register = RegisterBuilder::new(4).initial_bits("11").build_state_vector().unwrap();
        assert_eq!(register.ket()[3], c(1.0));

        for bad in ["", "012", "1x"] {
            let err = RegisterBuilder::new(4).initial_bits(bad).build_state_vector().unwrap_err();
            assert!(matches!(err, QuantumError::InvalidInitialState(_)), "{:?}", bad);
        }
        assert!(RegisterBuilder::new(2).initial_bits("100").build_state_vector().is_err());
    }

    #[test]
    fn test_qubit_count_bounds() {
        assert!(RegisterBuilder::new(0).build_state_vector().is_err());
        assert!(RegisterBuilder::new(MAX_QUBITS + 1).build_state_vector().is_err());
    }

    #[test]
    fn test_density_matrix_build() {
        let register = RegisterBuilder::new(2).initial_state(3).build_density_matrix().unwrap();
        assert_eq!(register.density_matrix().get(3, 3), c(1.0));
        assert_eq!(register.density_matrix().get(0, 0), c(0.0));
    }
}
