//! Density-matrix register
//!
//! A density matrix ρ is Hermitian, positive semi-definite and has Tr(ρ) = 1.
//! For a pure state ρ = |ψ⟩⟨ψ|. Gates act by conjugation, ρ → UρU†, and a
//! projective measurement with projector P leaves ρ' = PρP / p.

use crate::display;
use crate::register::{self, Register};
use crate::StateVectorRegister;
use kronsim_core::{Matrix, QuantumError, QubitId, Result, MAX_QUBITS};
use num_complex::Complex64;

/// Tolerance used when validating a caller-supplied density matrix
const VALIDATION_TOLERANCE: f64 = 1e-9;

/// Mixed-state register
#[derive(Clone, Debug)]
pub struct DensityMatrixRegister {
    num_qubits: usize,
    qubits: Vec<QubitId>,
    rho: Matrix,
}

impl DensityMatrixRegister {
    /// Register in `|0...0⟩⟨0...0|`
    pub fn new(num_qubits: usize) -> Result<Self> {
        crate::RegisterBuilder::new(num_qubits).build_density_matrix()
    }

    /// Register in the basis projector `|i⟩⟨i|`
    pub fn from_basis_state(num_qubits: usize, index: usize) -> Result<Self> {
        crate::RegisterBuilder::new(num_qubits)
            .initial_state(index)
            .build_density_matrix()
    }

    /// Pure density matrix `|ψ⟩⟨ψ|` of a state-vector register
    ///
    /// The register's current ordering is carried over.
    pub fn from_state_vector(register: &StateVectorRegister) -> Self {
        Self {
            num_qubits: register.num_qubits(),
            qubits: register.qubits().to_vec(),
            rho: register.density_matrix(),
        }
    }

    /// Register holding an explicit density matrix
    ///
    /// # Errors
    /// - [`QuantumError::Validation`] for a bad qubit count, a non-Hermitian
    ///   matrix, a trace different from 1 or a negative eigenvalue
    /// - [`QuantumError::DimensionMismatch`] if the matrix is not `2^n × 2^n`
    pub fn from_matrix(num_qubits: usize, rho: Matrix) -> Result<Self> {
        if num_qubits == 0 || num_qubits > MAX_QUBITS {
            return Err(QuantumError::Validation(format!(
                "number of qubits must be between 1 and {}, got {}",
                MAX_QUBITS, num_qubits
            )));
        }
        let dimension = 1usize << num_qubits;
        if rho.dim() != dimension {
            return Err(QuantumError::DimensionMismatch {
                expected: dimension,
                actual: rho.dim(),
            });
        }
        if !rho.is_hermitian(VALIDATION_TOLERANCE) {
            return Err(QuantumError::Validation(
                "density matrix must be Hermitian".to_string(),
            ));
        }
        let trace = rho.trace();
        if (trace.re - 1.0).abs() > VALIDATION_TOLERANCE || trace.im.abs() > VALIDATION_TOLERANCE {
            return Err(QuantumError::Validation(format!(
                "density matrix must have unit trace, got {}",
                trace
            )));
        }
        if !rho.is_positive_semidefinite(VALIDATION_TOLERANCE) {
            return Err(QuantumError::Validation(
                "density matrix must be positive semidefinite".to_string(),
            ));
        }

        Ok(Self {
            num_qubits,
            qubits: QubitId::range(num_qubits),
            rho,
        })
    }

    /// Number of qubits
    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// The density matrix
    #[inline]
    pub fn density_matrix(&self) -> &Matrix {
        &self.rho
    }

    /// Tr(ρ), 1 for a valid state
    pub fn trace(&self) -> f64 {
        self.rho.trace().re
    }

    /// Tr(ρ²), 1 for pure states and `1/2^n` for the maximally mixed state
    pub fn purity(&self) -> f64 {
        // Tr(ρ²) = Σ_ij |ρ_ij|² for Hermitian ρ
        self.rho.as_slice().iter().map(Complex64::norm_sqr).sum()
    }

    /// Check ρ = ρ† within `tolerance`
    pub fn is_hermitian(&self, tolerance: f64) -> bool {
        self.rho.is_hermitian(tolerance)
    }

    /// Text table of basis-state probabilities
    pub fn probability_table(&self, only_ones: bool) -> String {
        display::probability_table(self.num_qubits, &self.probabilities(), only_ones)
    }
}

impl Register for DensityMatrixRegister {
    fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    fn qubits(&self) -> &[QubitId] {
        &self.qubits
    }

    fn set_ordering(&mut self, ordering: Vec<QubitId>) -> Result<()> {
        register::check_ordering(&self.qubits, &ordering)?;
        self.qubits = ordering;
        Ok(())
    }

    fn apply_operator(&mut self, operator: &Matrix) -> Result<()> {
        register::check_operator(operator, self.rho.dim())?;
        let evolved = operator.matmul(&self.rho)?.matmul(&operator.adjoint())?;
        self.rho = evolved;
        Ok(())
    }

    fn probabilities(&self) -> Vec<f64> {
        (0..self.rho.dim()).map(|i| self.rho.get(i, i).re).collect()
    }

    fn collapse(&mut self, position: usize, outcome: u8, probability: f64) -> Result<()> {
        register::check_collapse(position, self.num_qubits, outcome, probability)?;

        let keep_ones = outcome == 1;
        let kept: Vec<bool> = crate::measurement::outcome_mask(self.num_qubits, position)
            .into_iter()
            .map(|is_one| is_one == keep_ones)
            .collect();
        let zero = Complex64::new(0.0, 0.0);
        let dim = self.rho.dim();
        for row in 0..dim {
            for col in 0..dim {
                let value = if kept[row] && kept[col] {
                    self.rho.get(row, col) / probability
                } else {
                    zero
                };
                self.rho.set(row, col, value);
            }
        }
        Ok(())
    }
}
