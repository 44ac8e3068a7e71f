//! State-vector register
//!
//! Stores the `2^n` complex amplitudes of a pure state. Bit `p` of an
//! amplitude's index is the value of the qubit at tensor position `p`.

use crate::builder::RegisterBuilder;
use crate::display;
use crate::register::{self, Register};
use kronsim_core::{BlochAngles, Matrix, QuantumError, QubitId, Result};
use num_complex::Complex64;

/// Pure-state register
///
/// # Example
///
/// ```
/// use kronsim_state::StateVectorRegister;
///
/// let register = StateVectorRegister::from_basis_state(2, 0b10).unwrap();
/// assert_eq!(register.num_qubits(), 2);
/// assert_eq!(register.ket()[2].re, 1.0);
/// ```
#[derive(Clone, Debug)]
pub struct StateVectorRegister {
    num_qubits: usize,
    qubits: Vec<QubitId>,
    state: Vec<Complex64>,
}

impl StateVectorRegister {
    /// Register in `|0...0⟩`
    pub fn new(num_qubits: usize) -> Result<Self> {
        RegisterBuilder::new(num_qubits).build_state_vector()
    }

    /// Register in the computational basis state `index`
    pub fn from_basis_state(num_qubits: usize, index: usize) -> Result<Self> {
        RegisterBuilder::new(num_qubits)
            .initial_state(index)
            .build_state_vector()
    }

    /// Register in the basis state written as a binary string, e.g. `"0101"`
    pub fn from_bitstring(num_qubits: usize, bits: &str) -> Result<Self> {
        RegisterBuilder::new(num_qubits)
            .initial_bits(bits)
            .build_state_vector()
    }

    /// Register holding the given unit-norm amplitudes
    pub fn from_amplitudes(num_qubits: usize, amplitudes: Vec<Complex64>) -> Result<Self> {
        RegisterBuilder::new(num_qubits)
            .data(amplitudes)
            .build_state_vector()
    }

    /// Assemble from already validated parts
    pub(crate) fn from_parts(num_qubits: usize, state: Vec<Complex64>) -> Self {
        Self {
            num_qubits,
            qubits: QubitId::range(num_qubits),
            state,
        }
    }

    /// Number of qubits
    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Amplitudes as a column vector |ψ⟩
    #[inline]
    pub fn ket(&self) -> &[Complex64] {
        &self.state
    }

    /// Conjugated amplitudes as a row vector ⟨ψ|
    pub fn bra(&self) -> Vec<Complex64> {
        self.state.iter().map(Complex64::conj).collect()
    }

    /// Outer product |ψ⟩⟨ψ|
    pub fn density_matrix(&self) -> Matrix {
        let dim = self.state.len();
        let mut rho = Matrix::zeros(dim);
        for (i, a) in self.state.iter().enumerate() {
            for (j, b) in self.state.iter().enumerate() {
                rho.set(i, j, a * b.conj());
            }
        }
        rho
    }

    /// L2 norm of the amplitudes
    pub fn norm(&self) -> f64 {
        self.state.iter().map(Complex64::norm_sqr).sum::<f64>().sqrt()
    }

    /// Check `|norm - 1| < epsilon`
    pub fn is_normalized(&self, epsilon: f64) -> bool {
        (self.norm() - 1.0).abs() < epsilon
    }

    /// Bloch sphere angles of a single-qubit register
    ///
    /// # Errors
    /// Returns [`QuantumError::BlochUnsupported`] for more than one qubit.
    pub fn bloch_angles(&self) -> Result<BlochAngles> {
        match self.state.as_slice() {
            [alpha, beta] => BlochAngles::from_state(&[*alpha, *beta]),
            _ => Err(QuantumError::BlochUnsupported {
                num_qubits: self.num_qubits,
            }),
        }
    }

    /// Text table of basis-state probabilities
    ///
    /// With `only_ones`, only rows whose probability rounds to 1 are listed.
    pub fn probability_table(&self, only_ones: bool) -> String {
        display::probability_table(self.num_qubits, &self.probabilities(), only_ones)
    }
}

impl Register for StateVectorRegister {
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
        register::check_operator(operator, self.state.len())?;
        self.state = operator.mul_vec(&self.state)?;
        Ok(())
    }

    fn probabilities(&self) -> Vec<f64> {
        self.state.iter().map(Complex64::norm_sqr).collect()
    }

    fn collapse(&mut self, position: usize, outcome: u8, probability: f64) -> Result<()> {
        register::check_collapse(position, self.num_qubits, outcome, probability)?;

        let scale = 1.0 / probability.sqrt();
        let keep_ones = outcome == 1;
        let mask = crate::measurement::outcome_mask(self.num_qubits, position);
        for (amplitude, is_one) in self.state.iter_mut().zip(mask) {
            if is_one == keep_ones {
                *amplitude *= scale;
            } else {
                *amplitude = Complex64::new(0.0, 0.0);
            }
        }
        Ok(())
    }
}
