//! Dense complex square matrices
//!
//! Operators in kronsim are stored as dense row-major `dim × dim` buffers of
//! [`Complex64`]. Register operators have `dim = 2^n`, so every routine here
//! is written for small, square, power-of-two shapes.
//!
//! The tensor product follows the usual Kronecker layout: in `a.kron(&b)` the
//! factor `a` is the *more significant* one, i.e. the row index of the result
//! is `i_a * dim_b + i_b`.
//!
//! # Example
//!
//! ```
//! use kronsim_core::Matrix;
//! use num_complex::Complex64;
//!
//! let x = Matrix::from_array(&[
//!     [Complex64::new(0.0, 0.0), Complex64::new(1.0, 0.0)],
//!     [Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)],
//! ]);
//! let xx = x.matmul(&x).unwrap();
//! assert!(xx.is_identity(1e-12));
//! ```

use crate::{QuantumError, Result};
use num_complex::Complex64;
use std::fmt;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);

/// Dense complex square matrix in row-major order
#[derive(Clone, PartialEq)]
pub struct Matrix {
    dim: usize,
    data: Vec<Complex64>,
}

impl Matrix {
    /// `dim × dim` identity
    pub fn identity(dim: usize) -> Self {
        let mut data = vec![ZERO; dim * dim];
        for i in 0..dim {
            data[i * dim + i] = ONE;
        }
        Self { dim, data }
    }

    /// `dim × dim` zero matrix
    pub fn zeros(dim: usize) -> Self {
        Self {
            dim,
            data: vec![ZERO; dim * dim],
        }
    }

    /// The 1×1 matrix `[1]`, neutral element of [`Matrix::kron`]
    pub fn scalar_one() -> Self {
        Self::identity(1)
    }

    /// Build from a flattened row-major buffer
    ///
    /// # Errors
    /// Returns [`QuantumError::DimensionMismatch`] if `data.len() != dim * dim`.
    pub fn from_vec(dim: usize, data: Vec<Complex64>) -> Result<Self> {
        if data.len() != dim * dim {
            return Err(QuantumError::DimensionMismatch {
                expected: dim * dim,
                actual: data.len(),
            });
        }
        Ok(Self { dim, data })
    }

    /// Build from a fixed-size array, as used by the gate catalog
    pub fn from_array<const N: usize>(rows: &[[Complex64; N]; N]) -> Self {
        Self {
            dim: N,
            data: rows.iter().flatten().copied().collect(),
        }
    }

    /// Build from real entries
    pub fn from_real_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let dim = rows.len();
        let mut data = Vec::with_capacity(dim * dim);
        for row in rows {
            if row.len() != dim {
                return Err(QuantumError::DimensionMismatch {
                    expected: dim,
                    actual: row.len(),
                });
            }
            data.extend(row.iter().map(|&re| Complex64::new(re, 0.0)));
        }
        Ok(Self { dim, data })
    }

    /// Number of rows (and columns)
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of qubits this matrix spans, if `dim` is a power of two
    pub fn num_qubits(&self) -> Option<usize> {
        if self.dim.is_power_of_two() {
            Some(self.dim.trailing_zeros() as usize)
        } else {
            None
        }
    }

    /// Entry at `(row, col)`
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Complex64 {
        self.data[row * self.dim + col]
    }

    /// Overwrite entry at `(row, col)`
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: Complex64) {
        self.data[row * self.dim + col] = value;
    }

    /// Row-major view of the entries
    #[inline]
    pub fn as_slice(&self) -> &[Complex64] {
        &self.data
    }

    /// Kronecker product `self ⊗ other`
    pub fn kron(&self, other: &Matrix) -> Matrix {
        let n_a = self.dim;
        let n_b = other.dim;
        let n = n_a * n_b;
        let mut data = vec![ZERO; n * n];

        for i in 0..n_a {
            for j in 0..n_a {
                let a_ij = self.data[i * n_a + j];
                if a_ij == ZERO {
                    continue;
                }
                for k in 0..n_b {
                    for l in 0..n_b {
                        let row = i * n_b + k;
                        let col = j * n_b + l;
                        data[row * n + col] = a_ij * other.data[k * n_b + l];
                    }
                }
            }
        }

        Matrix { dim: n, data }
    }

    /// Matrix product `self @ other`
    ///
    /// # Errors
    /// Returns [`QuantumError::DimensionMismatch`] if the shapes differ.
    pub fn matmul(&self, other: &Matrix) -> Result<Matrix> {
        if self.dim != other.dim {
            return Err(QuantumError::DimensionMismatch {
                expected: self.dim,
                actual: other.dim,
            });
        }

        let n = self.dim;
        let mut data = vec![ZERO; n * n];
        for i in 0..n {
            for k in 0..n {
                let a_ik = self.data[i * n + k];
                // permutation and expanded operators are mostly zeros
                if a_ik == ZERO {
                    continue;
                }
                let row = &other.data[k * n..(k + 1) * n];
                let out = &mut data[i * n..(i + 1) * n];
                for (o, b) in out.iter_mut().zip(row) {
                    *o += a_ik * b;
                }
            }
        }

        Ok(Matrix { dim: n, data })
    }

    /// Matrix-vector product `self @ v`
    ///
    /// # Errors
    /// Returns [`QuantumError::DimensionMismatch`] if `v.len() != dim`.
    pub fn mul_vec(&self, v: &[Complex64]) -> Result<Vec<Complex64>> {
        if v.len() != self.dim {
            return Err(QuantumError::DimensionMismatch {
                expected: self.dim,
                actual: v.len(),
            });
        }

        let n = self.dim;
        let result: Vec<Complex64> = (0..n)
            .map(|i| {
                self.data[i * n..(i + 1) * n]
                    .iter()
                    .zip(v)
                    .filter(|(a, _)| **a != ZERO)
                    .map(|(a, x)| a * x)
                    .sum()
            })
            .collect();
        Ok(result)
    }

    /// Conjugate transpose
    pub fn adjoint(&self) -> Matrix {
        let n = self.dim;
        let mut data = vec![ZERO; n * n];
        for i in 0..n {
            for j in 0..n {
                data[j * n + i] = self.data[i * n + j].conj();
            }
        }
        Matrix { dim: n, data }
    }

    /// Sum of the diagonal
    pub fn trace(&self) -> Complex64 {
        (0..self.dim).map(|i| self.get(i, i)).sum()
    }

    /// Entry-wise comparison within `tolerance`
    pub fn approx_eq(&self, other: &Matrix, tolerance: f64) -> bool {
        self.dim == other.dim
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(a, b)| (a - b).norm() <= tolerance)
    }

    /// Check `self ≈ I`
    pub fn is_identity(&self, tolerance: f64) -> bool {
        self.approx_eq(&Matrix::identity(self.dim), tolerance)
    }

    /// Check `U†U ≈ I`
    pub fn is_unitary(&self, tolerance: f64) -> bool {
        match self.adjoint().matmul(self) {
            Ok(product) => product.is_identity(tolerance),
            Err(_) => false,
        }
    }

    /// Check `A ≈ A†`
    pub fn is_hermitian(&self, tolerance: f64) -> bool {
        self.approx_eq(&self.adjoint(), tolerance)
    }

    /// Check that a Hermitian matrix has no eigenvalue below `-tolerance`
    ///
    /// Runs an LDL† factorization. A pivot below `-tolerance` fails; a pivot
    /// within `tolerance` of zero is skipped, which is only consistent if the
    /// rest of its column vanishes too.
    pub fn is_positive_semidefinite(&self, tolerance: f64) -> bool {
        let n = self.dim;
        let mut lower = vec![Complex64::new(0.0, 0.0); n * n];
        let mut pivots = vec![0.0f64; n];

        for j in 0..n {
            let pivot = self.get(j, j).re
                - (0..j)
                    .map(|k| lower[j * n + k].norm_sqr() * pivots[k])
                    .sum::<f64>();
            if pivot < -tolerance {
                return false;
            }
            let degenerate = pivot <= tolerance;
            pivots[j] = if degenerate { 0.0 } else { pivot };

            for i in j + 1..n {
                let residual = (0..j).fold(self.get(i, j), |acc, k| {
                    acc - lower[i * n + k] * lower[j * n + k].conj() * pivots[k]
                });
                if degenerate {
                    if residual.norm() > tolerance.sqrt() {
                        return false;
                    }
                } else {
                    lower[i * n + j] = residual / pivot;
                }
            }
        }
        true
    }
}

impl fmt::Debug for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Matrix {}x{} [", self.dim, self.dim)?;
        for row in self.data.chunks(self.dim.max(1)) {
            write!(f, "  ")?;
            for value in row {
                write!(f, "{:>6.3}{:+.3}i ", value.re, value.im)?;
            }
            writeln!(f)?;
        }
        write!(f, "]")
    }
}
