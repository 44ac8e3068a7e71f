//! Gate values
//!
//! Gates come in two shapes:
//!
//! - [`LocalGate`]: a small `2^k × 2^k` unitary acting on `k` named qubits,
//!   controls first and the target last.
//! - [`PermutationGate`]: a full-register permutation operator built from
//!   position swaps. It acts on positions, not on labels.
//!
//! Both expose the same capability interface, [`GateShape`], and are bundled
//! as the closed enum [`Gate`].
//!
//! # Local matrix convention
//!
//! Bit `j` of a local basis index belongs to `qubits()[j]`. For a CX gate with
//! `qubits() == [control, target]` the control is bit 0 and the target bit 1,
//! so the matrix maps `|01⟩ ↔ |11⟩` in `|b1 b0⟩` notation. This mirrors the
//! register convention where bit `p` of a basis index is tensor position `p`.

use crate::permutation::Swap;
use crate::{Matrix, QuantumError, QubitId, Result};
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

/// Tolerance used when checking that a gate matrix is unitary
pub const UNITARY_TOLERANCE: f64 = 1e-9;

/// Capability interface shared by every gate shape
pub trait GateShape: fmt::Debug {
    /// Gate name (e.g. "H", "CX", "SWAP")
    fn name(&self) -> &str;

    /// Matrix the gate contributes to the register operator
    fn local_matrix(&self) -> &Matrix;

    /// Qubits (labels for local gates, positions for permutation gates)
    fn qubits(&self) -> &[QubitId];

    /// Number of qubits spanned by [`GateShape::local_matrix`]
    fn size(&self) -> usize;
}

/// A unitary acting on a few named qubits
#[derive(Clone)]
pub struct LocalGate {
    name: Arc<str>,
    matrix: Arc<Matrix>,
    qubits: SmallVec<[QubitId; 3]>,
}

impl LocalGate {
    /// Create a gate from its local matrix and qubits (controls..., target)
    ///
    /// # Errors
    /// Returns error if:
    /// - no qubits are given
    /// - a qubit is repeated
    /// - the matrix is not `2^k × 2^k` for `k` qubits
    /// - the matrix is not unitary
    pub fn new(name: impl Into<Arc<str>>, matrix: Arc<Matrix>, qubits: &[QubitId]) -> Result<Self> {
        let name = name.into();

        if qubits.is_empty() {
            return Err(QuantumError::Validation(format!(
                "gate '{}' needs at least one qubit",
                name
            )));
        }

        for i in 0..qubits.len() {
            for j in (i + 1)..qubits.len() {
                if qubits[i] == qubits[j] {
                    return Err(QuantumError::DuplicateQubit(qubits[i]));
                }
            }
        }

        let expected = u32::try_from(qubits.len())
            .ok()
            .and_then(|k| 1usize.checked_shl(k))
            .ok_or_else(|| QuantumError::Validation(format!("gate '{}' is too wide", name)))?;
        if matrix.dim() != expected {
            return Err(QuantumError::DimensionMismatch {
                expected,
                actual: matrix.dim(),
            });
        }

        if !matrix.is_unitary(UNITARY_TOLERANCE) {
            return Err(QuantumError::Validation(format!(
                "matrix of gate '{}' is not unitary",
                name
            )));
        }

        Ok(Self {
            name,
            matrix,
            qubits: SmallVec::from_slice(qubits),
        })
    }

    /// Control qubits (all but the last)
    #[inline]
    pub fn controls(&self) -> &[QubitId] {
        &self.qubits[..self.qubits.len() - 1]
    }

    /// Target qubit (the last one)
    #[inline]
    pub fn target(&self) -> QubitId {
        self.qubits[self.qubits.len() - 1]
    }

    /// Shared handle to the matrix
    #[inline]
    pub fn matrix(&self) -> &Arc<Matrix> {
        &self.matrix
    }
}

impl GateShape for LocalGate {
    fn name(&self) -> &str {
        &self.name
    }

    fn local_matrix(&self) -> &Matrix {
        &self.matrix
    }

    fn qubits(&self) -> &[QubitId] {
        &self.qubits
    }

    fn size(&self) -> usize {
        self.qubits.len()
    }
}

impl fmt::Debug for LocalGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, q) in self.qubits.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", q)?;
        }
        write!(f, ")")
    }
}

/// A full-register permutation built from position swaps
#[derive(Clone)]
pub struct PermutationGate {
    swaps: Vec<Swap>,
    size: usize,
    matrix: Arc<Matrix>,
    positions: Vec<QubitId>,
}

impl PermutationGate {
    /// Wrap an already built permutation operator
    ///
    /// `matrix` must be the `2^size × 2^size` product of `swaps`; the swap
    /// operator builder is the intended producer.
    ///
    /// # Errors
    /// Returns error if the matrix shape does not match `size` or a swap
    /// touches a position outside the register.
    pub fn new(swaps: Vec<Swap>, size: usize, matrix: Arc<Matrix>) -> Result<Self> {
        let expected = u32::try_from(size)
            .ok()
            .and_then(|n| 1usize.checked_shl(n))
            .ok_or_else(|| QuantumError::Validation(format!("{} positions is too wide", size)))?;
        if matrix.dim() != expected {
            return Err(QuantumError::DimensionMismatch {
                expected,
                actual: matrix.dim(),
            });
        }

        let mut positions: Vec<QubitId> = Vec::new();
        for swap in &swaps {
            for p in [swap.a(), swap.b()] {
                if p >= size {
                    return Err(QuantumError::invalid_qubit(p, size));
                }
                if !swap.is_trivial() && !positions.contains(&QubitId::new(p)) {
                    positions.push(QubitId::new(p));
                }
            }
        }
        positions.sort_unstable();

        Ok(Self {
            swaps,
            size,
            matrix,
            positions,
        })
    }

    /// The swaps this operator realizes, in application order
    #[inline]
    pub fn swaps(&self) -> &[Swap] {
        &self.swaps
    }
}

impl GateShape for PermutationGate {
    fn name(&self) -> &str {
        "SWAP"
    }

    fn local_matrix(&self) -> &Matrix {
        &self.matrix
    }

    /// Positions moved by the permutation
    fn qubits(&self) -> &[QubitId] {
        &self.positions
    }

    fn size(&self) -> usize {
        self.size
    }
}

impl fmt::Debug for PermutationGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SWAP[")?;
        for (i, s) in self.swaps.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", s)?;
        }
        write!(f, "; n={}]", self.size)
    }
}

/// Any gate the engine can apply
#[derive(Clone, Debug)]
pub enum Gate {
    Local(LocalGate),
    Permutation(PermutationGate),
}

impl GateShape for Gate {
    fn name(&self) -> &str {
        match self {
            Gate::Local(g) => g.name(),
            Gate::Permutation(g) => g.name(),
        }
    }

    fn local_matrix(&self) -> &Matrix {
        match self {
            Gate::Local(g) => g.local_matrix(),
            Gate::Permutation(g) => g.local_matrix(),
        }
    }

    fn qubits(&self) -> &[QubitId] {
        match self {
            Gate::Local(g) => g.qubits(),
            Gate::Permutation(g) => g.qubits(),
        }
    }

    fn size(&self) -> usize {
        match self {
            Gate::Local(g) => g.size(),
            Gate::Permutation(g) => g.size(),
        }
    }
}

impl From<LocalGate> for Gate {
    fn from(gate: LocalGate) -> Self {
        Gate::Local(gate)
    }
}

impl From<PermutationGate> for Gate {
    fn from(gate: PermutationGate) -> Self {
        Gate::Permutation(gate)
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;

    fn c(re: f64) -> Complex64 {
        Complex64::new(re, 0.0)
    }

    fn x_matrix() -> Arc<Matrix> {
        Arc::new(Matrix::from_array(&[[c(0.0), c(1.0)], [c(1.0), c(0.0)]]))
    }

    fn cx_matrix() -> Arc<Matrix> {
        Arc::new(
            Matrix::from_real_rows(&[
                vec![1.0, 0.0, 0.0, 0.0],
                vec![0.0, 0.0, 0.0, 1.0],
                vec![0.0, 0.0, 1.0, 0.0],
                vec![0.0, 1.0, 0.0, 0.0],
            ])
            .unwrap(),
        )
    }

    #[test]
    fn test_local_gate_creation() {
        let gate = LocalGate::new("X", x_matrix(), &[QubitId::new(3)]).unwrap();
        assert_eq!(gate.size(), 1);
        assert!(gate.controls().is_empty());
        assert_eq!(gate.target(), QubitId::new(3));
        assert_eq!(gate.name(), "X");
    }

    #[test]
    fn test_controls_and_target() {
        let gate = LocalGate::new("CX", cx_matrix(), &[QubitId::new(1), QubitId::new(0)]).unwrap();
        assert_eq!(gate.controls(), &[QubitId::new(1)]);
        assert_eq!(gate.target(), QubitId::new(0));
        assert_eq!(gate.qubits(), &[QubitId::new(1), QubitId::new(0)]);
        assert_eq!(format!("{:?}", gate), "CX(q1, q0)");
    }

    #[test]
    fn test_wrong_qubit_count() {
        let result = LocalGate::new("CX", cx_matrix(), &[QubitId::new(0)]);
        assert!(matches!(
            result,
            Err(QuantumError::DimensionMismatch {
                expected: 2,
                actual: 4
            })
        ));
    }

    #[test]
    fn test_duplicate_qubits() {
        let result = LocalGate::new("CX", cx_matrix(), &[QubitId::new(0), QubitId::new(0)]);
        assert!(matches!(result, Err(QuantumError::DuplicateQubit(_))));
        assert!(LocalGate::new("X", x_matrix(), &[]).is_err());
    }

    #[test]
    fn test_non_unitary_rejected() {
        let m = Arc::new(Matrix::from_real_rows(&[vec![1.0, 1.0], vec![0.0, 1.0]]).unwrap());
        assert!(LocalGate::new("BAD", m, &[QubitId::new(0)]).is_err());
    }

    #[test]
    fn test_permutation_gate_positions() {
        let matrix = Arc::new(Matrix::identity(8));
        let gate = PermutationGate::new(vec![Swap::new(2, 0)], 3, matrix).unwrap();
        assert_eq!(gate.size(), 3);
        assert_eq!(gate.qubits(), &[QubitId::new(0), QubitId::new(2)]);
        assert_eq!(gate.name(), "SWAP");

        let wrong = PermutationGate::new(vec![Swap::new(0, 1)], 3, Arc::new(Matrix::identity(4)));
        assert!(wrong.is_err());
        let out_of_range = PermutationGate::new(vec![Swap::new(0, 5)], 3, Arc::new(Matrix::identity(8)));
        assert!(out_of_range.is_err());
    }

    #[test]
    fn test_gate_enum_delegates() {
        let gate: Gate = LocalGate::new("X", x_matrix(), &[QubitId::new(0)]).unwrap().into();
        assert_eq!(gate.name(), "X");
        assert_eq!(gate.size(), 1);
        assert_eq!(gate.local_matrix().dim(), 2);
        assert_eq!(gate.to_string(), "Local(X(q0))");
    }
}
