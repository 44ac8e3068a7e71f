//! Named gates
//!
//! Each constructor pairs a fixed matrix from [`crate::matrices`] with the
//! qubits it acts on, controls first and the target last.
//!
//! ```
//! use kronsim_core::{GateShape, QubitId};
//! use kronsim_gates::standard;
//!
//! let cx = standard::cx(1, 0).unwrap();
//! assert_eq!(cx.controls(), &[QubitId::new(1)]);
//! assert_eq!(cx.target(), QubitId::new(0));
//! assert_eq!(cx.size(), 2);
//! ```

use crate::matrices;
use kronsim_core::{LocalGate, Matrix, QubitId, Result};
use num_complex::Complex64;
use std::sync::Arc;

fn gate<const N: usize>(
    name: &str,
    matrix: &[[Complex64; N]; N],
    qubits: &[usize],
) -> Result<LocalGate> {
    let qubits: Vec<QubitId> = qubits.iter().copied().map(QubitId::new).collect();
    LocalGate::new(name, Arc::new(Matrix::from_array(matrix)), &qubits)
}

/// Hadamard
pub fn h(target: usize) -> Result<LocalGate> {
    gate("H", &matrices::HADAMARD, &[target])
}

/// Pauli-X (NOT)
pub fn x(target: usize) -> Result<LocalGate> {
    gate("X", &matrices::PAULI_X, &[target])
}

/// Pauli-Y
pub fn y(target: usize) -> Result<LocalGate> {
    gate("Y", &matrices::PAULI_Y, &[target])
}

/// Pauli-Z
pub fn z(target: usize) -> Result<LocalGate> {
    gate("Z", &matrices::PAULI_Z, &[target])
}

/// Phase gate S
pub fn s(target: usize) -> Result<LocalGate> {
    gate("S", &matrices::S_GATE, &[target])
}

/// π/8 gate T
pub fn t(target: usize) -> Result<LocalGate> {
    gate("T", &matrices::T_GATE, &[target])
}

/// Controlled-X
pub fn cx(control: usize, target: usize) -> Result<LocalGate> {
    gate("CX", &matrices::CNOT, &[control, target])
}

/// Controlled-Z
pub fn cz(control: usize, target: usize) -> Result<LocalGate> {
    gate("CZ", &matrices::CZ, &[control, target])
}

/// Toffoli (doubly controlled X)
pub fn ccx(control0: usize, control1: usize, target: usize) -> Result<LocalGate> {
    gate("CCX", &matrices::TOFFOLI, &[control0, control1, target])
}

/// Gate from a caller-supplied unitary in the local little-endian convention
pub fn custom(name: &str, matrix: Matrix, qubits: &[usize]) -> Result<LocalGate> {
    let qubits: Vec<QubitId> = qubits.iter().copied().map(QubitId::new).collect();
    LocalGate::new(name, Arc::new(matrix), &qubits)
}
