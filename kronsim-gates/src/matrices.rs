//! Fixed gate matrices
//!
//! Multi-qubit matrices use the local little-endian convention of
//! [`kronsim_core::gate`]: bit `j` of a local index belongs to the `j`-th
//! qubit of the gate (controls first, target last).

use num_complex::Complex64;

// Compile-time constant helpers
const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);
const NEG_I: Complex64 = Complex64::new(0.0, -1.0);
const NEG_ONE: Complex64 = Complex64::new(-1.0, 0.0);

const INV_SQRT2: f64 = std::f64::consts::FRAC_1_SQRT_2;

/// Hadamard gate matrix
/// H = 1/√2 * [[1,  1],
///             [1, -1]]
pub const HADAMARD: [[Complex64; 2]; 2] = [
    [
        Complex64::new(INV_SQRT2, 0.0),
        Complex64::new(INV_SQRT2, 0.0),
    ],
    [
        Complex64::new(INV_SQRT2, 0.0),
        Complex64::new(-INV_SQRT2, 0.0),
    ],
];

/// Pauli-X gate matrix (NOT gate)
pub const PAULI_X: [[Complex64; 2]; 2] = [[ZERO, ONE], [ONE, ZERO]];

/// Pauli-Y gate matrix
pub const PAULI_Y: [[Complex64; 2]; 2] = [[ZERO, NEG_I], [I, ZERO]];

/// Pauli-Z gate matrix
pub const PAULI_Z: [[Complex64; 2]; 2] = [[ONE, ZERO], [ZERO, NEG_ONE]];

/// Phase gate S = diag(1, i)
pub const S_GATE: [[Complex64; 2]; 2] = [[ONE, ZERO], [ZERO, I]];

/// T gate = diag(1, e^(iπ/4))
pub const T_GATE: [[Complex64; 2]; 2] = [
    [ONE, ZERO],
    [ZERO, Complex64::new(INV_SQRT2, INV_SQRT2)],
];

/// Controlled-X, control on local bit 0, target on local bit 1
///
/// Swaps |01⟩ and |11⟩ (written |b1 b0⟩).
pub const CNOT: [[Complex64; 4]; 4] = [
    [ONE, ZERO, ZERO, ZERO],
    [ZERO, ZERO, ZERO, ONE],
    [ZERO, ZERO, ONE, ZERO],
    [ZERO, ONE, ZERO, ZERO],
];

/// Controlled-Z, symmetric in its two qubits
pub const CZ: [[Complex64; 4]; 4] = [
    [ONE, ZERO, ZERO, ZERO],
    [ZERO, ONE, ZERO, ZERO],
    [ZERO, ZERO, ONE, ZERO],
    [ZERO, ZERO, ZERO, NEG_ONE],
];

/// Toffoli, controls on local bits 0 and 1, target on local bit 2
///
/// Swaps |011⟩ and |111⟩.
pub const TOFFOLI: [[Complex64; 8]; 8] = toffoli();

const fn toffoli() -> [[Complex64; 8]; 8] {
    let mut m = [[ZERO; 8]; 8];
    let mut i = 0;
    while i < 8 {
        m[i][i] = ONE;
        i += 1;
    }
    m[3][3] = ZERO;
    m[7][7] = ZERO;
    m[3][7] = ONE;
    m[7][3] = ONE;
    m
}
