//! Full-register operators from local gates
//!
//! A gate's local matrix is lifted to the whole register by a running
//! Kronecker product over tensor positions, least significant first. Positions
//! the gate does not touch contribute a 2×2 identity; the gate's own positions
//! are consumed in one step by its full local matrix. This requires the gate's
//! qubits to sit on consecutive positions in the gate's own order, which the
//! engine arranges with swaps beforehand.

use kronsim_core::{GateShape, LocalGate, Matrix, QuantumError, QubitId, Result};
use tracing::trace;

/// Lift `gate` to a `2^n × 2^n` operator for the given position ordering
///
/// `ordering[p]` is the qubit at tensor position `p`.
///
/// # Errors
/// - [`QuantumError::RegistrySize`] if the gate spans more qubits than `ordering`
/// - [`QuantumError::InvalidQubit`] if a gate qubit is not in `ordering`
/// - [`QuantumError::GateNotAligned`] if the gate qubits are not consecutive,
///   ascending positions in the gate's order
///
/// # Example
/// ```
/// use kronsim_core::QubitId;
/// use kronsim_gates::{expand, standard};
///
/// let h = standard::h(1).unwrap();
/// let operator = expand::expand(&h, &QubitId::range(3)).unwrap();
/// assert_eq!(operator.dim(), 8);
/// ```
pub fn expand(gate: &LocalGate, ordering: &[QubitId]) -> Result<Matrix> {
    let n = ordering.len();
    let k = gate.size();
    if k > n {
        return Err(QuantumError::registry_size(gate.name(), k, n));
    }

    let qubits = gate.qubits();
    if let Some(missing) = qubits.iter().find(|q| !ordering.contains(*q)) {
        return Err(QuantumError::invalid_qubit(missing.index(), n));
    }

    let not_aligned = || QuantumError::GateNotAligned {
        gate: format!("{:?}", gate),
    };

    let identity = Matrix::identity(2);
    let mut operator = Matrix::scalar_one();
    let mut position = 0;
    while position < n {
        let qubit = ordering[position];
        if qubit == qubits[0] {
            let span = ordering.get(position..position + k).ok_or_else(not_aligned)?;
            if span != qubits {
                return Err(not_aligned());
            }
            operator = gate.local_matrix().kron(&operator);
            position += k;
        } else if qubits.contains(&qubit) {
            return Err(not_aligned());
        } else {
            operator = identity.kron(&operator);
            position += 1;
        }
    }

    trace!(gate = gate.name(), num_qubits = n, "expanded gate operator");
    Ok(operator)
}

/// Ordering with the gate's qubits leading, the rest in `ordering`'s order
///
/// This is the placement [`expand`] accepts for every gate.
pub fn leading_ordering(gate: &LocalGate, ordering: &[QubitId]) -> Vec<QubitId> {
    let qubits = gate.qubits();
    let mut desired: Vec<QubitId> = qubits.to_vec();
    desired.extend(ordering.iter().filter(|q| !qubits.contains(q)));
    desired
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrices::{CNOT, HADAMARD, PAULI_X};
    use crate::standard;
    use num_complex::Complex64;

    fn ids(labels: &[usize]) -> Vec<QubitId> {
        labels.iter().copied().map(QubitId::new).collect()
    }

    #[test]
    fn test_single_qubit_on_one_qubit_register() {
        let h = standard::h(0).unwrap();
        let op = expand(&h, &ids(&[0])).unwrap();
        assert_eq!(op, Matrix::from_array(&HADAMARD));
    }

    #[test]
    fn test_single_qubit_positions() {
        let x = Matrix::from_array(&PAULI_X);
        let id = Matrix::identity(2);

        // qubit 0 is least significant: I ⊗ I ⊗ X
        let op = expand(&standard::x(0).unwrap(), &ids(&[0, 1, 2])).unwrap();
        assert_eq!(op, id.kron(&id).kron(&x));

        // qubit 2 is most significant: X ⊗ I ⊗ I
        let op = expand(&standard::x(2).unwrap(), &ids(&[0, 1, 2])).unwrap();
        assert_eq!(op, x.kron(&id).kron(&id));
    }

    #[test]
    fn test_ordering_moves_the_gate() {
        // qubit 2 sits at position 0 in this ordering
        let x = Matrix::from_array(&PAULI_X);
        let id = Matrix::identity(2);
        let op = expand(&standard::x(2).unwrap(), &ids(&[2, 0, 1])).unwrap();
        assert_eq!(op, id.kron(&id).kron(&x));
    }

    #[test]
    fn test_two_qubit_gate_is_one_block() {
        let cx = Matrix::from_array(&CNOT);
        let op = expand(&standard::cx(1, 2).unwrap(), &ids(&[0, 1, 2])).unwrap();
        assert_eq!(op.dim(), 8);
        assert_eq!(op, cx.kron(&Matrix::identity(2)));

        // control q1 set, target q2 clear: |q2 q1 q0⟩ = |010⟩ → |110⟩
        let mut v = vec![Complex64::new(0.0, 0.0); 8];
        v[0b010] = Complex64::new(1.0, 0.0);
        let out = op.mul_vec(&v).unwrap();
        assert_eq!(out[0b110], Complex64::new(1.0, 0.0));
    }

    #[test]
    fn test_registry_too_small() {
        let cx = standard::cx(0, 1).unwrap();
        let err = expand(&cx, &ids(&[0])).unwrap_err();
        assert!(matches!(
            err,
            QuantumError::RegistrySize {
                gate_qubits: 2,
                register_qubits: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_misaligned_gate_rejected() {
        // target before control
        let cx = standard::cx(0, 1).unwrap();
        assert!(matches!(
            expand(&cx, &ids(&[1, 0])),
            Err(QuantumError::GateNotAligned { .. })
        ));

        // not adjacent
        assert!(matches!(
            expand(&cx, &ids(&[0, 2, 1])),
            Err(QuantumError::GateNotAligned { .. })
        ));

        // control placed after target
        let cx = standard::cx(2, 0).unwrap();
        assert!(expand(&cx, &ids(&[0, 1, 2])).is_err());
    }

    #[test]
    fn test_unknown_qubit() {
        let x = standard::x(5).unwrap();
        assert!(matches!(
            expand(&x, &ids(&[0, 1])),
            Err(QuantumError::InvalidQubit(5, 2))
        ));
    }

    #[test]
    fn test_leading_ordering() {
        let cx = standard::cx(3, 1).unwrap();
        assert_eq!(
            leading_ordering(&cx, &ids(&[0, 1, 2, 3])),
            ids(&[3, 1, 0, 2])
        );
    }

    #[test]
    fn test_expanded_operator_is_unitary() {
        let ccx = standard::ccx(0, 1, 2).unwrap();
        let op = expand(&ccx, &ids(&[0, 1, 2, 3])).unwrap();
        assert!(op.is_unitary(1e-12));
    }
}
