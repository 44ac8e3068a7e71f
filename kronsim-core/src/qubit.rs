//! Qubit addressing

use std::fmt;

/// Logical qubit label
///
/// Labels are stable for the lifetime of a register. Which tensor position a
/// label currently occupies is tracked separately by the register's ordering.
///
/// # Example
/// ```
/// use kronsim_core::QubitId;
///
/// let q0 = QubitId::new(0);
/// let q1 = QubitId::new(1);
/// assert!(q0 < q1);
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct QubitId(usize);

impl QubitId {
    /// Create a new qubit label
    #[inline]
    pub const fn new(id: usize) -> Self {
        Self(id)
    }

    /// Get the underlying index
    #[inline]
    pub const fn index(&self) -> usize {
        self.0
    }

    /// The natural ordering `q0, q1, ..., q(n-1)` of an n-qubit register
    pub fn range(num_qubits: usize) -> Vec<QubitId> {
        (0..num_qubits).map(QubitId::new).collect()
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<usize> for QubitId {
    #[inline]
    fn from(id: usize) -> Self {
        Self::new(id)
    }
}

impl From<QubitId> for usize {
    #[inline]
    fn from(qid: QubitId) -> Self {
        qid.index()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qubit_ordering() {
        let q0 = QubitId::new(0);
        let q2 = QubitId::new(2);
        assert!(q0 < q2);
        assert_eq!(q2.index(), 2);
    }

    #[test]
    fn test_qubit_display() {
        assert_eq!(format!("{}", QubitId::new(5)), "q5");
    }

    #[test]
    fn test_range() {
        let qubits = QubitId::range(3);
        assert_eq!(qubits, vec![QubitId::new(0), QubitId::new(1), QubitId::new(2)]);
        assert!(QubitId::range(0).is_empty());
    }

    #[test]
    fn test_conversions() {
        let q: QubitId = 4.into();
        let i: usize = q.into();
        assert_eq!(i, 4);
    }
}
