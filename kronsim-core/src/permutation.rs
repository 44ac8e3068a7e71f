//! Qubit orderings and swap planning
//!
//! A register keeps an *ordering*: `ordering[p]` is the logical qubit that
//! currently sits at tensor position `p` (bit `p` of a basis index). Bringing
//! a gate's qubits to the leading positions is done with a sequence of
//! pairwise position swaps computed by [`resolve`].

use crate::{QuantumError, QubitId, Result};
use std::fmt;

/// Transposition of two tensor positions
///
/// Swaps are self-inverse; a sequence is applied left to right.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Swap {
    a: usize,
    b: usize,
}

impl Swap {
    /// Swap positions `a` and `b`
    #[inline]
    pub const fn new(a: usize, b: usize) -> Self {
        Self { a, b }
    }

    /// First position, as given
    #[inline]
    pub const fn a(&self) -> usize {
        self.a
    }

    /// Second position, as given
    #[inline]
    pub const fn b(&self) -> usize {
        self.b
    }

    /// `(min, max)` form; `Swap(a, b)` and `Swap(b, a)` are the same operation
    #[inline]
    pub fn canonical(&self) -> (usize, usize) {
        (self.a.min(self.b), self.a.max(self.b))
    }

    /// A swap of a position with itself does nothing
    #[inline]
    pub fn is_trivial(&self) -> bool {
        self.a == self.b
    }

    /// Exchange the two entries of `items`
    #[inline]
    pub fn apply_to<T>(&self, items: &mut [T]) {
        items.swap(self.a, self.b);
    }
}

impl fmt::Display for Swap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.a, self.b)
    }
}

/// Apply `swaps` to `items` in order
pub fn apply_swaps<T>(items: &mut [T], swaps: &[Swap]) {
    for swap in swaps {
        swap.apply_to(items);
    }
}

/// Swap sequence undoing `swaps`: same transpositions, reverse order
pub fn inverse(swaps: &[Swap]) -> Vec<Swap> {
    swaps.iter().rev().copied().collect()
}

/// Plan the swaps turning `current` into `desired`
///
/// Positions are scanned left to right. Wherever the label present differs
/// from the label `desired` requires, the leftmost position holding the
/// required label is swapped in. The scan is repeated until both sequences
/// agree, which yields at most `len - fixed_points` swaps. Only a working copy
/// of `current` is touched.
///
/// # Errors
/// Returns [`QuantumError::PermutationMismatch`] if the inputs are not
/// permutations of the same label set.
///
/// # Example
/// ```
/// use kronsim_core::{permutation, QubitId};
///
/// let current = QubitId::range(3);
/// let desired = [QubitId::new(2), QubitId::new(0), QubitId::new(1)];
/// let swaps = permutation::resolve(&current, &desired).unwrap();
///
/// let mut ordering = current.clone();
/// permutation::apply_swaps(&mut ordering, &swaps);
/// assert_eq!(ordering, desired);
/// ```
pub fn resolve(current: &[QubitId], desired: &[QubitId]) -> Result<Vec<Swap>> {
    if !same_labels(current, desired) {
        return Err(QuantumError::PermutationMismatch {
            current: current.iter().map(QubitId::index).collect(),
            desired: desired.iter().map(QubitId::index).collect(),
        });
    }

    let mut working = current.to_vec();
    let mut swaps = Vec::new();

    while working != desired {
        for index in 0..working.len() {
            let required = desired[index];
            if working[index] == required {
                continue;
            }
            // same label set, so the required label is present
            let Some(found) = working.iter().position(|&q| q == required) else {
                continue;
            };
            let swap = Swap::new(index, found);
            swap.apply_to(&mut working);
            swaps.push(swap);
        }
    }

    Ok(swaps)
}

/// Check that two orderings are permutations of the same distinct labels
pub fn same_labels(a: &[QubitId], b: &[QubitId]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut a = a.to_vec();
    let mut b = b.to_vec();
    a.sort_unstable();
    b.sort_unstable();
    a.windows(2).all(|w| w[0] != w[1]) && a == b
}
