//! Swap operators and their cache
//!
//! A swap of positions `(a, b)` in an n-qubit register is the `2^n × 2^n`
//! permutation matrix exchanging every basis index that has bit `a` set and
//! bit `b` clear with its partner (both bits flipped). Everything else stays
//! on the diagonal.
//!
//! Building these is `O(2^n)` per swap and `O(4^n)` per block product, so
//! results are kept in a [`SwapCache`]. The cache is an explicit object owned
//! by whoever applies gates; entries are created once and never evicted or
//! mutated, so a shared `Arc<SwapCache>` is safe to use from several threads.

use kronsim_core::permutation::Swap;
use kronsim_core::{Matrix, PermutationGate, QuantumError, Result};
use num_complex::Complex64;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::trace;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);

/// Cache key for a single swap: canonical positions and register size
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub struct SwapKey {
    pub low: usize,
    pub high: usize,
    pub num_qubits: usize,
}

impl SwapKey {
    pub fn new(swap: Swap, num_qubits: usize) -> Self {
        let (low, high) = swap.canonical();
        Self {
            low,
            high,
            num_qubits,
        }
    }
}

/// Cache key for an ordered swap sequence
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub struct BlockKey {
    pub swaps: Vec<(usize, usize)>,
    pub num_qubits: usize,
}

impl BlockKey {
    pub fn new(swaps: &[Swap], num_qubits: usize) -> Self {
        Self {
            swaps: swaps.iter().map(Swap::canonical).collect(),
            num_qubits,
        }
    }
}

/// Build the permutation matrix swapping positions `a` and `b`
///
/// # Errors
/// Returns [`QuantumError::InvalidQubit`] if a position is `>= num_qubits`.
pub fn swap_matrix(a: usize, b: usize, num_qubits: usize) -> Result<Matrix> {
    for p in [a, b] {
        if p >= num_qubits {
            return Err(QuantumError::invalid_qubit(p, num_qubits));
        }
    }

    let dim = 1usize << num_qubits;
    let mut matrix = Matrix::identity(dim);
    if a == b {
        return Ok(matrix);
    }

    let mask_a = 1usize << a;
    let mask_b = 1usize << b;
    for index in 0..dim {
        if index & mask_a != 0 && index & mask_b == 0 {
            let partner = index ^ mask_a ^ mask_b;
            matrix.set(index, index, ZERO);
            matrix.set(partner, partner, ZERO);
            matrix.set(index, partner, ONE);
            matrix.set(partner, index, ONE);
        }
    }

    Ok(matrix)
}

/// Append-only store of swap operators
#[derive(Default)]
pub struct SwapCache {
    swaps: RwLock<HashMap<SwapKey, Arc<Matrix>>>,
    blocks: RwLock<HashMap<BlockKey, Arc<Matrix>>>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl SwapCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Operator for one swap, built on first use
    pub fn build(&self, swap: Swap, num_qubits: usize) -> Result<Arc<Matrix>> {
        let key = SwapKey::new(swap, num_qubits);
        if let Some(matrix) = self.swaps.read().get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            trace!(low = key.low, high = key.high, num_qubits, "swap cache hit");
            return Ok(Arc::clone(matrix));
        }

        let matrix = Arc::new(swap_matrix(key.low, key.high, num_qubits)?);
        self.misses.fetch_add(1, Ordering::Relaxed);
        trace!(low = key.low, high = key.high, num_qubits, "swap cache miss");

        // another writer may have raced us; keep the first entry
        let mut swaps = self.swaps.write();
        Ok(Arc::clone(swaps.entry(key).or_insert(matrix)))
    }

    /// Operator for a swap sequence: `swap_k @ ... @ swap_1`
    ///
    /// The first swap in `swaps` acts first. An empty sequence is the
    /// identity.
    pub fn build_block(&self, swaps: &[Swap], num_qubits: usize) -> Result<Arc<Matrix>> {
        let key = BlockKey::new(swaps, num_qubits);
        if let Some(matrix) = self.blocks.read().get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            trace!(swaps = swaps.len(), num_qubits, "swap block cache hit");
            return Ok(Arc::clone(matrix));
        }

        let mut block = Matrix::identity(1usize << num_qubits);
        for &swap in swaps {
            let operator = self.build(swap, num_qubits)?;
            block = operator.matmul(&block)?;
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        trace!(swaps = swaps.len(), num_qubits, "swap block cache miss");

        let mut blocks = self.blocks.write();
        Ok(Arc::clone(blocks.entry(key).or_insert_with(|| Arc::new(block))))
    }

    /// Wrap a single swap as a gate
    pub fn swap_gate(&self, swap: Swap, num_qubits: usize) -> Result<PermutationGate> {
        let matrix = self.build(swap, num_qubits)?;
        PermutationGate::new(vec![swap], num_qubits, matrix)
    }

    /// Wrap a swap sequence as one gate
    pub fn permutation_gate(&self, swaps: &[Swap], num_qubits: usize) -> Result<PermutationGate> {
        let matrix = self.build_block(swaps, num_qubits)?;
        PermutationGate::new(swaps.to_vec(), num_qubits, matrix)
    }

    /// Number of cached single-swap and block operators
    pub fn len(&self) -> usize {
        self.swaps.read().len() + self.blocks.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> usize {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits();
        let total = hits + self.misses();
        if total > 0 {
            hits as f64 / total as f64
        } else {
            0.0
        }
    }
}

impl std::fmt::Debug for SwapCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwapCache")
            .field("swaps", &self.swaps.read().len())
            .field("blocks", &self.blocks.read().len())
            .field("hits", &self.hits())
            .field("misses", &self.misses())
            .finish()
    }
}
