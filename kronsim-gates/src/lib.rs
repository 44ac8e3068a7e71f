//! Gate catalog and operator construction for kronsim
//!
//! - [`matrices`]: fixed local matrices
//! - [`standard`]: named gate constructors (`h`, `x`, `cx`, ...)
//! - [`swap`]: swap operators and the [`SwapCache`]
//! - [`expand`]: lifting a local gate to a full-register operator
//!
//! # Example
//!
//! ```
//! use kronsim_core::{QubitId, Swap};
//! use kronsim_gates::{expand, standard, SwapCache};
//!
//! let cache = SwapCache::new();
//! let block = cache.build_block(&[Swap::new(0, 1)], 2).unwrap();
//! assert_eq!(block.dim(), 4);
//!
//! let cx = standard::cx(0, 1).unwrap();
//! let op = expand::expand(&cx, &QubitId::range(2)).unwrap();
//! assert!(op.is_unitary(1e-12));
//! ```

pub mod expand;
pub mod matrices;
pub mod standard;
pub mod swap;

pub use expand::{expand, leading_ordering};
pub use swap::{swap_matrix, SwapCache};
