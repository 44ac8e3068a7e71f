//! Core types for the kronsim quantum register simulator
//!
//! This crate provides the value types the rest of the workspace builds on:
//! - [`QubitId`]: logical qubit labels
//! - [`Matrix`]: dense complex operators with Kronecker products
//! - [`permutation`]: position swaps and the swap planner
//! - [`Gate`]: local and permutation gates behind [`GateShape`]
//! - [`BlochAngles`]: single-qubit Bloch sphere projection
//!
//! # Example
//! ```
//! use kronsim_core::{permutation, QubitId};
//!
//! let current = QubitId::range(2);
//! let desired = [QubitId::new(1), QubitId::new(0)];
//! let swaps = permutation::resolve(&current, &desired).unwrap();
//! assert_eq!(swaps.len(), 1);
//! ```

pub mod bloch_sphere;
pub mod error;
pub mod gate;
pub mod matrix;
pub mod permutation;
pub mod qubit;

pub use bloch_sphere::{BlochAngles, BlochVector};
pub use error::{ErrorKind, QuantumError};
pub use gate::{Gate, GateShape, LocalGate, PermutationGate};
pub use matrix::Matrix;
pub use num_complex::Complex64;
pub use permutation::Swap;
pub use qubit::QubitId;

/// Type alias for results in kronsim
pub type Result<T> = std::result::Result<T, QuantumError>;

/// Largest register the dense representations accept
pub const MAX_QUBITS: usize = 24;
