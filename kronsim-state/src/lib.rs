//! Quantum registers for kronsim
//!
//! Two dense representations share the [`Register`] trait:
//!
//! - [`StateVectorRegister`]: `2^n` amplitudes, gates act as `ψ → Uψ`
//! - [`DensityMatrixRegister`]: `2^n × 2^n` matrix, gates act as `ρ → UρU†`
//!
//! Registers are built through [`RegisterBuilder`], which enforces the
//! construction rules (unit norm, matching length, a single initial state).
//! [`measure`] performs a projective single-qubit measurement on either.
//!
//! # Example
//!
//! ```
//! use kronsim_core::QubitId;
//! use kronsim_state::{measure, Register, StateVectorRegister};
//!
//! let mut register = StateVectorRegister::from_basis_state(2, 0b01).unwrap();
//! let result = measure(&mut register, QubitId::new(0), &mut || 0.5).unwrap();
//! assert_eq!(result.outcome, 1);
//! assert_eq!(register.probabilities()[1], 1.0);
//! ```

pub mod builder;
pub mod density_matrix;
pub mod display;
pub mod measurement;
pub mod register;
pub mod state_vector;

pub use builder::RegisterBuilder;
pub use density_matrix::DensityMatrixRegister;
pub use measurement::{measure, probability_of_one, MeasurementResult};
pub use register::Register;
pub use state_vector::StateVectorRegister;
