//! Gate application and circuit execution for kronsim
//!
//! The [`Engine`] applies a gate to any [`Register`](kronsim_state::Register)
//! by permuting the gate's qubits onto the leading tensor positions,
//! applying the expanded gate operator and permuting back. [`Circuit`]
//! sequences gates, and [`Simulator`] bundles an engine with a
//! [`SimulatorConfig`] and a seeded random source for measurement.
//!
//! # Example
//!
//! ```
//! use kronsim_sim::{Circuit, Engine};
//! use kronsim_state::StateVectorRegister;
//!
//! let mut circuit = Circuit::new(3);
//! circuit.h(2).unwrap().cx(2, 0).unwrap();
//!
//! let mut register = StateVectorRegister::new(3).unwrap();
//! circuit.run(&Engine::new(), &mut register).unwrap();
//!
//! let p = register.probability_table(false);
//! assert!(p.contains("|000>     0.50"));
//! assert!(p.contains("|101>     0.50"));
//! ```

pub mod circuit;
pub mod config;
pub mod engine;
pub mod simulator;

pub use circuit::{Circuit, LoweredStep};
pub use config::{Representation, SimulatorConfig};
pub use engine::Engine;
pub use simulator::{AnyRegister, Simulator};
