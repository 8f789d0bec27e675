//! # Stripline Core
//!
//! Characteristic impedance of a symmetric stripline, and the trace width
//! needed to reach a target impedance.
//!
//! This library provides:
//! - A closed-form impedance model with thickness and dispersion corrections
//! - A damped Newton-Raphson width solver with observable iteration events
//! - Checked forward/inverse workflows for hosts (CLI, WASM)
//!
//! ## Architecture
//!
//! - [`model`] - Effective width, effective permittivity and Z0
//! - [`solver`] - Width solver, configuration and observers
//! - [`calculator`] - Validated workflows returning [`Calculation`]
//! - [`error`] - Error type for the checked workflows
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! stripline --height-mm 1.6 --eps-r 4.4 impedance 0.7
//! stripline --height-mm 1.6 --eps-r 4.4 width 50
//! ```
//!
//! ### Library
//!
//! ```
//! use stripline_core::{calculate_width, PhysicalParameters};
//!
//! let params = PhysicalParameters::from_board_units(1.6, 4.4, 35.0, 1.0);
//! let calc = calculate_width(50.0, &params).unwrap();
//! assert!((calc.characteristic_impedance - 50.0).abs() < 1e-6);
//! ```
//!
//! ## Failure Signaling
//!
//! [`model::compute_impedance`] and [`solver::find_width_for_impedance`]
//! never fail: invalid results are NaN and a non-converged solve returns its
//! last estimate. The [`calculator`] functions check both and return a
//! [`StriplineError`] instead.

pub mod calculator;
pub mod error;
pub mod model;
pub mod solver;

// Re-export main types for convenience
pub use calculator::{calculate_impedance, calculate_width, Calculation};
pub use error::{Result, StriplineError};
pub use model::{compute_impedance, ImpedanceResult, PhysicalParameters};
pub use solver::{find_width_for_impedance, SolverConfig, WidthSolver};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmStripline;
