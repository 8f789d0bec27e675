//! Trace width solver.
//!
//! Inverts [`compute_impedance`](crate::model::compute_impedance) over the
//! trace width with a damped Newton-Raphson iteration:
//!
//! ```text
//! W_{k+1} = W_k − damping · (Z0(W_k) − Z_target) / Z0'(W_k)
//! ```
//!
//! `Z0'` is a central difference. Where the model cannot be evaluated, or the
//! derivative is unusable, the solver takes a fixed multiplicative step in
//! the direction implied by the sign of the residual. Impedance falls as the
//! trace widens, so a positive residual always widens the trace.
//!
//! ## Observer Events
//!
//! Every solver decision is reported as an [`Event`] to an [`Observer`].
//! Observers can return [`Action::StopEarly`] to halt with the current
//! estimate. `()` is the no-op observer, closures work directly, and
//! [`TracingObserver`] forwards events to `tracing`.

mod config;
mod event;
mod newton;
mod observer;
mod solution;

pub use config::SolverConfig;
pub use event::{Action, Event, FallbackReason};
pub use newton::{find_width_for_impedance, initial_guess, WidthSolver};
pub use observer::{Observer, TracingObserver};
pub use solution::{ConvergedBy, Solution, Status};

/// Default convergence tolerance (Ω for the residual, mm for the step).
pub const CONVERGENCE_TOLERANCE: f64 = 1e-8;

/// Default maximum solver iterations.
pub const MAX_ITERATIONS: usize = 200;

/// Default fraction of the Newton step actually taken.
pub const DAMPING_FACTOR: f64 = 0.5;

/// Lower clamp for the width evaluated at the start of an iteration (mm).
pub const MIN_GUESS_WIDTH_MM: f64 = 0.01;

/// Lower clamp for a Newton update (mm).
pub const MIN_STEP_WIDTH_MM: f64 = 0.001;

/// Upper clamp for any width (mm).
pub const MAX_WIDTH_MM: f64 = 50.0;

/// Below this magnitude the derivative is treated as flat (Ω/mm).
pub const MIN_DERIVATIVE: f64 = 1e-15;
