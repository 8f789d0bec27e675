//! Solver output.

use crate::model::ImpedanceResult;

/// Which criterion ended a converged solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvergedBy {
    /// `|Z0 − target|` dropped below the tolerance.
    Residual,
    /// The Newton update moved the width by less than the tolerance.
    Step,
}

/// Indicates whether the solver converged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Converged according to the configured tolerance.
    Converged(ConvergedBy),

    /// Reached the iteration limit; the width is a best-effort estimate.
    MaxIters,

    /// Stopped early due to an observer decision.
    StoppedByObserver,
}

/// The result of a width solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solution {
    /// Final solver status.
    pub status: Status,

    /// Trace width (mm).
    pub width_mm: f64,

    /// Requested impedance (Ω).
    pub target_impedance: f64,

    /// Model output at `width_mm`.
    pub result: ImpedanceResult,

    /// Iterations used.
    pub iterations: usize,
}

impl Solution {
    /// True when the solve met its tolerance.
    pub fn is_converged(&self) -> bool {
        matches!(self.status, Status::Converged(_))
    }

    /// `Z0(width) − target`, NaN when the model is invalid at `width_mm`.
    pub fn residual(&self) -> f64 {
        self.result.characteristic_impedance - self.target_impedance
    }
}
