//! Solver configuration.

use crate::error::{Result, StriplineError};

use super::{CONVERGENCE_TOLERANCE, DAMPING_FACTOR, MAX_ITERATIONS};

/// Configuration for the width solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Maximum Newton-Raphson iterations.
    pub max_iterations: usize,
    /// Convergence tolerance, applied to both the residual (Ω) and the step (mm).
    pub tolerance: f64,
    /// Fraction of each Newton step taken, in (0, 1].
    pub damping: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: MAX_ITERATIONS,
            tolerance: CONVERGENCE_TOLERANCE,
            damping: DAMPING_FACTOR,
        }
    }
}

impl SolverConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum Newton-Raphson iterations.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the convergence tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the damping factor.
    ///
    /// Smaller values slow convergence but avoid overshooting into the steep
    /// narrow-trace region.
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Check that the configuration can drive the solver.
    pub fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 {
            return Err(StriplineError::invalid_config("max_iterations must be at least 1"));
        }
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(StriplineError::invalid_config(format!(
                "tolerance must be finite and positive, got {}",
                self.tolerance
            )));
        }
        if !(self.damping > 0.0 && self.damping <= 1.0) {
            return Err(StriplineError::invalid_config(format!(
                "damping must be in (0, 1], got {}",
                self.damping
            )));
        }
        Ok(())
    }
}
