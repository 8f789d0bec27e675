//! Error types for the stripline calculator.
//!
//! The numeric model itself never fails: it reports invalid results through
//! NaN sentinels (see [`crate::model::ImpedanceResult`]). [`StriplineError`]
//! is what the checked workflows in [`crate::calculator`], the CLI and the
//! WASM bindings turn those sentinels into.

use thiserror::Error;

/// Result type alias using [`StriplineError`].
pub type Result<T> = std::result::Result<T, StriplineError>;

/// Unified error type for all stripline calculations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StriplineError {
    // ============ Input Errors ============
    /// A physical parameter or requested value is outside its domain
    #[error("Invalid parameter '{param}' (value: {value}): {message}")]
    InvalidParameter {
        param: String,
        value: f64,
        message: String,
    },

    /// Solver configuration is unusable
    #[error("Invalid solver configuration: {message}")]
    InvalidConfig { message: String },

    // ============ Calculation Errors ============
    /// The impedance model produced an invalid result
    #[error("Impedance model produced an invalid result for W = {width_mm} mm")]
    InvalidResult { width_mm: f64 },

    /// The width solver did not reach the target impedance
    #[error("Width solver did not converge after {iterations} iterations (residual: {residual:.2e} Ω)")]
    ConvergenceFailure { iterations: usize, residual: f64 },
}

impl StriplineError {
    /// Create an invalid parameter error
    pub fn invalid_parameter(param: impl Into<String>, value: f64, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            param: param.into(),
            value,
            message: message.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a convergence failure error
    pub fn convergence_failure(iterations: usize, residual: f64) -> Self {
        Self::ConvergenceFailure {
            iterations,
            residual,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offending_value() {
        let err = StriplineError::invalid_parameter("relative_permittivity", 0.5, "must be >= 1");
        assert_eq!(
            err.to_string(),
            "Invalid parameter 'relative_permittivity' (value: 0.5): must be >= 1"
        );

        let err = StriplineError::convergence_failure(200, 5.25);
        assert_eq!(
            err.to_string(),
            "Width solver did not converge after 200 iterations (residual: 5.25e0 Ω)"
        );
    }
}
