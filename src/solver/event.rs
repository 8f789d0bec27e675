//! Events and actions exchanged between the solver and its observer.

/// Why the solver replaced a Newton step with a fixed multiplicative step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// The model was invalid at the current width; the width shrinks by 20%.
    InvalidImpedance,
    /// A derivative probe was invalid; the width moves by 10%.
    InvalidDerivative,
    /// The derivative magnitude was below the flat threshold; the width moves by 5%.
    FlatDerivative,
}

impl FallbackReason {
    /// Multiplier applied to the width for a residual of the given sign.
    pub fn factor(self, residual: f64) -> f64 {
        let step = match self {
            Self::InvalidImpedance => return 0.8,
            Self::InvalidDerivative => 0.1,
            Self::FlatDerivative => 0.05,
        };
        // Z0 above target means the trace must widen
        if residual > 0.0 {
            1.0 + step
        } else {
            1.0 - step
        }
    }
}

/// Events emitted by the width solver, one or two per iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// The model was evaluated at the current width.
    Evaluated {
        iteration: usize,
        width_mm: f64,
        impedance: f64,
        residual: f64,
    },

    /// A Newton step was taken.
    NewtonStep {
        iteration: usize,
        width_mm: f64,
        derivative: f64,
        next_width_mm: f64,
    },

    /// A fallback step was taken instead of a Newton step.
    Fallback {
        iteration: usize,
        width_mm: f64,
        reason: FallbackReason,
        next_width_mm: f64,
    },

    /// The iteration budget ran out.
    MaxIterations { iterations: usize, width_mm: f64 },
}

impl Event {
    /// Width the event refers to (mm).
    pub fn width_mm(&self) -> f64 {
        match self {
            Self::Evaluated { width_mm, .. }
            | Self::NewtonStep { width_mm, .. }
            | Self::Fallback { width_mm, .. }
            | Self::MaxIterations { width_mm, .. } => *width_mm,
        }
    }
}

/// Actions an observer can take during a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop the solver and return the current estimate.
    StopEarly,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_direction_follows_residual_sign() {
        assert_eq!(FallbackReason::InvalidDerivative.factor(2.0), 1.1);
        assert_eq!(FallbackReason::InvalidDerivative.factor(-2.0), 0.9);
        assert_eq!(FallbackReason::FlatDerivative.factor(1e-3), 1.05);
        assert_eq!(FallbackReason::FlatDerivative.factor(0.0), 0.95);
        assert_eq!(FallbackReason::InvalidImpedance.factor(5.0), 0.8);
        assert_eq!(FallbackReason::InvalidImpedance.factor(-5.0), 0.8);
    }
}
