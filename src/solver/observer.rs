//! Observers receive solver events and may steer the solve.

use super::{Action, Event};

/// Receives solver events and optionally returns a control action.
pub trait Observer {
    /// Handle one event.
    fn observe(&mut self, event: &Event) -> Option<Action>;
}

impl Observer for () {
    fn observe(&mut self, _event: &Event) -> Option<Action> {
        None
    }
}

impl<F> Observer for F
where
    F: FnMut(&Event) -> Option<Action>,
{
    fn observe(&mut self, event: &Event) -> Option<Action> {
        self(event)
    }
}

/// Forwards every event to `tracing`.
///
/// Evaluations and Newton steps are logged at `trace`, fallbacks at `debug`
/// and an exhausted budget at `warn`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn observe(&mut self, event: &Event) -> Option<Action> {
        match *event {
            Event::Evaluated {
                iteration,
                width_mm,
                impedance,
                residual,
            } => {
                tracing::trace!(iteration, width_mm, impedance, residual, "evaluated");
            }
            Event::NewtonStep {
                iteration,
                width_mm,
                derivative,
                next_width_mm,
            } => {
                tracing::trace!(iteration, width_mm, derivative, next_width_mm, "newton step");
            }
            Event::Fallback {
                iteration,
                width_mm,
                reason,
                next_width_mm,
            } => {
                tracing::debug!(iteration, width_mm, ?reason, next_width_mm, "fallback step");
            }
            Event::MaxIterations {
                iterations,
                width_mm,
            } => {
                tracing::warn!(iterations, width_mm, "iteration budget exhausted");
            }
        }
        None
    }
}
