//! Damped Newton-Raphson iteration for the trace width.

use crate::model::{compute_impedance, PhysicalParameters};

use super::{
    Action, ConvergedBy, Event, FallbackReason, Observer, Solution, SolverConfig, Status,
    MAX_WIDTH_MM, MIN_DERIVATIVE, MIN_GUESS_WIDTH_MM, MIN_STEP_WIDTH_MM,
};

/// Starting width (mm) for a target impedance on a substrate of height `height_mm`.
///
/// High impedances start narrow, low impedances start wide.
pub fn initial_guess(target_impedance: f64, height_mm: f64) -> f64 {
    let ratio = if target_impedance > 80.0 {
        0.3
    } else if target_impedance > 60.0 {
        0.6
    } else if target_impedance > 40.0 {
        1.0
    } else {
        2.0
    };
    height_mm * ratio
}

/// Width (mm) giving `target_impedance` with the default configuration.
///
/// Best effort: a solve that runs out of iterations still returns its last
/// estimate. Use [`WidthSolver::solve`] to inspect the [`Status`].
pub fn find_width_for_impedance(target_impedance: f64, params: &PhysicalParameters) -> f64 {
    WidthSolver::default().solve(target_impedance, params).width_mm
}

/// Newton-Raphson solver for the trace width.
#[derive(Debug, Clone, Default)]
pub struct WidthSolver {
    config: SolverConfig,
}

impl WidthSolver {
    /// Create a solver with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a solver with the given configuration.
    pub fn with_config(config: SolverConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solve for the width without observer support.
    pub fn solve(&self, target_impedance: f64, params: &PhysicalParameters) -> Solution {
        self.solve_observed(target_impedance, params, ())
    }

    /// Solve for the width, reporting every decision to `observer`.
    pub fn solve_observed<Obs: Observer>(
        &self,
        target_impedance: f64,
        params: &PhysicalParameters,
        observer: Obs,
    ) -> Solution {
        let _span = tracing::debug_span!("width_solve", target_impedance).entered();

        let start = initial_guess(target_impedance, params.substrate_height_mm());
        let (width_mm, status, iterations) = self.iterate(
            target_impedance,
            start,
            |w| compute_impedance(w, params).characteristic_impedance,
            observer,
        );

        match status {
            Status::Converged(by) => tracing::info!(width_mm, iterations, ?by, "width solver converged"),
            Status::MaxIters => tracing::warn!(width_mm, iterations, "width solver failed to converge"),
            Status::StoppedByObserver => tracing::debug!(width_mm, iterations, "width solver stopped early"),
        }

        Solution {
            status,
            width_mm,
            target_impedance,
            result: compute_impedance(width_mm, params),
            iterations,
        }
    }

    /// Run the iteration against an impedance oracle `z0(width_mm)`.
    ///
    /// Returns the final width, status and iteration count.
    fn iterate<Z, Obs>(
        &self,
        target: f64,
        start: f64,
        mut z0: Z,
        mut observer: Obs,
    ) -> (f64, Status, usize)
    where
        Z: FnMut(f64) -> f64,
        Obs: Observer,
    {
        let SolverConfig {
            max_iterations,
            tolerance,
            damping,
        } = self.config;

        let mut guess = start;

        for iter in 0..max_iterations {
            guess = guess.clamp(MIN_GUESS_WIDTH_MM, MAX_WIDTH_MM);

            let z = z0(guess);
            if !z.is_finite() {
                let next = guess * FallbackReason::InvalidImpedance.factor(f64::NAN);
                let event = Event::Fallback {
                    iteration: iter,
                    width_mm: guess,
                    reason: FallbackReason::InvalidImpedance,
                    next_width_mm: next,
                };
                if let Some(Action::StopEarly) = observer.observe(&event) {
                    return (guess, Status::StoppedByObserver, iter + 1);
                }
                guess = next;
                continue;
            }

            let residual = z - target;
            let event = Event::Evaluated {
                iteration: iter,
                width_mm: guess,
                impedance: z,
                residual,
            };
            if let Some(Action::StopEarly) = observer.observe(&event) {
                return (guess, Status::StoppedByObserver, iter + 1);
            }

            if residual.abs() < tolerance {
                return (guess, Status::Converged(ConvergedBy::Residual), iter + 1);
            }

            // Central difference, keeping the minus probe positive
            let dw = (guess * 1e-6).max(1e-8);
            let w_plus = guess + dw;
            let w_minus = if guess - dw <= 0.0 { guess * 0.1 } else { guess - dw };
            let z_plus = z0(w_plus);
            let z_minus = z0(w_minus);

            let reason = if !z_plus.is_finite() || !z_minus.is_finite() {
                FallbackReason::InvalidDerivative
            } else {
                let derivative = (z_plus - z_minus) / (w_plus - w_minus);
                if derivative.abs() < MIN_DERIVATIVE {
                    FallbackReason::FlatDerivative
                } else {
                    let next = (guess - damping * residual / derivative)
                        .clamp(MIN_STEP_WIDTH_MM, MAX_WIDTH_MM);
                    let event = Event::NewtonStep {
                        iteration: iter,
                        width_mm: guess,
                        derivative,
                        next_width_mm: next,
                    };
                    if let Some(Action::StopEarly) = observer.observe(&event) {
                        return (guess, Status::StoppedByObserver, iter + 1);
                    }

                    if (next - guess).abs() < tolerance {
                        return (next, Status::Converged(ConvergedBy::Step), iter + 1);
                    }
                    guess = next;
                    continue;
                }
            };

            let next = guess * reason.factor(residual);
            let event = Event::Fallback {
                iteration: iter,
                width_mm: guess,
                reason,
                next_width_mm: next,
            };
            if let Some(Action::StopEarly) = observer.observe(&event) {
                return (guess, Status::StoppedByObserver, iter + 1);
            }
            guess = next;
        }

        observer.observe(&Event::MaxIterations {
            iterations: max_iterations,
            width_mm: guess,
        });
        (guess, Status::MaxIters, max_iterations)
    }
}
