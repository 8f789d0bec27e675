//! Checked calculation workflows.
//!
//! The model and solver report failure through NaN sentinels and a
//! [`Status`]. These wrappers validate inputs up front, run the calculation,
//! and turn every failure into a [`StriplineError`], so a successful
//! [`Calculation`] is always fully usable.

use std::fmt;

use crate::error::{Result, StriplineError};
use crate::model::{compute_impedance, PhysicalParameters};
use crate::solver::{Observer, SolverConfig, Status, TracingObserver, WidthSolver};

/// Largest `|Z0 − target|` (Ω) accepted from the width solver.
pub const ACCEPTANCE_TOLERANCE: f64 = 1e-4;

/// Which quantity the user supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Width given, impedance computed.
    ImpedanceFromWidth,
    /// Target impedance given, width solved.
    WidthFromImpedance { iterations: usize },
}

/// A validated result with every quantity finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calculation {
    pub mode: Mode,
    /// Trace width (mm).
    pub width_mm: f64,
    /// Characteristic impedance (Ω).
    pub characteristic_impedance: f64,
    /// Effective dielectric constant.
    pub effective_permittivity: f64,
    /// Effective trace width (mm).
    pub effective_width_mm: f64,
}

impl fmt::Display for Calculation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Solved widths get one more digit than entered ones
        let width_digits = match self.mode {
            Mode::ImpedanceFromWidth => 3,
            Mode::WidthFromImpedance { .. } => 4,
        };
        writeln!(f, "Stripline Calculation Results:")?;
        writeln!(f, "Characteristic Impedance: {:.2} Ω", self.characteristic_impedance)?;
        writeln!(f, "Required Width: {:.*} mm", width_digits, self.width_mm)?;
        writeln!(f, "Effective Dielectric Constant: {:.3}", self.effective_permittivity)?;
        write!(f, "Effective Width: {:.4} mm", self.effective_width_mm)
    }
}

/// Impedance of a trace `width_mm` millimeters wide.
pub fn calculate_impedance(width_mm: f64, params: &PhysicalParameters) -> Result<Calculation> {
    if !width_mm.is_finite() || width_mm <= 0.0 {
        return Err(StriplineError::invalid_parameter("width_mm", width_mm, "must be a positive number"));
    }
    params.validate()?;

    evaluate(width_mm, params, Mode::ImpedanceFromWidth)
}

/// Width giving `target_impedance` ohms, with the default solver configuration.
pub fn calculate_width(target_impedance: f64, params: &PhysicalParameters) -> Result<Calculation> {
    calculate_width_with(target_impedance, params, &SolverConfig::default())
}

/// Width giving `target_impedance` ohms.
///
/// Fails with [`StriplineError::ConvergenceFailure`] if the solver ran out of
/// iterations or its width misses the target by more than
/// [`ACCEPTANCE_TOLERANCE`].
pub fn calculate_width_with(
    target_impedance: f64,
    params: &PhysicalParameters,
    config: &SolverConfig,
) -> Result<Calculation> {
    calculate_width_observed(target_impedance, params, config, TracingObserver)
}

/// [`calculate_width_with`] reporting solver events to `observer`.
pub fn calculate_width_observed<Obs: Observer>(
    target_impedance: f64,
    params: &PhysicalParameters,
    config: &SolverConfig,
    observer: Obs,
) -> Result<Calculation> {
    if !target_impedance.is_finite() || target_impedance <= 0.0 {
        return Err(StriplineError::invalid_parameter(
            "target_impedance",
            target_impedance,
            "must be a positive number",
        ));
    }
    params.validate()?;
    config.validate()?;

    let solution = WidthSolver::with_config(*config).solve_observed(target_impedance, params, observer);

    let width_mm = solution.width_mm;
    if !width_mm.is_finite() || width_mm <= 0.0 {
        return Err(StriplineError::InvalidResult { width_mm });
    }

    let residual = solution.residual();
    let accepted = residual.is_finite() && residual.abs() <= ACCEPTANCE_TOLERANCE;
    if solution.status == Status::MaxIters || !accepted {
        return Err(StriplineError::convergence_failure(solution.iterations, residual));
    }

    evaluate(
        width_mm,
        params,
        Mode::WidthFromImpedance {
            iterations: solution.iterations,
        },
    )
}

fn evaluate(width_mm: f64, params: &PhysicalParameters, mode: Mode) -> Result<Calculation> {
    let result = compute_impedance(width_mm, params);
    if !result.is_valid() {
        return Err(StriplineError::InvalidResult { width_mm });
    }

    Ok(Calculation {
        mode,
        width_mm,
        characteristic_impedance: result.characteristic_impedance,
        effective_permittivity: result.effective_permittivity,
        effective_width_mm: result.effective_width_mm(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{Action, Event};
    use approx::assert_abs_diff_eq;

    fn fr4() -> PhysicalParameters {
        PhysicalParameters::from_board_units(1.6, 4.4, 35.0, 1.0)
    }

    #[test]
    fn test_forward_report() {
        let calc = calculate_impedance(3.0, &fr4()).unwrap();
        assert_eq!(calc.mode, Mode::ImpedanceFromWidth);
        assert_eq!(
            calc.to_string(),
            "Stripline Calculation Results:\n\
             Characteristic Impedance: 19.47 Ω\n\
             Required Width: 3.000 mm\n\
             Effective Dielectric Constant: 4.209\n\
             Effective Width: 3.0692 mm"
        );
    }

    #[test]
    fn test_inverse_report_uses_four_digits() {
        let calc = calculate_width(50.0, &fr4()).unwrap();
        assert!(matches!(calc.mode, Mode::WidthFromImpedance { .. }));
        assert_abs_diff_eq!(calc.characteristic_impedance, 50.0, epsilon = 1e-6);
        assert!(calc.to_string().contains("Required Width: 0.6953 mm"));
        assert!(calc.to_string().contains("Characteristic Impedance: 50.00 Ω"));
    }

    #[test]
    fn test_rejects_bad_width() {
        for w in [0.0, -2.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                calculate_impedance(w, &fr4()),
                Err(StriplineError::InvalidParameter { .. })
            ));
        }
    }

    #[test]
    fn test_rejects_bad_target_and_params() {
        assert!(matches!(
            calculate_width(0.0, &fr4()),
            Err(StriplineError::InvalidParameter { .. })
        ));

        let bad = PhysicalParameters {
            substrate_height: -1.0,
            ..fr4()
        };
        match calculate_width(50.0, &bad) {
            Err(StriplineError::InvalidParameter { param, .. }) => assert_eq!(param, "substrate_height"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_rejects_bad_config() {
        let config = SolverConfig::new().with_damping(2.0);
        assert!(matches!(
            calculate_width_with(50.0, &fr4(), &config),
            Err(StriplineError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_unreachable_target_is_reported() {
        match calculate_width(120.0, &fr4()) {
            Err(StriplineError::ConvergenceFailure { iterations, residual }) => {
                assert_eq!(iterations, 200);
                assert!(residual < 0.0);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_stopped_solve_far_from_target_is_rejected() {
        let observer = |_: &Event| Some(Action::StopEarly);
        assert!(matches!(
            calculate_width_observed(50.0, &fr4(), &SolverConfig::default(), observer),
            Err(StriplineError::ConvergenceFailure { iterations: 1, .. })
        ));
    }
}
