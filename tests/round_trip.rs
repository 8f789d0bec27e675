//! End-to-end tests: solve for a width, then check the model at that width.

use approx::assert_abs_diff_eq;
use stripline_core::calculator::{calculate_width_observed, Calculation};
use stripline_core::model::{compute_impedance, PhysicalParameters};
use stripline_core::solver::{Action, Event, SolverConfig, Status, WidthSolver};
use stripline_core::{calculate_impedance, calculate_width, find_width_for_impedance, StriplineError};

/// 1.6 mm FR-4, 1 oz copper, 1 GHz
fn fr4() -> PhysicalParameters {
    PhysicalParameters::from_board_units(1.6, 4.4, 35.0, 1.0)
}

/// Helper: solve + re-evaluate, returning the residual in ohms
fn round_trip_residual(target: f64, params: &PhysicalParameters) -> f64 {
    let width = find_width_for_impedance(target, params);
    compute_impedance(width, params).characteristic_impedance - target
}

#[test]
fn test_fr4_round_trip_is_tight() {
    for target in [10.0, 20.0, 25.0, 30.0, 40.0, 50.0, 60.0, 75.0] {
        let residual = round_trip_residual(target, &fr4());
        assert!(residual.abs() < 1e-6, "{target} Ω: residual {residual:e}");
    }
}

#[test]
fn test_thin_substrates_round_trip() {
    // Step-size convergence leaves a few µΩ on thin, steep substrates
    let substrates = [
        fr4(),
        PhysicalParameters::from_board_units(0.508, 3.48, 18.0, 10.0),
        PhysicalParameters::from_board_units(0.2, 3.0, 17.0, 5.0),
        PhysicalParameters::from_board_units(1.0, 1.0, 0.0, 0.0),
    ];
    for params in &substrates {
        for target in [10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0] {
            let solution = WidthSolver::new().solve(target, params);
            assert!(solution.is_converged(), "{target} Ω on {params:?}: {:?}", solution.status);
            assert!(solution.iterations < 200);
            assert!(
                solution.residual().abs() < 1e-5,
                "{target} Ω on {params:?}: residual {:e}",
                solution.residual()
            );
        }
    }
}

#[test]
fn test_fifty_ohm_scenario() {
    let calc = calculate_width(50.0, &fr4()).expect("50 Ω should be reachable");
    assert_abs_diff_eq!(calc.characteristic_impedance, 50.0, epsilon = 1e-6);
    assert_abs_diff_eq!(calc.width_mm, 0.6952990355, epsilon = 1e-6);

    // Forward calculation at the solved width agrees
    let forward = calculate_impedance(calc.width_mm, &fr4()).expect("forward failed");
    assert_eq!(forward.characteristic_impedance, calc.characteristic_impedance);
    assert_eq!(forward.effective_width_mm, calc.effective_width_mm);
}

#[test]
fn test_forward_regression_reference() {
    let Calculation {
        characteristic_impedance,
        effective_permittivity,
        effective_width_mm,
        ..
    } = calculate_impedance(3.0, &fr4()).expect("forward failed");
    assert_abs_diff_eq!(characteristic_impedance, 19.4724822674935, epsilon = 1e-10);
    assert_abs_diff_eq!(effective_permittivity, 4.208752540487029, epsilon = 1e-12);
    assert_abs_diff_eq!(effective_width_mm, 3.0691926197734445, epsilon = 1e-12);
}

#[test]
fn test_air_stripline_is_frequency_independent() {
    let dc = PhysicalParameters::from_board_units(1.0, 1.0, 0.0, 0.0);
    let rf = PhysicalParameters::from_board_units(1.0, 1.0, 0.0, 40.0);
    let w_dc = find_width_for_impedance(50.0, &dc);
    let w_rf = find_width_for_impedance(50.0, &rf);
    assert_eq!(w_dc, w_rf);
    assert_eq!(compute_impedance(w_dc, &rf).effective_permittivity, 1.0);
}

#[test]
fn test_non_convergence_is_observable() {
    let mut exhausted = None;
    let observer = |event: &Event| -> Option<Action> {
        if let Event::MaxIterations { iterations, width_mm } = *event {
            exhausted = Some((iterations, width_mm));
        }
        None
    };
    let err = calculate_width_observed(150.0, &fr4(), &SolverConfig::default(), observer)
        .expect_err("150 Ω is out of reach on 1.6 mm FR-4");

    assert!(matches!(err, StriplineError::ConvergenceFailure { iterations: 200, .. }));
    assert_eq!(exhausted.map(|(n, _)| n), Some(200));
}

#[test]
fn test_iteration_budget_is_respected() {
    let solver = WidthSolver::with_config(SolverConfig::new().with_max_iterations(3));
    let solution = solver.solve(50.0, &fr4());
    assert_eq!(solution.status, Status::MaxIters);
    assert_eq!(solution.iterations, 3);
    // Best-effort estimate is still a usable width
    assert!(solution.result.is_valid());
}
