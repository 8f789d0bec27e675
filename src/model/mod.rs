//! Stripline impedance model.
//!
//! Pure functions mapping a trace width and substrate description to the
//! characteristic impedance of a symmetric stripline:
//!
//! ```text
//! W_eff = W + (t/π)·ln(1 + 4·e·h/t)                       (t > 0)
//! ε_eff = ε_low + (ε_r − ε_low)·(1 − exp(−f/f_p))         (ε_r ≠ 1)
//! Z0    = (30π/√ε_eff) / (W_eff/h + 0.441)
//! ```
//!
//! where `ε_low = ε_r − 0.2` and `f_p = c / (4·h·√ε_r)`.

mod impedance;
mod params;

pub use impedance::{
    compute_impedance, effective_permittivity, effective_width, ImpedanceOutcome, ImpedanceResult,
};
pub use params::PhysicalParameters;

/// Propagation speed used for the dispersion corner frequency (m/s).
pub const SPEED_OF_LIGHT: f64 = 3e8;

/// Offset between bulk and quasi-static permittivity.
pub const LOW_FREQUENCY_PERMITTIVITY_OFFSET: f64 = 0.2;

/// Fringing term added to the normalized width in the impedance denominator.
pub const FRINGING_TERM: f64 = 0.441;
