//! Effective width, effective permittivity and characteristic impedance.

use std::f64::consts::{E, PI};

use super::{PhysicalParameters, FRINGING_TERM, LOW_FREQUENCY_PERMITTIVITY_OFFSET, SPEED_OF_LIGHT};

/// Output of the impedance model.
///
/// Either every field is finite and physically valid, or the result carries
/// NaN sentinels. A partial result keeps valid effective width/permittivity
/// with a NaN impedance when only the final formula failed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpedanceResult {
    /// Characteristic impedance Z0 (Ω).
    pub characteristic_impedance: f64,
    /// Effective dielectric constant.
    pub effective_permittivity: f64,
    /// Effective trace width (m).
    pub effective_width: f64,
}

/// Typed view of an [`ImpedanceResult`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ImpedanceOutcome {
    /// All three quantities are usable.
    Valid {
        characteristic_impedance: f64,
        effective_permittivity: f64,
        effective_width: f64,
    },
    /// Effective width and permittivity were computed but Z0 is not physical.
    Partial {
        effective_permittivity: f64,
        effective_width: f64,
    },
    /// Inputs or intermediate values were out of domain.
    Invalid,
}

impl ImpedanceResult {
    /// The all-NaN sentinel.
    pub const INVALID: ImpedanceResult = ImpedanceResult {
        characteristic_impedance: f64::NAN,
        effective_permittivity: f64::NAN,
        effective_width: f64::NAN,
    };

    fn partial(effective_permittivity: f64, effective_width: f64) -> Self {
        Self {
            characteristic_impedance: f64::NAN,
            effective_permittivity,
            effective_width,
        }
    }

    /// True when the impedance is a usable number.
    pub fn is_valid(&self) -> bool {
        self.characteristic_impedance.is_finite()
    }

    /// Effective width in millimeters.
    pub fn effective_width_mm(&self) -> f64 {
        self.effective_width * 1000.0
    }

    /// Classify the result.
    pub fn outcome(&self) -> ImpedanceOutcome {
        let geometry_ok = self.effective_width.is_finite() && self.effective_permittivity.is_finite();
        match (self.is_valid(), geometry_ok) {
            (true, true) => ImpedanceOutcome::Valid {
                characteristic_impedance: self.characteristic_impedance,
                effective_permittivity: self.effective_permittivity,
                effective_width: self.effective_width,
            },
            (false, true) => ImpedanceOutcome::Partial {
                effective_permittivity: self.effective_permittivity,
                effective_width: self.effective_width,
            },
            _ => ImpedanceOutcome::Invalid,
        }
    }
}

/// Trace width widened for finite conductor thickness.
///
/// All lengths in meters. A non-positive thickness returns `width` unchanged.
pub fn effective_width(width: f64, thickness: f64, height: f64) -> f64 {
    if thickness <= 0.0 {
        return width;
    }
    width + (thickness / PI) * (1.0 + (4.0 * E * height) / thickness).ln()
}

/// Frequency-dependent effective permittivity.
///
/// Rises from `ε_r − 0.2` at DC toward `ε_r` with corner frequency
/// `c / (4·h·√ε_r)`. Air (`ε_r == 1`) has no dispersion.
#[allow(clippy::float_cmp)]
pub fn effective_permittivity(relative_permittivity: f64, height: f64, frequency_ghz: f64) -> f64 {
    if relative_permittivity == 1.0 {
        return 1.0;
    }

    let eps_low = relative_permittivity - LOW_FREQUENCY_PERMITTIVITY_OFFSET;
    let corner_hz = SPEED_OF_LIGHT / (4.0 * height * relative_permittivity.sqrt());
    let frequency_hz = frequency_ghz * 1e9;
    eps_low + (relative_permittivity - eps_low) * (1.0 - (-frequency_hz / corner_hz).exp())
}

/// Characteristic impedance of a stripline of width `width_mm` millimeters.
///
/// Never fails: out-of-domain inputs yield [`ImpedanceResult::INVALID`], and
/// a non-physical final impedance yields a partial result (see
/// [`ImpedanceOutcome::Partial`]).
pub fn compute_impedance(width_mm: f64, params: &PhysicalParameters) -> ImpedanceResult {
    // NaN inputs fail every comparison below, so test the negated domain
    let inputs_ok = width_mm > 0.0
        && params.substrate_height > 0.0
        && params.relative_permittivity >= 1.0
        && params.metal_thickness >= 0.0
        && params.frequency_ghz >= 0.0;
    if !inputs_ok {
        tracing::debug!(width_mm, ?params, "invalid stripline parameters");
        return ImpedanceResult::INVALID;
    }

    let h = params.substrate_height;
    let w_eff = effective_width(width_mm / 1000.0, params.metal_thickness, h);
    let eps_eff = effective_permittivity(params.relative_permittivity, h, params.frequency_ghz);

    if !w_eff.is_finite() || !eps_eff.is_finite() || w_eff <= 0.0 || eps_eff < 1.0 {
        tracing::debug!(w_eff, eps_eff, "invalid intermediate results");
        return ImpedanceResult::INVALID;
    }

    let denominator = w_eff / h + FRINGING_TERM;
    if denominator <= 0.0 {
        tracing::debug!(denominator, "invalid impedance denominator");
        return ImpedanceResult::partial(eps_eff, w_eff);
    }

    let z0 = (30.0 * PI / eps_eff.sqrt()) / denominator;
    if !z0.is_finite() || z0 <= 0.0 {
        tracing::debug!(z0, "non-physical impedance");
        return ImpedanceResult::partial(eps_eff, w_eff);
    }

    tracing::trace!(width_mm, z0, eps_eff, "stripline impedance");

    ImpedanceResult {
        characteristic_impedance: z0,
        effective_permittivity: eps_eff,
        effective_width: w_eff,
    }
}
