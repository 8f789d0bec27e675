//! Physical parameters shared by every calculation.

use crate::error::{Result, StriplineError};

/// Substrate and conductor description, in SI units.
///
/// Fields are public and unchecked; the model treats out-of-domain values as
/// an invalid result, while [`PhysicalParameters::validate`] turns them into
/// a typed error for callers that want one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicalParameters {
    /// Distance between the ground planes (m), > 0.
    pub substrate_height: f64,
    /// Relative permittivity of the dielectric, >= 1.
    pub relative_permittivity: f64,
    /// Trace copper thickness (m), >= 0.
    pub metal_thickness: f64,
    /// Operating frequency (GHz), >= 0.
    pub frequency_ghz: f64,
}

impl PhysicalParameters {
    /// Create parameters from SI values.
    pub fn new(
        substrate_height: f64,
        relative_permittivity: f64,
        metal_thickness: f64,
        frequency_ghz: f64,
    ) -> Self {
        Self {
            substrate_height,
            relative_permittivity,
            metal_thickness,
            frequency_ghz,
        }
    }

    /// Create parameters from the units used on a board stackup:
    /// height in millimeters, copper thickness in micrometers.
    pub fn from_board_units(
        height_mm: f64,
        relative_permittivity: f64,
        thickness_um: f64,
        frequency_ghz: f64,
    ) -> Self {
        Self::new(
            height_mm / 1000.0,
            relative_permittivity,
            thickness_um * 1e-6,
            frequency_ghz,
        )
    }

    /// Substrate height in millimeters.
    pub fn substrate_height_mm(&self) -> f64 {
        self.substrate_height * 1000.0
    }

    /// Check every field against its physical domain.
    pub fn validate(&self) -> Result<()> {
        check(
            "substrate_height",
            self.substrate_height,
            self.substrate_height > 0.0,
            "must be positive",
        )?;
        check(
            "relative_permittivity",
            self.relative_permittivity,
            self.relative_permittivity >= 1.0,
            "must be at least 1 (air)",
        )?;
        check(
            "metal_thickness",
            self.metal_thickness,
            self.metal_thickness >= 0.0,
            "must not be negative",
        )?;
        check(
            "frequency_ghz",
            self.frequency_ghz,
            self.frequency_ghz >= 0.0,
            "must not be negative",
        )
    }
}

fn check(param: &str, value: f64, in_domain: bool, message: &str) -> Result<()> {
    if !value.is_finite() {
        return Err(StriplineError::invalid_parameter(param, value, "must be finite"));
    }
    if !in_domain {
        return Err(StriplineError::invalid_parameter(param, value, message));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_board_units_convert_to_si() {
        let p = PhysicalParameters::from_board_units(1.6, 4.4, 35.0, 1.0);
        assert_relative_eq!(p.substrate_height, 0.0016);
        assert_relative_eq!(p.metal_thickness, 35e-6);
        assert_relative_eq!(p.substrate_height_mm(), 1.6);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_each_field() {
        let good = PhysicalParameters::from_board_units(1.6, 4.4, 35.0, 1.0);

        let cases = [
            ("substrate_height", PhysicalParameters { substrate_height: 0.0, ..good }),
            ("relative_permittivity", PhysicalParameters { relative_permittivity: 0.99, ..good }),
            ("metal_thickness", PhysicalParameters { metal_thickness: -1e-6, ..good }),
            ("frequency_ghz", PhysicalParameters { frequency_ghz: -1.0, ..good }),
            ("frequency_ghz", PhysicalParameters { frequency_ghz: f64::NAN, ..good }),
        ];

        for (name, params) in cases {
            match params.validate() {
                Err(StriplineError::InvalidParameter { param, .. }) => assert_eq!(param, name),
                other => panic!("expected {name} to be rejected, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_air_and_zero_thickness_are_valid() {
        let p = PhysicalParameters::new(0.001, 1.0, 0.0, 0.0);
        assert!(p.validate().is_ok());
    }
}
