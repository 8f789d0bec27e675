//! WASM bindings for Stripline Core.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmStripline } from 'stripline_core';
//!
//! await init();
//!
//! // height 1.6 mm, εr 4.4, 35 µm copper, 1 GHz
//! const calc = new WasmStripline(1.6, 4.4, 35, 1);
//! const result = calc.width_for_impedance(50);
//! console.log(result.width_mm, result.impedance, result.report);
//! ```

use wasm_bindgen::prelude::*;

use crate::calculator::{calculate_impedance, calculate_width_with, Calculation};
use crate::model::PhysicalParameters;
use crate::solver::SolverConfig;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// A finished calculation, flattened for JavaScript.
#[wasm_bindgen]
pub struct WasmCalculation {
    calculation: Calculation,
}

#[wasm_bindgen]
impl WasmCalculation {
    /// Trace width (mm).
    #[wasm_bindgen(getter)]
    pub fn width_mm(&self) -> f64 {
        self.calculation.width_mm
    }

    /// Characteristic impedance (Ω).
    #[wasm_bindgen(getter)]
    pub fn impedance(&self) -> f64 {
        self.calculation.characteristic_impedance
    }

    /// Effective dielectric constant.
    #[wasm_bindgen(getter)]
    pub fn effective_permittivity(&self) -> f64 {
        self.calculation.effective_permittivity
    }

    /// Effective trace width (mm).
    #[wasm_bindgen(getter)]
    pub fn effective_width_mm(&self) -> f64 {
        self.calculation.effective_width_mm
    }

    /// Plain-text summary suitable for the clipboard.
    #[wasm_bindgen(getter)]
    pub fn report(&self) -> String {
        self.calculation.to_string()
    }
}

/// Stripline calculator bound to one substrate.
#[wasm_bindgen]
pub struct WasmStripline {
    params: PhysicalParameters,
    config: SolverConfig,
}

#[wasm_bindgen]
impl WasmStripline {
    /// Create a calculator from board units (mm, εr, µm, GHz).
    #[wasm_bindgen(constructor)]
    pub fn new(height_mm: f64, eps_r: f64, thickness_um: f64, frequency_ghz: f64) -> Result<WasmStripline, JsValue> {
        let params = PhysicalParameters::from_board_units(height_mm, eps_r, thickness_um, frequency_ghz);
        params.validate().map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(WasmStripline {
            params,
            config: SolverConfig::default(),
        })
    }

    /// Override the solver iteration budget and tolerance.
    #[wasm_bindgen]
    pub fn set_solver(&mut self, max_iterations: usize, tolerance: f64) -> Result<(), JsValue> {
        let config = self
            .config
            .with_max_iterations(max_iterations)
            .with_tolerance(tolerance);
        config.validate().map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.config = config;
        Ok(())
    }

    /// Z0 for a trace `width_mm` wide.
    #[wasm_bindgen]
    pub fn impedance_for_width(&self, width_mm: f64) -> Result<WasmCalculation, JsValue> {
        calculate_impedance(width_mm, &self.params)
            .map(|calculation| WasmCalculation { calculation })
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Width giving `target_ohms`.
    #[wasm_bindgen]
    pub fn width_for_impedance(&self, target_ohms: f64) -> Result<WasmCalculation, JsValue> {
        calculate_width_with(target_ohms, &self.params, &self.config)
            .map(|calculation| WasmCalculation { calculation })
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
