//! Oscillator configuration.

use serde::{ Deserialize, Serialize };
use crate::error::ConfigError;

/// Physical and discretization parameters for a single oscillator.
///
/// Units are natural (ħ = 1) and the domain is always [0, 1], with the
/// potential minimum at its center.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Harmonic spring constant (≥ 0).
    pub k: f64,
    /// Number of grid samples (≥ 2).
    pub length: usize,
    /// Particle mass (> 0).
    pub mass: f64,
    /// Replace the potential at both grid edges with
    /// [`WALL`][crate::potential::WALL].
    pub edge_v_inf: bool,
}

impl Default for Params {
    fn default() -> Self {
        Self { k: 5e4, length: 1001, mass: 1.0, edge_v_inf: true }
    }
}

impl Params {
    /// Check every parameter against its allowed range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::check_length(self.length)?;
        ConfigError::check_mass(self.mass)?;
        ConfigError::check_spring(self.k)?;
        Ok(())
    }

    /// Parse and validate parameters from a JSON document.
    ///
    /// Missing fields take their [default][Params::default] values.
    ///
    /// ```
    /// use qho::params::Params;
    ///
    /// let params = Params::from_json(r#"{ "k": 100.0, "length": 3 }"#).unwrap();
    /// assert_eq!(params.length, 3);
    /// assert!(params.edge_v_inf);
    /// ```
    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        let params: Self = serde_json::from_str(s)?;
        params.validate()?;
        Ok(params)
    }

    /// Classical angular frequency `√(k/m)`, which is also the level spacing
    /// of the continuum oscillator.
    pub fn omega(&self) -> f64 { (self.k / self.mass).sqrt() }
}
