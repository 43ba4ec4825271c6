//! Hops and other boil, mash, or dry additions.

use std::f64::consts::E;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use wf_core::error::BrewError;

/// Bitterness formula selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IbuMethod {
    #[default]
    Tinseth,
    Rager,
}

impl FromStr for IbuMethod {
    type Err = BrewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tinseth" => Ok(Self::Tinseth),
            "rager" => Ok(Self::Rager),
            _ => Err(BrewError::UnknownIbuMethod { method: s.into() }),
        }
    }
}

/// When a spice is added. Primary and secondary additions are "dry"
/// (post-fermentation aromatics that contribute no bitterness).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpiceUse {
    #[default]
    Boil,
    Mash,
    Primary,
    Secondary,
    Bottling,
}

impl SpiceUse {
    pub fn is_dry(self) -> bool {
        matches!(self, Self::Primary | Self::Secondary)
    }
}

impl FromStr for SpiceUse {
    type Err = BrewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "boil" => Ok(Self::Boil),
            "mash" => Ok(Self::Mash),
            "primary" | "dry" | "dry hop" => Ok(Self::Primary),
            "secondary" => Ok(Self::Secondary),
            "bottling" => Ok(Self::Bottling),
            _ => Err(BrewError::UnknownSpiceUse { use_: s.into() }),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpiceForm {
    #[default]
    Pellet,
    Plug,
    Leaf,
}

/// A hop or other spice addition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Spice {
    pub name: String,
    /// Boil minutes for boil additions; days for dry additions.
    pub time: f64,
    /// Alpha acid percentage.
    pub aa: f64,
    pub weight_kg: f64,
    #[serde(rename = "use")]
    pub use_: SpiceUse,
    pub form: SpiceForm,
}

impl Default for Spice {
    fn default() -> Self {
        Self {
            name: String::new(),
            time: 60.0,
            aa: 0.0,
            weight_kg: 0.025,
            use_: SpiceUse::Boil,
            form: SpiceForm::Pellet,
        }
    }
}

impl Spice {
    /// Pellet hops utilize slightly better than whole form.
    pub fn utilization_factor(&self) -> f64 {
        if self.form == SpiceForm::Pellet { 1.15 } else { 1.0 }
    }

    pub fn is_dry(&self) -> bool {
        self.use_.is_dry()
    }

    /// Bitterness contribution in IBU for the chosen formula.
    ///
    /// `early_og` is the wort gravity at boil volume before late additions;
    /// both published formulas are sensitive to it.
    pub fn bitterness(&self, method: IbuMethod, early_og: f64, batch_liters: f64) -> f64 {
        match method {
            IbuMethod::Tinseth => {
                1.65 * 0.000125f64.powf(early_og - 1.0)
                    * ((1.0 - E.powf(-0.04 * self.time)) / 4.15)
                    * (self.aa / 100.0 * self.weight_kg * 1_000_000.0 / batch_liters)
                    * self.utilization_factor()
            }
            IbuMethod::Rager => {
                let utilization = 18.11 + 13.86 * ((self.time - 31.32) / 18.27).tanh();
                let adjustment = ((early_og - 1.05) / 0.2).max(0.0);
                self.weight_kg * 100.0 * utilization * self.utilization_factor() * self.aa
                    / (batch_liters * (1.0 + adjustment))
            }
        }
    }

    pub fn price(&self) -> f64 {
        self.weight_kg * 17.64
    }
}
