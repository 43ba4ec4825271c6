//! Fermentable sugar sources: grains, extracts, and adjuncts.

use serde::{Deserialize, Serialize};
use wf_core::units::{kg_to_lb, liters_to_gallons, yield_to_ppg};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FermentableKind {
    Grain,
    Sugar,
    Extract,
    #[serde(rename = "Dry Extract")]
    DryExtract,
    Adjunct,
}

/// A fermentable ingredient contributing sugars and color.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Fermentable {
    pub name: String,
    pub kind: FermentableKind,
    /// Extractable-sugar percentage (0-100).
    pub yield_percent: f64,
    pub weight_kg: f64,
    /// Color contribution in SRM-like units.
    pub color_srm: f64,
    /// Marks a boil addition intended for the last minutes of the boil.
    #[serde(default)]
    pub late: bool,
}

impl Default for Fermentable {
    fn default() -> Self {
        Self {
            name: String::new(),
            kind: FermentableKind::Grain,
            yield_percent: 75.0,
            weight_kg: 1.0,
            color_srm: 2.0,
            late: false,
        }
    }
}

impl Fermentable {
    /// Gravity units contributed at the given wort volume.
    pub fn gu(&self, liters: f64) -> f64 {
        yield_to_ppg(self.yield_percent) * kg_to_lb(self.weight_kg) / liters_to_gallons(liters)
    }

    /// Rough price estimate. Dry extract is the most expensive per kg,
    /// liquid extract next, grain and everything else cheapest.
    pub fn price(&self) -> f64 {
        let name = self.name.to_lowercase();
        let price_per_kg = if name.contains("dry") || name.contains("dme") {
            8.8
        } else if name.contains("liquid") || name.contains("lme") {
            6.6
        } else {
            4.4
        };
        self.weight_kg * price_per_kg
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn gravity_units_at_volume() {
        let f = Fermentable {
            name: "Extra pale extract".into(),
            kind: FermentableKind::Extract,
            yield_percent: 75.0,
            weight_kg: 4.0,
            color_srm: 2.5,
            late: false,
        };
        // 34.6605 ppg * 8.8185 lb / 5.2834 gal
        assert_relative_eq!(f.gu(20.0), 57.85, epsilon = 0.01);
        // Half the volume doubles the contribution
        assert_relative_eq!(f.gu(10.0), 2.0 * f.gu(20.0), epsilon = 1e-9);
    }

    #[test]
    fn price_tiers_by_name() {
        let mut f = Fermentable {
            name: "Munton's DME".into(),
            weight_kg: 2.0,
            ..Fermentable::default()
        };
        assert_relative_eq!(f.price(), 17.6, epsilon = 1e-9);
        f.name = "Pale LME".into();
        assert_relative_eq!(f.price(), 13.2, epsilon = 1e-9);
        f.name = "Pilsner malt".into();
        assert_relative_eq!(f.price(), 8.8, epsilon = 1e-9);
    }
}
