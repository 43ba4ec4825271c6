//! The recipe aggregate: ingredient lists plus process parameters.

use serde::{Deserialize, Serialize};
use wf_ingredients::{
    Fermentable, FermentableKind, IbuMethod, Mash, RecipeKind, Spice, Style, Yeast,
    fermentable_use,
};

/// A beer recipe: ingredients and process metadata. Derived values (OG,
/// IBU, timeline map, ...) live on [`crate::Calculated`], never here, so
/// stale outputs can never leak back into a calculation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Recipe {
    pub name: String,
    pub description: String,
    pub author: String,
    /// Extract / partial mash / all grain; drives fermentable
    /// classification overrides when known.
    pub kind: Option<RecipeKind>,

    pub boil_size_l: f64,
    pub batch_size_l: f64,
    pub serving_size_l: f64,

    pub steep_efficiency_percent: f64,
    pub steep_time_min: f64,
    pub mash_efficiency_percent: f64,

    pub style: Option<Style>,
    pub ibu_method: IbuMethod,

    pub fermentables: Vec<Fermentable>,
    pub spices: Vec<Spice>,
    pub yeasts: Vec<Yeast>,

    pub mash: Option<Mash>,

    /// Bottling temperature in °C; falls back to room temperature when 0.
    pub bottling_temp_c: f64,
    /// Target carbonation in volumes of CO2; 0 selects the style heuristic.
    pub bottling_pressure_vols: f64,
    /// Keg serving temperature in °C.
    pub keg_temp_c: f64,

    pub primary_days: f64,
    pub primary_temp_c: f64,
    pub secondary_days: f64,
    pub secondary_temp_c: f64,
    pub tertiary_days: f64,
    pub tertiary_temp_c: f64,
    pub aging_days: f64,
    pub aging_temp_c: f64,
}

impl Default for Recipe {
    fn default() -> Self {
        Self {
            name: "New Recipe".into(),
            description: "Recipe description".into(),
            author: "Anonymous Brewer".into(),
            kind: None,
            boil_size_l: 10.0,
            batch_size_l: 20.0,
            serving_size_l: 0.355,
            steep_efficiency_percent: 50.0,
            steep_time_min: 20.0,
            mash_efficiency_percent: 75.0,
            style: None,
            ibu_method: IbuMethod::Tinseth,
            fermentables: Vec::new(),
            spices: Vec::new(),
            yeasts: Vec::new(),
            mash: None,
            bottling_temp_c: 0.0,
            bottling_pressure_vols: 0.0,
            keg_temp_c: 5.0,
            primary_days: 14.0,
            primary_temp_c: 20.0,
            secondary_days: 0.0,
            secondary_temp_c: 0.0,
            tertiary_days: 0.0,
            tertiary_temp_c: 0.0,
            aging_days: 14.0,
            aging_temp_c: 20.0,
        }
    }
}

impl Recipe {
    /// Total weight of grain fermentables in kg. Mash water volumes are
    /// ratios against this.
    pub fn grain_weight_kg(&self) -> f64 {
        self.fermentables
            .iter()
            .filter(|f| f.kind == FermentableKind::Grain)
            .map(|f| f.weight_kg)
            .sum()
    }

    /// Number of servings the batch fills.
    pub fn bottle_count(&self) -> i64 {
        (self.batch_size_l / self.serving_size_l).floor() as i64
    }

    /// Target carbonation in volumes of CO2. An explicit bottling pressure
    /// wins; otherwise a style-name heuristic applies: low for stouts and
    /// porters, high for lambics and wheats, 2.5 for everything else.
    pub fn carbonation_volumes(&self) -> f64 {
        if self.bottling_pressure_vols > 0.0 {
            return self.bottling_pressure_vols;
        }
        let style_name = self
            .style
            .as_ref()
            .map_or_else(|| self.name.clone(), |s| s.name.clone())
            .to_lowercase();
        if style_name.contains("stout") || style_name.contains("porter") {
            1.85
        } else if style_name.contains("lambic") || style_name.contains("wheat") {
            3.3
        } else {
            2.5
        }
    }

    /// Scale to a new batch and boil size, keeping gravity and bitterness
    /// the same. Fermentable weights scale with the batch; hop weights are
    /// re-solved from the bitterness they contributed at the old sizes.
    pub fn scale(&self, new_batch_size_l: f64, new_boil_size_l: f64) -> Recipe {
        let mut scaled = self.clone();
        let mut early_og = 1.0;
        let mut new_early_og = 1.0;

        for fermentable in &mut scaled.fermentables {
            let use_ = fermentable_use(fermentable, self.kind);
            let efficiency = match use_ {
                wf_ingredients::FermentableUse::Steep => self.steep_efficiency_percent / 100.0,
                wf_ingredients::FermentableUse::Mash => self.mash_efficiency_percent / 100.0,
                _ => 1.0,
            };

            if !fermentable.late {
                early_og += fermentable.gu(self.boil_size_l) * efficiency / 1000.0;
            }

            fermentable.weight_kg *= new_batch_size_l / self.batch_size_l;

            if !fermentable.late {
                new_early_og += fermentable.gu(new_boil_size_l) * efficiency / 1000.0;
            }
        }

        for spice in &mut scaled.spices {
            if spice.aa > 0.0 && spice.time > 0.0 {
                let bitterness = spice.bitterness(self.ibu_method, early_og, self.batch_size_l);

                match self.ibu_method {
                    IbuMethod::Tinseth => {
                        spice.weight_kg = bitterness * new_batch_size_l
                            / (1.65
                                * 0.000125f64.powf(new_early_og - 1.0)
                                * ((1.0 - std::f64::consts::E.powf(-0.04 * spice.time)) / 4.15)
                                * (spice.aa / 100.0 * 1_000_000.0)
                                * spice.utilization_factor());
                    }
                    IbuMethod::Rager => {
                        let utilization = 18.11 + 13.86 * ((spice.time - 31.32) / 18.27).tanh();
                        let adjustment = ((new_early_og - 1.05) / 0.2).max(0.0);
                        spice.weight_kg = bitterness
                            / (100.0 * utilization * spice.utilization_factor() * spice.aa
                                / (new_batch_size_l * (1.0 + adjustment)));
                    }
                }
            } else {
                // No bitterness contribution, scale linearly
                spice.weight_kg *= new_batch_size_l / self.batch_size_l;
            }
        }

        scaled.batch_size_l = new_batch_size_l;
        scaled.boil_size_l = new_boil_size_l;
        scaled
    }
}
