//! The calculation engine: derive every numeric brewing property from a
//! recipe and classify its ingredients into the timeline map.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;
use wf_core::BrewConfig;
use wf_core::units::{c_to_f, kg_to_lb, liters_to_gallons};
use wf_ingredients::{Fermentable, FermentableUse, Spice, SpiceUse, Yeast, fermentable_use};

use crate::carbonation;
use crate::recipe::Recipe;

/// A fermentable together with the gravity units it contributes at batch
/// volume (efficiency applied).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimelineFermentable {
    pub fermentable: Fermentable,
    pub gravity: f64,
}

/// A spice together with the bitterness it contributes. Zero for dry
/// additions and for spices that do not go into the boil.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimelineSpice {
    pub spice: Spice,
    pub bitterness: f64,
}

/// Fermentables grouped by use phase, in input order within each bucket.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TimelineFermentables {
    pub mash: Vec<TimelineFermentable>,
    pub steep: Vec<TimelineFermentable>,
    pub boil: Vec<TimelineFermentable>,
    pub boil_end: Vec<TimelineFermentable>,
}

/// Classification of every ingredient by usage phase and time, consumed by
/// the timeline generator. Every fermentable lands in exactly one bucket;
/// every spice lands in either `times` (keyed by boil minute) or
/// `dry_spice` (keyed by post-fermentation day).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TimelineMap {
    pub fermentables: TimelineFermentables,
    pub times: BTreeMap<i64, Vec<TimelineSpice>>,
    pub dry_spice: BTreeMap<i64, Vec<TimelineSpice>>,
    pub yeasts: Vec<Yeast>,
}

/// A recipe with every derived property populated. Output of
/// [`calculate`], input to [`crate::timeline`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Calculated {
    /// The input recipe the values were derived from.
    pub recipe: Recipe,

    pub og: f64,
    pub fg: f64,
    pub og_plato: f64,
    pub fg_plato: f64,

    pub abv: f64,
    pub abw: f64,
    pub real_extract: f64,
    /// Calories per serving.
    pub calories: f64,

    pub color_srm: f64,

    pub ibu: f64,
    /// Bitterness to gravity ratio.
    pub bu_to_gu: f64,
    /// Balance value.
    pub bv: f64,

    pub price: f64,

    pub priming_corn_sugar_kg: f64,
    pub priming_sugar_kg: f64,
    pub priming_honey_kg: f64,
    pub priming_dme_kg: f64,
    pub keg_pressure_psi: f64,

    pub timeline_map: TimelineMap,
}

impl Calculated {
    /// Friendly name for the computed color.
    pub fn color_name(&self) -> &'static str {
        wf_core::config::color_name(self.color_srm)
    }
}

/// Quadratic specific-gravity to degrees-Plato fit.
fn to_plato(sg: f64) -> f64 {
    -463.37 + 668.72 * sg - 205.35 * sg * sg
}

fn efficiency_for(use_: FermentableUse, recipe: &Recipe) -> f64 {
    match use_ {
        FermentableUse::Steep => recipe.steep_efficiency_percent / 100.0,
        FermentableUse::Mash => recipe.mash_efficiency_percent / 100.0,
        FermentableUse::Boil | FermentableUse::BoilEnd => 1.0,
    }
}

/// Derive every brewing property of a recipe.
///
/// Pure: borrows the input and builds a fresh [`Calculated`] record, so
/// calling it twice yields identical output and the caller's recipe is
/// untouched. Degenerate inputs are not errors: no fermentables leaves OG
/// at 1.0, no yeast means zero attenuation (FG = OG).
pub fn calculate(recipe: &Recipe, cfg: &BrewConfig) -> Calculated {
    let mut og = 1.0;
    let mut early_og = 1.0;
    let mut mcu = 0.0;
    let mut price = 0.0;
    let mut map = TimelineMap::default();

    // Gravities and color from fermentables
    for fermentable in &recipe.fermentables {
        let use_ = fermentable_use(fermentable, recipe.kind);
        let efficiency = efficiency_for(use_, recipe);

        mcu += fermentable.color_srm * kg_to_lb(fermentable.weight_kg)
            / liters_to_gallons(recipe.batch_size_l);

        let gu = fermentable.gu(recipe.batch_size_l) * efficiency;
        og += gu / 1000.0;

        // Bitterness formulas want the gravity of the early boil, at boil
        // volume and without late additions
        if !fermentable.late {
            early_og += fermentable.gu(recipe.boil_size_l) * efficiency / 1000.0;
        }

        price += fermentable.price();

        let entry = TimelineFermentable { fermentable: fermentable.clone(), gravity: gu };
        match use_ {
            FermentableUse::Mash => map.fermentables.mash.push(entry),
            FermentableUse::Steep => map.fermentables.steep.push(entry),
            FermentableUse::Boil => map.fermentables.boil.push(entry),
            FermentableUse::BoilEnd => map.fermentables.boil_end.push(entry),
        }
    }

    let color_srm = 1.4922 * mcu.powf(0.6859);

    // Final gravity from the maximum attenuation across yeasts, not a blend
    let mut attenuation: f64 = 0.0;
    for yeast in &recipe.yeasts {
        attenuation = attenuation.max(yeast.attenuation);
        price += yeast.price();
        map.yeasts.push(yeast.clone());
    }

    let fg = og - (og - 1.0) * attenuation / 100.0;
    let abv = 1.05 * (og - fg) / fg / 0.79 * 100.0;

    let og_plato = to_plato(og);
    let fg_plato = to_plato(fg);

    let real_extract = 0.1808 * og_plato + 0.8192 * fg_plato;
    let abw = 0.79 * abv / fg;
    let calories =
        ((6.9 * abw + 4.0 * (real_extract - 0.1)) * fg * recipe.serving_size_l * 10.0).max(0.0);

    // Bottle and keg carbonation amounts
    let volumes = recipe.carbonation_volumes();
    let bottling_temp_c = if recipe.bottling_temp_c > 0.0 {
        recipe.bottling_temp_c
    } else {
        cfg.room_temp_c
    };
    let priming_corn_sugar_kg =
        carbonation::priming_corn_sugar_kg(c_to_f(bottling_temp_c), volumes);
    let keg_pressure_psi = carbonation::keg_pressure_psi(c_to_f(recipe.keg_temp_c), volumes);

    // Bitterness from boil spices; dry additions go into the
    // post-fermentation map keyed by days instead
    let mut ibu = 0.0;
    for spice in &recipe.spices {
        let bitterness = if spice.aa > 0.0 && spice.use_ == SpiceUse::Boil {
            let b = spice.bitterness(recipe.ibu_method, early_og, recipe.batch_size_l);
            ibu += b;
            b
        } else {
            0.0
        };

        price += spice.price();

        // Dry additions never reach the boil, so their map entries always
        // carry zero bitterness
        let key = spice.time.round() as i64;
        let entry = TimelineSpice { spice: spice.clone(), bitterness };
        if spice.is_dry() {
            map.dry_spice.entry(key).or_default().push(entry);
        } else {
            map.times.entry(key).or_default().push(entry);
        }
    }

    let bu_to_gu = ibu / (og - 1.0) / 1000.0;
    let rte = (0.82 * (fg - 1.0) + 0.18 * (og - 1.0)) * 1000.0;
    let bv = 0.8 * ibu / rte;

    debug!(og, fg, ibu, color_srm, "calculated recipe");

    Calculated {
        recipe: recipe.clone(),
        og,
        fg,
        og_plato,
        fg_plato,
        abv,
        abw,
        real_extract,
        calories,
        color_srm,
        ibu,
        bu_to_gu,
        bv,
        price,
        priming_corn_sugar_kg,
        priming_sugar_kg: carbonation::priming_sugar_kg(priming_corn_sugar_kg),
        priming_honey_kg: carbonation::priming_honey_kg(priming_corn_sugar_kg),
        priming_dme_kg: carbonation::priming_dme_kg(priming_corn_sugar_kg),
        keg_pressure_psi,
        timeline_map: map,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use wf_ingredients::{FermentableKind, IbuMethod, SpiceForm};

    fn extract_recipe() -> Recipe {
        let mut r = Recipe::default();
        r.fermentables.push(Fermentable {
            name: "Extra pale extract".into(),
            kind: FermentableKind::Extract,
            yield_percent: 75.0,
            weight_kg: 4.0,
            color_srm: 2.5,
            late: false,
        });
        r.spices.push(Spice {
            name: "Cascade".into(),
            time: 60.0,
            aa: 4.5,
            weight_kg: 0.0283,
            use_: SpiceUse::Boil,
            form: SpiceForm::Pellet,
        });
        r.yeasts.push(Yeast {
            name: "Wyeast 1056".into(),
            attenuation: 74.0,
            ..Yeast::default()
        });
        r
    }

    #[test]
    fn simple_extract_scenario() {
        let calc = calculate(&extract_recipe(), &BrewConfig::default());
        assert_relative_eq!(calc.og, 1.0579, epsilon = 5e-4);
        assert_relative_eq!(calc.fg, 1.0150, epsilon = 5e-4);
        assert_relative_eq!(calc.ibu, 9.37, epsilon = 0.05);
        assert!(calc.abv > 5.0 && calc.abv < 6.5, "abv = {}", calc.abv);
        // Ratio checks: 9.36 IBU against 57.9 gravity points, and the
        // balance value against rte = (0.82*(FG-1) + 0.18*(OG-1))*1000
        assert_relative_eq!(calc.bu_to_gu, calc.ibu / (calc.og - 1.0) / 1000.0, epsilon = 1e-12);
        assert_relative_eq!(calc.bu_to_gu, 0.162, epsilon = 2e-3);
        assert_relative_eq!(calc.bv, 0.329, epsilon = 5e-3);
    }

    #[test]
    fn no_yeast_means_no_attenuation() {
        let mut r = extract_recipe();
        r.yeasts.clear();
        let calc = calculate(&r, &BrewConfig::default());
        assert_relative_eq!(calc.fg, calc.og, epsilon = 1e-12);
        assert_relative_eq!(calc.abv, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn attenuation_is_the_maximum_not_a_blend() {
        let mut r = extract_recipe();
        r.yeasts.push(Yeast { attenuation: 80.0, ..Yeast::default() });
        let calc = calculate(&r, &BrewConfig::default());
        let expected_fg = calc.og - (calc.og - 1.0) * 0.80;
        assert_relative_eq!(calc.fg, expected_fg, epsilon = 1e-12);
    }

    #[test]
    fn no_fermentables_leaves_og_at_baseline() {
        let r = Recipe::default();
        let calc = calculate(&r, &BrewConfig::default());
        assert_relative_eq!(calc.og, 1.0, epsilon = 1e-12);
        assert_relative_eq!(calc.fg, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn every_fermentable_lands_in_exactly_one_bucket() {
        let mut r = extract_recipe();
        r.fermentables.push(Fermentable { name: "Crystal 60".into(), ..Fermentable::default() });
        r.fermentables.push(Fermentable { name: "Pale 2-row".into(), ..Fermentable::default() });
        r.fermentables.push(Fermentable {
            name: "Light DME".into(),
            late: true,
            ..Fermentable::default()
        });
        let calc = calculate(&r, &BrewConfig::default());
        let f = &calc.timeline_map.fermentables;
        let total = f.mash.len() + f.steep.len() + f.boil.len() + f.boil_end.len();
        assert_eq!(total, r.fermentables.len());
        assert_eq!(f.steep.len(), 1);
        assert_eq!(f.mash.len(), 1);
        assert_eq!(f.boil.len(), 1);
        assert_eq!(f.boil_end.len(), 1);
    }

    #[test]
    fn dry_spices_carry_no_bitterness() {
        let mut r = extract_recipe();
        r.spices.push(Spice {
            name: "Citra".into(),
            time: 5.0,
            aa: 12.0,
            weight_kg: 0.028,
            use_: SpiceUse::Secondary,
            form: SpiceForm::Pellet,
        });
        let calc = calculate(&r, &BrewConfig::default());
        assert_eq!(calc.timeline_map.dry_spice.len(), 1);
        let dry = &calc.timeline_map.dry_spice[&5];
        assert_eq!(dry.len(), 1);
        assert_relative_eq!(dry[0].bitterness, 0.0);
        // Only the boil hop contributes IBU
        assert_relative_eq!(calc.ibu, 9.37, epsilon = 0.05);
    }

    #[test]
    fn rager_method_differs_from_tinseth() {
        let mut r = extract_recipe();
        let tinseth = calculate(&r, &BrewConfig::default()).ibu;
        r.ibu_method = IbuMethod::Rager;
        let rager = calculate(&r, &BrewConfig::default()).ibu;
        assert!((tinseth - rager).abs() > 0.5);
    }

    #[test]
    fn determinism_and_non_mutation() {
        let r = extract_recipe();
        let before = r.clone();
        let a = calculate(&r, &BrewConfig::default());
        let b = calculate(&r, &BrewConfig::default());
        assert_eq!(a, b);
        assert_eq!(r, before);
    }

    #[test]
    fn calories_for_typical_beer() {
        let calc = calculate(&extract_recipe(), &BrewConfig::default());
        // A 355 ml serving of a 5-6% beer is roughly 150-200 kcal
        assert!(calc.calories > 120.0 && calc.calories < 250.0, "calories = {}", calc.calories);
    }

    #[test]
    fn color_follows_morey() {
        let calc = calculate(&extract_recipe(), &BrewConfig::default());
        let mcu = 2.5 * wf_core::units::kg_to_lb(4.0) / wf_core::units::liters_to_gallons(20.0);
        assert_relative_eq!(calc.color_srm, 1.4922 * mcu.powf(0.6859), epsilon = 1e-9);
        assert_eq!(calc.color_name(), "yellow");
    }
}
