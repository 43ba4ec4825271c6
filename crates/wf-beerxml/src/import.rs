//! Field mapping from a BeerXML document tree onto the recipe types.

use serde_json::Value;
use tracing::{debug, warn};
use wf_core::numeric::ensure_finite;
use wf_ingredients::{
    Fermentable, FermentableKind, Mash, MashStep, MashStepKind, RecipeKind, Spice, SpiceForm,
    SpiceUse, Style, Yeast, YeastForm, YeastKind,
};
use wf_recipe::Recipe;

use crate::{ImportError, ImportResult};

/// Import every recipe in a BeerXML document tree.
pub fn import_beerxml(document: &Value) -> ImportResult<Vec<Recipe>> {
    if !document.is_object() {
        return Err(ImportError::NotAMapping);
    }
    Ok(plural_or_singular(document, "RECIPES", "RECIPE")
        .into_iter()
        .map(import_recipe)
        .collect())
}

/// BeerXML stores repeated elements either as `RECIPES.RECIPE` or as a
/// bare `RECIPE`, and a single element may arrive as a lone mapping
/// instead of an array. Normalize all of that to a list of nodes.
fn plural_or_singular<'a>(node: &'a Value, plural: &str, singular: &str) -> Vec<&'a Value> {
    let found = node
        .get(plural)
        .and_then(|wrapper| wrapper.get(singular))
        .or_else(|| node.get(singular));
    match found {
        Some(Value::Array(items)) => items.iter().collect(),
        Some(item) => vec![item],
        None => Vec::new(),
    }
}

/// Tag names arrive in whatever case the producing tool chose.
fn fields(node: &Value) -> Vec<(String, &Value)> {
    node.as_object()
        .map(|map| map.iter().map(|(key, value)| (key.to_lowercase(), value)).collect())
        .unwrap_or_default()
}

/// Numeric leaves may be JSON numbers or stringified numbers. Strings
/// like "NaN" parse but are useless downstream, so non-finite values are
/// treated as absent.
fn float(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(raw) => raw.trim().parse().ok(),
        _ => None,
    };
    parsed.and_then(|v| ensure_finite(v, "beerxml numeric field").ok())
}

fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(raw) => Some(raw.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn import_recipe(node: &Value) -> Recipe {
    let mut recipe = Recipe::default();

    for (key, value) in fields(node) {
        match key.as_str() {
            "name" => {
                if let Some(v) = text(value) {
                    recipe.name = v;
                }
            }
            "brewer" => {
                if let Some(v) = text(value) {
                    recipe.author = v;
                }
            }
            "type" => {
                if let Some(raw) = text(value) {
                    recipe.kind = parse_recipe_kind(&raw);
                }
            }
            "batch_size" => {
                if let Some(v) = float(value) {
                    recipe.batch_size_l = v;
                }
            }
            "boil_size" => {
                if let Some(v) = float(value) {
                    recipe.boil_size_l = v;
                }
            }
            "efficiency" => {
                if let Some(v) = float(value) {
                    recipe.mash_efficiency_percent = v;
                }
            }
            "primary_age" => {
                if let Some(v) = float(value) {
                    recipe.primary_days = v;
                }
            }
            "primary_temp" => {
                if let Some(v) = float(value) {
                    recipe.primary_temp_c = v;
                }
            }
            "secondary_age" => {
                if let Some(v) = float(value) {
                    recipe.secondary_days = v;
                }
            }
            "secondary_temp" => {
                if let Some(v) = float(value) {
                    recipe.secondary_temp_c = v;
                }
            }
            "tertiary_age" => {
                if let Some(v) = float(value) {
                    recipe.tertiary_days = v;
                }
            }
            "tertiary_temp" => {
                if let Some(v) = float(value) {
                    recipe.tertiary_temp_c = v;
                }
            }
            "age" => {
                if let Some(v) = float(value) {
                    recipe.aging_days = v;
                }
            }
            "age_temp" => {
                if let Some(v) = float(value) {
                    recipe.aging_temp_c = v;
                }
            }
            "carbonation" => {
                if let Some(v) = float(value) {
                    recipe.bottling_pressure_vols = v;
                }
            }
            "carbonation_temp" => {
                if let Some(v) = float(value) {
                    recipe.bottling_temp_c = v;
                }
            }
            _ => {}
        }
    }

    let styles = plural_or_singular(node, "STYLES", "STYLE");
    if styles.len() > 1 {
        warn!(count = styles.len(), "recipe has multiple styles; using the first");
    }
    if let Some(style_node) = styles.first() {
        recipe.style = Some(import_style(style_node));
    }

    recipe.fermentables = plural_or_singular(node, "FERMENTABLES", "FERMENTABLE")
        .into_iter()
        .map(import_fermentable)
        .collect();

    // Hops and miscs both become spices; miscs just never carry alpha acid
    recipe.spices = plural_or_singular(node, "HOPS", "HOP")
        .into_iter()
        .chain(plural_or_singular(node, "MISCS", "MISC"))
        .map(import_spice)
        .collect();

    recipe.yeasts = plural_or_singular(node, "YEASTS", "YEAST")
        .into_iter()
        .map(import_yeast)
        .collect();

    let mashs = plural_or_singular(node, "MASHS", "MASH");
    if mashs.len() > 1 {
        warn!(count = mashs.len(), "recipe has multiple mash profiles; using the first");
    }
    let mut mash = Mash::default();
    if let Some(mash_node) = mashs.first() {
        for (key, value) in fields(mash_node) {
            match key.as_str() {
                "name" => {
                    if let Some(v) = text(value) {
                        mash.name = v;
                    }
                }
                "grain_temp" => {
                    if let Some(v) = float(value) {
                        mash.grain_temp_c = v;
                    }
                }
                "sparge_temp" => {
                    if let Some(v) = float(value) {
                        mash.sparge_temp_c = v;
                    }
                }
                "ph" => mash.ph = float(value),
                "notes" => {
                    if let Some(v) = text(value) {
                        mash.notes = v;
                    }
                }
                _ => {}
            }
        }

        // Steps turn absolute water volumes into ratios against the grain
        // bill, so fermentables must be mapped before this point
        let grain_kg = recipe.grain_weight_kg();
        mash.steps = plural_or_singular(mash_node, "MASH_STEPS", "MASH_STEP")
            .into_iter()
            .map(|step_node| import_mash_step(step_node, grain_kg))
            .collect();
    }
    recipe.mash = Some(mash);

    recipe
}

fn import_style(node: &Value) -> Style {
    let mut style = Style::default();
    for (key, value) in fields(node) {
        match key.as_str() {
            "name" => {
                if let Some(v) = text(value) {
                    style.name = v;
                }
            }
            "category" => {
                if let Some(v) = text(value) {
                    style.category = v;
                }
            }
            "og_min" => {
                if let Some(v) = float(value) {
                    style.og[0] = v;
                }
            }
            "og_max" => {
                if let Some(v) = float(value) {
                    style.og[1] = v;
                }
            }
            "fg_min" => {
                if let Some(v) = float(value) {
                    style.fg[0] = v;
                }
            }
            "fg_max" => {
                if let Some(v) = float(value) {
                    style.fg[1] = v;
                }
            }
            "ibu_min" => {
                if let Some(v) = float(value) {
                    style.ibu[0] = v;
                }
            }
            "ibu_max" => {
                if let Some(v) = float(value) {
                    style.ibu[1] = v;
                }
            }
            "color_min" => {
                if let Some(v) = float(value) {
                    style.color[0] = v;
                }
            }
            "color_max" => {
                if let Some(v) = float(value) {
                    style.color[1] = v;
                }
            }
            "abv_min" => {
                if let Some(v) = float(value) {
                    style.abv[0] = v;
                }
            }
            "abv_max" => {
                if let Some(v) = float(value) {
                    style.abv[1] = v;
                }
            }
            "carb_min" => {
                if let Some(v) = float(value) {
                    style.carb[0] = v;
                }
            }
            "carb_max" => {
                if let Some(v) = float(value) {
                    style.carb[1] = v;
                }
            }
            _ => {}
        }
    }
    style
}

fn import_fermentable(node: &Value) -> Fermentable {
    let mut fermentable = Fermentable::default();
    for (key, value) in fields(node) {
        match key.as_str() {
            "name" => {
                if let Some(v) = text(value) {
                    fermentable.name = v;
                }
            }
            "type" => {
                if let Some(raw) = text(value) {
                    fermentable.kind = parse_fermentable_kind(&raw);
                }
            }
            "amount" => {
                if let Some(v) = float(value) {
                    fermentable.weight_kg = v;
                }
            }
            "yield" => {
                if let Some(v) = float(value) {
                    fermentable.yield_percent = v;
                }
            }
            "color" => {
                if let Some(v) = float(value) {
                    fermentable.color_srm = v;
                }
            }
            "add_after_boil" => {
                if let Some(raw) = text(value) {
                    fermentable.late = raw.eq_ignore_ascii_case("true");
                }
            }
            _ => {}
        }
    }
    fermentable
}

fn import_spice(node: &Value) -> Spice {
    let mut spice = Spice::default();
    for (key, value) in fields(node) {
        match key.as_str() {
            "name" => {
                if let Some(v) = text(value) {
                    spice.name = v;
                }
            }
            "amount" => {
                if let Some(v) = float(value) {
                    spice.weight_kg = v;
                }
            }
            "alpha" => {
                if let Some(v) = float(value) {
                    spice.aa = v;
                }
            }
            "time" => {
                if let Some(v) = float(value) {
                    spice.time = v;
                }
            }
            "use" => {
                if let Some(raw) = text(value) {
                    spice.use_ = parse_spice_use(&raw);
                }
            }
            "form" => {
                if let Some(raw) = text(value) {
                    spice.form = parse_spice_form(&raw);
                }
            }
            _ => {}
        }
    }
    spice
}

fn import_yeast(node: &Value) -> Yeast {
    let mut yeast = Yeast::default();
    for (key, value) in fields(node) {
        match key.as_str() {
            "name" => {
                if let Some(v) = text(value) {
                    yeast.name = v;
                }
            }
            "type" => {
                if let Some(raw) = text(value) {
                    yeast.kind = parse_yeast_kind(&raw);
                }
            }
            "form" => {
                if let Some(raw) = text(value) {
                    yeast.form = parse_yeast_form(&raw);
                }
            }
            "attenuation" => {
                if let Some(v) = float(value) {
                    yeast.attenuation = v;
                }
            }
            _ => {}
        }
    }
    yeast
}

fn import_mash_step(node: &Value, grain_kg: f64) -> MashStep {
    let mut step = MashStep::default();
    for (key, value) in fields(node) {
        match key.as_str() {
            "name" => {
                if let Some(v) = text(value) {
                    step.name = v;
                }
            }
            "type" => {
                if let Some(raw) = text(value) {
                    step.kind = raw.parse().unwrap_or_else(|_| {
                        debug!(kind = raw.as_str(), "unrecognized mash step type, assuming infusion");
                        MashStepKind::Infusion
                    });
                }
            }
            // BeerXML gives absolute water volumes; the step model wants
            // liters per kilogram of grain
            "infuse_amount" | "decoction_amt" => {
                if let Some(v) = float(value) {
                    if grain_kg > 0.0 {
                        step.water_ratio_l_per_kg = v / grain_kg;
                    }
                }
            }
            "step_temp" => {
                if let Some(v) = float(value) {
                    step.temp_c = v;
                }
            }
            "end_temp" => step.end_temp_c = float(value),
            "step_time" => {
                if let Some(v) = float(value) {
                    step.time_min = v;
                }
            }
            _ => {}
        }
    }
    step
}

fn parse_recipe_kind(raw: &str) -> Option<RecipeKind> {
    match raw.to_lowercase().as_str() {
        "extract" => Some(RecipeKind::Extract),
        "partial mash" => Some(RecipeKind::PartialMash),
        "all grain" => Some(RecipeKind::AllGrain),
        _ => {
            debug!(kind = raw, "unrecognized recipe type");
            None
        }
    }
}

fn parse_fermentable_kind(raw: &str) -> FermentableKind {
    match raw.to_lowercase().as_str() {
        "grain" => FermentableKind::Grain,
        "sugar" => FermentableKind::Sugar,
        "extract" => FermentableKind::Extract,
        "dry extract" => FermentableKind::DryExtract,
        "adjunct" => FermentableKind::Adjunct,
        _ => {
            debug!(kind = raw, "unrecognized fermentable type, assuming grain");
            FermentableKind::Grain
        }
    }
}

fn parse_spice_use(raw: &str) -> SpiceUse {
    raw.parse().unwrap_or_else(|_| {
        debug!(use_ = raw, "unrecognized hop use, treating as a boil addition");
        SpiceUse::Boil
    })
}

fn parse_spice_form(raw: &str) -> SpiceForm {
    match raw.to_lowercase().as_str() {
        "pellet" => SpiceForm::Pellet,
        "plug" => SpiceForm::Plug,
        "leaf" => SpiceForm::Leaf,
        _ => {
            debug!(form = raw, "unrecognized hop form, assuming pellets");
            SpiceForm::Pellet
        }
    }
}

fn parse_yeast_kind(raw: &str) -> YeastKind {
    match raw.to_lowercase().as_str() {
        "ale" => YeastKind::Ale,
        "lager" => YeastKind::Lager,
        "wheat" => YeastKind::Wheat,
        "wine" => YeastKind::Wine,
        "champagne" => YeastKind::Champagne,
        _ => {
            debug!(kind = raw, "unrecognized yeast type, assuming ale");
            YeastKind::Ale
        }
    }
}

fn parse_yeast_form(raw: &str) -> YeastForm {
    match raw.to_lowercase().as_str() {
        "liquid" => YeastForm::Liquid,
        "dry" => YeastForm::Dry,
        "slant" => YeastForm::Slant,
        "culture" => YeastForm::Culture,
        _ => {
            debug!(form = raw, "unrecognized yeast form, assuming liquid");
            YeastForm::Liquid
        }
    }
}
