use approx::assert_relative_eq;
use serde_json::json;
use wf_beerxml::{ImportError, import_beerxml};
use wf_ingredients::{
    FermentableKind, MashStepKind, RecipeKind, SpiceForm, SpiceUse, YeastForm, YeastKind,
};

#[test]
fn full_document_maps_every_section() {
    let document = json!({
        "RECIPES": {
            "RECIPE": [{
                "NAME": "Citra Pale Ale",
                "BREWER": "Jane Doe",
                "TYPE": "All Grain",
                "BATCH_SIZE": "19.0",
                "BOIL_SIZE": 23.0,
                "EFFICIENCY": "70.0",
                "PRIMARY_AGE": "10",
                "PRIMARY_TEMP": "19",
                "SECONDARY_AGE": "7",
                "AGE": "21",
                "AGE_TEMP": "18",
                "CARBONATION": "2.4",
                "CARBONATION_TEMP": "21",
                "STYLE": {
                    "NAME": "American Pale Ale",
                    "CATEGORY": "Pale American Ale",
                    "OG_MIN": "1.045",
                    "OG_MAX": "1.060",
                    "IBU_MIN": "30",
                    "IBU_MAX": "45"
                },
                "FERMENTABLES": {
                    "FERMENTABLE": [{
                        "NAME": "Pale 2-row",
                        "TYPE": "Grain",
                        "AMOUNT": "4.5",
                        "YIELD": "80.0",
                        "COLOR": "2.0"
                    }, {
                        "NAME": "Light DME",
                        "TYPE": "Dry Extract",
                        "AMOUNT": "0.5",
                        "ADD_AFTER_BOIL": "TRUE"
                    }]
                },
                "HOPS": {
                    "HOP": [{
                        "NAME": "Citra",
                        "AMOUNT": "0.028",
                        "ALPHA": "12.0",
                        "USE": "Boil",
                        "TIME": "60",
                        "FORM": "Leaf"
                    }, {
                        "NAME": "Citra",
                        "AMOUNT": "0.056",
                        "ALPHA": "12.0",
                        "USE": "Dry Hop",
                        "TIME": "7"
                    }]
                },
                "MISCS": {
                    "MISC": {
                        "NAME": "Irish Moss",
                        "AMOUNT": "0.005",
                        "USE": "Boil",
                        "TIME": "15"
                    }
                },
                "YEASTS": {
                    "YEAST": {
                        "NAME": "WLP001",
                        "TYPE": "Ale",
                        "FORM": "Liquid",
                        "ATTENUATION": "77"
                    }
                },
                "MASH": {
                    "NAME": "Single Infusion",
                    "GRAIN_TEMP": "20",
                    "SPARGE_TEMP": "75.5",
                    "PH": "5.4",
                    "MASH_STEPS": {
                        "MASH_STEP": [{
                            "NAME": "Conversion",
                            "TYPE": "Infusion",
                            "INFUSE_AMOUNT": "12.375",
                            "STEP_TEMP": "67",
                            "STEP_TIME": "75"
                        }]
                    }
                }
            }]
        }
    });

    let recipes = import_beerxml(&document).unwrap();
    assert_eq!(recipes.len(), 1);
    let recipe = &recipes[0];

    assert_eq!(recipe.name, "Citra Pale Ale");
    assert_eq!(recipe.author, "Jane Doe");
    assert_eq!(recipe.kind, Some(RecipeKind::AllGrain));
    assert_relative_eq!(recipe.batch_size_l, 19.0);
    assert_relative_eq!(recipe.boil_size_l, 23.0);
    assert_relative_eq!(recipe.mash_efficiency_percent, 70.0);
    assert_relative_eq!(recipe.primary_days, 10.0);
    assert_relative_eq!(recipe.primary_temp_c, 19.0);
    assert_relative_eq!(recipe.secondary_days, 7.0);
    assert_relative_eq!(recipe.aging_days, 21.0);
    assert_relative_eq!(recipe.aging_temp_c, 18.0);
    assert_relative_eq!(recipe.bottling_pressure_vols, 2.4);
    assert_relative_eq!(recipe.bottling_temp_c, 21.0);

    let style = recipe.style.as_ref().unwrap();
    assert_eq!(style.name, "American Pale Ale");
    assert_eq!(style.category, "Pale American Ale");
    assert_relative_eq!(style.og[0], 1.045);
    assert_relative_eq!(style.og[1], 1.060);
    assert_relative_eq!(style.ibu[0], 30.0);
    assert_relative_eq!(style.ibu[1], 45.0);
    // Unlisted bounds keep their defaults
    assert_relative_eq!(style.abv[1], 14.0);

    assert_eq!(recipe.fermentables.len(), 2);
    let pale = &recipe.fermentables[0];
    assert_eq!(pale.name, "Pale 2-row");
    assert_eq!(pale.kind, FermentableKind::Grain);
    assert_relative_eq!(pale.weight_kg, 4.5);
    assert_relative_eq!(pale.yield_percent, 80.0);
    assert_relative_eq!(pale.color_srm, 2.0);
    assert!(!pale.late);
    let dme = &recipe.fermentables[1];
    assert_eq!(dme.kind, FermentableKind::DryExtract);
    assert!(dme.late);

    // Hops first, then miscs
    assert_eq!(recipe.spices.len(), 3);
    let bittering = &recipe.spices[0];
    assert_relative_eq!(bittering.aa, 12.0);
    assert_relative_eq!(bittering.time, 60.0);
    assert_eq!(bittering.use_, SpiceUse::Boil);
    assert_eq!(bittering.form, SpiceForm::Leaf);
    let dry = &recipe.spices[1];
    assert_eq!(dry.use_, SpiceUse::Primary);
    assert_relative_eq!(dry.time, 7.0);
    let moss = &recipe.spices[2];
    assert_eq!(moss.name, "Irish Moss");
    assert_relative_eq!(moss.aa, 0.0);

    assert_eq!(recipe.yeasts.len(), 1);
    let yeast = &recipe.yeasts[0];
    assert_eq!(yeast.name, "WLP001");
    assert_eq!(yeast.kind, YeastKind::Ale);
    assert_eq!(yeast.form, YeastForm::Liquid);
    assert_relative_eq!(yeast.attenuation, 77.0);

    let mash = recipe.mash.as_ref().unwrap();
    assert_eq!(mash.name, "Single Infusion");
    assert_relative_eq!(mash.grain_temp_c, 20.0);
    assert_relative_eq!(mash.sparge_temp_c, 75.5);
    assert_relative_eq!(mash.ph.unwrap(), 5.4);
    assert_eq!(mash.steps.len(), 1);
    let step = &mash.steps[0];
    assert_eq!(step.name, "Conversion");
    assert_eq!(step.kind, MashStepKind::Infusion);
    assert_relative_eq!(step.temp_c, 67.0);
    assert_relative_eq!(step.time_min, 75.0);
    // 12.375 l of strike water over 4.5 kg of grain
    assert_relative_eq!(step.water_ratio_l_per_kg, 2.75, epsilon = 1e-9);
}

#[test]
fn singular_elements_work_without_wrappers() {
    let document = json!({
        "RECIPE": {
            "NAME": "Minimal",
            "FERMENTABLE": {
                "NAME": "Maris Otter",
                "AMOUNT": 4.0
            }
        }
    });

    let recipes = import_beerxml(&document).unwrap();
    assert_eq!(recipes.len(), 1);
    assert_eq!(recipes[0].name, "Minimal");
    assert_eq!(recipes[0].fermentables.len(), 1);
    assert_relative_eq!(recipes[0].fermentables[0].weight_kg, 4.0);
    // Unmapped process values keep the recipe defaults
    assert_relative_eq!(recipes[0].batch_size_l, 20.0);
    assert_relative_eq!(recipes[0].primary_days, 14.0);
}

#[test]
fn unknown_enum_values_fall_back_to_defaults() {
    let document = json!({
        "RECIPE": {
            "TYPE": "Cider",
            "HOP": {
                "NAME": "Mystery",
                "USE": "First Wort",
                "FORM": "Powder"
            },
            "YEAST": {
                "NAME": "Mystery",
                "TYPE": "Kveik-ish",
                "FORM": "Jelly"
            }
        }
    });

    let recipes = import_beerxml(&document).unwrap();
    let recipe = &recipes[0];
    assert_eq!(recipe.kind, None);
    assert_eq!(recipe.spices[0].use_, SpiceUse::Boil);
    assert_eq!(recipe.spices[0].form, SpiceForm::Pellet);
    assert_eq!(recipe.yeasts[0].kind, YeastKind::Ale);
    assert_eq!(recipe.yeasts[0].form, YeastForm::Liquid);
}

#[test]
fn mixed_case_tags_are_accepted() {
    let document = json!({
        "RECIPE": {
            "Name": "Lowercase tool output",
            "batch_size": "12.5"
        }
    });

    let recipes = import_beerxml(&document).unwrap();
    assert_eq!(recipes[0].name, "Lowercase tool output");
    assert_relative_eq!(recipes[0].batch_size_l, 12.5);
}

#[test]
fn non_finite_numeric_strings_keep_defaults() {
    let document = json!({
        "RECIPE": {
            "NAME": "Broken export",
            "BATCH_SIZE": "NaN",
            "BOIL_SIZE": "inf"
        }
    });

    let recipes = import_beerxml(&document).unwrap();
    assert_relative_eq!(recipes[0].batch_size_l, 20.0);
    assert_relative_eq!(recipes[0].boil_size_l, 10.0);
}

#[test]
fn loads_a_document_file() {
    let path =
        std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/pale_ale.json");
    let recipes = wf_beerxml::load_json(&path).unwrap();
    assert_eq!(recipes.len(), 1);
    let recipe = &recipes[0];
    assert_eq!(recipe.name, "Fixture Pale Ale");
    assert_eq!(recipe.kind, Some(RecipeKind::Extract));
    assert_relative_eq!(recipe.batch_size_l, 20.0);
    assert_eq!(recipe.fermentables.len(), 1);
    assert_eq!(recipe.spices.len(), 1);
    assert_relative_eq!(recipe.yeasts[0].attenuation, 74.0);
    assert_eq!(recipe.yeasts[0].form, YeastForm::Dry);
}

#[test]
fn missing_file_is_an_io_error() {
    let err = wf_beerxml::load_json(std::path::Path::new("does-not-exist.json")).unwrap_err();
    assert!(matches!(err, ImportError::Io(_)));
}

#[test]
fn empty_document_imports_no_recipes() {
    assert!(import_beerxml(&json!({})).unwrap().is_empty());
}

#[test]
fn non_mapping_root_is_an_error() {
    let err = import_beerxml(&json!([1, 2, 3])).unwrap_err();
    assert!(matches!(err, ImportError::NotAMapping));
}
