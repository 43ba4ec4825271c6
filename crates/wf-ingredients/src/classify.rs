//! Name-pattern classification of fermentables.
//!
//! The use category decides which timeline bucket a fermentable lands in
//! and which efficiency applies to its gravity contribution. Rules are an
//! ordered list evaluated top to bottom, first match wins, so each rule is
//! testable on its own. The recipe kind then overrides the matched
//! category (an extract recipe has no mash tun; an all-grain recipe steeps
//! its specialty grains in the mash instead).
//!
//! The category is context-dependent, so it is recomputed on every query
//! and never cached on the fermentable.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::fermentable::Fermentable;

/// How a recipe derives its sugars. Drives the classification overrides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecipeKind {
    Extract,
    #[serde(rename = "Partial Mash")]
    PartialMash,
    #[serde(rename = "All Grain")]
    AllGrain,
}

/// When during the brew a fermentable is added.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FermentableUse {
    Mash,
    Steep,
    Boil,
    BoilEnd,
}

struct UseRule {
    pattern: Regex,
    result: FermentableUse,
}

/// Ordered rule table. Explicit keywords first, then the curated
/// sugar/extract list, then the specialty/roasted malt list.
static USE_RULES: LazyLock<Vec<UseRule>> = LazyLock::new(|| {
    let rule = |pattern: &str, result| UseRule {
        pattern: Regex::new(&format!("(?i){pattern}")).expect("static classification pattern"),
        result,
    };
    vec![
        rule("mash", FermentableUse::Mash),
        rule("steep", FermentableUse::Steep),
        rule("boil", FermentableUse::Boil),
        rule(
            "candi|candy|dme|dry|extract|honey|lme|liquid|sugar|syrup|turbinado",
            FermentableUse::Boil,
        ),
        rule(
            "biscuit|black|cara|chocolate|crystal|munich|roast|special ?b|toast|victory|vienna",
            FermentableUse::Steep,
        ),
    ]
});

fn base_use(name: &str) -> FermentableUse {
    USE_RULES
        .iter()
        .find(|rule| rule.pattern.is_match(name))
        .map_or(FermentableUse::Mash, |rule| rule.result)
}

/// Compute the use of a fermentable from its name, its late flag, and the
/// recipe kind.
///
/// Override rules:
/// - A mash fermentable in an extract recipe becomes a boil fermentable.
/// - A boil fermentable with the late flag becomes a boil-end fermentable.
/// - A steep fermentable in a partial mash or all grain recipe becomes a
///   mash fermentable.
pub fn fermentable_use(fermentable: &Fermentable, recipe_kind: Option<RecipeKind>) -> FermentableUse {
    let matched = base_use(&fermentable.name);

    let mash_in_extract_recipe =
        recipe_kind == Some(RecipeKind::Extract) && matched == FermentableUse::Mash;
    if mash_in_extract_recipe || matched == FermentableUse::Boil {
        return if fermentable.late {
            FermentableUse::BoilEnd
        } else {
            FermentableUse::Boil
        };
    }

    let steep_in_mash_recipe = matches!(
        recipe_kind,
        Some(RecipeKind::PartialMash) | Some(RecipeKind::AllGrain)
    ) && matched == FermentableUse::Steep;
    if steep_in_mash_recipe {
        return FermentableUse::Mash;
    }

    matched
}
