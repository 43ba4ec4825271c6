//! Unit-aware display formatting for timeline instructions.
//!
//! All numeric computation elsewhere stays metric; only these strings
//! convert to imperial units when asked.

use wf_core::numeric::is_whole;
use wf_core::units::{c_to_f, kg_to_lb, kg_to_oz, liters_to_gallons};

use crate::calc::{TimelineFermentable, TimelineSpice};

/// Human-readable duration built from month/week/day/hour/minute parts,
/// e.g. "1 week 2 days". `approximate` limits the number of parts and
/// rounds the last one. Zero minutes reads as "start".
pub fn display_duration(minutes: f64, approximate: Option<usize>) -> String {
    const FACTORS: [(&str, f64); 5] = [
        ("month", 30.0 * 60.0 * 24.0),
        ("week", 7.0 * 60.0 * 24.0),
        ("day", 60.0 * 24.0),
        ("hour", 60.0),
        ("minute", 1.0),
    ];

    let mut durations: Vec<String> = Vec::new();
    let mut remaining = minutes;
    let mut count = 0;

    for (label, factor) in FACTORS {
        let amount = if factor == 1.0 || approximate.is_some_and(|a| count + 1 == a) {
            // Round the last visible part instead of truncating it
            (remaining / factor).round()
        } else {
            (remaining / factor).floor()
        };

        remaining %= factor;

        if amount > 0.0 || count > 0 {
            count += 1;
        }

        if approximate.is_none_or(|a| count <= a) && amount > 0.0 {
            let plural = if amount as i64 != 1 { "s" } else { "" };
            durations.push(format!("{amount} {label}{plural}"));
        }
    }

    if durations.is_empty() {
        return "start".into();
    }
    durations.join(" ")
}

/// Weight in pounds and ounces, e.g. "2lb 3oz" or "8oz".
pub fn kg_to_lb_oz(kg: f64) -> String {
    let lbs = kg_to_lb(kg).floor();
    let oz = (kg_to_oz(kg) % 16.0).round();
    if lbs > 0.0 {
        format!("{lbs:.0}lb {oz:.0}oz")
    } else {
        format!("{oz:.0}oz")
    }
}

/// Spice weights display in grams; trim the decimal when it is whole.
fn grams(kg: f64) -> String {
    let g = kg * 1000.0;
    if is_whole(g) {
        format!("{:.0}g", g.round())
    } else {
        format!("{g:.1}g")
    }
}

pub fn volume_string(liters: f64, si_units: bool) -> String {
    if si_units {
        format!("{liters:.1}l")
    } else {
        format!("{:.1}gal", liters_to_gallons(liters))
    }
}

pub fn temp_string(temp_c: f64, si_units: bool) -> String {
    if si_units {
        format!("{}\u{b0}C", round_trim(temp_c))
    } else {
        format!("{:.0}\u{b0}F", c_to_f(temp_c))
    }
}

fn round_trim(v: f64) -> String {
    if is_whole(v) {
        format!("{:.0}", v.round())
    } else {
        format!("{v:.1}")
    }
}

/// Fermentable descriptions with their gravity contributions.
pub fn fermentable_list(items: &[TimelineFermentable], si_units: bool) -> Vec<String> {
    items
        .iter()
        .map(|TimelineFermentable { fermentable, gravity }| {
            let weight = if si_units {
                format!("{:.2}kg", fermentable.weight_kg)
            } else {
                kg_to_lb_oz(fermentable.weight_kg)
            };
            format!("{weight} of {} ({gravity:.1} GU)", fermentable.name)
        })
        .collect()
}

/// Spice descriptions with their bitterness contributions when non-zero.
pub fn spice_list(items: &[TimelineSpice], si_units: bool) -> Vec<String> {
    items
        .iter()
        .map(|TimelineSpice { spice, bitterness }| {
            let weight = if si_units { grams(spice.weight_kg) } else { kg_to_lb_oz(spice.weight_kg) };
            let ibu = if *bitterness > 0.0 {
                format!(" ({bitterness:.1} IBU)")
            } else {
                String::new()
            };
            format!("{weight} of {}{ibu}", spice.name)
        })
        .collect()
}
