//! Brew-day timeline generation.
//!
//! A single linear pass over fixed phases, each a transition over a
//! carried brew state (elapsed minutes, liquid volume, temperature).
//! Phases with empty ingredient buckets are skipped. All numeric state is
//! metric; unit conversion happens only in the instruction strings.

use serde::{Deserialize, Serialize};
use wf_core::BrewConfig;
use wf_ingredients::MashStep;

use crate::calc::Calculated;
use crate::display::{
    display_duration, fermentable_list, spice_list, temp_string, volume_string,
};

/// Brew phase an instruction belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    Mash,
    Steep,
    TopUp,
    Boil,
    Chill,
    Yeast,
    Ferment,
    #[serde(rename = "dry hop")]
    DryHop,
    Bottle,
    Aging,
    Keg,
    Drink,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Mash => "mash",
            Phase::Steep => "steep",
            Phase::TopUp => "top-up",
            Phase::Boil => "boil",
            Phase::Chill => "chill",
            Phase::Yeast => "yeast",
            Phase::Ferment => "ferment",
            Phase::DryHop => "dry hop",
            Phase::Bottle => "bottle",
            Phase::Aging => "aging",
            Phase::Keg => "keg",
            Phase::Drink => "drink",
        };
        f.write_str(name)
    }
}

/// One timestamped instruction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    /// Minutes from the start of the brew day.
    pub time: f64,
    pub instructions: String,
    pub phase: Phase,
    /// Minutes until the next instruction; zero for the final entry.
    pub duration: f64,
}

/// Options for timeline generation.
#[derive(Clone, Copy, Debug)]
pub struct TimelineOptions {
    /// Metric wording when true, US units otherwise.
    pub si_units: bool,
    /// Bottle the batch; false kegs it instead.
    pub bottled: bool,
}

impl Default for TimelineOptions {
    fn default() -> Self {
        Self { si_units: true, bottled: true }
    }
}

const MINUTES_PER_DAY: f64 = 1440.0;

struct BrewState {
    time: f64,
    volume: f64,
    temp: f64,
}

struct Generator<'a> {
    calc: &'a Calculated,
    cfg: &'a BrewConfig,
    si: bool,
    state: BrewState,
    entries: Vec<TimelineEntry>,
}

impl<'a> Generator<'a> {
    fn push(&mut self, phase: Phase, instructions: String) {
        self.entries.push(TimelineEntry {
            time: self.state.time,
            instructions,
            phase,
            duration: 0.0,
        });
    }

    /// Heating never runs backwards; a target below the current
    /// temperature costs no burner time.
    fn heat_time(&self, liters: f64, delta_c: f64) -> f64 {
        self.cfg.time_to_heat_minutes(liters, delta_c.max(0.0))
    }

    fn mash_phase(&mut self) {
        let recipe = &self.calc.recipe;
        let mash = recipe.mash.clone().unwrap_or_default();
        let grain_kg = recipe.grain_weight_kg();

        let ingredients = fermentable_list(&self.calc.timeline_map.fermentables.mash, self.si);
        let begin = if mash.name.is_empty() {
            format!("Begin mash. Add {}.", ingredients.join(", "))
        } else {
            format!("Begin {} mash. Add {}.", mash.name, ingredients.join(", "))
        };
        self.push(Phase::Mash, begin);

        let steps = if mash.steps.is_empty() {
            vec![MashStep::default()]
        } else {
            mash.steps.clone()
        };

        for (index, step) in steps.iter().enumerate() {
            let strike_volume = step.water_ratio_l_per_kg * grain_kg - self.state.volume;

            if step.temp_c != self.state.temp && strike_volume > 0.0 {
                // Solve the infusion temperature the strike water needs so
                // the grain bed lands on the step's target
                let strike_temp = (step.temp_c - self.state.temp)
                    * (self.cfg.specific_heat_of_water / 10.0 * grain_kg)
                    / strike_volume
                    + step.temp_c;
                let heat_time = self.heat_time(strike_volume, strike_temp - self.state.temp);

                let volume_desc = if self.si {
                    format!("{strike_volume:.1}l")
                } else {
                    format!("{:.1}qts", wf_core::units::liters_to_quarts(strike_volume))
                };
                let temp_desc = if self.si {
                    format!("{strike_temp:.0}\u{b0}C")
                } else {
                    format!("{:.0}\u{b0}F", wf_core::units::c_to_f(strike_temp))
                };

                self.push(
                    Phase::Mash,
                    format!("Heat {volume_desc} to {temp_desc} (about {heat_time:.0} minutes)"),
                );
                self.state.volume += strike_volume;
                self.state.time += heat_time;
            } else if step.temp_c != self.state.temp {
                let heat_time = self.heat_time(self.state.volume, step.temp_c - self.state.temp);
                let temp_desc = temp_string(step.temp_c, self.si);
                self.push(
                    Phase::Mash,
                    format!("Heat the mash to {temp_desc} (about {heat_time:.0} minutes)"),
                );
                self.state.time += heat_time;
            }

            self.push(
                Phase::Mash,
                format!("{}: {}.", step.name, step.description(index, self.si, Some(grain_kg))),
            );
            self.state.time += step.time_min;
            self.state.temp =
                step.temp_c - step.time_min * self.cfg.mash_heat_loss_c_per_hour / 60.0;
        }

        self.push(
            Phase::Mash,
            "Remove the grains and drain into your kettle. This is now your wort.".into(),
        );
        self.state.time += 5.0;

        if self.state.volume < recipe.boil_size_l {
            let sparge_volume = (recipe.boil_size_l - self.state.volume).min(4.0);
            let instructions = format!(
                "Sparge the grain bed with {} of {} water.",
                volume_string(sparge_volume, self.si),
                temp_string(mash.sparge_temp_c, self.si),
            );
            self.push(Phase::Mash, instructions);
            self.state.volume += sparge_volume;
            self.state.time += 20.0;
        }
    }

    fn steep_phase(&mut self) {
        let recipe = &self.calc.recipe;
        let steep = &self.calc.timeline_map.fermentables.steep;
        let steep_weight: f64 = steep.iter().map(|f| f.fermentable.weight_kg).sum();

        // 2.75 l/kg, widened up to 4 l/kg to reach a workable 2 l minimum
        let natural = steep_weight * 2.75;
        let steep_volume = if natural < 2.0 { (steep_weight * 4.0).min(2.0) } else { natural };

        let heat_time = self.heat_time(steep_volume, 68.0 - self.state.temp);
        self.push(
            Phase::Steep,
            format!(
                "Heat {} to {} (about {heat_time:.0} minutes)",
                volume_string(steep_volume, self.si),
                temp_string(68.0, self.si),
            ),
        );
        self.state.temp = 68.0;
        self.state.volume += steep_volume;
        self.state.time += heat_time;

        let ingredients = fermentable_list(steep, self.si);
        self.push(
            Phase::Steep,
            format!(
                "Add {} to your grain socks and steep for {} minutes.",
                ingredients.join(", "),
                recipe.steep_time_min,
            ),
        );
        self.state.time += recipe.steep_time_min;

        self.push(
            Phase::Steep,
            "Remove the grain socks and let them drain into the wort.".into(),
        );
    }

    fn top_up_phase(&mut self, boil_name: &str) {
        let recipe = &self.calc.recipe;

        // Blend toward room temperature in proportion to the water that
        // still needs to be added
        let ratio = (self.state.volume / recipe.boil_size_l).min(1.0);
        self.state.temp = self.state.temp * ratio + self.cfg.room_temp_c * (1.0 - ratio);

        let boil_volume = volume_string(recipe.boil_size_l, self.si);
        let action = if self.state.volume > 0.0 {
            format!("Top up the {boil_name} to {boil_volume} and heat to a rolling boil")
        } else {
            format!("Bring {boil_volume} to a rolling boil")
        };

        let boil_time = self.heat_time(recipe.boil_size_l, 100.0 - self.state.temp);
        self.push(Phase::TopUp, format!("{action} (about {boil_time:.0} minutes)."));
        self.state.time += boil_time;
    }

    fn boil_phase(&mut self) {
        let map = &self.calc.timeline_map;
        let mut times: Vec<i64> = map.times.keys().copied().collect();

        // Late fermentables need a slot near the end of the boil even when
        // no spice addition happens then
        if !map.fermentables.boil_end.is_empty() && !times.contains(&5) {
            times.push(5);
        }
        times.sort_unstable_by(|a, b| b.cmp(a));

        if times.is_empty() {
            // No timed additions at all; boil fermentables still go in
            if !map.fermentables.boil.is_empty() {
                let ingredients = fermentable_list(&map.fermentables.boil, self.si);
                self.push(Phase::Boil, format!("Add {}", ingredients.join(", ")));
            }
            return;
        }

        let empty = Vec::new();
        let mut previous_time = 0;
        for (index, &time) in times.iter().enumerate() {
            let spices = map.times.get(&time).unwrap_or(&empty);
            let mut ingredients = spice_list(spices, self.si);

            if index == 0 {
                let mut boil_ingredients =
                    fermentable_list(&map.fermentables.boil, self.si);
                boil_ingredients.extend(ingredients);
                ingredients = boil_ingredients;
                previous_time = time;
            }

            self.state.time += (previous_time - time) as f64;
            previous_time = time;

            if time == 5 && !map.fermentables.boil_end.is_empty() {
                let mut late_ingredients =
                    fermentable_list(&map.fermentables.boil_end, self.si);
                late_ingredients.extend(ingredients);
                ingredients = late_ingredients;
            }

            self.push(Phase::Boil, format!("Add {}", ingredients.join(", ")));
        }

        // Run out the clock on the shortest addition
        self.state.time += previous_time as f64;
    }

    fn chill_phase(&mut self) {
        let chill_temp = temp_string(self.calc.recipe.primary_temp_c, self.si);
        self.push(
            Phase::Chill,
            format!(
                "Flame out. Begin chilling to {chill_temp} and aerate the cooled wort (about 20 minutes)."
            ),
        );
        self.state.time += 20.0;
    }

    fn yeast_phase(&mut self) {
        let recipe = &self.calc.recipe;
        let mut names: Vec<String> =
            self.calc.timeline_map.yeasts.iter().map(|y| y.name.clone()).collect();

        if names.is_empty() && recipe.primary_days > 0.0 {
            // No yeast given, but primary fermentation should happen.
            // Pitch a generic "yeast".
            names = vec!["yeast".into()];
        }

        if !names.is_empty() {
            self.push(
                Phase::Yeast,
                format!(
                    "Pitch {} and seal the fermenter. You should see bubbles in the airlock within 24 hours.",
                    names.join(", "),
                ),
            );
        }
    }

    fn ferment_phase(&mut self) {
        let recipe = &self.calc.recipe;

        let primary_days = if recipe.primary_days > 0.0 {
            recipe.primary_days
        } else {
            self.push(
                Phase::Ferment,
                "No primary fermentation length was given; fermenting for 14 days.".into(),
            );
            14.0
        };
        self.state.time += primary_days * MINUTES_PER_DAY;

        if recipe.secondary_days > 0.0 {
            self.push(
                Phase::Ferment,
                format!(
                    "Move to secondary fermenter for {}.",
                    display_duration(recipe.secondary_days * MINUTES_PER_DAY, Some(2)),
                ),
            );
            self.state.time += recipe.secondary_days * MINUTES_PER_DAY;
        }
        if recipe.tertiary_days > 0.0 {
            self.push(
                Phase::Ferment,
                format!(
                    "Move to tertiary fermenter for {}.",
                    display_duration(recipe.tertiary_days * MINUTES_PER_DAY, Some(2)),
                ),
            );
            self.state.time += recipe.tertiary_days * MINUTES_PER_DAY;
        }
    }

    fn dry_hop_phase(&mut self) {
        let map = &self.calc.timeline_map;
        let mut days: Vec<i64> = map.dry_spice.keys().copied().collect();
        days.sort_unstable_by(|a, b| b.cmp(a));

        // Same descending-gap walk as the boil, at day scale
        let mut previous_days = 0;
        for (index, &day) in days.iter().enumerate() {
            let ingredients = spice_list(&map.dry_spice[&day], self.si);

            if index == 0 {
                previous_days = day;
            }
            self.state.time += (previous_days - day) as f64 * MINUTES_PER_DAY;
            previous_days = day;

            self.push(Phase::DryHop, format!("Dry hop with {}.", ingredients.join(", ")));
        }
        self.state.time += previous_days as f64 * MINUTES_PER_DAY;
    }

    fn bottle_phase(&mut self) {
        let recipe = &self.calc.recipe;
        self.push(
            Phase::Bottle,
            format!("Prime and bottle about {} bottles.", recipe.bottle_count()),
        );

        if recipe.aging_days > 0.0 {
            self.push(
                Phase::Aging,
                format!(
                    "Age at {} for {} days.",
                    temp_string(recipe.aging_temp_c, self.si),
                    recipe.aging_days,
                ),
            );
            self.state.time += recipe.aging_days * MINUTES_PER_DAY;
        }
    }

    fn keg_phase(&mut self) {
        let psi = self.calc.keg_pressure_psi;
        let keg_temp = temp_string(self.calc.recipe.keg_temp_c, self.si);

        let steps = [
            "Depressurize the keg by pulling the pressure relief valve.",
            "Clean and sanitize the keg, lid, posts, and dip tubes.",
            "Siphon the beer into the keg, leaving the trub behind.",
            "Seal the keg lid.",
            "Attach the CO2 line to the gas-in post.",
            "Check the lid and posts for leaks with a little soapy water.",
            "Purge the headspace by pulling the relief valve a few times.",
        ];
        for step in steps {
            self.push(Phase::Keg, step.into());
        }

        self.push(
            Phase::Keg,
            format!(
                "Set the regulator to {psi:.1} psi at {keg_temp} and let the keg carbonate for 7 days."
            ),
        );
        self.state.time += 7.0 * MINUTES_PER_DAY;

        self.push(
            Phase::Keg,
            "Pour a taste. If carbonation is low, give it a few more days.".into(),
        );
    }

    fn drink_phase(&mut self) {
        self.push(Phase::Drink, "Relax, don't worry and have a homebrew!".into());
    }
}

/// Generate the ordered brew-day instruction list for a calculated recipe.
pub fn timeline(
    calc: &Calculated,
    cfg: &BrewConfig,
    options: &TimelineOptions,
) -> Vec<TimelineEntry> {
    let mut generator = Generator {
        calc,
        cfg,
        si: options.si_units,
        state: BrewState { time: 0.0, volume: 0.0, temp: cfg.room_temp_c },
        entries: Vec::new(),
    };

    let mut boil_name = "water";
    if !calc.timeline_map.fermentables.mash.is_empty() {
        boil_name = "wort";
        generator.mash_phase();
    }
    if !calc.timeline_map.fermentables.steep.is_empty() {
        boil_name = "wort";
        generator.steep_phase();
    }

    generator.top_up_phase(boil_name);
    generator.boil_phase();
    generator.chill_phase();
    generator.yeast_phase();
    generator.ferment_phase();
    generator.dry_hop_phase();
    if options.bottled {
        generator.bottle_phase();
    } else {
        generator.keg_phase();
    }
    generator.drink_phase();

    let mut entries = generator.entries;
    for index in 0..entries.len() {
        let next_time = entries.get(index + 1).map(|next| next.time);
        let entry = &mut entries[index];
        entry.duration = next_time.map_or(0.0, |t| t - entry.time);
    }
    entries
}
