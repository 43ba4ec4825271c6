//! Mash profile and ordered mash steps.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use wf_core::error::BrewError;
use wf_core::units::{c_to_f, kg_to_lb, l_per_kg_to_qt_per_lb};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MashStepKind {
    #[default]
    Infusion,
    Temperature,
    Decoction,
}

impl FromStr for MashStepKind {
    type Err = BrewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "infusion" => Ok(Self::Infusion),
            "temperature" => Ok(Self::Temperature),
            "decoction" => Ok(Self::Decoction),
            _ => Err(BrewError::UnknownMashStepType { kind: s.into() }),
        }
    }
}

/// One rest in the mash schedule. Steps are ordered; the order is the
/// brewing order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MashStep {
    pub name: String,
    pub kind: MashStepKind,
    pub time_min: f64,
    #[serde(default)]
    pub ramp_time_min: Option<f64>,
    /// Target rest temperature in °C.
    pub temp_c: f64,
    #[serde(default)]
    pub end_temp_c: Option<f64>,
    /// Liters of water per kilogram of grain.
    pub water_ratio_l_per_kg: f64,
}

impl Default for MashStep {
    fn default() -> Self {
        // Basic 60 minute single-infusion rest at 68C
        Self {
            name: "Saccharification".into(),
            kind: MashStepKind::Infusion,
            time_min: 60.0,
            ramp_time_min: None,
            temp_c: 68.0,
            end_temp_c: None,
            water_ratio_l_per_kg: 2.75,
        }
    }
}

fn temp_string(temp_c: f64, si_units: bool) -> String {
    if si_units {
        format!("{temp_c}°C")
    } else {
        format!("{:.0}°F", c_to_f(temp_c))
    }
}

fn water_amount(
    water_ratio: f64,
    absolute_units: &str,
    relative_units: &str,
    si_units: bool,
    total_grain_kg: Option<f64>,
) -> String {
    match total_grain_kg {
        Some(grain_kg) => {
            let grain = if si_units { grain_kg } else { kg_to_lb(grain_kg) };
            format!("{:.1}{absolute_units}", water_ratio * grain)
        }
        None => format!("{water_ratio:.1}{relative_units} of grain"),
    }
}

impl MashStep {
    /// Human-readable instruction for this step. The first infusion step is
    /// the initial strike, so it reads as a rest; later infusions add
    /// boiling water.
    pub fn description(&self, step_index: usize, si_units: bool, total_grain_kg: Option<f64>) -> String {
        let absolute_units = if si_units { "l" } else { "qt" };
        let relative_units = if si_units { "l per kg" } else { "qt per lb" };
        let temp = temp_string(self.temp_c, si_units);
        let ratio = if si_units {
            self.water_ratio_l_per_kg
        } else {
            l_per_kg_to_qt_per_lb(self.water_ratio_l_per_kg)
        };
        let amount = water_amount(ratio, absolute_units, relative_units, si_units, total_grain_kg);

        match self.kind {
            MashStepKind::Infusion if step_index == 0 => format!(
                "Allow your mash to rest at {temp} for {} minutes",
                self.time_min
            ),
            MashStepKind::Infusion => format!(
                "Add about {amount} of boiling water to your wort until the temperature reaches {temp}. Let sit for {} minutes",
                self.time_min
            ),
            MashStepKind::Temperature => format!(
                "Adjust your mash temperature to {temp} and hold for {} minutes",
                self.time_min
            ),
            MashStepKind::Decoction => format!(
                "Drain {amount} from your mash into a kettle and boil. Add back to mash to reach {temp} and hold for {} minutes",
                self.time_min
            ),
        }
    }
}

/// A mash profile: vessel-level metadata plus the ordered step schedule.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Mash {
    pub name: String,
    pub grain_temp_c: f64,
    pub sparge_temp_c: f64,
    #[serde(default)]
    pub ph: Option<f64>,
    /// Any notes useful for another brewer when mashing.
    #[serde(default)]
    pub notes: String,
    pub steps: Vec<MashStep>,
}

impl Default for Mash {
    fn default() -> Self {
        Self {
            name: String::new(),
            grain_temp_c: 23.0,
            sparge_temp_c: 76.0,
            ph: None,
            notes: String::new(),
            steps: Vec::new(),
        }
    }
}
