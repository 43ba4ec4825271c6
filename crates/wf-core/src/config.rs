//! Injected brewing constants.
//!
//! Physical and process constants live in one immutable value that callers
//! pass to the calculation engine and timeline generator, so tests can run
//! with alternate constants (e.g. a weaker burner) without global state.

/// Process constants for a brew setup.
#[derive(Clone, Debug)]
pub struct BrewConfig {
    /// Ambient room temperature in °C.
    pub room_temp_c: f64,
    /// Energy output of the stovetop or gas burner in kilojoules per hour.
    /// The default corresponds to a large 2500 W stovetop burner.
    pub burner_energy_kj_per_hour: f64,
    /// Specific heat of water in kJ/(kg·K).
    pub specific_heat_of_water: f64,
    /// Average mash heat loss in °C per hour.
    pub mash_heat_loss_c_per_hour: f64,
}

impl Default for BrewConfig {
    fn default() -> Self {
        Self {
            room_temp_c: 23.0,
            burner_energy_kj_per_hour: 9000.0,
            specific_heat_of_water: 4.186,
            mash_heat_loss_c_per_hour: 5.0,
        }
    }
}

impl BrewConfig {
    /// Approximate time in whole minutes to change `liters` of water by
    /// `delta_c` degrees on the configured burner. Rounds up so heating
    /// steps are never scheduled shorter than the physics allows. Vessel
    /// losses are ignored; this is a deliberately crude estimate.
    pub fn time_to_heat_minutes(&self, liters: f64, delta_c: f64) -> f64 {
        let kj = self.specific_heat_of_water * liters * delta_c;
        (kj / self.burner_energy_kj_per_hour * 60.0).ceil()
    }
}

/// Friendly beer color names and the SRM value up to which they apply.
pub const COLOR_NAMES: &[(f64, &str)] = &[
    (2.0, "pale straw"),
    (3.0, "straw"),
    (4.0, "yellow"),
    (6.0, "gold"),
    (9.0, "amber"),
    (14.0, "deep amber"),
    (17.0, "copper"),
    (18.0, "deep copper"),
    (22.0, "brown"),
    (30.0, "dark brown"),
    (35.0, "very dark brown"),
    (40.0, "black"),
];

/// Friendly name for an SRM color value.
pub fn color_name(srm: f64) -> &'static str {
    for &(limit, name) in COLOR_NAMES {
        if srm <= limit {
            return name;
        }
    }
    "black"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heat_time_rounds_up() {
        let cfg = BrewConfig::default();
        // 4.186 * 10 * 80 / 9000 * 60 = 22.3 -> 23 minutes
        assert_eq!(cfg.time_to_heat_minutes(10.0, 80.0), 23.0);
        assert_eq!(cfg.time_to_heat_minutes(0.0, 50.0), 0.0);
    }

    #[test]
    fn weaker_burner_takes_longer() {
        let stock = BrewConfig::default();
        let weak = BrewConfig {
            burner_energy_kj_per_hour: 4500.0,
            ..BrewConfig::default()
        };
        assert!(
            weak.time_to_heat_minutes(10.0, 45.0) > stock.time_to_heat_minutes(10.0, 45.0)
        );
    }

    #[test]
    fn color_names_by_srm() {
        assert_eq!(color_name(1.0), "pale straw");
        assert_eq!(color_name(10.0), "deep amber");
        assert_eq!(color_name(75.0), "black");
    }
}
