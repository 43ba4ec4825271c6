//! Priming sugar and keg pressure fits.
//!
//! Both are fitted polynomials from an established brewing reference,
//! defined over Fahrenheit temperatures and volumes of CO2.

/// Keg regulator pressure in PSI for a keg temperature (°F) and a target
/// carbonation level in volumes of CO2. Clamped at zero; cold kegs at low
/// carbonation need no applied pressure.
pub fn keg_pressure_psi(temp_f: f64, volumes: f64) -> f64 {
    let psi = -16.6999 - 0.0101059 * temp_f + 0.00116512 * temp_f * temp_f
        + 0.173354 * temp_f * volumes
        + 4.24267 * volumes
        - 0.0684226 * volumes * volumes;
    psi.max(0.0)
}

/// Corn sugar in kg needed to prime a 5-gallon-equivalent batch to the
/// target volumes of CO2 at the given bottling temperature (°F).
pub fn priming_corn_sugar_kg(temp_f: f64, volumes: f64) -> f64 {
    0.015195 * 5.0 * (volumes - 3.0378 + 0.050062 * temp_f - 0.00026555 * temp_f * temp_f)
}

/// Table sugar equivalent of the corn sugar amount.
pub fn priming_sugar_kg(corn_sugar_kg: f64) -> f64 {
    corn_sugar_kg * 0.90995
}

/// Honey equivalent of the corn sugar amount.
pub fn priming_honey_kg(corn_sugar_kg: f64) -> f64 {
    corn_sugar_kg * 1.22496
}

/// Dry malt extract equivalent of the corn sugar amount.
pub fn priming_dme_kg(corn_sugar_kg: f64) -> f64 {
    corn_sugar_kg * 1.33249
}
