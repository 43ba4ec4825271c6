// wf-core/src/units.rs

use uom::si::f64::{
    Mass as UomMass, ThermodynamicTemperature as UomThermodynamicTemperature,
    Volume as UomVolume,
};

// Public canonical unit types (SI, f64)
pub type Mass = UomMass;
pub type Temperature = UomThermodynamicTemperature;
pub type Volume = UomVolume;

#[inline]
pub fn kg(v: f64) -> Mass {
    use uom::si::mass::kilogram;
    Mass::new::<kilogram>(v)
}

#[inline]
pub fn liters(v: f64) -> Volume {
    use uom::si::volume::liter;
    Volume::new::<liter>(v)
}

#[inline]
pub fn celsius(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::degree_celsius;
    Temperature::new::<degree_celsius>(v)
}

/// Liters to US gallons. Gravity and color formulas are defined per gallon.
#[inline]
pub fn liters_to_gallons(l: f64) -> f64 {
    use uom::si::volume::gallon;
    liters(l).get::<gallon>()
}

/// Liters to US quarts, for imperial mash-water wording.
#[inline]
pub fn liters_to_quarts(l: f64) -> f64 {
    use uom::si::volume::quart_liquid;
    liters(l).get::<quart_liquid>()
}

/// Kilograms to pounds.
#[inline]
pub fn kg_to_lb(v: f64) -> f64 {
    use uom::si::mass::pound;
    kg(v).get::<pound>()
}

/// Kilograms to ounces.
#[inline]
pub fn kg_to_oz(v: f64) -> f64 {
    use uom::si::mass::ounce;
    kg(v).get::<ounce>()
}

/// Degrees Celsius to degrees Fahrenheit. The priming and keg-pressure
/// fits are published against Fahrenheit temperatures.
#[inline]
pub fn c_to_f(v: f64) -> f64 {
    use uom::si::thermodynamic_temperature::degree_fahrenheit;
    celsius(v).get::<degree_fahrenheit>()
}

/// Mash water ratio conversion: liters per kilogram to quarts per pound.
#[inline]
pub fn l_per_kg_to_qt_per_lb(v: f64) -> f64 {
    liters_to_quarts(v) / kg_to_lb(1.0)
}

/// Convert an extract yield percentage to points per pound per gallon.
#[inline]
pub fn yield_to_ppg(yield_percent: f64) -> f64 {
    yield_percent * 0.46214
}
