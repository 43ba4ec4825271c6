//! wf-ingredients: typed ingredient records and their pure computations.
//!
//! Contains:
//! - fermentable (gravity contribution, pricing)
//! - classify (name-pattern classification rules + recipe-kind overrides)
//! - spice (hops and other additions: bitterness, utilization, dry detection)
//! - yeast
//! - mash (mash profile and ordered steps)
//! - style (descriptive style bounds)

pub mod classify;
pub mod fermentable;
pub mod mash;
pub mod spice;
pub mod style;
pub mod yeast;

pub use classify::{FermentableUse, RecipeKind, fermentable_use};
pub use fermentable::{Fermentable, FermentableKind};
pub use mash::{Mash, MashStep, MashStepKind};
pub use spice::{IbuMethod, Spice, SpiceForm, SpiceUse};
pub use style::Style;
pub use yeast::{Yeast, YeastForm, YeastKind};
