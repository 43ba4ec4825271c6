//! wf-recipe: the recipe aggregate, the calculation engine, and the
//! brew-day timeline generator.
//!
//! Data flows one way: a raw [`Recipe`] goes through [`calculate`] to
//! produce a [`Calculated`] record with every derived property and the
//! timeline map populated, and the [`timeline`] generator turns that into
//! an ordered list of timestamped instructions.

pub mod calc;
pub mod carbonation;
pub mod display;
pub mod recipe;
pub mod timeline;

pub use calc::{Calculated, TimelineFermentable, TimelineMap, TimelineSpice, calculate};
pub use recipe::Recipe;
pub use timeline::{Phase, TimelineEntry, TimelineOptions, timeline};
