use serde::{Deserialize, Serialize};

/// Descriptive style bounds. Stored for reference only, never enforced
/// against the computed recipe values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub name: String,
    pub category: String,
    pub og: [f64; 2],
    pub fg: [f64; 2],
    pub ibu: [f64; 2],
    pub color: [f64; 2],
    pub abv: [f64; 2],
    pub carb: [f64; 2],
}

impl Default for Style {
    fn default() -> Self {
        Self {
            name: String::new(),
            category: String::new(),
            og: [1.0, 1.15],
            fg: [1.0, 1.15],
            ibu: [0.0, 150.0],
            color: [0.0, 500.0],
            abv: [0.0, 14.0],
            carb: [1.0, 4.0],
        }
    }
}
