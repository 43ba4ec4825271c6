use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YeastKind {
    #[default]
    Ale,
    Lager,
    Wheat,
    Wine,
    Champagne,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YeastForm {
    #[default]
    Liquid,
    Dry,
    Slant,
    Culture,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Yeast {
    pub name: String,
    pub kind: YeastKind,
    pub form: YeastForm,
    /// Percentage of available sugars this strain converts (0-100).
    pub attenuation: f64,
}

impl Default for Yeast {
    fn default() -> Self {
        Self {
            name: String::new(),
            kind: YeastKind::Ale,
            form: YeastForm::Liquid,
            attenuation: 75.0,
        }
    }
}

impl Yeast {
    /// Lab strains cost about twice what a dry sachet does.
    pub fn price(&self) -> f64 {
        let name = self.name.to_lowercase();
        if name.contains("wyeast") || name.contains("white labs") || name.contains("wlp") {
            7.0
        } else {
            3.5
        }
    }
}
