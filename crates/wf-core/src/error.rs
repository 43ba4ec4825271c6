use thiserror::Error;

pub type BrewResult<T> = Result<T, BrewError>;

#[derive(Error, Debug)]
pub enum BrewError {
    #[error("Unknown IBU method '{method}'")]
    UnknownIbuMethod { method: String },

    #[error("Unknown spice use '{use_}'")]
    UnknownSpiceUse { use_: String },

    #[error("Unknown mash step type '{kind}'")]
    UnknownMashStepType { kind: String },

    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },
}
