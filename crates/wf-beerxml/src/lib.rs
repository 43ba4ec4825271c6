//! wf-beerxml: BeerXML recipe import.
//!
//! XML parsing itself is left to the caller: the importer consumes the
//! document tree an XML front end produces (a [`serde_json::Value`] with
//! tag names as keys and repeated tags as arrays) and maps it onto
//! [`wf_recipe::Recipe`]. Unknown tags are ignored and missing values
//! keep their recipe defaults, because real-world BeerXML files are
//! rarely complete.

pub mod import;

pub use import::import_beerxml;

use wf_recipe::Recipe;

pub type ImportResult<T> = Result<T, ImportError>;

#[derive(thiserror::Error, Debug)]
pub enum ImportError {
    #[error("document root is not a mapping")]
    NotAMapping,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Load recipes from a JSON file holding an already-converted BeerXML
/// document tree.
pub fn load_json(path: &std::path::Path) -> ImportResult<Vec<Recipe>> {
    let content = std::fs::read_to_string(path)?;
    let document: serde_json::Value = serde_json::from_str(&content)?;
    import_beerxml(&document)
}
