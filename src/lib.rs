//! pogo-icons - Pokemon GO sprite icon set builder
//!
//! Turns the upstream species dataset into a canonical sprite mapping,
//! downloads and recompresses the matching sprites, and generates a CSS
//! stylesheet with one class per species and one alias per dex number.

pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod fetch;
pub mod mapping;
pub mod optimize;
pub mod output;
pub mod stylesheet;
pub mod validation;

pub use config::{FormCodeTable, Manifest, Project};
pub use dataset::{load_dataset, parse_dataset, DatasetSource};
pub use error::{PogoError, Result};
pub use fetch::{
    fetch_sprites, AssetSource, FetchReport, HttpAssetSource, MissingAssetRecord, Variant,
};
pub use mapping::{
    build_mapping, class_name, parse_name_and_form, MappingEntry, MappingOutput,
    RawSpeciesRecord,
};
pub use optimize::{optimize_sprites, OptimizeReport};
pub use stylesheet::{assemble, minify_css, Fragments, SheetMeta, Stylesheet};
pub use validation::{validate_mapping, Diagnostic, Severity, ValidationResult};
