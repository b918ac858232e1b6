//! Upstream species dataset loading.
//!
//! The dataset comes either from a URL (the PvPoke gamemaster by default)
//! or from a local JSON file. Any failure here is fatal for the mapping
//! step.

use std::path::Path;

use crate::error::{PogoError, Result};
use crate::mapping::RawSpeciesRecord;

/// Where to read the species list from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    Url(String),
    File(std::path::PathBuf),
}

impl DatasetSource {
    /// Interpret a CLI value: anything with an http(s) scheme is a URL.
    pub fn parse(value: &str) -> Self {
        if value.starts_with("http://") || value.starts_with("https://") {
            DatasetSource::Url(value.to_string())
        } else {
            DatasetSource::File(value.into())
        }
    }
}

impl std::fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetSource::Url(url) => write!(f, "{url}"),
            DatasetSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Load the species list.
pub async fn load_dataset(source: &DatasetSource) -> Result<Vec<RawSpeciesRecord>> {
    match source {
        DatasetSource::Url(url) => fetch_dataset(url).await,
        DatasetSource::File(path) => read_dataset(path).await,
    }
}

async fn fetch_dataset(url: &str) -> Result<Vec<RawSpeciesRecord>> {
    let response = reqwest::get(url).await.map_err(|e| PogoError::Network {
        message: format!("Failed to fetch dataset from {}: {}", url, e),
        help: Some("Check your connection or pass --dataset with a local file".to_string()),
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(PogoError::Network {
            message: format!("Failed to fetch dataset: HTTP {}", status.as_u16()),
            help: Some(format!("Upstream URL: {}", url)),
        });
    }

    let body = response.text().await.map_err(|e| PogoError::Network {
        message: format!("Failed to read dataset body: {}", e),
        help: None,
    })?;

    parse_dataset(&body)
}

async fn read_dataset(path: &Path) -> Result<Vec<RawSpeciesRecord>> {
    let body = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| PogoError::Config {
            message: format!("Failed to read dataset {}: {}", path.display(), e),
            help: None,
        })?;

    parse_dataset(&body)
}

/// Parse the upstream JSON array.
pub fn parse_dataset(body: &str) -> Result<Vec<RawSpeciesRecord>> {
    serde_json::from_str(body).map_err(|e| PogoError::Parse {
        message: format!("Invalid species dataset: {}", e),
        help: Some("Expected a JSON array of objects with speciesName, dex, speciesId".to_string()),
    })
}
