//! Remote sprite sources.

use crate::error::{PogoError, Result};

/// What the remote answered for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResponse {
    /// File body.
    Found(Vec<u8>),
    /// HTTP 404.
    NotFound,
    /// Any other non-success status.
    Status(u16),
}

/// A place sprites are downloaded from, addressed by filename only.
///
/// An `Err` is a transport failure (connection, TLS, body read); HTTP
/// statuses are reported through [`FetchResponse`].
#[allow(async_fn_in_trait)]
pub trait AssetSource {
    /// Location of a file, for messages.
    fn url_for(&self, file: &str) -> String;

    async fn get(&self, file: &str) -> Result<FetchResponse>;
}

/// Plain HTTP GET against a base URL.
#[derive(Debug, Clone)]
pub struct HttpAssetSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAssetSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

impl AssetSource for HttpAssetSource {
    fn url_for(&self, file: &str) -> String {
        format!("{}/{}", self.base_url, file)
    }

    async fn get(&self, file: &str) -> Result<FetchResponse> {
        let response = self
            .client
            .get(self.url_for(file))
            .send()
            .await
            .map_err(network_error)?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(FetchResponse::NotFound);
        }
        if !status.is_success() {
            return Ok(FetchResponse::Status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(network_error)?;
        Ok(FetchResponse::Found(body.to_vec()))
    }
}

fn network_error(e: reqwest::Error) -> PogoError {
    PogoError::Network {
        message: e.to_string(),
        help: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_for_joins_base_and_file() {
        let source = HttpAssetSource::new("https://example.com/assets/");
        assert_eq!(
            source.url_for("pm25.cLIBRE.icon.png"),
            "https://example.com/assets/pm25.cLIBRE.icon.png"
        );
    }
}
