//! TMDB v3 HTTP client

use crate::config::Config;
use crate::error::{Error, Result};
use crate::tmdb::MediaKind;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

/// Public TMDB v3 endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the handful of TMDB endpoints the metadata layout needs
#[derive(Debug, Clone)]
pub struct TmdbClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    language: String,
}

impl TmdbClient {
    /// Build a client from configuration (API key, language, proxy)
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut builder = reqwest::Client::builder().timeout(REQUEST_TIMEOUT);
        if let Some(proxy) = config.proxy_url() {
            info!("Using proxy {proxy}");
            builder = builder.proxy(reqwest::Proxy::all(proxy)?);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: config.api_key()?.to_string(),
            language: config.language.clone(),
        })
    }

    /// Point the client at another base URL (tests, mirrors)
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// GET `endpoint` with the key and language attached
    pub async fn get(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Value> {
        debug!("GET {endpoint}");

        let response = self
            .http
            .get(format!("{}{endpoint}", self.base_url))
            .query(&[("api_key", self.api_key.as_str()), ("language", self.language.as_str())])
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::TmdbApi {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }

    /// Full record for a movie or TV show
    pub async fn details(&self, kind: MediaKind, id: &str) -> Result<Value> {
        let endpoint = format!("/{}/{id}", kind.path());
        self.get(&endpoint, &[("append_to_response", kind.appended_responses())])
            .await
    }

    /// Release dates (movies) or content ratings (TV)
    pub async fn ratings(&self, kind: MediaKind, id: &str) -> Result<Value> {
        let endpoint = format!("/{}/{id}/{}", kind.path(), kind.ratings_endpoint());
        self.get(&endpoint, &[]).await
    }
}
