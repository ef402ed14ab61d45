//! Minimal client for the D&D 5e reference API.
//!
//! Covers the small slice of <https://www.dnd5eapi.co> the character
//! manager consumes: race documents and their racial ability bonuses.
//! The API is public, read-only, and unauthenticated.

use serde::{Deserialize, Serialize};
use thiserror::Error;

const API_BASE: &str = "https://www.dnd5eapi.co/api/2014";

/// Errors that can occur when talking to the reference API.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),
}

/// Reference API client.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
}

impl Client {
    /// Create a client against the public API.
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(10))
                .connect_timeout(std::time::Duration::from_secs(5))
                .build()
                .expect("Failed to build HTTP client"),
            base_url: API_BASE.to_string(),
        }
    }

    /// Point the client at a different base URL (useful for testing).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetch a race document by its API index (e.g. "elf").
    pub async fn race(&self, index: &str) -> Result<Race, Error> {
        self.get(&format!("races/{index}")).await
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, endpoint: &str) -> Result<T, Error> {
        let response = self
            .http
            .get(format!("{}/{endpoint}", self.base_url))
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api {
                status,
                message: body,
            });
        }

        response.json().await.map_err(|e| Error::Parse(e.to_string()))
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

/// A race document, trimmed to the fields the character manager uses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Race {
    pub index: String,
    pub name: String,
    #[serde(default)]
    pub speed: u32,
    #[serde(default)]
    pub ability_bonuses: Vec<AbilityBonus>,
}

/// A single racial ability bonus entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilityBonus {
    pub ability_score: AbilityScoreRef,
    pub bonus: i8,
}

/// Reference to an ability score, keyed by its three-letter index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilityScoreRef {
    pub index: String,
    #[serde(default)]
    pub name: String,
}
