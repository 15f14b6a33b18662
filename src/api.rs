// API client module: a small blocking HTTP client for the movie
// recommendation server. The client owns the base URL and exposes one
// operation, `recommend`, mirroring the server's single endpoint.

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Blocking client for the recommendation server. Holds a reqwest client
/// and the base URL of the server.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

/// Request payload for the `/recommend` endpoint.
#[derive(Serialize, Debug)]
pub struct RecommendRequest<'a> {
    pub movie: &'a str,
}

/// One recommendation as returned by the server. `rating` and `year` are
/// display values the server may send as either JSON strings or numbers,
/// so they are kept as `serde_json::Value` and rendered via the `*_text`
/// helpers.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Recommendation {
    pub title: String,
    pub poster: String,
    pub rating: Value,
    pub year: Value,
    pub plot: String,
}

impl Recommendation {
    pub fn rating_text(&self) -> String {
        value_text(&self.rating)
    }

    pub fn year_text(&self) -> String {
        value_text(&self.year)
    }
}

/// Render a loosely-typed display field without JSON quoting.
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "N/A".into(),
        other => other.to_string(),
    }
}

/// Success body of `/recommend`. A missing `recommendations` key counts
/// as an empty list.
#[derive(Deserialize, Debug)]
pub struct RecommendResponse {
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
}

/// Error body the server may attach to a non-success status.
#[derive(Deserialize, Debug)]
pub struct ErrorBody {
    pub error: Option<String>,
}

/// Failure modes of a `recommend` call. The UI maps the two variants to
/// different user-facing messages, so they stay distinct here instead of
/// being collapsed into one error string.
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    /// The server answered with a non-success status. `message` carries
    /// the server-provided error text when the body held a parseable
    /// `{"error": ...}` payload.
    #[error("server rejected request with status {status}")]
    Rejected {
        status: StatusCode,
        message: Option<String>,
    },

    /// Network failure, or a success body that could not be decoded.
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ApiClient {
    /// Create an ApiClient configured from the environment variable
    /// `RECOMMENDER_URL`, or fallback to `http://localhost:5000`.
    pub fn from_env() -> Result<Self> {
        let base_url =
            std::env::var("RECOMMENDER_URL").unwrap_or_else(|_| "http://localhost:5000".into());
        Self::new(base_url)
    }

    /// Create an ApiClient pointing at an explicit base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(ApiClient {
            client,
            base_url: base_url.into(),
        })
    }

    /// Ask the server for movies similar to `movie` by POSTing to
    /// `/recommend`. Callers pass an already-trimmed, non-empty title;
    /// input validation happens in the UI layer before any request is
    /// issued.
    pub fn recommend(&self, movie: &str) -> Result<Vec<Recommendation>, ApiError> {
        let url = format!("{}/recommend", &self.base_url);
        log::debug!("POST {} movie={:?}", url, movie);

        let res = self
            .client
            .post(&url)
            .json(&RecommendRequest { movie })
            .send()?;

        if !res.status().is_success() {
            let status = res.status();
            // The server sends `{"error": ...}` for known rejections, but
            // other stacks in front of it may answer with anything.
            let body = res.text().unwrap_or_else(|_| "".into());
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.error);
            return Err(ApiError::Rejected { status, message });
        }

        let parsed: RecommendResponse = res.json()?;
        Ok(parsed.recommendations)
    }
}
