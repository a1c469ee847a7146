//! Suggestion providers.
//!
//! Wire contract: `POST` with `{dayIndex, date, context}` and a success body
//! of `{suggestions: [string]}`. Anything else is a `SuggestionError`.

use crate::model::itinerary::Itinerary;
use log::{debug, warn};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{Duration, Instant};
use url::Url;

pub const DEFAULT_SUGGESTION_TIMEOUT: Duration = Duration::from_secs(10);

pub type SuggestionResult<T> = Result<T, SuggestionError>;

/// Reasons the suggestion service is considered unavailable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionError {
    /// No service is configured.
    Unavailable,
    InvalidEndpoint(String),
    Transport(String),
    /// Non-success HTTP status.
    Status(u16),
    /// Body is not `{suggestions: [string]}`.
    MalformedBody(String),
}

impl Display for SuggestionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable => write!(f, "no suggestion service configured"),
            Self::InvalidEndpoint(message) => {
                write!(f, "invalid suggestion endpoint: {message}")
            }
            Self::Transport(message) => write!(f, "suggestion request failed: {message}"),
            Self::Status(code) => write!(f, "suggestion service answered with status {code}"),
            Self::MalformedBody(message) => {
                write!(f, "suggestion response has unexpected shape: {message}")
            }
        }
    }
}

impl Error for SuggestionError {}

impl From<reqwest::Error> for SuggestionError {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport(value.to_string())
    }
}

/// Request sent to a suggestion service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionRequest {
    pub day_index: usize,
    /// Day label, or `Day {index+1}` when the label is empty.
    pub date: String,
    /// Full itinerary snapshot at request time.
    pub context: Itinerary,
}

#[derive(Debug, Deserialize)]
struct SuggestionBody {
    suggestions: Vec<String>,
}

/// Source of activity-title suggestions.
pub trait SuggestionProvider {
    fn suggest(&self, request: &SuggestionRequest) -> SuggestionResult<Vec<String>>;
}

/// Provider used when no service is configured; always unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredProvider;

impl SuggestionProvider for UnconfiguredProvider {
    fn suggest(&self, _request: &SuggestionRequest) -> SuggestionResult<Vec<String>> {
        Err(SuggestionError::Unavailable)
    }
}

/// Blocking HTTP provider posting JSON to a fixed endpoint.
pub struct HttpSuggestionProvider {
    client: Client,
    endpoint: Url,
}

impl HttpSuggestionProvider {
    pub fn new(endpoint: &str, timeout: Duration) -> SuggestionResult<Self> {
        let endpoint = Url::parse(endpoint.trim())
            .map_err(|err| SuggestionError::InvalidEndpoint(err.to_string()))?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }
}

impl SuggestionProvider for HttpSuggestionProvider {
    fn suggest(&self, request: &SuggestionRequest) -> SuggestionResult<Vec<String>> {
        let started_at = Instant::now();
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .inspect_err(|err| {
                warn!(
                    "event=suggest_request module=suggest status=error duration_ms={} error={err}",
                    started_at.elapsed().as_millis()
                );
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(
                "event=suggest_request module=suggest status=error duration_ms={} http_status={}",
                started_at.elapsed().as_millis(),
                status.as_u16()
            );
            return Err(SuggestionError::Status(status.as_u16()));
        }

        let suggestions = parse_suggestion_body(&response.text()?)?;
        debug!(
            "event=suggest_request module=suggest status=ok duration_ms={} count={}",
            started_at.elapsed().as_millis(),
            suggestions.len()
        );
        Ok(suggestions)
    }
}

/// Decodes a success body into suggestion titles.
pub fn parse_suggestion_body(body: &str) -> SuggestionResult<Vec<String>> {
    serde_json::from_str::<SuggestionBody>(body)
        .map(|body| body.suggestions)
        .map_err(|err| SuggestionError::MalformedBody(err.to_string()))
}
