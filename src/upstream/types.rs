//! Lookup result types and error definitions.

use std::fmt;
use std::time::Duration;

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Token returned whenever no usable answer is available.
pub const FALLBACK: &str = "default";

/// Body returned by the recommender's `find` endpoint.
///
/// Field names match `Id` and `Result` in any ASCII casing. Missing or
/// `null` fields stay empty and unknown fields are ignored. The echoed
/// `Id` is not checked against the request.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(try_from = "Map<String, Value>")]
pub struct UpstreamAnswer {
    pub id: String,
    pub result: String,
}

impl TryFrom<Map<String, Value>> for UpstreamAnswer {
    type Error = String;

    fn try_from(fields: Map<String, Value>) -> Result<Self, Self::Error> {
        let mut answer = Self::default();
        for (key, value) in fields {
            let slot = if key.eq_ignore_ascii_case("id") {
                &mut answer.id
            } else if key.eq_ignore_ascii_case("result") {
                &mut answer.result
            } else {
                continue;
            };
            match value {
                Value::String(s) => *slot = s,
                Value::Null => {}
                other => return Err(format!("field `{key}` must be a string, got {other}")),
            }
        }
        Ok(answer)
    }
}

/// Value written back to the caller. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedValue(String);

impl ResolvedValue {
    /// Wrap a recommender result; `None` if it is empty.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.is_empty() {
            None
        } else {
            Some(Self(value))
        }
    }

    /// The fallback token.
    pub fn fallback() -> Self {
        Self(FALLBACK.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_fallback(&self) -> bool {
        self.0 == FALLBACK
    }
}

impl fmt::Display for ResolvedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Why a lookup fell back. Exactly one applies per call.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// No response within the deadline.
    #[error("recommender did not answer within {0:?}")]
    Timeout(Duration),

    /// Connection refused, DNS failure and the like.
    #[error("recommender request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// Status outside [200, 300).
    #[error("unexpected recommender status code: {0}")]
    UpstreamStatus(u16),

    /// The response body could not be read.
    #[error("failed to read recommender response body: {0}")]
    BodyRead(#[source] reqwest::Error),

    /// The response body exceeds the size limit.
    #[error("recommender response body exceeds {0} bytes")]
    BodyTooLarge(usize),

    /// The body is not a valid answer.
    #[error("failed to decode recommender answer: {0}")]
    Decode(#[source] serde_json::Error),

    /// The answer decoded but carries no result.
    #[error("recommender answer has an empty result")]
    EmptyResult,
}

impl ResolveError {
    /// Short label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ResolveError::Timeout(_) => "timeout",
            ResolveError::Transport(_) => "transport",
            ResolveError::UpstreamStatus(_) => "upstream_status",
            ResolveError::BodyRead(_) => "body_read",
            ResolveError::BodyTooLarge(_) => "body_too_large",
            ResolveError::Decode(_) => "decode",
            ResolveError::EmptyResult => "empty_result",
        }
    }
}

/// Outcome of one lookup: always a value, plus the error when it is the
/// fallback.
#[derive(Debug)]
pub struct Resolution {
    pub value: ResolvedValue,
    pub error: Option<ResolveError>,
}

impl Resolution {
    pub fn outcome(&self) -> &'static str {
        self.error.as_ref().map_or("ok", ResolveError::kind)
    }
}

impl From<Result<ResolvedValue, ResolveError>> for Resolution {
    fn from(result: Result<ResolvedValue, ResolveError>) -> Self {
        match result {
            Ok(value) => Self { value, error: None },
            Err(error) => Self {
                value: ResolvedValue::fallback(),
                error: Some(error),
            },
        }
    }
}
