//! Recommender client with deadline and failure classification.
//!
//! # Responsibilities
//! - Build the `find` request for an identifier
//! - Bound the call by the caller's deadline
//! - Classify every failure into a single [`ResolveError`]

use std::time::{Duration, Instant};

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Response};
use tokio::time::timeout;
use url::Url;

use crate::observability::metrics;
use crate::upstream::types::{Resolution, ResolveError, ResolvedValue, UpstreamAnswer};

const JSON_UTF8: &str = "application/json; charset=utf-8";

/// Largest answer body accepted from the recommender.
pub const MAX_ANSWER_BYTES: usize = 64 * 1024;

/// Resolves identifiers against the recommender service.
///
/// Cheap to share: the inner [`Client`] is a handle to one connection
/// pool.
#[derive(Debug, Clone)]
pub struct UpstreamResolver {
    client: Client,
    find_url: Url,
    body_limit: usize,
}

impl UpstreamResolver {
    /// Create a resolver for the recommender at `base_url`.
    pub fn new(client: Client, base_url: &Url) -> Self {
        Self {
            client,
            find_url: find_endpoint(base_url),
            body_limit: MAX_ANSWER_BYTES,
        }
    }

    /// Override the answer size limit.
    pub fn with_body_limit(mut self, limit: usize) -> Self {
        self.body_limit = limit;
        self
    }

    /// The outbound URL for `identifier`.
    pub fn find_url(&self, identifier: &str) -> Url {
        let mut url = self.find_url.clone();
        url.query_pairs_mut().append_pair("id", identifier);
        url
    }

    /// Look up `identifier`, giving up after `deadline`.
    ///
    /// The returned value is the recommender's result on success and the
    /// fallback token otherwise.
    pub async fn resolve(&self, identifier: &str, deadline: Duration) -> Resolution {
        let start = Instant::now();

        let result = match timeout(deadline, self.fetch(identifier, deadline)).await {
            Ok(result) => result,
            Err(_) => Err(ResolveError::Timeout(deadline)),
        };

        let resolution = Resolution::from(result);
        metrics::record_resolution(resolution.outcome(), start);
        resolution
    }

    async fn fetch(
        &self,
        identifier: &str,
        deadline: Duration,
    ) -> Result<ResolvedValue, ResolveError> {
        let url = self.find_url(identifier);
        tracing::debug!(url = %url, "Querying recommender");

        let response = self
            .client
            .get(url)
            .header(CONTENT_TYPE, JSON_UTF8)
            .header(ACCEPT, JSON_UTF8)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ResolveError::Timeout(deadline)
                } else {
                    ResolveError::Transport(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ResolveError::UpstreamStatus(status.as_u16()));
        }

        let body = self.read_body(response).await?;
        let answer: UpstreamAnswer =
            serde_json::from_slice(&body).map_err(ResolveError::Decode)?;

        ResolvedValue::new(answer.result).ok_or(ResolveError::EmptyResult)
    }

    /// Buffer the body, refusing anything over `body_limit`.
    async fn read_body(&self, mut response: Response) -> Result<Vec<u8>, ResolveError> {
        let limit = self.body_limit;
        if response
            .content_length()
            .is_some_and(|len| len > limit as u64)
        {
            return Err(ResolveError::BodyTooLarge(limit));
        }

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await.map_err(ResolveError::BodyRead)? {
            if body.len() + chunk.len() > limit {
                return Err(ResolveError::BodyTooLarge(limit));
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }
}

/// `{base}/find`, tolerating a trailing slash on the base path.
fn find_endpoint(base_url: &Url) -> Url {
    let mut url = base_url.clone();
    url.set_query(None);
    url.set_fragment(None);
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().push("find");
    }
    url
}
