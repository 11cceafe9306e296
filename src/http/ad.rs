//! The `GET /ad` lookup handler.

use axum::extract::{RawQuery, State};
use axum::http::HeaderMap;
use axum::response::Response;

use crate::http::request::request_id;
use crate::http::response;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::upstream::{ResolvedValue, RESOLVE_DEADLINE};

/// Inbound lookup parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupRequest {
    pub id: Option<String>,
}

impl LookupRequest {
    /// Parse a raw query string. The first `id` wins; anything malformed
    /// is ignored.
    pub fn from_query(query: Option<&str>) -> Self {
        let id = query.and_then(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .find(|(key, _)| key == "id")
                .map(|(_, value)| value.into_owned())
        });
        Self { id }
    }

    /// The identifier to look up, if there is one.
    pub fn identifier(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }
}

/// Answer a lookup. Always 200; the body is the recommender's result or
/// the fallback token.
pub async fn serve_ad(
    State(state): State<AppState>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Response {
    let request = LookupRequest::from_query(query.as_deref());

    let Some(id) = request.identifier() else {
        metrics::record_short_circuit();
        return response::line(ResolvedValue::fallback().as_str());
    };

    let resolution = state.resolver.resolve(id, RESOLVE_DEADLINE).await;
    if let Some(error) = &resolution.error {
        tracing::warn!(
            request_id = %request_id(&headers),
            id = %id,
            kind = error.kind(),
            error = %error,
            "Recommender lookup failed"
        );
    }

    response::line(resolution.value.as_str())
}
