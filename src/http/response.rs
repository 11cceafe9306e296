//! Response construction.
//!
//! The lookup endpoint always answers 200 with a bare text line, even
//! though it declares `application/json`. Existing clients depend on that.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

/// `200 OK` with `body` followed by a newline.
pub fn line(body: &str) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        format!("{body}\n"),
    )
        .into_response()
}
