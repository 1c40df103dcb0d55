//! Steps of a render request, in the order they run.
//!
//! Parsing and rasterizing are CPU bound and run on the blocking pool so a
//! large label never stalls other connections.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use label_common::{
    LabelDocument, MarkupParser, ParseError, Rasterizer, RenderError, RenderOptions,
};
use tracing::{debug, info};

use crate::error::{ApiError, ApiResult};

/// Parse one geometry path segment as a signed base-10 integer.
///
/// Zero and negative values pass; the rasterizer decides what it can draw.
pub fn parse_dimension(name: &'static str, raw: &str) -> ApiResult<i64> {
    raw.parse::<i64>()
        .map_err(|_| ApiError::InvalidParameter(name))
}

/// Validate all three geometry segments, reporting the first bad one.
pub fn validate(width: &str, height: &str, dpmm: &str) -> ApiResult<(i64, i64, i64)> {
    Ok((
        parse_dimension("width", width)?,
        parse_dimension("height", height)?,
        parse_dimension("dpmm", dpmm)?,
    ))
}

/// Read the whole request body. No size cap is applied.
pub async fn acquire_payload(body: Body) -> ApiResult<Bytes> {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .map_err(|e| ApiError::BodyReadError(e.to_string()))?;

    if bytes.is_empty() {
        return Err(ApiError::EmptyPayload);
    }
    Ok(bytes)
}

/// Parse the markup into label documents; at least one is required.
pub async fn parse_labels(
    parser: Arc<dyn MarkupParser>,
    markup: Bytes,
) -> ApiResult<Vec<LabelDocument>> {
    let labels = tokio::task::spawn_blocking(move || parser.parse(&markup))
        .await
        .map_err(|e| ParseError::Internal(e.to_string()))??;

    if labels.is_empty() {
        return Err(ApiError::NoLabelsFound);
    }
    Ok(labels)
}

/// Render the first label; any further labels are ignored.
pub async fn render_first_label(
    rasterizer: Arc<dyn Rasterizer>,
    mut labels: Vec<LabelDocument>,
    options: RenderOptions,
) -> ApiResult<Vec<u8>> {
    if labels.len() > 1 {
        debug!(ignored = labels.len() - 1, "Rendering first label only");
    }
    labels.truncate(1);
    let label = labels.pop().ok_or(ApiError::NoLabelsFound)?;

    let png = tokio::task::spawn_blocking(move || rasterizer.render_png(&label, &options))
        .await
        .map_err(|e| RenderError::Internal(e.to_string()))??;

    Ok(png)
}

/// Successful response carrying the PNG bytes.
pub fn png_response(png: Vec<u8>) -> Response {
    info!(bytes = png.len(), "Rendered label to PNG");

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("image/png")),
            (header::CONTENT_LENGTH, HeaderValue::from(png.len())),
            (
                header::CACHE_CONTROL,
                HeaderValue::from_static("no-cache, no-store, must-revalidate"),
            ),
        ],
        png,
    )
        .into_response()
}
