//! Label rendering endpoint.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::{Extension, Path},
    response::{IntoResponse, Response},
};
use label_common::RenderOptions;
use metrics::{counter, histogram};
use tracing::instrument;

use crate::error::ApiResult;
use crate::pipeline;
use crate::state::AppState;

/// POST /render/:width/:height/:dpmm - Render the first label in the body
#[instrument(skip(state, body))]
pub async fn render_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path((width, height, dpmm)): Path<(String, String, String)>,
    body: Body,
) -> Response {
    let start = Instant::now();
    let result = render(&state, &width, &height, &dpmm, body).await;
    histogram!("label_render_duration_seconds").record(start.elapsed().as_secs_f64());

    match result {
        Ok(png) => {
            counter!("label_render_requests_total", "outcome" => "success").increment(1);
            pipeline::png_response(png)
        }
        Err(err) => {
            counter!("label_render_requests_total", "outcome" => err.kind()).increment(1);
            err.into_response()
        }
    }
}

async fn render(
    state: &AppState,
    width: &str,
    height: &str,
    dpmm: &str,
    body: Body,
) -> ApiResult<Vec<u8>> {
    let (width_mm, height_mm, dpmm) = pipeline::validate(width, height, dpmm)?;
    let markup = pipeline::acquire_payload(body).await?;
    let labels = pipeline::parse_labels(state.parser.clone(), markup).await?;

    let options = RenderOptions::from_geometry(width_mm, height_mm, dpmm);
    pipeline::render_first_label(state.rasterizer.clone(), labels, options).await
}
