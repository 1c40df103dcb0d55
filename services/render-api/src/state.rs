//! Application state shared by all handlers.

use std::sync::Arc;

use label_common::{MarkupParser, Rasterizer};
use label_renderer::LabelRenderer;
use metrics_exporter_prometheus::PrometheusHandle;
use zpl_parser::ZplParser;

/// Immutable state built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub parser: Arc<dyn MarkupParser>,
    pub rasterizer: Arc<dyn Rasterizer>,
    /// Present when a Prometheus recorder is installed.
    pub prometheus: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(parser: Arc<dyn MarkupParser>, rasterizer: Arc<dyn Rasterizer>) -> Self {
        Self {
            parser,
            rasterizer,
            prometheus: None,
        }
    }

    /// ZPL parser with the built-in rasterizer.
    pub fn zpl() -> Self {
        Self::new(Arc::new(ZplParser::new()), Arc::new(LabelRenderer::new()))
    }

    pub fn with_prometheus(mut self, handle: PrometheusHandle) -> Self {
        self.prometheus = Some(handle);
        self
    }
}
