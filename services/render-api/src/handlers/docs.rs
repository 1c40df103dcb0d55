//! API documentation handlers - Swagger UI and OpenAPI spec.

use axum::{
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};

/// OpenAPI 3.0 specification YAML content
const OPENAPI_YAML: &str = include_str!("../../../../docs/api/openapi.yaml");

/// Swagger UI HTML template
const SWAGGER_UI_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Label Render API Documentation</title>
    <link rel="stylesheet" type="text/css" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css">
    <style>
        body { margin: 0; background: #fafafa; }
        .swagger-ui .topbar { display: none; }
    </style>
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script>
        window.onload = function() {
            window.ui = SwaggerUIBundle({
                url: "/api/docs/openapi.yaml",
                dom_id: '#swagger-ui',
                deepLinking: true,
                presets: [SwaggerUIBundle.presets.apis],
                docExpansion: "list",
                tryItOutEnabled: true,
                supportedSubmitMethods: ['get', 'post'],
                validatorUrl: null,
            });
        };
    </script>
</body>
</html>"#;

/// GET /docs
pub async fn swagger_ui_handler() -> Html<&'static str> {
    Html(SWAGGER_UI_HTML)
}

/// GET /api/docs/openapi.yaml
pub async fn openapi_yaml_handler() -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/yaml")],
        OPENAPI_YAML,
    )
        .into_response()
}

/// Serve the OpenAPI document converted to JSON
///
/// GET /api/docs/openapi.json
pub async fn openapi_json_handler() -> Response {
    let json = serde_yaml::from_str::<serde_json::Value>(OPENAPI_YAML)
        .map_err(|e| format!("Failed to parse OpenAPI YAML: {}", e))
        .and_then(|value| {
            serde_json::to_string_pretty(&value)
                .map_err(|e| format!("Failed to serialize to JSON: {}", e))
        });

    match json {
        Ok(json) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            json,
        )
            .into_response(),
        Err(message) => (StatusCode::INTERNAL_SERVER_ERROR, message).into_response(),
    }
}
