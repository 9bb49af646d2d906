pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::extract::handlers::handle_parse_file;
use crate::pipeline::handlers::handle_pipeline;
use crate::render::handlers::handle_render;
use crate::state::AppState;
use crate::synthesis::handlers::handle_enhance;

/// Room for multipart boundaries and the small text fields next to the file.
const MULTIPART_OVERHEAD_BYTES: u64 = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state
        .limits
        .max_document_bytes
        .saturating_add(MULTIPART_OVERHEAD_BYTES);
    let body_limit = usize::try_from(body_limit).unwrap_or(usize::MAX);

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/parse-file", post(handle_parse_file))
        .route("/api/v1/enhance", post(handle_enhance))
        .route("/api/v1/render", post(handle_render))
        .route("/api/v1/pipeline", post(handle_pipeline))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::pipeline::PipelineLimits;
    use crate::test_support::{sample_profile_json, Script, ScriptedGenerator};

    const BOUNDARY: &str = "refolio-test-boundary";
    const RESUME: &str = "John Doe, Software Engineer at Acme Corp, 2019–2023";

    fn app_with(script: Script, limits: PipelineLimits) -> Router {
        build_router(AppState {
            generator: Arc::new(ScriptedGenerator::new(script)),
            limits,
        })
    }

    fn app(script: Script) -> Router {
        app_with(script, PipelineLimits::default())
    }

    enum Part<'a> {
        File {
            file_name: &'a str,
            content_type: &'a str,
            content: &'a [u8],
        },
        Text(&'a str, &'a str),
    }

    fn multipart_request(uri: &str, parts: &[Part<'_>]) -> Request<Body> {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match part {
                Part::File {
                    file_name,
                    content_type,
                    content,
                } => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n\
                             Content-Type: {content_type}\r\n\r\n"
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(content);
                }
                Part::Text(name, value) => {
                    body.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}")
                            .as_bytes(),
                    );
                }
            }
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn json_request(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_string(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn body_json(response: Response) -> Value {
        serde_json::from_str(&body_string(response).await).unwrap()
    }

    fn resume_file(content: &[u8]) -> Part<'_> {
        Part::File {
            file_name: "resume.txt",
            content_type: "text/plain",
            content,
        }
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(Script::Hang)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "refolio-api");
    }

    #[tokio::test]
    async fn test_parse_file_returns_text_and_metadata() {
        let request = multipart_request(
            "/api/v1/parse-file",
            &[resume_file("John Doe\r\nAcme Corp\r\n".as_bytes())],
        );
        let response = app(Script::Hang).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["text"], "John Doe\nAcme Corp");
        assert_eq!(body["data"]["metadata"]["format"], "plain-text");
        assert_eq!(body["data"]["metadata"]["originalName"], "resume.txt");
    }

    #[tokio::test]
    async fn test_parse_file_unsupported_format_is_415() {
        let request = multipart_request(
            "/api/v1/parse-file",
            &[Part::File {
                file_name: "photo.png",
                content_type: "image/png",
                content: b"\x89PNG",
            }],
        );
        let response = app(Script::Hang).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "UNSUPPORTED_FORMAT");
    }

    #[tokio::test]
    async fn test_parse_file_without_file_is_400() {
        let request = multipart_request("/api/v1/parse-file", &[Part::Text("note", "hi")]);
        let response = app(Script::Hang).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_enhance_returns_profile_and_html() {
        let request = json_request(
            "/api/v1/enhance",
            json!({
                "text": RESUME,
                "targetRole": "Backend Developer",
                "instructions": "Emphasize Rust",
                "clientContext": null
            }),
        );
        let response = app(Script::Respond(sample_profile_json()))
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["enhanced"]["experience"][0]["company"], "Acme Corp");
        assert!(body["data"]["html"].as_str().unwrap().contains("Acme Corp"));
    }

    #[tokio::test]
    async fn test_enhance_missing_target_role_is_validation_error() {
        let request = json_request("/api/v1/enhance", json!({ "text": RESUME }));
        let response = app(Script::Respond(sample_profile_json()))
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_enhance_blank_text_is_empty_input() {
        let request = json_request(
            "/api/v1/enhance",
            json!({ "text": "   ", "targetRole": "SRE" }),
        );
        let response = app(Script::Respond(sample_profile_json()))
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "EMPTY_INPUT");
    }

    #[tokio::test]
    async fn test_enhance_generation_failure_is_503_and_retryable() {
        let request = json_request(
            "/api/v1/enhance",
            json!({ "text": RESUME, "targetRole": "SRE" }),
        );
        let response = app(Script::Fail { status: 529 })
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "GENERATION_UNAVAILABLE");
        assert_eq!(body["error"]["retryable"], true);
    }

    #[tokio::test]
    async fn test_enhance_schema_violation_is_502() {
        let mut response_json = sample_profile_json();
        response_json["personalInfo"]
            .as_object_mut()
            .unwrap()
            .remove("name");
        let request = json_request(
            "/api/v1/enhance",
            json!({ "text": RESUME, "targetRole": "SRE" }),
        );
        let response = app(Script::Respond(response_json))
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "SCHEMA_VIOLATION");
        assert!(body.get("data").is_none());
    }

    #[tokio::test]
    async fn test_render_returns_html() {
        let request = json_request("/api/v1/render", sample_profile_json());
        let response = app(Script::Hang).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with("text/html"));
        let html = body_string(response).await;
        assert!(html.contains("<title>John Doe - Senior Backend Engineer</title>"));
    }

    #[tokio::test]
    async fn test_render_invalid_profile_is_422() {
        let mut profile = sample_profile_json();
        profile["summary"] = json!("");
        let request = json_request("/api/v1/render", profile);
        let response = app(Script::Hang).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "UNPROCESSABLE_ENTITY");
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("summary"));
    }

    #[tokio::test]
    async fn test_pipeline_returns_html_attachment() {
        let request = multipart_request(
            "/api/v1/pipeline",
            &[
                resume_file(RESUME.as_bytes()),
                Part::Text("targetRole", "Backend Developer"),
                Part::Text("clientContext", "Fintech"),
            ],
        );
        let response = app(Script::Respond(sample_profile_json()))
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "inline; filename=\"resume.html\""
        );
        let html = body_string(response).await;
        assert!(html.contains("Acme Corp"));
        assert!(html.contains("2019–2023"));
    }

    #[tokio::test]
    async fn test_pipeline_requires_target_role() {
        let request = multipart_request("/api/v1/pipeline", &[resume_file(RESUME.as_bytes())]);
        let response = app(Script::Respond(sample_profile_json()))
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_pipeline_oversize_document_is_413() {
        let limits = PipelineLimits {
            max_document_bytes: 16,
            ..PipelineLimits::default()
        };
        let request = multipart_request(
            "/api/v1/pipeline",
            &[
                resume_file(RESUME.as_bytes()),
                Part::Text("targetRole", "Backend Developer"),
            ],
        );
        let response = app_with(Script::Respond(sample_profile_json()), limits)
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "OVERSIZE_DOCUMENT");
    }

    #[tokio::test]
    async fn test_body_over_router_limit_is_oversize_document() {
        let limits = PipelineLimits {
            max_document_bytes: 16,
            ..PipelineLimits::default()
        };
        let padding = "x".repeat(70_000);
        let request = multipart_request(
            "/api/v1/parse-file",
            &[
                resume_file(b"John Doe"),
                Part::Text("clientContext", &padding),
            ],
        );
        let response = app_with(Script::Respond(sample_profile_json()), limits)
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "OVERSIZE_DOCUMENT");
        assert_eq!(body["error"]["retryable"], false);
    }
}
