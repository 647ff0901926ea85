pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::editor::handlers as editor;
use crate::letter::handlers as letter;
use crate::sources::handlers as sources;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Letters (pipeline A)
        .route("/api/v1/letters", post(letter::handle_generate_letter))
        .route("/api/v1/letters/keywords", post(letter::handle_keywords))
        // Sources
        .route("/api/v1/sources/resume", post(sources::handle_upload_resume))
        .route("/api/v1/sources/job", post(sources::handle_fetch_job))
        // Documents (pipeline B)
        .route("/api/v1/documents", post(editor::handle_open_document))
        .route(
            "/api/v1/documents/:id",
            get(editor::handle_get_document).delete(editor::handle_close_document),
        )
        .route(
            "/api/v1/documents/:id/fields/move",
            post(editor::handle_move_field),
        )
        .route(
            "/api/v1/documents/:id/fields/:index",
            put(editor::handle_set_field),
        )
        .route("/api/v1/documents/:id/layout", put(editor::handle_set_layout))
        .route("/api/v1/documents/:id/range", get(editor::handle_read_range))
        .route("/api/v1/documents/:id/hover", post(editor::handle_hover))
        .route(
            "/api/v1/documents/:id/drag/cancel",
            post(editor::handle_cancel_drag),
        )
        .route("/api/v1/documents/:id/drop", post(editor::handle_drop))
        .route("/api/v1/documents/:id/edits", post(editor::handle_edit))
        .route(
            "/api/v1/documents/:id/markers/strip",
            post(editor::handle_strip_markers),
        )
        .route(
            "/api/v1/documents/:id/export/:kind",
            get(editor::handle_export),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
        Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;

    fn app() -> Router {
        let config = Config::from_lookup(|_| None).unwrap();
        build_router(AppState::build(&config).unwrap())
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    async fn send_json(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let (status, bytes) = send(app, method, uri, body).await;
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send_json(&app(), Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "letterdrop-api");
    }

    #[tokio::test]
    async fn test_keywords_and_letter() {
        let app = app();
        let input = json!({
            "resume_text": "Jane Doe\nLed development of a billing platform.",
            "job_text": "Senior Backend Engineer\nWe need experience with billing platforms and Python."
        });

        let (status, body) =
            send_json(&app, Method::POST, "/api/v1/letters/keywords", Some(input.clone())).await;
        assert_eq!(status, StatusCode::OK);
        let highlight: Vec<String> = serde_json::from_value(body["highlight"]["terms"].clone()).unwrap();
        assert!(highlight.iter().any(|t| t == "billing"));
        assert!(body["job_spans"].as_array().is_some_and(|s| !s.is_empty()));

        let (status, body) = send_json(&app, Method::POST, "/api/v1/letters", Some(input)).await;
        assert_eq!(status, StatusCode::OK);
        let text = body["text"].as_str().unwrap();
        let paragraphs: Vec<&str> = text.split("\n\n").collect();
        assert_eq!(paragraphs.len(), 3);
        assert!(paragraphs[0].contains("Senior Backend Engineer"));
        assert!(paragraphs[2].contains("Jane Doe"));
        assert!(body["status"].is_null());
    }

    #[tokio::test]
    async fn test_llm_backend_requires_key() {
        let (status, body) = send_json(
            &app(),
            Method::POST,
            "/api/v1/letters",
            Some(json!({"resume_text": "a", "job_text": "b", "backend": "llm"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_job_fetch_failure_is_inline_status() {
        let (status, body) = send_json(
            &app(),
            Method::POST,
            "/api/v1/sources/job",
            Some(json!({"url": "ftp://example.com/job"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["text"], "");
        assert!(body["status"].as_str().unwrap().contains("Could not fetch"));
    }

    #[tokio::test]
    async fn test_resume_upload_plain_text() {
        let boundary = "XBOUNDARY";
        let body = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"cv.txt\"\r\nContent-Type: text/plain\r\n\r\nJane Doe\nBuilt things\r\n--{boundary}--\r\n"
        );
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/v1/sources/resume")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["text"], "Jane Doe\nBuilt things");
        assert!(json["status"].is_null());
    }

    #[tokio::test]
    async fn test_document_drag_and_drop_flow() {
        let app = app();
        let (status, doc) = send_json(
            &app,
            Method::POST,
            "/api/v1/documents",
            Some(json!({"text": "Dear ,\r\nThanks."})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = doc["id"].as_str().unwrap().to_string();
        assert_eq!(doc["text"], "Dear ,\nThanks.");
        assert_eq!(doc["fields"].as_array().unwrap().len(), 10);

        let layout = json!({
            "font": "monospace",
            "font_size_px": 10.0,
            "line_height_px": 20.0,
            "region": {"x": 0.0, "y": 0.0, "width": 400.0, "height": 200.0}
        });
        let (status, _) =
            send_json(&app, Method::PUT, &format!("/api/v1/documents/{id}/layout"), Some(layout)).await;
        assert_eq!(status, StatusCode::OK);

        // over-long values are cut to FIELD_MAX_CHARS
        let (_, view) = send_json(
            &app,
            Method::PUT,
            &format!("/api/v1/documents/{id}/fields/0"),
            Some(json!({"value": "Hiring Manager of the Year"})),
        )
        .await;
        assert_eq!(view["fields"][0]["value"], "Hiring Manager of th");
        send_json(
            &app,
            Method::PUT,
            &format!("/api/v1/documents/{id}/fields/1"),
            Some(json!({"value": "Ana"})),
        )
        .await;

        let (_, hover) = send_json(
            &app,
            Method::POST,
            &format!("/api/v1/documents/{id}/hover"),
            Some(json!({"x": 30.0, "y": 5.0})),
        )
        .await;
        assert_eq!(hover["indicator"]["offset"], 5);
        assert_eq!(hover["position"], json!({"x": 30.0, "y": 0.0}));
        assert_eq!(hover["preview"], "Dear |,\nThanks.");

        let (status, dropped) = send_json(
            &app,
            Method::POST,
            &format!("/api/v1/documents/{id}/drop"),
            Some(json!({"x": 30.0, "y": 5.0, "field": 1})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(dropped["resolved"], true);
        assert_eq!(dropped["caret"], 12);
        assert!(dropped["document"]["indicator"].is_null());

        let (status, raw) = send(&app, Method::GET, &format!("/api/v1/documents/{id}/export/raw"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(String::from_utf8(raw).unwrap(), "Dear }}Ana{{,\nThanks.");

        let (_, clean) = send(&app, Method::GET, &format!("/api/v1/documents/{id}/export/clean"), None).await;
        assert_eq!(String::from_utf8(clean).unwrap(), "Dear Ana,\nThanks.");

        let (status, _) = send(&app, Method::GET, &format!("/api/v1/documents/{id}/export/pdf"), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&app, Method::DELETE, &format!("/api/v1/documents/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, body) = send_json(&app, Method::GET, &format!("/api/v1/documents/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_export_sets_attachment_filename() {
        let app = app();
        let (_, doc) =
            send_json(&app, Method::POST, "/api/v1/documents", Some(json!({"text": ""}))).await;
        let id = doc["id"].as_str().unwrap();

        let request = Request::builder()
            .uri(format!("/api/v1/documents/{id}/export/clean"))
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"final.txt\""
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn test_edits_and_strip() {
        let app = app();
        let (_, doc) =
            send_json(&app, Method::POST, "/api/v1/documents", Some(json!({"text": "ab"}))).await;
        let id = doc["id"].as_str().unwrap().to_string();

        send_json(
            &app,
            Method::PUT,
            &format!("/api/v1/documents/{id}/fields/3"),
            Some(json!({"value": "X"})),
        )
        .await;
        // no layout hit: lands at the end
        let (_, dropped) = send_json(
            &app,
            Method::POST,
            &format!("/api/v1/documents/{id}/drop"),
            Some(json!({"x": -10.0, "y": -10.0, "field": 3})),
        )
        .await;
        assert_eq!(dropped["resolved"], false);
        assert_eq!(dropped["document"]["text"], "ab}}X{{");

        let (_, view) = send_json(
            &app,
            Method::POST,
            &format!("/api/v1/documents/{id}/edits"),
            Some(json!({"op": "insert", "offset": 1, "text": "-"})),
        )
        .await;
        assert_eq!(view["text"], "a-b}}X{{");

        let (status, range) = send_json(
            &app,
            Method::GET,
            &format!("/api/v1/documents/{id}/range?start=7&end=2"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(range["text"], "b}}X{");
        let (_, range) = send_json(
            &app,
            Method::GET,
            &format!("/api/v1/documents/{id}/range?start=5&end=99"),
            None,
        )
        .await;
        assert_eq!(range["text"], "X{{");

        let (_, stripped) = send_json(
            &app,
            Method::POST,
            &format!("/api/v1/documents/{id}/markers/strip"),
            None,
        )
        .await;
        assert_eq!(stripped["removed"], 1);
        assert_eq!(stripped["document"]["text"], "a-bX");

        let (status, _) = send_json(
            &app,
            Method::POST,
            &format!("/api/v1/documents/{id}/fields/move"),
            Some(json!({"from": 0, "to": 42})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
