pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::mediation::handlers;
use crate::state::AppState;
use crate::studio::handlers as studio_handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // One-shot mediation API
        .route("/api/v1/trends", post(handlers::handle_trends))
        .route("/api/v1/ideas", post(handlers::handle_ideas))
        .route("/api/v1/script", post(handlers::handle_script))
        .route("/api/v1/metadata", post(handlers::handle_metadata))
        // Per-view Studio API
        .route(
            "/api/v1/studio/:feature",
            get(studio_handlers::handle_snapshot).delete(studio_handlers::handle_teardown),
        )
        .route(
            "/api/v1/studio/:feature/submit",
            post(studio_handlers::handle_submit),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::llm_client::testing::MockGateway;
    use crate::mediation::retry::RetryPolicy;
    use crate::mediation::Mediator;

    fn app(gateway: Arc<MockGateway>) -> Router {
        let config = Config {
            gemini_api_key: "test-key".to_string(),
            gemini_base_url: "http://localhost".to_string(),
            port: 0,
            rust_log: "debug".to_string(),
            retry: RetryPolicy::none(),
        };
        let mediator = Mediator::new(gateway, config.retry);
        build_router(AppState::new(mediator, config))
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(Arc::new(MockGateway::new()))
            .oneshot(get("/health"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "studio-api");
    }

    #[tokio::test]
    async fn test_ideas_success() {
        let gateway = Arc::new(MockGateway::new().with_text(
            r#"[{"title":"T","hook":"H","viralScore":88,"targetAudience":"Devs"}]"#,
        ));
        let response = app(gateway.clone())
            .oneshot(post_json("/api/v1/ideas", json!({"topic": "Rust"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body[0]["viralScore"], 88);
        assert_eq!(body[0]["targetAudience"], "Devs");
        assert_eq!(gateway.call_count(), 1);
    }

    #[tokio::test]
    async fn test_blank_input_is_400_and_skips_gateway() {
        let gateway = Arc::new(MockGateway::new());
        let response = app(gateway.clone())
            .oneshot(post_json("/api/v1/trends", json!({"niche": "   "})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn test_schema_violation_is_502() {
        let gateway = Arc::new(MockGateway::new().with_text(
            r#"[{"title":"T","hook":"H","viralScore":150,"targetAudience":"Devs"}]"#,
        ));
        let response = app(gateway)
            .oneshot(post_json("/api/v1/ideas", json!({"topic": "Rust"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "SCHEMA_VIOLATION");
    }

    #[tokio::test]
    async fn test_script_accepts_tone_label() {
        let gateway = Arc::new(MockGateway::new().with_text(
            r#"{"title":"S","sections":[{"heading":"Intro","content":"Hi","duration":"0:00-0:15"}]}"#,
        ));
        let response = app(gateway.clone())
            .oneshot(post_json(
                "/api/v1/script",
                json!({"idea": "Rust in 100 seconds", "tone": "Funny and Sarcastic"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let (prompt, _) = gateway.recorded().remove(0);
        assert!(prompt.contains("Funny and Sarcastic"));
    }

    #[tokio::test]
    async fn test_unknown_studio_feature_is_404() {
        let response = app(Arc::new(MockGateway::new()))
            .oneshot(get("/api/v1/studio/thumbnails"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_studio_submit_snapshot_and_teardown() {
        let gateway = Arc::new(
            MockGateway::new()
                .with_text(r#"{"titles":["a","b","c"],"description":"d","tags":["t"],"thumbnailPrompt":"p"}"#)
                .with_delay(Duration::from_millis(20)),
        );
        let app = app(gateway.clone());

        let response = app
            .clone()
            .oneshot(post_json(
                "/api/v1/studio/metadata/submit",
                json!({"input": "A video about borrowing"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);
        assert_eq!(body_json(response).await["outcome"], "started");

        let response = app
            .clone()
            .oneshot(post_json(
                "/api/v1/studio/metadata/submit",
                json!({"input": "again"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["outcome"], "busy");

        let mut body = Value::Null;
        for _ in 0..100 {
            let response = app
                .clone()
                .oneshot(get("/api/v1/studio/metadata"))
                .await
                .unwrap();
            body = body_json(response).await;
            if body["state"] != "pending" {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        assert_eq!(body["state"], "success");
        assert_eq!(body["result"]["thumbnailPrompt"], "p");

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/v1/studio/metadata")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let body = body_json(
            app.oneshot(get("/api/v1/studio/metadata")).await.unwrap(),
        )
        .await;
        assert_eq!(body["state"], "idle");
        assert_eq!(gateway.call_count(), 1);
    }
}
