pub mod health;
pub mod reports;
pub mod root;

use axum::{
    Router,
    routing::{get, post},
};

use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root::root))
        .route("/api/hello", get(root::hello))
        .route("/api/health", get(health::health))
        .route("/test", get(test::test_database))
        .route("/generate-report", post(reports::generate_report))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::Arc;

    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::db::{DatabaseProbe, NoDatabase, ProbeOutcome};
    use crate::report::ReportGenerator;

    struct FixedProbe(ProbeOutcome);

    #[async_trait::async_trait]
    impl DatabaseProbe for FixedProbe {
        async fn probe(&self) -> ProbeOutcome {
            self.0.clone()
        }
    }

    fn app(output_dir: &Path, probe: Arc<dyn DatabaseProbe>) -> Router {
        let config = Config::from_lookup(|_| None);
        create_router(AppState::new(config, ReportGenerator::new(output_dir), probe))
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_report(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/generate-report")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_root_and_hello_return_messages() {
        let dir = tempfile::tempdir().unwrap();
        for uri in ["/", "/api/hello"] {
            let (status, body) = send(app(dir.path(), Arc::new(NoDatabase)), get_request(uri)).await;
            assert_eq!(status, StatusCode::OK);
            assert!(!body["message"].as_str().unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn test_health() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = send(
            app(dir.path(), Arc::new(NoDatabase)),
            get_request("/api/health"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_status_without_database() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) =
            send(app(dir.path(), Arc::new(NoDatabase)), get_request("/test")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["backend"], "✅ Running");
        assert_eq!(body["database"], "❌ Not Available");
        assert_eq!(body["database_url"], "❌ Not Set");
        assert_eq!(body["database_name"], "❌ Not Set");
        assert_eq!(body["connection_status"], "Not Connected");
        assert_eq!(body["collections"], json!([]));
    }

    #[tokio::test]
    async fn test_status_with_failing_database_still_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let probe = FixedProbe(ProbeOutcome::ConnectedWithError {
            error: "connection refused".to_string(),
        });
        let (status, body) = send(app(dir.path(), Arc::new(probe)), get_request("/test")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["database"], "⚠️  Connected but Error: connection refused");
        assert_eq!(body["connection_status"], "Connected");
    }

    #[tokio::test]
    async fn test_status_lists_collections() {
        let dir = tempfile::tempdir().unwrap();
        let probe = FixedProbe(ProbeOutcome::Connected {
            database_name: "reports".to_string(),
            collections: vec!["users".to_string(), "reports".to_string()],
        });
        let (_, body) = send(app(dir.path(), Arc::new(probe)), get_request("/test")).await;
        assert_eq!(body["database"], "✅ Connected & Working");
        assert_eq!(body["collections"], json!(["users", "reports"]));
    }

    #[tokio::test]
    async fn test_generate_report_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = send(
            app(dir.path(), Arc::new(NoDatabase)),
            post_report(json!({ "pages": 3, "filename": "report" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        let file_path = body["file_path"].as_str().unwrap();
        assert!(file_path.ends_with("report.pdf"));
        assert!(Path::new(file_path).is_file());
    }

    #[tokio::test]
    async fn test_generate_report_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = send(app(dir.path(), Arc::new(NoDatabase)), post_report(json!({})))
            .await;

        assert_eq!(status, StatusCode::OK);
        assert!(
            body["file_path"]
                .as_str()
                .unwrap()
                .ends_with("Web_Seminar_Report_80Pages.pdf")
        );
    }

    #[tokio::test]
    async fn test_generate_report_rejects_out_of_range_pages() {
        let dir = tempfile::tempdir().unwrap();
        for pages in [0, 201] {
            let (status, body) = send(
                app(dir.path(), Arc::new(NoDatabase)),
                post_report(json!({ "pages": pages, "filename": "never" })),
            )
            .await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
            assert!(body["detail"].as_str().unwrap().contains("pages"));
        }
        assert!(!dir.path().join("never.pdf").exists());
    }

    #[tokio::test]
    async fn test_generate_report_rejects_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let request = Request::builder()
            .method("POST")
            .uri("/generate-report")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"pages\": \"many\"}"))
            .unwrap();
        let (status, body) = send(app(dir.path(), Arc::new(NoDatabase)), request).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["detail"].is_string());
    }

    #[tokio::test]
    async fn test_generate_report_rejects_non_json_body() {
        let dir = tempfile::tempdir().unwrap();
        let request = Request::builder()
            .method("POST")
            .uri("/generate-report")
            .header(header::CONTENT_TYPE, "text/plain")
            .body(Body::from("pages=5"))
            .unwrap();
        let (status, body) = send(app(dir.path(), Arc::new(NoDatabase)), request).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["status"], 422);
    }

    #[tokio::test]
    async fn test_generate_report_io_failure_is_server_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("occupied");
        std::fs::write(&blocker, b"file").unwrap();

        let (status, body) = send(
            app(&blocker, Arc::new(NoDatabase)),
            post_report(json!({ "pages": 2 })),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body["detail"].as_str().unwrap().is_empty());
    }
}
