//! Liveness probe responder.
//!
//! LiveKit agent workers don't listen on any port of their own, but hosting
//! platforms (Cloud Run style) probe `$PORT` anyway. This router answers any
//! GET path with a plain `OK` and mounts no request logging.

use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;

pub fn router() -> Router {
    Router::new().fallback(get(health))
}

async fn health() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/plain")], "OK")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn probe(path: &str) -> (StatusCode, String, String) {
        let response = router()
            .oneshot(Request::get(path).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|v| v.to_str().unwrap().to_string())
            .unwrap_or_default();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, content_type, String::from_utf8_lossy(&body).into_owned())
    }

    #[tokio::test]
    async fn test_root_path_returns_ok() {
        let (status, content_type, body) = probe("/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type, "text/plain");
        assert_eq!(body, "OK");
    }

    #[tokio::test]
    async fn test_any_path_returns_ok() {
        for path in ["/healthz", "/deeply/nested/path", "/?query=1"] {
            let (status, _, body) = probe(path).await;
            assert_eq!(status, StatusCode::OK, "path {path}");
            assert_eq!(body, "OK");
        }
    }

    #[tokio::test]
    async fn test_non_get_is_not_served() {
        let response = router()
            .oneshot(Request::post("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
