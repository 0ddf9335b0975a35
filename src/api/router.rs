//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::FromRef,
    middleware,
    routing::{get, post, put},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::dto::{EmptyData, ProxyError, SetQueryRequest};
use crate::api::middleware::http_metrics_middleware;
use crate::application::{SearchService, SearchView, SuggestionService};
use crate::domain::{PageWindow, PaginationRequest, PaginationToken, SearchHit, SearchPage, SearchSession};
use crate::infrastructure::QueryStore;
use crate::view::{PageLink, PaginationItem, PaginationView, ResultCard};

use super::handlers::{health, metrics, pagination, proxy, search, sessions};

/// Shared state for every route.
/// Each handler extracts only its own slice via `FromRef`.
#[derive(Clone)]
pub struct ApiState {
    pub search: Arc<SearchService>,
    pub suggestions: Arc<SuggestionService>,
    pub sessions: Arc<dyn QueryStore>,
    pub metrics: PrometheusHandle,
    pub started_at: Arc<Instant>,
}

impl FromRef<ApiState> for proxy::ProxyState {
    fn from_ref(s: &ApiState) -> Self {
        proxy::ProxyState {
            search: Arc::clone(&s.search),
            suggestions: Arc::clone(&s.suggestions),
        }
    }
}

impl FromRef<ApiState> for search::SearchState {
    fn from_ref(s: &ApiState) -> Self {
        search::SearchState {
            search: Arc::clone(&s.search),
            sessions: Arc::clone(&s.sessions),
        }
    }
}

impl FromRef<ApiState> for sessions::SessionState {
    fn from_ref(s: &ApiState) -> Self {
        sessions::SessionState {
            sessions: Arc::clone(&s.sessions),
        }
    }
}

impl FromRef<ApiState> for health::HealthState {
    fn from_ref(s: &ApiState) -> Self {
        health::HealthState {
            started_at: Arc::clone(&s.started_at),
        }
    }
}

impl FromRef<ApiState> for metrics::MetricsState {
    fn from_ref(s: &ApiState) -> Self {
        metrics::MetricsState {
            handle: s.metrics.clone(),
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        proxy::query,
        proxy::suggest,
        search::search_page,
        pagination::calculate_pagination,
        sessions::create_session,
        sessions::get_session,
        sessions::set_session_query,
        sessions::delete_session,
    ),
    components(
        schemas(
            EmptyData,
            ProxyError,
            SetQueryRequest,
            health::HealthResponse,
            SearchHit,
            SearchPage,
            SearchSession,
            SearchView,
            ResultCard,
            PaginationRequest,
            PageWindow,
            PaginationToken,
            PaginationView,
            PaginationItem,
            PageLink,
        )
    ),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Proxy", description = "Search and suggestion passthrough to the search backend"),
        (name = "Search", description = "Results page model: result cards and pagination links"),
        (name = "Pagination", description = "Pager button calculation"),
        (name = "Sessions", description = "Per-client search box state"),
    ),
    info(
        title = "Lumos Gateway API",
        version = "1.0.0",
        description = "HTTP gateway in front of the Lumos search backend",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(state: ApiState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let routes = Router::new()
        // Proxy (response shapes kept for the browser client)
        .route("/api/query", get(proxy::query))
        .route("/api/suggest", get(proxy::suggest))
        // Results page
        .route("/api/v1/search", get(search::search_page))
        .route("/api/v1/pagination", get(pagination::calculate_pagination))
        // Sessions
        .route("/api/v1/sessions", post(sessions::create_session))
        .route(
            "/api/v1/sessions/{id}",
            get(sessions::get_session).delete(sessions::delete_session),
        )
        .route("/api/v1/sessions/{id}/query", put(sessions::set_session_query))
        // Service
        .route("/health", get(health::health_check))
        .route("/metrics", get(metrics::prometheus_metrics))
        .route_layer(middleware::from_fn(http_metrics_middleware))
        .with_state(state);

    Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .merge(routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BackendError;
    use crate::infrastructure::{InMemoryQueryStore, SearchBackend};
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use metrics_exporter_prometheus::PrometheusBuilder;
    use serde_json::Value;
    use std::sync::Mutex;
    use std::time::Duration;
    use tower::ServiceExt;

    #[derive(Default)]
    struct StubBackend {
        fail_with: Option<u16>,
        searches: Mutex<Vec<(String, u32, u32)>>,
    }

    #[async_trait]
    impl SearchBackend for StubBackend {
        async fn search(&self, query: &str, page: u32, size: u32) -> Result<SearchPage, BackendError> {
            self.searches
                .lock()
                .unwrap()
                .push((query.to_string(), page, size));
            if let Some(code) = self.fail_with {
                return Err(BackendError::Status(code));
            }
            Ok(SearchPage {
                results: vec![SearchHit {
                    url: "https://www.rust-lang.org/learn".into(),
                    doc_title: "Learn Rust".into(),
                    description: Some("Get started with Rust".into()),
                    score: None,
                }],
                pages: 20,
            })
        }

        async fn suggestions(&self, term: &str) -> Result<Vec<String>, BackendError> {
            if let Some(code) = self.fail_with {
                return Err(BackendError::Status(code));
            }
            Ok((1..=8).map(|i| format!("{term}{i}")).collect())
        }
    }

    fn app_with(backend: Arc<StubBackend>) -> Router {
        let state = ApiState {
            search: Arc::new(SearchService::new(backend.clone(), 10, 7)),
            suggestions: Arc::new(SuggestionService::new(backend, Duration::from_millis(1), 5)),
            sessions: Arc::new(InMemoryQueryStore::new()),
            metrics: PrometheusBuilder::new().build_recorder().handle(),
            started_at: Arc::new(Instant::now()),
        };
        create_api_router(state)
    }

    fn app() -> Router {
        app_with(Arc::new(StubBackend::default()))
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn json_body(resp: axum::response::Response) -> Value {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let resp = app().oneshot(get_request("/health")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = json_body(resp).await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn query_forwards_zero_based_page() {
        let backend = Arc::new(StubBackend::default());
        let resp = app_with(backend.clone())
            .oneshot(get_request("/api/query?q=rust&page=3"))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let body = json_body(resp).await;
        assert_eq!(body["pages"], 20);
        assert_eq!(body["results"][0]["docTitle"], "Learn Rust");
        assert_eq!(
            backend.searches.lock().unwrap().as_slice(),
            &[("rust".to_string(), 2, 10)]
        );
    }

    #[tokio::test]
    async fn query_with_garbage_page_uses_first_page() {
        let backend = Arc::new(StubBackend::default());
        let resp = app_with(backend.clone())
            .oneshot(get_request("/api/query?q=rust&page=abc"))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(backend.searches.lock().unwrap()[0].1, 0);
    }

    #[tokio::test]
    async fn blank_query_is_rejected() {
        let resp = app().oneshot(get_request("/api/query?q=%20%20")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = json_body(resp).await;
        assert_eq!(body["status"], 400);
    }

    #[tokio::test]
    async fn backend_status_is_passed_through() {
        let backend = Arc::new(StubBackend {
            fail_with: Some(503),
            ..Default::default()
        });
        let resp = app_with(backend)
            .oneshot(get_request("/api/query?q=rust"))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = json_body(resp).await;
        assert_eq!(body["status"], 503);
        assert_eq!(body["message"], "Backend error");
    }

    #[tokio::test]
    async fn suggest_caps_results() {
        let resp = app().oneshot(get_request("/api/suggest?q=ru")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = json_body(resp).await;
        assert_eq!(body.as_array().map(Vec::len), Some(5));
        assert_eq!(body[0], "ru1");
    }

    #[tokio::test]
    async fn suggest_failure_returns_empty_list() {
        let backend = Arc::new(StubBackend {
            fail_with: Some(500),
            ..Default::default()
        });
        let resp = app_with(backend)
            .oneshot(get_request("/api/suggest?q=ru"))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(resp).await, serde_json::json!([]));
    }

    #[tokio::test]
    async fn pagination_endpoint_returns_window() {
        let resp = app()
            .oneshot(get_request("/api/v1/pagination?current_page=10&total_pages=20"))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let body = json_body(resp).await;
        let tokens = body["data"]["tokens"].as_array().unwrap();
        assert_eq!(tokens.len(), 7);
        assert_eq!(tokens[1]["type"], "ellipsis");
        assert_eq!(tokens[3]["number"], 10);
        assert_eq!(body["data"]["has_previous"], true);
    }

    #[tokio::test]
    async fn pagination_endpoint_tolerates_non_numeric_values() {
        let resp = app()
            .oneshot(get_request("/api/v1/pagination?total_pages=abc"))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let body = json_body(resp).await;
        assert_eq!(body["data"]["tokens"], serde_json::json!([]));
        assert_eq!(body["data"]["has_previous"], false);
        assert_eq!(body["data"]["has_next"], false);

        let resp = app()
            .oneshot(get_request("/api/v1/pagination?current_page=abc&total_pages=20"))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let body = json_body(resp).await;
        assert_eq!(body["data"]["current_page"], 1);
        assert_eq!(body["data"]["has_previous"], false);
        assert_eq!(body["data"]["has_next"], true);
    }

    #[tokio::test]
    async fn search_page_builds_cards_and_links() {
        let resp = app()
            .oneshot(get_request("/api/v1/search?q=rust&page=10"))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let body = json_body(resp).await;
        let data = &body["data"];
        assert_eq!(data["page"], 10);
        assert_eq!(data["results"][0]["siteName"], "rust-lang");
        assert_eq!(data["pagination"]["next"]["href"], "/search?q=rust&page=11");
    }

    #[tokio::test]
    async fn search_page_with_unknown_session_is_not_found() {
        let uri = format!("/api/v1/search?q=rust&session={}", uuid::Uuid::new_v4());
        let resp = app().oneshot(get_request(&uri)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn search_page_rejects_blank_query() {
        let resp = app().oneshot(get_request("/api/v1/search?q=%20")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn session_lifecycle() {
        let app = app();

        let create = Request::builder()
            .method("POST")
            .uri("/api/v1/sessions")
            .body(Body::empty())
            .unwrap();
        let resp = app.clone().oneshot(create).await.unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        let id = json_body(resp).await["data"]["id"]
            .as_str()
            .unwrap()
            .to_string();

        let update = Request::builder()
            .method("PUT")
            .uri(format!("/api/v1/sessions/{id}/query"))
            .header("content-type", "application/json")
            .body(Body::from(r#"{"query": "tokio"}"#))
            .unwrap();
        let resp = app.clone().oneshot(update).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = app
            .clone()
            .oneshot(get_request(&format!("/api/v1/sessions/{id}")))
            .await
            .unwrap();
        assert_eq!(json_body(resp).await["data"]["query"], "tokio");

        let delete = Request::builder()
            .method("DELETE")
            .uri(format!("/api/v1/sessions/{id}"))
            .body(Body::empty())
            .unwrap();
        let resp = app.clone().oneshot(delete).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = app
            .oneshot(get_request(&format!("/api/v1/sessions/{id}")))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn openapi_document_is_served() {
        let resp = app().oneshot(get_request("/api-doc/openapi.json")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = json_body(resp).await;
        assert!(body["paths"]["/api/v1/search"].is_object());
    }

    #[tokio::test]
    async fn metrics_endpoint_renders_text() {
        let resp = app().oneshot(get_request("/metrics")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
