use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::{get, MethodRouter},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::{config, SecurityConfig};
use crate::handlers::{folders, notes, system};
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let config = config();

    let router = Router::new()
        // Public
        .route("/", get(system::root))
        .route("/health", get(system::health))
        // Resources
        .merge(notes_routes())
        .merge(folders_routes())
        .fallback(system::not_found)
        // Global middleware
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes))
        .layer(cors_layer(&config.security));

    let router = if config.api.enable_request_logging {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    };

    router.with_state(state)
}

fn notes_routes() -> Router<AppState> {
    resource_routes(
        "/api/notes",
        get(notes::list).post(notes::create),
        get(notes::get).delete(notes::delete).patch(notes::patch),
    )
}

fn folders_routes() -> Router<AppState> {
    resource_routes(
        "/api/folders",
        get(folders::list).post(folders::create),
        get(folders::get).delete(folders::delete).patch(folders::patch),
    )
}

/// Collection and `/:id` routes, each also matched with a trailing slash
fn resource_routes(
    base: &str,
    collection: MethodRouter<AppState>,
    item: MethodRouter<AppState>,
) -> Router<AppState> {
    Router::new()
        .route(base, collection.clone())
        .route(&format!("{}/", base), collection)
        .route(&format!("{}/:id", base), item.clone())
        .route(&format!("{}/:id/", base), item)
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    if !security.enable_cors {
        return CorsLayer::new();
    }

    if security.cors_origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .expose_headers([header::LOCATION])
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header::ACCESS_CONTROL_ALLOW_ORIGIN, Request};
    use tower::ServiceExt;

    use crate::testing::memory_state;

    #[tokio::test]
    async fn development_cors_allows_any_origin() {
        let app = app(memory_state());
        let request = Request::builder()
            .uri("/api/notes")
            .header(header::ORIGIN, "http://localhost:3000")
            .body(axum::body::Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert!(response.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).is_some());
    }

    #[tokio::test]
    async fn oversized_body_is_rejected() {
        let app = app(memory_state());
        let name = "x".repeat(config().api.max_request_size_bytes + 1);
        let res = crate::testing::send(
            &app,
            Method::POST,
            "/api/folders",
            Some(serde_json::json!({ "name": name })),
        )
        .await;

        assert_eq!(res.status, axum::http::StatusCode::PAYLOAD_TOO_LARGE);
        assert!(res.body["error"]["message"].is_string());
    }

    #[tokio::test]
    async fn trailing_slash_reaches_the_same_routes() {
        let app = app(memory_state());

        let res = crate::testing::send(
            &app,
            Method::POST,
            "/api/folders/",
            Some(serde_json::json!({ "name": "Inbox" })),
        )
        .await;
        assert_eq!(res.status, axum::http::StatusCode::CREATED);
        assert_eq!(res.headers[header::LOCATION], "/api/folders/1");

        let res = crate::testing::send(&app, Method::GET, "/api/folders/1/", None).await;
        assert_eq!(res.status, axum::http::StatusCode::OK);
        assert_eq!(res.body["name"], "Inbox");

        let res = crate::testing::send(&app, Method::GET, "/api/notes/", None).await;
        assert_eq!(res.status, axum::http::StatusCode::OK);
        assert_eq!(res.body, serde_json::json!([]));
    }

    #[test]
    fn explicit_origins_skip_invalid_values() {
        let security = SecurityConfig {
            enable_cors: true,
            cors_origins: vec!["https://app.example.com".to_string(), "bad\norigin".to_string()],
        };
        // Building the layer must not panic on the invalid entry
        let _layer = cors_layer(&security);
    }
}
