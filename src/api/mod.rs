// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    error::{self, ErrorBody},
    realtime::error::MintErrorBody,
    state::AppState,
};

pub mod health;
pub mod info;
pub mod token;

pub fn router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/", get(info::index))
        .route(
            "/api/token",
            get(token::get_token).options(token::preflight),
        )
        .route("/api/health", get(health::health))
        .route("/api/test", get(info::self_test))
        .with_state(state);

    // Any origin is allowed while browser clients are served from varying hosts.
    Router::new()
        .merge(routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .fallback(error::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(CorsLayer::permissive())
                .layer(CatchPanicLayer::custom(error::handle_panic)),
        )
}

#[derive(OpenApi)]
#[openapi(
    paths(
        info::index,
        info::self_test,
        health::health,
        token::get_token,
        token::preflight
    ),
    components(
        schemas(
            info::ServiceInfo,
            info::EndpointDescriptions,
            info::SelfTestResponse,
            health::HealthResponse,
            token::ClientSecret,
            MintErrorBody,
            ErrorBody
        )
    ),
    tags(
        (name = "Token", description = "Ephemeral realtime client secrets"),
        (name = "Health", description = "Service health"),
        (name = "Info", description = "Service information and diagnostics")
    )
)]
struct ApiDoc;


#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use super::{test_support::send, *};
    use crate::config::Config;

    fn state() -> AppState {
        AppState::new(Config::for_test("http://127.0.0.1:9", None)).unwrap()
    }

    #[tokio::test]
    async fn router_builds_with_all_routes() {
        let app = router(state());
        let _ = app.into_make_service();
    }

    #[tokio::test]
    async fn unknown_path_returns_404_with_endpoints() {
        let (status, _, body) = send(state(), Method::GET, "/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let body: Value = serde_json::from_slice(&body).unwrap();
        let endpoints: Vec<&str> = body["available_endpoints"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();
        assert_eq!(endpoints, ["/", "/api/health", "/api/token", "/api/test"]);
    }

    #[tokio::test]
    async fn public_routes_allow_any_origin() {
        for path in ["/", "/api/health", "/api/test", "/api/token"] {
            let (_, headers, _) = send(state(), Method::GET, path).await;
            assert_eq!(
                headers
                    .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                    .map(|v| v.to_str().unwrap()),
                Some("*"),
                "missing CORS header on {path}"
            );
        }
    }

    #[tokio::test]
    async fn browser_preflight_is_answered() {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/token")
            .header("origin", "https://voice.example.com")
            .header("access-control-request-method", "GET")
            .header("access-control-request-headers", "content-type")
            .body(Body::empty())
            .unwrap();
        let response = router(state()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn responses_carry_request_id() {
        let (_, headers, _) = send(state(), Method::GET, "/api/health").await;
        assert!(headers.contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn index_and_self_test_are_json() {
        let (status, _, body) = send(state(), Method::GET, "/").await;
        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["service"], "OpenAI Realtime API Backend");

        let (status, _, body) = send(state(), Method::GET, "/api/test").await;
        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["message"], "Backend is working!");
    }

    #[tokio::test]
    async fn panicking_handler_becomes_500_json() {
        async fn boom() -> &'static str {
            panic!("handler exploded")
        }

        let app = Router::new()
            .route("/boom", get(boom))
            .layer(CatchPanicLayer::custom(error::handle_panic));
        let request = Request::builder().uri("/boom").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"], "Internal server error");
    }

    #[test]
    fn openapi_documents_every_route() {
        let doc = ApiDoc::openapi();
        for path in ["/", "/api/health", "/api/test", "/api/token"] {
            assert!(doc.paths.paths.contains_key(path), "undocumented {path}");
        }
    }
}
