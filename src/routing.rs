//! Application router configuration.

use axum::{
    Json, Router, middleware,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use tower_http::cors::CorsLayer;

use crate::{
    AppState, Error,
    dashboard::{get_bar_chart, get_combined_data, get_pie_chart, get_statistics},
    endpoints,
    logging::logging_middleware,
    products::get_products,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::PRODUCTS, get(get_products))
        .route(endpoints::STATISTICS, get(get_statistics))
        .route(endpoints::BAR_CHART, get(get_bar_chart))
        .route(endpoints::PIE_CHART, get(get_pie_chart))
        .route(endpoints::COMBINED_DATA, get(get_combined_data))
        .route(endpoints::HEALTH, get(get_health))
        .fallback(get_404_not_found)
        .layer(middleware::from_fn(logging_middleware))
        // The dashboard frontend is served from a different origin.
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct Health {
    status: &'static str,
}

/// Report that the server is up without touching the upstream data source.
async fn get_health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn get_404_not_found() -> Response {
    Error::NotFound.into_response()
}

#[cfg(test)]
mod tests {
    use axum::http::{
        HeaderValue, StatusCode,
        header::{ACCESS_CONTROL_ALLOW_ORIGIN, ORIGIN},
    };
    use serde_json::{Value, json};

    use crate::{
        endpoints,
        test_utils::{CountingTransactionSource, failing_test_server, test_server_with_source},
    };

    #[tokio::test]
    async fn health_does_not_fetch() {
        let source = CountingTransactionSource::new(Vec::new());
        let server = test_server_with_source(source.clone());

        let response = server.get(endpoints::HEALTH).await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>(), json!({ "status": "ok" }));
        assert_eq!(source.fetch_count(), 0);
    }

    #[tokio::test]
    async fn unknown_route_is_json_404() {
        let server = failing_test_server();

        let response = server.get("/api/does-not-exist").await;

        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(response.json::<Value>(), json!({ "error": "Not found" }));
    }

    #[tokio::test]
    async fn every_request_fetches_a_fresh_snapshot() {
        let source = CountingTransactionSource::new(Vec::new());
        let server = test_server_with_source(source.clone());

        server.get(endpoints::PRODUCTS).await.assert_status_ok();
        server
            .get(endpoints::STATISTICS)
            .add_query_param("month", "1")
            .await
            .assert_status_ok();
        server.get(endpoints::COMBINED_DATA).await.assert_status_ok();

        assert_eq!(source.fetch_count(), 3);
    }

    #[tokio::test]
    async fn bad_request_does_not_fetch() {
        let source = CountingTransactionSource::new(Vec::new());
        let server = test_server_with_source(source.clone());

        server
            .get(endpoints::STATISTICS)
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        assert_eq!(source.fetch_count(), 0);
    }

    #[tokio::test]
    async fn allows_cross_origin_requests() {
        let server = test_server_with_source(CountingTransactionSource::new(Vec::new()));

        let response = server
            .get(endpoints::HEALTH)
            .add_header(ORIGIN, HeaderValue::from_static("http://localhost:3000"))
            .await;

        response.assert_status_ok();
        assert_eq!(
            response.header(ACCESS_CONTROL_ALLOW_ORIGIN),
            "*",
            "want permissive CORS header"
        );
    }
}
