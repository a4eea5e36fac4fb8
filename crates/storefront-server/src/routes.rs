//! Router

use std::path::Path;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::handlers::{
    checkout_method_not_allowed, client_config, create_checkout, health_check, list_packages,
};
use crate::state::AppState;

/// Build the application router. Static assets are served as the fallback
/// when `static_dir` is given.
pub fn router(state: AppState, static_dir: Option<&Path>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut app = Router::new()
        .route("/health", get(health_check))
        .route("/api/packages", get(list_packages))
        .route("/api/config", get(client_config))
        .route(
            "/api/checkout",
            post(create_checkout).fallback(checkout_method_not_allowed),
        );

    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app.layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
    };
    use serde_json::{Value, json};
    use storefront_core::{Catalog, PricingMode};
    use storefront_payments::{MockProvider, PaymentError, PaymentProvider, TimeoutProvider};
    use tower::ServiceExt;

    use super::*;
    use crate::state::CheckoutSettings;

    fn app_with(mock: &Arc<MockProvider>, settings: CheckoutSettings) -> Router {
        let provider: Arc<dyn PaymentProvider> = mock.clone();
        let state = AppState {
            provider: Some(provider),
            catalog: Arc::new(Catalog::standard()),
            settings: Arc::new(settings),
        };
        router(state, None)
    }

    fn app(mock: &Arc<MockProvider>) -> Router {
        app_with(mock, CheckoutSettings::default())
    }

    fn checkout_request(body: &Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/checkout")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ORIGIN, "https://reels.example")
            .body(Body::from(serde_json::to_vec(body).unwrap()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_checkout_returns_session_id() {
        let mock = Arc::new(MockProvider::succeeding("sess_123"));

        let response = app(&mock)
            .oneshot(checkout_request(&json!({
                "pkg": { "name": "4 reels", "price": 600, "group": "Full Service" }
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!({ "id": "sess_123" }));

        let requests = mock.requests();
        assert_eq!(requests.len(), 1);
        let sent = &requests[0];
        assert_eq!(sent.product_name, "4 reels");
        assert_eq!(sent.unit_amount, 60_000);
        assert_eq!(sent.quantity, 1);
        assert_eq!(sent.currency, "usd");
        assert_eq!(sent.urls.success_url, "https://reels.example/?success=1");
        assert_eq!(sent.urls.cancel_url, "https://reels.example/?canceled=1");
    }

    #[tokio::test]
    async fn test_non_post_is_method_not_allowed() {
        let mock = Arc::new(MockProvider::succeeding("sess_unused"));

        for method in ["GET", "PUT", "DELETE"] {
            let response = app(&mock)
                .oneshot(
                    Request::builder()
                        .method(method)
                        .uri("/api/checkout")
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
            assert_eq!(response.headers()[header::ALLOW], "POST");
            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            assert_eq!(&bytes[..], b"Method Not Allowed");
        }

        assert_eq!(mock.calls(), 0);
    }

    #[tokio::test]
    async fn test_provider_message_passed_through() {
        let mock = Arc::new(MockProvider::failing(PaymentError::Provider(
            "Card declined".into(),
        )));

        let response = app(&mock)
            .oneshot(checkout_request(&json!({
                "pkg": { "name": "1 reel", "price": 250, "group": "Full Service" }
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(response).await, json!({ "error": "Card declined" }));
    }

    #[tokio::test]
    async fn test_provider_without_message_uses_fallback() {
        let mock = Arc::new(MockProvider::failing(PaymentError::Provider(String::new())));

        let response = app(&mock)
            .oneshot(checkout_request(&json!({
                "pkg": { "name": "1 reel", "price": 250, "group": "Full Service" }
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(response).await, json!({ "error": "Stripe error" }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_provider_timeout_is_server_error() {
        let mock = Arc::new(MockProvider::succeeding("sess_slow").with_delay(Duration::from_secs(30)));
        let provider: Arc<dyn PaymentProvider> = Arc::new(TimeoutProvider::new(
            mock.clone(),
            Duration::from_secs(10),
        ));
        let state = AppState {
            provider: Some(provider),
            catalog: Arc::new(Catalog::standard()),
            settings: Arc::new(CheckoutSettings::default()),
        };

        let response = router(state, None)
            .oneshot(checkout_request(&json!({
                "pkg": { "name": "2 reels", "price": 400, "group": "Full Service" }
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json_body(response).await,
            json!({ "error": "payment provider timed out" })
        );
        assert_eq!(mock.calls(), 1);
    }

    #[tokio::test]
    async fn test_invalid_packages_rejected_before_provider() {
        let mock = Arc::new(MockProvider::succeeding("sess_unused"));

        let bodies = [
            json!({ "pkg": { "price": 100 } }),
            json!({ "pkg": { "name": "x", "price": -5 } }),
            json!({ "pkg": { "name": "1 reel", "price": "cheap" } }),
            json!({ "pkg": { "name": "4 reels", "price": "600", "group": "Full Service" } }),
            json!({ "pkg": { "name": "1 reel" } }),
            json!({}),
            json!({ "pkg": { "name": "8 reels", "price": 300 } }),
            json!({ "pkg": { "name": "12 reels", "price": 1, "group": "Full Service" } }),
        ];

        for body in &bodies {
            let response = app(&mock).oneshot(checkout_request(body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
            let error = json_body(response).await;
            assert!(error["error"].is_string(), "body: {body}");
        }

        assert_eq!(mock.calls(), 0);
    }

    #[tokio::test]
    async fn test_malformed_json_rejected() {
        let mock = Arc::new(MockProvider::succeeding("sess_unused"));

        let response = app(&mock)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/checkout")
                    .header(header::CONTENT_TYPE, "application/json")
                    .header(header::ORIGIN, "https://reels.example")
                    .body(Body::from("{ not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(mock.calls(), 0);
    }

    #[tokio::test]
    async fn test_client_pricing_mode_charges_submitted_price() {
        let mock = Arc::new(MockProvider::succeeding("sess_custom"));
        let settings = CheckoutSettings {
            pricing: PricingMode::Client,
            ..Default::default()
        };

        let response = app_with(&mock, settings)
            .oneshot(checkout_request(&json!({
                "pkg": { "name": "Custom edit", "price": 0.005 }
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(mock.requests()[0].unit_amount, 1);
    }

    #[tokio::test]
    async fn test_site_url_used_without_origin_header() {
        let mock = Arc::new(MockProvider::succeeding("sess_site"));
        let settings = CheckoutSettings {
            site_url: Some("https://brownbranding.co/".into()),
            ..Default::default()
        };

        let response = app_with(&mock, settings)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/checkout")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        json!({ "pkg": { "name": "2 reels", "price": 400 } }).to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            mock.requests()[0].urls.success_url,
            "https://brownbranding.co/?success=1"
        );
    }

    #[tokio::test]
    async fn test_missing_origin_rejected() {
        let mock = Arc::new(MockProvider::succeeding("sess_unused"));

        let response = app(&mock)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/checkout")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        json!({ "pkg": { "name": "2 reels", "price": 400 } }).to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(mock.calls(), 0);
    }

    #[tokio::test]
    async fn test_payments_not_configured() {
        let state = AppState {
            provider: None,
            catalog: Arc::new(Catalog::standard()),
            settings: Arc::new(CheckoutSettings::default()),
        };

        let response = router(state, None)
            .oneshot(checkout_request(&json!({
                "pkg": { "name": "1 reel", "price": 250, "group": "Full Service" }
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(json_body(response).await, json!({ "error": "Payments not configured" }));
    }

    #[tokio::test]
    async fn test_packages_and_config_endpoints() {
        let mock = Arc::new(MockProvider::succeeding("sess_unused"));
        let settings = CheckoutSettings {
            publishable_key: Some("pk_test_123".into()),
            ..Default::default()
        };
        let app = app_with(&mock, settings);

        let response = app
            .clone()
            .oneshot(Request::get("/api/packages").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let packages = json_body(response).await;
        assert_eq!(packages.as_array().unwrap().len(), 8);
        assert_eq!(packages[0], json!({ "name": "1 reel", "price": 250.0, "group": "Full Service" }));

        let response = app
            .oneshot(Request::get("/api/config").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!({ "publishable_key": "pk_test_123" }));
    }

    #[tokio::test]
    async fn test_static_fallback_serves_page_assets() {
        let mock = Arc::new(MockProvider::succeeding("sess_unused"));
        let state = AppState {
            provider: Some(mock as Arc<dyn PaymentProvider>),
            catalog: Arc::new(Catalog::standard()),
            settings: Arc::new(CheckoutSettings::default()),
        };
        let web_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../storefront-web");
        let app = router(state, Some(&web_dir));

        for (asset, content_type) in [("/style.css", "text/css"), ("/logo.svg", "image/svg+xml")] {
            let response = app
                .clone()
                .oneshot(Request::get(asset).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK, "asset: {asset}");
            assert_eq!(response.headers()[header::CONTENT_TYPE], content_type);
        }

        let response = app
            .oneshot(Request::get("/api/packages").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health() {
        let mock = Arc::new(MockProvider::succeeding("sess_unused"));

        let response = app(&mock)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let health = json_body(response).await;
        assert_eq!(health["status"], "healthy");
        assert_eq!(health["stripe_configured"], true);
    }
}
