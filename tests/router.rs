use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use sea_orm::DatabaseConnection;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use storefront_api::{app::build_app, state::AppState};
use tower::ServiceExt;

// None of these requests reach the database, so a lazy pool and a
// disconnected ORM handle are enough.
fn app() -> Router {
    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://localhost/storefront_unused")
        .expect("lazy pool");
    build_app(AppState::new(pool, DatabaseConnection::default()))
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}

#[tokio::test]
async fn health_route_is_mounted() {
    let response = app()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));

    let body = json_body(response).await;
    assert_eq!(body["data"]["status"], "ok");
}

#[tokio::test]
async fn unknown_path_returns_json_not_found() {
    let response = app()
        .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body["message"], "Not Found");
    assert_eq!(body["data"]["path"], "/nope");
}

#[tokio::test]
async fn admin_routes_require_a_bearer_token() {
    for (method, uri) in [
        ("GET", "/api/admin/dashboard"),
        ("GET", "/api/admin/commandes"),
        ("GET", "/api/admin/suppliers"),
        ("GET", "/api/admin/products/00000000-0000-0000-0000-000000000000"),
        ("POST", "/api/admin/commandes/actions"),
        ("DELETE", "/api/admin/home-page"),
    ] {
        let response = app()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{method} {uri}");
    }
}

#[tokio::test]
async fn non_bearer_authorization_is_rejected() {
    let response = app()
        .oneshot(
            Request::get("/api/admin/dashboard")
                .header(header::AUTHORIZATION, "Basic YWRtaW46YWRtaW4=")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn commande_form_is_validated_before_touching_stock() {
    let payload = serde_json::json!({
        "quantity": 0,
        "customer_name": "Awa",
        "customer_email": "awa@example.com",
        "customer_phone": "770000000",
        "customer_address": "Dakar",
        "payment": "WAVE"
    });
    let response = app()
        .oneshot(
            Request::post(format!("/api/products/{}/commandes", uuid::Uuid::new_v4()))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_payment_method_is_rejected() {
    let payload = serde_json::json!({
        "customer_name": "Awa",
        "customer_email": "awa@example.com",
        "customer_phone": "770000000",
        "customer_address": "Dakar",
        "payment": "CASH"
    });
    let response = app()
        .oneshot(
            Request::post(format!("/api/products/{}/commandes", uuid::Uuid::new_v4()))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
