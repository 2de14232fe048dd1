mod common;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use coffee_shop_api::{
    middleware::auth::AuthUser,
    models::Role,
    routes::{create_api_router, not_found},
    state::AppState,
};
use tower::ServiceExt;
use uuid::Uuid;

fn app(state: AppState) -> Router {
    Router::new()
        .nest("/api", create_api_router())
        .fallback(not_found)
        .with_state(state)
}

fn token_for(state: &AppState, role: Role) -> String {
    let principal = AuthUser {
        user_id: Uuid::new_v4(),
        username: "tester".into(),
        email: "tester@example.com".into(),
        role,
    };
    state.tokens.mint(&principal).expect("mint token")
}

fn request(method: Method, uri: &str, token: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).expect("request")
}

async fn status_of(app: Router, req: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(req).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

#[tokio::test]
async fn customer_cannot_delete_coffee() -> anyhow::Result<()> {
    let state = common::offline_state()?;
    let token = token_for(&state, Role::Customer);
    let uri = format!("/api/admin/coffees/{}", Uuid::new_v4());

    let (status, body) =
        status_of(app(state), request(Method::DELETE, &uri, Some(&token), "")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["data"]["error"], "Forbidden");
    Ok(())
}

#[tokio::test]
async fn customer_is_forbidden_before_body_is_parsed() -> anyhow::Result<()> {
    let state = common::offline_state()?;
    let token = token_for(&state, Role::Customer);

    let (status, _) = status_of(
        app(state),
        request(Method::POST, "/api/admin/coffees", Some(&token), "{not json"),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn customer_cannot_update_orders() -> anyhow::Result<()> {
    let state = common::offline_state()?;
    let token = token_for(&state, Role::Customer);
    let uri = format!("/api/orders/{}", Uuid::new_v4());

    let (status, _) = status_of(
        app(state),
        request(Method::PUT, &uri, Some(&token), r#"{"status":"shipped"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn missing_token_is_unauthorized() -> anyhow::Result<()> {
    let state = common::offline_state()?;
    for (method, uri) in [
        (Method::GET, "/api/orders"),
        (Method::POST, "/api/orders"),
        (Method::GET, "/api/auth/me"),
        (Method::GET, "/api/admin/users"),
    ] {
        let (status, _) = status_of(app(state.clone()), request(method, uri, None, "{}")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
    }
    Ok(())
}

#[tokio::test]
async fn garbage_and_foreign_tokens_are_unauthorized() -> anyhow::Result<()> {
    let state = common::offline_state()?;
    let foreign = coffee_shop_api::token::TokenService::new("some-other-secret", 3600).mint(
        &AuthUser {
            user_id: Uuid::new_v4(),
            username: "mallory".into(),
            email: "mallory@example.com".into(),
            role: Role::Admin,
        },
    )?;

    for token in ["not-a-jwt", foreign.as_str()] {
        let (status, body) = status_of(
            app(state.clone()),
            request(Method::GET, "/api/admin/users", Some(token), ""),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(
            body["data"]["error"]
                .as_str()
                .is_some_and(|e| e.contains("Invalid or expired token"))
        );
    }
    Ok(())
}

#[tokio::test]
async fn invalid_registration_is_rejected_without_touching_the_database() -> anyhow::Result<()> {
    let state = common::offline_state()?;
    let (status, _) = status_of(
        app(state),
        request(
            Method::POST,
            "/api/auth/register",
            None,
            r#"{"username":"al","email":"not-an-email","password":"x"}"#,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn padded_short_username_is_rejected() -> anyhow::Result<()> {
    let state = common::offline_state()?;
    let (status, body) = status_of(
        app(state),
        request(
            Method::POST,
            "/api/auth/register",
            None,
            r#"{"username":"  ab  ","email":"ab@example.com","password":"secret123"}"#,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["data"]["error"]
            .as_str()
            .is_some_and(|e| e.contains("username must be 3-50 characters"))
    );
    Ok(())
}

#[tokio::test]
async fn unknown_route_uses_the_error_envelope() -> anyhow::Result<()> {
    let state = common::offline_state()?;
    let (status, body) = status_of(
        app(state),
        request(Method::GET, "/api/espresso-machines", None, ""),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Route not found");
    assert_eq!(body["data"]["error"], "Route not found");
    Ok(())
}
