mod common;

use coffee_shop_api::{
    dto::{
        auth::{LoginRequest, RegisterRequest},
        orders::{CreateOrderRequest, OrderItemRequest},
    },
    error::AppError,
    middleware::auth::AuthUser,
    models::Role,
    routes::params::OrderListQuery,
    services::{auth_service, order_service},
};

fn register_request(name: &str) -> RegisterRequest {
    RegisterRequest {
        username: name.to_string(),
        email: format!("{name}@Example.com"),
        password: "correct horse".into(),
    }
}

#[tokio::test]
async fn register_then_login_issues_a_usable_token() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };
    let name = common::unique("alice");

    let user = auth_service::register_user(&state, register_request(&name))
        .await?
        .data
        .expect("user data");
    assert_eq!(user.role, Role::Customer);
    assert_eq!(user.email, format!("{name}@example.com"));

    let login = auth_service::login_user(
        &state,
        LoginRequest {
            email: format!("{name}@example.com"),
            password: "correct horse".into(),
        },
    )
    .await?
    .data
    .expect("login data");
    assert_eq!(login.token_type, "Bearer");
    assert_eq!(login.expires_in, 3600);

    let principal = state.tokens.authenticate(&login.token)?;
    assert_eq!(principal.user_id, user.id);
    assert_eq!(principal.role, Role::Customer);

    let me = auth_service::current_user(&state, &principal)
        .await?
        .data
        .expect("me");
    assert_eq!(me.username, name);
    Ok(())
}

#[tokio::test]
async fn duplicate_registration_conflicts() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };
    let name = common::unique("dup");
    auth_service::register_user(&state, register_request(&name)).await?;

    let err = auth_service::register_user(&state, register_request(&name))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)), "{err:?}");
    Ok(())
}

#[tokio::test]
async fn wrong_password_and_unknown_email_are_indistinguishable() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };
    let name = common::unique("bob");
    auth_service::register_user(&state, register_request(&name)).await?;

    let wrong_password = auth_service::login_user(
        &state,
        LoginRequest {
            email: format!("{name}@example.com"),
            password: "battery staple".into(),
        },
    )
    .await
    .unwrap_err();
    let unknown_email = auth_service::login_user(
        &state,
        LoginRequest {
            email: format!("{}@example.com", common::unique("nobody")),
            password: "correct horse".into(),
        },
    )
    .await
    .unwrap_err();

    assert!(matches!(wrong_password, AppError::InvalidCredentials));
    assert!(matches!(unknown_email, AppError::InvalidCredentials));
    assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    Ok(())
}

#[tokio::test]
async fn customers_only_see_their_own_orders() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };
    let alice = common::create_user(&state, Role::Customer).await?;
    let bob = common::create_user(&state, Role::Customer).await?;
    let admin: AuthUser = common::create_admin(&state).await?.0;
    let coffee = common::create_coffee(&state, 400).await?;

    let state_ref = &state;
    let place = move |user_id| {
        order_service::create_order(
            state_ref,
            user_id,
            CreateOrderRequest {
                items: vec![OrderItemRequest {
                    coffee_id: coffee,
                    quantity: 1,
                }],
                shipping_address: "somewhere".into(),
                billing_address: "somewhere".into(),
                payment_method: "cash".into(),
                total_amount: None,
            },
        )
    };
    let alice_order = place(alice.user_id).await?.data.expect("order").order;
    let bob_order = place(bob.user_id).await?.data.expect("order").order;

    let listed = order_service::list_orders(&state, &alice, OrderListQuery::default())
        .await?
        .data
        .expect("orders");
    assert!(listed.items.iter().all(|o| o.user_id == alice.user_id));
    assert!(listed.items.iter().any(|o| o.id == alice_order.id));

    let err = order_service::get_order(&state, &alice, bob_order.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let as_admin = order_service::get_order(&state, &admin, bob_order.id)
        .await?
        .data
        .expect("order");
    assert_eq!(as_admin.order.user_id, bob.user_id);
    Ok(())
}
