mod common;

use coffee_shop_api::{
    dto::{
        blogs::{CreateBlogPostRequest, UpdateBlogPostRequest},
        categories::CreateCategoryRequest,
        coffees::CreateCoffeeRequest,
        orders::{CreateOrderRequest, OrderItemRequest},
        settings::UpsertSettingRequest,
        users::UpdateUserRequest,
    },
    entity::audit_logs::{Column as AuditCol, Entity as AuditLogs},
    error::AppError,
    models::Role,
    services::{
        blog_service, category_service, coffee_service, order_service, settings_service,
        user_service,
    },
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

#[tokio::test]
async fn drafts_are_hidden_until_published() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };
    let admin = common::create_admin(&state).await?;
    let slug = common::unique("brew-guide").replace('_', "-");

    let post = blog_service::create_post(
        &state,
        &admin,
        CreateBlogPostRequest {
            title: "Brew guide".into(),
            slug: slug.clone(),
            excerpt: None,
            content: "Grind, bloom, pour.".into(),
            image_url: None,
            is_published: None,
        },
    )
    .await?
    .data
    .expect("post");
    assert!(!post.is_published);
    assert!(post.published_at.is_none());

    let err = blog_service::get_published_by_slug(&state, &slug)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    blog_service::update_post(
        &state,
        &admin,
        post.id,
        UpdateBlogPostRequest {
            is_published: Some(true),
            ..Default::default()
        },
    )
    .await?;

    let public = blog_service::get_published_by_slug(&state, &slug)
        .await?
        .data
        .expect("post");
    assert_eq!(public.id, post.id);
    assert!(public.published_at.is_some());
    Ok(())
}

#[tokio::test]
async fn settings_upsert_replaces_value() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };
    let admin = common::create_admin(&state).await?;
    let key = common::unique("banner");

    for value in ["first", "second"] {
        settings_service::upsert_setting(
            &state,
            &admin,
            key.clone(),
            UpsertSettingRequest {
                value: value.into(),
            },
        )
        .await?;
    }

    let setting = settings_service::get_setting(&state, &key)
        .await?
        .data
        .expect("setting");
    assert_eq!(setting.value, "second");

    let entries = AuditLogs::find()
        .filter(AuditCol::UserId.eq(admin.0.user_id))
        .filter(AuditCol::Action.eq("setting_upsert"))
        .all(&state.orm)
        .await?;
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].resource.as_deref(), Some("shop_settings"));

    settings_service::delete_setting(&state, &admin, key.clone()).await?;
    let err = settings_service::get_setting(&state, &key).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    Ok(())
}

#[tokio::test]
async fn category_in_use_cannot_be_deleted() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };
    let admin = common::create_admin(&state).await?;

    let category = category_service::create_category(
        &state,
        &admin,
        CreateCategoryRequest {
            name: common::unique("Seasonal"),
            description: None,
        },
    )
    .await?
    .data
    .expect("category");

    coffee_service::create_coffee(
        &state,
        &admin,
        CreateCoffeeRequest {
            category_id: Some(category.id),
            name: common::unique("Pumpkin Latte"),
            description: None,
            price: 550,
            image_url: None,
            is_available: None,
        },
    )
    .await?;

    let err = category_service::delete_category(&state, &admin, category.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)), "{err:?}");
    Ok(())
}

#[tokio::test]
async fn user_management_guards() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };
    let admin = common::create_admin(&state).await?;
    let customer = common::create_user(&state, Role::Customer).await?;
    let coffee = common::create_coffee(&state, 300).await?;

    let err = user_service::update_user(
        &state,
        &admin,
        admin.0.user_id,
        UpdateUserRequest {
            role: Some(Role::Customer),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let err = user_service::delete_user(&state, &admin, admin.0.user_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    order_service::create_order(
        &state,
        customer.user_id,
        CreateOrderRequest {
            items: vec![OrderItemRequest {
                coffee_id: coffee,
                quantity: 1,
            }],
            shipping_address: "here".into(),
            billing_address: "here".into(),
            payment_method: "cash".into(),
            total_amount: None,
        },
    )
    .await?;

    let err = user_service::delete_user(&state, &admin, customer.user_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
    Ok(())
}
