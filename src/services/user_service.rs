use sea_orm::{EntityTrait, QueryOrder};
use uuid::Uuid;

use crate::{
    audit,
    dto::users::{CreateUserRequest, UpdateUserRequest},
    entity::users::{ActiveModel, Column, Entity as Users},
    error::{AppError, AppResult},
    middleware::auth::AdminUser,
    models::{Role, User},
    repository::{self, convert, fetch_page},
    response::{ApiResponse, ListData, Meta},
    routes::params::Pagination,
    services::{auth_service, order_service},
    state::AppState,
};

pub async fn list_users(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<ListData<User>>> {
    let finder = Users::find().order_by_desc(Column::CreatedAt);
    let (items, meta) = fetch_page(&state.orm, finder, &pagination).await?;
    Ok(ApiResponse::success(
        "Users",
        ListData {
            items: convert(items),
        },
        Some(meta),
    ))
}

pub async fn get_user(state: &AppState, id: Uuid) -> AppResult<ApiResponse<User>> {
    let user = Users::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound("User"))?;
    Ok(ApiResponse::success("User", user.into(), None))
}

pub async fn create_user(
    state: &AppState,
    admin: &AdminUser,
    payload: CreateUserRequest,
) -> AppResult<ApiResponse<User>> {
    let role = payload.role.unwrap_or(Role::Customer);
    let user = auth_service::create_user(
        state,
        payload.username,
        payload.email,
        payload.password,
        role,
    )
    .await?;

    audit::record(
        &state.pool,
        Some(admin.0.user_id),
        "user_create",
        "users",
        serde_json::json!({ "user_id": user.id, "role": role }),
    )
    .await;

    Ok(ApiResponse::success(
        "User created",
        user.into(),
        Some(Meta::empty()),
    ))
}

pub async fn update_user(
    state: &AppState,
    admin: &AdminUser,
    id: Uuid,
    mut payload: UpdateUserRequest,
) -> AppResult<ApiResponse<User>> {
    if id == admin.0.user_id && payload.role.is_some_and(|r| r != Role::Admin) {
        return Err(AppError::BadRequest("admins cannot demote themselves".into()));
    }
    payload.email = payload.email.map(|e| auth_service::normalize_email(&e));
    payload.username = payload
        .username
        .as_deref()
        .map(auth_service::normalize_username)
        .transpose()?;

    let user = repository::update_by_id::<ActiveModel, _, _>(&state.orm, id, payload, "User").await?;

    audit::record(
        &state.pool,
        Some(admin.0.user_id),
        "user_update",
        "users",
        serde_json::json!({ "user_id": user.id, "role": user.role }),
    )
    .await;

    Ok(ApiResponse::success(
        "Updated",
        user.into(),
        Some(Meta::empty()),
    ))
}

pub async fn delete_user(
    state: &AppState,
    admin: &AdminUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    if id == admin.0.user_id {
        return Err(AppError::BadRequest("admins cannot delete themselves".into()));
    }
    if order_service::count_orders_for_user(state, id).await? > 0 {
        return Err(AppError::Conflict("User has orders and cannot be deleted".into()));
    }

    repository::delete_by_id::<Users, _>(&state.orm, id, "User").await?;

    audit::record(
        &state.pool,
        Some(admin.0.user_id),
        "user_delete",
        "users",
        serde_json::json!({ "user_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}
