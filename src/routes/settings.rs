use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};

use crate::{
    dto::settings::UpsertSettingRequest,
    error::AppResult,
    middleware::{auth::AdminUser, validation::ValidatedJson},
    models::ShopSetting,
    response::{ApiResponse, ListData},
    services::settings_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_settings))
        .route("/{key}", get(get_setting))
}

pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_settings_admin))
        .route(
            "/{key}",
            get(get_setting).put(upsert_setting).delete(delete_setting),
        )
}

#[utoipa::path(
    get,
    path = "/api/settings",
    responses((status = 200, description = "All shop settings", body = ApiResponse<ListData<ShopSetting>>)),
    tag = "Content"
)]
pub async fn list_settings(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<ListData<ShopSetting>>>> {
    let resp = settings_service::list_settings(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(get, path = "/api/admin/settings", security(("bearer_auth" = [])), tag = "Admin")]
pub async fn list_settings_admin(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> AppResult<Json<ApiResponse<ListData<ShopSetting>>>> {
    let resp = settings_service::list_settings(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/settings/{key}",
    params(("key" = String, Path, description = "Setting key")),
    responses(
        (status = 200, description = "One setting", body = ApiResponse<ShopSetting>),
        (status = 404, description = "Not Found")
    ),
    tag = "Content"
)]
pub async fn get_setting(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> AppResult<Json<ApiResponse<ShopSetting>>> {
    let resp = settings_service::get_setting(&state, &key).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/admin/settings/{key}",
    params(("key" = String, Path, description = "Setting key")),
    request_body = UpsertSettingRequest,
    responses((status = 200, description = "Setting created or replaced", body = ApiResponse<ShopSetting>)),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn upsert_setting(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(key): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpsertSettingRequest>,
) -> AppResult<Json<ApiResponse<ShopSetting>>> {
    let resp = settings_service::upsert_setting(&state, &admin, key, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(delete, path = "/api/admin/settings/{key}", security(("bearer_auth" = [])), tag = "Admin")]
pub async fn delete_setting(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(key): Path<String>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = settings_service::delete_setting(&state, &admin, key).await?;
    Ok(Json(resp))
}
