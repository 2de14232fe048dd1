use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::hero_slides::{CreateHeroSlideRequest, UpdateHeroSlideRequest},
    error::AppResult,
    middleware::{auth::AdminUser, validation::ValidatedJson},
    models::HeroSlide,
    response::{ApiResponse, ListData},
    services::hero_slide_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_active))
}

pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_all).post(create_hero_slide))
        .route(
            "/{id}",
            get(get_hero_slide)
                .put(update_hero_slide)
                .delete(delete_hero_slide),
        )
}

#[utoipa::path(
    get,
    path = "/api/hero-slides",
    responses((status = 200, description = "Active slides in display order", body = ApiResponse<ListData<HeroSlide>>)),
    tag = "Content"
)]
pub async fn list_active(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<ListData<HeroSlide>>>> {
    let resp = hero_slide_service::list_hero_slides(&state, true).await?;
    Ok(Json(resp))
}

#[utoipa::path(get, path = "/api/admin/hero-slides", security(("bearer_auth" = [])), tag = "Admin")]
pub async fn list_all(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> AppResult<Json<ApiResponse<ListData<HeroSlide>>>> {
    let resp = hero_slide_service::list_hero_slides(&state, false).await?;
    Ok(Json(resp))
}

#[utoipa::path(get, path = "/api/admin/hero-slides/{id}", security(("bearer_auth" = [])), tag = "Admin")]
pub async fn get_hero_slide(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<HeroSlide>>> {
    let resp = hero_slide_service::get_hero_slide(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(post, path = "/api/admin/hero-slides", request_body = CreateHeroSlideRequest, security(("bearer_auth" = [])), tag = "Admin")]
pub async fn create_hero_slide(
    State(state): State<AppState>,
    admin: AdminUser,
    ValidatedJson(payload): ValidatedJson<CreateHeroSlideRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<HeroSlide>>)> {
    let resp = hero_slide_service::create_hero_slide(&state, &admin, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(put, path = "/api/admin/hero-slides/{id}", request_body = UpdateHeroSlideRequest, security(("bearer_auth" = [])), tag = "Admin")]
pub async fn update_hero_slide(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateHeroSlideRequest>,
) -> AppResult<Json<ApiResponse<HeroSlide>>> {
    let resp = hero_slide_service::update_hero_slide(&state, &admin, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(delete, path = "/api/admin/hero-slides/{id}", security(("bearer_auth" = [])), tag = "Admin")]
pub async fn delete_hero_slide(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = hero_slide_service::delete_hero_slide(&state, &admin, id).await?;
    Ok(Json(resp))
}
