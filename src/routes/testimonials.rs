use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::testimonials::{CreateTestimonialRequest, UpdateTestimonialRequest},
    error::AppResult,
    middleware::{auth::AdminUser, validation::ValidatedJson},
    models::Testimonial,
    response::{ApiResponse, ListData},
    routes::params::Pagination,
    services::testimonial_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_approved))
}

pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_all).post(create_testimonial))
        .route(
            "/{id}",
            get(get_testimonial)
                .put(update_testimonial)
                .delete(delete_testimonial),
        )
}

#[utoipa::path(
    get,
    path = "/api/testimonials",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20")
    ),
    responses((status = 200, description = "Approved testimonials", body = ApiResponse<ListData<Testimonial>>)),
    tag = "Content"
)]
pub async fn list_approved(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<ListData<Testimonial>>>> {
    let resp = testimonial_service::list_testimonials(&state, pagination, true).await?;
    Ok(Json(resp))
}

#[utoipa::path(get, path = "/api/admin/testimonials", security(("bearer_auth" = [])), tag = "Admin")]
pub async fn list_all(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<ListData<Testimonial>>>> {
    let resp = testimonial_service::list_testimonials(&state, pagination, false).await?;
    Ok(Json(resp))
}

#[utoipa::path(get, path = "/api/admin/testimonials/{id}", security(("bearer_auth" = [])), tag = "Admin")]
pub async fn get_testimonial(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Testimonial>>> {
    let resp = testimonial_service::get_testimonial(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(post, path = "/api/admin/testimonials", request_body = CreateTestimonialRequest, security(("bearer_auth" = [])), tag = "Admin")]
pub async fn create_testimonial(
    State(state): State<AppState>,
    admin: AdminUser,
    ValidatedJson(payload): ValidatedJson<CreateTestimonialRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Testimonial>>)> {
    let resp = testimonial_service::create_testimonial(&state, &admin, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(put, path = "/api/admin/testimonials/{id}", request_body = UpdateTestimonialRequest, security(("bearer_auth" = [])), tag = "Admin")]
pub async fn update_testimonial(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateTestimonialRequest>,
) -> AppResult<Json<ApiResponse<Testimonial>>> {
    let resp = testimonial_service::update_testimonial(&state, &admin, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(delete, path = "/api/admin/testimonials/{id}", security(("bearer_auth" = [])), tag = "Admin")]
pub async fn delete_testimonial(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = testimonial_service::delete_testimonial(&state, &admin, id).await?;
    Ok(Json(resp))
}
