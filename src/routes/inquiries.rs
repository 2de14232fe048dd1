use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::inquiries::{CreateInquiryRequest, UpdateInquiryRequest},
    error::AppResult,
    middleware::{auth::AdminUser, validation::ValidatedJson},
    models::Inquiry,
    response::{ApiResponse, ListData},
    routes::params::Pagination,
    services::inquiry_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(submit_inquiry))
}

pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_inquiries).post(create_inquiry))
        .route(
            "/{id}",
            get(get_inquiry).put(update_inquiry).delete(delete_inquiry),
        )
}

#[utoipa::path(
    post,
    path = "/api/inquiries",
    request_body = CreateInquiryRequest,
    responses(
        (status = 201, description = "Inquiry received", body = ApiResponse<Inquiry>),
        (status = 400, description = "Validation failed")
    ),
    tag = "Inquiries"
)]
pub async fn submit_inquiry(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateInquiryRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Inquiry>>)> {
    let resp = inquiry_service::submit_inquiry(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(post, path = "/api/admin/inquiries", request_body = CreateInquiryRequest, security(("bearer_auth" = [])), tag = "Admin")]
pub async fn create_inquiry(
    State(state): State<AppState>,
    _admin: AdminUser,
    ValidatedJson(payload): ValidatedJson<CreateInquiryRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Inquiry>>)> {
    let resp = inquiry_service::submit_inquiry(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/api/admin/inquiries",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20")
    ),
    responses((status = 200, description = "List inquiries", body = ApiResponse<ListData<Inquiry>>)),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_inquiries(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<ListData<Inquiry>>>> {
    let resp = inquiry_service::list_inquiries(&state, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(get, path = "/api/admin/inquiries/{id}", security(("bearer_auth" = [])), tag = "Admin")]
pub async fn get_inquiry(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Inquiry>>> {
    let resp = inquiry_service::get_inquiry(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(put, path = "/api/admin/inquiries/{id}", request_body = UpdateInquiryRequest, security(("bearer_auth" = [])), tag = "Admin")]
pub async fn update_inquiry(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateInquiryRequest>,
) -> AppResult<Json<ApiResponse<Inquiry>>> {
    let resp = inquiry_service::update_inquiry(&state, &admin, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(delete, path = "/api/admin/inquiries/{id}", security(("bearer_auth" = [])), tag = "Admin")]
pub async fn delete_inquiry(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = inquiry_service::delete_inquiry(&state, &admin, id).await?;
    Ok(Json(resp))
}
