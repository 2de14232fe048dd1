use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::blogs::{CreateBlogPostRequest, UpdateBlogPostRequest},
    error::AppResult,
    middleware::{auth::AdminUser, validation::ValidatedJson},
    models::BlogPost,
    response::{ApiResponse, ListData},
    routes::params::Pagination,
    services::blog_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_published))
        .route("/{slug}", get(get_by_slug))
}

pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_all).post(create_post))
        .route("/{id}", get(get_post).put(update_post).delete(delete_post))
}

#[utoipa::path(
    get,
    path = "/api/blogs",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20")
    ),
    responses((status = 200, description = "Published posts, newest first", body = ApiResponse<ListData<BlogPost>>)),
    tag = "Content"
)]
pub async fn list_published(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<ListData<BlogPost>>>> {
    let resp = blog_service::list_posts(&state, pagination, true).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/blogs/{slug}",
    params(("slug" = String, Path, description = "Post slug")),
    responses(
        (status = 200, description = "Published post", body = ApiResponse<BlogPost>),
        (status = 404, description = "Not Found")
    ),
    tag = "Content"
)]
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<ApiResponse<BlogPost>>> {
    let resp = blog_service::get_published_by_slug(&state, &slug).await?;
    Ok(Json(resp))
}

#[utoipa::path(get, path = "/api/admin/blogs", security(("bearer_auth" = [])), tag = "Admin")]
pub async fn list_all(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<ListData<BlogPost>>>> {
    let resp = blog_service::list_posts(&state, pagination, false).await?;
    Ok(Json(resp))
}

#[utoipa::path(get, path = "/api/admin/blogs/{id}", security(("bearer_auth" = [])), tag = "Admin")]
pub async fn get_post(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<BlogPost>>> {
    let resp = blog_service::get_post(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/blogs",
    request_body = CreateBlogPostRequest,
    responses(
        (status = 201, description = "Create post", body = ApiResponse<BlogPost>),
        (status = 409, description = "Slug already in use")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_post(
    State(state): State<AppState>,
    admin: AdminUser,
    ValidatedJson(payload): ValidatedJson<CreateBlogPostRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<BlogPost>>)> {
    let resp = blog_service::create_post(&state, &admin, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(put, path = "/api/admin/blogs/{id}", request_body = UpdateBlogPostRequest, security(("bearer_auth" = [])), tag = "Admin")]
pub async fn update_post(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateBlogPostRequest>,
) -> AppResult<Json<ApiResponse<BlogPost>>> {
    let resp = blog_service::update_post(&state, &admin, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(delete, path = "/api/admin/blogs/{id}", security(("bearer_auth" = [])), tag = "Admin")]
pub async fn delete_post(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = blog_service::delete_post(&state, &admin, id).await?;
    Ok(Json(resp))
}
