use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::coffees::{CreateCoffeeRequest, UpdateCoffeeRequest},
    error::AppResult,
    middleware::{auth::AdminUser, validation::ValidatedJson},
    models::Coffee,
    response::{ApiResponse, ListData},
    routes::params::CoffeeQuery,
    services::coffee_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_coffees))
        .route("/{id}", get(get_coffee))
}

pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_coffees).post(create_coffee))
        .route(
            "/{id}",
            get(get_coffee).put(update_coffee).delete(delete_coffee),
        )
}

#[utoipa::path(
    get,
    path = "/api/coffees",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("q" = Option<String>, Query, description = "Search in name and description"),
        ("category_id" = Option<Uuid>, Query, description = "Filter by category"),
        ("available" = Option<bool>, Query, description = "Filter by availability"),
        ("sort_by" = Option<String>, Query, description = "created_at, price, name"),
        ("sort_order" = Option<String>, Query, description = "asc, desc")
    ),
    responses(
        (status = 200, description = "List coffees", body = ApiResponse<ListData<Coffee>>)
    ),
    tag = "Coffees"
)]
pub async fn list_coffees(
    State(state): State<AppState>,
    Query(query): Query<CoffeeQuery>,
) -> AppResult<Json<ApiResponse<ListData<Coffee>>>> {
    let resp = coffee_service::list_coffees(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/coffees/{id}",
    params(("id" = Uuid, Path, description = "Coffee ID")),
    responses(
        (status = 200, description = "Get coffee", body = ApiResponse<Coffee>),
        (status = 404, description = "Coffee not found"),
    ),
    tag = "Coffees"
)]
pub async fn get_coffee(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Coffee>>> {
    let resp = coffee_service::get_coffee(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/coffees",
    request_body = CreateCoffeeRequest,
    responses(
        (status = 201, description = "Create coffee", body = ApiResponse<Coffee>),
        (status = 400, description = "Validation failed"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_coffee(
    State(state): State<AppState>,
    admin: AdminUser,
    ValidatedJson(payload): ValidatedJson<CreateCoffeeRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Coffee>>)> {
    let resp = coffee_service::create_coffee(&state, &admin, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/admin/coffees/{id}",
    params(("id" = Uuid, Path, description = "Coffee ID")),
    request_body = UpdateCoffeeRequest,
    responses(
        (status = 200, description = "Updated coffee", body = ApiResponse<Coffee>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Coffee not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_coffee(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateCoffeeRequest>,
) -> AppResult<Json<ApiResponse<Coffee>>> {
    let resp = coffee_service::update_coffee(&state, &admin, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/admin/coffees/{id}",
    params(("id" = Uuid, Path, description = "Coffee ID")),
    responses(
        (status = 200, description = "Deleted coffee"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Coffee not found"),
        (status = 409, description = "Coffee is referenced by orders")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_coffee(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = coffee_service::delete_coffee(&state, &admin, id).await?;
    Ok(Json(resp))
}
