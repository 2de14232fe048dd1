use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, EntityTrait, QueryFilter,
    QueryOrder,
};
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use uuid::Uuid;

use crate::{
    audit,
    dto::coffees::{CreateCoffeeRequest, UpdateCoffeeRequest},
    entity::{
        categories::Entity as Categories,
        coffees::{ActiveModel, Column, Entity as Coffees},
    },
    error::{AppError, AppResult},
    middleware::auth::AdminUser,
    models::Coffee,
    repository::{self, convert, fetch_page},
    response::{ApiResponse, ListData, Meta},
    routes::params::{CoffeeQuery, CoffeeSortBy, SortOrder},
    state::AppState,
};

pub async fn list_coffees(
    state: &AppState,
    query: CoffeeQuery,
) -> AppResult<ApiResponse<ListData<Coffee>>> {
    let mut condition = Condition::all();

    if let Some(search) = query.q.as_ref().filter(|s| !s.is_empty()) {
        let pattern = format!("%{}%", search);
        condition = condition.add(
            Condition::any()
                .add(Expr::col(Column::Name).ilike(pattern.clone()))
                .add(Expr::col(Column::Description).ilike(pattern)),
        );
    }
    if let Some(category_id) = query.category_id {
        condition = condition.add(Column::CategoryId.eq(category_id));
    }
    if let Some(available) = query.available {
        condition = condition.add(Column::IsAvailable.eq(available));
    }

    let sort_col = match query.sort_by.unwrap_or(CoffeeSortBy::CreatedAt) {
        CoffeeSortBy::CreatedAt => Column::CreatedAt,
        CoffeeSortBy::Price => Column::Price,
        CoffeeSortBy::Name => Column::Name,
    };
    let mut finder = Coffees::find().filter(condition);
    finder = match query.sort_order.unwrap_or(SortOrder::Desc) {
        SortOrder::Asc => finder.order_by_asc(sort_col),
        SortOrder::Desc => finder.order_by_desc(sort_col),
    };

    let (items, meta) = fetch_page(&state.orm, finder, &query.pagination()).await?;
    Ok(ApiResponse::success(
        "Coffees",
        ListData {
            items: convert(items),
        },
        Some(meta),
    ))
}

pub async fn get_coffee(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Coffee>> {
    let coffee = Coffees::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound("Coffee"))?;
    Ok(ApiResponse::success("Coffee", coffee.into(), None))
}

async fn ensure_category_exists(state: &AppState, category_id: Option<Uuid>) -> AppResult<()> {
    if let Some(category_id) = category_id {
        if Categories::find_by_id(category_id)
            .one(&state.orm)
            .await?
            .is_none()
        {
            return Err(AppError::BadRequest(format!(
                "category {category_id} does not exist"
            )));
        }
    }
    Ok(())
}

pub async fn create_coffee(
    state: &AppState,
    admin: &AdminUser,
    payload: CreateCoffeeRequest,
) -> AppResult<ApiResponse<Coffee>> {
    ensure_category_exists(state, payload.category_id).await?;

    let now = Utc::now();
    let coffee = ActiveModel {
        id: Set(Uuid::new_v4()),
        category_id: Set(payload.category_id),
        name: Set(payload.name),
        description: Set(payload.description),
        price: Set(payload.price),
        image_url: Set(payload.image_url),
        is_available: Set(payload.is_available.unwrap_or(true)),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.pool,
        Some(admin.0.user_id),
        "coffee_create",
        "coffees",
        serde_json::json!({ "coffee_id": coffee.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Coffee created",
        coffee.into(),
        Some(Meta::empty()),
    ))
}

pub async fn update_coffee(
    state: &AppState,
    admin: &AdminUser,
    id: Uuid,
    payload: UpdateCoffeeRequest,
) -> AppResult<ApiResponse<Coffee>> {
    ensure_category_exists(state, payload.category_id).await?;
    let coffee = repository::update_by_id::<ActiveModel, _, _>(&state.orm, id, payload, "Coffee").await?;

    audit::record(
        &state.pool,
        Some(admin.0.user_id),
        "coffee_update",
        "coffees",
        serde_json::json!({ "coffee_id": coffee.id, "price": coffee.price }),
    )
    .await;

    Ok(ApiResponse::success(
        "Updated",
        coffee.into(),
        Some(Meta::empty()),
    ))
}

/// Coffees referenced by past orders cannot be deleted; mark them unavailable instead.
pub async fn delete_coffee(
    state: &AppState,
    admin: &AdminUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    repository::delete_by_id::<Coffees, _>(&state.orm, id, "Coffee").await?;

    audit::record(
        &state.pool,
        Some(admin.0.user_id),
        "coffee_delete",
        "coffees",
        serde_json::json!({ "coffee_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}
