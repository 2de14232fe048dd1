use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::orders::{CreateOrderRequest, OrderWithItems, UpdateOrderRequest},
    entity::{
        coffees::{Column as CoffeeCol, Entity as Coffees},
        order_items::{ActiveModel as OrderItemActive, Column as OrderItemCol, Entity as OrderItems},
        orders::{ActiveModel as OrderActive, Column as OrderCol, Entity as Orders},
    },
    error::{AppError, AppResult},
    middleware::auth::{AdminUser, AuthUser},
    models::{Order, OrderItem},
    repository::{self, convert, fetch_page},
    response::{ApiResponse, ListData, Meta},
    routes::params::{OrderListQuery, SortOrder},
    state::AppState,
};

pub const INITIAL_STATUS: &str = "pending";
pub const INITIAL_PAYMENT_STATUS: &str = "unpaid";

/// Admins see every order; everyone else only their own.
pub async fn list_orders(
    state: &AppState,
    user: &AuthUser,
    query: OrderListQuery,
) -> AppResult<ApiResponse<ListData<Order>>> {
    let mut condition = Condition::all();
    if !user.is_admin() {
        condition = condition.add(OrderCol::UserId.eq(user.user_id));
    }
    if let Some(status) = query.status.as_ref().filter(|s| !s.is_empty()) {
        condition = condition.add(OrderCol::Status.eq(status.clone()));
    }

    let mut finder = Orders::find().filter(condition);
    finder = match query.sort_order.unwrap_or(SortOrder::Desc) {
        SortOrder::Asc => finder.order_by_asc(OrderCol::OrderDate),
        SortOrder::Desc => finder.order_by_desc(OrderCol::OrderDate),
    };

    let (orders, meta) = fetch_page(&state.orm, finder, &query.pagination()).await?;
    Ok(ApiResponse::success(
        "Orders",
        ListData {
            items: convert(orders),
        },
        Some(meta),
    ))
}

/// Order with its line items. Orders owned by someone else read as missing.
pub async fn get_order(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<OrderWithItems>> {
    let mut condition = Condition::all().add(OrderCol::Id.eq(id));
    if !user.is_admin() {
        condition = condition.add(OrderCol::UserId.eq(user.user_id));
    }

    let order = Orders::find()
        .filter(condition)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound("Order"))?;

    let items = OrderItems::find()
        .filter(OrderItemCol::OrderId.eq(order.id))
        .all(&state.orm)
        .await?;

    Ok(ApiResponse::success(
        "Order",
        OrderWithItems {
            order: order.into(),
            items: convert(items),
        },
        Some(Meta::empty()),
    ))
}

/// Place an order: one header row plus one row per item, all or nothing.
///
/// Each line stores the coffee's price as read inside the transaction, so
/// later catalog edits never change what the customer was charged.
pub async fn create_order(
    state: &AppState,
    user_id: Uuid,
    payload: CreateOrderRequest,
) -> AppResult<ApiResponse<OrderWithItems>> {
    if payload.items.is_empty() {
        return Err(AppError::BadRequest(
            "order must contain at least one item".into(),
        ));
    }

    // dropping `txn` on any early return rolls it back
    let txn = state.orm.begin().await?;

    let coffee_ids: Vec<Uuid> = payload.items.iter().map(|item| item.coffee_id).collect();
    let prices: HashMap<Uuid, i64> = Coffees::find()
        .filter(CoffeeCol::Id.is_in(coffee_ids))
        .all(&txn)
        .await?
        .into_iter()
        .map(|coffee| (coffee.id, coffee.price))
        .collect();

    let mut lines = Vec::with_capacity(payload.items.len());
    for (index, item) in payload.items.iter().enumerate() {
        let price = prices.get(&item.coffee_id).copied().ok_or_else(|| {
            AppError::OrderCreation(format!(
                "item {index}: coffee {} does not exist",
                item.coffee_id
            ))
        })?;
        lines.push((index, item, price));
    }

    let computed_total = lines
        .iter()
        .try_fold(0i64, |total, (index, item, price)| {
            price
                .checked_mul(i64::from(item.quantity))
                .and_then(|line| total.checked_add(line))
                .ok_or_else(|| AppError::OrderCreation(format!("item {index}: line total overflows")))
        })?;
    let total_amount = payload.total_amount.unwrap_or(computed_total);

    let now = Utc::now();
    let order = OrderActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        order_date: Set(now.into()),
        total_amount: Set(total_amount),
        status: Set(INITIAL_STATUS.into()),
        shipping_address: Set(payload.shipping_address.clone()),
        billing_address: Set(payload.billing_address.clone()),
        payment_method: Set(payload.payment_method.clone()),
        payment_status: Set(INITIAL_PAYMENT_STATUS.into()),
        updated_at: Set(now.into()),
    }
    .insert(&txn)
    .await?;

    let mut items: Vec<OrderItem> = Vec::with_capacity(lines.len());
    for (index, item, price) in lines {
        let inserted = OrderItemActive {
            id: Set(Uuid::new_v4()),
            order_id: Set(order.id),
            coffee_id: Set(item.coffee_id),
            quantity: Set(item.quantity),
            price_at_order: Set(price),
        }
        .insert(&txn)
        .await
        .map_err(|err| {
            tracing::error!(error = %err, index, coffee_id = %item.coffee_id, "order item insert failed");
            AppError::OrderCreation(format!(
                "item {index}: coffee {} could not be added",
                item.coffee_id
            ))
        })?;
        items.push(inserted.into());
    }

    txn.commit().await?;
    tracing::info!(order_id = %order.id, user_id = %user_id, lines = items.len(), "order created");

    audit::record(
        &state.pool,
        Some(user_id),
        "order_create",
        "orders",
        serde_json::json!({ "order_id": order.id, "items": items.len() }),
    )
    .await;

    Ok(ApiResponse::success(
        "Order created",
        OrderWithItems {
            order: order.into(),
            items,
        },
        Some(Meta::empty()),
    ))
}

/// Partial update of an order header. Status values are not constrained.
pub async fn update_order(
    state: &AppState,
    admin: &AdminUser,
    id: Uuid,
    patch: UpdateOrderRequest,
) -> AppResult<ApiResponse<Order>> {
    let order = repository::update_by_id::<OrderActive, _, _>(&state.orm, id, patch, "Order").await?;

    audit::record(
        &state.pool,
        Some(admin.0.user_id),
        "order_update",
        "orders",
        serde_json::json!({
            "order_id": order.id,
            "status": order.status,
            "payment_status": order.payment_status
        }),
    )
    .await;

    Ok(ApiResponse::success(
        "Order updated",
        order.into(),
        Some(Meta::empty()),
    ))
}

/// Remove an order and its line items; children go first.
pub async fn delete_order(
    state: &AppState,
    admin: &AdminUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let txn = state.orm.begin().await?;

    if Orders::find_by_id(id).one(&txn).await?.is_none() {
        return Err(AppError::NotFound("Order"));
    }

    let removed_items = OrderItems::delete_many()
        .filter(OrderItemCol::OrderId.eq(id))
        .exec(&txn)
        .await?
        .rows_affected;

    let result = Orders::delete_by_id(id).exec(&txn).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Order"));
    }

    txn.commit().await?;

    audit::record(
        &state.pool,
        Some(admin.0.user_id),
        "order_delete",
        "orders",
        serde_json::json!({ "order_id": id, "items": removed_items }),
    )
    .await;

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

/// Number of orders placed by `user_id`.
pub async fn count_orders_for_user(state: &AppState, user_id: Uuid) -> AppResult<u64> {
    Ok(Orders::find()
        .filter(OrderCol::UserId.eq(user_id))
        .count(&state.orm)
        .await?)
}
