use chrono::Utc;
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    entity::orders::ActiveModel,
    models::{Order, OrderItem},
    repository::{Patch, set_if},
};

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema, Validate)]
pub struct OrderItemRequest {
    pub coffee_id: Uuid,
    #[validate(range(min = 1, max = 1000, message = "quantity must be between 1 and 1000"))]
    pub quantity: i32,
}

/// Checkout payload. Line prices are never taken from the client; they are
/// read from the catalog inside the order transaction.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema, Validate)]
pub struct CreateOrderRequest {
    #[validate(length(min = 1, message = "order must contain at least one item"), nested)]
    pub items: Vec<OrderItemRequest>,
    #[validate(length(min = 1, max = 1000))]
    pub shipping_address: String,
    #[validate(length(min = 1, max = 1000))]
    pub billing_address: String,
    #[validate(length(min = 1, max = 50))]
    pub payment_method: String,
    /// Client-computed total; when omitted the sum of the captured line prices is stored.
    #[validate(range(min = 0, message = "total_amount must not be negative"))]
    pub total_amount: Option<i64>,
}

#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
pub struct UpdateOrderRequest {
    #[validate(length(min = 1, max = 50))]
    pub status: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub payment_status: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub payment_method: Option<String>,
    #[validate(length(min = 1, max = 1000))]
    pub shipping_address: Option<String>,
    #[validate(length(min = 1, max = 1000))]
    pub billing_address: Option<String>,
    #[validate(range(min = 0, message = "total_amount must not be negative"))]
    pub total_amount: Option<i64>,
}

impl Patch<ActiveModel> for UpdateOrderRequest {
    fn apply(self, active: &mut ActiveModel) {
        let mut changed = set_if(&mut active.status, self.status);
        changed |= set_if(&mut active.payment_status, self.payment_status);
        changed |= set_if(&mut active.payment_method, self.payment_method);
        changed |= set_if(&mut active.shipping_address, self.shipping_address);
        changed |= set_if(&mut active.billing_address, self.billing_address);
        changed |= set_if(&mut active.total_amount, self.total_amount);
        if changed {
            active.updated_at = Set(Utc::now().into());
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderWithItems {
    pub order: Order,
    pub items: Vec<OrderItem>,
}
