use chrono::Utc;
use sea_orm::ActiveValue::Set;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    entity::coffees::ActiveModel,
    repository::{Patch, set_if},
};

/// Upper bound for a catalog price, in cents.
pub const MAX_PRICE: i64 = 100_000_000;

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateCoffeeRequest {
    pub category_id: Option<Uuid>,
    #[validate(length(min = 1, max = 150))]
    pub name: String,
    pub description: Option<String>,
    #[validate(range(min = 0, max = MAX_PRICE, message = "price must be between 0 and 100000000"))]
    pub price: i64,
    #[validate(length(max = 2048))]
    pub image_url: Option<String>,
    pub is_available: Option<bool>,
}

#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
pub struct UpdateCoffeeRequest {
    pub category_id: Option<Uuid>,
    #[validate(length(min = 1, max = 150))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0, max = MAX_PRICE, message = "price must be between 0 and 100000000"))]
    pub price: Option<i64>,
    #[validate(length(max = 2048))]
    pub image_url: Option<String>,
    pub is_available: Option<bool>,
}

impl Patch<ActiveModel> for UpdateCoffeeRequest {
    fn apply(self, active: &mut ActiveModel) {
        let mut changed = set_if(&mut active.category_id, self.category_id.map(Some));
        changed |= set_if(&mut active.name, self.name);
        changed |= set_if(&mut active.description, self.description.map(Some));
        changed |= set_if(&mut active.price, self.price);
        changed |= set_if(&mut active.image_url, self.image_url.map(Some));
        changed |= set_if(&mut active.is_available, self.is_available);
        if changed {
            active.updated_at = Set(Utc::now().into());
        }
    }
}

#[cfg(test)]
mod tests {
    use validator::Validate;

    use super::*;

    #[test]
    fn price_must_stay_within_bounds() {
        let request = |price| CreateCoffeeRequest {
            category_id: None,
            name: "Mocha".into(),
            description: None,
            price,
            image_url: None,
            is_available: None,
        };
        assert!(request(450).validate().is_ok());
        assert!(request(MAX_PRICE).validate().is_ok());
        assert!(request(MAX_PRICE + 1).validate().is_err());
        assert!(request(-1).validate().is_err());

        let patch = UpdateCoffeeRequest {
            price: Some(i64::MAX),
            ..Default::default()
        };
        assert!(patch.validate().is_err());
    }
}
