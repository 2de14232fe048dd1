use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    entity::categories::ActiveModel,
    repository::{Patch, set_if},
};

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
pub struct UpdateCategoryRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    pub description: Option<String>,
}

impl Patch<ActiveModel> for UpdateCategoryRequest {
    fn apply(self, active: &mut ActiveModel) {
        set_if(&mut active.name, self.name);
        set_if(&mut active.description, self.description.map(Some));
    }
}
