use chrono::Utc;
use sea_orm::ActiveValue::Set;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    entity::users::ActiveModel,
    models::Role,
    repository::{Patch, set_if},
};

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 3, max = 50))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6, max = 128))]
    pub password: String,
    pub role: Option<Role>,
}

#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 3, max = 50))]
    pub username: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub role: Option<Role>,
}

impl Patch<ActiveModel> for UpdateUserRequest {
    fn apply(self, active: &mut ActiveModel) {
        let mut changed = set_if(&mut active.username, self.username);
        changed |= set_if(&mut active.email, self.email);
        changed |= set_if(&mut active.role, self.role.map(|r| r.as_str().to_string()));
        if changed {
            active.updated_at = Set(Utc::now().into());
        }
    }
}
