use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpsertSettingRequest {
    #[validate(length(max = 10000))]
    pub value: String,
}
