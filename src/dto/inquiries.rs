use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    entity::inquiries::ActiveModel,
    repository::{Patch, set_if},
};

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateInquiryRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(max = 200))]
    pub subject: Option<String>,
    #[validate(length(min = 1, max = 5000))]
    pub message: String,
}

#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
pub struct UpdateInquiryRequest {
    #[validate(length(min = 1, max = 20))]
    pub status: Option<String>,
    #[validate(length(max = 200))]
    pub subject: Option<String>,
}

impl Patch<ActiveModel> for UpdateInquiryRequest {
    fn apply(self, active: &mut ActiveModel) {
        set_if(&mut active.status, self.status);
        set_if(&mut active.subject, self.subject.map(Some));
    }
}
