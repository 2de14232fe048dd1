use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    entity::testimonials::ActiveModel,
    repository::{Patch, set_if},
};

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateTestimonialRequest {
    #[validate(length(min = 1, max = 100))]
    pub author_name: String,
    #[validate(length(min = 1, max = 2000))]
    pub content: String,
    #[validate(range(min = 1, max = 5))]
    pub rating: i32,
    pub is_approved: Option<bool>,
}

#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
pub struct UpdateTestimonialRequest {
    #[validate(length(min = 1, max = 100))]
    pub author_name: Option<String>,
    #[validate(length(min = 1, max = 2000))]
    pub content: Option<String>,
    #[validate(range(min = 1, max = 5))]
    pub rating: Option<i32>,
    pub is_approved: Option<bool>,
}

impl Patch<ActiveModel> for UpdateTestimonialRequest {
    fn apply(self, active: &mut ActiveModel) {
        set_if(&mut active.author_name, self.author_name);
        set_if(&mut active.content, self.content);
        set_if(&mut active.rating, self.rating);
        set_if(&mut active.is_approved, self.is_approved);
    }
}
