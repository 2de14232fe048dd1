use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    entity::hero_slides::ActiveModel,
    repository::{Patch, set_if},
};

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateHeroSlideRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub subtitle: Option<String>,
    #[validate(length(min = 1, max = 2048))]
    pub image_url: String,
    #[validate(length(max = 2048))]
    pub link_url: Option<String>,
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
pub struct UpdateHeroSlideRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub subtitle: Option<String>,
    #[validate(length(min = 1, max = 2048))]
    pub image_url: Option<String>,
    #[validate(length(max = 2048))]
    pub link_url: Option<String>,
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
}

impl Patch<ActiveModel> for UpdateHeroSlideRequest {
    fn apply(self, active: &mut ActiveModel) {
        set_if(&mut active.title, self.title);
        set_if(&mut active.subtitle, self.subtitle.map(Some));
        set_if(&mut active.image_url, self.image_url);
        set_if(&mut active.link_url, self.link_url.map(Some));
        set_if(&mut active.display_order, self.display_order);
        set_if(&mut active.is_active, self.is_active);
    }
}
