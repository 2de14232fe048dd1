use chrono::Utc;
use sea_orm::ActiveValue::{self, Set};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::{
    entity::blog_posts::ActiveModel,
    repository::{Patch, set_if},
};

/// Lowercase ASCII letters, digits and single hyphens, e.g. `cold-brew-guide`.
pub fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    let well_formed = !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--")
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if well_formed {
        Ok(())
    } else {
        Err(ValidationError::new("slug")
            .with_message("slug may contain only a-z, 0-9 and single hyphens".into()))
    }
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateBlogPostRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(max = 200), custom(function = "validate_slug"))]
    pub slug: String,
    pub excerpt: Option<String>,
    #[validate(length(min = 1))]
    pub content: String,
    #[validate(length(max = 2048))]
    pub image_url: Option<String>,
    pub is_published: Option<bool>,
}

#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
pub struct UpdateBlogPostRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(max = 200), custom(function = "validate_slug"))]
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    #[validate(length(min = 1))]
    pub content: Option<String>,
    #[validate(length(max = 2048))]
    pub image_url: Option<String>,
    pub is_published: Option<bool>,
}

impl Patch<ActiveModel> for UpdateBlogPostRequest {
    fn apply(self, active: &mut ActiveModel) {
        let mut changed = set_if(&mut active.title, self.title);
        changed |= set_if(&mut active.slug, self.slug);
        changed |= set_if(&mut active.excerpt, self.excerpt.map(Some));
        changed |= set_if(&mut active.content, self.content);
        changed |= set_if(&mut active.image_url, self.image_url.map(Some));
        match self.is_published {
            Some(true) => {
                changed |= set_if(&mut active.is_published, Some(true));
                // stamp only posts that have no publication date yet
                if matches!(active.published_at, ActiveValue::Unchanged(None)) {
                    active.published_at = Set(Some(Utc::now().into()));
                }
            }
            Some(false) => {
                changed |= set_if(&mut active.is_published, Some(false));
                active.published_at = Set(None);
            }
            None => {}
        }
        if changed {
            active.updated_at = Set(Utc::now().into());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::validate_slug;

    #[test]
    fn accepts_kebab_case() {
        assert!(validate_slug("cold-brew-101").is_ok());
    }

    #[test]
    fn rejects_malformed_slugs() {
        for slug in ["", "-lead", "trail-", "double--dash", "Upper", "sp ace", "ünï"] {
            assert!(validate_slug(slug).is_err(), "{slug}");
        }
    }
}
