use axum::Router;

use crate::{
    routes::{blogs, categories, coffees, hero_slides, inquiries, settings, testimonials, users},
    state::AppState,
};

/// Catalog and content management. Every handler below takes an
/// `AdminUser`, so the role check runs before the body is parsed.
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/coffees", coffees::admin_router())
        .nest("/categories", categories::admin_router())
        .nest("/users", users::admin_router())
        .nest("/inquiries", inquiries::admin_router())
        .nest("/testimonials", testimonials::admin_router())
        .nest("/hero-slides", hero_slides::admin_router())
        .nest("/blogs", blogs::admin_router())
        .nest("/settings", settings::admin_router())
}
