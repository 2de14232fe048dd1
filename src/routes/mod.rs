use axum::{Router, http::Uri};

use crate::{error::AppError, state::AppState};

pub mod admin;
pub mod auth;
pub mod blogs;
pub mod categories;
pub mod coffees;
pub mod doc;
pub mod health;
pub mod hero_slides;
pub mod inquiries;
pub mod orders;
pub mod params;
pub mod settings;
pub mod testimonials;
pub mod users;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/coffees", coffees::router())
        .nest("/categories", categories::router())
        .nest("/testimonials", testimonials::router())
        .nest("/hero-slides", hero_slides::router())
        .nest("/blogs", blogs::router())
        .nest("/settings", settings::router())
        .nest("/inquiries", inquiries::router())
        .nest("/orders", orders::router())
        .nest("/admin", admin::router())
}

/// Fallback for unmatched paths; same error envelope as every other failure.
pub async fn not_found(uri: Uri) -> AppError {
    tracing::debug!(path = %uri.path(), "no route matched");
    AppError::NotFound("Route")
}
