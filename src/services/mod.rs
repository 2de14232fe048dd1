pub mod auth_service;
pub mod blog_service;
pub mod category_service;
pub mod coffee_service;
pub mod hero_slide_service;
pub mod inquiry_service;
pub mod order_service;
pub mod settings_service;
pub mod testimonial_service;
pub mod user_service;
