pub mod auth;
pub mod blogs;
pub mod categories;
pub mod coffees;
pub mod hero_slides;
pub mod inquiries;
pub mod orders;
pub mod settings;
pub mod testimonials;
pub mod users;
