pub mod audit_logs;
pub mod blog_posts;
pub mod categories;
pub mod coffees;
pub mod hero_slides;
pub mod inquiries;
pub mod order_items;
pub mod orders;
pub mod shop_settings;
pub mod testimonials;
pub mod users;

pub use audit_logs::Entity as AuditLogs;
pub use blog_posts::Entity as BlogPosts;
pub use categories::Entity as Categories;
pub use coffees::Entity as Coffees;
pub use hero_slides::Entity as HeroSlides;
pub use inquiries::Entity as Inquiries;
pub use order_items::Entity as OrderItems;
pub use orders::Entity as Orders;
pub use shop_settings::Entity as ShopSettings;
pub use testimonials::Entity as Testimonials;
pub use users::Entity as Users;
