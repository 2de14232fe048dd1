use utoipa::{
    Modify, OpenApi,
    openapi::{
        self, OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{LoginRequest, LoginResponse, RegisterRequest},
        blogs::{CreateBlogPostRequest, UpdateBlogPostRequest},
        categories::{CreateCategoryRequest, UpdateCategoryRequest},
        coffees::{CreateCoffeeRequest, UpdateCoffeeRequest},
        hero_slides::{CreateHeroSlideRequest, UpdateHeroSlideRequest},
        inquiries::{CreateInquiryRequest, UpdateInquiryRequest},
        orders::{CreateOrderRequest, OrderItemRequest, OrderWithItems, UpdateOrderRequest},
        settings::UpsertSettingRequest,
        testimonials::{CreateTestimonialRequest, UpdateTestimonialRequest},
        users::{CreateUserRequest, UpdateUserRequest},
    },
    models::{
        BlogPost, Category, Coffee, HeroSlide, Inquiry, Order, OrderItem, Role, ShopSetting,
        Testimonial, User,
    },
    response::{ApiResponse, ListData, Meta},
    routes::{
        auth, blogs, categories, coffees, health, hero_slides, inquiries, orders, params,
        settings, testimonials, users,
    },
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::register,
        auth::login,
        auth::me,
        coffees::list_coffees,
        coffees::get_coffee,
        coffees::create_coffee,
        coffees::update_coffee,
        coffees::delete_coffee,
        categories::list_categories,
        categories::get_category,
        categories::create_category,
        categories::update_category,
        categories::delete_category,
        orders::list_orders,
        orders::create_order,
        orders::get_order,
        orders::update_order,
        orders::delete_order,
        users::list_users,
        users::get_user,
        users::create_user,
        users::update_user,
        users::delete_user,
        inquiries::submit_inquiry,
        inquiries::create_inquiry,
        inquiries::list_inquiries,
        inquiries::get_inquiry,
        inquiries::update_inquiry,
        inquiries::delete_inquiry,
        testimonials::list_approved,
        testimonials::list_all,
        testimonials::get_testimonial,
        testimonials::create_testimonial,
        testimonials::update_testimonial,
        testimonials::delete_testimonial,
        hero_slides::list_active,
        hero_slides::list_all,
        hero_slides::get_hero_slide,
        hero_slides::create_hero_slide,
        hero_slides::update_hero_slide,
        hero_slides::delete_hero_slide,
        blogs::list_published,
        blogs::get_by_slug,
        blogs::list_all,
        blogs::get_post,
        blogs::create_post,
        blogs::update_post,
        blogs::delete_post,
        settings::list_settings,
        settings::list_settings_admin,
        settings::get_setting,
        settings::upsert_setting,
        settings::delete_setting
    ),
    components(
        schemas(
            Role,
            User,
            Category,
            Coffee,
            Order,
            OrderItem,
            Inquiry,
            Testimonial,
            HeroSlide,
            BlogPost,
            ShopSetting,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            CreateCoffeeRequest,
            UpdateCoffeeRequest,
            CreateCategoryRequest,
            UpdateCategoryRequest,
            OrderItemRequest,
            CreateOrderRequest,
            UpdateOrderRequest,
            OrderWithItems,
            CreateUserRequest,
            UpdateUserRequest,
            CreateInquiryRequest,
            UpdateInquiryRequest,
            CreateTestimonialRequest,
            UpdateTestimonialRequest,
            CreateHeroSlideRequest,
            UpdateHeroSlideRequest,
            CreateBlogPostRequest,
            UpdateBlogPostRequest,
            UpsertSettingRequest,
            params::Pagination,
            params::CoffeeQuery,
            params::OrderListQuery,
            Meta,
            ApiResponse<Coffee>,
            ApiResponse<ListData<Coffee>>,
            ApiResponse<OrderWithItems>,
            ApiResponse<ListData<Order>>,
            ApiResponse<LoginResponse>,
            ApiResponse<User>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Registration, login and current user"),
        (name = "Coffees", description = "Public coffee catalog"),
        (name = "Categories", description = "Coffee categories"),
        (name = "Orders", description = "Order placement and history"),
        (name = "Inquiries", description = "Contact form"),
        (name = "Content", description = "Testimonials, hero slides, blog and shop settings"),
        (name = "Admin", description = "Admin-only management endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
