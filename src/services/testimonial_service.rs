use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::{
    audit,
    dto::testimonials::{CreateTestimonialRequest, UpdateTestimonialRequest},
    entity::testimonials::{ActiveModel, Column, Entity as Testimonials},
    error::{AppError, AppResult},
    middleware::auth::AdminUser,
    models::Testimonial,
    repository::{self, convert, fetch_page},
    response::{ApiResponse, ListData, Meta},
    routes::params::Pagination,
    state::AppState,
};

/// `approved_only` is set for the storefront; the dashboard sees everything.
pub async fn list_testimonials(
    state: &AppState,
    pagination: Pagination,
    approved_only: bool,
) -> AppResult<ApiResponse<ListData<Testimonial>>> {
    let mut finder = Testimonials::find().order_by_desc(Column::CreatedAt);
    if approved_only {
        finder = finder.filter(Column::IsApproved.eq(true));
    }
    let (items, meta) = fetch_page(&state.orm, finder, &pagination).await?;
    Ok(ApiResponse::success(
        "Testimonials",
        ListData {
            items: convert(items),
        },
        Some(meta),
    ))
}

pub async fn get_testimonial(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Testimonial>> {
    let testimonial = Testimonials::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound("Testimonial"))?;
    Ok(ApiResponse::success("Testimonial", testimonial.into(), None))
}

pub async fn create_testimonial(
    state: &AppState,
    admin: &AdminUser,
    payload: CreateTestimonialRequest,
) -> AppResult<ApiResponse<Testimonial>> {
    let testimonial = ActiveModel {
        id: Set(Uuid::new_v4()),
        author_name: Set(payload.author_name),
        content: Set(payload.content),
        rating: Set(payload.rating),
        is_approved: Set(payload.is_approved.unwrap_or(false)),
        created_at: Set(Utc::now().into()),
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.pool,
        Some(admin.0.user_id),
        "testimonial_create",
        "testimonials",
        serde_json::json!({ "testimonial_id": testimonial.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Testimonial created",
        testimonial.into(),
        Some(Meta::empty()),
    ))
}

pub async fn update_testimonial(
    state: &AppState,
    admin: &AdminUser,
    id: Uuid,
    payload: UpdateTestimonialRequest,
) -> AppResult<ApiResponse<Testimonial>> {
    let testimonial =
        repository::update_by_id::<ActiveModel, _, _>(&state.orm, id, payload, "Testimonial")
            .await?;

    audit::record(
        &state.pool,
        Some(admin.0.user_id),
        "testimonial_update",
        "testimonials",
        serde_json::json!({ "testimonial_id": testimonial.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Updated",
        testimonial.into(),
        Some(Meta::empty()),
    ))
}

pub async fn delete_testimonial(
    state: &AppState,
    admin: &AdminUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    repository::delete_by_id::<Testimonials, _>(&state.orm, id, "Testimonial").await?;

    audit::record(
        &state.pool,
        Some(admin.0.user_id),
        "testimonial_delete",
        "testimonials",
        serde_json::json!({ "testimonial_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}
