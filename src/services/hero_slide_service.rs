use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::{
    audit,
    dto::hero_slides::{CreateHeroSlideRequest, UpdateHeroSlideRequest},
    entity::hero_slides::{ActiveModel, Column, Entity as HeroSlides},
    error::{AppError, AppResult},
    middleware::auth::AdminUser,
    models::HeroSlide,
    repository::{self, convert},
    response::{ApiResponse, ListData, Meta},
    state::AppState,
};

/// Slides in carousel order. The storefront asks for active ones only.
pub async fn list_hero_slides(
    state: &AppState,
    active_only: bool,
) -> AppResult<ApiResponse<ListData<HeroSlide>>> {
    let mut finder = HeroSlides::find()
        .order_by_asc(Column::DisplayOrder)
        .order_by_asc(Column::CreatedAt);
    if active_only {
        finder = finder.filter(Column::IsActive.eq(true));
    }
    let items = finder.all(&state.orm).await?;
    let total = items.len() as i64;
    Ok(ApiResponse::success(
        "Hero slides",
        ListData {
            items: convert(items),
        },
        Some(Meta::new(1, total, total)),
    ))
}

pub async fn get_hero_slide(state: &AppState, id: Uuid) -> AppResult<ApiResponse<HeroSlide>> {
    let slide = HeroSlides::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound("Hero slide"))?;
    Ok(ApiResponse::success("Hero slide", slide.into(), None))
}

pub async fn create_hero_slide(
    state: &AppState,
    admin: &AdminUser,
    payload: CreateHeroSlideRequest,
) -> AppResult<ApiResponse<HeroSlide>> {
    let slide = ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(payload.title),
        subtitle: Set(payload.subtitle),
        image_url: Set(payload.image_url),
        link_url: Set(payload.link_url),
        display_order: Set(payload.display_order.unwrap_or(0)),
        is_active: Set(payload.is_active.unwrap_or(true)),
        created_at: Set(Utc::now().into()),
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.pool,
        Some(admin.0.user_id),
        "hero_slide_create",
        "hero_slides",
        serde_json::json!({ "hero_slide_id": slide.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Hero slide created",
        slide.into(),
        Some(Meta::empty()),
    ))
}

pub async fn update_hero_slide(
    state: &AppState,
    admin: &AdminUser,
    id: Uuid,
    payload: UpdateHeroSlideRequest,
) -> AppResult<ApiResponse<HeroSlide>> {
    let slide =
        repository::update_by_id::<ActiveModel, _, _>(&state.orm, id, payload, "Hero slide")
            .await?;

    audit::record(
        &state.pool,
        Some(admin.0.user_id),
        "hero_slide_update",
        "hero_slides",
        serde_json::json!({ "hero_slide_id": slide.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Updated",
        slide.into(),
        Some(Meta::empty()),
    ))
}

pub async fn delete_hero_slide(
    state: &AppState,
    admin: &AdminUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    repository::delete_by_id::<HeroSlides, _>(&state.orm, id, "Hero slide").await?;

    audit::record(
        &state.pool,
        Some(admin.0.user_id),
        "hero_slide_delete",
        "hero_slides",
        serde_json::json!({ "hero_slide_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}
