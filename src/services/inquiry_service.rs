use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, EntityTrait, QueryOrder};
use uuid::Uuid;

use crate::{
    audit,
    dto::inquiries::{CreateInquiryRequest, UpdateInquiryRequest},
    entity::inquiries::{ActiveModel, Column, Entity as Inquiries},
    error::{AppError, AppResult},
    middleware::auth::AdminUser,
    models::Inquiry,
    repository::{self, convert, fetch_page},
    response::{ApiResponse, ListData, Meta},
    routes::params::Pagination,
    state::AppState,
};

pub const NEW_STATUS: &str = "new";

pub async fn list_inquiries(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<ListData<Inquiry>>> {
    let finder = Inquiries::find().order_by_desc(Column::CreatedAt);
    let (items, meta) = fetch_page(&state.orm, finder, &pagination).await?;
    Ok(ApiResponse::success(
        "Inquiries",
        ListData {
            items: convert(items),
        },
        Some(meta),
    ))
}

pub async fn get_inquiry(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Inquiry>> {
    let inquiry = Inquiries::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound("Inquiry"))?;
    Ok(ApiResponse::success("Inquiry", inquiry.into(), None))
}

/// Contact form submission; open to anonymous visitors.
pub async fn submit_inquiry(
    state: &AppState,
    payload: CreateInquiryRequest,
) -> AppResult<ApiResponse<Inquiry>> {
    let inquiry = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name),
        email: Set(payload.email),
        subject: Set(payload.subject),
        message: Set(payload.message),
        status: Set(NEW_STATUS.into()),
        created_at: Set(Utc::now().into()),
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(inquiry_id = %inquiry.id, "inquiry received");
    Ok(ApiResponse::success(
        "Inquiry received",
        inquiry.into(),
        Some(Meta::empty()),
    ))
}

pub async fn update_inquiry(
    state: &AppState,
    admin: &AdminUser,
    id: Uuid,
    payload: UpdateInquiryRequest,
) -> AppResult<ApiResponse<Inquiry>> {
    let inquiry =
        repository::update_by_id::<ActiveModel, _, _>(&state.orm, id, payload, "Inquiry").await?;

    audit::record(
        &state.pool,
        Some(admin.0.user_id),
        "inquiry_update",
        "inquiries",
        serde_json::json!({ "inquiry_id": inquiry.id, "status": inquiry.status }),
    )
    .await;

    Ok(ApiResponse::success(
        "Updated",
        inquiry.into(),
        Some(Meta::empty()),
    ))
}

pub async fn delete_inquiry(
    state: &AppState,
    admin: &AdminUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    repository::delete_by_id::<Inquiries, _>(&state.orm, id, "Inquiry").await?;

    audit::record(
        &state.pool,
        Some(admin.0.user_id),
        "inquiry_delete",
        "inquiries",
        serde_json::json!({ "inquiry_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}
