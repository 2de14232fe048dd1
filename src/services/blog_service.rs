use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::{
    audit,
    dto::blogs::{CreateBlogPostRequest, UpdateBlogPostRequest},
    entity::blog_posts::{ActiveModel, Column, Entity as BlogPosts},
    error::{AppError, AppResult},
    middleware::auth::AdminUser,
    models::BlogPost,
    repository::{self, convert, fetch_page},
    response::{ApiResponse, ListData, Meta},
    routes::params::Pagination,
    state::AppState,
};

pub async fn list_posts(
    state: &AppState,
    pagination: Pagination,
    published_only: bool,
) -> AppResult<ApiResponse<ListData<BlogPost>>> {
    let mut finder = BlogPosts::find();
    if published_only {
        finder = finder
            .filter(Column::IsPublished.eq(true))
            .order_by_desc(Column::PublishedAt);
    } else {
        finder = finder.order_by_desc(Column::CreatedAt);
    }
    let (items, meta) = fetch_page(&state.orm, finder, &pagination).await?;
    Ok(ApiResponse::success(
        "Blog posts",
        ListData {
            items: convert(items),
        },
        Some(meta),
    ))
}

pub async fn get_post(state: &AppState, id: Uuid) -> AppResult<ApiResponse<BlogPost>> {
    let post = BlogPosts::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound("Blog post"))?;
    Ok(ApiResponse::success("Blog post", post.into(), None))
}

/// Storefront lookup; drafts read as missing.
pub async fn get_published_by_slug(
    state: &AppState,
    slug: &str,
) -> AppResult<ApiResponse<BlogPost>> {
    let post = BlogPosts::find()
        .filter(Column::Slug.eq(slug))
        .filter(Column::IsPublished.eq(true))
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound("Blog post"))?;
    Ok(ApiResponse::success("Blog post", post.into(), None))
}

pub async fn create_post(
    state: &AppState,
    admin: &AdminUser,
    payload: CreateBlogPostRequest,
) -> AppResult<ApiResponse<BlogPost>> {
    let now = Utc::now();
    let is_published = payload.is_published.unwrap_or(false);
    let post = ActiveModel {
        id: Set(Uuid::new_v4()),
        author_id: Set(Some(admin.0.user_id)),
        title: Set(payload.title),
        slug: Set(payload.slug),
        excerpt: Set(payload.excerpt),
        content: Set(payload.content),
        image_url: Set(payload.image_url),
        is_published: Set(is_published),
        published_at: Set(is_published.then(|| now.into())),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.pool,
        Some(admin.0.user_id),
        "blog_create",
        "blog_posts",
        serde_json::json!({ "post_id": post.id, "slug": post.slug }),
    )
    .await;

    Ok(ApiResponse::success(
        "Blog post created",
        post.into(),
        Some(Meta::empty()),
    ))
}

pub async fn update_post(
    state: &AppState,
    admin: &AdminUser,
    id: Uuid,
    payload: UpdateBlogPostRequest,
) -> AppResult<ApiResponse<BlogPost>> {
    let post =
        repository::update_by_id::<ActiveModel, _, _>(&state.orm, id, payload, "Blog post").await?;

    audit::record(
        &state.pool,
        Some(admin.0.user_id),
        "blog_update",
        "blog_posts",
        serde_json::json!({ "post_id": post.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Updated",
        post.into(),
        Some(Meta::empty()),
    ))
}

pub async fn delete_post(
    state: &AppState,
    admin: &AdminUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    repository::delete_by_id::<BlogPosts, _>(&state.orm, id, "Blog post").await?;

    audit::record(
        &state.pool,
        Some(admin.0.user_id),
        "blog_delete",
        "blog_posts",
        serde_json::json!({ "post_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}
