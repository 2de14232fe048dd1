use chrono::Utc;
use sea_orm::{ActiveValue::Set, EntityTrait, QueryOrder, sea_query::OnConflict};

use crate::{
    audit,
    dto::settings::UpsertSettingRequest,
    entity::shop_settings::{ActiveModel, Column, Entity as ShopSettings},
    error::{AppError, AppResult},
    middleware::auth::AdminUser,
    models::ShopSetting,
    repository::convert,
    response::{ApiResponse, ListData, Meta},
    state::AppState,
};

/// Keys look like `opening_hours` or `contact.email`.
pub fn validate_key(key: &str) -> AppResult<()> {
    let valid = !key.is_empty()
        && key.len() <= 100
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if valid {
        Ok(())
    } else {
        Err(AppError::BadRequest(format!("invalid setting key `{key}`")))
    }
}

pub async fn list_settings(state: &AppState) -> AppResult<ApiResponse<ListData<ShopSetting>>> {
    let items = ShopSettings::find()
        .order_by_asc(Column::SettingKey)
        .all(&state.orm)
        .await?;
    let total = items.len() as i64;
    Ok(ApiResponse::success(
        "Settings",
        ListData {
            items: convert(items),
        },
        Some(Meta::new(1, total, total)),
    ))
}

pub async fn get_setting(state: &AppState, key: &str) -> AppResult<ApiResponse<ShopSetting>> {
    validate_key(key)?;
    let setting = ShopSettings::find_by_id(key.to_string())
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound("Setting"))?;
    Ok(ApiResponse::success("Setting", setting.into(), None))
}

pub async fn upsert_setting(
    state: &AppState,
    admin: &AdminUser,
    key: String,
    payload: UpsertSettingRequest,
) -> AppResult<ApiResponse<ShopSetting>> {
    validate_key(&key)?;

    let active = ActiveModel {
        setting_key: Set(key.clone()),
        setting_value: Set(payload.value),
        updated_at: Set(Utc::now().into()),
    };
    ShopSettings::insert(active)
        .on_conflict(
            OnConflict::column(Column::SettingKey)
                .update_columns([Column::SettingValue, Column::UpdatedAt])
                .to_owned(),
        )
        .exec(&state.orm)
        .await?;

    let setting = ShopSettings::find_by_id(key.clone())
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound("Setting"))?;

    audit::record(
        &state.pool,
        Some(admin.0.user_id),
        "setting_upsert",
        "shop_settings",
        serde_json::json!({ "key": key }),
    )
    .await;

    Ok(ApiResponse::success(
        "Setting saved",
        setting.into(),
        Some(Meta::empty()),
    ))
}

pub async fn delete_setting(
    state: &AppState,
    admin: &AdminUser,
    key: String,
) -> AppResult<ApiResponse<serde_json::Value>> {
    validate_key(&key)?;
    let result = ShopSettings::delete_by_id(key.clone())
        .exec(&state.orm)
        .await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Setting"));
    }

    audit::record(
        &state.pool,
        Some(admin.0.user_id),
        "setting_delete",
        "shop_settings",
        serde_json::json!({ "key": key }),
    )
    .await;

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

#[cfg(test)]
mod tests {
    use super::validate_key;

    #[test]
    fn accepts_dotted_and_snake_keys() {
        assert!(validate_key("opening_hours").is_ok());
        assert!(validate_key("contact.email").is_ok());
    }

    #[test]
    fn rejects_blank_and_odd_keys() {
        assert!(validate_key("").is_err());
        assert!(validate_key("drop table;").is_err());
        assert!(validate_key(&"k".repeat(101)).is_err());
    }
}
