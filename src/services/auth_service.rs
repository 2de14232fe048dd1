use std::sync::LazyLock;

use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use chrono::Utc;
use password_hash::rand_core::OsRng;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::{
    audit,
    dto::auth::{LoginRequest, LoginResponse, RegisterRequest},
    entity::users::{ActiveModel as UserActive, Column as UserCol, Entity as Users, Model as UserModel},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{Role, User},
    response::{ApiResponse, Meta},
    state::AppState,
};

// Verified against when the email is unknown so both login failures cost the same.
static DUMMY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_blocking("not-a-real-password").ok());

fn hash_blocking(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

fn verify_blocking(password: &str, hash: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Salted Argon2id hash, computed off the async workers.
pub async fn hash_password(password: String) -> AppResult<String> {
    tokio::task::spawn_blocking(move || hash_blocking(&password))
        .await
        .map_err(|e| AppError::Internal(e.into()))?
}

pub async fn verify_password(password: String, hash: String) -> AppResult<bool> {
    tokio::task::spawn_blocking(move || verify_blocking(&password, &hash))
        .await
        .map_err(|e| AppError::Internal(e.into()))?
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Trimmed username; the length rule applies to what gets stored.
pub fn normalize_username(username: &str) -> AppResult<String> {
    let trimmed = username.trim();
    let len = trimmed.chars().count();
    if !(3..=50).contains(&len) {
        return Err(AppError::BadRequest(
            "username must be 3-50 characters".into(),
        ));
    }
    Ok(trimmed.to_string())
}

/// Insert a user after checking that neither username nor email is taken.
pub async fn create_user(
    state: &AppState,
    username: String,
    email: String,
    password: String,
    role: Role,
) -> AppResult<UserModel> {
    let username = normalize_username(&username)?;
    let email = normalize_email(&email);

    let existing = Users::find()
        .filter(
            Condition::any()
                .add(UserCol::Username.eq(username.as_str()))
                .add(UserCol::Email.eq(email.as_str())),
        )
        .one(&state.orm)
        .await?;
    if existing.is_some() {
        return Err(AppError::Conflict(
            "Username or email is already taken".into(),
        ));
    }

    let password_hash = hash_password(password).await?;
    let now = Utc::now();

    // a concurrent insert still trips the unique index and maps to Conflict
    let user = UserActive {
        id: Set(Uuid::new_v4()),
        username: Set(username),
        email: Set(email),
        password_hash: Set(password_hash),
        role: Set(role.as_str().to_string()),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(&state.orm)
    .await?;

    Ok(user)
}

pub async fn register_user(
    state: &AppState,
    payload: RegisterRequest,
) -> AppResult<ApiResponse<User>> {
    let RegisterRequest {
        username,
        email,
        password,
    } = payload;

    let user = create_user(state, username, email, password, Role::Customer).await?;
    tracing::info!(user_id = %user.id, "user registered");

    audit::record(
        &state.pool,
        Some(user.id),
        "user_register",
        "users",
        serde_json::json!({ "user_id": user.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "User created",
        User::from(user),
        Some(Meta::empty()),
    ))
}

pub async fn login_user(
    state: &AppState,
    payload: LoginRequest,
) -> AppResult<ApiResponse<LoginResponse>> {
    let LoginRequest { email, password } = payload;
    let user = Users::find()
        .filter(UserCol::Email.eq(normalize_email(&email)))
        .one(&state.orm)
        .await?;

    let user = match user {
        Some(u) => u,
        None => {
            let _ = tokio::task::spawn_blocking(move || {
                if let Some(dummy) = DUMMY_HASH.as_deref() {
                    let _ = verify_blocking(&password, dummy);
                }
            })
            .await;
            return Err(AppError::InvalidCredentials);
        }
    };

    if !verify_password(password, user.password_hash.clone()).await? {
        return Err(AppError::InvalidCredentials);
    }

    let user = User::from(user);
    let principal = AuthUser {
        user_id: user.id,
        username: user.username.clone(),
        email: user.email.clone(),
        role: user.role,
    };
    let token = state.tokens.mint(&principal)?;

    audit::record(
        &state.pool,
        Some(user.id),
        "user_login",
        "users",
        serde_json::json!({ "user_id": user.id }),
    )
    .await;

    let resp = LoginResponse {
        token,
        token_type: "Bearer".to_string(),
        expires_in: state.tokens.ttl().num_seconds(),
        user,
    };

    Ok(ApiResponse::success("Logged in", resp, Some(Meta::empty())))
}

pub async fn current_user(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<User>> {
    let found = Users::find_by_id(user.user_id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound("User"))?;
    Ok(ApiResponse::success("Current user", User::from(found), None))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hash_is_salted_and_verifies() {
        let first = hash_password("pw123".into()).await.expect("hash");
        let second = hash_password("pw123".into()).await.expect("hash");
        assert_ne!(first, second);
        assert!(first.starts_with("$argon2"));
        assert!(verify_password("pw123".into(), first.clone()).await.unwrap());
        assert!(!verify_password("pw124".into(), first).await.unwrap());
    }

    #[tokio::test]
    async fn corrupt_hash_is_internal_error() {
        let err = verify_password("pw".into(), "plaintext".into())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[test]
    fn emails_are_normalized() {
        assert_eq!(normalize_email("  Alice@X.com "), "alice@x.com");
    }

    #[test]
    fn username_length_is_checked_after_trimming() {
        assert_eq!(normalize_username("  alice ").unwrap(), "alice");
        let err = normalize_username("  ab  ").unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
        assert!(normalize_username("     ").is_err());
    }
}
