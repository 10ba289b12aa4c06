use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use password_hash::rand_core::OsRng;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set, SqlErr, TransactionTrait,
};
use sea_orm::ActiveValue::NotSet;
use uuid::Uuid;

use crate::{
    config::AppConfig,
    dto::auth::{Claims, RefreshRequest, RegisterAdminRequest, RegisterRequest, TokenPair, TokenRequest, TokenType},
    entity::{
        UserProfiles, UserRole, Users, user_profiles::ActiveModel as ProfileActive,
        users::{self, ActiveModel as UserActive, Column as UserCol},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::UserDetails,
    response::{ApiResponse, Meta},
    state::AppState,
    validation::{
        EMAIL_MAX_LEN, FieldValidator, PERSON_NAME_MAX_LEN, PHONE_MAX_LEN, USERNAME_MAX_LEN,
        field_error, is_digits, looks_like_email,
    },
};

const MIN_PASSWORD_LEN: usize = 8;

pub async fn register_user(
    state: &AppState,
    payload: RegisterRequest,
) -> AppResult<ApiResponse<UserDetails>> {
    let mut validator = validate_account_fields(
        &payload.username,
        &payload.email,
        &payload.password,
        &payload.first_name,
        &payload.last_name,
    );
    let phone_number = payload
        .phone_number
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty());
    if let Some(phone) = &phone_number {
        if !is_digits(phone) {
            validator.add("phone_number", "Phone number must contain only digits.");
        }
        validator.max_len("phone_number", phone, PHONE_MAX_LEN);
    }
    validator.finish()?;
    check_account_uniqueness(&state.orm, &payload.username, &payload.email).await?;

    let txn = state.orm.begin().await?;
    let user = insert_user(
        &txn,
        &payload.username,
        &payload.email,
        &payload.password,
        &payload.first_name,
        &payload.last_name,
        UserRole::User,
    )
    .await?;

    let profile = ProfileActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.id),
        phone_number: Set(phone_number),
        address: Set(payload.address.filter(|a| !a.trim().is_empty())),
    }
    .insert(&txn)
    .await?;
    txn.commit().await?;

    tracing::info!(user_id = %user.id, username = %user.username, "user registered");

    Ok(ApiResponse::success(
        "User created",
        UserDetails::new(user, Some(profile)),
        Some(Meta::empty()),
    ))
}

pub async fn register_admin(
    state: &AppState,
    caller: &AuthUser,
    payload: RegisterAdminRequest,
) -> AppResult<ApiResponse<UserDetails>> {
    ensure_admin(caller)?;

    validate_account_fields(
        &payload.username,
        &payload.email,
        &payload.password,
        &payload.first_name,
        &payload.last_name,
    )
    .finish()?;
    check_account_uniqueness(&state.orm, &payload.username, &payload.email).await?;

    let user = insert_user(
        &state.orm,
        &payload.username,
        &payload.email,
        &payload.password,
        &payload.first_name,
        &payload.last_name,
        UserRole::Admin,
    )
    .await?;

    tracing::info!(user_id = %user.id, created_by = %caller.user_id, "admin user registered");

    Ok(ApiResponse::success(
        "Admin user created",
        UserDetails::new(user, None),
        Some(Meta::empty()),
    ))
}

pub async fn user_details(state: &AppState, caller: &AuthUser) -> AppResult<ApiResponse<UserDetails>> {
    let found = Users::find_by_id(caller.user_id)
        .find_also_related(UserProfiles)
        .one(&state.orm)
        .await?;
    let (user, profile) = found.ok_or(AppError::NotFound("User"))?;

    Ok(ApiResponse::success(
        "OK",
        UserDetails::new(user, profile),
        Some(Meta::empty()),
    ))
}

pub async fn obtain_tokens(
    state: &AppState,
    payload: TokenRequest,
) -> AppResult<ApiResponse<TokenPair>> {
    let TokenRequest { username, password } = payload;
    let user = Users::find()
        .filter(UserCol::Username.eq(username.as_str()))
        .one(&state.orm)
        .await?;

    let user = match user {
        Some(u) => u,
        None => return Err(invalid_credentials()),
    };

    let parsed_hash = PasswordHash::new(&user.password_hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;

    if Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_err()
    {
        return Err(invalid_credentials());
    }

    let tokens = issue_token_pair(&state.config, user.id, user.role)?;
    tracing::info!(user_id = %user.id, "tokens issued");

    Ok(ApiResponse::success("Logged in", tokens, Some(Meta::empty())))
}

pub async fn refresh_tokens(
    state: &AppState,
    payload: RefreshRequest,
) -> AppResult<ApiResponse<TokenPair>> {
    let claims = decode_token(&state.config, &payload.refresh, TokenType::Refresh)?;
    let user_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::Unauthorized("Invalid user id in token".into()))?;

    // Re-read the role so a demoted account does not keep admin rights.
    let user = Users::find_by_id(user_id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User no longer exists".into()))?;

    let tokens = issue_token_pair(&state.config, user.id, user.role)?;
    Ok(ApiResponse::success("Token refreshed", tokens, Some(Meta::empty())))
}

/// The earliest-created admin account, used as the default shelter manager.
pub async fn find_root_admin<C: ConnectionTrait>(db: &C) -> AppResult<Option<users::Model>> {
    let admin = Users::find()
        .filter(UserCol::Role.eq(UserRole::Admin))
        .order_by_asc(UserCol::CreatedAt)
        .order_by_asc(UserCol::Id)
        .one(db)
        .await?;
    Ok(admin)
}

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();
    Ok(hash)
}

pub fn issue_token_pair(config: &AppConfig, user_id: Uuid, role: UserRole) -> AppResult<TokenPair> {
    let access = encode_token(
        config,
        user_id,
        role,
        TokenType::Access,
        Duration::minutes(config.access_token_ttl_minutes),
    )?;
    let refresh = encode_token(
        config,
        user_id,
        role,
        TokenType::Refresh,
        Duration::hours(config.refresh_token_ttl_hours),
    )?;
    Ok(TokenPair { access, refresh })
}

pub fn encode_token(
    config: &AppConfig,
    user_id: Uuid,
    role: UserRole,
    token_type: TokenType,
    ttl: Duration,
) -> AppResult<String> {
    let expiration = Utc::now()
        .checked_add_signed(ttl)
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

    let claims = Claims {
        sub: user_id.to_string(),
        role,
        token_type,
        exp: expiration.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

pub fn decode_token(config: &AppConfig, token: &str, expected: TokenType) -> AppResult<Claims> {
    let decoded = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::Unauthorized("Invalid or expired token".into()))?;

    if decoded.claims.token_type != expected {
        return Err(AppError::Unauthorized("Token has wrong type".into()));
    }
    Ok(decoded.claims)
}

fn invalid_credentials() -> AppError {
    AppError::Unauthorized("No active account found with the given credentials".into())
}

fn validate_account_fields(
    username: &str,
    email: &str,
    password: &str,
    first_name: &str,
    last_name: &str,
) -> FieldValidator {
    let mut validator = FieldValidator::new();
    validator
        .require("username", username)
        .require("email", email)
        .require("first_name", first_name)
        .require("last_name", last_name)
        .max_len("username", username, USERNAME_MAX_LEN)
        .max_len("email", email, EMAIL_MAX_LEN)
        .max_len("first_name", first_name, PERSON_NAME_MAX_LEN)
        .max_len("last_name", last_name, PERSON_NAME_MAX_LEN);
    if !email.trim().is_empty() && !looks_like_email(email.trim()) {
        validator.add("email", "Enter a valid email address.");
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        validator.add(
            "password",
            format!("Password must be at least {MIN_PASSWORD_LEN} characters long."),
        );
    }
    validator
}

/// Report taken usernames and emails together; a race past this check is caught by [`duplicate_account`].
async fn check_account_uniqueness<C: ConnectionTrait>(
    db: &C,
    username: &str,
    email: &str,
) -> AppResult<()> {
    let mut validator = FieldValidator::new();
    let username_taken = Users::find()
        .filter(UserCol::Username.eq(username.trim()))
        .one(db)
        .await?
        .is_some();
    if username_taken {
        validator.add("username", "A user with this username already exists.");
    }

    let email_taken = Users::find()
        .filter(UserCol::Email.eq(email.trim()))
        .one(db)
        .await?
        .is_some();
    if email_taken {
        validator.add("email", "A user with this email already exists.");
    }
    validator.finish()
}

async fn insert_user<C: ConnectionTrait>(
    db: &C,
    username: &str,
    email: &str,
    password: &str,
    first_name: &str,
    last_name: &str,
    role: UserRole,
) -> AppResult<users::Model> {
    let user = UserActive {
        id: Set(Uuid::new_v4()),
        username: Set(username.trim().to_string()),
        email: Set(email.trim().to_string()),
        password_hash: Set(hash_password(password)?),
        first_name: Set(first_name.trim().to_string()),
        last_name: Set(last_name.trim().to_string()),
        role: Set(role),
        created_at: NotSet,
    }
    .insert(db)
    .await
    .map_err(duplicate_account)?;
    Ok(user)
}

fn duplicate_account(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) if detail.contains("email") => {
            field_error("email", "A user with this email already exists.")
        }
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            field_error("username", "A user with this username already exists.")
        }
        _ => AppError::OrmError(err),
    }
}
