//! Authentication handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    response::Json,
    routing::{get, post},
    Extension, Router,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{auth_middleware, CurrentUser};
use crate::api::AppState;
use crate::domain::{AuthSession, Credentials, Profile, PublicUser};
use crate::errors::AppResult;

/// User registration request
#[derive(Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[serde(default)]
    pub roles: Option<Vec<String>>,
}

/// User login request
#[derive(Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Create authentication routes
pub fn auth_routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/users/:id", get(find_user))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .merge(protected)
}

/// Register a new user and return a session
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthSession>)> {
    let profile = Profile {
        name: payload.name,
        roles: payload.roles,
    };
    let session = state
        .credentials
        .register_and_issue(Credentials::new(payload.email, payload.password), profile)
        .await?;

    Ok((StatusCode::CREATED, Json(session)))
}

/// Login and return a session
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<AuthSession>> {
    let session = state
        .credentials
        .login(Credentials::new(payload.email, payload.password))
        .await?;

    Ok(Json(session))
}

/// Fetch a user by id (requires a valid session token)
pub async fn find_user(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<PublicUser>> {
    tracing::debug!(requested_by = %current_user.id, user_id = %id, "Fetching user");
    let user = state.credentials.find_by_id(id).await?;
    Ok(Json(user))
}
