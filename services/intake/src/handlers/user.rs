use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::domain::types::User;
use crate::error::IntakeServiceError;
use crate::state::AppState;
use crate::usecase::user::{
    GetUserUseCase, ListUsersUseCase, SignupUserInput, SignupUserUseCase,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: String,
    #[serde(rename = "photoURL")]
    pub photo_url: Option<String>,
    #[serde(serialize_with = "passystem_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "passystem_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email,
            name: user.name,
            role: user.role,
            photo_url: user.photo_url,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

// ── GET /users ───────────────────────────────────────────────────────────────

pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, IntakeServiceError> {
    let usecase = ListUsersUseCase {
        repo: state.user_repo(),
    };
    let users = usecase.execute().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

// ── POST /users ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SignupUserRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(rename = "photoURL")]
    pub photo_url: Option<String>,
}

/// Signup upsert: 201 when the email was seen for the first time, 200 when an
/// existing record was updated in place.
pub async fn signup_user(
    State(state): State<AppState>,
    Json(body): Json<SignupUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), IntakeServiceError> {
    let usecase = SignupUserUseCase {
        repo: state.user_repo(),
    };
    let outcome = usecase
        .execute(SignupUserInput {
            email: body.email,
            name: body.name,
            role: body.role,
            photo_url: body.photo_url,
        })
        .await?;
    let status = if outcome.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(UserResponse::from(outcome.user))))
}

// ── GET /users/{email} ───────────────────────────────────────────────────────

pub async fn get_user(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<UserResponse>, IntakeServiceError> {
    let usecase = GetUserUseCase {
        repo: state.user_repo(),
    };
    let user = usecase.execute(&email).await?;
    Ok(Json(UserResponse::from(user)))
}
