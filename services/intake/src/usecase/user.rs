use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::UserRepository;
use crate::domain::types::{UpsertOutcome, User};
use crate::error::IntakeServiceError;

// ── ListUsers ────────────────────────────────────────────────────────────────

pub struct ListUsersUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> ListUsersUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<User>, IntakeServiceError> {
        self.repo.list().await
    }
}

// ── GetUser ──────────────────────────────────────────────────────────────────

pub struct GetUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> GetUserUseCase<R> {
    pub async fn execute(&self, email: &str) -> Result<User, IntakeServiceError> {
        self.repo
            .find_by_email(email)
            .await?
            .ok_or(IntakeServiceError::UserNotFound)
    }
}

// ── SignupUser ───────────────────────────────────────────────────────────────

pub struct SignupUserInput {
    pub email: String,
    pub name: String,
    pub role: String,
    pub photo_url: Option<String>,
}

pub struct SignupUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> SignupUserUseCase<R> {
    pub async fn execute(
        &self,
        input: SignupUserInput,
    ) -> Result<UpsertOutcome, IntakeServiceError> {
        // An empty email would store a record no lookup can ever reach.
        if input.email.is_empty() {
            return Err(IntakeServiceError::MissingFields);
        }
        let now = Utc::now();
        let candidate = User {
            id: Uuid::now_v7(),
            email: input.email,
            name: input.name,
            role: input.role,
            // A blank photo URL is stored as absent.
            photo_url: input.photo_url.filter(|url| !url.is_empty()),
            created_at: now,
            updated_at: now,
        };
        self.repo.upsert(&candidate).await
    }
}
