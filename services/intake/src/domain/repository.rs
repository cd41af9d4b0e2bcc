#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::types::{Application, ApplicationDraft, UpsertOutcome, User};
use crate::error::IntakeServiceError;

/// Repository for the user directory.
pub trait UserRepository: Send + Sync {
    /// All users, oldest first.
    async fn list(&self) -> Result<Vec<User>, IntakeServiceError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, IntakeServiceError>;

    /// Insert-if-absent-else-update keyed on email, as a single atomic store
    /// operation. The update path keeps the stored `created_at` and ignores
    /// the candidate's `id`. Returns the stored user and whether a row was
    /// created.
    async fn upsert(&self, candidate: &User) -> Result<UpsertOutcome, IntakeServiceError>;
}

/// Repository for submitted applications.
pub trait ApplicationRepository: Send + Sync {
    /// All applications with their attachments, oldest first.
    async fn list(&self) -> Result<Vec<Application>, IntakeServiceError>;

    /// Insert one application and its attachment rows in a single
    /// transaction. Returns the stored record id, or
    /// [`IntakeServiceError::ApplicationIdConflict`] when `application_id`
    /// is already taken so the caller can re-mint.
    async fn create(
        &self,
        application_id: &str,
        draft: &ApplicationDraft,
        now: DateTime<Utc>,
    ) -> Result<Uuid, IntakeServiceError>;
}
