use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::domain::application_id::RandomApplicationIdGenerator;
use crate::infra::db::{DbApplicationRepository, DbUserRepository};

/// Shared application state passed to every handler via axum `State`.
///
/// The connection is held behind `Arc`: sea-orm's `DatabaseConnection` only
/// derives `Clone` when the `mock` feature is off, and the test profile
/// enables `mock` crate-wide.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn application_repo(&self) -> DbApplicationRepository {
        DbApplicationRepository {
            db: self.db.clone(),
        }
    }

    pub fn application_ids(&self) -> RandomApplicationIdGenerator {
        RandomApplicationIdGenerator
    }
}
