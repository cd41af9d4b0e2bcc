use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use base64::{Engine as _, engine::general_purpose::STANDARD};
use chrono::{DateTime, Utc};
use serde_json::Map;
use uuid::Uuid;

use passystem_intake::domain::application_id::ApplicationIdGenerator;
use passystem_intake::domain::attachment::MANDATORY_CATEGORIES;
use passystem_intake::domain::repository::{ApplicationRepository, UserRepository};
use passystem_intake::domain::types::{
    ApplicantFields, Application, ApplicationDraft, EncodedAttachment, EncodedSubmission,
    UpsertOutcome, User,
};
use passystem_intake::error::IntakeServiceError;

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub fn test_user() -> User {
    User {
        id: Uuid::parse_str("00000000-0000-0000-0000-000000000001").unwrap(),
        email: "applicant@example.com".to_owned(),
        name: "Test Applicant".to_owned(),
        role: "user".to_owned(),
        photo_url: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// Encoded submission carrying every mandatory field and every mandatory
/// attachment category, with payloads already base64 encoded.
pub fn complete_encoded_submission() -> EncodedSubmission {
    let mut files = BTreeMap::new();
    for category in MANDATORY_CATEGORIES {
        files.insert(
            category.to_owned(),
            EncodedAttachment {
                name: format!("{category}.pdf"),
                data: STANDARD.encode(format!("{category} bytes")),
                content_type: "application/pdf".to_owned(),
            },
        );
    }
    EncodedSubmission {
        fields: ApplicantFields {
            passport_type: Some("Ordinary".to_owned()),
            online_registration_number: Some("OID1023456789".to_owned()),
            full_name: Some("Hasan Mahmud".to_owned()),
            date_of_birth: Some("1998-04-12".to_owned()),
            mobile_number: Some("01712345678".to_owned()),
        },
        extra: Map::new(),
        files,
    }
}

// ── MockUserRepo ─────────────────────────────────────────────────────────────

/// In-memory user store with the same semantics as the database repository:
/// email is the natural key, and the update path keeps the stored `id` and
/// `created_at` while replacing the mutable profile fields.
pub struct MockUserRepo {
    pub users: Arc<Mutex<Vec<User>>>,
}

impl MockUserRepo {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(Mutex::new(users)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Handle for inspecting stored users after the repo moved into a usecase.
    pub fn users_handle(&self) -> Arc<Mutex<Vec<User>>> {
        Arc::clone(&self.users)
    }
}

impl UserRepository for MockUserRepo {
    async fn list(&self) -> Result<Vec<User>, IntakeServiceError> {
        Ok(self.users.lock().unwrap().clone())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, IntakeServiceError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn upsert(&self, candidate: &User) -> Result<UpsertOutcome, IntakeServiceError> {
        let mut users = self.users.lock().unwrap();
        match users.iter_mut().find(|u| u.email == candidate.email) {
            Some(existing) => {
                existing.name = candidate.name.clone();
                existing.role = candidate.role.clone();
                existing.photo_url = candidate.photo_url.clone();
                existing.updated_at = candidate.updated_at;
                Ok(UpsertOutcome {
                    created: false,
                    user: existing.clone(),
                })
            }
            None => {
                users.push(candidate.clone());
                Ok(UpsertOutcome {
                    created: true,
                    user: candidate.clone(),
                })
            }
        }
    }
}

// ── MockApplicationRepo ──────────────────────────────────────────────────────

/// In-memory application store that enforces the unique `application_id`
/// constraint, so a minting collision surfaces as `ApplicationIdConflict`
/// exactly like the database repository.
pub struct MockApplicationRepo {
    pub applications: Arc<Mutex<Vec<Application>>>,
}

impl MockApplicationRepo {
    pub fn empty() -> Self {
        Self {
            applications: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn applications_handle(&self) -> Arc<Mutex<Vec<Application>>> {
        Arc::clone(&self.applications)
    }
}

impl ApplicationRepository for MockApplicationRepo {
    async fn list(&self) -> Result<Vec<Application>, IntakeServiceError> {
        Ok(self.applications.lock().unwrap().clone())
    }

    async fn create(
        &self,
        application_id: &str,
        draft: &ApplicationDraft,
        now: DateTime<Utc>,
    ) -> Result<Uuid, IntakeServiceError> {
        let mut applications = self.applications.lock().unwrap();
        if applications
            .iter()
            .any(|a| a.application_id == application_id)
        {
            return Err(IntakeServiceError::ApplicationIdConflict);
        }
        let record_id = Uuid::now_v7();
        applications.push(Application {
            id: record_id,
            application_id: application_id.to_owned(),
            fields: draft.fields.clone(),
            extra: draft.extra.clone(),
            attachments: draft.attachments.clone(),
            created_at: now,
            updated_at: now,
        });
        Ok(record_id)
    }
}

// ── SequenceIds ──────────────────────────────────────────────────────────────

/// Mints a scripted sequence of ids, repeating the last entry once the
/// script runs out.
pub struct SequenceIds {
    pub ids: Vec<&'static str>,
    pub next: Mutex<usize>,
}

impl SequenceIds {
    pub fn new(ids: Vec<&'static str>) -> Self {
        Self {
            ids,
            next: Mutex::new(0),
        }
    }
}

impl ApplicationIdGenerator for SequenceIds {
    fn mint(&self) -> String {
        let mut next = self.next.lock().unwrap();
        let id = self.ids[(*next).min(self.ids.len() - 1)];
        *next += 1;
        id.to_owned()
    }
}
