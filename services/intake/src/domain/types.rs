use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::domain::attachment::{Attachment, FilePart};

/// User account in the directory, keyed by email.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: String,
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Outcome of a signup upsert: the stored user and whether it was created
/// rather than updated in place.
#[derive(Debug, Clone)]
pub struct UpsertOutcome {
    pub created: bool,
    pub user: User,
}

/// Applicant fields the intake knows by name. Anything else an applicant
/// submits travels in the free-form extra bag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicantFields {
    pub passport_type: Option<String>,
    pub online_registration_number: Option<String>,
    pub full_name: Option<String>,
    pub date_of_birth: Option<String>,
    pub mobile_number: Option<String>,
}

/// A stored passport application with its attachments.
#[derive(Debug, Clone)]
pub struct Application {
    pub id: Uuid,
    pub application_id: String,
    pub fields: ApplicantFields,
    pub extra: Map<String, Value>,
    pub attachments: Vec<Attachment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A validated, normalized submission ready to persist.
#[derive(Debug, Clone)]
pub struct ApplicationDraft {
    pub fields: ApplicantFields,
    pub extra: Map<String, Value>,
    pub attachments: Vec<Attachment>,
}

/// A submission as it arrived at the HTTP boundary, before the shared
/// validation and normalization path.
#[derive(Debug, Clone)]
pub enum SubmissionPayload {
    Multipart(MultipartSubmission),
    Encoded(EncodedSubmission),
}

/// Multipart form submission: text fields plus uploaded parts keyed by
/// attachment category, both in arrival order.
#[derive(Debug, Clone, Default)]
pub struct MultipartSubmission {
    pub fields: Vec<(String, String)>,
    pub parts: Vec<(String, FilePart)>,
}

/// JSON submission with attachment records embedded base64-encoded.
#[derive(Debug, Clone, Default)]
pub struct EncodedSubmission {
    pub fields: ApplicantFields,
    pub extra: Map<String, Value>,
    pub files: BTreeMap<String, EncodedAttachment>,
}

/// An attachment record as embedded in an encoded submission.
#[derive(Debug, Clone)]
pub struct EncodedAttachment {
    pub name: String,
    /// Base64 payload as received; decoded during normalization.
    pub data: String,
    pub content_type: String,
}
