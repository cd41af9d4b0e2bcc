use base64::{Engine as _, engine::general_purpose::STANDARD};
use chrono::Utc;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::domain::application_id::ApplicationIdGenerator;
use crate::domain::attachment::{
    self, Attachment, MANDATORY_CATEGORIES, is_known_category,
};
use crate::domain::repository::ApplicationRepository;
use crate::domain::types::{
    ApplicantFields, Application, ApplicationDraft, EncodedSubmission, MultipartSubmission,
    SubmissionPayload,
};
use crate::error::IntakeServiceError;

// ── ListApplications ─────────────────────────────────────────────────────────

pub struct ListApplicationsUseCase<R: ApplicationRepository> {
    pub repo: R,
}

impl<R: ApplicationRepository> ListApplicationsUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<Application>, IntakeServiceError> {
        self.repo.list().await
    }
}

// ── SubmitApplication ────────────────────────────────────────────────────────

/// How many identifiers to try before giving up on finding a free one.
const MAX_MINT_ATTEMPTS: usize = 3;

/// Receipt for an accepted submission.
#[derive(Debug, Clone)]
pub struct SubmissionReceipt {
    pub application_id: String,
    pub record_id: Uuid,
}

pub struct SubmitApplicationUseCase<R, G>
where
    R: ApplicationRepository,
    G: ApplicationIdGenerator,
{
    pub repo: R,
    pub ids: G,
}

impl<R, G> SubmitApplicationUseCase<R, G>
where
    R: ApplicationRepository,
    G: ApplicationIdGenerator,
{
    pub async fn execute(
        &self,
        payload: SubmissionPayload,
    ) -> Result<SubmissionReceipt, IntakeServiceError> {
        // 1. Validate and normalize into the single persisted shape.
        let draft = match payload {
            SubmissionPayload::Multipart(submission) => resolve_multipart(submission)?,
            SubmissionPayload::Encoded(submission) => resolve_encoded(submission)?,
        };

        // 2. Mint an id and insert; the unique constraint on application_id
        //    turns a collision into a bounded re-mint instead of a duplicate.
        for _ in 0..MAX_MINT_ATTEMPTS {
            let application_id = self.ids.mint();
            match self.repo.create(&application_id, &draft, Utc::now()).await {
                Ok(record_id) => {
                    return Ok(SubmissionReceipt {
                        application_id,
                        record_id,
                    });
                }
                Err(IntakeServiceError::ApplicationIdConflict) => continue,
                Err(e) => return Err(e),
            }
        }
        Err(IntakeServiceError::ApplicationIdConflict)
    }
}

/// Multipart variant: no mandatory fields; every uploaded part must belong to
/// the category vocabulary; the first part per category wins.
fn resolve_multipart(
    submission: MultipartSubmission,
) -> Result<ApplicationDraft, IntakeServiceError> {
    tracing::debug!(
        fields = submission.fields.len(),
        parts = submission.parts.len(),
        "received multipart submission"
    );
    let (fields, extra) = split_known_fields(submission.fields);

    let mut attachments: Vec<Attachment> = Vec::new();
    for (category, part) in submission.parts {
        if !is_known_category(&category) {
            return Err(IntakeServiceError::UnexpectedAttachmentField(category));
        }
        if attachments.iter().any(|a| a.category == category) {
            continue;
        }
        attachments.push(attachment::normalize(&category, part));
    }

    Ok(ApplicationDraft {
        fields,
        extra,
        attachments,
    })
}

/// Encoded variant: the mandatory fields and attachment entries must be
/// present and non-empty, and every embedded payload must decode from base64.
fn resolve_encoded(submission: EncodedSubmission) -> Result<ApplicationDraft, IntakeServiceError> {
    let fields = submission.fields;
    let mandatory_fields = [
        &fields.passport_type,
        &fields.online_registration_number,
        &fields.full_name,
        &fields.date_of_birth,
        &fields.mobile_number,
    ];
    if mandatory_fields
        .iter()
        .any(|field| field.as_deref().is_none_or(str::is_empty))
    {
        return Err(IntakeServiceError::MissingFields);
    }
    for category in MANDATORY_CATEGORIES {
        let present = submission
            .files
            .get(category)
            .is_some_and(|record| !record.data.is_empty());
        if !present {
            return Err(IntakeServiceError::MissingFields);
        }
    }

    let mut attachments = Vec::with_capacity(submission.files.len());
    for (category, record) in submission.files {
        if !is_known_category(&category) {
            return Err(IntakeServiceError::UnexpectedAttachmentField(category));
        }
        let data = STANDARD
            .decode(record.data.as_bytes())
            .map_err(|_| IntakeServiceError::InvalidAttachmentData)?;
        attachments.push(Attachment {
            category,
            name: record.name,
            data,
            content_type: record.content_type,
        });
    }

    Ok(ApplicationDraft {
        fields,
        extra: submission.extra,
        attachments,
    })
}

/// Pull the known applicant fields out of a free-form field list; everything
/// else lands in the extra bag. A repeated key overwrites the earlier value.
fn split_known_fields(fields: Vec<(String, String)>) -> (ApplicantFields, Map<String, Value>) {
    let mut known = ApplicantFields::default();
    let mut extra = Map::new();
    for (key, value) in fields {
        match key.as_str() {
            "passportType" => known.passport_type = Some(value),
            "onlineRegistrationNumber" => known.online_registration_number = Some(value),
            "fullName" => known.full_name = Some(value),
            "dateOfBirth" => known.date_of_birth = Some(value),
            "mobileNumber" => known.mobile_number = Some(value),
            _ => {
                extra.insert(key, Value::String(value));
            }
        }
    }
    (known, extra)
}
