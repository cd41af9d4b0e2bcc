use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{FromRequest, Multipart, Request, State},
    http::{StatusCode, header},
};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::attachment::{FALLBACK_CONTENT_TYPE, FilePart};
use crate::domain::types::{
    ApplicantFields, Application, EncodedAttachment, EncodedSubmission, MultipartSubmission,
    SubmissionPayload,
};
use crate::error::IntakeServiceError;
use crate::state::AppState;
use crate::usecase::application::{ListApplicationsUseCase, SubmitApplicationUseCase};

// ── Submission payload extraction ────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodedSubmissionRequest {
    pub passport_type: Option<String>,
    pub online_registration_number: Option<String>,
    pub full_name: Option<String>,
    pub date_of_birth: Option<String>,
    pub mobile_number: Option<String>,
    #[serde(default)]
    pub files: BTreeMap<String, EncodedAttachmentRequest>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodedAttachmentRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub data: String,
    #[serde(default = "default_content_type")]
    pub content_type: String,
}

fn default_content_type() -> String {
    FALLBACK_CONTENT_TYPE.to_owned()
}

impl From<EncodedSubmissionRequest> for EncodedSubmission {
    fn from(body: EncodedSubmissionRequest) -> Self {
        Self {
            fields: ApplicantFields {
                passport_type: body.passport_type,
                online_registration_number: body.online_registration_number,
                full_name: body.full_name,
                date_of_birth: body.date_of_birth,
                mobile_number: body.mobile_number,
            },
            extra: body.extra,
            files: body
                .files
                .into_iter()
                .map(|(category, record)| {
                    (
                        category,
                        EncodedAttachment {
                            name: record.name,
                            data: record.data,
                            content_type: record.content_type,
                        },
                    )
                })
                .collect(),
        }
    }
}

/// Resolve the two accepted wire shapes into one tagged payload by
/// content type: multipart parts stay raw binary, anything else is read as
/// the encoded JSON body.
impl<S> FromRequest<S> for SubmissionPayload
where
    S: Send + Sync,
{
    type Rejection = IntakeServiceError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|_| IntakeServiceError::InvalidBody)?;
            read_multipart(multipart).await
        } else {
            let Json(body) = Json::<EncodedSubmissionRequest>::from_request(req, state)
                .await
                .map_err(|_| IntakeServiceError::InvalidBody)?;
            Ok(Self::Encoded(body.into()))
        }
    }
}

async fn read_multipart(mut multipart: Multipart) -> Result<SubmissionPayload, IntakeServiceError> {
    let mut submission = MultipartSubmission::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| IntakeServiceError::InvalidBody)?
    {
        let name = field.name().map(str::to_owned);
        let file_name = field.file_name().map(str::to_owned);
        let content_type = field.content_type().map(str::to_owned);
        let Some(name) = name else {
            continue;
        };
        // Only a filename marks an uploaded file; text fields may declare a
        // content type of their own.
        if file_name.is_some() {
            let data = field
                .bytes()
                .await
                .map_err(|_| IntakeServiceError::InvalidBody)?;
            submission.parts.push((
                name,
                FilePart {
                    file_name,
                    content_type,
                    data: data.to_vec(),
                },
            ));
        } else {
            let value = field
                .text()
                .await
                .map_err(|_| IntakeServiceError::InvalidBody)?;
            submission.fields.push((name, value));
        }
    }
    Ok(SubmissionPayload::Multipart(submission))
}

// ── GET /applications ────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationResponse {
    pub id: String,
    pub application_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passport_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub online_registration_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_number: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    pub files: BTreeMap<String, AttachmentResponse>,
    #[serde(serialize_with = "passystem_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "passystem_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentResponse {
    pub name: String,
    /// Base64-encoded payload bytes.
    pub data: String,
    pub content_type: String,
}

/// Keys the listing serializes as named fields. Stored extra entries under
/// these names are dropped so a response never repeats a key.
const RESERVED_KEYS: [&str; 10] = [
    "id",
    "applicationId",
    "passportType",
    "onlineRegistrationNumber",
    "fullName",
    "dateOfBirth",
    "mobileNumber",
    "files",
    "createdAt",
    "updatedAt",
];

impl From<Application> for ApplicationResponse {
    fn from(application: Application) -> Self {
        let files = application
            .attachments
            .into_iter()
            .map(|attachment| {
                (
                    attachment.category,
                    AttachmentResponse {
                        name: attachment.name,
                        data: STANDARD.encode(&attachment.data),
                        content_type: attachment.content_type,
                    },
                )
            })
            .collect();
        let mut extra = application.extra;
        extra.retain(|key, _| !RESERVED_KEYS.contains(&key.as_str()));
        Self {
            id: application.id.to_string(),
            application_id: application.application_id,
            passport_type: application.fields.passport_type,
            online_registration_number: application.fields.online_registration_number,
            full_name: application.fields.full_name,
            date_of_birth: application.fields.date_of_birth,
            mobile_number: application.fields.mobile_number,
            extra,
            files,
            created_at: application.created_at,
            updated_at: application.updated_at,
        }
    }
}

pub async fn list_applications(
    State(state): State<AppState>,
) -> Result<Json<Vec<ApplicationResponse>>, IntakeServiceError> {
    let usecase = ListApplicationsUseCase {
        repo: state.application_repo(),
    };
    let applications = usecase.execute().await?;
    Ok(Json(
        applications
            .into_iter()
            .map(ApplicationResponse::from)
            .collect(),
    ))
}

// ── POST /applications ───────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitApplicationResponse {
    pub application_id: String,
    pub result: InsertAcknowledgement,
}

/// Insertion acknowledgement, mirroring the store's insert-result shape.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertAcknowledgement {
    pub acknowledged: bool,
    pub inserted_id: String,
}

pub async fn submit_application(
    State(state): State<AppState>,
    payload: SubmissionPayload,
) -> Result<(StatusCode, Json<SubmitApplicationResponse>), IntakeServiceError> {
    let usecase = SubmitApplicationUseCase {
        repo: state.application_repo(),
        ids: state.application_ids(),
    };
    let receipt = usecase.execute(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(SubmitApplicationResponse {
            application_id: receipt.application_id,
            result: InsertAcknowledgement {
                acknowledged: true,
                inserted_id: receipt.record_id.to_string(),
            },
        }),
    ))
}
