use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Intake service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum IntakeServiceError {
    #[error("User not found")]
    UserNotFound,
    #[error("Required fields are missing")]
    MissingFields,
    #[error("unexpected attachment field: {0}")]
    UnexpectedAttachmentField(String),
    #[error("attachment data is not valid base64")]
    InvalidAttachmentData,
    #[error("invalid request body")]
    InvalidBody,
    #[error("could not assign a unique application id")]
    ApplicationIdConflict,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl IntakeServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::MissingFields => "MISSING_FIELDS",
            Self::UnexpectedAttachmentField(_) => "UNEXPECTED_ATTACHMENT_FIELD",
            Self::InvalidAttachmentData => "INVALID_ATTACHMENT_DATA",
            Self::InvalidBody => "INVALID_BODY",
            Self::ApplicationIdConflict => "APPLICATION_ID_CONFLICT",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for IntakeServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::UserNotFound => StatusCode::NOT_FOUND,
            Self::MissingFields
            | Self::UnexpectedAttachmentField(_)
            | Self::InvalidAttachmentData
            | Self::InvalidBody => StatusCode::BAD_REQUEST,
            Self::ApplicationIdConflict | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 500s only — tower-http TraceLayer already records method/uri/status for all
        // requests. 4xx are expected client errors; logging them here would be noise.
        // Internal errors need the anyhow chain logged so the root cause is traceable.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        // Internal responses carry the anyhow chain in an `error` field.
        let body = match &self {
            Self::Internal(e) => serde_json::json!({
                "kind": self.kind(),
                "message": self.to_string(),
                "error": format!("{e:#}"),
            }),
            _ => serde_json::json!({
                "kind": self.kind(),
                "message": self.to_string(),
            }),
        };
        (status, axum::Json(body)).into_response()
    }
}
