//! Attachment category vocabulary and normalization.

/// Document categories an applicant may attach, by wire name.
pub const ATTACHMENT_CATEGORIES: [&str; 11] = [
    "applicationCopy",
    "nidBirthCertificate",
    "nidOnlineCopy",
    "studentJobCard",
    "fatherNidBirthCertificate",
    "motherNidBirthCertificate",
    "utilityBillCopy",
    "previousPassport",
    "landRegister",
    "citizenshipCertificate",
    "onlineGD",
];

/// Categories that must carry a non-empty entry in an encoded submission.
pub const MANDATORY_CATEGORIES: [&str; 8] = [
    "applicationCopy",
    "nidBirthCertificate",
    "nidOnlineCopy",
    "fatherNidBirthCertificate",
    "motherNidBirthCertificate",
    "utilityBillCopy",
    "landRegister",
    "citizenshipCertificate",
];

pub fn is_known_category(name: &str) -> bool {
    ATTACHMENT_CATEGORIES.contains(&name)
}

/// Content type recorded when an uploaded part declares none.
pub const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// An uploaded binary part as it arrived, before normalization.
#[derive(Debug, Clone)]
pub struct FilePart {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

/// The single persisted attachment shape, whatever the submission variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub category: String,
    pub name: String,
    pub data: Vec<u8>,
    pub content_type: String,
}

/// Convert an uploaded part into the canonical attachment record.
///
/// Pure and stateless. A missing filename normalizes to the empty string and
/// a missing content type to [`FALLBACK_CONTENT_TYPE`]; the payload bytes are
/// carried through untouched.
pub fn normalize(category: &str, part: FilePart) -> Attachment {
    Attachment {
        category: category.to_owned(),
        name: part.file_name.unwrap_or_default(),
        data: part.data,
        content_type: part
            .content_type
            .unwrap_or_else(|| FALLBACK_CONTENT_TYPE.to_owned()),
    }
}
