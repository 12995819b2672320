/// Failures reported by a [`CaseApi`](crate::api::CaseApi) implementation.
///
/// The page controller never shows these to the user directly: every variant is
/// logged and collapsed into the generic retry message of the handler that hit it.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("failed to decode response body: {0}")]
    Decode(String),
    #[error("failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("invalid multipart field {field}: {reason}")]
    InvalidPart { field: String, reason: String },
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Errors raised while turning submitted form data into a request.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("sighting form has no person id")]
    MissingPersonId,
    #[error("invalid person id: {0}")]
    InvalidPersonId(#[from] findthem_types::PersonIdError),
}

pub type FormResult<T> = std::result::Result<T, FormError>;
