// src/error.rs

use std::fmt;

use validator::ValidationErrors;

/// Global Application Error Enum.
/// Every fallible operation of the client and the wizard returns this type.
#[derive(Debug)]
pub enum AppError {
    // Input rejected before any request was issued.
    Validation(ValidationErrors),

    // Missing session token, or the API answered 401/403.
    AuthError(String),

    // The API answered 404 (or reported the record as missing).
    NotFound(String),

    // Any other non-success status from the Recruiting API.
    Api { status: u16, message: String },

    // The request never produced a response.
    Network(String),

    // The response body could not be decoded.
    InvalidResponse(String),

    // Operation not allowed in the current wizard state.
    InvalidState(String),

    // Bad configuration value.
    Config(String),
}

impl AppError {
    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation(_))
    }

    /// Field names that failed validation, sorted. Empty for other variants.
    pub fn invalid_fields(&self) -> Vec<String> {
        match self {
            AppError::Validation(errors) => {
                let mut fields: Vec<String> = errors
                    .errors()
                    .keys()
                    .map(|field| field.to_string())
                    .collect();
                fields.sort();
                fields
            }
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(errors) => write!(f, "Validation failed: {}", errors),
            AppError::AuthError(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Api { status, message } => write!(f, "API error {}: {}", status, message),
            AppError::Network(msg) => write!(f, "Network error: {}", msg),
            AppError::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
            AppError::InvalidState(msg) => write!(f, "Invalid state: {}", msg),
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Converts `reqwest::Error` so that `?` works on request futures.
/// Decode failures are told apart from transport failures.
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AppError::InvalidResponse(err.to_string())
        } else {
            AppError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidResponse(err.to_string())
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(errors)
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        AppError::Config(err.to_string())
    }
}
