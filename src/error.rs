//! Error types for talking to the APIC/leaf REST API and correlating its data

use thiserror::Error;

/// Exit code for authentication failures (non-200 login, aborted prompt).
pub const EXIT_AUTH_FAILURE: i32 = 2;

/// Exit code for transport failures and unrecoverable class reads.
pub const EXIT_FETCH_FAILURE: i32 = 3;

/// Exit code for data errors that escaped the correlation pass.
pub const EXIT_DATA_ERROR: i32 = 4;

#[derive(Error, Debug)]
pub enum ApicError {
    #[error("Transport error reaching {url}: {reason}")]
    Transport { url: String, reason: String },

    #[error("Authentication failed: {detail}")]
    AuthenticationFailure {
        status: Option<u16>,
        detail: String,
    },

    #[error("Reading class {class} failed with HTTP status {status}")]
    FetchFailed { class: String, status: u16 },

    #[error("Field `{field}` not found in {context}")]
    FieldNotFound { field: String, context: String },

    #[error("{kind} reference `{reference}` points at nothing registered")]
    ReferenceInconsistency { kind: String, reference: String },
}

impl ApicError {
    pub fn auth_status(status: u16) -> Self {
        ApicError::AuthenticationFailure {
            status: Some(status),
            detail: format!("login request returned HTTP status {}", status),
        }
    }

    pub fn auth_aborted(detail: impl Into<String>) -> Self {
        ApicError::AuthenticationFailure {
            status: None,
            detail: detail.into(),
        }
    }

    pub fn field_not_found(field: &str, context: impl Into<String>) -> Self {
        ApicError::FieldNotFound {
            field: field.to_string(),
            context: context.into(),
        }
    }

    /// Process exit code for this error when it aborts a run.
    pub fn exit_code(&self) -> i32 {
        match self {
            ApicError::AuthenticationFailure { .. } => EXIT_AUTH_FAILURE,
            ApicError::Transport { .. } | ApicError::FetchFailed { .. } => EXIT_FETCH_FAILURE,
            ApicError::FieldNotFound { .. } | ApicError::ReferenceInconsistency { .. } => {
                EXIT_DATA_ERROR
            }
        }
    }
}

/// Picks the process exit code for an error chain; 1 when no `ApicError` is inside.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<ApicError>())
        .map(ApicError::exit_code)
        .unwrap_or(1)
}
