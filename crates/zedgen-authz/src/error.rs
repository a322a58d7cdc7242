//! Authorization error types.

use thiserror::Error;

/// Errors returned by authorization engines.
#[derive(Debug, Error)]
pub enum AuthzError {
    /// A request carried no subject ids.
    #[error("no input")]
    NoInput,

    /// The subject lacks the permission on the resource.
    #[error("permission '{permission}' denied on {resource} for {subject}")]
    PermissionDenied {
        resource: String,
        permission: String,
        subject: String,
    },

    /// The engine backend failed.
    #[error("engine error: {message}")]
    Engine { message: String },
}

/// Result type for authorization operations.
pub type AuthzResult<T> = Result<T, AuthzError>;
