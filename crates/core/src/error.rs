/// Shown when the enhancement service cannot be reached at all.
pub const TRANSPORT_FAILURE_MESSAGE: &str =
    "Failed to connect to the model endpoint. Please ensure it is running and accessible.";

/// Shown when the service answered but reported `success: false`.
pub const LOGICAL_FAILURE_MESSAGE: &str = "Processing failed according to the backend.";

/// Errors from the image reference codec.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("Malformed image reference: {0}")]
    MalformedReference(String),
}

/// Classified failure of a single enhancement round-trip.
///
/// The `Display` output of each variant is the human-readable message the
/// workflow machine stores in its `error` state.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EnhanceError {
    /// Bad input or misconfiguration, detected before any network I/O.
    #[error("{0}")]
    Validation(String),

    /// The request could not be completed (refused, DNS, timeout, ...).
    #[error("{}", TRANSPORT_FAILURE_MESSAGE)]
    Transport {
        /// Underlying client error, for logs only.
        detail: String,
    },

    /// The service rejected the request or answered with a body that does
    /// not match the documented contract.
    #[error("{message}")]
    Service { status: u16, message: String },

    /// The service accepted the request but could not enhance the image.
    #[error("{}", LOGICAL_FAILURE_MESSAGE)]
    LogicalFailure,

    #[error(transparent)]
    Codec(#[from] CodecError),
}

impl EnhanceError {
    /// Short machine-readable name of the error kind, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Transport { .. } => "transport",
            Self::Service { .. } => "service",
            Self::LogicalFailure => "logical_failure",
            Self::Codec(_) => "malformed_reference",
        }
    }
}
