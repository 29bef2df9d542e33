//! Error types for the Transcoder job client.
//!
//! Errors are layered the same way the code is:
//!
//! - [`ServiceError`] is what a [`crate::TranscoderService`] returns when the
//!   remote service rejects a request or cannot be reached.
//! - [`ConnectError`] is what a [`crate::TranscoderConnector`] returns when no
//!   service handle could be built.
//! - [`ConfigError`] is produced by local validation of a [`crate::JobConfig`].
//! - [`TranscoderError`] is what [`crate::JobClient`] returns; it wraps the
//!   others with operation context.
//!
//! None of these types carry retry semantics. The client issues exactly one
//! request per operation; retrying is the caller's decision.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Operation;

// ---------------------------------------------------------------------------
// Service status codes
// ---------------------------------------------------------------------------

/// Canonical status codes reported by the remote service.
///
/// Serialised in `SCREAMING_SNAKE_CASE`, the form used in the `status` field of
/// JSON error bodies (e.g. `"NOT_FOUND"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusCode {
    Ok,
    Cancelled,
    Unknown,
    InvalidArgument,
    DeadlineExceeded,
    NotFound,
    AlreadyExists,
    PermissionDenied,
    ResourceExhausted,
    FailedPrecondition,
    Aborted,
    OutOfRange,
    Unimplemented,
    Internal,
    Unavailable,
    DataLoss,
    Unauthenticated,
}

impl StatusCode {
    /// Maps a numeric canonical code (as found in `google.rpc.Status.code`).
    ///
    /// Unrecognised values map to [`StatusCode::Unknown`].
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Ok,
            1 => Self::Cancelled,
            3 => Self::InvalidArgument,
            4 => Self::DeadlineExceeded,
            5 => Self::NotFound,
            6 => Self::AlreadyExists,
            7 => Self::PermissionDenied,
            8 => Self::ResourceExhausted,
            9 => Self::FailedPrecondition,
            10 => Self::Aborted,
            11 => Self::OutOfRange,
            12 => Self::Unimplemented,
            13 => Self::Internal,
            14 => Self::Unavailable,
            15 => Self::DataLoss,
            16 => Self::Unauthenticated,
            _ => Self::Unknown,
        }
    }

    /// Parses the `SCREAMING_SNAKE_CASE` name used in JSON error bodies.
    pub fn from_name(name: &str) -> Option<Self> {
        serde_json::from_value(serde_json::Value::String(name.to_string())).ok()
    }

    /// Returns the `SCREAMING_SNAKE_CASE` name of this code.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Cancelled => "CANCELLED",
            Self::Unknown => "UNKNOWN",
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::DeadlineExceeded => "DEADLINE_EXCEEDED",
            Self::NotFound => "NOT_FOUND",
            Self::AlreadyExists => "ALREADY_EXISTS",
            Self::PermissionDenied => "PERMISSION_DENIED",
            Self::ResourceExhausted => "RESOURCE_EXHAUSTED",
            Self::FailedPrecondition => "FAILED_PRECONDITION",
            Self::Aborted => "ABORTED",
            Self::OutOfRange => "OUT_OF_RANGE",
            Self::Unimplemented => "UNIMPLEMENTED",
            Self::Internal => "INTERNAL",
            Self::Unavailable => "UNAVAILABLE",
            Self::DataLoss => "DATA_LOSS",
            Self::Unauthenticated => "UNAUTHENTICATED",
        }
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Port-level errors
// ---------------------------------------------------------------------------

/// A failed call to the remote service.
///
/// Produced by: [`crate::TranscoderService`] implementations, both for error
/// responses from the service and for transport failures (which map to
/// [`StatusCode::Unavailable`] or [`StatusCode::DeadlineExceeded`]).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {message}")]
pub struct ServiceError {
    /// Canonical status code.
    pub code: StatusCode,
    /// Human-readable message from the service or the transport.
    pub message: String,
}

impl ServiceError {
    /// Creates a service error.
    pub fn new(code: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Returns `true` if the service reported that the resource does not exist.
    pub fn is_not_found(&self) -> bool {
        self.code == StatusCode::NotFound
    }
}

/// A service handle could not be established.
///
/// Produced by: [`crate::TranscoderConnector::connect`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    /// No bearer token was supplied.
    #[error("no access token configured")]
    MissingCredentials,

    /// The configured endpoint is not a usable base URL.
    #[error("invalid service endpoint '{endpoint}': {reason}")]
    InvalidEndpoint {
        /// The rejected endpoint.
        endpoint: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The underlying transport client could not be built.
    #[error("transport initialisation failed: {message}")]
    Transport {
        /// Description from the transport layer.
        message: String,
    },
}

// ---------------------------------------------------------------------------
// Configuration validation
// ---------------------------------------------------------------------------

/// A [`crate::JobConfig`] violates an invariant the service would reject.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A stream was declared with an empty key.
    #[error("stream keys must not be empty")]
    EmptyKey,

    /// Two elementary streams share a key.
    #[error("duplicate elementary stream key '{key}'")]
    DuplicateElementaryStream { key: String },

    /// Two mux streams share a key.
    #[error("duplicate mux stream key '{key}'")]
    DuplicateMuxStream { key: String },

    /// A mux stream lists no elementary streams.
    #[error("mux stream '{mux}' references no elementary streams")]
    EmptyMuxStream { mux: String },

    /// A mux stream references an elementary stream that is not declared.
    #[error("mux stream '{mux}' references undeclared elementary stream '{key}'")]
    UnknownElementaryStream { mux: String, key: String },

    /// Sprite quality outside `0..=100`.
    #[error("sprite sheet '{file_prefix}' quality {quality} is outside 0..=100")]
    SpriteQualityOutOfRange { file_prefix: String, quality: u32 },

    /// Sprite width, height, or grid dimensions are zero.
    #[error("sprite sheet '{file_prefix}' has a zero dimension")]
    SpriteDimension { file_prefix: String },

    /// The extraction strategy asks for zero sprites or a zero interval.
    #[error("sprite sheet '{file_prefix}' has an empty extraction strategy")]
    SpriteExtraction { file_prefix: String },

    /// The end offset does not come after the start offset.
    #[error("sprite sheet '{file_prefix}' ends before it starts")]
    SpriteTimeRange { file_prefix: String },

    /// A sprite sheet has an empty file prefix.
    #[error("sprite sheet file prefix must not be empty")]
    EmptyFilePrefix,
}

// ---------------------------------------------------------------------------
// Client-level errors
// ---------------------------------------------------------------------------

/// Errors returned by [`crate::JobClient`].
///
/// Each variant is propagated unchanged to the entry point; nothing in the
/// client recovers from them.
#[derive(Debug, Error)]
pub enum TranscoderError {
    /// The connection to the service could not be established.
    ///
    /// Produced by: [`crate::TranscoderConnector::connect`] failing before any
    /// request was sent.
    #[error("failed to initialise the transcoder client")]
    ClientInit {
        #[source]
        source: ConnectError,
    },

    /// The service call itself failed.
    ///
    /// Covers not-found, invalid-argument, permission-denied and transient
    /// unavailability alike; inspect [`ServiceError::code`] to tell them apart.
    #[error("{operation} failed for '{resource}'")]
    Request {
        /// Which client operation was running.
        operation: Operation,
        /// The resource name the request targeted (parent or job name).
        resource: String,
        #[source]
        source: ServiceError,
    },

    /// An argument was rejected locally before any connection was opened.
    #[error("invalid request: {message}")]
    InvalidRequest {
        /// Description of the rejected argument.
        message: String,
    },

    /// The job configuration failed local validation.
    #[error("invalid job configuration")]
    InvalidConfig(#[from] ConfigError),
}

impl TranscoderError {
    /// Returns `true` if the service reported that the targeted job does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Request { source, .. } if source.is_not_found())
    }

    /// Returns the service error, if the failure came from a request.
    pub fn service_error(&self) -> Option<&ServiceError> {
        match self {
            Self::Request { source, .. } => Some(source),
            _ => None,
        }
    }
}
