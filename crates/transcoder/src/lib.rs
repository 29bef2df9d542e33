//! Core domain for the Transcoder job client.
//!
//! This crate contains every domain concept used to submit and inspect jobs on
//! a managed video-transcoding service: resource-name identifiers, the job
//! configuration model, error types, the port traits the remote service is
//! reached through, and the [`JobClient`] that ties them together.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no I/O dependencies.
//! It defines *what* is sent to the service; infrastructure crates
//! (`transcoder-api`) define *how* it travels.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers and resource names (`ProjectId`, `JobName`, etc.) |
//! | [`types`] | Job and job-configuration value types (`Job`, `JobConfig`, `SpriteSheet`, etc.) |
//! | [`presets`] | The built-in sprite-sheet job configuration |
//! | [`errors`] | Service, connection and client error types |
//! | [`ports`] | `TranscoderConnector` / `TranscoderService` traits |
//! | [`client`] | `JobClient` and the `Mode` entry point |

pub mod client;
pub mod errors;
pub mod identifiers;
pub mod ports;
pub mod presets;
pub mod types;

mod duration;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use client::{JobClient, Mode, Operation};
pub use errors::{ConfigError, ConnectError, ServiceError, StatusCode, TranscoderError};
pub use identifiers::{
    InvocationId, JobId, JobName, LocationId, ParentName, ProjectId, ResourceNameError,
    StorageUri,
};
pub use ports::{CreateJobRequest, GetJobRequest, TranscoderConnector, TranscoderService};
pub use types::{
    AudioStream, ElementaryStream, ElementaryStreamKind, ExtractionStrategy, Job,
    JobConfig, JobStatus, MuxStream, ProcessingState, SpriteSheet, VideoCodecSettings,
    VideoStream,
};
