//! Transcoder REST adapter.
//!
//! Implements the [`transcoder::TranscoderConnector`] and
//! [`transcoder::TranscoderService`] traits over the service's REST/JSON
//! surface:
//!
//! | Operation | Request |
//! |-----------|---------|
//! | create | `POST {endpoint}/v1/{parent}/jobs` with the job as the JSON body |
//! | get | `GET {endpoint}/v1/{name}` |
//!
//! Every request carries the configured bearer token. Obtaining that token
//! (service accounts, metadata server, `gcloud auth print-access-token`) is
//! the caller's concern.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** HTTP transport, authentication headers, and the
//! mapping of HTTP failures onto [`transcoder::ServiceError`] all live here.
//! The [`transcoder`] crate sees only the port traits.

mod config;
mod connector;
mod status;

pub use config::{RestConfig, DEFAULT_ENDPOINT};
pub use connector::{RestConnector, RestService};
