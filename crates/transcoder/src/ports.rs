//! Port traits through which the job client reaches the remote service.
//!
//! Infrastructure crates implement these; tests substitute fakes. A
//! [`TranscoderConnector`] hands out one [`TranscoderService`] handle per
//! operation, and the client closes that handle on every exit path.

use async_trait::async_trait;

use crate::{ConnectError, Job, JobName, ParentName, ServiceError};

/// Request to create `job` under `parent`.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateJobRequest {
    pub parent: ParentName,
    pub job: Job,
}

/// Request to look up the job called `name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetJobRequest {
    pub name: JobName,
}

/// Opens handles to the remote service.
#[async_trait]
pub trait TranscoderConnector: Send + Sync {
    /// Establishes a service handle (client construction, credentials).
    async fn connect(&self) -> Result<Box<dyn TranscoderService>, ConnectError>;
}

/// An open handle to the remote service.
///
/// Each method issues exactly one request and never retries.
#[async_trait]
pub trait TranscoderService: Send + Sync {
    /// Submits a job; the service assigns its ID and starts processing.
    async fn create_job(&self, request: CreateJobRequest) -> Result<Job, ServiceError>;

    /// Fetches the current state of an existing job.
    async fn get_job(&self, request: GetJobRequest) -> Result<Job, ServiceError>;

    /// Releases the handle. Called exactly once, after the last request.
    async fn close(&self);
}
