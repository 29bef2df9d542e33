//! The job client: builds requests, sends them through a connector, and wraps
//! failures with operation context.
//!
//! Every operation follows the same shape:
//!
//! 1. build and validate the request locally (no connection yet);
//! 2. acquire a [`TranscoderService`] handle from the connector;
//! 3. issue exactly one request;
//! 4. close the handle, whether the request succeeded or not.

use tracing::{debug, info, instrument};

use crate::presets::sprite_sheet_job_config;
use crate::{
    CreateJobRequest, ExtractionStrategy, GetJobRequest, Job, JobId, JobName, ParentName,
    StorageUri, TranscoderConnector, TranscoderError, TranscoderService,
};

/// The client operations, used as error and span context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CreateJob,
    GetJob,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CreateJob => f.write_str("CreateJob"),
            Self::GetJob => f.write_str("GetJob"),
        }
    }
}

/// What a single invocation should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Submit a new sprite-sheet job.
    Create {
        input_uri: StorageUri,
        output_uri: StorageUri,
        extraction: ExtractionStrategy,
    },
    /// Look up an existing job.
    Get { job_id: JobId },
}

/// Submits and looks up jobs through a [`TranscoderConnector`].
pub struct JobClient<C> {
    connector: C,
}

impl<C: TranscoderConnector> JobClient<C> {
    pub fn new(connector: C) -> Self {
        Self { connector }
    }

    /// Runs `mode` against the jobs collection `parent`.
    pub async fn run(&self, parent: &ParentName, mode: Mode) -> Result<Job, TranscoderError> {
        match mode {
            Mode::Create {
                input_uri,
                output_uri,
                extraction,
            } => {
                self.create_job(parent, &input_uri, &output_uri, extraction)
                    .await
            }
            Mode::Get { job_id } => self.get_job(&parent.job(job_id)).await,
        }
    }

    /// Creates a sprite-sheet job reading `input_uri` and writing under `output_uri`.
    pub async fn create_job(
        &self,
        parent: &ParentName,
        input_uri: &StorageUri,
        output_uri: &StorageUri,
        extraction: ExtractionStrategy,
    ) -> Result<Job, TranscoderError> {
        let config = sprite_sheet_job_config(extraction);
        self.submit_job(parent, Job::new(input_uri, output_uri, config))
            .await
    }

    /// Creates `job` under `parent` after validating its configuration.
    #[instrument(
        skip(self, parent, job),
        fields(parent = %parent, input = %job.input_uri, output = %job.output_uri)
    )]
    pub async fn submit_job(&self, parent: &ParentName, job: Job) -> Result<Job, TranscoderError> {
        if let Some(config) = &job.config {
            config.validate()?;
        }
        let request = CreateJobRequest {
            parent: parent.clone(),
            job,
        };

        let service = self.open().await?;
        let result = service.create_job(request).await;
        service.close().await;

        let created = result.map_err(|source| TranscoderError::Request {
            operation: Operation::CreateJob,
            resource: parent.to_string(),
            source,
        })?;
        info!(
            job = created.name.as_deref().unwrap_or_default(),
            state = %created.state,
            "job created"
        );
        Ok(created)
    }

    /// Fetches the current state of job `name`.
    #[instrument(skip(self, name), fields(name = %name))]
    pub async fn get_job(&self, name: &JobName) -> Result<Job, TranscoderError> {
        let request = GetJobRequest { name: name.clone() };

        let service = self.open().await?;
        let result = service.get_job(request).await;
        service.close().await;

        let job = result.map_err(|source| TranscoderError::Request {
            operation: Operation::GetJob,
            resource: name.to_string(),
            source,
        })?;
        info!(state = %job.state, "job fetched");
        Ok(job)
    }

    async fn open(&self) -> Result<Box<dyn TranscoderService>, TranscoderError> {
        let service = self
            .connector
            .connect()
            .await
            .map_err(|source| TranscoderError::ClientInit { source })?;
        debug!("service handle opened");
        Ok(service)
    }
}
