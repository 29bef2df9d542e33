//! Command-line and environment configuration.
//!
//! Every option can also be supplied through the environment variable named in
//! its help text; flags win over the environment.

use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use transcoder::{
    ExtractionStrategy, JobId, JobName, LocationId, Mode, ParentName, ProjectId, StorageUri,
    TranscoderError,
};
use transcoder_api::{RestConfig, DEFAULT_ENDPOINT};

const DEFAULT_LOCATION: &str = "us-central1";

#[derive(Debug, Parser)]
#[command(
    name = "transcoder-jobs",
    version,
    about = "Create sprite-sheet transcode jobs or look up their status",
    after_help = "EXAMPLES:\n  \
                  transcoder-jobs --project my-project create \\\n    \
                  --input-uri gs://bucket/input/sample.mp4 --output-uri gs://bucket/output/\n  \
                  transcoder-jobs --project my-project get aeadda13-cada-4ae5-a6bc-190cf21d555e\n  \
                  transcoder-jobs get projects/my-project/locations/us-central1/jobs/aeadda13"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Cloud project that owns the jobs
    #[arg(long, env = "TRANSCODER_PROJECT", global = true)]
    pub project: Option<String>,

    /// Service region [default: us-central1]
    #[arg(long, env = "TRANSCODER_LOCATION", global = true)]
    pub location: Option<String>,

    /// Service base URL
    #[arg(long, env = "TRANSCODER_ENDPOINT", default_value = DEFAULT_ENDPOINT, global = true)]
    pub endpoint: String,

    /// OAuth 2.0 bearer token (e.g. from `gcloud auth print-access-token`)
    #[arg(long, env = "TRANSCODER_ACCESS_TOKEN", hide_env_values = true, global = true)]
    pub access_token: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, env = "TRANSCODER_TIMEOUT_SECS", default_value_t = 30, global = true)]
    pub timeout_secs: u64,

    /// Log line format (logs go to stderr)
    #[arg(
        long,
        value_enum,
        env = "TRANSCODER_LOG_FORMAT",
        default_value_t = LogFormat::Text,
        global = true
    )]
    pub log_format: LogFormat,

    /// Export spans to this OTLP/gRPC collector
    #[arg(long, env = "OTEL_EXPORTER_OTLP_ENDPOINT", global = true)]
    pub otlp_endpoint: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Submit a job that transcodes to MP4 and extracts a sprite sheet
    Create(CreateArgs),

    /// Show the current state of a job
    Get(GetArgs),
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Source media, e.g. gs://bucket/input/sample.mp4
    #[arg(long)]
    pub input_uri: String,

    /// Destination prefix, e.g. gs://bucket/output/
    #[arg(long)]
    pub output_uri: String,

    /// Extract exactly this many sprites
    #[arg(long, conflicts_with = "sprite_interval")]
    pub sprite_count: Option<u32>,

    /// Extract one sprite every SECONDS
    #[arg(long, value_name = "SECONDS")]
    pub sprite_interval: Option<f64>,
}

#[derive(Debug, Args)]
pub struct GetArgs {
    /// Job ID, or a full projects/{project}/locations/{location}/jobs/{job} name
    pub job: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

fn invalid(message: impl Into<String>) -> TranscoderError {
    TranscoderError::InvalidRequest {
        message: message.into(),
    }
}

impl Cli {
    /// Resolves the jobs collection and the mode to run against it.
    pub fn invocation(&self) -> Result<(ParentName, Mode), TranscoderError> {
        match &self.command {
            Command::Get(args) if args.job.contains('/') => {
                let name: JobName = args
                    .job
                    .parse()
                    .map_err(|e: transcoder::ResourceNameError| invalid(e.to_string()))?;
                self.check_matches(&name)?;
                let mode = Mode::Get {
                    job_id: name.job_id().clone(),
                };
                Ok((name.parent().clone(), mode))
            }
            Command::Get(args) => {
                let job_id = JobId::new(args.job.as_str())
                    .ok_or_else(|| invalid(format!("job ID '{}' is not valid", args.job)))?;
                Ok((self.parent()?, Mode::Get { job_id }))
            }
            Command::Create(args) => {
                let input_uri = storage_uri("--input-uri", &args.input_uri)?;
                let output_uri = storage_uri("--output-uri", &args.output_uri)?;
                let extraction = args.extraction()?;
                let mode = Mode::Create {
                    input_uri,
                    output_uri,
                    extraction,
                };
                Ok((self.parent()?, mode))
            }
        }
    }

    pub fn rest_config(&self) -> RestConfig {
        RestConfig {
            endpoint: self.endpoint.clone(),
            access_token: self.access_token.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            ..RestConfig::default()
        }
    }

    /// A full job name must agree with any project or location given separately.
    fn check_matches(&self, name: &JobName) -> Result<(), TranscoderError> {
        let parent = name.parent();
        if let Some(project) = self.project.as_deref() {
            if project != parent.project().as_str() {
                return Err(invalid(format!(
                    "job '{name}' is in project '{}', not '{project}'",
                    parent.project()
                )));
            }
        }
        if let Some(location) = self.location.as_deref() {
            if location != parent.location().as_str() {
                return Err(invalid(format!(
                    "job '{name}' is in location '{}', not '{location}'",
                    parent.location()
                )));
            }
        }
        Ok(())
    }

    fn parent(&self) -> Result<ParentName, TranscoderError> {
        let project = self
            .project
            .as_deref()
            .ok_or_else(|| invalid("--project (or TRANSCODER_PROJECT) is required"))?;
        let project = ProjectId::new(project)
            .ok_or_else(|| invalid(format!("project '{project}' is not valid")))?;
        let location = self.location.as_deref().unwrap_or(DEFAULT_LOCATION);
        let location = LocationId::new(location)
            .ok_or_else(|| invalid(format!("location '{location}' is not valid")))?;
        Ok(ParentName::new(project, location))
    }
}

impl CreateArgs {
    fn extraction(&self) -> Result<ExtractionStrategy, TranscoderError> {
        match (self.sprite_count, self.sprite_interval) {
            (Some(count), _) => Ok(ExtractionStrategy::TotalCount(count)),
            (None, Some(secs)) => Duration::try_from_secs_f64(secs)
                .map(ExtractionStrategy::Interval)
                .map_err(|_| invalid(format!("sprite interval {secs} is not a valid duration"))),
            (None, None) => Ok(ExtractionStrategy::ServiceDefault),
        }
    }
}

fn storage_uri(flag: &str, value: &str) -> Result<StorageUri, TranscoderError> {
    StorageUri::new(value)
        .ok_or_else(|| invalid(format!("{flag} '{value}' must be a scheme-qualified URI")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["transcoder-jobs"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn create_resolves_parent_and_uris() {
        let cli = parse(&[
            "--project",
            "proj1",
            "--location",
            "asia-northeast1",
            "create",
            "--input-uri",
            "gs://test/input/sample.mp4",
            "--output-uri",
            "gs://test/output/",
        ]);
        let (parent, mode) = cli.invocation().unwrap();
        assert_eq!(parent.to_string(), "projects/proj1/locations/asia-northeast1");
        assert_eq!(
            mode,
            Mode::Create {
                input_uri: StorageUri::new("gs://test/input/sample.mp4").unwrap(),
                output_uri: StorageUri::new("gs://test/output/").unwrap(),
                extraction: ExtractionStrategy::ServiceDefault,
            }
        );
    }

    #[test]
    fn sprite_flags_select_the_extraction_strategy() {
        let base = [
            "--project",
            "p",
            "create",
            "--input-uri",
            "gs://b/i",
            "--output-uri",
            "gs://b/o/",
        ];

        let mut args = base.to_vec();
        args.extend(["--sprite-interval", "2.5"]);
        match parse(&args).invocation().unwrap().1 {
            Mode::Create { extraction, .. } => assert_eq!(
                extraction,
                ExtractionStrategy::Interval(Duration::from_millis(2500))
            ),
            other => panic!("unexpected mode {other:?}"),
        }

        let mut args = base.to_vec();
        args.extend(["--sprite-count", "4"]);
        match parse(&args).invocation().unwrap().1 {
            Mode::Create { extraction, .. } => {
                assert_eq!(extraction, ExtractionStrategy::TotalCount(4))
            }
            other => panic!("unexpected mode {other:?}"),
        }

        let mut args = base.to_vec();
        args.push("--sprite-interval=-1");
        assert!(parse(&args).invocation().is_err());
    }

    #[test]
    fn sprite_count_and_interval_conflict() {
        let result = Cli::try_parse_from([
            "transcoder-jobs",
            "create",
            "--input-uri",
            "gs://b/i",
            "--output-uri",
            "gs://b/o/",
            "--sprite-count",
            "4",
            "--sprite-interval",
            "2",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn get_accepts_a_bare_id_or_a_full_name() {
        let (parent, mode) = parse(&["--project", "proj1", "get", "job-123"])
            .invocation()
            .unwrap();
        assert_eq!(parent.to_string(), "projects/proj1/locations/us-central1");
        assert_eq!(
            mode,
            Mode::Get {
                job_id: JobId::new("job-123").unwrap()
            }
        );

        let (parent, mode) = parse(&["get", "projects/other/locations/europe-west1/jobs/j9"])
            .invocation()
            .unwrap();
        assert_eq!(parent.to_string(), "projects/other/locations/europe-west1");
        assert_eq!(
            mode,
            Mode::Get {
                job_id: JobId::new("j9").unwrap()
            }
        );
    }

    #[test]
    fn full_name_must_agree_with_project_and_location() {
        let name = "projects/proj1/locations/europe-west1/jobs/j9";

        let err = parse(&["--project", "proj2", "get", name])
            .invocation()
            .unwrap_err();
        assert!(matches!(err, TranscoderError::InvalidRequest { .. }));
        assert!(err.to_string().contains("proj2"));

        let err = parse(&["--location", "us-central1", "get", name])
            .invocation()
            .unwrap_err();
        assert!(err.to_string().contains("europe-west1"));

        let (parent, _) = parse(&["--project", "proj1", "--location", "europe-west1", "get", name])
            .invocation()
            .unwrap();
        assert_eq!(parent.to_string(), "projects/proj1/locations/europe-west1");
    }

    #[test]
    fn rejects_bad_arguments_locally() {
        let err = parse(&["--project", "p", "get", "projects/p/jobs/j"])
            .invocation()
            .unwrap_err();
        assert!(matches!(err, TranscoderError::InvalidRequest { .. }));

        let err = parse(&[
            "--project",
            "p",
            "create",
            "--input-uri",
            "sample.mp4",
            "--output-uri",
            "gs://b/o/",
        ])
        .invocation()
        .unwrap_err();
        assert!(err.to_string().contains("--input-uri"));
    }

    #[test]
    fn rest_config_carries_endpoint_token_and_timeout() {
        let cli = parse(&[
            "--endpoint",
            "http://127.0.0.1:8080",
            "--access-token",
            "tok",
            "--timeout-secs",
            "5",
            "get",
            "projects/p/locations/l/jobs/j",
        ]);
        let config = cli.rest_config();
        assert_eq!(config.endpoint, "http://127.0.0.1:8080");
        assert_eq!(config.access_token.as_deref(), Some("tok"));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }
}
