//! Transcoder job CLI entry point.
//!
//! This binary is the composition root for the workspace. Responsibilities:
//!
//! 1. **Parse configuration**: flags with environment fallbacks (see [`args`]).
//! 2. **Wire observability**: configure `tracing-subscriber` with a text or
//!    JSON layer on stderr and, when an OTLP endpoint is set, an OpenTelemetry
//!    exporter. Spans from every crate in the workspace flow through it.
//! 3. **Construct infrastructure**: a [`RestConnector`] injected into a
//!    [`JobClient`].
//! 4. **Run the selected mode**: `create` or `get`, exactly one request.
//!
//! The resulting job is printed to stdout as JSON. On failure the error chain
//! goes to stderr and the process exits with status 1.

use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser;
use tracing::{info_span, Instrument};
use transcoder::{InvocationId, JobClient, Mode};
use transcoder_api::RestConnector;

mod args;
mod observability;

use args::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let telemetry = match observability::init(
        cli.log_format,
        cli.verbose,
        cli.otlp_endpoint.as_deref(),
    ) {
        Ok(telemetry) => telemetry,
        Err(err) => {
            eprintln!("error: {err:#}");
            return ExitCode::FAILURE;
        }
    };

    let invocation = InvocationId::new_random();
    let outcome = run(&cli)
        .instrument(info_span!("invocation", id = %invocation))
        .await;

    let code = match outcome {
        Ok(rendered) => {
            println!("{rendered}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    };

    telemetry.shutdown();
    code
}

/// Runs one operation and renders the resulting job.
async fn run(cli: &Cli) -> anyhow::Result<String> {
    let (parent, mode) = cli.invocation()?;
    let failure = match &mode {
        Mode::Create { .. } => "failed to create job",
        Mode::Get { .. } => "failed to get job",
    };

    let client = JobClient::new(RestConnector::new(cli.rest_config()));
    let job = client.run(&parent, mode).await.context(failure)?;

    serde_json::to_string_pretty(&job).context("failed to render job")
}
