use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod domain;
mod services;

use cli::Cli;
use services::context::RunnerContext;
use services::publisher::{GitPublisher, SystemGit};

fn init_logging() {
    let default = if std::env::var("RUNNER_DEBUG").as_deref() == Ok("1") {
        "debug"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_env("SCAN_RELAY_LOG").unwrap_or_else(|_| default.into());
    // The runner timestamps every line already.
    let fmt = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stdout)
        .with_ansi(false)
        .with_target(false)
        .without_time();
    tracing_subscriber::registry().with(filter).with(fmt).init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    let ctx = RunnerContext::new(cli.inputs(), cli.output_file.clone(), cli.event_path.as_deref());
    let publisher = GitPublisher::new(SystemGit);

    if let Some(report) = services::relay::execute(&ctx, &publisher) {
        tracing::debug!(
            instruction_file = %report.instruction_file.display(),
            response_bytes = report.api_response.len(),
            updated = report.updated_instructions.is_some(),
            publish = ?report.publish,
            "relay finished"
        );
    }

    if ctx.failed() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
