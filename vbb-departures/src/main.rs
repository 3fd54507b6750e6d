use std::io;
use std::process::ExitCode;

use chrono::Local;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use vbb_departures::AppError;
use vbb_departures::cli::{Cli, LinePrompter};
use vbb_departures::pipeline;
use vbb_departures::render::{self, Theme};
use vbb_departures::transit::TransitClient;

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr; RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    // Exits here for --help/--version (status 0) and usage errors (status 2)
    let cli = Cli::parse();

    let client = match TransitClient::new(cli.client_config()) {
        Ok(client) => client,
        Err(e) => return report(&AppError::from(e)),
    };
    let mut prompter = LinePrompter::terminal();

    let theme = Theme::detect();
    let output = match pipeline::run(&cli.options(), &client, &mut prompter, Local::now(), theme).await {
        Ok(output) => output,
        Err(e) => return report(&e),
    };

    // A closed pipe is not an error; anything else is
    match render::emit(&mut io::stdout().lock(), &output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report(&AppError::Output(e)),
    }
}

fn report(err: &AppError) -> ExitCode {
    eprint!("{}", err.report());
    ExitCode::from(err.exit_code())
}
