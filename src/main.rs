use clap::{CommandFactory, Parser};
use nimble_keygen::{
    cli::{self, Cli},
    pipeline, KeygenError,
};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    // Diagnostics go to stderr; stdout carries only the result.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nimble_keygen=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => match err.downcast_ref::<KeygenError>() {
            Some(keygen_err) => {
                error!(kind = keygen_err.kind(), "run failed");
                eprintln!("Error [{}]: {}", keygen_err.kind(), keygen_err);
                if keygen_err.shows_usage() {
                    eprintln!();
                    eprintln!("{}", Cli::command().render_help());
                }
                ExitCode::from(keygen_err.exit_code())
            }
            None => {
                eprintln!("Error: {:#}", err);
                ExitCode::FAILURE
            }
        },
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let request = cli.into_request()?;
    info!("Starting nimble-keygen v{}", env!("CARGO_PKG_VERSION"));

    let key_info = pipeline::run_with_config(
        &request.mnemonic,
        &request.external_identifier,
        &request.config,
    )?;

    println!("{}", cli::render(&key_info, request.output)?);
    Ok(())
}
