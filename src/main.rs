mod config;
mod error;
mod routes;

use std::io::{self, Write};
use std::process::ExitCode;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use config::Config;
use error::AppError;

fn main() -> ExitCode {
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    init_logging(&config);

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!("Run failed: {:?}", e);
            let _ = report_failure(&e, &mut io::stderr().lock());
            ExitCode::FAILURE
        }
    }
}

// Prints the error chain once, followed by the hint for known errors
fn report_failure(err: &anyhow::Error, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "error: {:#}", err)?;
    if let Some(app_error) = err.downcast_ref::<AppError>() {
        writeln!(out, "{}", app_error.user_message())?;
    }
    Ok(())
}

// Logs go to stderr so stdout only carries routes
fn init_logging(config: &Config) {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(config.log_level).into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    if let Some(path) = &config.config_path {
        tracing::info!("Loaded configuration from: {}", path.display());
    }
}

fn run(config: &Config) -> anyhow::Result<()> {
    let routes = match &config.input {
        Some(path) => routes::parser::parse_file(path)?,
        None => routes::command::fetch_routes()?,
    };
    tracing::info!("Parsed {} route(s)", routes.len());

    let mut stdout = io::stdout().lock();
    for route in &routes {
        writeln!(stdout, "{}", route)?;
    }
    stdout.flush()?;

    Ok(())
}
