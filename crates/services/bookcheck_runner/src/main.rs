// File: services/bookcheck_runner/src/main.rs
//
// Usage: bookcheck-runner [.env-file] [scenario ...]
use bookcheck_booking::{run_concurrently, BookingWorkflow, Scenario};
use bookcheck_common::{config_error, log_result, BookcheckError};
use bookcheck_config::{ensure_dotenv_loaded, load_profile, Environment};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};

/// Scenario names from the command line; all scenarios when none are given.
fn selected_scenarios() -> Result<Vec<Scenario>, BookcheckError> {
    let names: Vec<String> = std::env::args()
        .skip(1)
        .filter(|arg| !arg.starts_with(".env"))
        .collect();

    if names.is_empty() {
        return Ok(Scenario::ALL.to_vec());
    }

    names
        .iter()
        .map(|name| {
            Scenario::from_name(name).ok_or_else(|| {
                let known: Vec<&str> = Scenario::ALL.iter().map(Scenario::name).collect();
                config_error(format!(
                    "unknown scenario {:?}, expected one of: {}",
                    name,
                    known.join(", ")
                ))
            })
        })
        .collect()
}

async fn run(dotenv_path: &str) -> Result<bool, BookcheckError> {
    info!("Environment file: {}", dotenv_path);

    let environment = Environment::from_env();
    let profile = log_result(
        load_profile(environment),
        &format!("Loaded {} profile", environment),
        "Failed to load configuration",
    )?;
    info!("Target API: {}", profile.api.base_url);

    let scenarios = selected_scenarios()?;
    let workflow = Arc::new(BookingWorkflow::new(&profile)?);
    let outcomes = run_concurrently(workflow, &scenarios).await;

    let failed = outcomes.iter().filter(|outcome| !outcome.passed()).count();
    info!(
        "{} scenario(s) run: {} passed, {} failed",
        outcomes.len(),
        outcomes.len() - failed,
        failed
    );
    Ok(failed == 0)
}

#[tokio::main]
async fn main() -> ExitCode {
    // .env may set RUST_LOG and RUN_ENV
    let dotenv_path = ensure_dotenv_loaded();
    bookcheck_common::logging::init();

    match run(&dotenv_path).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            error!("bookcheck aborted: {}", err);
            ExitCode::from(2)
        }
    }
}
