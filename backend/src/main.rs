//! Command-line entry-point: loads settings, opens the snapshot store, and
//! runs one command.

use std::ffi::OsString;
use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tracing::{error, warn};
use tracing_subscriber::{EnvFilter, fmt};

use eatery::config::EaterySettings;
use eatery::domain::ports::ConfiguredLoginService;
use eatery::domain::{EateryError, EateryService, SnapshotRepository};
use eatery::inbound::cli::{Cli, CliError, run};
use eatery::outbound::storage::FileKeyValueStore;

fn main() -> ExitCode {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let cli = Cli::parse();
    match execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "command failed");
            writeln!(io::stderr(), "error: {err}").ok();
            ExitCode::from(err.exit_code())
        }
    }
}

fn execute(cli: Cli) -> Result<(), CliError> {
    let settings = EaterySettings::load_from_iter([OsString::from("eatery")])
        .map_err(|e| EateryError::internal(format!("failed to load settings: {e}")))?;
    let store = FileKeyValueStore::open(settings.storage_dir())
        .map_err(|e| EateryError::storage(e.to_string()))?;
    let repository = SnapshotRepository::new(store, settings.storage_keys());
    let login = ConfiguredLoginService::new(settings.admin_email(), settings.admin_password());
    let mut service = EateryService::open(
        repository,
        login,
        Arc::new(DefaultClock),
        settings.transition_policy(),
    )?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(cli, &mut service, &mut out)?;
    out.flush()?;
    Ok(())
}
