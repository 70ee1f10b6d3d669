use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::{error, warn};

use idlesbot::bot::{self, RunSettings};
use idlesbot::cli::Cli;
use idlesbot::config::Config;
use idlesbot::credentials::Credentials;
use idlesbot::error::CONFIG_EXIT_CODE;
use idlesbot::gate;
use idlesbot::logging;
use idlesbot::twitter::TwitterClient;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let (config, settings) = match load(&cli) {
        Ok(loaded) => loaded,
        Err(err) => {
            eprintln!("idlesbot: {:#}", err);
            return ExitCode::from(CONFIG_EXIT_CODE);
        }
    };

    if let Err(err) = logging::init_tracing(&config.logging.filter) {
        eprintln!("idlesbot: {:#}", err);
        return ExitCode::from(CONFIG_EXIT_CODE);
    }

    let mut rng = gate::run_rng(cli.seed);
    let result = bot::run(&settings, &mut rng, || {
        let creds = Credentials::from_env();
        let missing = creds.missing();
        if !missing.is_empty() {
            warn!(?missing, "credential variables are empty");
        }
        TwitterClient::new(creds, &config.twitter)
    })
    .await;

    if let Err(err) = &result {
        error!(error = %err, "run failed");
    }
    ExitCode::from(bot::exit_code(&result))
}

fn load(cli: &Cli) -> Result<(Config, RunSettings)> {
    let config = cli.load_config()?;
    let settings = RunSettings::from_config(&config, cli.dry_run)?;
    Ok((config, settings))
}
