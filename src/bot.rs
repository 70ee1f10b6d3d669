//! One invocation of the bot: roll, authenticate, pick a lyric, post.

use std::path::PathBuf;

use anyhow::Result;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::corpus::Corpus;
use crate::error::{BotError, TwitterError};
use crate::gate::{Gate, Roll};
use crate::twitter::{Account, Publisher, Status};

#[derive(Debug, Clone)]
pub struct RunSettings {
    pub gate: Gate,
    pub corpus: PathBuf,
    pub line_break_marker: String,
    /// Select and log a message without reading credentials or posting.
    pub dry_run: bool,
}

impl RunSettings {
    pub fn from_config(config: &Config, dry_run: bool) -> Result<Self> {
        Ok(Self {
            gate: config.gate()?,
            corpus: config.corpus.clone(),
            line_break_marker: config.line_break_marker.clone(),
            dry_run,
        })
    }
}

#[derive(Debug)]
pub enum Outcome {
    Skipped { drawn: u32 },
    DryRun { message: String },
    Posted { account: Account, status: Status },
}

/// Runs one invocation.
///
/// `connect` is only called once the gate has passed, so a skipped run never
/// touches credentials or the network. Any failure returns immediately.
pub async fn run<R, P, F>(settings: &RunSettings, rng: &mut R, connect: F) -> Result<Outcome, BotError>
where
    R: Rng,
    P: Publisher,
    F: FnOnce() -> Result<P, TwitterError>,
{
    if let Roll::Skip { drawn } = settings.gate.roll(rng) {
        info!(drawn, odds = settings.gate.odds(), "not tweeting this time");
        return Ok(Outcome::Skipped { drawn });
    }

    if settings.dry_run {
        let message = select_message(settings, rng)?;
        info!(message = %message, "dry run, not posting");
        return Ok(Outcome::DryRun { message });
    }

    let publisher = connect().map_err(BotError::Authentication)?;
    let account = publisher
        .verify_credentials()
        .await
        .map_err(BotError::Authentication)?;
    info!(
        id = %account.id_str,
        screen_name = %account.screen_name,
        name = %account.name,
        "verified account"
    );

    let message = select_message(settings, rng)?;
    info!(message = %message, "selected lyric");

    let status = publisher
        .post_status(&message)
        .await
        .map_err(BotError::Post)?;
    if status.truncated {
        warn!(id = %status.id_str, "posted tweet was truncated");
    }
    info!(id = %status.id_str, url = ?status.url(), "tweet posted");
    debug!(?status, "post response");

    Ok(Outcome::Posted { account, status })
}

/// Exit code for a finished run: 0 for any outcome, including a skip.
pub fn exit_code(result: &Result<Outcome, BotError>) -> u8 {
    match result {
        Ok(_) => 0,
        Err(err) => err.exit_code(),
    }
}

fn select_message<R: Rng>(settings: &RunSettings, rng: &mut R) -> Result<String, BotError> {
    let corpus = Corpus::load(&settings.corpus)?;
    debug!(path = %corpus.path().display(), lines = corpus.len(), "corpus loaded");
    Ok(corpus.select_message(rng, &settings.line_break_marker))
}
