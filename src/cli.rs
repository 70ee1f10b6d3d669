use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::config::Config;

/// Rolls the dice and, if they come up zero, tweets a random lyric.
///
/// Meant to be run from cron or a systemd timer. Credentials are read from
/// API_KEY, API_SECRET_KEY, ACCESS_TOKEN and ACCESS_TOKEN_SECRET.
#[derive(Debug, Parser)]
#[command(name = "idlesbot", version)]
pub struct Cli {
    /// Config file (default: <config dir>/idlesbot/config.toml, if present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Lyric corpus, one entry per line
    #[arg(long, value_name = "FILE")]
    pub corpus: Option<PathBuf>,

    /// Post on average once every N runs
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub odds: Option<u32>,

    /// Fixed RNG seed, for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Pick and log a lyric without authenticating or posting
    #[arg(long)]
    pub dry_run: bool,

    /// Log filter, e.g. "debug" or "idlesbot=trace"
    #[arg(long, value_name = "FILTER")]
    pub log_filter: Option<String>,
}

impl Cli {
    /// Resolves the config file, applies flag overrides, then validates the
    /// merged result.
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::resolve(self.config.as_deref())?;
        self.apply(&mut config);
        config.validate()?;
        Ok(config)
    }

    /// Flags win over values from the config file.
    pub fn apply(&self, config: &mut Config) {
        if let Some(corpus) = &self.corpus {
            config.corpus = corpus.clone();
        }
        if let Some(odds) = self.odds {
            config.odds = odds;
        }
        if let Some(filter) = &self.log_filter {
            config.logging.filter = filter.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_leave_config_untouched() {
        let cli = Cli::parse_from(["idlesbot"]);
        let mut config = Config::default();
        cli.apply(&mut config);
        assert_eq!(config.odds, 10);
        assert_eq!(config.corpus, PathBuf::from("idles.txt"));
        assert!(!cli.dry_run);
        assert!(cli.seed.is_none());
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::parse_from([
            "idlesbot",
            "--corpus",
            "/tmp/lyrics.txt",
            "--odds",
            "1",
            "--seed",
            "7",
            "--dry-run",
            "--log-filter",
            "debug",
        ]);
        let mut config = Config::default();
        cli.apply(&mut config);
        assert_eq!(config.corpus, PathBuf::from("/tmp/lyrics.txt"));
        assert_eq!(config.odds, 1);
        assert_eq!(config.logging.filter, "debug");
        assert_eq!(cli.seed, Some(7));
        assert!(cli.dry_run);
    }

    #[test]
    fn test_flag_overrides_invalid_file_value() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"odds = 0\n").unwrap();
        let path = file.path().to_str().unwrap();

        let cli = Cli::parse_from(["idlesbot", "--config", path, "--odds", "5"]);
        let config = cli.load_config().unwrap();
        assert_eq!(config.odds, 5);

        let cli = Cli::parse_from(["idlesbot", "--config", path]);
        let err = cli.load_config().unwrap_err();
        assert!(err.to_string().contains("odds must be at least 1"));
    }

    #[test]
    fn test_zero_odds_rejected() {
        assert!(Cli::try_parse_from(["idlesbot", "--odds", "0"]).is_err());
    }
}
