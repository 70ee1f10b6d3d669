use anyhow::{Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs a human-readable stderr subscriber. A non-empty `RUST_LOG`
/// takes precedence over the configured filter.
pub fn init_tracing(configured_filter: &str) -> Result<()> {
    let env_filter = build_env_filter(
        configured_filter,
        std::env::var(EnvFilter::DEFAULT_ENV).ok(),
    )?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init()
        .context("failed to initialize tracing subscriber")?;

    Ok(())
}

fn build_env_filter(configured: &str, env_override: Option<String>) -> Result<EnvFilter> {
    let filter = env_override
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| configured.to_string());

    EnvFilter::try_new(&filter).with_context(|| format!("failed to parse log filter '{}'", filter))
}
