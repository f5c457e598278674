//! Tracing subscriber setup

use anyhow::Result;
use tracing::Subscriber;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::LoggingConfig;

fn filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
}

/// Build the fmt subscriber for the configured format without installing it.
///
/// `RUST_LOG` overrides the configured level when set.
pub fn subscriber(config: &LoggingConfig) -> Box<dyn Subscriber + Send + Sync> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter(config))
        .with_target(false);

    match config.format.as_str() {
        "json" => Box::new(builder.json().finish()),
        "compact" => Box::new(builder.compact().finish()),
        _ => Box::new(builder.pretty().finish()),
    }
}

/// Install the global fmt subscriber.
pub fn init(config: &LoggingConfig) -> Result<()> {
    subscriber(config)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    tracing::debug!(level = %config.level, format = %config.format, "Logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("pretty")]
    #[case("compact")]
    #[case("json")]
    #[case("unknown")]
    fn test_subscriber_for_each_format(#[case] format: &str) {
        let config = LoggingConfig {
            level: "debug".to_string(),
            format: format.to_string(),
        };
        let subscriber = subscriber(&config);
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(format, "Scoped subscriber active");
        });
    }
}
