//! Logging initialization
//!
//! Events go to stderr so command output on stdout stays machine readable.
//! `RUST_LOG` overrides the configured level.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::settings::LoggingSettings;

pub fn init_logging(settings: &LoggingSettings) -> anyhow::Result<()> {
    let subscriber = tracing_subscriber::registry().with(build_env_filter(settings));

    if settings.json {
        let layer = fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .with_writer(std::io::stderr);
        subscriber.with(layer).try_init()?;
    } else {
        let layer = fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_writer(std::io::stderr);
        subscriber.with(layer).try_init()?;
    }
    Ok(())
}

fn build_env_filter(settings: &LoggingSettings) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "quickgo={0},quickgo_search={0},quickgo_flatfield={0}",
            settings.level
        ))
    })
}
