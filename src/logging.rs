use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Console subscriber for the dashboard service. `RUST_LOG` overrides the
/// default, which keeps the pipeline at info while quieting hyper's
/// per-connection chatter.
pub fn init_logging() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "info,hyper=warn".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    Ok(())
}
