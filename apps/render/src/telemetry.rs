use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ExportConfig;

/// Installs the global tracing subscriber for a host application.
///
/// `RUST_LOG` wins when set; otherwise this crate logs at `config.rust_log`.
/// Calling it twice is harmless: the second install is ignored.
pub fn init_tracing(config: &ExportConfig) {
    let installed = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .try_init();

    if installed.is_ok() {
        tracing::debug!("Tracing initialized for {}", env!("CARGO_PKG_NAME"));
    }
}
