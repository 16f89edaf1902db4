//! Initialises log output for the binary and for embedding applications.
//!
//! Without the `tracing` feature, records emitted through the `log` facade
//! are written by `env_logger`. With it, a `tracing_subscriber` registry is
//! installed instead and `log` records are bridged into it.
//!
//! Both honour the usual filter variable:
//! ```bash
//! RUST_LOG=routepick=debug
//! ```

#[cfg(feature = "tracing")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "tracing")]
use tracing_subscriber::util::SubscriberInitExt;

/// Initialises the logger. Calling this more than once is harmless,
/// later calls leave the first subscriber in place.
pub fn initialize_logger() {
    #[cfg(feature = "tracing")]
    {
        let fmt_layer = tracing_subscriber::fmt::layer().compact();

        // Initialise tracing with subscribers and environment filter
        let initialised = tracing_subscriber::registry()
            .with(tracing_subscriber::EnvFilter::from_default_env())
            .with(fmt_layer)
            .try_init();

        if initialised.is_ok() {
            tracing::debug!("tracing subscriber installed");
        }
    }

    #[cfg(not(feature = "tracing"))]
    {
        let _ = env_logger::Builder::from_default_env()
            .format_timestamp_millis()
            .try_init();
    }
}
