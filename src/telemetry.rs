//! Opt-in tracing setup for hosts embedding `vizflow`.
//!
//! Pipeline mutators emit structured `tracing` events; nothing is printed
//! unless the host installs a subscriber. `init_default_tracing` offers a
//! compact formatter honoring `RUST_LOG` for quick experiments.

/// Installs a default `tracing` subscriber (requires the `telemetry` feature).
///
/// Returns `false` when the feature is disabled or another subscriber is
/// already installed, so hosts can call this unconditionally.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("vizflow=debug"));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
