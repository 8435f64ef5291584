//! Opt-in tracing setup for hosts embedding `volume-compare`.
//!
//! The engine and session only emit `tracing` events. Hosts either call
//! `init_default_tracing` or install their own subscriber.

/// Filter used when `RUST_LOG` is unset: viewer events at `info`, every
/// other target at `warn`.
pub const DEFAULT_TRACING_FILTER: &str = "warn,volume_compare=info";

/// Installs a compact fmt subscriber when the `telemetry` feature is enabled.
///
/// `RUST_LOG` overrides `DEFAULT_TRACING_FILTER`. Returns `false` when the
/// feature is off or the host already set a global subscriber.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_TRACING_FILTER));
        let initialized = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
        if initialized {
            tracing::debug!(default_filter = DEFAULT_TRACING_FILTER, "tracing initialized");
        }
        return initialized;
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
