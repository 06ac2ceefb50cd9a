//! Opt-in log output for hosts that do not install their own subscriber.
//!
//! The controller emits `tracing` events for mounts, refreshes, recovered
//! payload errors and engine rejections. Nothing is printed unless a
//! subscriber is installed, either by the host or by [`init_default_tracing`].

/// Filter used when `RUST_LOG` is unset or unparsable: warnings from every
/// target plus this crate's lifecycle events.
pub const DEFAULT_LOG_FILTER: &str = "warn,oee_chart=debug";

/// Installs a compact `fmt` subscriber filtered by `RUST_LOG`.
///
/// Requires the `telemetry` feature. Returns `false` when the feature is off
/// or the host already set a global subscriber.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
