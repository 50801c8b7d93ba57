//! Optional log output for hosts driving a timeline.
//!
//! Zoom starts and rejections, delimiter level changes and dropped crossfade
//! layers are emitted as `tracing` events under the `timeline_axis` target.
//! Nothing is printed unless a subscriber is installed.

/// Installs a compact fmt subscriber filtered by `RUST_LOG`, or by
/// `timeline_axis=info` when the variable is unset.
///
/// Set `RUST_LOG=timeline_axis=trace` to follow every tick and transition
/// retirement. Without the `telemetry` feature this is a no-op returning
/// `false`; it also returns `false` when the host already owns the global
/// subscriber.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
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

#[cfg(feature = "telemetry")]
const DEFAULT_FILTER: &str = "timeline_axis=info";
