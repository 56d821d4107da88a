//! Opt-in `tracing` subscriber setup.
//!
//! Layout decisions (excluded grains, dropped rows, truncation levels, outer
//! skip stride) are emitted at `debug` and `trace` under the `timeaxis_rs`
//! target. Hosts with their own subscriber can ignore this module.

/// Filter used when `RUST_LOG` is unset: this crate's plan diagnostics plus
/// warnings from everything else.
pub const DEFAULT_TRACING_FILTER: &str = "warn,timeaxis_rs=debug";

/// Installs a compact `fmt` subscriber filtered by `RUST_LOG`, falling back to
/// [`DEFAULT_TRACING_FILTER`].
///
/// Returns `false` when the `telemetry` feature is disabled or a global
/// subscriber is already set.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_TRACING_FILTER));
        return install(filter);
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}

/// Like [`init_default_tracing`] with explicit filter directives, e.g.
/// `"timeaxis_rs::api=trace"`. Invalid directives install nothing.
#[must_use]
pub fn init_tracing_with_filter(directives: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        return tracing_subscriber::EnvFilter::try_new(directives)
            .map(install)
            .unwrap_or(false);
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = directives;
        false
    }
}

#[cfg(feature = "telemetry")]
fn install(filter: tracing_subscriber::EnvFilter) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .compact()
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_TRACING_FILTER, init_default_tracing, init_tracing_with_filter};

    #[test]
    fn default_filter_surfaces_crate_debug_events() {
        assert!(DEFAULT_TRACING_FILTER.contains(&format!("{}=debug", env!("CARGO_CRATE_NAME"))));
    }

    #[test]
    fn second_initialization_is_refused() {
        let _ = init_default_tracing();
        assert!(!init_default_tracing());
        assert!(!init_tracing_with_filter("timeaxis_rs=trace"));
    }
}
