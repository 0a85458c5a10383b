use tracing_subscriber::{EnvFilter, fmt::SubscriberBuilder};

pub const DEFAULT_FILTER: &str = "info,sqlx=warn";
pub const DEBUG_FILTER: &str = "debug,sqlx=info";

/// Fallback filter when `RUST_LOG` is unset.
pub fn default_filter(debug: bool) -> &'static str {
    if debug { DEBUG_FILTER } else { DEFAULT_FILTER }
}

/// Sets up the global tracing subscriber with a fmt formatter and env filter.
///
/// `RUST_LOG` wins over `default_filter` when set. Both binaries share the
/// same formatting rules through this helper.
pub fn init_tracing(default_filter: &str) -> Result<(), anyhow::Error> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    SubscriberBuilder::default()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_raises_verbosity() {
        assert_eq!(default_filter(false), "info,sqlx=warn");
        assert_eq!(default_filter(true), "debug,sqlx=info");
    }
}
