#![forbid(unsafe_code)]

//! lintstack: layered lint configuration
//!
//! A configuration is an ordered list of fragments, each scoped to files by
//! glob patterns and carrying partial rule settings. Resolving a file merges
//! every applicable fragment in order, later settings replacing earlier
//! ones, into the rule set a lint engine should run on that file.

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod output;
pub mod types;

// Re-export error types for convenient access
pub use error::{ConfigError, LintstackError, ResolveError};

// Re-export the resolution API
pub use config::{Bundle, BundleRegistry, Config, Fragment, FragmentDef, RuleValue};
pub use engine::{EffectiveConfig, Exclusion, Resolution, Resolver, ResolverBuilder};
pub use types::{GlobPattern, RelativeFilePath, RuleId, Severity};

/// Installs the global tracing subscriber, writing to stderr
///
/// The filter comes from `LINTSTACK_LOG` when set; otherwise `verbose`
/// selects `debug` over the default `warn`.
pub fn init_tracing(verbose: bool) {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let default_level = if verbose { "lintstack=debug" } else { "lintstack=warn" };
    let filter = EnvFilter::try_from_env("LINTSTACK_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    // A second call (e.g. from tests) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}
