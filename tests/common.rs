//! Test utilities for lintstack integration tests

/// Result type alias for tests
pub type TestResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// Extract Ok value or panic with context
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("assertion failed: expected Ok, got Err({:?})", e),
        }
    };
    ($expr:expr, $msg:literal) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("{}: {:?}", $msg, e),
        }
    };
}

/// Extract Some value or panic with context
#[macro_export]
macro_rules! assert_some {
    ($expr:expr) => {
        match $expr {
            Some(v) => v,
            None => panic!("assertion failed: expected Some, got None"),
        }
    };
    ($expr:expr, $msg:literal) => {
        match $expr {
            Some(v) => v,
            None => panic!("{}: got None", $msg),
        }
    };
}

/// Builds the resolver for a fixture or inline configuration with the
/// built-in bundles
#[allow(dead_code)]
pub fn resolver_for(config: &lintstack::Config) -> lintstack::Resolver {
    let bundles = lintstack::BundleRegistry::builtin().expect("built-in bundles load");
    config
        .build_resolver(&bundles, None)
        .expect("resolver builds")
}

/// Resolves `path`, panicking if the file is excluded
#[allow(dead_code)]
pub fn evaluated(resolver: &lintstack::Resolver, path: &str) -> lintstack::EffectiveConfig {
    match resolver.resolve(path).expect("valid path") {
        lintstack::Resolution::Evaluated(config) => config,
        lintstack::Resolution::Excluded(reason) => {
            panic!("{} unexpectedly excluded: {}", path, reason)
        }
    }
}
