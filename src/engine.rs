//! Resolution engine and workspace file discovery

pub mod executor;
pub mod file_walker;
pub mod resolver;

pub use executor::{ExecutionEngine, ExecutionResult, FileReport};
pub use resolver::{EffectiveConfig, Exclusion, Resolution, Resolver, ResolverBuilder, RuleSource};
