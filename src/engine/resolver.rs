#![forbid(unsafe_code)]

//! Layered configuration resolution
//!
//! The [`Resolver`] owns an ordered list of compiled fragments and computes,
//! for one file at a time, the effective rule settings. Fragments are
//! applied from first to last; a rule set by a later fragment replaces the
//! value set by an earlier one, and rules a fragment does not mention are
//! left alone.
//!
//! Fragments that consist only of `ignores` are global ignores. They are
//! checked before anything else, wherever they appear in the list, and a
//! match means the file is not evaluated at all.
//!
//! A built resolver is immutable and `Send + Sync`, so one instance can serve
//! `resolve` calls from many threads.

use crate::config::bundle::Bundle;
use crate::config::fragment::{Fragment, FragmentDef};
use crate::config::rule_value::RuleValue;
use crate::error::{ConfigError, ResolveError};
use crate::types::{GlobPattern, RelativeFilePath, RuleId, Severity};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Directories that are never linted unless default ignores are disabled
const DEFAULT_IGNORES: &[&str] = &["**/node_modules/**", "**/.git/**"];

/// Name reported for a match against [`DEFAULT_IGNORES`]
const DEFAULT_IGNORES_NAME: &str = "default-ignores";

/// Where a resolved setting came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleSource {
    /// Position of the fragment in the flattened layer list
    pub index: usize,
    /// The fragment's name, if it has one
    pub name: Option<String>,
}

/// The merged rule settings for a single file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectiveConfig {
    path: RelativeFilePath,
    settings: BTreeMap<RuleId, RuleValue>,
    #[serde(skip)]
    sources: BTreeMap<RuleId, RuleSource>,
}

impl EffectiveConfig {
    /// The normalized path this configuration was resolved for
    pub fn path(&self) -> &RelativeFilePath {
        &self.path
    }

    /// Every rule mentioned by an applicable fragment, `off` included
    pub fn settings(&self) -> &BTreeMap<RuleId, RuleValue> {
        &self.settings
    }

    pub fn get(&self, rule: &str) -> Option<&RuleValue> {
        let id = RuleId::new(rule)?;
        self.settings.get(&id)
    }

    pub fn severity_of(&self, rule: &str) -> Option<Severity> {
        self.get(rule).map(|value| value.severity)
    }

    /// The fragment that last set `rule`
    pub fn source_of(&self, rule: &RuleId) -> Option<&RuleSource> {
        self.sources.get(rule)
    }

    /// Rules the engine should run, in rule-id order
    pub fn enabled_rules(&self) -> impl Iterator<Item = (&RuleId, &RuleValue)> {
        self.settings
            .iter()
            .filter(|(_, value)| value.severity.is_enabled())
    }

    pub fn len(&self) -> usize {
        self.settings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }
}

/// Why a file is not evaluated
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "kebab-case")]
pub enum Exclusion {
    /// A global ignore pattern matched
    GlobalIgnore {
        pattern: GlobPattern,
        fragment: Option<String>,
    },
    /// Targets are restricted and no fragment's `files` names this file
    NoTarget,
    /// An absolute path that does not lie under the base directory
    OutsideBase,
}

impl std::fmt::Display for Exclusion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Exclusion::GlobalIgnore {
                pattern,
                fragment: Some(name),
            } => write!(f, "ignored by '{}' ({})", pattern, name),
            Exclusion::GlobalIgnore {
                pattern,
                fragment: None,
            } => write!(f, "ignored by '{}'", pattern),
            Exclusion::NoTarget => write!(f, "not matched by any files pattern"),
            Exclusion::OutsideBase => write!(f, "outside the base directory"),
        }
    }
}

/// Outcome of resolving one file
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Evaluated(EffectiveConfig),
    Excluded(Exclusion),
}

impl Resolution {
    pub fn is_excluded(&self) -> bool {
        matches!(self, Resolution::Excluded(_))
    }

    pub fn config(&self) -> Option<&EffectiveConfig> {
        match self {
            Resolution::Evaluated(config) => Some(config),
            Resolution::Excluded(_) => None,
        }
    }

    pub fn into_config(self) -> Option<EffectiveConfig> {
        match self {
            Resolution::Evaluated(config) => Some(config),
            Resolution::Excluded(_) => None,
        }
    }

    pub fn exclusion(&self) -> Option<&Exclusion> {
        match self {
            Resolution::Evaluated(_) => None,
            Resolution::Excluded(exclusion) => Some(exclusion),
        }
    }
}

/// Collects fragments and bundles, in order, into a [`Resolver`]
#[derive(Debug, Clone)]
pub struct ResolverBuilder {
    defs: Vec<FragmentDef>,
    base_dir: Option<PathBuf>,
    restrict_to_targets: bool,
    default_ignores: bool,
}

impl Default for ResolverBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolverBuilder {
    pub fn new() -> Self {
        Self {
            defs: Vec::new(),
            base_dir: None,
            restrict_to_targets: false,
            default_ignores: true,
        }
    }

    /// Appends one fragment
    pub fn fragment(mut self, def: FragmentDef) -> Self {
        self.defs.push(def);
        self
    }

    /// Appends fragments in iteration order
    pub fn fragments(mut self, defs: impl IntoIterator<Item = FragmentDef>) -> Self {
        self.defs.extend(defs);
        self
    }

    /// Splices a bundle's fragments in at the current position
    pub fn bundle(mut self, bundle: &Bundle) -> Self {
        self.defs.extend(bundle.fragments().iter().cloned());
        self
    }

    /// Directory that relative paths are resolved against
    ///
    /// Absolute inputs are made relative to it; without one, absolute inputs
    /// are rejected.
    pub fn base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// Only evaluate files named by some fragment's `files` patterns
    pub fn restrict_to_targets(mut self, restrict: bool) -> Self {
        self.restrict_to_targets = restrict;
        self
    }

    /// Whether `node_modules` and `.git` are ignored implicitly (default: yes)
    pub fn default_ignores(mut self, enabled: bool) -> Self {
        self.default_ignores = enabled;
        self
    }

    /// Compiles every fragment
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidPattern` if any glob fails to compile.
    pub fn build(self) -> Result<Resolver, ConfigError> {
        let mut fragments = Vec::with_capacity(self.defs.len());
        for def in self.defs {
            fragments.push(Fragment::new(def)?);
        }

        let mut global_ignores = Vec::new();
        if self.default_ignores {
            global_ignores.push(
                FragmentDef::new()
                    .named(DEFAULT_IGNORES_NAME)
                    .ignores(DEFAULT_IGNORES.iter().copied())
                    .build()?,
            );
        }
        global_ignores.extend(fragments.iter().filter(|f| f.is_global_ignore()).cloned());

        tracing::debug!(
            layers = fragments.len(),
            global_ignores = global_ignores.len(),
            restrict_to_targets = self.restrict_to_targets,
            "built resolver"
        );

        Ok(Resolver {
            fragments,
            global_ignores,
            base_dir: self.base_dir,
            restrict_to_targets: self.restrict_to_targets,
        })
    }
}

/// Resolves the effective configuration of individual files
#[derive(Debug, Clone)]
pub struct Resolver {
    fragments: Vec<Fragment>,
    global_ignores: Vec<Fragment>,
    base_dir: Option<PathBuf>,
    restrict_to_targets: bool,
}

impl Resolver {
    pub fn builder() -> ResolverBuilder {
        ResolverBuilder::new()
    }

    /// The flattened layer list, bundles expanded, in application order
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    pub fn base_dir(&self) -> Option<&Path> {
        self.base_dir.as_deref()
    }

    /// Resolves the configuration for `path`
    ///
    /// # Errors
    ///
    /// Returns `ResolveError::InvalidInput` if `path` is empty, not valid
    /// UTF-8, escapes upward with `..`, or is absolute without a base
    /// directory. An absolute path outside the base directory is not an
    /// error; it resolves to `Exclusion::OutsideBase`.
    pub fn resolve(&self, path: impl AsRef<Path>) -> Result<Resolution, ResolveError> {
        let path = path.as_ref();
        let outside_base = self
            .base_dir
            .as_deref()
            .is_some_and(|base| path.is_absolute() && !path.starts_with(base));
        if outside_base {
            tracing::debug!(path = %path.display(), "file outside base directory");
            return Ok(Resolution::Excluded(Exclusion::OutsideBase));
        }

        let relative = RelativeFilePath::from_path(path, self.base_dir.as_deref()).map_err(
            |reason| ResolveError::InvalidInput {
                path: path.to_path_buf(),
                reason: reason.to_string(),
            },
        )?;
        Ok(self.resolve_relative(&relative))
    }

    /// Resolves an already-normalized path; cannot fail
    pub fn resolve_relative(&self, path: &RelativeFilePath) -> Resolution {
        if let Some(exclusion) = self.global_exclusion(path) {
            tracing::debug!(path = %path, %exclusion, "file excluded");
            return Resolution::Excluded(exclusion);
        }

        if self.restrict_to_targets && !self.fragments.iter().any(|f| f.targets(path)) {
            tracing::debug!(path = %path, "file matches no target pattern");
            return Resolution::Excluded(Exclusion::NoTarget);
        }

        let mut settings = BTreeMap::new();
        let mut sources = BTreeMap::new();

        for (index, fragment) in self.fragments.iter().enumerate() {
            if fragment.is_global_ignore() || !fragment.matches(path) {
                continue;
            }

            tracing::trace!(
                path = %path,
                index,
                fragment = fragment.name().unwrap_or("<anonymous>"),
                rules = fragment.rules().len(),
                "applying fragment"
            );

            for (rule, value) in fragment.rules() {
                settings.insert(rule.clone(), value.clone());
                sources.insert(
                    rule.clone(),
                    RuleSource {
                        index,
                        name: fragment.name().map(str::to_string),
                    },
                );
            }
        }

        Resolution::Evaluated(EffectiveConfig {
            path: path.clone(),
            settings,
            sources,
        })
    }

    fn global_exclusion(&self, path: &RelativeFilePath) -> Option<Exclusion> {
        self.global_ignores.iter().find_map(|fragment| {
            fragment
                .matching_ignore(path)
                .map(|pattern| Exclusion::GlobalIgnore {
                    pattern: pattern.clone(),
                    fragment: fragment.name().map(str::to_string),
                })
        })
    }
}
