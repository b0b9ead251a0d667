//! Parsing, validation and discovery of lintstack.toml configuration files

use crate::config::bundle::BundleRegistry;
use crate::config::fragment::{Fragment, FragmentDef};
use crate::config::rule_value::{RuleValue, check_layer_rules};
use crate::engine::resolver::Resolver;
use crate::error::ConfigError;
use crate::types::{GlobPattern, RuleId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// File names searched for, in order of preference
pub const CONFIG_FILE_NAMES: &[&str] = &["lintstack.toml", "lintstack.json"];

/// Configuration used when a project has none of its own
pub const DEFAULT_CONFIG: &str = include_str!("../../defaults/lintstack.toml");

/// Main configuration struct for lintstack.toml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Metadata and resolver options
    pub lintstack: LintstackMeta,

    /// Layers, applied in order
    #[serde(default, rename = "config")]
    pub layers: Vec<ConfigEntry>,
}

/// `[lintstack]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct LintstackMeta {
    /// Configuration version (must be "1")
    pub version: String,

    /// Skip files that no layer names through `files`
    #[serde(default)]
    pub restrict_to_targets: bool,

    /// Ignore `node_modules` and `.git` without being told
    #[serde(default = "default_true")]
    pub default_ignores: bool,
}

fn default_true() -> bool {
    true
}

/// One `[[config]]` entry: either a fragment or a reference to a bundle
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Bundle whose fragments replace this entry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<GlobPattern>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignores: Vec<GlobPattern>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub rules: BTreeMap<RuleId, RuleValue>,
}

impl ConfigEntry {
    fn to_fragment_def(&self) -> FragmentDef {
        FragmentDef {
            name: self.name.clone(),
            files: self.files.clone(),
            ignores: self.ignores.clone(),
            rules: self.rules.clone(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    ///
    /// `.json` files are read as JSON; anything else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        if path.extension().and_then(|s| s.to_str()) == Some("json") {
            Self::parse_json(&content)
        } else {
            Self::parse(&content)
        }
    }

    /// Parse configuration from a TOML string
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let document: toml::Table = toml::from_str(s)?;
        check_layer_rules(&serde_json::to_value(&document)?)?;
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a JSON string
    pub fn parse_json(s: &str) -> Result<Self, ConfigError> {
        let document: serde_json::Value = serde_json::from_str(s)?;
        check_layer_rules(&document)?;
        let config: Config = serde_json::from_value(document)?;
        config.validate()?;
        Ok(config)
    }

    /// The embedded default configuration
    pub fn builtin_default() -> Result<Self, ConfigError> {
        Self::parse(DEFAULT_CONFIG)
    }

    /// Validate the configuration
    fn validate(&self) -> Result<(), ConfigError> {
        if self.lintstack.version != "1" {
            return Err(ConfigError::Validation(format!(
                "Unsupported configuration version '{}'. Expected '1'",
                self.lintstack.version
            )));
        }

        for (index, entry) in self.layers.iter().enumerate() {
            let label = entry
                .name
                .clone()
                .unwrap_or_else(|| format!("#{}", index + 1));

            if let Some(bundle) = &entry.extends {
                if bundle.trim().is_empty() {
                    return Err(ConfigError::Validation(format!(
                        "Layer {} has an empty 'extends'",
                        label
                    )));
                }
                if !entry.files.is_empty() || !entry.ignores.is_empty() || !entry.rules.is_empty()
                {
                    return Err(ConfigError::Validation(format!(
                        "Layer {} uses 'extends' together with files, ignores or rules; \
                         put those in a separate layer",
                        label
                    )));
                }
                continue;
            }

            // Compiling the fragment checks every pattern
            Fragment::new(entry.to_fragment_def())?;
        }

        Ok(())
    }

    /// Flattens the layers, splicing in bundles at their `extends` position
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownBundle` if an `extends` names a bundle
    /// the registry does not have.
    pub fn layer_defs(&self, bundles: &BundleRegistry) -> Result<Vec<FragmentDef>, ConfigError> {
        let mut defs = Vec::new();
        for entry in &self.layers {
            match &entry.extends {
                Some(name) => defs.extend(bundles.require(name)?.fragments().iter().cloned()),
                None => defs.push(entry.to_fragment_def()),
            }
        }
        Ok(defs)
    }

    /// Builds the resolver for this configuration
    ///
    /// `base_dir` is the directory the configuration's patterns are relative
    /// to, normally the directory holding the configuration file.
    pub fn build_resolver(
        &self,
        bundles: &BundleRegistry,
        base_dir: Option<&Path>,
    ) -> Result<Resolver, ConfigError> {
        let mut builder = Resolver::builder()
            .restrict_to_targets(self.lintstack.restrict_to_targets)
            .default_ignores(self.lintstack.default_ignores)
            .fragments(self.layer_defs(bundles)?);
        if let Some(dir) = base_dir {
            builder = builder.base_dir(dir);
        }
        builder.build()
    }
}

/// Finds the nearest configuration file at or above `start`
///
/// Within one directory `lintstack.toml` wins over `lintstack.json`.
pub fn discover(start: &Path) -> Option<PathBuf> {
    start.ancestors().find_map(|dir| {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
    })
}
