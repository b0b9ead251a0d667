#![forbid(unsafe_code)]

//! Rule bundles: named, ordered lists of fragments shipped as a unit
//!
//! A configuration pulls a bundle in with `extends = "<name>"`; the bundle's
//! fragments are spliced into the layer list at that position, in their own
//! order. The built-in bundles are compiled into the binary with
//! `include_str!` so the tool runs without any external files.

use crate::config::fragment::FragmentDef;
use crate::config::rule_value::check_layer_rules;
use crate::error::ConfigError;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Embedded built-in bundle files
const BUILTIN_BUNDLES: &[(&str, &str)] = &[
    (
        "js/recommended",
        include_str!("../../builtin-bundles/js-recommended.toml"),
    ),
    (
        "typescript-eslint/recommended",
        include_str!("../../builtin-bundles/typescript-eslint-recommended.toml"),
    ),
    (
        "prettier",
        include_str!("../../builtin-bundles/prettier.toml"),
    ),
];

/// A named, ordered list of fragment definitions
#[derive(Debug, Clone, PartialEq)]
pub struct Bundle {
    name: String,
    description: String,
    fragments: Vec<FragmentDef>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct BundleFile {
    bundle: BundleMeta,
    #[serde(default)]
    config: Vec<FragmentDef>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct BundleMeta {
    name: String,
    #[serde(default)]
    description: String,
}

impl Bundle {
    pub fn new(name: impl Into<String>, fragments: Vec<FragmentDef>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            fragments,
        }
    }

    /// Parses a bundle from its TOML form
    ///
    /// ```toml
    /// [bundle]
    /// name = "my-bundle"
    ///
    /// [[config]]
    /// files = ["**/*.ts"]
    /// [config.rules]
    /// no-var = "error"
    /// ```
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let document: toml::Table = toml::from_str(s)?;
        check_layer_rules(&serde_json::to_value(&document)?)?;
        let file: BundleFile = toml::from_str(s)?;
        if file.bundle.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "Bundle name must not be empty".to_string(),
            ));
        }
        Ok(Self {
            name: file.bundle.name,
            description: file.bundle.description,
            fragments: file.config,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn fragments(&self) -> &[FragmentDef] {
        &self.fragments
    }
}

/// Lookup table of bundles available to `extends`
#[derive(Debug, Clone, Default)]
pub struct BundleRegistry {
    bundles: BTreeMap<String, Bundle>,
}

impl BundleRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the embedded built-in bundles
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if an embedded bundle fails to parse, or its
    /// declared name disagrees with the name it is registered under.
    pub fn builtin() -> Result<Self, ConfigError> {
        let mut registry = Self::new();
        for (name, content) in BUILTIN_BUNDLES {
            let bundle = Bundle::parse(content)?;
            if bundle.name() != *name {
                return Err(ConfigError::Validation(format!(
                    "Built-in bundle '{}' declares name '{}'",
                    name,
                    bundle.name()
                )));
            }
            registry.register(bundle);
        }
        Ok(registry)
    }

    /// Adds a bundle, replacing any bundle of the same name
    pub fn register(&mut self, bundle: Bundle) {
        self.bundles.insert(bundle.name.clone(), bundle);
    }

    pub fn get(&self, name: &str) -> Option<&Bundle> {
        self.bundles.get(name)
    }

    /// Looks up a bundle, failing with `ConfigError::UnknownBundle`
    pub fn require(&self, name: &str) -> Result<&Bundle, ConfigError> {
        self.get(name)
            .ok_or_else(|| ConfigError::UnknownBundle(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bundles.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.bundles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }
}
