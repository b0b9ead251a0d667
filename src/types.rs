#![forbid(unsafe_code)]

//! Core domain types for lintstack
//!
//! This module defines the fundamental value types shared by the
//! configuration layer and the resolver.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Component, Path};
use std::sync::LazyLock;

/// Rule severity levels
///
/// Ordered so that `Off < Warn < Error`, matching their ordinals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Off,
    Warn,
    Error,
}

impl Severity {
    /// Parses a severity token (`off`, `warn`, `error`)
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "off" => Some(Severity::Off),
            "warn" => Some(Severity::Warn),
            "error" => Some(Severity::Error),
            _ => None,
        }
    }

    /// Parses a numeric severity (`0`, `1`, `2`)
    pub fn from_ordinal(ordinal: u64) -> Option<Self> {
        match ordinal {
            0 => Some(Severity::Off),
            1 => Some(Severity::Warn),
            2 => Some(Severity::Error),
            _ => None,
        }
    }

    pub fn ordinal(&self) -> u8 {
        match self {
            Severity::Off => 0,
            Severity::Warn => 1,
            Severity::Error => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Off => "off",
            Severity::Warn => "warn",
            Severity::Error => "error",
        }
    }

    /// Returns true unless the rule is switched off
    pub fn is_enabled(&self) -> bool {
        *self != Severity::Off
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

static RULE_ID_PATTERN: LazyLock<regex::Regex> = LazyLock::new(|| {
    // `name`, `plugin/name`, `@scope/name`, `@scope/plugin/name`
    regex::Regex::new(r"^(@[A-Za-z0-9_.-]+/)?([A-Za-z0-9_.-]+/)?[A-Za-z0-9_-]+$")
        .unwrap_or_else(|e| panic!("rule id pattern must compile: {e}"))
});

/// A validated rule identifier
///
/// Rule IDs are either bare (`eqeqeq`, `no-console`) or scoped by the plugin
/// that provides them (`@typescript-eslint/no-unused-vars`, `react/jsx-key`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RuleId(String);

impl RuleId {
    /// Creates a new RuleId, validating the input
    ///
    /// Returns None if the input is empty or not a well-formed rule name
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        if RULE_ID_PATTERN.is_match(&id) {
            Some(RuleId(id))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the plugin prefix, if the rule comes from a plugin
    ///
    /// `@typescript-eslint/no-unused-vars` yields `@typescript-eslint`.
    pub fn plugin(&self) -> Option<&str> {
        self.0.rsplit_once('/').map(|(plugin, _)| plugin)
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for RuleId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        RuleId::new(value.clone()).ok_or_else(|| format!("Invalid rule ID '{}'", value))
    }
}

impl From<RuleId> for String {
    fn from(rule_id: RuleId) -> Self {
        rule_id.0
    }
}

/// A glob pattern for file matching
///
/// A plain wrapper around the pattern text; compilation happens in
/// [`crate::config::Fragment`] via `globset`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GlobPattern(String);

impl GlobPattern {
    pub fn new(pattern: impl Into<String>) -> Self {
        GlobPattern(pattern.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GlobPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for GlobPattern {
    fn from(pattern: String) -> Self {
        GlobPattern(pattern)
    }
}

impl From<&str> for GlobPattern {
    fn from(pattern: &str) -> Self {
        GlobPattern(pattern.to_string())
    }
}

/// A normalized path, relative to the configuration's base directory
///
/// Normalization converts backslashes to forward slashes, drops `.` segments
/// and folds `..` segments. Paths that are empty, contain NUL bytes, are
/// absolute, or climb above the base directory are rejected.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RelativeFilePath(String);

impl RelativeFilePath {
    /// Validates and normalizes a relative path
    ///
    /// On failure returns a short reason suitable for an error message.
    pub fn new(path: &str) -> Result<Self, &'static str> {
        if path.is_empty() {
            return Err("path is empty");
        }
        if path.contains('\0') {
            return Err("path contains a NUL byte");
        }

        let path = path.replace('\\', "/");
        if path.starts_with('/') || Path::new(&path).has_root() {
            return Err("path is absolute");
        }

        let mut segments: Vec<&str> = Vec::new();
        for segment in path.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    if segments.pop().is_none() {
                        return Err("path escapes the base directory");
                    }
                }
                other => segments.push(other),
            }
        }

        if segments.is_empty() {
            return Err("path does not name a file");
        }

        Ok(RelativeFilePath(segments.join("/")))
    }

    /// Makes `path` relative to `base` and normalizes it
    pub fn from_path(path: &Path, base: Option<&Path>) -> Result<Self, &'static str> {
        let relative = if path.is_absolute() {
            let Some(base) = base else {
                return Err("path is absolute and no base directory is configured");
            };
            path.strip_prefix(base)
                .map_err(|_| "path is outside the base directory")?
        } else {
            path
        };

        let mut text = String::new();
        for component in relative.components() {
            match component {
                Component::Normal(part) => {
                    let part = part.to_str().ok_or("path is not valid UTF-8")?;
                    if !text.is_empty() {
                        text.push('/');
                    }
                    text.push_str(part);
                }
                Component::ParentDir => {
                    if !text.is_empty() {
                        text.push('/');
                    }
                    text.push_str("..");
                }
                Component::CurDir => {}
                Component::RootDir | Component::Prefix(_) => return Err("path is absolute"),
            }
        }

        Self::new(&text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RelativeFilePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
