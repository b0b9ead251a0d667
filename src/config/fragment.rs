//! Configuration fragments: glob-scoped partial rule settings
//!
//! A [`FragmentDef`] is the authored, serializable form. Building it into a
//! [`Fragment`] compiles every pattern up front, so a malformed glob is
//! reported once at load time and matching itself can never fail.

use crate::config::rule_value::RuleValue;
use crate::error::ConfigError;
use crate::types::{GlobPattern, RelativeFilePath, RuleId};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Authored form of a fragment
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FragmentDef {
    /// Optional label used when reporting where a setting came from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Files this fragment applies to (empty means all files)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<GlobPattern>,

    /// Files this fragment never applies to
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignores: Vec<GlobPattern>,

    /// Partial rule settings
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub rules: BTreeMap<RuleId, RuleValue>,
}

impl FragmentDef {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn files<I, P>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<GlobPattern>,
    {
        self.files.extend(patterns.into_iter().map(Into::into));
        self
    }

    pub fn ignores<I, P>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<GlobPattern>,
    {
        self.ignores.extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Adds one rule setting
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidRuleId` if `rule` is not a valid rule name.
    pub fn rule(mut self, rule: &str, value: RuleValue) -> Result<Self, ConfigError> {
        let id = RuleId::new(rule).ok_or_else(|| ConfigError::InvalidRuleId(rule.to_string()))?;
        self.rules.insert(id, value);
        Ok(self)
    }

    /// Compiles the patterns into a [`Fragment`]
    pub fn build(self) -> Result<Fragment, ConfigError> {
        Fragment::new(self)
    }
}

/// A compiled, immutable fragment
#[derive(Debug, Clone)]
pub struct Fragment {
    name: Option<String>,
    files: Vec<GlobPattern>,
    ignores: Vec<GlobPattern>,
    include_set: Option<GlobSet>,
    exclude_set: Option<GlobSet>,
    rules: BTreeMap<RuleId, RuleValue>,
}

impl Fragment {
    /// Builds a fragment, compiling its include and exclude patterns
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidPattern` for the first pattern that does
    /// not compile.
    pub fn new(def: FragmentDef) -> Result<Self, ConfigError> {
        let include_set = if def.files.is_empty() {
            None
        } else {
            Some(build_globset(&def.files)?)
        };
        let exclude_set = if def.ignores.is_empty() {
            None
        } else {
            Some(build_globset(&def.ignores)?)
        };

        Ok(Self {
            name: def.name,
            files: def.files,
            ignores: def.ignores,
            include_set,
            exclude_set,
            rules: def.rules,
        })
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn files(&self) -> &[GlobPattern] {
        &self.files
    }

    pub fn ignores(&self) -> &[GlobPattern] {
        &self.ignores
    }

    pub fn rules(&self) -> &BTreeMap<RuleId, RuleValue> {
        &self.rules
    }

    /// True if the fragment applies to `path`
    ///
    /// A file matches when it matches any include pattern (or there are
    /// none) and no exclude pattern.
    pub fn matches(&self, path: &RelativeFilePath) -> bool {
        let included = self
            .include_set
            .as_ref()
            .is_none_or(|set| set.is_match(path.as_str()));
        included && self.matching_ignore(path).is_none()
    }

    /// True if the fragment names `path` through an explicit `files` pattern
    pub fn targets(&self, path: &RelativeFilePath) -> bool {
        self.include_set
            .as_ref()
            .is_some_and(|set| set.is_match(path.as_str()))
            && self.matching_ignore(path).is_none()
    }

    /// Returns the first ignore pattern that matches `path`
    pub fn matching_ignore(&self, path: &RelativeFilePath) -> Option<&GlobPattern> {
        let set = self.exclude_set.as_ref()?;
        let index = set.matches(path.as_str()).into_iter().min()?;
        self.ignores.get(index)
    }

    /// True for a pure exclusion mask: ignores only, no files, no rules
    pub fn is_global_ignore(&self) -> bool {
        !self.ignores.is_empty() && self.files.is_empty() && self.rules.is_empty()
    }
}

/// Compiles patterns into a GlobSet
///
/// `*` does not cross `/`; `**` does. A trailing `/` names a directory and
/// matches everything below it.
fn build_globset(patterns: &[GlobPattern]) -> Result<GlobSet, ConfigError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let text = pattern.as_str();
        let expanded;
        let effective = if let Some(dir) = text.strip_suffix('/') {
            expanded = format!("{}/**", dir);
            expanded.as_str()
        } else {
            text
        };

        let glob = GlobBuilder::new(effective)
            .literal_separator(true)
            .build()
            .map_err(|e| ConfigError::InvalidPattern {
                pattern: text.to_string(),
                source: e,
            })?;
        builder.add(glob);
    }
    builder.build().map_err(|e| ConfigError::InvalidPattern {
        pattern: patterns
            .iter()
            .map(GlobPattern::as_str)
            .collect::<Vec<_>>()
            .join(", "),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Severity;

    fn path(p: &str) -> RelativeFilePath {
        RelativeFilePath::new(p).unwrap()
    }

    #[test]
    fn test_no_patterns_matches_everything() {
        let fragment = FragmentDef::new().build().unwrap();
        assert!(fragment.matches(&path("a.ts")));
        assert!(fragment.matches(&path("deep/nested/file.md")));
        assert!(!fragment.targets(&path("a.ts")));
    }

    #[test]
    fn test_single_star_stays_in_segment() {
        let fragment = FragmentDef::new().files(["src/*.js"]).build().unwrap();
        assert!(fragment.matches(&path("src/a.js")));
        assert!(!fragment.matches(&path("src/nested/a.js")));
        assert!(!fragment.matches(&path("a.js")));
    }

    #[test]
    fn test_double_star_crosses_segments() {
        let fragment = FragmentDef::new()
            .files(["**/*.{js,mjs,cjs,jsx,ts,tsx}"])
            .build()
            .unwrap();
        assert!(fragment.matches(&path("a.ts")));
        assert!(fragment.matches(&path("src/components/Button.tsx")));
        assert!(fragment.matches(&path("lib/x.cjs")));
        assert!(!fragment.matches(&path("README.md")));
        assert!(fragment.targets(&path("a.ts")));
    }

    #[test]
    fn test_directory_patterns() {
        let fragment = FragmentDef::new()
            .ignores(["dist/**", "build/"])
            .build()
            .unwrap();
        assert!(!fragment.matches(&path("dist/bundle.js")));
        assert!(!fragment.matches(&path("dist/deep/chunk.js")));
        assert!(!fragment.matches(&path("build/out.js")));
        assert!(fragment.matches(&path("src/dist.js")));
        assert!(fragment.matches(&path("src/dist/bundle.js")));
    }

    #[test]
    fn test_exclude_wins_over_include() {
        let fragment = FragmentDef::new()
            .files(["**/*.js"])
            .ignores(["**/*.min.js"])
            .build()
            .unwrap();
        assert!(fragment.matches(&path("vendor/jquery.js")));
        assert!(!fragment.matches(&path("vendor/jquery.min.js")));
        assert!(!fragment.targets(&path("vendor/jquery.min.js")));
    }

    #[test]
    fn test_matching_ignore_reports_first_pattern() {
        let fragment = FragmentDef::new()
            .ignores(["coverage/**", "**/*.min.js", "**/*.js"])
            .build()
            .unwrap();
        assert_eq!(
            fragment.matching_ignore(&path("a.min.js")).map(GlobPattern::as_str),
            Some("**/*.min.js")
        );
        assert!(fragment.matching_ignore(&path("a.ts")).is_none());
    }

    #[test]
    fn test_invalid_pattern_rejected_at_build() {
        let result = FragmentDef::new().files(["src/[invalid"]).build();
        match result {
            Err(ConfigError::InvalidPattern { pattern, .. }) => assert_eq!(pattern, "src/[invalid"),
            other => panic!("Expected InvalidPattern, got {:?}", other),
        }

        assert!(FragmentDef::new().ignores(["{unclosed"]).build().is_err());
    }

    #[test]
    fn test_global_ignore_classification() {
        let ignore_only = FragmentDef::new().ignores(["dist/**"]).build().unwrap();
        assert!(ignore_only.is_global_ignore());

        let scoped = FragmentDef::new()
            .files(["**/*.js"])
            .ignores(["dist/**"])
            .build()
            .unwrap();
        assert!(!scoped.is_global_ignore());

        let with_rules = FragmentDef::new()
            .ignores(["dist/**"])
            .rule("no-console", RuleValue::bare(Severity::Off))
            .unwrap()
            .build()
            .unwrap();
        assert!(!with_rules.is_global_ignore());

        assert!(!FragmentDef::new().build().unwrap().is_global_ignore());
    }

    #[test]
    fn test_rule_builder_validates_id() {
        let result = FragmentDef::new().rule("not a rule", RuleValue::off());
        assert!(matches!(result, Err(ConfigError::InvalidRuleId(_))));
    }

    #[test]
    fn test_def_rejects_unknown_keys() {
        let result: Result<FragmentDef, _> = toml::from_str(
            r#"
files = ["**/*.js"]
plugins = ["react"]
"#,
        );
        assert!(result.is_err());
    }
}
