#![forbid(unsafe_code)]

//! JSONL output formatter for machine-readable output
//!
//! One JSON object per line. A single-file resolution is printed as one
//! `rule` record per configured rule (sorted by rule id) followed by one
//! `file` record. A file listing is printed as one `file` record per file
//! followed by one `summary` record.

use crate::engine::executor::FileReport;
use crate::engine::resolver::{Exclusion, Resolution, RuleSource};
use crate::output::human::display_path;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;

/// JSONL output formatter
pub struct JsonlFormatter;

impl JsonlFormatter {
    pub fn new() -> Self {
        JsonlFormatter
    }

    /// Formats the resolution of a single file
    ///
    /// `rule` records for rules that are `off` are only emitted with
    /// `show_off`; the `file` record always counts every configured rule.
    pub fn format_resolution(
        &self,
        display_path: &str,
        resolution: &Resolution,
        show_off: bool,
    ) -> String {
        let mut output = String::new();

        match resolution {
            Resolution::Evaluated(config) => {
                for (rule, value) in config.settings() {
                    if !value.severity.is_enabled() && !show_off {
                        continue;
                    }
                    push_record(
                        &mut output,
                        &RuleRecord {
                            record_type: "rule",
                            file: display_path,
                            rule: rule.as_str(),
                            severity: value.severity.as_str(),
                            options: &value.options,
                            source: config.source_of(rule),
                        },
                    );
                }
                push_record(
                    &mut output,
                    &FileRecord {
                        record_type: "file",
                        file: display_path,
                        evaluated: true,
                        rules: Some(config.len()),
                        enabled: Some(config.enabled_rules().count()),
                        exclusion: None,
                    },
                );
            }
            Resolution::Excluded(exclusion) => push_record(
                &mut output,
                &FileRecord {
                    record_type: "file",
                    file: display_path,
                    evaluated: false,
                    rules: None,
                    enabled: None,
                    exclusion: Some(exclusion),
                },
            ),
        }

        output
    }

    /// Formats a file listing
    ///
    /// Excluded files are included only when `show_excluded` is set; the
    /// summary always counts them.
    pub fn format_file_reports(
        &self,
        reports: &[FileReport],
        root: Option<&Path>,
        show_excluded: bool,
    ) -> String {
        let mut output = String::new();
        let mut evaluated = 0usize;

        for report in reports {
            let shown = display_path(&report.path, root);
            match &report.resolution {
                Resolution::Evaluated(config) => {
                    evaluated += 1;
                    push_record(
                        &mut output,
                        &FileRecord {
                            record_type: "file",
                            file: &shown,
                            evaluated: true,
                            rules: Some(config.len()),
                            enabled: Some(config.enabled_rules().count()),
                            exclusion: None,
                        },
                    );
                }
                Resolution::Excluded(exclusion) if show_excluded => push_record(
                    &mut output,
                    &FileRecord {
                        record_type: "file",
                        file: &shown,
                        evaluated: false,
                        rules: None,
                        enabled: None,
                        exclusion: Some(exclusion),
                    },
                ),
                Resolution::Excluded(_) => {}
            }
        }

        push_record(
            &mut output,
            &SummaryRecord {
                record_type: "summary",
                files: reports.len(),
                evaluated,
                excluded: reports.len() - evaluated,
            },
        );

        output
    }
}

impl Default for JsonlFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn push_record(output: &mut String, record: &impl Serialize) {
    if let Ok(json) = serde_json::to_string(record) {
        output.push_str(&json);
        output.push('\n');
    }
}

fn no_options(options: &&[Value]) -> bool {
    options.is_empty()
}

#[derive(Debug, Serialize)]
struct RuleRecord<'a> {
    #[serde(rename = "type")]
    record_type: &'static str,
    file: &'a str,
    rule: &'a str,
    severity: &'static str,
    #[serde(skip_serializing_if = "no_options")]
    options: &'a [Value],
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<&'a RuleSource>,
}

#[derive(Debug, Serialize)]
struct FileRecord<'a> {
    #[serde(rename = "type")]
    record_type: &'static str,
    file: &'a str,
    evaluated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    rules: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    enabled: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    exclusion: Option<&'a Exclusion>,
}

#[derive(Debug, Serialize)]
struct SummaryRecord {
    #[serde(rename = "type")]
    record_type: &'static str,
    files: usize,
    evaluated: usize,
    excluded: usize,
}
