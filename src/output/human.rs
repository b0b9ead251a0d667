#![forbid(unsafe_code)]

//! Human-readable output with optional color

use crate::engine::executor::FileReport;
use crate::engine::resolver::{EffectiveConfig, Exclusion, Resolution};
use crate::types::Severity;
use std::io;
use std::path::Path;
use termcolor::{Color, ColorSpec, WriteColor};

/// Human-readable formatter
///
/// Writes to any `WriteColor`; pass a `termcolor::StandardStream` for the
/// terminal or a `termcolor::Buffer` in tests.
pub struct HumanFormatter;

impl HumanFormatter {
    pub fn new() -> Self {
        HumanFormatter
    }

    /// Prints the resolution of a single file
    ///
    /// Rules are listed in rule-id order with their severity, options and
    /// the layer that set them. Rules that are `off` are only listed when
    /// `show_off` is set.
    pub fn write_resolution(
        &self,
        out: &mut dyn WriteColor,
        display_path: &str,
        resolution: &Resolution,
        show_off: bool,
    ) -> io::Result<()> {
        match resolution {
            Resolution::Excluded(exclusion) => {
                write!(out, "{}: ", display_path)?;
                self.write_exclusion(out, exclusion)?;
                writeln!(out)
            }
            Resolution::Evaluated(config) => self.write_config(out, display_path, config, show_off),
        }
    }

    fn write_config(
        &self,
        out: &mut dyn WriteColor,
        display_path: &str,
        config: &EffectiveConfig,
        show_off: bool,
    ) -> io::Result<()> {
        out.set_color(ColorSpec::new().set_bold(true))?;
        writeln!(out, "{}", display_path)?;
        out.reset()?;

        let width = config
            .settings()
            .keys()
            .map(|id| id.as_str().len())
            .max()
            .unwrap_or(0);

        let mut enabled = 0usize;
        for (rule, value) in config.settings() {
            if value.severity.is_enabled() {
                enabled += 1;
            } else if !show_off {
                continue;
            }

            write!(out, "  ")?;
            write_severity(out, value.severity)?;
            write!(out, "  {:<width$}", rule.as_str(), width = width)?;

            if value.has_options() {
                let options = serde_json::to_string(&value.options).unwrap_or_default();
                write!(out, "  {}", options)?;
            }

            if let Some(source) = config.source_of(rule) {
                out.set_color(ColorSpec::new().set_dimmed(true))?;
                match &source.name {
                    Some(name) => write!(out, "  ({})", name)?,
                    None => write!(out, "  (layer {})", source.index + 1)?,
                }
                out.reset()?;
            }
            writeln!(out)?;
        }

        let off = config.len() - enabled;
        writeln!(out)?;
        writeln!(
            out,
            "{} {} enabled, {} off",
            enabled,
            if enabled == 1 { "rule" } else { "rules" },
            off
        )
    }

    fn write_exclusion(&self, out: &mut dyn WriteColor, exclusion: &Exclusion) -> io::Result<()> {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
        write!(out, "not linted")?;
        out.reset()?;
        write!(out, " ({})", exclusion)
    }

    /// Prints a file listing
    ///
    /// Evaluated files are always listed; excluded files only with
    /// `show_excluded`, followed by the reason. Paths are shown relative to
    /// `root` when they lie below it.
    pub fn write_file_reports(
        &self,
        out: &mut dyn WriteColor,
        reports: &[FileReport],
        root: Option<&Path>,
        show_excluded: bool,
    ) -> io::Result<()> {
        let mut evaluated = 0usize;
        for report in reports {
            let shown = display_path(&report.path, root);
            match &report.resolution {
                Resolution::Evaluated(config) => {
                    evaluated += 1;
                    write!(out, "{}", shown)?;
                    out.set_color(ColorSpec::new().set_dimmed(true))?;
                    write!(out, "  [{} enabled]", config.enabled_rules().count())?;
                    out.reset()?;
                    writeln!(out)?;
                }
                Resolution::Excluded(exclusion) if show_excluded => {
                    write!(out, "{}  ", shown)?;
                    self.write_exclusion(out, exclusion)?;
                    writeln!(out)?;
                }
                Resolution::Excluded(_) => {}
            }
        }

        writeln!(out)?;
        writeln!(
            out,
            "{} {} linted, {} excluded",
            evaluated,
            if evaluated == 1 { "file" } else { "files" },
            reports.len() - evaluated
        )
    }
}

impl Default for HumanFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn write_severity(out: &mut dyn WriteColor, severity: Severity) -> io::Result<()> {
    let mut spec = ColorSpec::new();
    match severity {
        Severity::Error => spec.set_fg(Some(Color::Red)).set_bold(true),
        Severity::Warn => spec.set_fg(Some(Color::Yellow)),
        Severity::Off => spec.set_dimmed(true),
    };
    out.set_color(&spec)?;
    write!(out, "{:<5}", severity.as_str())?;
    out.reset()
}

/// Renders `path` relative to `root` with forward slashes
pub fn display_path(path: &Path, root: Option<&Path>) -> String {
    let shown = root
        .and_then(|root| path.strip_prefix(root).ok())
        .unwrap_or(path);
    shown.to_string_lossy().replace('\\', "/")
}
