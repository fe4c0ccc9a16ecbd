//! Table report for analysis results.
//!
//! Renders per-file error tables, file-independent errors and warnings,
//! a pluralized summary and optional tips of the day, then derives the
//! process exit code.

use crate::models::{AnalysisError, AnalysisResult};
use crate::output::Output;
use crate::relative_path::RelativePathHelper;
use std::io;

/// Placeholder in error tips replaced with the project config file path.
pub const CONFIGURATION_FILE_PLACEHOLDER: &str = "%configurationFile%";
pub const TIP_MARKER: &str = "💡";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Switches gating the optional tips plus the strings they interpolate.
pub struct FormatterOptions {
    pub show_tips_of_the_day: bool,
    pub check_this_only: bool,
    pub infer_private_property_type_from_constructor: bool,
    pub check_missing_typehints: bool,
    /// Shown in tips when the result carries no project config file.
    pub default_config_file: String,
    /// CLI option name suggested by the rule level tip (without dashes).
    pub level_option: String,
    pub default_level: u32,
}

impl Default for FormatterOptions {
    fn default() -> Self {
        Self {
            show_tips_of_the_day: true,
            check_this_only: false,
            infer_private_property_type_from_constructor: false,
            check_missing_typehints: false,
            default_config_file: "phpstan.neon".to_string(),
            level_option: "level".to_string(),
            default_level: 0,
        }
    }
}

pub struct TableErrorFormatter<R: RelativePathHelper> {
    relative_path_helper: R,
    options: FormatterOptions,
}

impl<R: RelativePathHelper> TableErrorFormatter<R> {
    pub fn new(relative_path_helper: R, options: FormatterOptions) -> Self {
        Self {
            relative_path_helper,
            options,
        }
    }

    /// Render `result` into `output` and return the exit code: 1 when the
    /// run has errors, 0 otherwise. Warnings alone never fail the run.
    pub fn format_errors(
        &self,
        result: &AnalysisResult,
        output: &mut dyn Output,
    ) -> io::Result<i32> {
        let project_config_file = match result.project_config_file.as_deref() {
            Some(path) => self.relative_path_helper.relative_path(path),
            None => self.options.default_config_file.clone(),
        };

        if !result.has_errors() && !result.has_warnings() {
            log::debug!("No errors or warnings; rendering success path");
            output.success("No errors")?;
            if self.options.show_tips_of_the_day {
                if result.default_level_used {
                    self.write_level_tip(output)?;
                } else {
                    self.write_infer_properties_tip(output, result, &project_config_file)?;
                }
            }
            return Ok(0);
        }

        let groups = group_by_file(&result.file_specific_errors);
        log::debug!(
            "Rendering {} file-specific errors across {} files",
            result.file_specific_errors.len(),
            groups.len()
        );
        for (file, errors) in &groups {
            let rows: Vec<Vec<String>> = errors
                .iter()
                .map(|error| error_row(error, &project_config_file))
                .collect();
            let headers = vec![
                "Line".to_string(),
                self.relative_path_helper.relative_path(file),
            ];
            output.table(&headers, &rows)?;
        }

        if !result.not_file_specific_errors.is_empty() {
            output.table(
                &[String::new(), "Error".to_string()],
                &message_rows(&result.not_file_specific_errors),
            )?;
        }

        let warnings_count = result.warnings.len();
        if warnings_count > 0 {
            output.table(
                &[String::new(), "Warning".to_string()],
                &message_rows(&result.warnings),
            )?;
        }

        let total_errors = result.total_errors_count();
        let summary = summary_message(total_errors, warnings_count);
        if total_errors > 0 {
            output.error(&summary)?;
        } else {
            output.warning(&summary)?;
        }

        if self.options.check_missing_typehints && self.options.show_tips_of_the_day {
            self.write_infer_properties_tip(output, result, &project_config_file)?;
        }

        Ok(if total_errors > 0 { 1 } else { 0 })
    }

    fn write_level_tip(&self, output: &mut dyn Output) -> io::Result<()> {
        output.write_line_formatted(&format!("{} Tip of the Day:", TIP_MARKER))?;
        output.write_line_formatted(&format!(
            "PHPStan is performing only the most basic checks.\nYou can pass a higher rule level through the <fg=cyan>--{}</> option\n(the default and current level is {}) to analyse code more thoroughly.",
            self.options.level_option, self.options.default_level
        ))?;
        output.write_line_formatted("")
    }

    fn write_infer_properties_tip(
        &self,
        output: &mut dyn Output,
        result: &AnalysisResult,
        project_config_file: &str,
    ) -> io::Result<()> {
        if self.options.check_this_only
            || !result.has_inferrable_property_types_from_constructor
            || self.options.infer_private_property_type_from_constructor
        {
            return Ok(());
        }
        output.write_line_formatted(&format!("{} Tip of the Day:", TIP_MARKER))?;
        output.write_line_formatted(
            "One or more properties in your code do not have a phpDoc with a type\nbut it could be inferred from the constructor to find more bugs.",
        )?;
        output.write_line_formatted(&format!(
            "Use <fg=cyan>inferPrivatePropertyTypeFromConstructor: true</> in your <fg=cyan>{}</> to try it out!",
            project_config_file
        ))?;
        output.write_line_formatted("")
    }
}

/// Group errors by file, keeping first-seen file order and the original
/// order of errors within each file.
pub fn group_by_file(errors: &[AnalysisError]) -> Vec<(&str, Vec<&AnalysisError>)> {
    let mut groups: Vec<(&str, Vec<&AnalysisError>)> = Vec::new();
    let mut index: std::collections::HashMap<&str, usize> = std::collections::HashMap::new();
    for error in errors {
        let slot = *index.entry(error.file.as_str()).or_insert_with(|| {
            groups.push((error.file.as_str(), Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(error);
    }
    groups
}

/// `"<count> <singular|plural>"`.
pub fn pluralize(count: usize, singular: &str, plural: &str) -> String {
    format!("{} {}", count, if count == 1 { singular } else { plural })
}

pub fn summary_message(errors: usize, warnings: usize) -> String {
    let mut message = format!("Found {}", pluralize(errors, "error", "errors"));
    if warnings > 0 {
        message.push_str(&format!(" and {}", pluralize(warnings, "warning", "warnings")));
    }
    message
}

fn error_row(error: &AnalysisError, project_config_file: &str) -> Vec<String> {
    let line = error.line.map(|l| l.to_string()).unwrap_or_default();
    let mut message = error.message.clone();
    if let Some(tip) = &error.tip {
        message.push('\n');
        message.push_str(TIP_MARKER);
        message.push(' ');
        message.push_str(&tip.replace(CONFIGURATION_FILE_PLACEHOLDER, project_config_file));
    }
    vec![line, message]
}

fn message_rows(messages: &[String]) -> Vec<Vec<String>> {
    messages
        .iter()
        .map(|m| vec![String::new(), m.clone()])
        .collect()
}
