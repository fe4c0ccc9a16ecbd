//! Data models for analysis results consumed by the report printers.

use crate::error::ReportError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// A single diagnostic tied to a source file.
pub struct AnalysisError {
    pub file: String,
    /// `None` for errors that are not attached to a line.
    #[serde(default)]
    pub line: Option<u32>,
    pub message: String,
    /// May reference the project config file via `%configurationFile%`.
    #[serde(default)]
    pub tip: Option<String>,
}

impl AnalysisError {
    pub fn new(file: impl Into<String>, line: Option<u32>, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            line,
            message: message.into(),
            tip: None,
        }
    }

    pub fn with_tip(mut self, tip: impl Into<String>) -> Self {
        self.tip = Some(tip.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
/// Outcome of one analysis run, as handed over by the analysis engine.
pub struct AnalysisResult {
    pub file_specific_errors: Vec<AnalysisError>,
    pub not_file_specific_errors: Vec<String>,
    pub warnings: Vec<String>,
    pub project_config_file: Option<String>,
    pub default_level_used: bool,
    pub has_inferrable_property_types_from_constructor: bool,
}

impl AnalysisResult {
    pub fn total_errors_count(&self) -> usize {
        self.file_specific_errors.len() + self.not_file_specific_errors.len()
    }

    pub fn has_errors(&self) -> bool {
        self.total_errors_count() > 0
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Load an `AnalysisResult` JSON document from `path`, or from stdin when
/// `path` is `-`.
pub fn load_result(path: &str) -> Result<AnalysisResult, ReportError> {
    let (source, raw) = if path == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| ReportError::io("<stdin>", e))?;
        ("<stdin>".to_string(), buf)
    } else {
        let raw = fs::read_to_string(Path::new(path)).map_err(|e| ReportError::io(path, e))?;
        (path.to_string(), raw)
    };
    log::debug!("Loaded analysis result from {} ({} bytes)", source, raw.len());
    parse_result(&source, &raw)
}

/// Parse an `AnalysisResult` from its JSON form. `source` names the input
/// in error messages.
pub fn parse_result(source: &str, raw: &str) -> Result<AnalysisResult, ReportError> {
    serde_json::from_str(raw).map_err(|e| ReportError::InvalidResult {
        source_name: source.to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_counts_and_flags() {
        let res = AnalysisResult {
            file_specific_errors: vec![
                AnalysisError::new("a.php", Some(1), "x"),
                AnalysisError::new("b.php", None, "y"),
            ],
            not_file_specific_errors: vec!["config broken".into()],
            ..Default::default()
        };
        assert_eq!(res.total_errors_count(), 3);
        assert!(res.has_errors());
        assert!(!res.has_warnings());
        assert!(!AnalysisResult::default().has_errors());
    }

    #[test]
    fn test_parse_camel_case_with_defaults() {
        let raw = r#"{
            "fileSpecificErrors": [
                {"file": "/p/src/Foo.php", "line": 10, "message": "Undefined variable"},
                {"file": "/p/src/Foo.php", "message": "No line", "tip": "See %configurationFile%"}
            ],
            "warnings": ["careful"],
            "defaultLevelUsed": true
        }"#;
        let res = parse_result("inline", raw).unwrap();
        assert_eq!(res.file_specific_errors.len(), 2);
        assert_eq!(res.file_specific_errors[0].line, Some(10));
        assert_eq!(res.file_specific_errors[1].line, None);
        assert_eq!(
            res.file_specific_errors[1].tip.as_deref(),
            Some("See %configurationFile%")
        );
        assert!(res.not_file_specific_errors.is_empty());
        assert!(res.project_config_file.is_none());
        assert!(res.default_level_used);
        assert!(!res.has_inferrable_property_types_from_constructor);
    }

    #[test]
    fn test_parse_rejects_malformed_document() {
        let err = parse_result("broken.json", "{ not json").unwrap_err();
        assert!(matches!(err, ReportError::InvalidResult { .. }));
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn test_load_result_from_file_and_missing_file() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("result.json");
        fs::write(&p, r#"{"notFileSpecificErrors": ["boom"]}"#).unwrap();
        let res = load_result(p.to_str().unwrap()).unwrap();
        assert_eq!(res.total_errors_count(), 1);

        let missing = dir.path().join("nope.json");
        let err = load_result(missing.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, ReportError::Io { .. }));
    }
}
