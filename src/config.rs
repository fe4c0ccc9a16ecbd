//! Configuration discovery and effective settings resolution.
//!
//! Tablereport reads `tablereport.toml|yaml|yml` from the repository root
//! (or closest ancestor) and merges it with CLI flags to produce an
//! `Effective` config.
//! Defaults:
//! - `showTipsOfTheDay`: true
//! - `checkThisOnly`, `inferPrivatePropertyTypeFromConstructor`,
//!   `checkMissingTypehints`: false
//! - `defaultConfigFile`: `phpstan.neon`
//! - `levelOption`: `level`, `defaultLevel`: 0
//! - `color`: true, `absolutePaths`: false
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::formatter::FormatterOptions;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILES: [&str; 3] = ["tablereport.toml", "tablereport.yaml", "tablereport.yml"];

#[derive(Debug, Default, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
/// Root configuration loaded from `tablereport.toml|yaml`.
pub struct ReportConfig {
    pub show_tips_of_the_day: Option<bool>,
    pub check_this_only: Option<bool>,
    pub infer_private_property_type_from_constructor: Option<bool>,
    pub check_missing_typehints: Option<bool>,
    pub default_config_file: Option<String>,
    pub level_option: Option<String>,
    pub default_level: Option<u32>,
    pub color: Option<bool>,
    pub absolute_paths: Option<bool>,
}

#[derive(Debug, Default, Clone)]
/// Values given on the command line; `None` defers to the config file.
pub struct RunOverrides {
    pub repo_root: Option<String>,
    pub show_tips_of_the_day: Option<bool>,
    pub check_this_only: Option<bool>,
    pub infer_private_property_type_from_constructor: Option<bool>,
    pub check_missing_typehints: Option<bool>,
    pub color: Option<bool>,
    pub absolute_paths: Option<bool>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by the binary after applying precedence.
pub struct Effective {
    pub repo_root: PathBuf,
    pub config_found: bool,
    pub color: bool,
    pub absolute_paths: bool,
    pub formatter: FormatterOptions,
}

/// Walk upward from `start` to detect the repository root.
///
/// Stops when a `tablereport.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if CONFIG_FILES.iter().any(|f| cur.join(f).exists()) || cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `ReportConfig` from `tablereport.toml` or `tablereport.yaml|yml` if
/// present. Unreadable or malformed files are logged and skipped.
pub fn load_config(root: &Path) -> Option<ReportConfig> {
    let toml_path = root.join(CONFIG_FILES[0]);
    if toml_path.exists() {
        let s = read_config(&toml_path)?;
        return match toml::from_str::<ReportConfig>(&s) {
            Ok(cfg) => {
                log::debug!("Loaded config from {}", toml_path.display());
                Some(cfg)
            }
            Err(e) => {
                log::warn!("Ignoring invalid {}: {}", toml_path.display(), e);
                None
            }
        };
    }
    for yml in &CONFIG_FILES[1..] {
        let p = root.join(yml);
        if p.exists() {
            let s = read_config(&p)?;
            return match serde_yaml::from_str::<ReportConfig>(&s) {
                Ok(cfg) => {
                    log::debug!("Loaded config from {}", p.display());
                    Some(cfg)
                }
                Err(e) => {
                    log::warn!("Ignoring invalid {}: {}", p.display(), e);
                    None
                }
            };
        }
    }
    None
}

fn read_config(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(s) => Some(s),
        Err(e) => {
            log::warn!("Cannot read {}: {}", path.display(), e);
            None
        }
    }
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(overrides: &RunOverrides) -> Effective {
    let start = PathBuf::from(overrides.repo_root.as_deref().unwrap_or("."));
    let start = fs::canonicalize(&start).unwrap_or(start);
    let repo_root = detect_repo_root(&start);
    let loaded = load_config(&repo_root);
    let config_found = loaded.is_some();
    let cfg = loaded.unwrap_or_default();
    let defaults = FormatterOptions::default();

    let formatter = FormatterOptions {
        show_tips_of_the_day: overrides
            .show_tips_of_the_day
            .or(cfg.show_tips_of_the_day)
            .unwrap_or(defaults.show_tips_of_the_day),
        check_this_only: overrides
            .check_this_only
            .or(cfg.check_this_only)
            .unwrap_or(defaults.check_this_only),
        infer_private_property_type_from_constructor: overrides
            .infer_private_property_type_from_constructor
            .or(cfg.infer_private_property_type_from_constructor)
            .unwrap_or(defaults.infer_private_property_type_from_constructor),
        check_missing_typehints: overrides
            .check_missing_typehints
            .or(cfg.check_missing_typehints)
            .unwrap_or(defaults.check_missing_typehints),
        default_config_file: cfg
            .default_config_file
            .unwrap_or(defaults.default_config_file),
        level_option: cfg.level_option.unwrap_or(defaults.level_option),
        default_level: cfg.default_level.unwrap_or(defaults.default_level),
    };

    Effective {
        repo_root,
        config_found,
        color: overrides.color.or(cfg.color).unwrap_or(true),
        absolute_paths: overrides
            .absolute_paths
            .or(cfg.absolute_paths)
            .unwrap_or(false),
        formatter,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn at(root: &Path) -> RunOverrides {
        RunOverrides {
            repo_root: root.to_str().map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_without_config() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        let eff = resolve_effective(&at(dir.path()));
        assert!(!eff.config_found);
        assert!(eff.color);
        assert!(!eff.absolute_paths);
        assert_eq!(eff.formatter, FormatterOptions::default());
    }

    #[test]
    fn test_detect_and_load_toml() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut f = fs::File::create(root.join("tablereport.toml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
showTipsOfTheDay = false
checkMissingTypehints = true
defaultConfigFile = "analysis.neon"
defaultLevel = 3
color = false
    "#
        )
        .unwrap();

        let nested = root.join("src/deep");
        fs::create_dir_all(&nested).unwrap();
        let eff = resolve_effective(&at(&nested));
        assert!(eff.config_found);
        assert_eq!(eff.repo_root, fs::canonicalize(root).unwrap());
        assert!(!eff.formatter.show_tips_of_the_day);
        assert!(eff.formatter.check_missing_typehints);
        assert_eq!(eff.formatter.default_config_file, "analysis.neon");
        assert_eq!(eff.formatter.default_level, 3);
        assert_eq!(eff.formatter.level_option, "level");
        assert!(!eff.color);
    }

    #[test]
    fn test_load_yaml() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(
            root.join("tablereport.yml"),
            "checkThisOnly: true\nlevelOption: rule-level\nabsolutePaths: true\n",
        )
        .unwrap();
        let eff = resolve_effective(&at(root));
        assert!(eff.formatter.check_this_only);
        assert_eq!(eff.formatter.level_option, "rule-level");
        assert!(eff.absolute_paths);
    }

    #[test]
    fn test_cli_overrides_config() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(
            root.join("tablereport.toml"),
            "showTipsOfTheDay = true\ninferPrivatePropertyTypeFromConstructor = false\n",
        )
        .unwrap();
        let overrides = RunOverrides {
            show_tips_of_the_day: Some(false),
            infer_private_property_type_from_constructor: Some(true),
            color: Some(false),
            ..at(root)
        };
        let eff = resolve_effective(&overrides);
        assert!(!eff.formatter.show_tips_of_the_day);
        assert!(eff.formatter.infer_private_property_type_from_constructor);
        assert!(!eff.color);
    }

    #[test]
    fn test_invalid_config_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("tablereport.toml"), "showTipsOfTheDay = \"maybe\"\n").unwrap();
        assert!(load_config(root).is_none());
        let eff = resolve_effective(&at(root));
        assert!(!eff.config_found);
        assert!(eff.formatter.show_tips_of_the_day);
    }
}
