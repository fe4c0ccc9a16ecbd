//! CLI argument parsing via `clap`.

use crate::config::RunOverrides;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "tablereport",
    version,
    about = "Render static-analysis results as console tables",
    long_about = "Tablereport — renders an analysis result document as per-file error tables with a summary and tips.\n\nConfiguration precedence: CLI > tablereport.toml > defaults.",
    after_help = "Examples:\n  tablereport render result.json\n  analyser --format json | tablereport render - --no-tips",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current tablereport version.")]
    Version,
    /// Render an analysis result
    #[command(
        about = "Render an analysis result",
        long_about = "Print per-file error tables, file-independent errors, warnings and a summary. Exits 1 when the result has errors.",
        after_help = "Examples:\n  tablereport render result.json\n  tablereport render - --check-missing-typehints"
    )]
    Render {
        #[arg(help = "Path to the analysis result JSON, or - for stdin")]
        input: String,
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Do not print tips of the day")]
        no_tips: bool,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "The analysis only checked $this references")]
        check_this_only: bool,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Private property types are already inferred from constructors")]
        infer_private_property_types: bool,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "The analysis checked missing typehints")]
        check_missing_typehints: bool,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Disable colored output")]
        no_ansi: bool,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Show file paths as reported")]
        absolute_paths: bool,
    },
}

fn flag(set: bool, value: bool) -> Option<bool> {
    if set {
        Some(value)
    } else {
        None
    }
}

impl Commands {
    /// CLI overrides for config resolution; unset flags defer to the config file.
    pub fn overrides(&self) -> RunOverrides {
        match self {
            Commands::Version => RunOverrides::default(),
            Commands::Render {
                repo_root,
                no_tips,
                check_this_only,
                infer_private_property_types,
                check_missing_typehints,
                no_ansi,
                absolute_paths,
                ..
            } => RunOverrides {
                repo_root: repo_root.clone(),
                show_tips_of_the_day: flag(*no_tips, false),
                check_this_only: flag(*check_this_only, true),
                infer_private_property_type_from_constructor: flag(
                    *infer_private_property_types,
                    true,
                ),
                check_missing_typehints: flag(*check_missing_typehints, true),
                color: flag(*no_ansi, false),
                absolute_paths: flag(*absolute_paths, true),
            },
        }
    }
}
