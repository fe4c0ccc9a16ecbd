//! Tablereport CLI binary entry point.
//! Loads an analysis result, renders it, and exits with the report's code.

use clap::Parser;
use owo_colors::OwoColorize;
use std::io::Write;
use tablereport::cli::{Cli, Commands};
use tablereport::config;
use tablereport::formatter::TableErrorFormatter;
use tablereport::models;
use tablereport::output::{use_colors, ConsoleOutput};
use tablereport::relative_path::{
    BaseDirRelativePathHelper, RelativePathHelper, SimpleRelativePathHelper,
};

fn error_prefix(color: bool) -> String {
    if color {
        "error:".red().bold().to_string()
    } else {
        "error:".to_string()
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let overrides = cli.cmd.overrides();
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Render { input, .. } => {
            let eff = config::resolve_effective(&overrides);
            let color = use_colors(eff.color);
            if !eff.config_found {
                log::info!("No tablereport.toml found; using defaults.");
            }
            let result = match models::load_result(&input) {
                Ok(r) => r,
                Err(e) => {
                    eprintln!("{} {}", error_prefix(color), e);
                    std::process::exit(2);
                }
            };
            let helper: Box<dyn RelativePathHelper> = if eff.absolute_paths {
                Box::new(SimpleRelativePathHelper)
            } else {
                Box::new(BaseDirRelativePathHelper::new(eff.repo_root.clone()))
            };
            let formatter = TableErrorFormatter::new(helper, eff.formatter);
            let mut output = ConsoleOutput::stdout(color);
            let rendered = formatter
                .format_errors(&result, &mut output)
                .and_then(|code| output.into_inner().flush().map(|_| code));
            match rendered {
                Ok(code) => std::process::exit(code),
                Err(e) => {
                    eprintln!("{} cannot write report: {}", error_prefix(color), e);
                    std::process::exit(2);
                }
            }
        }
    }
}
