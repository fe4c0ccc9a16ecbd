//! Tablereport core library.
//!
//! This crate renders the result of a static-analysis run as a console
//! report: per-file error tables, file-independent errors, warnings, a
//! summary line, tips of the day and an exit code.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Discovery and effective configuration resolution.
//! - `error`: Errors raised while loading inputs.
//! - `formatter`: The table report itself.
//! - `models`: Analysis result data models and loading.
//! - `output`: Output sink trait and the terminal renderer.
//! - `relative_path`: Display-path resolution.
pub mod cli;
pub mod config;
pub mod error;
pub mod formatter;
pub mod models;
pub mod output;
pub mod relative_path;
