//! Output sinks for the report printers.
//!
//! `Output` abstracts the three channels a report is written through:
//! styled severity blocks, raw lines carrying inline `<fg=color>..</>`
//! markup, and tables. `ConsoleOutput` renders them for a terminal.

use comfy_table::{presets, Cell, Color, Table};
use owo_colors::{AnsiColors, OwoColorize};
use regex::Regex;
use std::io::{self, Write};
use std::sync::OnceLock;

/// Destination of a rendered report.
pub trait Output {
    fn success(&mut self, message: &str) -> io::Result<()>;
    fn warning(&mut self, message: &str) -> io::Result<()>;
    fn error(&mut self, message: &str) -> io::Result<()>;
    /// Write one line (which may itself span several) with inline markup.
    fn write_line_formatted(&mut self, line: &str) -> io::Result<()>;
    /// Render `rows` under `headers`; every row has `headers.len()` cells.
    fn table(&mut self, headers: &[String], rows: &[Vec<String>]) -> io::Result<()>;
}

/// Colors are on unless `NO_COLOR` is set or the caller turned them off.
pub fn use_colors(requested: bool) -> bool {
    requested && std::env::var_os("NO_COLOR").is_none()
}

#[derive(Clone, Copy)]
enum BlockKind {
    Success,
    Warning,
    Error,
}

/// Terminal renderer writing to any `Write`.
pub struct ConsoleOutput<W: Write> {
    out: W,
    color: bool,
}

impl ConsoleOutput<io::Stdout> {
    pub fn stdout(color: bool) -> Self {
        Self::new(io::stdout(), color)
    }
}

impl<W: Write> ConsoleOutput<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn block(&mut self, kind: BlockKind, message: &str) -> io::Result<()> {
        let label = match kind {
            BlockKind::Success => "OK",
            BlockKind::Warning => "WARNING",
            BlockKind::Error => "ERROR",
        };
        let text = format!(" [{}] {} ", label, message);
        writeln!(self.out)?;
        if self.color {
            let styled = match kind {
                BlockKind::Success => text.black().on_green().to_string(),
                BlockKind::Warning => text.black().on_yellow().to_string(),
                BlockKind::Error => text.white().on_red().to_string(),
            };
            writeln!(self.out, "{}", styled)?;
        } else {
            writeln!(self.out, "{}", text.trim_end())?;
        }
        writeln!(self.out)
    }
}

impl<W: Write> Output for ConsoleOutput<W> {
    fn success(&mut self, message: &str) -> io::Result<()> {
        self.block(BlockKind::Success, message)
    }

    fn warning(&mut self, message: &str) -> io::Result<()> {
        self.block(BlockKind::Warning, message)
    }

    fn error(&mut self, message: &str) -> io::Result<()> {
        self.block(BlockKind::Error, message)
    }

    fn write_line_formatted(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.out, "{}", render_markup(line, self.color))
    }

    fn table(&mut self, headers: &[String], rows: &[Vec<String>]) -> io::Result<()> {
        let mut table = Table::new();
        table.load_preset(presets::ASCII_HORIZONTAL_ONLY);
        if self.color {
            table.enforce_styling();
        } else {
            table.force_no_tty();
        }
        let header: Vec<Cell> = headers
            .iter()
            .map(|h| {
                let cell = Cell::new(h);
                if self.color {
                    cell.fg(Color::Green)
                } else {
                    cell
                }
            })
            .collect();
        table.set_header(header);
        for row in rows {
            table.add_row(
                row.iter()
                    .map(|c| Cell::new(render_markup(c, self.color)))
                    .collect::<Vec<_>>(),
            );
        }
        writeln!(self.out, "{}", table)?;
        writeln!(self.out)
    }
}

fn markup_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<fg=([a-z_]+)>(.*?)</>").expect("valid markup regex"))
}

fn ansi_color(name: &str) -> Option<AnsiColors> {
    match name {
        "black" => Some(AnsiColors::Black),
        "red" => Some(AnsiColors::Red),
        "green" => Some(AnsiColors::Green),
        "yellow" => Some(AnsiColors::Yellow),
        "blue" => Some(AnsiColors::Blue),
        "magenta" => Some(AnsiColors::Magenta),
        "cyan" => Some(AnsiColors::Cyan),
        "white" => Some(AnsiColors::White),
        _ => None,
    }
}

/// Translate `<fg=color>text</>` markup into ANSI colors, or strip the tags
/// when `color` is false. Unknown colors keep their text uncolored.
pub fn render_markup(line: &str, color: bool) -> String {
    markup_re()
        .replace_all(line, |caps: &regex::Captures| {
            let text = &caps[2];
            match ansi_color(&caps[1]) {
                Some(c) if color => text.color(c).to_string(),
                _ => text.to_string(),
            }
        })
        .into_owned()
}
