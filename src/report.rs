//! Console reports for a finished analysis

use std::io::{self, IsTerminal, Write};

use clap::ValueEnum;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::pipeline::Analysis;

/// Color output mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl ColorMode {
    /// Resolve the mode against the environment and stdout.
    pub fn use_color(self) -> bool {
        match self {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => env_color_override().unwrap_or_else(|| io::stdout().is_terminal()),
        }
    }
}

/// Color decision forced by the environment, if any.
///
/// `NO_COLOR` wins over `FORCE_COLOR`, and a dumb terminal never gets color.
fn env_color_override() -> Option<bool> {
    let set = |name: &str| std::env::var_os(name).is_some();
    let dumb_term = std::env::var_os("TERM").is_some_and(|term| term == "dumb");

    if set("NO_COLOR") {
        Some(false)
    } else if set("FORCE_COLOR") {
        Some(true)
    } else if dumb_term {
        Some(false)
    } else {
        None
    }
}

/// Write the "Import Map" and "Dependency Graph" listings.
///
/// File names are highlighted when the writer supports color; the text is
/// identical either way.
pub fn write_text<W: WriteColor>(out: &mut W, analysis: &Analysis) -> io::Result<()> {
    writeln!(out, "Import Map:")?;
    for (file, imports) in analysis.import_map.iter() {
        write_file_name(out, file, Color::Blue)?;
        writeln!(out, ": {}", join(imports))?;
    }

    writeln!(out)?;
    writeln!(out, "Dependency Graph:")?;
    for (file, deps) in analysis.graph.iter() {
        write_file_name(out, file, Color::Green)?;
        writeln!(out, " depends on {}", join(deps))?;
    }
    Ok(())
}

fn write_file_name<W: WriteColor>(out: &mut W, name: &str, color: Color) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
    write!(out, "{}", name)?;
    out.reset()
}

fn join<'a>(items: impl IntoIterator<Item = &'a String>) -> String {
    items
        .into_iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Print the text report to stdout.
pub fn print_text(analysis: &Analysis, use_color: bool) -> io::Result<()> {
    let choice = if use_color {
        ColorChoice::Always
    } else {
        ColorChoice::Never
    };
    let mut stdout = StandardStream::stdout(choice);
    write_text(&mut stdout, analysis)?;
    stdout.flush()
}

/// Print the analysis as pretty-printed JSON to stdout.
pub fn print_json(analysis: &Analysis) -> io::Result<()> {
    let json = serde_json::to_string_pretty(analysis).map_err(io::Error::other)?;
    println!("{}", json);
    Ok(())
}
