//! CLI entry point for importgraph

use std::path::PathBuf;
use std::process;

use clap::Parser;
use importgraph::config::{DEFAULT_EXCLUDED_DIRS, DEFAULT_EXTENSION};
use importgraph::logging::{LogLevel, init_logging};
use importgraph::render::{open_in_viewer, render_to_file, render_to_temp_file};
use importgraph::{
    ColorMode, ErrorPolicy, RenderFormat, ScanConfig, ScanError, analyze, print_json, print_text,
};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "importgraph")]
#[command(about = "Infer a file dependency graph from shared import statements")]
#[command(version)]
struct Args {
    /// Directory to scan
    path: PathBuf,

    /// Skip directories with this name or glob pattern (can be used multiple times).
    /// Replaces the default of .venv when given
    #[arg(short = 'x', long = "exclude", value_name = "NAME")]
    exclude: Vec<String>,

    /// Extension of the files to scan
    #[arg(short = 'e', long = "ext", default_value = DEFAULT_EXTENSION)]
    extension: String,

    /// Honor .gitignore and hidden-file rules while walking
    #[arg(long = "gitignore")]
    gitignore: bool,

    /// Abort on the first unreadable file instead of skipping it
    #[arg(long = "strict")]
    strict: bool,

    /// Print the import map and dependency graph as JSON
    #[arg(long = "json")]
    json: bool,

    /// How to draw the dependency graph
    #[arg(long = "render", value_name = "FORMAT", default_value = "svg")]
    render: RenderFormat,

    /// Keep the drawing in this file instead of showing it from a temporary file
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    output: Option<PathBuf>,

    /// Also open the drawing written with --output in the default viewer
    #[arg(long = "open", requires = "output")]
    open: bool,

    /// Seed for the graph layout
    #[arg(long = "seed", default_value = "42")]
    seed: u64,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,

    /// More diagnostics on stderr (-v summary, -vv per stage)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,

    /// No diagnostics on stderr
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    quiet: bool,
}

impl Args {
    fn scan_config(&self) -> ScanConfig {
        let excluded_dirs = if self.exclude.is_empty() {
            DEFAULT_EXCLUDED_DIRS.iter().map(|s| s.to_string()).collect()
        } else {
            self.exclude.clone()
        };
        ScanConfig {
            root: self.path.clone(),
            excluded_dirs,
            extension: self.extension.clone(),
            respect_gitignore: self.gitignore,
            on_error: if self.strict {
                ErrorPolicy::Abort
            } else {
                ErrorPolicy::Skip
            },
        }
    }
}

fn run(args: &Args) -> Result<(), ScanError> {
    let analysis = analyze(&args.scan_config())?;

    if args.json {
        print_json(&analysis)?;
    } else {
        print_text(&analysis, args.color.use_color())?;
    }

    let Some(renderer) = args.render.renderer(args.seed) else {
        return Ok(());
    };
    let graph = analysis.graph.to_digraph();

    match &args.output {
        Some(output) => {
            render_to_file(renderer.as_ref(), &graph, output)?;
            info!(file = %output.display(), "graph written");
            if args.open {
                open_in_viewer(output)?;
            }
        }
        None => {
            let shown = render_to_temp_file(renderer.as_ref(), &graph)?;
            info!(file = %shown.display(), "showing graph");
            open_in_viewer(&shown)?;
        }
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logging(LogLevel::from_flags(args.quiet, args.verbose));

    if let Err(e) = run(&args) {
        eprintln!("importgraph: {}", e);
        process::exit(1);
    }
}
