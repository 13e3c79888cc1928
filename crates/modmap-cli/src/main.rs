//! Modmap CLI — graph the imports of a Python codebase.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use log::Level;

use modmap_core::config::AnalysisConfig;
use modmap_core::diagnostics::Diagnostics;
use modmap_core::render;
use modmap_core::resolve::Resolver;

#[derive(Parser)]
#[command(name = "modmap", about = "Map the import graph of a Python codebase")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyse import relationships and print a dependency graph
    Imports {
        /// Path to the code tree (defaults to the current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Inspect submodules as well as top-level modules
        #[arg(short, long, default_value = "0")]
        depth: usize,

        /// External modules that should appear in the graph if imported
        /// (glob patterns)
        #[arg(short, long)]
        include: Vec<String>,

        /// Names of directories/submodules that should not be graphed
        #[arg(short = 'x', long)]
        exclude: Vec<String>,

        /// Output format
        #[arg(long, value_enum, default_value = "dot")]
        format: OutputFormat,

        /// Draw boxes around top-level packages
        #[arg(short, long)]
        clusters: bool,

        /// Show informational diagnostics
        #[arg(short, long)]
        verbose: bool,

        /// Show debug diagnostics
        #[arg(long)]
        very_verbose: bool,

        /// Suppress all diagnostics
        #[arg(short, long)]
        quiet: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Dot,
    Json,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Imports {
            path,
            depth,
            include,
            exclude,
            format,
            clusters,
            verbose,
            very_verbose,
            quiet,
        } => {
            let root_path = path.canonicalize().unwrap_or(path);
            let config = AnalysisConfig {
                path: root_path.to_string_lossy().to_string(),
                depth,
                include,
                exclude,
                verbose,
                quiet,
            };
            run_imports(&config, format, clusters, very_verbose);
        }
    }
}

fn run_imports(config: &AnalysisConfig, format: OutputFormat, clusters: bool, very_verbose: bool) {
    let spinner = (!config.quiet).then(make_spinner);
    let mut diags = Diagnostics::new();

    let resolver = Resolver::new(config, &mut diags);
    let graph = match resolver.find_imports(&mut diags) {
        Ok(graph) => graph,
        Err(e) => {
            if let Some(pb) = spinner {
                pb.finish_and_clear();
            }
            eprintln!("{} {e}", style("error:").red().bold());
            std::process::exit(1);
        }
    };
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    if !config.quiet {
        let max_level = if very_verbose {
            Level::Debug
        } else if config.verbose {
            Level::Info
        } else {
            Level::Warn
        };
        for event in diags.at_level(max_level) {
            eprintln!("{} {event}", level_prefix(event.level()));
        }
        if graph.edge_count() == 0 {
            eprintln!(
                "{} found no imports - try increasing the depth",
                style("warning:").yellow().bold()
            );
        }
    }

    let rendered = match format {
        OutputFormat::Dot => render::render_dot(&graph, clusters),
        OutputFormat::Json => match render::render_json(&graph) {
            Ok(json) => json,
            Err(e) => {
                eprintln!("{} {e}", style("error:").red().bold());
                std::process::exit(1);
            }
        },
    };
    println!("{rendered}");
}

fn make_spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message("Analysing imports...");
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}

fn level_prefix(level: Level) -> console::StyledObject<&'static str> {
    match level {
        Level::Error => style("error:").red().bold(),
        Level::Warn => style("warning:").yellow().bold(),
        Level::Info => style("info:").cyan(),
        _ => style("debug:").dim(),
    }
}
