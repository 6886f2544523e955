use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use depviz::export::{self, ExportFormat};
use depviz::parser::{parse_manifest, Ecosystem};
use depviz::resolver::StaticResolver;
use depviz::tree::{normalize, DependencyNode};
use depviz::ui::{run_app, App};

#[derive(Parser)]
#[command(name = "depviz")]
#[command(version = "0.1.0")]
#[command(about = "Terminal UI dependency manifest visualizer with search and filtering", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Explore a manifest in the interactive tree view
    View {
        /// Manifest file (package.json, requirements.txt, or pom.xml)
        file: PathBuf,
    },
    /// Export the parsed dependency forest
    Export {
        /// Manifest file (package.json, requirements.txt, or pom.xml)
        file: PathBuf,

        /// Output format: json, csv, or markdown
        #[arg(short, long, default_value = "json")]
        format: ExportFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::View { file } => {
            let (ecosystem, forest, file_name) = load_forest(&file)?;
            tracing::info!(%ecosystem, roots = forest.len(), "starting tree view");
            run_tui(forest, ecosystem, file_name)
        }
        Commands::Export {
            file,
            format,
            output,
        } => {
            let (_, forest, _) = load_forest(&file)?;
            match output {
                Some(path) => {
                    let mut writer = fs::File::create(&path)
                        .with_context(|| format!("failed to create {}", path.display()))?;
                    export::export(format, &forest, &mut writer)?;
                    tracing::info!(path = %path.display(), %format, "exported forest");
                }
                None => {
                    export::export(format, &forest, &mut io::stdout())?;
                }
            }
            Ok(())
        }
    }
}

/// Read, parse, and normalize a manifest file.
///
/// The file name alone selects the parser; content is never sniffed.
fn load_forest(path: &Path) -> Result<(Ecosystem, Vec<DependencyNode>, String)> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();

    let (ecosystem, records) = parse_manifest(&file_name, &content)?;
    let forest = normalize(&records, ecosystem, &StaticResolver::default());

    Ok((ecosystem, forest, file_name))
}

fn run_tui(forest: Vec<DependencyNode>, ecosystem: Ecosystem, file_name: String) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(forest, ecosystem, file_name);
    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result.context("TUI event loop failed")
}
