//! seqcat - Entry Point

use clap::builder::PossibleValuesParser;
use clap::Parser;
use seqcat::view_state::highlighter::theme_names;
use std::path::PathBuf;
use tracing::info;

/// seqcat - browse integer-sequence catalog search results in the terminal
#[derive(Parser, Debug)]
#[command(name = "seqcat")]
#[command(version)]
#[command(about = "Browse integer-sequence catalog search results in the terminal")]
pub struct Args {
    /// Path to a catalog JSON response (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    /// Sequence terms to emphasize, e.g. "1 2 3 5 8" (defaults to the response's query)
    #[arg(short, long)]
    pub query: Option<String>,

    /// Color theme for syntax highlighting
    #[arg(long, value_parser = PossibleValuesParser::new(theme_names()))]
    pub theme: Option<String>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Start with every card expanded
    #[arg(short, long)]
    pub expand: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = seqcat::config::load_config_with_precedence(args.config.clone())?;
        let merged = seqcat::config::merge_config(config_file)?;
        let with_env = seqcat::config::apply_env_overrides(merged);

        // Flags only override when explicitly set
        let expand_override = args.expand.then_some(true);
        seqcat::config::apply_cli_overrides(with_env, args.theme.clone(), expand_override)
    };

    seqcat::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    let input_source = seqcat::source::detect_input_source(args.file.clone())?;

    let colors = seqcat::view::ColorConfig::from_env_and_args(args.no_color);
    let options = seqcat::view::ViewOptions::from_config(&config, colors).with_query(args.query);

    seqcat::view::run_with_source(&input_source, options)?;

    Ok(())
}
