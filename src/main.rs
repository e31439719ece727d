//! BST Layout CLI
//!
//! Usage:
//!   bst-layout [OPTIONS] [FILE]
//!
//! Options:
//!   -i, --insert <VALUES>    Build the tree by inserting comma-separated values
//!   -H, --highlight <VALUE>  Highlight the node holding VALUE
//!   -c, --config <FILE>      SVG configuration file (TOML format)
//!   -f, --format <FORMAT>    Output format: svg or json
//!   -d, --debug              Increase log verbosity (repeatable)
//!   -h, --help               Print help

use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use bst_layout::{
    compute, load_tree, read_tree, render_placeholder, render_with_config, RenderConfig,
    RenderError, SvgConfig, TreeNode,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// SVG drawing of the tree
    Svg,
    /// Positioned tree and view frame as JSON
    Json,
}

#[derive(Parser)]
#[command(name = "bst-layout")]
#[command(about = "Lay out and draw binary search trees")]
struct Cli {
    /// JSON tree file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Build the tree by inserting these values in order instead of reading JSON
    #[arg(short, long, value_delimiter = ',', allow_hyphen_values = true)]
    insert: Option<Vec<i64>>,

    /// Highlight the node holding this value
    #[arg(short = 'H', long, allow_hyphen_values = true)]
    highlight: Option<i64>,

    /// SVG configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Svg)]
    format: Format,

    /// Increase log verbosity (-d info, -dd debug, -ddd trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count)]
    debug: u8,
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.debug);

    if cli.insert.is_none() && cli.input.is_none() && io::stdin().is_terminal() {
        print_intro();
        return;
    }

    let svg_config = match &cli.config {
        Some(path) => match SvgConfig::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                process::exit(1);
            }
        },
        None => SvgConfig::default(),
    };

    let tree = match load_input(&cli) {
        Ok(tree) => tree,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    match cli.format {
        Format::Svg => {
            let config = RenderConfig::new()
                .with_svg(svg_config)
                .with_highlight(cli.highlight);
            match render_with_config(tree.as_ref(), &config) {
                Ok(svg) => println!("{}", svg),
                Err(RenderError::Layout(e)) => {
                    println!(
                        "{}",
                        render_placeholder(&format!("Error rendering tree: {}", e), &config.svg)
                    );
                    eprintln!("Error: {}", e);
                    process::exit(1);
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    process::exit(1);
                }
            }
        }
        Format::Json => match print_json(tree.as_ref()) {
            Ok(()) => {}
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
    }
}

fn load_input(cli: &Cli) -> Result<Option<TreeNode>, RenderError> {
    if let Some(values) = &cli.insert {
        return Ok(TreeNode::from_insertions(values.iter().copied()));
    }
    let tree = match &cli.input {
        Some(path) => load_tree(path)?,
        None => read_tree(io::stdin().lock())?,
    };
    Ok(tree)
}

fn print_json(tree: Option<&TreeNode>) -> Result<(), Box<dyn std::error::Error>> {
    let layout = compute(tree)?;
    println!("{}", serde_json::to_string_pretty(&layout)?);
    Ok(())
}

/// `RUST_LOG` takes precedence; otherwise `-d` picks the level
fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let fmt_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(true)
        .with_filter(filter);

    tracing_subscriber::registry().with(fmt_layer).init();
}

fn print_intro() {
    println!(
        r#"BST Layout - lay out and draw binary search trees

USAGE:
    bst-layout [OPTIONS] [FILE]
    echo '<json>' | bst-layout

OPTIONS:
    -i, --insert       Build the tree from comma-separated values
    -H, --highlight    Highlight the node holding a value
    -c, --config       SVG configuration (TOML file)
    -f, --format       svg (default) or json
    -d, --debug        Increase log verbosity
    -h, --help         Print help

QUICK START:
    bst-layout --insert 10,5,15,3,7 > tree.svg
    echo '{{"value": 2, "left": {{"value": 1}}}}' | bst-layout -f json"#
    );
}
