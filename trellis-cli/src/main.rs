//! Trellis command-line host.
//!
//! Reads a JSON box tree, lays it out, and prints the annotated tree.
//!
//! Run with: cargo run --bin trellis -- tree.json
//!
//! Build with `--features layout-trace` to see one `[GRID]` line per
//! container pass on stderr.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use owo_colors::OwoColorize;
use trellis_common::warning::clear_warnings;
use trellis_grid::{BoxNode, compute_grid_layout};

/// Trellis: two-pass grid layout for JSON box trees
#[derive(Parser, Debug)]
#[command(name = "trellis")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Lay out a tree and print it as JSON
    trellis demos/dashboard.json

    # Read the tree from stdin
    cat tree.json | trellis -

    # Single-line output
    trellis --compact demos/dashboard.json

    # Print only the computed rectangles
    trellis --summary demos/dashboard.json

    # Inline tree
    trellis --json '{"style":{"display":"grid","gridTemplateColumns":"1fr 1fr","width":200}}'
"#)]
struct Cli {
    /// Path to a JSON box tree (`-` for stdin)
    #[arg(value_name = "FILE")]
    path: Option<PathBuf>,

    /// Lay out this JSON tree instead of reading a file
    #[arg(long, value_name = "TREE", conflicts_with = "path")]
    json: Option<String>,

    /// Print JSON on a single line
    #[arg(short, long)]
    compact: bool,

    /// Print an indented rectangle summary instead of JSON
    #[arg(short, long, conflicts_with = "compact")]
    summary: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let source = read_source(&cli)?;
    let mut tree: BoxNode =
        serde_json::from_str(&source).context("input is not a valid box tree")?;

    clear_warnings();
    let tree = compute_grid_layout(&mut tree)?;

    if cli.summary {
        print_summary(tree, "root", 0);
    } else if cli.compact {
        println!("{}", serde_json::to_string(tree)?);
    } else {
        println!("{}", serde_json::to_string_pretty(tree)?);
    }
    Ok(())
}

/// Load the tree text from CLI arguments
fn read_source(cli: &Cli) -> anyhow::Result<String> {
    if let Some(ref json) = cli.json {
        return Ok(json.clone());
    }
    match cli.path {
        Some(ref path) if path.as_os_str() != "-" => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        Some(_) => {
            let mut buffer = String::new();
            let _ = io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            Ok(buffer)
        }
        None => anyhow::bail!("no input: pass a file path, `-` for stdin, or --json"),
    }
}

/// Recursively print a box with its computed rectangle
fn print_summary(node: &BoxNode, label: &str, depth: usize) {
    let indent = "  ".repeat(depth);
    let name = node
        .id
        .as_deref()
        .map_or_else(|| label.to_owned(), |id| format!("{label} #{id}"));
    let kind = if node.is_grid() { "grid" } else { "box" };

    match node.layout {
        Some(rect) => println!(
            "{indent}{} {}  x={:.1} y={:.1} w={:.1} h={:.1}",
            name.bold(),
            kind.cyan(),
            rect.x,
            rect.y,
            rect.width,
            rect.height
        ),
        None => println!("{indent}{} {}  {}", name.bold(), kind.cyan(), "not laid out".dimmed()),
    }

    if node.is_grid() {
        if let Some(ref columns) = node.style.grid_template_columns {
            println!("{indent}  columns: {}", columns.green());
        }
        if let Some(ref rows) = node.style.grid_template_rows {
            println!("{indent}  rows:    {}", rows.green());
        }
    }

    for (index, child) in node.children.iter().enumerate() {
        print_summary(child, &index.to_string(), depth + 1);
    }
}
