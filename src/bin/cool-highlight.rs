//! Render every COOL program in a directory as syntax-highlighted HTML.
//!
//! ```ignore
//! cool-highlight Programs/ -o Programs/highlighted-files
//! ```
//!
//! Logging goes to stderr and is controlled by `RUST_LOG`.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use cool_highlight::highlight::{find_sources, process_sources};
use cool_highlight::render::{RenderOptions, Theme};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory containing `.cl` files
    #[arg(default_value = ".")]
    programs_dir: PathBuf,

    /// Where to write the HTML files [default: PROGRAMS_DIR/highlighted-files]
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Leave out the line-number gutter
    #[arg(long)]
    no_line_numbers: bool,

    /// Color for comments
    #[arg(long, value_parser = parse_color)]
    comment_color: Option<String>,
}

/// Accept `#rrggbb`-style or named colors; nothing that could escape the stylesheet.
fn parse_color(s: &str) -> Result<String, String> {
    let hex = s
        .strip_prefix('#')
        .is_some_and(|h| matches!(h.len(), 3 | 6) && h.chars().all(|c| c.is_ascii_hexdigit()));
    let named = !s.is_empty() && s.chars().all(|c| c.is_ascii_alphabetic());
    if hex || named {
        Ok(s.to_owned())
    } else {
        Err(format!("not a color: {s:?}"))
    }
}

fn main() -> ExitCode {
    // install global collector configured based on RUST_LOG env var.
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let output_dir = cli
        .output_dir
        .clone()
        .unwrap_or_else(|| cli.programs_dir.join("highlighted-files"));

    let mut theme = Theme::default();
    if let Some(color) = cli.comment_color {
        theme.comment = color;
    }
    let options = RenderOptions {
        theme,
        line_numbers: !cli.no_line_numbers,
    };

    let sources = match find_sources(&cli.programs_dir) {
        Ok(sources) if sources.is_empty() => {
            println!("No .cl files found in {}", cli.programs_dir.display());
            return ExitCode::SUCCESS;
        }
        Ok(sources) => sources,
        Err(err) => {
            eprintln!("error: could not read {}: {err}", cli.programs_dir.display());
            return ExitCode::FAILURE;
        }
    };
    println!("Found {} .cl file(s)\n", sources.len());

    let summary = match process_sources(&sources, &output_dir, &options) {
        Ok(summary) => summary,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    for written in &summary.written {
        println!("  Created {}", written.display());
    }
    for failed in &summary.failed {
        eprintln!("  Skipped {failed}");
    }
    println!(
        "\n{} file(s) written to {}",
        summary.written.len(),
        output_dir.display()
    );

    if summary.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
