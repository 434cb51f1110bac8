//! Batch highlighting: render every `.cl` file in a directory to HTML.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::lexer::SourceError;
use crate::render::{render_document, RenderOptions};

pub const SOURCE_EXTENSION: &str = "cl";

/// What a batch run produced.
#[derive(Debug, Default)]
pub struct Summary {
    /// HTML files written, in processing order.
    pub written: Vec<PathBuf>,
    /// Sources that could not be tokenized, and so were skipped.
    pub failed: Vec<SourceError>,
}

impl Summary {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// The `.cl` files directly inside `dir`, sorted by name.
pub fn find_sources(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut sources = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_file()
            && path.extension().is_some_and(|ext| ext == SOURCE_EXTENSION)
        {
            sources.push(path);
        }
    }
    sources.sort();
    Ok(sources)
}

/// Render one source file, writing `<stem>.html` into `output_dir`.
///
/// The outer error is for I/O; the inner one is for source that does not tokenize.
pub fn process_file(
    source: &Path,
    output_dir: &Path,
    options: &RenderOptions,
) -> io::Result<Result<PathBuf, SourceError>> {
    let name = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let code = fs::read_to_string(source)?;

    let html = match render_document(&name, &code, options) {
        Ok(html) => html,
        Err(err) => return Ok(Err(err)),
    };

    // Not `with_extension`: "a.b.cl" becomes "a.b.html", not "a.html".
    let mut file_name = source.file_stem().unwrap_or(source.as_os_str()).to_owned();
    file_name.push(".html");
    let output = output_dir.join(file_name);
    fs::write(&output, html.into_string())?;
    tracing::debug!("wrote {}", output.display());
    Ok(Ok(output))
}

/// Render each of `sources` into `output_dir`, creating it if needed.
///
/// A file that fails to tokenize is logged and skipped; any I/O error stops the batch.
pub fn process_sources(
    sources: &[PathBuf],
    output_dir: &Path,
    options: &RenderOptions,
) -> io::Result<Summary> {
    fs::create_dir_all(output_dir)?;

    let mut summary = Summary::default();
    for source in sources {
        tracing::debug!("processing {}", source.display());
        match process_file(source, output_dir, options)? {
            Ok(output) => summary.written.push(output),
            Err(err) => {
                tracing::warn!("skipping {}: {err}", source.display());
                summary.failed.push(err);
            }
        }
    }
    Ok(summary)
}

/// Render every `.cl` file in `programs_dir` into `output_dir`.
pub fn process_files(
    programs_dir: &Path,
    output_dir: &Path,
    options: &RenderOptions,
) -> io::Result<Summary> {
    let sources = find_sources(programs_dir)?;
    tracing::info!(
        "found {} source file(s) in {}",
        sources.len(),
        programs_dir.display()
    );
    process_sources(&sources, output_dir, options)
}
