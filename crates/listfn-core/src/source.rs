//! # Source Files
//!
//! Reading source text and cutting out the window for an extent.
//!
//! The renderer never trusts the extent's end line: line tables can outlive
//! the source they were built from (the file was edited and shrank), so the
//! window is always clipped to the lines that actually exist.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{ListError, Result};
use crate::types::{SourceExtent, SourceLine, SourceWindow};

/// Source text provider.
pub trait SourceFiles
{
    /// All physical lines of `path`, without line terminators.
    ///
    /// ## Errors
    ///
    /// [`ListError::SourceUnavailable`] if the file is missing or unreadable.
    fn read_lines(&self, path: &Path) -> Result<Vec<String>>;

    /// Number of physical lines in `path`.
    ///
    /// ## Errors
    ///
    /// Same as [`SourceFiles::read_lines`].
    fn line_count(&self, path: &Path) -> Result<usize>
    {
        Ok(self.read_lines(path)?.len())
    }
}

/// Reads source files from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSourceFiles;

impl SourceFiles for FsSourceFiles
{
    fn read_lines(&self, path: &Path) -> Result<Vec<String>>
    {
        let bytes = fs::read(path).map_err(|err| {
            warn!("cannot read source {}: {err}", path.display());
            ListError::source_unavailable(path, err)
        })?;
        // Invalid UTF-8 is replaced, not rejected.
        let text = String::from_utf8_lossy(&bytes);
        Ok(text.lines().map(str::to_string).collect())
    }
}

/// Source files held in memory, keyed by path.
#[derive(Debug, Clone, Default)]
pub struct MemorySourceFiles
{
    files: HashMap<PathBuf, String>,
}

impl MemorySourceFiles
{
    #[must_use]
    pub fn new() -> Self
    {
        Self::default()
    }

    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>, text: impl Into<String>) -> Self
    {
        self.files.insert(path.into(), text.into());
        self
    }
}

impl SourceFiles for MemorySourceFiles
{
    fn read_lines(&self, path: &Path) -> Result<Vec<String>>
    {
        self.files
            .get(path)
            .map(|text| text.lines().map(str::to_string).collect())
            .ok_or_else(|| {
                ListError::source_unavailable(
                    path,
                    std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
                )
            })
    }
}

/// Select the inclusive, 1-based `[start_line, end_line]` slice of `lines`.
///
/// Line numbers are preserved; lines past the end of `lines` are dropped and
/// trailing whitespace is stripped from each emitted line.
pub fn slice_window(lines: &[String], start_line: u32, end_line: u32) -> SourceWindow
{
    let available = u32::try_from(lines.len()).unwrap_or(u32::MAX);
    let first = start_line.max(1);
    let last = end_line.min(available);
    if first > last {
        return SourceWindow::default();
    }

    let lines = (first..=last)
        .map(|number| SourceLine {
            number,
            text: lines[(number - 1) as usize].trim_end().to_string(),
        })
        .collect();
    SourceWindow { lines }
}

/// Materializes the source window for an extent.
#[derive(Clone, Copy)]
pub struct SourceWindowRenderer<'a>
{
    sources: &'a dyn SourceFiles,
}

impl<'a> SourceWindowRenderer<'a>
{
    pub fn new(sources: &'a dyn SourceFiles) -> Self
    {
        Self { sources }
    }

    /// Read the extent's file and return its window.
    ///
    /// ## Errors
    ///
    /// [`ListError::SourceUnavailable`] if the file cannot be read.
    pub fn render(&self, extent: &SourceExtent) -> Result<SourceWindow>
    {
        let lines = self.sources.read_lines(&extent.file_path)?;
        let window = slice_window(&lines, extent.start_line, extent.end_line);
        if window.len() < extent.len() {
            debug!(
                "{} has {} lines; window {}-{} clipped to {} lines",
                extent.file_path.display(),
                lines.len(),
                extent.start_line,
                extent.end_line,
                window.len()
            );
        }
        Ok(window)
    }
}
