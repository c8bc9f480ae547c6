//! Source extent and source window types.

use std::fmt;
use std::path::PathBuf;

/// Which waterfall strategy produced the end line of an extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtentSource
{
    /// Line entry at the function's end address.
    EndAddress,
    /// Line entry at the next code symbol's start address.
    NextSymbol,
    /// Physical line count of the source file.
    FileLength,
}

impl fmt::Display for ExtentSource
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        let label = match self {
            ExtentSource::EndAddress => "end-address",
            ExtentSource::NextSymbol => "next-symbol",
            ExtentSource::FileLength => "file-length",
        };
        write!(f, "{label}")
    }
}

/// Inclusive, 1-based range of source lines attributed to a function.
///
/// Values handed out by the resolver always satisfy `start_line <= end_line`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceExtent
{
    /// Source file containing the function.
    pub file_path: PathBuf,
    /// First line (1-based).
    pub start_line: u32,
    /// Last line (1-based, inclusive).
    pub end_line: u32,
    /// Strategy that determined `end_line`.
    pub source: ExtentSource,
}

impl SourceExtent
{
    /// Number of lines covered by the extent.
    pub fn len(&self) -> usize
    {
        (self.end_line.saturating_sub(self.start_line) as usize) + 1
    }

    /// An extent always covers at least one line.
    pub fn is_empty(&self) -> bool
    {
        false
    }
}

/// One rendered source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine
{
    /// Original 1-based line number in the file.
    pub number: u32,
    /// Line text with trailing whitespace removed.
    pub text: String,
}

/// Lines of a source file selected by an extent.
///
/// May be shorter than the extent when the file ends early; missing lines
/// are never padded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceWindow
{
    pub lines: Vec<SourceLine>,
}

impl SourceWindow
{
    pub fn len(&self) -> usize
    {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.lines.is_empty()
    }

    /// Width of the widest line number, at least 4 columns.
    pub fn number_width(&self) -> usize
    {
        let widest = self.lines.last().map_or(0, |line| line.number.to_string().len());
        widest.max(4)
    }
}

impl fmt::Display for SourceWindow
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        let width = self.number_width();
        for line in &self.lines {
            writeln!(f, "{:>width$}: {}", line.number, line.text)?;
        }
        Ok(())
    }
}
