//! # Error Types
//!
//! Error handling for function listing.
//!
//! We use `thiserror` to automatically generate `Error` trait implementations
//! and nice error messages. Every variant renders as a single human-readable
//! line, which is exactly what the command layer prints as its diagnostic.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// The link of the execution context chain that was missing.
///
/// When no function name is given, the function is resolved through
/// process → selected thread → selected frame → frame function. Resolution
/// stops at the first missing link and reports which one it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextGap
{
    /// The target has no live process.
    NoProcess,
    /// The process has no selected thread.
    NoThread,
    /// The selected thread has no selected frame.
    NoFrame,
    /// The selected frame has no function (e.g. it sits in code without symbols).
    NoFunction,
}

impl fmt::Display for ContextGap
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        let label = match self {
            ContextGap::NoProcess => "No process available",
            ContextGap::NoThread => "No thread selected",
            ContextGap::NoFrame => "No frame selected",
            ContextGap::NoFunction => "No function found in current frame",
        };
        write!(f, "{label}")
    }
}

/// Main error type for listing operations
///
/// Each variant corresponds to one way a `lf`/`fi` invocation can fail.
///
/// ## Error Categories
///
/// 1. **Target errors**: NoTarget, BinaryLoad
/// 2. **Context errors**: NoExecutionContext
/// 3. **Lookup errors**: FunctionNotFound, LineInfoUnavailable
/// 4. **Source errors**: SourceUnavailable
/// 5. **Usage errors**: InvalidArgument
/// 6. **I/O errors**: Io (console input/output)
///
/// A window shorter than the computed extent is not an error; it is clipped
/// silently by the renderer.
#[derive(Error, Debug)]
pub enum ListError
{
    /// No debugging target is loaded in the session.
    #[error("No target available.")]
    NoTarget,

    /// No function name was given and the execution context chain is incomplete.
    #[error("{0}.")]
    NoExecutionContext(ContextGap),

    /// No code symbol carries the requested name.
    #[error("Could not find function named '{0}'")]
    FunctionNotFound(String),

    /// The function's start address has no usable line-table entry.
    ///
    /// Without a start line there is no file to read and no anchor for the
    /// extent, so none of the fallbacks can help.
    #[error("Could not determine starting line for function '{0}'")]
    LineInfoUnavailable(String),

    /// The source file is missing or unreadable.
    #[error("Error reading source file {}: {source}", path.display())]
    SourceUnavailable
    {
        /// Path as recorded in the debug information.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// A binary could not be parsed or its debug sections could not be loaded.
    #[error("Failed to load {}: {reason}", path.display())]
    BinaryLoad
    {
        /// Binary that failed to load.
        path: PathBuf,
        /// Parser error description.
        reason: String,
    },

    /// Invalid command usage.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// I/O error outside source reading (writing command output, reading a
    /// shell's input).
    ///
    /// Failures reading a source file are always reported as
    /// [`ListError::SourceUnavailable`] instead.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl ListError
{
    /// Wrap an I/O failure on `path` as [`ListError::SourceUnavailable`].
    pub fn source_unavailable(path: impl Into<PathBuf>, source: io::Error) -> Self
    {
        ListError::SourceUnavailable {
            path: path.into(),
            source,
        }
    }
}

/// Convenience type alias for `Result<T, ListError>`
///
/// ```rust
/// use listfn_core::error::Result;
/// fn foo() -> Result<()>
/// {
///     Ok(())
/// }
/// ```
pub type Result<T> = std::result::Result<T, ListError>;
