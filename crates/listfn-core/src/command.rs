//! # Commands
//!
//! The `lf` (list function) and `fi` (function info) commands.
//!
//! Both come in two layers: a typed operation returning `Result`
//! ([`list_function`], [`describe_function`]) and a console wrapper
//! ([`run_list_command`], [`run_info_command`]) that writes either the output
//! or exactly one diagnostic line and always hands control back.

use std::fmt;
use std::io::{self, Write};

use tracing::{debug, info_span};

use crate::config::ResolverConfig;
use crate::error::{ListError, Result};
use crate::extent::{ExtentContext, ExtentResolver};
use crate::source::{SourceFiles, SourceWindowRenderer};
use crate::symbols::locator::SymbolLocator;
use crate::target::DebugSession;
use crate::types::{Address, SourceExtent, SourceWindow};

/// Usage text of the `lf` command.
pub const LIST_USAGE: &str = "Usage: lf [function_name]";

/// Usage text of the `fi` command.
pub const INFO_USAGE: &str = "Usage: fi <function_name>";

/// Result of `lf`: the function, its extent, and its source window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing
{
    pub function: String,
    pub extent: SourceExtent,
    pub window: SourceWindow,
}

impl fmt::Display for Listing
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        writeln!(f, "Function: {}", self.function)?;
        writeln!(f, "File: {}", self.extent.file_path.display())?;
        writeln!(f, "Lines: {}-{}", self.extent.start_line, self.extent.end_line)?;
        write!(f, "{}", self.window)
    }
}

/// Result of `fi`: a function's address range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionInfo
{
    pub function: String,
    pub start: Address,
    pub end: Option<Address>,
}

impl fmt::Display for FunctionInfo
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match self.end {
            Some(end) => writeln!(f, "{} {:#x}-{:#x}", self.function, self.start, end),
            None => writeln!(f, "{} {:#x}-?", self.function, self.start),
        }
    }
}

/// Extract the optional function name from command arguments.
///
/// The command takes at most one positional argument and no flags.
///
/// ## Errors
///
/// [`ListError::InvalidArgument`] for flags or extra arguments.
pub fn parse_function_argument(args: &[String]) -> Result<Option<&str>>
{
    match args {
        [] => Ok(None),
        [name] if name.starts_with('-') => Err(ListError::InvalidArgument(format!(
            "unknown option '{name}'. {LIST_USAGE}"
        ))),
        [name] if name.trim().is_empty() => Ok(None),
        [name] => Ok(Some(name.trim())),
        _ => Err(ListError::InvalidArgument(format!(
            "expected at most one function name. {LIST_USAGE}"
        ))),
    }
}

/// Resolve a function and materialize its source listing.
///
/// `name` selects the function by exact name; `None` uses the function of
/// the selected frame.
///
/// ## Errors
///
/// Any [`ListError`] except `InvalidArgument` and `BinaryLoad`.
pub fn list_function(
    session: &DebugSession,
    sources: &dyn SourceFiles,
    config: &ResolverConfig,
    name: Option<&str>,
) -> Result<Listing>
{
    let _span = info_span!("list_function", name = name.unwrap_or("<current frame>")).entered();

    let target = session.require_target()?;
    let function = SymbolLocator::new(target).resolve(name)?;

    let index = session.symbol_index()?;
    let cx = ExtentContext::new(target, &*index, sources);
    let extent = ExtentResolver::new(*config).resolve(&cx, &function)?;
    let window = SourceWindowRenderer::new(sources).render(&extent)?;
    debug!("rendered {} of {} lines", window.len(), extent.len());

    Ok(Listing {
        function: function.display_name().to_string(),
        extent,
        window,
    })
}

/// Look up a function's address range by name.
///
/// ## Errors
///
/// [`ListError::NoTarget`] or [`ListError::FunctionNotFound`].
pub fn describe_function(session: &DebugSession, name: &str) -> Result<FunctionInfo>
{
    let target = session.require_target()?;
    let function = SymbolLocator::new(target).find_by_name(name)?;
    Ok(FunctionInfo {
        function: function.display_name().to_string(),
        start: function.start_address,
        end: function.end_address,
    })
}

/// Run `lf` with raw arguments, writing output or one diagnostic line to `out`.
///
/// ## Errors
///
/// Only if writing to `out` fails; listing failures are reported in-band.
pub fn run_list_command(
    session: &DebugSession,
    sources: &dyn SourceFiles,
    config: &ResolverConfig,
    args: &[String],
    out: &mut dyn Write,
) -> io::Result<()>
{
    let outcome = parse_function_argument(args).and_then(|name| list_function(session, sources, config, name));
    match outcome {
        Ok(listing) => write!(out, "{listing}"),
        Err(err) => writeln!(out, "{err}"),
    }
}

/// Run `fi` with raw arguments, writing output or one diagnostic line to `out`.
///
/// ## Errors
///
/// Only if writing to `out` fails.
pub fn run_info_command(session: &DebugSession, args: &[String], out: &mut dyn Write) -> io::Result<()>
{
    let outcome = match parse_function_argument(args) {
        Ok(Some(name)) => describe_function(session, name),
        Ok(None) => Err(ListError::InvalidArgument(format!("missing function name. {INFO_USAGE}"))),
        Err(err) => Err(err),
    };
    match outcome {
        Ok(info) => write!(out, "{info}"),
        Err(err) => writeln!(out, "{err}"),
    }
}
