//! # Extent Resolution
//!
//! Computes the inclusive source-line range of a function.
//!
//! The start line always comes from the line entry at the function's start
//! address. The end line comes from the first strategy in an ordered chain
//! that produces a usable answer:
//!
//! 1. [`EndAddressStrategy`]: line at the function's end address, minus K
//! 2. [`NextSymbolStrategy`]: line at the next code symbol's start, minus K
//! 3. [`FileLengthStrategy`]: number of lines in the source file
//!
//! K is [`ResolverConfig::end_line_adjust`]. A proposal that lands before the
//! start line, or in a different file, counts as a miss. Whatever happens,
//! the returned extent has `start_line <= end_line`.
//!
//! ## Example
//!
//! ```rust
//! use listfn_core::config::ResolverConfig;
//! use listfn_core::extent::{ExtentContext, ExtentResolver};
//! use listfn_core::source::MemorySourceFiles;
//! use listfn_core::symbols::{LinearScan, SyntheticTarget};
//!
//! let target = SyntheticTarget::new()
//!     .function("add", 0x1000, Some(0x1020))
//!     .line(0x1000, "/src/math.c", 4)
//!     .line(0x1020, "/src/math.c", 8);
//! let sources = MemorySourceFiles::new();
//! let scan = LinearScan::new(&target);
//! let cx = ExtentContext::new(&target, &scan, &sources);
//!
//! let function = target.function_descriptor("add").unwrap();
//! let extent = ExtentResolver::new(ResolverConfig::default()).resolve(&cx, &function).unwrap();
//! assert_eq!((extent.start_line, extent.end_line), (4, 7));
//! ```

pub mod strategy;

use tracing::debug;

pub use self::strategy::{EndAddressStrategy, EndLineStrategy, FileLengthStrategy, NextSymbolStrategy};
use crate::config::ResolverConfig;
use crate::error::{ListError, Result};
use crate::source::SourceFiles;
use crate::symbols::index::NextSymbolScanner;
use crate::symbols::line_table::LineTableBridge;
use crate::target::Target;
use crate::types::{ExtentSource, FunctionDescriptor, SourceExtent};

/// Collaborators the strategies read from.
#[derive(Clone, Copy)]
pub struct ExtentContext<'a>
{
    pub lines: LineTableBridge<'a>,
    pub next_symbols: &'a dyn NextSymbolScanner,
    pub sources: &'a dyn SourceFiles,
}

impl<'a> ExtentContext<'a>
{
    pub fn new(target: &'a dyn Target, next_symbols: &'a dyn NextSymbolScanner, sources: &'a dyn SourceFiles) -> Self
    {
        Self {
            lines: LineTableBridge::new(target),
            next_symbols,
            sources,
        }
    }
}

/// Ordered chain of end-line strategies.
pub struct ExtentResolver
{
    strategies: Vec<Box<dyn EndLineStrategy>>,
}

impl ExtentResolver
{
    /// The standard chain: end address, next symbol, file length.
    #[must_use]
    pub fn new(config: ResolverConfig) -> Self
    {
        Self::with_strategies(vec![
            Box::new(EndAddressStrategy {
                adjust: config.end_line_adjust,
            }),
            Box::new(NextSymbolStrategy {
                adjust: config.end_line_adjust,
            }),
            Box::new(FileLengthStrategy),
        ])
    }

    /// A custom chain, tried in order.
    #[must_use]
    pub fn with_strategies(strategies: Vec<Box<dyn EndLineStrategy>>) -> Self
    {
        Self { strategies }
    }

    /// Strategy order, for diagnostics.
    pub fn order(&self) -> Vec<ExtentSource>
    {
        self.strategies.iter().map(|strategy| strategy.source()).collect()
    }

    /// Resolve the source extent of `function`.
    ///
    /// ## Errors
    ///
    /// - [`ListError::LineInfoUnavailable`] if the start address has no usable
    ///   line entry, or no strategy produced anything
    /// - [`ListError::SourceUnavailable`] if the file-length fallback was
    ///   reached and the file cannot be read
    pub fn resolve(&self, cx: &ExtentContext<'_>, function: &FunctionDescriptor) -> Result<SourceExtent>
    {
        let name = function.display_name();
        let start = cx
            .lines
            .entry_for(function.start_address)
            .ok_or_else(|| ListError::LineInfoUnavailable(name.to_string()))?;
        let start_line = start.line_number;

        let mut below_start = None;
        for strategy in &self.strategies {
            match strategy.end_line(cx, function, &start)? {
                Some(end_line) if end_line >= start_line => {
                    debug!(
                        "{name}: lines {start_line}-{end_line} of {} via {}",
                        start.file_path.display(),
                        strategy.source()
                    );
                    return Ok(SourceExtent {
                        file_path: start.file_path,
                        start_line,
                        end_line,
                        source: strategy.source(),
                    });
                }
                Some(end_line) => {
                    debug!("{name}: {} proposed end line {end_line} before start {start_line}", strategy.source());
                    below_start = Some(strategy.source());
                }
                None => debug!("{name}: {} unavailable", strategy.source()),
            }
        }

        // Every proposal fell before the start line: the function is one line long.
        let source = below_start.ok_or_else(|| ListError::LineInfoUnavailable(name.to_string()))?;
        Ok(SourceExtent {
            file_path: start.file_path,
            start_line,
            end_line: start_line,
            source,
        })
    }
}
