//! End-line strategies of the extent waterfall.
//!
//! Each strategy looks at one independent signal and either proposes an end
//! line or reports a miss. None of them validate against the start line;
//! that is the resolver's job.

use tracing::debug;

use super::ExtentContext;
use crate::error::Result;
use crate::types::{ExtentSource, FunctionDescriptor, LineTableEntry};

/// One step of the waterfall.
pub trait EndLineStrategy
{
    /// Which signal this strategy reads.
    fn source(&self) -> ExtentSource;

    /// Proposed last line of `function`, or `None` on a miss.
    ///
    /// `start` is the validated line entry at the function's start address.
    ///
    /// ## Errors
    ///
    /// Only for failures that end the whole resolution, such as an
    /// unreadable source file.
    fn end_line(&self, cx: &ExtentContext<'_>, function: &FunctionDescriptor, start: &LineTableEntry)
        -> Result<Option<u32>>;
}

/// Line of a boundary entry minus the adjustment, if it is in the function's file.
fn boundary_line(boundary: &LineTableEntry, start: &LineTableEntry, adjust: u32) -> Option<u32>
{
    if boundary.file_path != start.file_path {
        debug!(
            "boundary at {} is in {}, not {}",
            boundary.address,
            boundary.file_path.display(),
            start.file_path.display()
        );
        return None;
    }
    Some(boundary.line_number.saturating_sub(adjust))
}

/// Line of the function's own end address.
#[derive(Debug, Clone, Copy)]
pub struct EndAddressStrategy
{
    pub adjust: u32,
}

impl EndLineStrategy for EndAddressStrategy
{
    fn source(&self) -> ExtentSource
    {
        ExtentSource::EndAddress
    }

    fn end_line(&self, cx: &ExtentContext<'_>, function: &FunctionDescriptor, start: &LineTableEntry)
        -> Result<Option<u32>>
    {
        let Some(end_address) = function.end_address else {
            return Ok(None);
        };
        Ok(cx
            .lines
            .entry_for(end_address)
            .and_then(|entry| boundary_line(&entry, start, self.adjust)))
    }
}

/// Line of the first code symbol that starts after the function.
#[derive(Debug, Clone, Copy)]
pub struct NextSymbolStrategy
{
    pub adjust: u32,
}

impl EndLineStrategy for NextSymbolStrategy
{
    fn source(&self) -> ExtentSource
    {
        ExtentSource::NextSymbol
    }

    fn end_line(&self, cx: &ExtentContext<'_>, function: &FunctionDescriptor, start: &LineTableEntry)
        -> Result<Option<u32>>
    {
        let Some(next) = cx.next_symbols.next_symbol_start(function.start_address) else {
            debug!("{} is the last code symbol", function.display_name());
            return Ok(None);
        };
        Ok(cx
            .lines
            .entry_for(next)
            .and_then(|entry| boundary_line(&entry, start, self.adjust)))
    }
}

/// Physical length of the source file.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileLengthStrategy;

impl EndLineStrategy for FileLengthStrategy
{
    fn source(&self) -> ExtentSource
    {
        ExtentSource::FileLength
    }

    fn end_line(&self, cx: &ExtentContext<'_>, _function: &FunctionDescriptor, start: &LineTableEntry)
        -> Result<Option<u32>>
    {
        let count = cx.sources.line_count(&start.file_path)?;
        Ok(Some(u32::try_from(count).unwrap_or(u32::MAX)))
    }
}
