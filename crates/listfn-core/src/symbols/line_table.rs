//! Address to source line mapping.

use std::path::PathBuf;

use tracing::trace;

use crate::target::Target;
use crate::types::{Address, LineTableEntry, RawLineEntry};

/// Queries a target's line table and filters out degenerate rows.
///
/// Compilers emit line 0 (and sometimes no file at all) for generated code
/// such as prologues, drop glue, and padding. Those rows are reported as
/// absent so they can never be used as a function boundary.
#[derive(Clone, Copy)]
pub struct LineTableBridge<'a>
{
    target: &'a dyn Target,
}

impl<'a> LineTableBridge<'a>
{
    pub fn new(target: &'a dyn Target) -> Self
    {
        Self { target }
    }

    /// Line-table entry for `address`, or `None` when there is no real source line.
    pub fn entry_for(&self, address: Address) -> Option<LineTableEntry>
    {
        let raw = self.target.line_for_address(address)?;
        let entry = normalize(address, raw);
        if entry.is_none() {
            trace!("discarding degenerate line entry at {address}");
        }
        entry
    }
}

/// Turn a raw provider row into a usable entry.
///
/// Returns `None` for a zero or missing line and for a missing or blank file.
pub fn normalize(address: Address, raw: RawLineEntry) -> Option<LineTableEntry>
{
    let file = raw.file.filter(|file| !file.trim().is_empty())?;
    let line_number = raw.line.filter(|&line| line != 0)?;
    Some(LineTableEntry {
        address,
        file_path: PathBuf::from(file),
        line_number,
    })
}
