//! # Target Trait
//!
//! The narrow capability interface listfn needs from a debug-info provider,
//! plus the per-session state that sits on top of it.
//!
//! A host debugger exposes a large, live object model (targets, modules,
//! symbols, processes, threads, frames, line tables). The resolver only ever
//! needs four things from it:
//!
//! - the loaded modules and their code symbols
//! - the line-table row for an address
//! - the selected process/thread/frame
//! - a generation number that changes whenever addresses stop being valid
//!
//! Implementations: [`crate::symbols::BinaryTarget`] (binaries on disk) and
//! [`crate::symbols::SyntheticTarget`] (in-memory fixtures).

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use crate::error::{ListError, Result};
use crate::symbols::index::SymbolIndex;
use crate::types::{Address, ModuleSymbols, ProcessState, RawLineEntry};

/// Debug-info provider interface.
///
/// All calls are synchronous and read-only.
pub trait Target
{
    /// Loaded modules, in provider order.
    fn modules(&self) -> &[ModuleSymbols];

    /// Raw line-table row covering `address`.
    ///
    /// Rows may be degenerate (line 0, empty file); callers go through
    /// [`crate::symbols::LineTableBridge`] to filter those out.
    fn line_for_address(&self, address: Address) -> Option<RawLineEntry>;

    /// The live process, if there is one.
    fn current_process(&self) -> Option<&ProcessState>
    {
        None
    }

    /// Identifier of the current load instance.
    ///
    /// Must change whenever the target is reloaded or the process relaunched,
    /// since addresses from one load instance mean nothing in the next.
    fn generation(&self) -> u64
    {
        0
    }
}

/// A debugging session: the selected target and its cached symbol index.
///
/// ## Thread Safety
///
/// The session is single-threaded. Every command runs to completion on the
/// calling thread before the next one starts.
#[derive(Default)]
pub struct DebugSession
{
    target: Option<Box<dyn Target>>,
    symbol_index: RefCell<Option<Rc<SymbolIndex>>>,
}

impl DebugSession
{
    /// Session with no target selected.
    #[must_use]
    pub fn new() -> Self
    {
        Self::default()
    }

    /// Session with `target` selected.
    #[must_use]
    pub fn with_target(target: impl Target + 'static) -> Self
    {
        let mut session = Self::new();
        session.replace_target(Box::new(target));
        session
    }

    /// The selected target, if any.
    pub fn target(&self) -> Option<&dyn Target>
    {
        self.target.as_deref()
    }

    /// The selected target.
    ///
    /// ## Errors
    ///
    /// [`ListError::NoTarget`] if none is selected.
    pub fn require_target(&self) -> Result<&dyn Target>
    {
        self.target().ok_or(ListError::NoTarget)
    }

    /// Select a new target, dropping the symbol index of the old one.
    pub fn replace_target(&mut self, target: Box<dyn Target>)
    {
        self.target = Some(target);
        self.invalidate_symbol_index();
    }

    /// Drop the cached symbol index; the next query rebuilds it.
    pub fn invalidate_symbol_index(&self)
    {
        self.symbol_index.borrow_mut().take();
    }

    /// Symbol index for the selected target, built on first use.
    ///
    /// A cached index from an older generation of the target is discarded
    /// and rebuilt.
    ///
    /// ## Errors
    ///
    /// [`ListError::NoTarget`] if no target is selected.
    pub fn symbol_index(&self) -> Result<Rc<SymbolIndex>>
    {
        let target = self.require_target()?;
        let mut slot = self.symbol_index.borrow_mut();

        if let Some(index) = slot.as_ref() {
            if index.generation() == target.generation() {
                return Ok(Rc::clone(index));
            }
            debug!(
                "target generation changed ({} -> {}), rebuilding symbol index",
                index.generation(),
                target.generation()
            );
        }

        let index = Rc::new(SymbolIndex::build(target));
        *slot = Some(Rc::clone(&index));
        Ok(index)
    }
}
