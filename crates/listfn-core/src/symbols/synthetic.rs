//! In-memory target for tests and embedders.
//!
//! A [`SyntheticTarget`] holds modules, code symbols, exact-address line rows
//! and an optional execution context, all supplied up front. It lets the
//! resolver run without a binary on disk or a live host debugger.
//!
//! ## Example
//!
//! ```rust
//! use listfn_core::symbols::SyntheticTarget;
//! use listfn_core::target::Target;
//! use listfn_core::types::Address;
//!
//! let target = SyntheticTarget::new()
//!     .module("/bin/app")
//!     .function("main", 0x1000, Some(0x1040))
//!     .line(0x1000, "/src/main.c", 3)
//!     .line(0x1040, "/src/main.c", 9);
//!
//! assert_eq!(target.modules()[0].code_symbols().len(), 1);
//! assert!(target.line_for_address(Address::from(0x1040)).is_some());
//! ```

use std::collections::BTreeMap;
use std::path::PathBuf;

use super::demangle::symbol_name;
use crate::target::Target;
use crate::types::{
    Address, CodeSymbol, FrameState, FunctionDescriptor, ModuleSymbols, ProcessState, RawLineEntry, ThreadId,
    ThreadState,
};

const DEFAULT_MODULE: &str = "<synthetic>";

/// Target whose symbols and line rows are supplied by the caller.
#[derive(Debug, Clone, Default)]
pub struct SyntheticTarget
{
    modules: Vec<ModuleSymbols>,
    lines: BTreeMap<Address, RawLineEntry>,
    process: Option<ProcessState>,
    generation: u64,
}

impl SyntheticTarget
{
    #[must_use]
    pub fn new() -> Self
    {
        Self::default()
    }

    /// Start a new module; subsequent [`function`](Self::function) calls add to it.
    #[must_use]
    pub fn module(mut self, path: impl Into<PathBuf>) -> Self
    {
        self.modules.push(ModuleSymbols::new(path));
        self
    }

    /// Add a code symbol to the most recently added module.
    #[must_use]
    pub fn function(mut self, name: &str, start: u64, end: Option<u64>) -> Self
    {
        if self.modules.is_empty() {
            self.modules.push(ModuleSymbols::new(DEFAULT_MODULE));
        }
        let symbol = CodeSymbol {
            name: symbol_name(name),
            start: Address::from(start),
            end: end.map(Address::from),
        };
        if let Some(module) = self.modules.last_mut() {
            module.symbols.push(symbol);
        }
        self
    }

    /// Map exactly `address` to `file:line`.
    #[must_use]
    pub fn line(self, address: u64, file: &str, line: u32) -> Self
    {
        self.raw_line(
            address,
            RawLineEntry {
                file: Some(file.to_string()),
                line: Some(line),
            },
        )
    }

    /// Map exactly `address` to an arbitrary (possibly degenerate) row.
    #[must_use]
    pub fn raw_line(mut self, address: u64, entry: RawLineEntry) -> Self
    {
        self.lines.insert(Address::from(address), entry);
        self
    }

    /// Attach a live process snapshot.
    #[must_use]
    pub fn process(mut self, process: ProcessState) -> Self
    {
        self.process = Some(process);
        self
    }

    /// Stop in the function named `name`: one process, one thread, one frame at its start.
    ///
    /// If no symbol carries that name the frame has no function.
    #[must_use]
    pub fn stopped_in(self, name: &str) -> Self
    {
        let function = self.function_descriptor(name);
        let pc = function.as_ref().map_or(Address::ZERO, |function| function.start_address);
        self.process(ProcessState {
            pid: 1,
            selected_thread: Some(ThreadState {
                id: ThreadId::from(1),
                selected_frame: Some(FrameState { pc, function }),
            }),
        })
    }

    #[must_use]
    pub fn with_generation(mut self, generation: u64) -> Self
    {
        self.generation = generation;
        self
    }

    /// Descriptor for the first symbol named `name`.
    pub fn function_descriptor(&self, name: &str) -> Option<FunctionDescriptor>
    {
        self.modules.iter().find_map(|module| {
            module
                .code_symbols()
                .iter()
                .find(|symbol| symbol.name.matches(name))
                .map(|symbol| symbol.function(&module.path))
        })
    }
}

impl Target for SyntheticTarget
{
    fn modules(&self) -> &[ModuleSymbols]
    {
        &self.modules
    }

    fn line_for_address(&self, address: Address) -> Option<RawLineEntry>
    {
        self.lines.get(&address).cloned()
    }

    fn current_process(&self) -> Option<&ProcessState>
    {
        self.process.as_ref()
    }

    fn generation(&self) -> u64
    {
        self.generation
    }
}
