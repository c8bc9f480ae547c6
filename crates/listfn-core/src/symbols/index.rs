//! # Next-Symbol Lookup
//!
//! Finding "the first code symbol that starts after address X" needs a global
//! view across every loaded module. Two implementations are provided:
//!
//! - [`LinearScan`] walks every symbol of every module on each query.
//! - [`SymbolIndex`] sorts all start addresses once and answers with a binary
//!   search. It is tied to the target generation it was built from, and the
//!   session rebuilds it whenever that generation changes.
//!
//! Both give identical answers; the index only saves work when the same
//! session resolves many functions.

use tracing::trace;

use crate::target::Target;
use crate::types::Address;

/// Answers "smallest code-symbol start strictly greater than `address`".
pub trait NextSymbolScanner
{
    /// Start of the next code symbol after `address`, or `None` if
    /// `address` belongs to the last symbol.
    fn next_symbol_start(&self, address: Address) -> Option<Address>;
}

/// Linear scan over all code symbols of a target.
#[derive(Clone, Copy)]
pub struct LinearScan<'a>
{
    target: &'a dyn Target,
}

impl<'a> LinearScan<'a>
{
    pub fn new(target: &'a dyn Target) -> Self
    {
        Self { target }
    }
}

impl NextSymbolScanner for LinearScan<'_>
{
    fn next_symbol_start(&self, address: Address) -> Option<Address>
    {
        self.target
            .modules()
            .iter()
            .flat_map(|module| module.code_symbols())
            .map(|symbol| symbol.start)
            .filter(|&start| start > address)
            .min()
    }
}

/// Sorted, de-duplicated start addresses of every code symbol in a target.
#[derive(Debug, Clone)]
pub struct SymbolIndex
{
    generation: u64,
    starts: Vec<Address>,
}

impl SymbolIndex
{
    /// Build the index from the target's current modules.
    pub fn build(target: &dyn Target) -> Self
    {
        let mut starts: Vec<Address> = target
            .modules()
            .iter()
            .flat_map(|module| module.code_symbols())
            .map(|symbol| symbol.start)
            .collect();
        starts.sort_unstable();
        starts.dedup();

        trace!(
            "built symbol index with {} addresses for generation {}",
            starts.len(),
            target.generation()
        );

        Self {
            generation: target.generation(),
            starts,
        }
    }

    /// Target generation this index was built from.
    pub fn generation(&self) -> u64
    {
        self.generation
    }

    /// Number of distinct symbol start addresses.
    pub fn len(&self) -> usize
    {
        self.starts.len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.starts.is_empty()
    }
}

impl NextSymbolScanner for SymbolIndex
{
    fn next_symbol_start(&self, address: Address) -> Option<Address>
    {
        let position = self.starts.partition_point(|&start| start <= address);
        self.starts.get(position).copied()
    }
}
