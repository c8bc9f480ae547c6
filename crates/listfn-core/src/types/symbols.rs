//! Symbol, function, and line-table types.

use std::fmt;
use std::path::{Path, PathBuf};

use super::address::Address;

/// A function name with demangling metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolName
{
    raw: String,
    demangled: Option<String>,
}

impl SymbolName
{
    /// Construct from a raw linkage name.
    pub fn new(raw: String, demangled: Option<String>) -> Self
    {
        Self { raw, demangled }
    }

    /// Raw (mangled) name emitted in the object file.
    pub fn raw(&self) -> &str
    {
        &self.raw
    }

    /// Demangled human-friendly name if available.
    pub fn demangled(&self) -> Option<&str>
    {
        self.demangled.as_deref()
    }

    /// Preferred presentation (demangled fallback to raw).
    pub fn display_name(&self) -> &str
    {
        self.demangled.as_deref().unwrap_or(&self.raw)
    }

    /// Exact match against either the linkage name or the demangled name.
    ///
    /// No prefix, suffix, or case-insensitive matching is done.
    pub fn matches(&self, name: &str) -> bool
    {
        self.raw == name || self.demangled.as_deref() == Some(name)
    }
}

impl fmt::Display for SymbolName
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(f, "{}", self.display_name())
    }
}

/// A function resolved from the debug-info provider.
///
/// Built fresh for every command invocation and dropped at the end of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDescriptor
{
    /// Function name.
    pub name: SymbolName,
    /// First instruction address.
    pub start_address: Address,
    /// One past the last instruction, when the provider knows it.
    pub end_address: Option<Address>,
    /// Module (binary image) owning the function.
    pub module: PathBuf,
}

impl FunctionDescriptor
{
    /// Name used in command output.
    pub fn display_name(&self) -> &str
    {
        self.name.display_name()
    }
}

/// A code symbol in a module's symbol table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeSymbol
{
    /// Symbol name.
    pub name: SymbolName,
    /// Start address of the symbol.
    pub start: Address,
    /// End address (start + size) when the symbol table records a size.
    pub end: Option<Address>,
}

impl CodeSymbol
{
    /// Build the function descriptor for this symbol within `module`.
    pub fn function(&self, module: &Path) -> FunctionDescriptor
    {
        FunctionDescriptor {
            name: self.name.clone(),
            start_address: self.start,
            end_address: self.end,
            module: module.to_path_buf(),
        }
    }
}

/// A loaded module together with its code symbols, in provider order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleSymbols
{
    /// Path of the module on disk.
    pub path: PathBuf,
    /// Code symbols in the order the provider reports them.
    pub symbols: Vec<CodeSymbol>,
}

impl ModuleSymbols
{
    /// Create a module with no symbols.
    pub fn new(path: impl Into<PathBuf>) -> Self
    {
        Self {
            path: path.into(),
            symbols: Vec::new(),
        }
    }

    /// Code symbols of this module.
    pub fn code_symbols(&self) -> &[CodeSymbol]
    {
        &self.symbols
    }
}

/// A line-table row exactly as the provider reported it.
///
/// Providers may report line 0 or an empty file for compiler-generated code.
/// Use [`crate::symbols::line_table::LineTableBridge`] to turn this into a
/// [`LineTableEntry`] that is safe to use as a boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLineEntry
{
    /// File path, possibly empty.
    pub file: Option<String>,
    /// Line number, possibly zero.
    pub line: Option<u32>,
}

/// A usable line-table entry: non-empty file, 1-based line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineTableEntry
{
    /// Address that was looked up.
    pub address: Address,
    /// Source file the address maps to.
    pub file_path: PathBuf,
    /// 1-based line number; never zero.
    pub line_number: u32,
}
