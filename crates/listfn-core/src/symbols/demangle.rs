//! Symbol demangling utilities.
//!
//! This module turns raw symbol-table names into [`SymbolName`]s.
//!
//! ## Symbol Mangling
//!
//! - **Rust**: legacy (`_ZN...E`) and v0 (`_R...`) schemes, demangled with
//!   `rustc-demangle`. The alternate form is used so that the trailing
//!   `::h0123456789abcdef` hash is dropped and users can type `crate::func`.
//! - **C++**: Itanium ABI (`_Z...`), demangled with `cpp_demangle` without
//!   parameter or return types, so `ns::add` matches every `ns::add(...)`
//!   overload and the first one in symbol-table order wins.
//! - **C**: plain identifiers, kept as-is.

use cpp_demangle::{BorrowedSymbol, DemangleOptions, ParseOptions};
use rustc_demangle::try_demangle;

use crate::types::SymbolName;

const CPP_RECURSION_LIMIT: u32 = 1000;

/// Create a `SymbolName` from a raw symbol string.
///
/// ## Example
///
/// ```rust
/// use listfn_core::symbols::symbol_name;
///
/// let name = symbol_name("_ZN3foo3bar17h05af221e174051e9E");
/// assert_eq!(name.display_name(), "foo::bar");
/// assert!(name.matches("foo::bar"));
/// assert!(name.matches("_ZN3foo3bar17h05af221e174051e9E"));
/// ```
pub fn symbol_name(raw: impl Into<String>) -> SymbolName
{
    let raw = raw.into();
    let demangled = try_demangle(&raw)
        .ok()
        .map(|d| format!("{d:#}"))
        .or_else(|| demangle_cpp(&raw));
    SymbolName::new(raw, demangled)
}

fn demangle_cpp(raw: &str) -> Option<String>
{
    if !raw.starts_with("_Z") {
        return None;
    }
    let parse = ParseOptions::default().recursion_limit(CPP_RECURSION_LIMIT);
    let symbol = BorrowedSymbol::new_with_options(raw.as_bytes(), &parse).ok()?;
    let options = DemangleOptions::new()
        .recursion_limit(CPP_RECURSION_LIMIT)
        .no_return_type()
        .no_params();
    symbol.demangle(&options).ok()
}
