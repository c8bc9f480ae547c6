//! # Symbols
//!
//! Everything that talks to debug information: function lookup, line-table
//! access, next-symbol queries, and the two bundled providers.

pub mod demangle;
pub mod image;
pub mod index;
pub mod line_table;
pub mod locator;
pub mod synthetic;

pub use demangle::symbol_name;
pub use image::{BinaryImage, BinaryTarget};
pub use index::{LinearScan, NextSymbolScanner, SymbolIndex};
pub use line_table::LineTableBridge;
pub use locator::SymbolLocator;
pub use synthetic::SyntheticTarget;
