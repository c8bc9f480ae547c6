//! # listfn-core
//!
//! Function source-extent resolution and source window rendering.
//!
//! Given a debug-info provider (symbol tables plus address-to-line mappings),
//! this crate works out which source lines make up a function and prints
//! them. Debug information is often incomplete, so the end of a function is
//! found through an ordered set of fallbacks:
//! - the line at the function's end address
//! - the line at the next code symbol's start address
//! - the length of the source file
//!
//! ## Layout
//!
//! - [`target`]: the provider interface and the per-session state
//! - [`symbols`]: function lookup, line tables, symbol index, providers
//! - [`extent`]: the end-line waterfall
//! - [`source`]: reading source files and cutting out the window
//! - [`command`]: the `lf` and `fi` commands

pub mod command;
pub mod config;
pub mod error;
pub mod extent;
pub mod prelude;
pub mod source;
pub mod symbols;
pub mod target;
pub mod types;

pub use command::{list_function, Listing};
pub use config::ResolverConfig;
// Re-export commonly used types
pub use error::{ContextGap, ListError, Result};
pub use target::{DebugSession, Target};
