//! # Types
//!
//! Provider-agnostic types used throughout listfn.
//!
//! These types abstract away where symbols and line tables come from, so the
//! resolver works the same against a binary on disk, a live host debugger, or
//! a synthetic fixture.

pub mod address;
pub mod process;
pub mod source;
pub mod symbols;

// Re-export all public types
pub use address::Address;
pub use process::{FrameState, ProcessState, ThreadId, ThreadState};
pub use source::{ExtentSource, SourceExtent, SourceLine, SourceWindow};
pub use symbols::{CodeSymbol, FunctionDescriptor, LineTableEntry, ModuleSymbols, RawLineEntry, SymbolName};
