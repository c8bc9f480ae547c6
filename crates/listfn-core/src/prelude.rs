//! Common module for library exports

pub use crate::command::{describe_function, list_function, run_info_command, run_list_command, Listing};
pub use crate::config::ResolverConfig;
pub use crate::error::{ContextGap, ListError, Result};
pub use crate::source::{FsSourceFiles, MemorySourceFiles, SourceFiles};
pub use crate::symbols::{BinaryTarget, SyntheticTarget};
pub use crate::target::{DebugSession, Target};
pub use crate::types::{Address, FunctionDescriptor, SourceExtent, SourceWindow};
