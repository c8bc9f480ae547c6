//! Execution context snapshots.
//!
//! These mirror the host debugger's selection chain: a process has a selected
//! thread, a thread has a selected frame, and a frame may belong to a known
//! function. Each link is optional because any of them can be missing (no
//! process launched yet, a thread with no frames, a frame in stripped code).

use super::address::Address;
use super::symbols::FunctionDescriptor;

/// Thread identifier as reported by the host debugger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ThreadId(pub u64);

impl ThreadId
{
    /// Get the raw `u64` representation of the thread identifier
    pub fn raw(&self) -> u64
    {
        self.0
    }
}

impl From<u64> for ThreadId
{
    fn from(value: u64) -> Self
    {
        Self(value)
    }
}

/// Selected frame of a thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameState
{
    /// Program counter of the frame.
    pub pc: Address,
    /// Function containing `pc`, if the provider could resolve one.
    pub function: Option<FunctionDescriptor>,
}

impl FrameState
{
    pub fn function(&self) -> Option<&FunctionDescriptor>
    {
        self.function.as_ref()
    }
}

/// A thread and its selected frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadState
{
    pub id: ThreadId,
    pub selected_frame: Option<FrameState>,
}

impl ThreadState
{
    pub fn selected_frame(&self) -> Option<&FrameState>
    {
        self.selected_frame.as_ref()
    }
}

/// A live process and its selected thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessState
{
    pub pid: u32,
    pub selected_thread: Option<ThreadState>,
}

impl ProcessState
{
    pub fn selected_thread(&self) -> Option<&ThreadState>
    {
        self.selected_thread.as_ref()
    }
}
