//! Code address type.

use std::fmt;

/// Strongly typed code address
///
/// This wrapper around `u64` keeps symbol start/end addresses from being mixed
/// up with line numbers, sizes, or counts, all of which are also plain
/// integers in debug information.
///
/// Addresses are only meaningful within one load instance of a target. Any
/// structure keyed by `Address` (such as the symbol index) must be discarded
/// when the target is reloaded.
///
/// ## Example
///
/// ```rust
/// use listfn_core::types::Address;
///
/// let start = Address::from(0x1000);
/// let end = start.saturating_add(0x40);
/// assert_eq!(end.value(), 0x1040);
/// assert!(start < end);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address(u64);

impl Address
{
    /// The null address (0x0)
    pub const ZERO: Self = Address(0);

    /// Create a new address from a `u64` value, usable in const contexts.
    pub const fn new(value: u64) -> Self
    {
        Address(value)
    }

    /// Get the raw `u64` value of this address
    pub const fn value(self) -> u64
    {
        self.0
    }

    /// Add an offset, saturating at `u64::MAX`.
    ///
    /// Used to derive a function's end address from its start and size.
    #[must_use]
    pub fn saturating_add(self, offset: u64) -> Self
    {
        Address(self.0.saturating_add(offset))
    }
}

impl From<u64> for Address
{
    fn from(value: u64) -> Self
    {
        Address(value)
    }
}

impl From<Address> for u64
{
    fn from(address: Address) -> Self
    {
        address.0
    }
}

impl fmt::Display for Address
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(f, "0x{:016x}", self.0)
    }
}

impl fmt::LowerHex for Address
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        fmt::LowerHex::fmt(&self.0, f)
    }
}
