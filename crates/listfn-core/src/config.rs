//! Resolver configuration.
//!
//! ## Environment Variables
//!
//! - `LISTFN_END_LINE_ADJUST`: value of the end-line adjustment (see
//!   [`ResolverConfig::end_line_adjust`]), default `1`.

use std::env;

use crate::error::{ListError, Result};

/// Environment variable holding the end-line adjustment.
pub const END_LINE_ADJUST_ENV: &str = "LISTFN_END_LINE_ADJUST";

/// Default end-line adjustment.
///
/// DWARF producers usually attribute a function's end address (one past its
/// last instruction) to the line after the closing brace, or to the first line
/// of whatever follows. Subtracting one lands on the closing brace.
pub const DEFAULT_END_LINE_ADJUST: u32 = 1;

/// Tunables for [`crate::extent::ExtentResolver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverConfig
{
    /// Lines subtracted from the line found at an end boundary (the function's
    /// end address or the next symbol's start) to get the function's last line.
    ///
    /// Depends on the debug-info producer: 1 for the common case, 2 for
    /// toolchains that attribute epilogue padding to an extra line.
    pub end_line_adjust: u32,
}

impl Default for ResolverConfig
{
    fn default() -> Self
    {
        Self {
            end_line_adjust: DEFAULT_END_LINE_ADJUST,
        }
    }
}

impl ResolverConfig
{
    #[must_use]
    pub fn with_end_line_adjust(mut self, adjust: u32) -> Self
    {
        self.end_line_adjust = adjust;
        self
    }

    /// Read configuration from the environment, falling back to defaults.
    ///
    /// ## Errors
    ///
    /// [`ListError::InvalidArgument`] if `LISTFN_END_LINE_ADJUST` is set but not
    /// a non-negative integer.
    pub fn from_env() -> Result<Self>
    {
        match env::var(END_LINE_ADJUST_ENV) {
            Ok(value) => Self::default().with_adjust_str(&value),
            Err(_) => Ok(Self::default()),
        }
    }

    fn with_adjust_str(self, value: &str) -> Result<Self>
    {
        let adjust = value.trim().parse::<u32>().map_err(|_| {
            ListError::InvalidArgument(format!("{END_LINE_ADJUST_ENV} must be a non-negative integer, got '{value}'"))
        })?;
        Ok(self.with_end_line_adjust(adjust))
    }
}
