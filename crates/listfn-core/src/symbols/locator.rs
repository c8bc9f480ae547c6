//! Function lookup by name or by execution context.

use tracing::debug;

use crate::error::{ContextGap, ListError, Result};
use crate::target::Target;
use crate::types::FunctionDescriptor;

/// Resolves the function a command refers to.
#[derive(Clone, Copy)]
pub struct SymbolLocator<'a>
{
    target: &'a dyn Target,
}

impl<'a> SymbolLocator<'a>
{
    pub fn new(target: &'a dyn Target) -> Self
    {
        Self { target }
    }

    /// Resolve by name when given, otherwise through the execution context.
    pub fn resolve(&self, name: Option<&str>) -> Result<FunctionDescriptor>
    {
        match name {
            Some(name) => self.find_by_name(name),
            None => self.current_function(),
        }
    }

    /// First code symbol, in provider order, whose name matches exactly.
    ///
    /// ## Errors
    ///
    /// [`ListError::FunctionNotFound`] if no module has a matching symbol.
    pub fn find_by_name(&self, name: &str) -> Result<FunctionDescriptor>
    {
        for module in self.target.modules() {
            if let Some(symbol) = module.code_symbols().iter().find(|symbol| symbol.name.matches(name)) {
                debug!("found {name} at {} in {}", symbol.start, module.path.display());
                return Ok(symbol.function(&module.path));
            }
        }
        Err(ListError::FunctionNotFound(name.to_string()))
    }

    /// Function of the selected frame of the selected thread.
    ///
    /// ## Errors
    ///
    /// [`ListError::NoExecutionContext`] naming the first missing link.
    pub fn current_function(&self) -> Result<FunctionDescriptor>
    {
        let process = self
            .target
            .current_process()
            .ok_or(ListError::NoExecutionContext(ContextGap::NoProcess))?;
        let thread = process
            .selected_thread()
            .ok_or(ListError::NoExecutionContext(ContextGap::NoThread))?;
        let frame = thread
            .selected_frame()
            .ok_or(ListError::NoExecutionContext(ContextGap::NoFrame))?;
        let function = frame
            .function()
            .ok_or(ListError::NoExecutionContext(ContextGap::NoFunction))?;

        debug!(
            "thread {} frame at {} is in {}",
            thread.id.raw(),
            frame.pc,
            function.display_name()
        );
        Ok(function.clone())
    }
}
