//! Interactive command loop.
//!
//! Reads one command per line, tokenized with shell quoting rules. Every
//! command writes either its output or one diagnostic line, then the loop
//! continues; only `quit`/`exit` and end of input stop it.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use listfn_core::command::{run_info_command, run_list_command};
use listfn_core::source::{FsSourceFiles, SourceFiles};
use listfn_core::symbols::BinaryTarget;
use listfn_core::{DebugSession, ResolverConfig, Result};
use listfn_utils::{debug, info, warn};

const PROMPT: &str = "(listfn) ";

const HELP: &str = "\
Commands:
  lf [function_name]   List the source of a function (default: current frame)
  fi <function_name>   Print a function's address range
  reload               Re-read the loaded binaries from disk
  help                 Show this help
  quit                 Leave the shell
";

/// What the loop does after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow
{
    Continue,
    Quit,
}

pub struct Shell
{
    session: DebugSession,
    paths: Vec<PathBuf>,
    sources: Box<dyn SourceFiles>,
    config: ResolverConfig,
}

impl Shell
{
    /// Shell over an existing session. `reload` is a no-op without paths.
    pub fn new(session: DebugSession, sources: Box<dyn SourceFiles>, config: ResolverConfig) -> Self
    {
        Self {
            session,
            paths: Vec::new(),
            sources,
            config,
        }
    }

    /// Shell over binaries read from disk, with sources read from the filesystem.
    pub fn load(paths: Vec<PathBuf>, config: ResolverConfig) -> Result<Self>
    {
        let target = BinaryTarget::load_all(&paths)?;
        info!("Loaded {} module(s)", paths.len());
        let mut shell = Self::new(DebugSession::with_target(target), Box::new(FsSourceFiles), config);
        shell.paths = paths;
        Ok(shell)
    }

    /// Run until `quit` or end of input.
    ///
    /// ## Errors
    ///
    /// Only I/O failures on `input` or `out`; command failures are reported
    /// in-band.
    pub fn run(&mut self, mut input: impl BufRead, out: &mut dyn Write) -> Result<()>
    {
        let mut buffer = Vec::new();
        loop {
            write!(out, "{PROMPT}")?;
            out.flush()?;

            buffer.clear();
            if input.read_until(b'\n', &mut buffer)? == 0 {
                writeln!(out)?;
                return Ok(());
            }
            // Invalid UTF-8 is replaced, so a garbled line becomes an unknown command.
            let line = String::from_utf8_lossy(&buffer);
            if self.execute(line.trim_end_matches(['\r', '\n']), out)? == Flow::Quit {
                return Ok(());
            }
        }
    }

    fn execute(&mut self, line: &str, out: &mut dyn Write) -> Result<Flow>
    {
        let Some(words) = shlex::split(line) else {
            writeln!(out, "Invalid argument: unbalanced quotes in '{}'", line.trim())?;
            return Ok(Flow::Continue);
        };
        let Some((command, args)) = words.split_first() else {
            return Ok(Flow::Continue);
        };
        debug!(command = %command, args = ?args, "shell command");

        match command.as_str() {
            "lf" => run_list_command(&self.session, self.sources.as_ref(), &self.config, args, out)?,
            "fi" => run_info_command(&self.session, args, out)?,
            "reload" => self.reload(out)?,
            "help" | "?" => write!(out, "{HELP}")?,
            "quit" | "exit" | "q" => return Ok(Flow::Quit),
            other => writeln!(out, "Unknown command '{other}'. Type 'help' for a list of commands.")?,
        }
        Ok(Flow::Continue)
    }

    /// Replace the target with a fresh load. On failure the old target stays.
    fn reload(&mut self, out: &mut dyn Write) -> Result<()>
    {
        if self.paths.is_empty() {
            writeln!(out, "No binary to reload.")?;
            return Ok(());
        }
        match BinaryTarget::load_all(&self.paths) {
            Ok(target) => {
                self.session.replace_target(Box::new(target));
                writeln!(out, "Reloaded {} module(s).", self.paths.len())?;
            }
            Err(err) => {
                warn!("Reload failed: {err}");
                writeln!(out, "{err}")?;
            }
        }
        Ok(())
    }
}
