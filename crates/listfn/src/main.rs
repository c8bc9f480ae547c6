use std::io::{self, Write};
use std::path::PathBuf;
use std::process;
use std::str::FromStr;

use clap::{Parser, Subcommand};
use listfn_core::prelude::{
    describe_function, list_function, BinaryTarget, DebugSession, FsSourceFiles, ResolverConfig, Result as ListResult,
};
use listfn_utils::{info, init_logging, init_logging_with_level, LogFormat, LogLevel, LoggingError, LoggingGuard};

mod shell;

/// List the complete source of a function from a binary's debug information.
#[derive(Parser, Debug)]
#[command(name = "listfn")]
#[command(version)]
#[command(about = "List the complete source of a function from a binary's debug information", long_about = None)]
struct Cli
{
    /// Log level (error, warn, info, debug, trace); overrides RUST_LOG
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Log format (pretty or json); overrides LISTFN_LOG_FORMAT
    #[arg(long, global = true)]
    log_format: Option<String>,

    /// Lines subtracted from the line found at a function's end boundary
    /// (default: LISTFN_END_LINE_ADJUST, or 1)
    #[arg(long, global = true)]
    end_line_adjust: Option<u32>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands
{
    /// Print the source lines of a function
    List
    {
        /// Binary with debug information
        binary: PathBuf,
        /// Exact function name (mangled or demangled)
        function: Option<String>,
    },
    /// Print a function's address range
    Info
    {
        /// Binary with debug information
        binary: PathBuf,
        /// Exact function name (mangled or demangled)
        function: String,
    },
    /// Load a binary and read `lf`/`fi` commands from stdin
    Shell
    {
        /// Binary with debug information
        binary: PathBuf,
    },
}

fn main()
{
    let cli = Cli::parse();

    let _logging = match setup_logging(&cli) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn setup_logging(cli: &Cli) -> Result<LoggingGuard, LoggingError>
{
    if cli.log_level.is_none() && cli.log_format.is_none() {
        return init_logging();
    }

    let level = match &cli.log_level {
        Some(level) => LogLevel::from_str(level).map_err(LoggingError::InvalidLevel)?,
        None => LogLevel::Warn,
    };
    let format = match &cli.log_format {
        Some(format) => LogFormat::from_str(format).map_err(LoggingError::InvalidFormat)?,
        None => LogFormat::Pretty,
    };
    init_logging_with_level(level, format)
}

fn run_command(cli: Cli) -> ListResult<()>
{
    let mut config = ResolverConfig::from_env()?;
    if let Some(adjust) = cli.end_line_adjust {
        config = config.with_end_line_adjust(adjust);
    }

    match cli.command {
        Commands::List { binary, function } => {
            info!("Listing {:?} from {}", function, binary.display());
            let session = DebugSession::with_target(BinaryTarget::load(&binary)?);
            let listing = list_function(&session, &FsSourceFiles, &config, function.as_deref())?;
            print!("{listing}");
            Ok(())
        }
        Commands::Info { binary, function } => {
            let session = DebugSession::with_target(BinaryTarget::load(&binary)?);
            print!("{}", describe_function(&session, &function)?);
            Ok(())
        }
        Commands::Shell { binary } => {
            let mut shell = shell::Shell::load(vec![binary], config)?;
            let stdin = io::stdin();
            let mut stdout = io::stdout();
            shell.run(stdin.lock(), &mut stdout)?;
            stdout.flush()?;
            Ok(())
        }
    }
}
