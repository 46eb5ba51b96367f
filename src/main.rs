//! padconf - Settings CLI for the VirtualGamePad input remapper
//!
//! This binary provides headless access to the VirtualGamePad settings
//! store: inspecting and editing key bindings, the server port and the
//! mouse sensitivity, and validating the persisted settings file.

use clap::{Parser, Subcommand};

use padconf::cli::{
    CodesArgs, ExitCode, PathArgs, ResetArgs, SetArgs, ShowArgs, UnsetArgs, ValidateArgs,
};

/// padconf - Settings CLI for the VirtualGamePad input remapper
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Display current settings
    Show(ShowArgs),
    /// Set setting values
    Set(SetArgs),
    /// Revert settings to their defaults
    Unset(UnsetArgs),
    /// Validate the persisted settings file
    Validate(ValidateArgs),
    /// Reset every setting to its default
    Reset(ResetArgs),
    /// Print the settings file location
    Path(PathArgs),
    /// List recognized physical input codes
    Codes(CodesArgs),
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "padconf=debug" } else { "padconf=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match &cli.command {
        Command::Show(args) => args.execute(),
        Command::Set(args) => args.execute(),
        Command::Unset(args) => args.execute(),
        Command::Validate(args) => args.execute(),
        Command::Reset(args) => args.execute(),
        Command::Path(args) => args.execute(),
        Command::Codes(args) => args.execute(),
    };

    match result {
        Ok(()) => std::process::ExitCode::from(ExitCode::Success.as_u8()),
        Err(error) => {
            eprintln!("Error: {error}");
            std::process::ExitCode::from(error.exit_code().as_u8())
        }
    }
}
