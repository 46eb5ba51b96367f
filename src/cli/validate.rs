//! Settings file validation CLI command.

use clap::Args;
use std::path::PathBuf;

use crate::cli::common::{CliError, CliResult};
use crate::codec;
use crate::input::InputCodeDb;

/// Validate the persisted settings file
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Settings file to validate (defaults to the standard location)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,
}

impl ValidateArgs {
    /// Execute validate command
    pub fn execute(&self) -> CliResult<()> {
        let codes = InputCodeDb::load()
            .map_err(|e| CliError::io(format!("Failed to load input code table: {e}")))?;

        let path = match &self.file {
            Some(path) => path.clone(),
            None => codec::settings_file_path().map_err(|e| CliError::io(e.to_string()))?,
        };

        let raw = codec::load(&path).map_err(|e| {
            let detail = std::error::Error::source(&e)
                .map(|source| format!(": {source}"))
                .unwrap_or_default();
            CliError::validation(format!("{e}{detail}"))
        })?;
        let (_settings, repairs) = codec::apply(&codes, &raw);

        if repairs.is_valid() && repairs.warnings.is_empty() {
            println!("✓ {} is valid", path.display());
            Ok(())
        } else {
            print!("{}", repairs.format_message());
            Err(CliError::validation(format!(
                "{} contains entries that would be repaired",
                path.display()
            )))
        }
    }
}
