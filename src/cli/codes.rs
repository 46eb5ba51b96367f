//! Input code listing CLI command.

use clap::Args;

use crate::cli::common::{CliError, CliResult};
use crate::input::InputCodeDb;

/// List recognized physical input codes
#[derive(Args, Debug)]
pub struct CodesArgs {
    /// Search query (substring match on names and aliases)
    #[arg(value_name = "QUERY")]
    query: Option<String>,

    /// Restrict to one category (e.g. mouse, navigation)
    #[arg(long, value_name = "CATEGORY")]
    category: Option<String>,
}

impl CodesArgs {
    /// Execute codes command
    pub fn execute(&self) -> CliResult<()> {
        let db = InputCodeDb::load()
            .map_err(|e| CliError::io(format!("Failed to load input code table: {e}")))?;

        if let Some(category) = &self.category {
            if !db.categories().iter().any(|c| &c.id == category) {
                let known: Vec<&str> = db.categories().iter().map(|c| c.id.as_str()).collect();
                return Err(CliError::usage(format!(
                    "Unknown category `{}`; expected one of: {}",
                    category,
                    known.join(", ")
                )));
            }
        }

        let query = self.query.as_deref().unwrap_or("");
        let results = db.search(query);

        let mut shown = 0;
        for def in results {
            if let Some(category) = &self.category {
                if &def.category != category {
                    continue;
                }
            }

            let aliases = if def.aliases.is_empty() {
                String::new()
            } else {
                format!("  (aliases: {})", def.aliases.join(", "))
            };
            println!(
                "{:<12} {:>5}  {:#06x}  {}{}",
                def.name, def.code, def.code, def.category, aliases
            );
            shown += 1;
        }

        if shown == 0 {
            return Err(CliError::validation(format!(
                "No input codes match `{query}`"
            )));
        }

        Ok(())
    }
}
