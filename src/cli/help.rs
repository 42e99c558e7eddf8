//! CLI help and command-name contract for logging and routing.

use crate::cli::parse::Commands;

/// Command name string for log records (e.g. "avail", "mod").
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Init { .. } => "init",
        Commands::Avail(_) => "avail",
        Commands::Spider(_) => "spider",
        Commands::Pull { .. } => "pull",
        Commands::Add(_) => "add",
        Commands::Mod { .. } => "mod",
        Commands::Del { .. } => "del",
    }
}

/// Whether the command rewrites a collection file.
pub fn is_mutating(command: &Commands) -> bool {
    matches!(
        command,
        Commands::Add(_) | Commands::Mod { .. } | Commands::Del { .. }
    )
}
