//! CLI domain: parse, route, help, output, and presentation only.
//! No domain orchestration; single route table dispatches to the asset API.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::{command_name, is_mutating};
pub use output::{exit_code, map_error};
pub use parse::{AssetArgs, Cli, Commands, ListArgs};
pub use presentation::{convert_size, format_collection_tree, format_collections_json, Palette};
pub use route::RunContext;
