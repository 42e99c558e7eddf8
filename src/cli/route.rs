//! CLI route: single route table and run context. Dispatches to the asset API and presentation.

use crate::api::AssetApi;
use crate::config::{AssetConfig, ConfigLoader};
use crate::error::AssetError;
use crate::mutation::{AddRequest, DeleteRequest, ItemRequest, ModifyRequest};
use crate::tree::SearchPath;
use std::path::PathBuf;
use tracing::debug;

use crate::cli::parse::{AssetArgs, Commands, ListArgs};
use crate::cli::presentation::{format_collection_tree, format_collections_json, Palette};

/// Runtime context for CLI execution: loaded configuration and presentation settings.
pub struct RunContext {
    config: AssetConfig,
    palette: Palette,
}

impl RunContext {
    /// Create run context from an optional config path. Uses ConfigLoader only.
    pub fn new(config_path: Option<PathBuf>, no_color: bool) -> Result<Self, AssetError> {
        let config = ConfigLoader::load_optional(config_path.as_deref())?;
        Ok(Self::from_config(config, no_color))
    }

    pub fn from_config(config: AssetConfig, no_color: bool) -> Self {
        let palette = Palette {
            color: config.display.color && !no_color,
        };
        Self { config, palette }
    }

    /// API over the configured collections. Resolved per command so that
    /// `init` works while the collection list is still broken.
    fn api(&self) -> Result<AssetApi, AssetError> {
        let collections = self.config.collection_paths()?;
        debug!(collections = collections.len(), "Resolved asset collections");
        Ok(AssetApi::new(collections))
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, AssetError> {
        match command {
            Commands::Init {
                path,
                store,
                force,
                mkdir,
            } => {
                let collection = AssetApi::init(path, store.as_deref(), *force, *mkdir)?;
                let mut out = format!(
                    "Initialized asset collection {}",
                    collection.path.display()
                );
                if let Some(store) = &collection.store {
                    out.push_str(&format!(" (store: {})", store.display()));
                }
                Ok(out)
            }
            Commands::Avail(args) => self.handle_list(args, false),
            Commands::Spider(args) => self.handle_list(args, true),
            Commands::Pull { search } => {
                let item = self.api()?.pull(&SearchPath::from(search.as_str()))?;
                Ok(item.display().to_string())
            }
            Commands::Add(args) => {
                let request = self.add_request(args)?;
                let applied = self.api()?.add(&request)?;
                Ok(format!(
                    "Added asset {} to {}",
                    applied.value,
                    applied.collection.display()
                ))
            }
            Commands::Mod { search, asset } => {
                let request = self.modify_request(search, asset)?;
                let applied = self.api()?.modify(&request)?;
                Ok(format!(
                    "Modified asset {} in {}",
                    applied.value,
                    applied.collection.display()
                ))
            }
            Commands::Del { search, recursive } => {
                let request = DeleteRequest {
                    target: SearchPath::from(search.as_str()),
                    recursive: *recursive,
                };
                let applied = self.api()?.delete(&request)?;
                Ok(format!(
                    "Deleted {} asset(s) from {}",
                    applied.value.removed.len(),
                    applied.collection.display()
                ))
            }
        }
    }

    fn handle_list(&self, args: &ListArgs, detail: bool) -> Result<String, AssetError> {
        let search = args.search.as_deref().map(SearchPath::from);
        let mut collections = self.api()?.search(search.as_ref(), args.exact)?;
        if search.is_some() {
            collections.retain(|collection| !collection.forest.is_empty());
        }
        if args.format == "json" {
            return format_collections_json(&collections);
        }
        let trees: Vec<String> = collections
            .iter()
            .map(|collection| format_collection_tree(collection, detail, self.palette))
            .collect();
        Ok(trees.join("\n").trim_end().to_string())
    }

    fn item_request(&self, args: &AssetArgs) -> Result<Option<ItemRequest>, AssetError> {
        let Some(source) = &args.item else {
            if args.inherit {
                return Err(AssetError::InvalidRequest(
                    "--inherit needs an --item".to_string(),
                ));
            }
            return Ok(None);
        };
        Ok(Some(ItemRequest {
            source: source.clone(),
            mode: args.mode.unwrap_or(self.config.transfer.mode),
            digest: self.config.transfer.digest && !args.nodigest,
            inherit: args.inherit,
        }))
    }

    fn add_request(&self, args: &AssetArgs) -> Result<AddRequest, AssetError> {
        Ok(AddRequest {
            alias: args.alias.clone(),
            tag: args.tag.clone(),
            parent: args.parent.as_deref().map(SearchPath::from),
            description: args.description.clone(),
            cli: args.cli.clone(),
            item: self.item_request(args)?,
        })
    }

    fn modify_request(&self, search: &str, args: &AssetArgs) -> Result<ModifyRequest, AssetError> {
        let non_empty = |values: &Vec<String>| (!values.is_empty()).then(|| values.clone());
        Ok(ModifyRequest {
            target: SearchPath::from(search),
            alias: non_empty(&args.alias),
            tag: non_empty(&args.tag),
            parent: args.parent.as_deref().map(SearchPath::from),
            description: args.description.clone(),
            cli: args.cli.clone(),
            item: self.item_request(args)?,
        })
    }
}
