//! Environment variable source: ASSET__* prefix with __ separator

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Add environment variable overlay to builder.
/// Uses the ASSET__ prefix and __ as separator for nested keys, e.g.
/// `ASSET__TRANSFER__MODE=link`. `ASSET__ASSET_PATH` is a `:`-separated list.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let builder = builder.add_source(
        Environment::with_prefix("ASSET")
            .separator("__")
            .list_separator(":")
            .with_list_parse_key("asset_path")
            .try_parsing(true),
    );
    Ok(builder)
}
