//! Merge rules: defaults, override order, conflict handling.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("transfer.mode", "copy")?
        .set_default("transfer.digest", true)?
        .set_default("display.color", true)?
        .set_default("logging.enabled", false)?
        .set_default("logging.output", "stderr")
}
