use pipedns_domain::{CliOverrides, Config};

/// Loads and validates configuration. Any error here aborts startup before the
/// pipe session begins.
pub fn load_config(path: Option<&str>, overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(path, overrides)?;
    config.validate()?;
    Ok(config)
}
