//! Miscellaneous commands: config

use shopscore::config::Config;
use shopscore::error::Result;

/// Print the effective configuration (file values merged over defaults)
pub fn cmd_config() -> Result<()> {
    let config = Config::load()?;
    println!("# {}", Config::config_path()?.display());
    print!("{}", config.to_toml()?);
    Ok(())
}
