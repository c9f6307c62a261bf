use std::path::PathBuf;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::store::inventory::DEFAULT_LOW_STOCK_THRESHOLD;

pub const DEFAULT_DIR: &str = ".";
pub const DEFAULT_DATAFILE: &str = "inventory.json";

#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    pub dir: Option<String>,
    pub datafile: Option<String>,
    pub low_stock_threshold: Option<i64>,
    pub autosave: Option<bool>,
}

impl AppConfig {
    /// Location of the JSON data file, `dir` joined with `datafile`.
    pub fn data_path(&self) -> PathBuf {
        let dir = self.dir.as_deref().unwrap_or(DEFAULT_DIR);
        let datafile = self.datafile.as_deref().unwrap_or(DEFAULT_DATAFILE);
        PathBuf::from(dir).join(datafile)
    }

    pub fn threshold(&self) -> i64 {
        self.low_stock_threshold.unwrap_or(DEFAULT_LOW_STOCK_THRESHOLD)
    }

    pub fn autosave(&self) -> bool {
        self.autosave.unwrap_or(false)
    }
}

pub fn load_config() -> Result<AppConfig, config::ConfigError> {
    let mut config: AppConfig = Config::builder()
        .add_source(File::with_name("config.toml").required(false))
        .add_source(Environment::with_prefix("INVENTORY"))
        .build()?
        .try_deserialize()?;

    set_defaults(&mut config);

    Ok(config)
}

pub fn set_defaults(config: &mut AppConfig) {
    if config.dir.is_none() {
        config.dir = Some(DEFAULT_DIR.to_string());
    }
    if config.datafile.is_none() {
        config.datafile = Some(DEFAULT_DATAFILE.to_string());
    }
    if config.low_stock_threshold.is_none() {
        config.low_stock_threshold = Some(DEFAULT_LOW_STOCK_THRESHOLD);
    }
    if config.autosave.is_none() {
        config.autosave = Some(false);
    }
}
