use std::path::PathBuf;

use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use serde::Deserialize;

use crate::store::DEFAULT_DB_PATH;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_STATIC_DIR: &str = "static";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub bind_addr: String,
    pub db_path: PathBuf,
    pub static_dir: PathBuf,
}

impl Config {
    // Layers: built-in defaults < config/planner.toml < PLANNER__* env vars
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let builder = config::Config::builder()
            .add_source(config::File::with_name("config/planner").required(false))
            .add_source(config::Environment::with_prefix("PLANNER").separator("__"));
        Self::from_builder(builder)
    }

    // Defaults sit below every source already on the builder
    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        builder
            .set_default("bind_addr", DEFAULT_BIND_ADDR)?
            .set_default("db_path", DEFAULT_DB_PATH)?
            .set_default("static_dir", DEFAULT_STATIC_DIR)?
            .build()?
            .try_deserialize()
    }
}
