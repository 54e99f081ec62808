use config::{Config, ConfigError, File as ConfigFile};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct LocaliseConfig {
    /// Local cache directory all localised files land under.
    pub cache_root: String,
    /// How many sequences copy at once. Defaults to half the CPU count.
    #[serde(default)]
    pub concurrency_limit: Option<usize>,
}

pub fn load_configuration() -> Result<LocaliseConfig, ConfigError> {
    let builder = Config::builder()
        .add_source(ConfigFile::with_name("Localise").required(false))
        .build()?;
    builder.try_deserialize::<LocaliseConfig>()
}

/// Half the available cores, never less than one worker.
pub fn default_concurrency_limit() -> usize {
    (num_cpus::get() / 2).max(1)
}
