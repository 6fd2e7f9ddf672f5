use crate::error::{CatalogError, ConfigError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const CONFIG_ENV_VAR: &str = "CC_INGEST_CONFIG";

const DEFAULT_MAX_INPUT_BYTES: usize = 32 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IngestConfig {
    /// Upper bound on the raw catalog size accepted by the ingest driver.
    pub max_input_bytes: usize,
    pub include_tree: bool,
    /// Clear the target store before importing.
    pub reset_store: bool,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            include_tree: true,
            reset_store: true,
        }
    }
}

impl IngestConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: IngestConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads the file named by `CC_INGEST_CONFIG`, or returns the defaults when
    /// the variable is unset.
    pub fn load_default() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Rejects catalogs larger than `max_input_bytes` before they are parsed.
    pub fn check_input_size(&self, size: usize) -> Result<(), CatalogError> {
        if size > self.max_input_bytes {
            return Err(CatalogError::InputTooLarge {
                size,
                limit: self.max_input_bytes,
            });
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_input_bytes == 0 {
            return Err(ConfigError::Invalid(
                "maxInputBytes must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
