//! Config file loading.
//!
//! The file is optional. A missing default file yields the built-in settings;
//! a missing file passed with `--config` is an error.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

use log::debug;
use quotegrid_lib::GridConfig;
use quotegrid_lib::error::ColumnError;
use quotegrid_lib::model::ColumnModel;
use quotegrid_lib::model::ColumnSpec;
use quotegrid_lib::view::ErrorRows;
use serde::Deserialize;

use crate::error::CliError;
use crate::paths;

/// Contents of `config.toml`.
///
/// ```toml
/// endpoint = "http://localhost:8080/api/v1/stock/all"
/// timeout_secs = 5
/// error_rows = "clear"
///
/// [params]
/// market = "sh"
///
/// [[columns]]
/// key = "code"
/// field = "代码"
/// label = "Code"
/// pinned = "left"
/// sortable = true
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileSettings {
    pub endpoint: Option<String>,
    pub timeout_secs: Option<u64>,
    pub connect_timeout_secs: Option<u64>,
    pub default_page_size: Option<u32>,
    pub max_page_size: Option<u32>,
    pub null_data_is_empty: Option<bool>,
    pub error_rows: Option<ErrorRows>,
    /// Static request parameters.
    pub params: BTreeMap<String, String>,
    pub row_key: Option<String>,
    /// Replaces the quote catalog when non-empty.
    pub columns: Vec<ColumnSpec>,
}

impl FileSettings {
    /// Loads `explicit`, or the default config file if it exists.
    pub fn load(explicit: Option<&Path>) -> Result<Self, CliError> {
        if let Some(path) = explicit {
            return Self::read(path);
        }
        match paths::config_file() {
            Some(path) if path.exists() => Self::read(&path),
            _ => {
                debug!("No config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    fn read(path: &Path) -> Result<Self, CliError> {
        let text = fs::read_to_string(path).map_err(|source| CliError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = toml::from_str(&text).map_err(|source| CliError::ParseConfig {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loaded config from {}", path.display());
        Ok(settings)
    }

    /// Applies the file values over the built-in defaults.
    pub fn grid_config(&self) -> GridConfig {
        let mut config = GridConfig::default();
        if let Some(endpoint) = &self.endpoint {
            config = config.with_endpoint(endpoint.clone());
        }
        match self.timeout_secs {
            Some(0) => config = config.without_timeout(),
            Some(secs) => config = config.with_timeout(Duration::from_secs(secs)),
            None => {}
        }
        if let Some(secs) = self.connect_timeout_secs {
            config = config.with_connect_timeout(Duration::from_secs(secs));
        }
        if let Some(size) = self.max_page_size {
            config = config.with_max_page_size(size);
        }
        if let Some(size) = self.default_page_size {
            config = config.with_default_page_size(size);
        }
        if let Some(enabled) = self.null_data_is_empty {
            config = config.with_null_data_is_empty(enabled);
        }
        if let Some(error_rows) = self.error_rows {
            config = config.with_error_rows(error_rows);
        }
        for (name, value) in &self.params {
            config = config.with_extra_param(name.clone(), value.clone());
        }
        config
    }

    /// Builds the column model, falling back to the quote catalog.
    pub fn column_model(&self) -> Result<ColumnModel, ColumnError> {
        let model = if self.columns.is_empty() {
            ColumnModel::quotes()
        } else {
            ColumnModel::new(self.columns.clone())?
        };
        match &self.row_key {
            Some(key) => model.with_row_key(key),
            None => Ok(model),
        }
    }
}
