//! Configuration for the mariner-import batch importer.

use serde::Deserialize;

use mariner_core::RatingMethod;

use crate::error::Result;

/// Top-level importer configuration.
///
/// Loaded from `mariner.toml` `[import]` section or
/// `MARINER_IMPORT__` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportConfig {
    /// Directory holding the dataset files.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Rating method for ROUTE edges: balanced, distance_weighted,
    /// weather_weighted. Parsed once at startup; an unknown value aborts
    /// the run before any write.
    #[serde(default = "default_rating_method")]
    pub rating_method: String,

    /// Per-dataset file names inside `data_dir`.
    #[serde(default)]
    pub files: DatasetFiles,

    /// Log route-import progress every N rows.
    #[serde(default = "default_progress_every")]
    pub progress_every: usize,
}

/// Dataset file names, relative to the data directory.
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetFiles {
    #[serde(default = "default_companies")]
    pub companies: String,
    #[serde(default = "default_ships")]
    pub ships: String,
    #[serde(default = "default_ports")]
    pub ports: String,
    #[serde(default = "default_routes")]
    pub routes: String,
    #[serde(default = "default_cargo")]
    pub cargo: String,
    #[serde(default = "default_docking")]
    pub docking: String,
    #[serde(default = "default_visits")]
    pub visits: String,
}

impl ImportConfig {
    /// Load configuration from the `[import]` section of `<file_prefix>.toml`
    /// plus `MARINER_IMPORT__` environment overrides.
    ///
    /// An absent section falls back to defaults. A present but malformed
    /// section is an error; no defaults are substituted for invalid values.
    pub fn load(file_prefix: &str) -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::File::with_name(file_prefix).required(false))
            .add_source(
                config::Environment::with_prefix("MARINER_IMPORT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        match cfg.get::<ImportConfig>("import") {
            Ok(c) => Ok(c),
            Err(config::ConfigError::NotFound(_)) => Ok(ImportConfig::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Parse the configured rating method.
    ///
    /// An unknown value fails here, before anything is written; no default
    /// is substituted.
    pub fn parse_rating_method(&self) -> Result<RatingMethod> {
        Ok(self.rating_method.parse()?)
    }
}

fn default_data_dir() -> String {
    "./data".to_string()
}

fn default_rating_method() -> String {
    "balanced".to_string()
}

fn default_progress_every() -> usize {
    25
}

fn default_companies() -> String {
    "companies.csv".to_string()
}

fn default_ships() -> String {
    "ships.csv".to_string()
}

fn default_ports() -> String {
    "ports.csv".to_string()
}

fn default_routes() -> String {
    "routes.csv".to_string()
}

fn default_cargo() -> String {
    "cargo.csv".to_string()
}

fn default_docking() -> String {
    "docking.csv".to_string()
}

fn default_visits() -> String {
    "visits.csv".to_string()
}

impl Default for DatasetFiles {
    fn default() -> Self {
        Self {
            companies: default_companies(),
            ships: default_ships(),
            ports: default_ports(),
            routes: default_routes(),
            cargo: default_cargo(),
            docking: default_docking(),
            visits: default_visits(),
        }
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            rating_method: default_rating_method(),
            files: DatasetFiles::default(),
            progress_every: default_progress_every(),
        }
    }
}
