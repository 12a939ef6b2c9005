//! Configuration management for the NWT Climate Explorer
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with NWT_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::map::MapSettings;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Input data files
    pub data: DataConfig,

    /// Base map configuration
    pub map: MapConfig,

    /// Analytics configuration
    #[serde(default)]
    pub analytics: AnalyticsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,

    /// Prefix the app is mounted under, e.g. `/tools/nwt/`
    pub path_prefix: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataConfig {
    /// Long-form climate CSV files, concatenated at load
    pub climate_files: Vec<String>,

    /// Territory-wide long-form CSV files, without a location column
    #[serde(default)]
    pub domain_files: Vec<String>,

    /// CSV of location names and coordinates
    pub locations_file: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MapConfig {
    /// Tile provider access token
    pub access_token: Option<String>,

    pub style: String,
    pub zoom: f64,
    pub center_lat: f64,
    pub center_lon: f64,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AnalyticsConfig {
    /// Site analytics tracking id, exposed to the UI when set
    pub tracking_id: Option<String>,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("NWT_ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let defaults = MapSettings::default();

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 8080)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.path_prefix", "/")?
            .set_default(
                "data.climate_files",
                vec![
                    "data/tas_pr_nwt_decadal_mean_historical_melted.csv",
                    "data/tas_pr_nwt_decadal_mean_rcp45_melted.csv",
                    "data/tas_pr_nwt_decadal_mean_rcp60_melted.csv",
                    "data/tas_pr_nwt_decadal_mean_rcp85_melted.csv",
                ],
            )?
            .set_default(
                "data.domain_files",
                vec!["data/tas_pr_fulldomain_decadal_mean_melted.csv"],
            )?
            .set_default("data.locations_file", "data/nwt_point_locations.csv")?
            .set_default("map.style", defaults.style)?
            .set_default("map.zoom", defaults.zoom)?
            .set_default("map.center_lat", defaults.center_lat)?
            .set_default("map.center_lon", defaults.center_lon)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (NWT_ prefix)
            .add_source(
                Environment::with_prefix("NWT")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("data.climate_files")
                    .with_list_parse_key("data.domain_files")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Path prefix with a leading and no trailing `/`; `/` for the root
    pub fn path_prefix(&self) -> String {
        normalize_prefix(&self.server.path_prefix)
    }

    pub fn map_settings(&self) -> MapSettings {
        MapSettings {
            style: self.map.style.clone(),
            zoom: self.map.zoom,
            center_lat: self.map.center_lat,
            center_lon: self.map.center_lon,
            access_token: self.map.access_token.clone(),
        }
    }
}

fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", trimmed)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "0.0.0.0".to_string(),
            path_prefix: "/".to_string(),
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        let defaults = MapSettings::default();
        Self {
            access_token: None,
            style: defaults.style,
            zoom: defaults.zoom,
            center_lat: defaults.center_lat,
            center_lon: defaults.center_lon,
        }
    }
}
