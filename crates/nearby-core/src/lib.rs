pub mod app_config;
pub mod config;
pub mod display;
pub mod geo;
pub mod places;
pub mod ranking;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use display::format_distance;
pub use geo::{haversine_distance_meters, Coordinate};
pub use places::{Category, ParseCategoryError, PlaceRecord, SearchQuery};
pub use ranking::{ParseSortKeyError, SortKey};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
