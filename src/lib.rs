//! `AirCheck` - air quality lookup for a city
//!
//! This library queries an air quality endpoint, classifies the PM2.5, NO2
//! and O3 concentrations, derives advice and draws a bar chart of the three.

pub mod api;
pub mod chart;
pub mod cities;
pub mod classification;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod recommendations;
pub mod summary;
pub mod view;

// Re-export core types for public API
pub use api::{AirQualitySource, HttpAirQualitySource, RawResponse};
pub use chart::{BarChartInstance, ChartSlot, ChartSpec};
pub use classification::{Classification, Pollutant};
pub use client::{AirQualityClient, QueryOutcome};
pub use config::AirCheckConfig;
pub use error::AirCheckError;
pub use models::{AirQualityReading, CityQuery, PollutantReading};
pub use recommendations::{Advisory, RecommendationSet};
pub use summary::Summary;
pub use view::{MemoryView, TerminalView, View};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, AirCheckError>;
