//! Data models for the `AirCheck` client
//!
//! - Query: the validated city name of one submission
//! - Reading: the parsed air quality payload

pub mod query;
pub mod reading;

pub use query::CityQuery;
pub use reading::{AirQualityReading, PollutantReading};
