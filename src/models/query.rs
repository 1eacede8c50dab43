//! City query model

use crate::{AirCheckError, Result};
use std::fmt;

/// A trimmed, non-empty city name. Lives for one query cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityQuery {
    city: String,
}

impl CityQuery {
    /// Validate raw user input
    pub fn parse(input: &str) -> Result<Self> {
        let city = input.trim();
        if city.is_empty() {
            return Err(AirCheckError::validation("City name cannot be empty"));
        }
        Ok(Self {
            city: city.to_string(),
        })
    }

    #[must_use]
    pub fn city(&self) -> &str {
        &self.city
    }

    /// Percent-encoded form for the `city` query parameter
    #[must_use]
    pub fn encoded(&self) -> String {
        urlencoding::encode(&self.city).into_owned()
    }
}

impl fmt::Display for CityQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.city)
    }
}
