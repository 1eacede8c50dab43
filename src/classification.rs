//! Pollutant classification
//!
//! Each pollutant maps its concentration to a band through two ascending,
//! inclusive breakpoints. Values are used as received; no unit conversion.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The three pollutants shown in the report, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pollutant {
    Pm25,
    No2,
    O3,
}

/// Qualitative band of a concentration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classification {
    Good,
    Moderate,
    Poor,
}

/// Upper bounds (inclusive) of the GOOD and MODERATE bands
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub good: f64,
    pub moderate: f64,
}

pub const PM25_THRESHOLDS: Thresholds = Thresholds {
    good: 12.0,
    moderate: 35.4,
};

pub const NO2_THRESHOLDS: Thresholds = Thresholds {
    good: 100.0,
    moderate: 200.0,
};

pub const O3_THRESHOLDS: Thresholds = Thresholds {
    good: 120.0,
    moderate: 180.0,
};

impl Thresholds {
    #[must_use]
    pub fn classify(&self, concentration: f64) -> Classification {
        if concentration <= self.good {
            Classification::Good
        } else if concentration <= self.moderate {
            Classification::Moderate
        } else {
            Classification::Poor
        }
    }
}

#[must_use]
pub fn classify_pm25(concentration: f64) -> Classification {
    PM25_THRESHOLDS.classify(concentration)
}

#[must_use]
pub fn classify_no2(concentration: f64) -> Classification {
    NO2_THRESHOLDS.classify(concentration)
}

#[must_use]
pub fn classify_o3(concentration: f64) -> Classification {
    O3_THRESHOLDS.classify(concentration)
}

impl Pollutant {
    pub const ALL: [Pollutant; 3] = [Pollutant::Pm25, Pollutant::No2, Pollutant::O3];

    /// Short label, also the key in the JSON payload
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Pollutant::Pm25 => "PM2.5",
            Pollutant::No2 => "NO2",
            Pollutant::O3 => "O3",
        }
    }

    /// Full name shown in the report
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Pollutant::Pm25 => "Partículas finas",
            Pollutant::No2 => "Dióxido de Nitrogênio",
            Pollutant::O3 => "Ozônio ao nível do solo",
        }
    }

    /// Health note printed under the classification
    #[must_use]
    pub fn health_note(&self) -> &'static str {
        match self {
            Pollutant::Pm25 => {
                "Essas partículas penetram nos pulmões e podem afetar a saúde respiratória."
            }
            Pollutant::No2 => {
                "Gás comum em áreas urbanas com tráfego intenso. Pode causar irritações."
            }
            Pollutant::O3 => {
                "Em excesso, pode causar desconforto respiratório e afetar grupos sensíveis."
            }
        }
    }

    #[must_use]
    pub fn thresholds(&self) -> Thresholds {
        match self {
            Pollutant::Pm25 => PM25_THRESHOLDS,
            Pollutant::No2 => NO2_THRESHOLDS,
            Pollutant::O3 => O3_THRESHOLDS,
        }
    }

    #[must_use]
    pub fn classify(&self, concentration: f64) -> Classification {
        match self {
            Pollutant::Pm25 => classify_pm25(concentration),
            Pollutant::No2 => classify_no2(concentration),
            Pollutant::O3 => classify_o3(concentration),
        }
    }
}

impl fmt::Display for Pollutant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::Good => write!(f, "ÓTIMO"),
            Classification::Moderate => write!(f, "REGULAR"),
            Classification::Poor => write!(f, "RUIM"),
        }
    }
}
