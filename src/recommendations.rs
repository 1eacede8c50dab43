//! Advice derived from a reading
//!
//! Order is fixed: the AQI band advisory (at most one), then PM2.5, NO2, O3.
//! An empty result collapses to the single good-air message.

use crate::classification::{Classification, Pollutant};
use crate::models::AirQualityReading;
use std::fmt;

/// AQI at or above which outdoor activity should be avoided
pub const AQI_DANGEROUS: f64 = 150.0;
/// AQI at or above which sensitive groups should reduce exposure
pub const AQI_SENSITIVE: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advisory {
    DangerousAir,
    SensitiveGroups,
    Pm25Mask,
    No2Traffic,
    O3Exercise,
    GoodAir,
}

impl Advisory {
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Advisory::DangerousAir => {
                "A qualidade do ar está perigosa. Evite atividades ao ar livre."
            }
            Advisory::SensitiveGroups => {
                "A qualidade do ar não está ideal. Grupos sensíveis devem reduzir a exposição."
            }
            Advisory::Pm25Mask => {
                "Devido aos altos níveis de PM2.5, considere usar máscara e fechar janelas."
            }
            Advisory::No2Traffic => {
                "Evite áreas de tráfego intenso por longos períodos devido ao NO2."
            }
            Advisory::O3Exercise => {
                "Em dias ensolarados, o Ozônio está alto. Evite exercícios extenuantes ao ar livre."
            }
            Advisory::GoodAir => "A qualidade do ar está boa. Aproveite o ar livre!",
        }
    }

    fn for_poor(pollutant: Pollutant) -> Self {
        match pollutant {
            Pollutant::Pm25 => Advisory::Pm25Mask,
            Pollutant::No2 => Advisory::No2Traffic,
            Pollutant::O3 => Advisory::O3Exercise,
        }
    }
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Ordered, never-empty list of advisories
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationSet {
    advisories: Vec<Advisory>,
}

impl RecommendationSet {
    #[must_use]
    pub fn advisories(&self) -> &[Advisory] {
        &self.advisories
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.advisories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.advisories.is_empty()
    }

    pub fn messages(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.advisories.iter().map(Advisory::message)
    }
}

#[must_use]
pub fn generate(reading: &AirQualityReading) -> RecommendationSet {
    let mut advisories = Vec::new();

    if reading.overall_aqi >= AQI_DANGEROUS {
        advisories.push(Advisory::DangerousAir);
    } else if reading.overall_aqi >= AQI_SENSITIVE {
        advisories.push(Advisory::SensitiveGroups);
    }

    for pollutant in Pollutant::ALL {
        if pollutant.classify(reading.concentration(pollutant)) == Classification::Poor {
            advisories.push(Advisory::for_poor(pollutant));
        }
    }

    if advisories.is_empty() {
        advisories.push(Advisory::GoodAir);
    }

    RecommendationSet { advisories }
}
