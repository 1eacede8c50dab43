//! Textual report written to the result area

use crate::classification::{Classification, Pollutant};
use crate::models::{AirQualityReading, CityQuery};
use crate::recommendations::{self, RecommendationSet};
use std::fmt;

/// Classification of one pollutant within a report
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PollutantSummary {
    pub pollutant: Pollutant,
    pub concentration: f64,
    pub aqi: Option<f64>,
    pub classification: Classification,
}

/// Everything shown for a successful query
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub city: String,
    pub reading: AirQualityReading,
    pub pollutants: Vec<PollutantSummary>,
    pub recommendations: RecommendationSet,
}

impl Summary {
    #[must_use]
    pub fn new(query: &CityQuery, reading: AirQualityReading) -> Self {
        let pollutants = Pollutant::ALL
            .iter()
            .map(|&pollutant| {
                let entry = reading.pollutant(pollutant);
                PollutantSummary {
                    pollutant,
                    concentration: entry.concentration,
                    aqi: entry.aqi,
                    classification: pollutant.classify(entry.concentration),
                }
            })
            .collect();
        let recommendations = recommendations::generate(&reading);

        Self {
            city: query.city().to_string(),
            reading,
            pollutants,
            recommendations,
        }
    }

    #[must_use]
    pub fn classification_of(&self, pollutant: Pollutant) -> Option<Classification> {
        self.pollutants
            .iter()
            .find(|p| p.pollutant == pollutant)
            .map(|p| p.classification)
    }

    /// Render the report as plain text
    #[must_use]
    pub fn render_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Qualidade do ar em {}", self.city)?;
        writeln!(f)?;
        writeln!(
            f,
            "Índice Geral (AQI): {} — quanto menor, melhor.",
            self.reading.overall_aqi
        )?;

        for entry in &self.pollutants {
            writeln!(f)?;
            write!(
                f,
                "{} ({}): {} μg/m3",
                entry.pollutant.display_name(),
                entry.pollutant.label(),
                entry.concentration
            )?;
            if let Some(aqi) = entry.aqi {
                write!(f, " (AQI {aqi})")?;
            }
            writeln!(f)?;
            writeln!(f, "  Classificação: {}", entry.classification)?;
            writeln!(f, "  {}", entry.pollutant.health_note())?;
        }

        writeln!(f)?;
        writeln!(f, "Recomendações:")?;
        for message in self.recommendations.messages() {
            writeln!(f, "  - {message}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PollutantReading;

    fn sao_paulo() -> Summary {
        let reading = AirQualityReading {
            overall_aqi: 160.0,
            pm25: PollutantReading {
                concentration: 40.0,
                aqi: Some(112.0),
            },
            no2: PollutantReading {
                concentration: 50.0,
                aqi: None,
            },
            o3: PollutantReading {
                concentration: 90.0,
                aqi: None,
            },
        };
        Summary::new(&CityQuery::parse("São Paulo").unwrap(), reading)
    }

    #[test]
    fn test_classifications() {
        let summary = sao_paulo();
        assert_eq!(
            summary.classification_of(Pollutant::Pm25),
            Some(Classification::Poor)
        );
        assert_eq!(
            summary.classification_of(Pollutant::No2),
            Some(Classification::Good)
        );
        assert_eq!(
            summary.classification_of(Pollutant::O3),
            Some(Classification::Good)
        );
    }

    #[test]
    fn test_render_text_layout() {
        let text = sao_paulo().render_text();
        assert!(text.starts_with("Qualidade do ar em São Paulo"));
        assert!(text.contains("Índice Geral (AQI): 160 — quanto menor, melhor."));
        assert!(text.contains("Partículas finas (PM2.5): 40 μg/m3 (AQI 112)"));
        assert!(text.contains("Dióxido de Nitrogênio (NO2): 50 μg/m3\n"));
        assert!(text.contains("Classificação: RUIM"));

        let dangerous = text.find("perigosa").unwrap();
        let mask = text.find("máscara").unwrap();
        assert!(dangerous < mask);
    }

    #[test]
    fn test_display_matches_render_text() {
        let summary = sao_paulo();
        let shown = format!("{summary}");
        assert_eq!(shown, summary.render_text());
        assert!(shown.ends_with("\n"));
        assert_eq!(shown.matches("Classificação:").count(), 3);
    }

    #[test]
    fn test_fractional_values_are_kept() {
        let reading = AirQualityReading {
            overall_aqi: 42.0,
            pm25: PollutantReading {
                concentration: 12.5,
                aqi: None,
            },
            no2: PollutantReading {
                concentration: 3.25,
                aqi: None,
            },
            o3: PollutantReading {
                concentration: 0.0,
                aqi: None,
            },
        };
        let text = Summary::new(&CityQuery::parse("Recife").unwrap(), reading).render_text();
        assert!(text.contains("(PM2.5): 12.5 μg/m3"));
        assert!(text.contains("(NO2): 3.25 μg/m3"));
        assert!(text.contains("Aproveite o ar livre!"));
    }
}
