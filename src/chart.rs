//! Bar chart of the three pollutant concentrations
//!
//! Charts are drawn with ratatui into an off-screen buffer. The client keeps
//! at most one instance alive through [`ChartSlot`].

use crate::classification::Pollutant;
use crate::models::AirQualityReading;
use crate::{AirCheckError, Result};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Block, Widget},
};
use tracing::debug;

pub const MIN_WIDTH: u16 = 24;
pub const MIN_HEIGHT: u16 = 6;

const TITLE: &str = "Concentração (μg/m3)";
const BAR_GAP: u16 = 2;
// bar heights are relative to the tallest bar, which is drawn at this height
const BAR_RESOLUTION: u64 = 10_000;

/// What to draw: one bar per pollutant
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub title: &'static str,
    pub bars: Vec<BarSpec>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarSpec {
    pub label: &'static str,
    pub value: f64,
    pub color: Color,
}

/// Fixed, distinct color of each pollutant bar
#[must_use]
pub fn bar_color(pollutant: Pollutant) -> Color {
    match pollutant {
        Pollutant::Pm25 => Color::Rgb(255, 99, 132),
        Pollutant::No2 => Color::Rgb(54, 162, 235),
        Pollutant::O3 => Color::Rgb(255, 206, 86),
    }
}

impl ChartSpec {
    #[must_use]
    pub fn from_reading(reading: &AirQualityReading) -> Self {
        let bars = Pollutant::ALL
            .iter()
            .map(|&pollutant| BarSpec {
                label: pollutant.label(),
                value: reading.concentration(pollutant),
                color: bar_color(pollutant),
            })
            .collect();
        Self { title: TITLE, bars }
    }
}

fn drawable(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Bar height on a `0..=BAR_RESOLUTION` scale where `top` is the largest value
fn scaled(value: f64, top: f64) -> u64 {
    let value = drawable(value);
    if top <= 0.0 {
        return 0;
    }
    ((value / top).min(1.0) * BAR_RESOLUTION as f64).round() as u64
}

/// A rendered chart
#[derive(Debug, Clone)]
pub struct BarChartInstance {
    spec: ChartSpec,
    buffer: Buffer,
}

impl BarChartInstance {
    /// Draw `spec` into a `width` x `height` cell area
    pub fn render(spec: ChartSpec, width: u16, height: u16) -> Result<Self> {
        if width < MIN_WIDTH || height < MIN_HEIGHT {
            return Err(AirCheckError::chart(format!(
                "Drawing area {width}x{height} is smaller than {MIN_WIDTH}x{MIN_HEIGHT}"
            )));
        }
        if spec.bars.is_empty() {
            return Err(AirCheckError::chart("Nothing to draw"));
        }

        let bar_count = spec.bars.len() as u16;
        let inner_width = width.saturating_sub(2);
        let bar_width = (inner_width.saturating_sub(BAR_GAP * (bar_count - 1)) / bar_count).max(1);

        // axis always starts at zero; top follows the largest bar
        let top = spec
            .bars
            .iter()
            .map(|bar| drawable(bar.value))
            .fold(0.0, f64::max);

        let bars: Vec<Bar> = spec
            .bars
            .iter()
            .map(|bar| {
                Bar::default()
                    .value(scaled(bar.value, top))
                    .text_value(format!("{}", bar.value))
                    .label(Line::from(bar.label))
                    .style(Style::default().fg(bar.color))
                    .value_style(Style::default().fg(Color::Black).bg(bar.color))
            })
            .collect();

        let area = Rect::new(0, 0, width, height);
        let mut buffer = Buffer::empty(area);
        BarChart::default()
            .block(Block::bordered().title(spec.title))
            .data(BarGroup::default().bars(&bars))
            .bar_width(bar_width)
            .bar_gap(BAR_GAP)
            .max(BAR_RESOLUTION)
            .render(area, &mut buffer);

        Ok(Self { spec, buffer })
    }

    #[must_use]
    pub fn spec(&self) -> &ChartSpec {
        &self.spec
    }

    #[must_use]
    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    /// Plain-text rows of the drawing, trailing blanks removed
    #[must_use]
    pub fn to_lines(&self) -> Vec<String> {
        let area = self.buffer.area;
        (area.top()..area.bottom())
            .map(|y| {
                let row: String = (area.left()..area.right())
                    .map(|x| self.buffer.cell((x, y)).map_or(" ", |cell| cell.symbol()))
                    .collect();
                row.trim_end().to_string()
            })
            .collect()
    }
}

/// Owner of the single live chart
#[derive(Debug, Default)]
pub struct ChartSlot {
    current: Option<BarChartInstance>,
    created: u64,
    disposed: u64,
}

impl ChartSlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `chart`, disposing the previous instance first
    pub fn replace(&mut self, chart: BarChartInstance) -> &BarChartInstance {
        self.clear();
        self.created += 1;
        debug!(generation = self.created, "Chart created");
        self.current.insert(chart)
    }

    /// Dispose the current instance, if any
    pub fn clear(&mut self) {
        if let Some(old) = self.current.take() {
            self.disposed += 1;
            debug!(generation = self.created, "Chart disposed");
            drop(old);
        }
    }

    #[must_use]
    pub fn current(&self) -> Option<&BarChartInstance> {
        self.current.as_ref()
    }

    /// Instances created and not yet disposed
    #[must_use]
    pub fn live_instances(&self) -> u64 {
        self.created - self.disposed
    }

    #[must_use]
    pub fn created(&self) -> u64 {
        self.created
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PollutantReading;

    fn reading(pm25: f64, no2: f64, o3: f64) -> AirQualityReading {
        let p = |concentration| PollutantReading {
            concentration,
            aqi: None,
        };
        AirQualityReading {
            overall_aqi: 50.0,
            pm25: p(pm25),
            no2: p(no2),
            o3: p(o3),
        }
    }

    #[test]
    fn test_spec_from_reading() {
        let spec = ChartSpec::from_reading(&reading(40.0, 50.0, 90.0));
        let labels: Vec<&str> = spec.bars.iter().map(|b| b.label).collect();
        assert_eq!(labels, vec!["PM2.5", "NO2", "O3"]);
        assert_eq!(spec.bars[2].value, 90.0);

        let colors: Vec<Color> = spec.bars.iter().map(|b| b.color).collect();
        assert_ne!(colors[0], colors[1]);
        assert_ne!(colors[1], colors[2]);
        assert_ne!(colors[0], colors[2]);
    }

    #[test]
    fn test_render_draws_labels_and_title() {
        let spec = ChartSpec::from_reading(&reading(40.0, 50.0, 90.0));
        let chart = BarChartInstance::render(spec, 48, 14).unwrap();
        let lines = chart.to_lines();

        assert_eq!(lines.len(), 14);
        assert!(lines[0].contains("Concentração"));
        let text = lines.join("\n");
        assert!(text.contains("PM2.5"));
        assert!(text.contains("NO2"));
        assert!(text.contains("O3"));
    }

    #[test]
    fn test_render_rejects_tiny_area() {
        let spec = ChartSpec::from_reading(&reading(1.0, 2.0, 3.0));
        let err = BarChartInstance::render(spec, 10, 3).unwrap_err();
        assert!(matches!(err, AirCheckError::Chart { .. }));
    }

    #[test]
    fn test_render_handles_all_zero_and_negative() {
        let spec = ChartSpec::from_reading(&reading(0.0, -4.0, 0.0));
        assert!(BarChartInstance::render(spec, 30, 8).is_ok());
        assert_eq!(scaled(-4.0, 10.0), 0);
        assert_eq!(scaled(5.0, 0.0), 0);
        assert_eq!(scaled(2.5, 10.0), 2_500);
        assert_eq!(scaled(10.0, 10.0), BAR_RESOLUTION);
    }

    #[test]
    fn test_render_handles_huge_concentrations() {
        let body = r#"{"overall_aqi": 500, "PM2.5": {"concentration": 1e17},
            "NO2": {"concentration": 5e16}, "O3": {"concentration": 1}}"#;
        let reading = AirQualityReading::from_json(body).unwrap();
        let chart = BarChartInstance::render(ChartSpec::from_reading(&reading), 48, 14).unwrap();

        assert_eq!(chart.spec().bars[0].value, 1e17);
        assert!(chart.to_lines().join("\n").contains("PM2.5"));
    }

    #[test]
    fn test_render_handles_largest_finite_value() {
        let spec = ChartSpec::from_reading(&reading(f64::MAX, f64::MAX / 2.0, 1.0));
        assert!(BarChartInstance::render(spec, 48, 14).is_ok());
    }

    #[test]
    fn test_slot_keeps_one_live_instance() {
        let mut slot = ChartSlot::new();
        assert!(slot.current().is_none());

        for i in 0..5 {
            let spec = ChartSpec::from_reading(&reading(f64::from(i), 1.0, 1.0));
            slot.replace(BarChartInstance::render(spec, 30, 8).unwrap());
            assert_eq!(slot.live_instances(), 1);
        }
        assert_eq!(slot.created(), 5);
        assert_eq!(slot.current().unwrap().spec().bars[0].value, 4.0);

        slot.clear();
        assert_eq!(slot.live_instances(), 0);
        assert!(slot.current().is_none());

        // clearing an empty slot is a no-op
        slot.clear();
        assert_eq!(slot.live_instances(), 0);
    }
}
