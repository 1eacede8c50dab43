//! Output surfaces for the query cycle
//!
//! A [`View`] has a result area, a loading indicator and a chart area.

use crate::chart::BarChartInstance;
use std::io::Write;
use tracing::warn;

pub const LOADING_TEXT: &str = "Consultando a qualidade do ar...";

pub trait View: Send {
    /// Replace the result area with `text`
    fn show_result(&mut self, text: &str);
    fn clear_result(&mut self);
    fn show_loading(&mut self);
    fn hide_loading(&mut self);
    fn show_chart(&mut self, chart: &BarChartInstance);
    fn hide_chart(&mut self);
}

/// Prints to a writer, usually stdout.
///
/// Printed output cannot be taken back, so the hide operations only update
/// state; a hidden chart is simply never printed.
pub struct TerminalView<W: Write + Send> {
    out: W,
    loading: bool,
    chart_visible: bool,
}

impl<W: Write + Send> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            loading: false,
            chart_visible: false,
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn is_chart_visible(&self) -> bool {
        self.chart_visible
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_lines<'a>(&mut self, lines: impl IntoIterator<Item = &'a str>) {
        let result = lines
            .into_iter()
            .try_for_each(|line| writeln!(self.out, "{line}"))
            .and_then(|()| self.out.flush());
        if let Err(e) = result {
            warn!("Failed to write to terminal: {}", e);
        }
    }
}

impl<W: Write + Send> View for TerminalView<W> {
    fn show_result(&mut self, text: &str) {
        self.write_lines(text.lines());
    }

    fn clear_result(&mut self) {}

    fn show_loading(&mut self) {
        if !self.loading {
            self.write_lines([LOADING_TEXT]);
        }
        self.loading = true;
    }

    fn hide_loading(&mut self) {
        self.loading = false;
    }

    fn show_chart(&mut self, chart: &BarChartInstance) {
        let lines = chart.to_lines();
        self.write_lines(lines.iter().map(String::as_str));
        self.chart_visible = true;
    }

    fn hide_chart(&mut self) {
        self.chart_visible = false;
    }
}

/// Keeps the current state in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryView {
    result: String,
    loading: bool,
    chart_visible: bool,
    chart_lines: Vec<String>,
    loading_shown: usize,
    charts_shown: usize,
}

impl MemoryView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn result(&self) -> &str {
        &self.result
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn is_chart_visible(&self) -> bool {
        self.chart_visible
    }

    /// Rows of the last chart shown
    #[must_use]
    pub fn chart_lines(&self) -> &[String] {
        &self.chart_lines
    }

    /// How many times the loading indicator was raised
    #[must_use]
    pub fn loading_shown(&self) -> usize {
        self.loading_shown
    }

    #[must_use]
    pub fn charts_shown(&self) -> usize {
        self.charts_shown
    }
}

impl View for MemoryView {
    fn show_result(&mut self, text: &str) {
        self.result = text.to_string();
    }

    fn clear_result(&mut self) {
        self.result.clear();
    }

    fn show_loading(&mut self) {
        self.loading = true;
        self.loading_shown += 1;
    }

    fn hide_loading(&mut self) {
        self.loading = false;
    }

    fn show_chart(&mut self, chart: &BarChartInstance) {
        self.chart_lines = chart.to_lines();
        self.chart_visible = true;
        self.charts_shown += 1;
    }

    fn hide_chart(&mut self) {
        self.chart_visible = false;
    }
}
