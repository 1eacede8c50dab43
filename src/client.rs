//! Query orchestration
//!
//! One call to [`AirQualityClient::query`] is one cycle: validate, fetch,
//! dispatch on status, render the report and chart. Cycles may overlap; each
//! takes a sequence number and only the latest one may touch the view.

use crate::api::AirQualitySource;
use crate::chart::{BarChartInstance, ChartSlot, ChartSpec};
use crate::config::ChartConfig;
use crate::models::reading::ErrorBody;
use crate::models::{AirQualityReading, CityQuery};
use crate::summary::Summary;
use crate::view::View;
use crate::{AirCheckError, Result};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, error, info, instrument};

/// How a cycle ended
#[derive(Debug)]
pub enum QueryOutcome {
    /// Report and chart are on screen
    Displayed(Summary),
    /// The error's user message is on screen
    Failed(AirCheckError),
    /// A newer cycle started before this one finished; nothing was shown
    Superseded,
}

impl QueryOutcome {
    #[must_use]
    pub fn is_displayed(&self) -> bool {
        matches!(self, QueryOutcome::Displayed(_))
    }
}

struct Screen<V> {
    view: V,
    chart: ChartSlot,
}

pub struct AirQualityClient<S: AirQualitySource, V: View> {
    source: S,
    screen: Mutex<Screen<V>>,
    latest: AtomicU64,
    chart_width: u16,
    chart_height: u16,
}

/// Hides the loading indicator when the cycle ends, on every path
struct LoadingGuard<'a, S: AirQualitySource, V: View> {
    client: &'a AirQualityClient<S, V>,
    seq: u64,
}

impl<S: AirQualitySource, V: View> Drop for LoadingGuard<'_, S, V> {
    fn drop(&mut self) {
        // a newer cycle owns the indicator now
        if self.client.is_current(self.seq) {
            self.client.screen().view.hide_loading();
        }
    }
}

impl<S: AirQualitySource, V: View> AirQualityClient<S, V> {
    pub fn new(source: S, view: V) -> Self {
        let chart = ChartConfig::default();
        Self {
            source,
            screen: Mutex::new(Screen {
                view,
                chart: ChartSlot::new(),
            }),
            latest: AtomicU64::new(0),
            chart_width: chart.width,
            chart_height: chart.height,
        }
    }

    #[must_use]
    pub fn with_chart_size(mut self, width: u16, height: u16) -> Self {
        self.chart_width = width;
        self.chart_height = height;
        self
    }

    /// Read the view state
    pub fn with_view<R>(&self, f: impl FnOnce(&V) -> R) -> R {
        f(&self.screen().view)
    }

    /// Charts created and not yet disposed
    #[must_use]
    pub fn live_charts(&self) -> u64 {
        self.screen().chart.live_instances()
    }

    fn screen(&self) -> MutexGuard<'_, Screen<V>> {
        self.screen.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_current(&self, seq: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == seq
    }

    /// Run one full cycle for the raw user input
    #[instrument(skip(self))]
    pub async fn query(&self, input: &str) -> QueryOutcome {
        let seq = self.latest.fetch_add(1, Ordering::SeqCst) + 1;

        let query = match CityQuery::parse(input) {
            Ok(query) => query,
            Err(err) => {
                debug!("Rejected empty city input");
                let mut screen = self.screen();
                screen.view.hide_loading();
                screen.view.show_result(&err.user_message());
                screen.view.hide_chart();
                return QueryOutcome::Failed(err);
            }
        };

        {
            let mut screen = self.screen();
            screen.view.clear_result();
            screen.view.show_loading();
            screen.view.hide_chart();
        }
        let _loading = LoadingGuard { client: self, seq };

        let result = self.fetch_summary(&query).await;

        let mut screen = self.screen();
        if !self.is_current(seq) {
            debug!(seq, "Discarding superseded response for '{}'", query);
            return QueryOutcome::Superseded;
        }

        let result = result.and_then(|summary| {
            self.present(&mut screen, &summary)?;
            Ok(summary)
        });

        match result {
            Ok(summary) => {
                info!("Displayed air quality for '{}'", query);
                QueryOutcome::Displayed(summary)
            }
            Err(err) => {
                if err.is_diagnostic_only() {
                    error!("Air quality request for '{}' failed: {}", query, err);
                } else {
                    info!("Air quality request for '{}' rejected: {}", query, err);
                }
                screen.view.show_result(&err.user_message());
                QueryOutcome::Failed(err)
            }
        }
    }

    async fn fetch_summary(&self, query: &CityQuery) -> Result<Summary> {
        let response = self.source.fetch(query).await?;

        match response.status {
            200 => {
                let reading = AirQualityReading::from_json(&response.body)?;
                Ok(Summary::new(query, reading))
            }
            400 => {
                let body = ErrorBody::from_json(&response.body)?;
                Err(AirCheckError::client(body.error))
            }
            404 => Err(AirCheckError::not_found(query.city())),
            status => Err(AirCheckError::server(status)),
        }
    }

    fn present(&self, screen: &mut Screen<V>, summary: &Summary) -> Result<()> {
        screen.chart.clear();
        let chart = BarChartInstance::render(
            ChartSpec::from_reading(&summary.reading),
            self.chart_width,
            self.chart_height,
        )?;

        screen.view.show_result(&summary.render_text());
        let chart = screen.chart.replace(chart);
        screen.view.show_chart(chart);
        Ok(())
    }
}
