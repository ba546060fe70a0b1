//! Dashboard state
//!
//! Owns the rendering surface and the three charts for the lifetime of the
//! program. Every snapshot goes through [`Dashboard::apply`]: fields first,
//! then charts.

use chrono::{NaiveDateTime, Timelike};
use tracing::{debug, warn};

use crate::chart::{self, Chart, COMPONENT_WEIGHTS};
use crate::fields;
use crate::poll::PollOutcome;
use crate::surface::Surface;
use crate::telemetry::Snapshot;

/// Everything the dashboard draws
pub struct Dashboard<S: Surface> {
    surface: S,
    power: Chart,
    component: Chart,
    hourly: Chart,
    applied: u64,
    failed: u64,
    last_error: Option<String>,
}

impl<S: Surface> Dashboard<S> {
    /// Build the three charts with their seed data and bind them to `surface`
    pub fn bootstrap(surface: S) -> Self {
        Self {
            surface,
            power: Chart::power(),
            component: Chart::component(),
            hourly: Chart::hourly(),
            applied: 0,
            failed: 0,
            last_error: None,
        }
    }

    /// Consume one poll outcome.
    ///
    /// A successful fetch is rendered; a failed one is logged and leaves
    /// every field and chart as it was.
    pub fn handle(&mut self, outcome: PollOutcome, now: NaiveDateTime) {
        match outcome.result {
            Ok(snapshot) => self.apply(&snapshot, now),
            Err(e) => {
                warn!(tick = outcome.tick, "Error fetching data: {}", e);
                self.failed += 1;
                self.last_error = Some(e.to_string());
            }
        }
    }

    /// Render a snapshot onto the fields and charts
    pub fn apply(&mut self, snap: &Snapshot, now: NaiveDateTime) {
        fields::render_fields(&mut self.surface, snap, now);
        self.update_charts(snap, now);
        self.applied += 1;
        self.last_error = None;
        debug!(applied = self.applied, "snapshot rendered");
    }

    fn update_charts(&mut self, snap: &Snapshot, now: NaiveDateTime) {
        if let Some(kw) = snap.instantaneous_power_kw() {
            self.power.push_rolling(now.format("%H:%M").to_string(), kw);
            self.power.update();
        }

        let Some(consumption) = snap.power_consumption else {
            return;
        };

        self.component.replace_values(
            COMPONENT_WEIGHTS
                .iter()
                .map(|(_, weight)| consumption * weight)
                .collect(),
        );
        self.component.update();

        let hour = now.hour();
        if chart::is_bucket_hour(hour)
            && self.hourly.set_value(chart::hourly_bucket(hour), consumption)
        {
            self.hourly.update();
        }
    }

    /// Rendering surface
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Rolling power chart
    pub fn power_chart(&self) -> &Chart {
        &self.power
    }

    /// Component breakdown chart
    pub fn component_chart(&self) -> &Chart {
        &self.component
    }

    /// Hourly energy chart
    pub fn hourly_chart(&self) -> &Chart {
        &self.hourly
    }

    /// Number of snapshots rendered so far
    pub fn applied_count(&self) -> u64 {
        self.applied
    }

    /// Number of failed polls so far
    pub fn failed_count(&self) -> u64 {
        self.failed
    }

    /// Message of the most recent failure, cleared by the next success
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}
