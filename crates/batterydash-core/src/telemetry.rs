//! Telemetry Snapshot
//!
//! One polled battery reading as served by `GET /api/battery-data`, plus the
//! quantities the dashboard derives from it at render time.
//!
//! Every numeric field is optional on the wire. A missing or `null` field is
//! carried as `None` and shows up as a placeholder on screen; it never fails
//! the whole snapshot.

use serde::{Deserialize, Serialize};

/// Energy tariff applied to the consumption figure ($ per kWh)
pub const TARIFF_PER_KWH: f64 = 0.125;

/// Hours the tariff is projected over for the daily cost
pub const HOURS_PER_DAY: f64 = 24.0;

/// Multiplier used for the "peak power" readout
pub const PEAK_POWER_FACTOR: f64 = 2.0;

/// A single telemetry reading
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    /// Battery health (%)
    pub health: Option<f64>,
    /// Estimated remaining range (km)
    pub remaining_distance: Option<f64>,
    /// Pack temperature (°C)
    pub temperature: Option<f64>,
    /// Depth of discharge (%)
    pub dod: Option<f64>,
    /// Energy consumption (kWh)
    pub power_consumption: Option<f64>,
    /// Pack voltage (V)
    pub voltage: Option<f64>,
    /// Pack current (A)
    pub current: Option<f64>,
    /// Road inclination (degrees)
    pub inclination: Option<f64>,
    /// Vehicle load (kg)
    pub load: Option<f64>,
    /// Jerk (m/s³)
    pub jerk: Option<f64>,
    /// Charge/discharge rate as a multiple of capacity
    pub c_rate: Option<f64>,
    /// Server-side sample time, if the backend sends one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl Snapshot {
    /// Parse a snapshot from a JSON document
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// State of charge (%), the complement of depth of discharge
    pub fn state_of_charge(&self) -> Option<f64> {
        self.dod.map(|dod| 100.0 - dod)
    }

    /// Instantaneous power draw in kW
    pub fn instantaneous_power_kw(&self) -> Option<f64> {
        Some(self.voltage? * self.current? / 1000.0)
    }

    /// "Peak" power in kW.
    ///
    /// This is a fixed multiple of the instantaneous value, not a tracked
    /// historical maximum.
    pub fn peak_power_kw(&self) -> Option<f64> {
        self.instantaneous_power_kw().map(|kw| kw * PEAK_POWER_FACTOR)
    }

    /// Projected daily energy cost in dollars
    pub fn daily_cost(&self) -> Option<f64> {
        self.power_consumption
            .map(|kwh| kwh * TARIFF_PER_KWH * HOURS_PER_DAY)
    }
}
