//! Field Renderer
//!
//! Turns a [`Snapshot`] into the formatted strings shown in the dashboard's
//! labeled fields. Values are not range-checked; whatever the backend sends is
//! what gets displayed. Missing values render as [`MISSING`].

use chrono::NaiveDateTime;

use crate::surface::Surface;
use crate::telemetry::Snapshot;

/// Placeholder shown for a value the snapshot did not carry
pub const MISSING: &str = "--";

/// Element carrying the health indicator's fill proportion
pub const HEALTH_INDICATOR: &str = "health-circle";

/// Style property driving the health indicator
pub const HEALTH_PERCENT_PROPERTY: &str = "--health-percent";

/// Labeled output fields on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Battery health
    Health,
    /// Estimated remaining range
    RemainingDistance,
    /// Pack temperature
    Temperature,
    /// State of charge
    StateOfCharge,
    /// Energy used
    TotalUsed,
    /// Projected daily cost
    DailyCost,
    /// Instantaneous power
    CurrentPower,
    /// Peak power
    PeakPower,
    /// Road inclination
    Inclination,
    /// Vehicle load
    Load,
    /// Jerk
    Jerk,
    /// Charge/discharge rate
    CRate,
    /// Pack voltage
    Voltage,
    /// Pack current
    Current,
    /// Wall-clock time of the last render
    UpdateTime,
}

impl Field {
    /// All fields in display order
    pub fn all() -> &'static [Field] {
        &[
            Field::Health,
            Field::RemainingDistance,
            Field::Temperature,
            Field::StateOfCharge,
            Field::TotalUsed,
            Field::DailyCost,
            Field::CurrentPower,
            Field::PeakPower,
            Field::Inclination,
            Field::Load,
            Field::Jerk,
            Field::CRate,
            Field::Voltage,
            Field::Current,
            Field::UpdateTime,
        ]
    }

    /// Id of the on-screen element this field writes to
    pub fn element_id(&self) -> &'static str {
        match self {
            Field::Health => "health-value",
            Field::RemainingDistance => "remaining-distance",
            Field::Temperature => "temperature",
            Field::StateOfCharge => "soc",
            Field::TotalUsed => "total-used",
            Field::DailyCost => "daily-cost",
            Field::CurrentPower => "current-power",
            Field::PeakPower => "peak-power",
            Field::Inclination => "inclination",
            Field::Load => "load",
            Field::Jerk => "jerk",
            Field::CRate => "c-rate",
            Field::Voltage => "voltage",
            Field::Current => "current",
            Field::UpdateTime => "update-time",
        }
    }

    /// Human readable caption
    pub fn caption(&self) -> &'static str {
        match self {
            Field::Health => "Battery Health",
            Field::RemainingDistance => "Remaining Distance",
            Field::Temperature => "Temperature",
            Field::StateOfCharge => "State of Charge",
            Field::TotalUsed => "Total Used",
            Field::DailyCost => "Daily Cost",
            Field::CurrentPower => "Current Power",
            Field::PeakPower => "Peak Power",
            Field::Inclination => "Inclination",
            Field::Load => "Load",
            Field::Jerk => "Jerk",
            Field::CRate => "C-Rate",
            Field::Voltage => "Voltage",
            Field::Current => "Current",
            Field::UpdateTime => "Last Updated",
        }
    }

    /// Formatted text for this field
    pub fn format(&self, snap: &Snapshot, now: NaiveDateTime) -> String {
        match self {
            Field::Health => raw(snap.health, "%"),
            Field::RemainingDistance => raw(snap.remaining_distance, " km"),
            Field::Temperature => raw(snap.temperature, " °C"),
            Field::StateOfCharge => raw(snap.state_of_charge(), "%"),
            Field::TotalUsed => raw(snap.power_consumption, " kWh"),
            Field::DailyCost => snap
                .daily_cost()
                .map(|cost| format!("${}", to_fixed(cost, 2)))
                .unwrap_or_else(|| MISSING.to_string()),
            Field::CurrentPower => fixed1(snap.instantaneous_power_kw(), " kW"),
            Field::PeakPower => fixed1(snap.peak_power_kw(), " kW"),
            Field::Inclination => raw(snap.inclination, "°"),
            Field::Load => raw(snap.load, " kg"),
            Field::Jerk => raw(snap.jerk, " m/s³"),
            Field::CRate => raw(snap.c_rate, " C"),
            Field::Voltage => raw(snap.voltage, " V"),
            Field::Current => raw(snap.current, " A"),
            Field::UpdateTime => clock_time(now),
        }
    }
}

/// Local wall-clock time as shown in the "last updated" field
pub fn clock_time(now: NaiveDateTime) -> String {
    now.format("%H:%M:%S").to_string()
}

fn raw(value: Option<f64>, suffix: &str) -> String {
    match value {
        Some(v) => format!("{}{}", v, suffix),
        None => format!("{}{}", MISSING, suffix),
    }
}

fn fixed1(value: Option<f64>, suffix: &str) -> String {
    match value {
        Some(v) => format!("{}{}", to_fixed(v, 1), suffix),
        None => format!("{}{}", MISSING, suffix),
    }
}

/// Format `value` with exactly `digits` decimals.
///
/// Exact halves round away from zero (`32.25` becomes `32.3`), unlike
/// `{:.1}` which rounds them to even.
pub fn to_fixed(value: f64, digits: usize) -> String {
    let factor = 10f64.powi(digits as i32);
    let rounded = (value * factor).round() / factor;
    format!("{:.*}", digits, rounded)
}

/// Overwrite every field on `surface` from `snap`
pub fn render_fields<S: Surface + ?Sized>(surface: &mut S, snap: &Snapshot, now: NaiveDateTime) {
    for field in Field::all() {
        surface.set_text(field.element_id(), field.format(snap, now));
    }

    surface.set_style_property(
        HEALTH_INDICATOR,
        HEALTH_PERCENT_PROPERTY,
        raw(snap.health, "%"),
    );
}
