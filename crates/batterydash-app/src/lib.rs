//! BatteryDash terminal dashboard
//!
//! Renders the battery telemetry dashboard in the terminal and keeps it fresh
//! by polling the telemetry endpoint.
//!
//! # Architecture
//!
//! - [`app`] - Application state and the main event loop
//! - [`ui`] - Layout of the dashboard screen
//! - [`widgets`] - Chart, gauge and field widgets
//! - [`logging`] - File-backed tracing setup

pub mod app;
pub mod logging;
pub mod ui;
pub mod widgets;

/// Build identifier stamped by build.rs
pub const BUILD_ID: &str = env!("BATTERYDASH_BUILD_ID");
