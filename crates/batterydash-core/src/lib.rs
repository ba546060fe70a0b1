//! # BatteryDash Core Library
//!
//! Core functionality for the BatteryDash battery telemetry dashboard.

//!
//! This library provides:
//! - The telemetry snapshot model and its derived quantities
//! - Chart models (rolling power line, component doughnut, hourly bars)
//! - Field rendering onto an abstract rendering surface
//! - Telemetry sources (HTTP endpoint and built-in demo simulator)
//! - The fixed-interval poll loop
//!
//! ## Example
//!
//! ```rust,ignore
//! use batterydash_core::prelude::*;
//! use std::time::Duration;
//! use tokio_util::sync::CancellationToken;
//!
//! let source = HttpSource::new("http://127.0.0.1:5000/api/battery-data");
//! let mut dashboard = Dashboard::bootstrap(MemorySurface::new());
//! let cancel = CancellationToken::new();
//! let mut outcomes = spawn_poller(source, Duration::from_millis(2000), cancel.clone());
//!
//! while let Some(outcome) = outcomes.recv().await {
//!     dashboard.handle(outcome, chrono::Local::now().naive_local());
//! }
//! ```

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod chart;
pub mod config;
pub mod dashboard;
pub mod demo;
pub mod error;
pub mod fields;
pub mod poll;
pub mod source;
pub mod surface;
pub mod telemetry;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::chart::{Chart, ChartKind, Dataset, Legend};
    pub use crate::config::DashboardConfig;
    pub use crate::dashboard::Dashboard;
    pub use crate::demo::DemoSource;
    pub use crate::error::{ConfigError, FetchError};
    pub use crate::fields::Field;
    pub use crate::poll::{spawn_poller, PollOutcome};
    pub use crate::source::{HttpSource, TelemetrySource};
    pub use crate::surface::{MemorySurface, Surface};
    pub use crate::telemetry::Snapshot;
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
