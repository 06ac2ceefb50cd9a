//! oee-chart: keeps one long-lived OEE time chart in sync with a host view.
//!
//! Interval records (OEE, availability, performance, quality) are normalized
//! into aligned series, the time-axis unit is picked from the data's span, and
//! a single engine-owned chart is mutated in place on every refresh.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartOptions, OeeChartController, UpdatePayload, ViewHook};
pub use error::{ChartError, ChartResult};
