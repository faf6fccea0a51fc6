//! duochrome - two-color e-paper dashboard
//!
//! Lays a calendar and weather dashboard out on a pair of draw recorders
//! (black and accent), ships the recorded command streams, and replays
//! them onto an ink bitmap on the device side.

pub mod config;
pub mod constants;
pub mod dashboard;
pub mod device;
pub mod error;

// Re-export main types for convenience
pub use config::DashboardConfig;
pub use dashboard::{
    hardcoded_events, render_dashboard, CalEvent, CalendarViewModel, DashboardLayout,
    WeatherViewModel,
};
pub use device::replay_frame;
pub use error::{DashboardError, DashboardResult};
