//! Headless driver for the pixel grid, used by the `pixelgrid` binary.

pub mod config;
pub mod reports;
pub mod session;

pub use config::ToolConfig;
pub use session::{Action, Session, SimulationReport, ToolError};
