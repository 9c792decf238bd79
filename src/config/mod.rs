//! Configuration loading and management for the payroll engine.
//!
//! The engine reads its business constants (daily overtime cap, pro-rate
//! days per month, maximum paid working time per day) from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/default").unwrap();
//! println!("Daily overtime cap: {}ms", loader.config().daily_overtime_cap_millis());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{EngineConfig, OvertimeConfig, PayrollConfig};
