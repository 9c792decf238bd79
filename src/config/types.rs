//! Configuration types for the payroll engine.
//!
//! These structures are deserialized from the YAML files in a
//! configuration directory.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// One hour in milliseconds.
const HOUR_MILLIS: i64 = 60 * 60 * 1000;

/// Overtime submission rules from `overtime.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeConfig {
    /// Maximum total overtime a user may submit within one calendar day.
    pub max_duration_per_day_millis: i64,
}

impl Default for OvertimeConfig {
    fn default() -> Self {
        Self {
            max_duration_per_day_millis: 3 * HOUR_MILLIS,
        }
    }
}

/// Pro-rate parameters from `payroll.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollConfig {
    /// Number of working days a monthly salary is spread over.
    pub days_per_month_prorate: i64,
    /// Paid working time per day; longer attendance is clamped to this.
    pub max_working_millis_per_day: i64,
}

impl Default for PayrollConfig {
    fn default() -> Self {
        Self {
            days_per_month_prorate: 22,
            max_working_millis_per_day: 8 * HOUR_MILLIS,
        }
    }
}

/// The complete engine configuration.
///
/// # Example
///
/// ```
/// use payroll_engine::config::EngineConfig;
///
/// let config = EngineConfig::default();
/// assert_eq!(config.daily_overtime_cap_millis(), 10_800_000);
/// assert_eq!(config.days_per_month_prorate(), 22);
/// assert_eq!(config.max_working_millis_per_day(), 28_800_000);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Overtime rules.
    overtime: OvertimeConfig,
    /// Pro-rate parameters.
    payroll: PayrollConfig,
}

impl EngineConfig {
    /// Creates a configuration from its sections, rejecting non-positive values.
    pub fn new(overtime: OvertimeConfig, payroll: PayrollConfig) -> EngineResult<Self> {
        let config = Self { overtime, payroll };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> EngineResult<()> {
        let checks = [
            (
                "overtime.max_duration_per_day_millis",
                self.overtime.max_duration_per_day_millis,
            ),
            (
                "payroll.days_per_month_prorate",
                self.payroll.days_per_month_prorate,
            ),
            (
                "payroll.max_working_millis_per_day",
                self.payroll.max_working_millis_per_day,
            ),
        ];
        for (field, value) in checks {
            if value <= 0 {
                return Err(EngineError::ConfigInvalid {
                    field: field.to_string(),
                    message: format!("must be greater than zero, got {}", value),
                });
            }
        }
        Ok(())
    }

    /// Returns the overtime section.
    pub fn overtime(&self) -> &OvertimeConfig {
        &self.overtime
    }

    /// Returns the payroll section.
    pub fn payroll(&self) -> &PayrollConfig {
        &self.payroll
    }

    /// Maximum overtime per user per calendar day, in milliseconds.
    pub fn daily_overtime_cap_millis(&self) -> i64 {
        self.overtime.max_duration_per_day_millis
    }

    /// Working days per month used for the pro-rate.
    pub fn days_per_month_prorate(&self) -> i64 {
        self.payroll.days_per_month_prorate
    }

    /// Maximum paid working time per day, in milliseconds.
    pub fn max_working_millis_per_day(&self) -> i64 {
        self.payroll.max_working_millis_per_day
    }
}
