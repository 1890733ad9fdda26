//! Service configuration
//!
//! Built from command-line arguments (with environment fallbacks) and
//! validated once at startup.

use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, NaiveTime, Utc};

use crate::error::{HouseError, HouseResult};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// When the duty rotation tick fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickSchedule {
    /// Once a day at the given UTC time
    Daily { at: NaiveTime },
    /// At a fixed interval, starting one interval from now
    Every(Duration),
}

impl Default for TickSchedule {
    fn default() -> Self {
        TickSchedule::Daily { at: NaiveTime::MIN }
    }
}

impl TickSchedule {
    /// Time to wait from `now` until the next tick
    pub fn delay_until_next(&self, now: DateTime<Utc>) -> Duration {
        match self {
            TickSchedule::Every(interval) => *interval,
            TickSchedule::Daily { at } => {
                let today = now.date_naive().and_time(*at).and_utc();
                let next = if today > now {
                    today
                } else {
                    today + chrono::Duration::days(1)
                };
                (next - now).to_std().unwrap_or(Duration::ZERO)
            }
        }
    }
}

/// Validated runtime configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    /// Directory for the JSON snapshot; `None` keeps everything in memory
    pub data_dir: Option<PathBuf>,
    pub log_level: String,
    pub schedule: TickSchedule,
    /// Run a single rotation tick and exit
    pub run_once: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            log_level: "info".to_string(),
            schedule: TickSchedule::default(),
            run_once: false,
        }
    }
}

impl ServiceConfig {
    /// Validate raw settings into a configuration
    ///
    /// `tick_every_secs` takes precedence over `tick_at` when both are given.
    pub fn from_parts(
        data_dir: Option<PathBuf>,
        log_level: &str,
        tick_at: &str,
        tick_every_secs: Option<u64>,
        run_once: bool,
    ) -> HouseResult<Self> {
        let log_level = log_level.trim().to_lowercase();
        if !LOG_LEVELS.contains(&log_level.as_str()) {
            return Err(HouseError::config(
                "log_level",
                format!("expected one of {}, got '{log_level}'", LOG_LEVELS.join(", ")),
            ));
        }

        let schedule = match tick_every_secs {
            Some(0) => {
                return Err(HouseError::config("tick_every_secs", "interval must be at least one second"));
            }
            Some(secs) => TickSchedule::Every(Duration::from_secs(secs)),
            None => {
                let at = NaiveTime::parse_from_str(tick_at.trim(), "%H:%M").map_err(|e| {
                    HouseError::config("tick_at", format!("expected HH:MM, got '{tick_at}': {e}"))
                })?;
                TickSchedule::Daily { at }
            }
        };

        Ok(Self {
            data_dir,
            log_level,
            schedule,
            run_once,
        })
    }
}
