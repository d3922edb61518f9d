//! Time-of-day values and the time picker's pure update rules.
//!
//! A [`TimeOfDay`] is tied to the clock notation it was built for: 12-hour
//! values carry an [`Period`], 24-hour values never do. The free functions in
//! this module implement the picker: default time, hour/minute/period updates
//! and the option lists a dropdown renders.

use crate::consts::{
    FALLBACK_HOUR_12, FALLBACK_HOUR_24, FALLBACK_MINUTE, HOURS_12, HOURS_PER_DAY,
    MINUTES_PER_HOUR,
};
use crate::{DateError, FieldConfig, Result, format, prelude::*};
use serde::{Deserialize, Serialize};

/// Clock notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize)]
pub enum TimeFormat {
    /// `hh:mm AM`
    #[default]
    #[serde(rename = "12")]
    #[display(fmt = "12-hour")]
    H12,
    /// `HH:mm`
    #[serde(rename = "24")]
    #[display(fmt = "24-hour")]
    H24,
}

impl TimeFormat {
    pub const fn is_12_hour(self) -> bool {
        matches!(self, Self::H12)
    }

    /// Inclusive hour bounds for this notation.
    pub const fn hour_bounds(self) -> (u8, u8) {
        match self {
            Self::H12 => (1, HOURS_12),
            Self::H24 => (0, HOURS_PER_DAY - 1),
        }
    }
}

/// Half of the day on a 12-hour clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Period {
    #[display(fmt = "AM")]
    Am,
    #[display(fmt = "PM")]
    Pm,
}

impl Period {
    /// Case-insensitive `AM`/`PM`.
    pub fn parse(marker: &str) -> Option<Self> {
        if marker.eq_ignore_ascii_case("AM") {
            Some(Self::Am)
        } else if marker.eq_ignore_ascii_case("PM") {
            Some(Self::Pm)
        } else {
            None
        }
    }
}

/// An hour and minute, in either 12- or 24-hour notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
    period: Option<Period>,
}

impl TimeOfDay {
    /// Creates a 12-hour time.
    ///
    /// # Errors
    /// `InvalidHour` unless `hour` is 1-12, `InvalidMinute` unless `minute` is 0-59.
    pub fn new_12h(hour: u8, minute: u8, period: Period) -> Result<Self> {
        check_hour(hour, TimeFormat::H12)?;
        check_minute(minute)?;
        Ok(Self {
            hour,
            minute,
            period: Some(period),
        })
    }

    /// Creates a 24-hour time.
    ///
    /// # Errors
    /// `InvalidHour` unless `hour` is 0-23, `InvalidMinute` unless `minute` is 0-59.
    pub fn new_24h(hour: u8, minute: u8) -> Result<Self> {
        check_hour(hour, TimeFormat::H24)?;
        check_minute(minute)?;
        Ok(Self {
            hour,
            minute,
            period: None,
        })
    }

    /// Midnight in the given notation.
    pub const fn midnight(format: TimeFormat) -> Self {
        match format {
            TimeFormat::H12 => Self {
                hour: FALLBACK_HOUR_12,
                minute: FALLBACK_MINUTE,
                period: Some(Period::Am),
            },
            TimeFormat::H24 => Self {
                hour: FALLBACK_HOUR_24,
                minute: FALLBACK_MINUTE,
                period: None,
            },
        }
    }

    pub const fn hour(&self) -> u8 {
        self.hour
    }

    pub const fn minute(&self) -> u8 {
        self.minute
    }

    pub const fn period(&self) -> Option<Period> {
        self.period
    }

    /// Notation this value was built for.
    pub const fn format(&self) -> TimeFormat {
        if self.period.is_some() {
            TimeFormat::H12
        } else {
            TimeFormat::H24
        }
    }

    /// Hour on a 24-hour clock: 12 AM is 0, 12 PM is 12.
    pub const fn hour24(&self) -> u8 {
        match self.period {
            None => self.hour,
            Some(Period::Am) => self.hour % HOURS_12,
            Some(Period::Pm) => self.hour % HOURS_12 + HOURS_12,
        }
    }

    /// Minutes since midnight.
    pub const fn minutes_since_midnight(&self) -> u16 {
        self.hour24() as u16 * MINUTES_PER_HOUR as u16 + self.minute as u16
    }

    /// The same instant in another notation.
    pub const fn to_format(self, format: TimeFormat) -> Self {
        let hour24 = self.hour24();
        match format {
            TimeFormat::H24 => Self {
                hour: hour24,
                minute: self.minute,
                period: None,
            },
            TimeFormat::H12 => {
                let period = if hour24 < HOURS_12 {
                    Period::Am
                } else {
                    Period::Pm
                };
                let hour = match hour24 % HOURS_12 {
                    0 => HOURS_12,
                    h => h,
                };
                Self {
                    hour,
                    minute: self.minute,
                    period: Some(period),
                }
            }
        }
    }
}

impl std::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format::format_time(*self, self.format()))
    }
}

fn check_hour(hour: u8, format: TimeFormat) -> Result<()> {
    let (min, max) = format.hour_bounds();
    if (min..=max).contains(&hour) {
        Ok(())
    } else {
        Err(DateError::InvalidHour {
            hour: u32::from(hour),
            format,
        })
    }
}

fn check_minute(minute: u8) -> Result<()> {
    if minute < MINUTES_PER_HOUR {
        Ok(())
    } else {
        Err(DateError::InvalidMinute(u32::from(minute)))
    }
}

/// The picker's starting time: the configured default, or midnight.
///
/// A default whose minute the picker does not offer is treated as unparsable.
///
/// Midnight is `12:00 AM` on a 12-hour clock and `00:00` on a 24-hour clock.
pub fn default_time(config: &FieldConfig) -> TimeOfDay {
    let Some(text) = config.default_time.as_deref() else {
        return TimeOfDay::midnight(config.time_format);
    };
    let parsed = format::parse_time(text, config).and_then(|time| {
        check_minute_step(time, config)?;
        Ok(time)
    });
    match parsed {
        Ok(time) => time,
        Err(e) => {
            tracing::warn!(default_time = text, error = %e, "Unusable default time, using midnight");
            TimeOfDay::midnight(config.time_format)
        }
    }
}

/// Returns `time` with its hour replaced, in the configured notation.
///
/// # Errors
/// `InvalidHour` if `hour` is outside the configured clock's range. The
/// caller's `time` is untouched either way.
pub fn set_hour(time: TimeOfDay, hour: u8, config: &FieldConfig) -> Result<TimeOfDay> {
    let time = time.to_format(config.time_format);
    check_hour(hour, config.time_format)?;
    Ok(TimeOfDay { hour, ..time })
}

/// Returns `time` with its minute replaced.
///
/// # Errors
/// `InvalidMinute` past 59, `MinuteStep` when `minute` is not a multiple of
/// the configured step.
pub fn set_minute(time: TimeOfDay, minute: u8, config: &FieldConfig) -> Result<TimeOfDay> {
    check_minute(minute)?;
    let time = TimeOfDay {
        minute,
        ..time.to_format(config.time_format)
    };
    check_minute_step(time, config)?;
    Ok(time)
}

/// Checks that the minute of `time` is one the picker offers.
///
/// # Errors
/// `MinuteStep` when it is not a multiple of the configured step.
pub fn check_minute_step(time: TimeOfDay, config: &FieldConfig) -> Result<()> {
    let step = config.minute_step;
    if step == 0 || time.minute % step != 0 {
        return Err(DateError::MinuteStep {
            minute: time.minute,
            step,
        });
    }
    Ok(())
}

/// Returns `time` with its period replaced.
///
/// # Errors
/// `PeriodUnused` when the configured clock is 24-hour.
pub fn set_period(time: TimeOfDay, period: Period, config: &FieldConfig) -> Result<TimeOfDay> {
    if !config.time_format.is_12_hour() {
        return Err(DateError::PeriodUnused);
    }
    let time = time.to_format(TimeFormat::H12);
    Ok(TimeOfDay {
        period: Some(period),
        ..time
    })
}

/// Hours offered by the picker: 1-12 or 0-23.
pub fn enumerate_hours(config: &FieldConfig) -> Vec<u8> {
    let (min, max) = config.time_format.hour_bounds();
    (min..=max).collect()
}

/// Minutes offered by the picker: 0, step, 2*step, ... below 60.
pub fn enumerate_minutes(config: &FieldConfig) -> Vec<u8> {
    let step = usize::from(config.minute_step.max(1));
    (0..MINUTES_PER_HOUR).step_by(step).collect()
}

/// AM/PM choices, empty on a 24-hour clock.
pub fn enumerate_periods(config: &FieldConfig) -> Vec<Period> {
    if config.time_format.is_12_hour() {
        vec![Period::Am, Period::Pm]
    } else {
        Vec::new()
    }
}
