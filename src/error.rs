//! Error types for the date field engine.
//!
//! Every failure is recoverable: the coordinator turns a [`DateError`] into a
//! validity state and a user-facing message via [`ErrorKind`].

use crate::{CalendarDate, TimeFormat, prelude::*};

/// The fixed set of failure categories surfaced to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ErrorKind {
    /// Text does not match the expected token/separator pattern.
    #[display(fmt = "invalid format")]
    InvalidFormat,
    /// Syntactically fine, but not a real date or time.
    #[display(fmt = "out of range")]
    OutOfRange,
    /// A real date that the availability rules exclude.
    #[display(fmt = "unavailable")]
    Unavailable,
    /// Required field committed while empty.
    #[display(fmt = "required")]
    RequiredMissing,
}

impl ErrorKind {
    /// User-visible validation message for this kind.
    pub const fn message(self) -> &'static str {
        match self {
            Self::InvalidFormat => "Invalid date format",
            Self::OutOfRange => "Date is out of range",
            Self::Unavailable => "This date is not available",
            Self::RequiredMissing => "This field is required",
        }
    }
}

/// Why a date was rejected by the availability rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Restriction {
    #[display(fmt = "before the minimum date")]
    BeforeMin,
    #[display(fmt = "after the maximum date")]
    AfterMax,
    #[display(fmt = "explicitly disabled")]
    Disabled,
    #[display(fmt = "not in the list of enabled dates")]
    NotEnabled,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateError {
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Invalid year: {0} (must be 1-9999)")]
    InvalidYear(u32),

    #[error("Invalid month: {0} (must be 1-12)")]
    InvalidMonth(u32),

    #[error("Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { year: u32, month: u32, day: u32 },

    #[error("Invalid hour {hour} for a {format} clock")]
    InvalidHour { hour: u32, format: TimeFormat },

    #[error("Invalid minute: {0} (must be 0-59)")]
    InvalidMinute(u32),

    #[error("Minute {minute} is not a multiple of the {step}-minute step")]
    MinuteStep { minute: u8, step: u8 },

    #[error("AM/PM is not used on a 24-hour clock")]
    PeriodUnused,

    #[error("Date {date} is not available: {reason}")]
    Unavailable {
        date: CalendarDate,
        reason: Restriction,
    },

    #[error("A value is required")]
    RequiredMissing,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl DateError {
    /// Category shown to the user.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidFormat(_) | Self::PeriodUnused | Self::InvalidConfig(_) => {
                ErrorKind::InvalidFormat
            }
            Self::InvalidYear(_)
            | Self::InvalidMonth(_)
            | Self::InvalidDay { .. }
            | Self::InvalidHour { .. }
            | Self::InvalidMinute(_)
            | Self::MinuteStep { .. } => ErrorKind::OutOfRange,
            Self::Unavailable { .. } => ErrorKind::Unavailable,
            Self::RequiredMissing => ErrorKind::RequiredMissing,
        }
    }

    /// Shorthand for `self.kind().message()`.
    pub const fn message(&self) -> &'static str {
        self.kind().message()
    }
}

/// Result type alias for date field operations.
pub type Result<T, E = DateError> = std::result::Result<T, E>;
