//! Text codec for dates and times.
//!
//! Formatting always produces the canonical form: zero-padded day and month,
//! a four-digit year, and (when time is included) a single space followed by
//! `hh:mm AM` or `HH:mm`. Parsing is more lenient about padding and
//! surrounding whitespace but never about calendar validity.

use crate::consts::{
    DASH_SEPARATOR, DATE_SEPARATORS, DATE_TIME_SEPARATOR, SLASH_SEPARATOR, TIME_SEPARATOR,
};
use crate::{CalendarDate, DateError, FieldConfig, Period, Result, TimeFormat, TimeOfDay, prelude::*};
use serde::{Deserialize, Serialize};

/// Component order of a date string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize)]
pub enum DateFormat {
    #[default]
    #[serde(rename = "MM/DD/YYYY")]
    #[display(fmt = "MM/DD/YYYY")]
    Mdy,
    #[serde(rename = "DD/MM/YYYY")]
    #[display(fmt = "DD/MM/YYYY")]
    Dmy,
    #[serde(rename = "YYYY-MM-DD")]
    #[display(fmt = "YYYY-MM-DD")]
    Ymd,
}

impl DateFormat {
    /// Separator written between components.
    pub const fn separator(self) -> char {
        match self {
            Self::Mdy | Self::Dmy => SLASH_SEPARATOR,
            Self::Ymd => DASH_SEPARATOR,
        }
    }

    /// Orders three parsed tokens into (year, month, day).
    const fn arrange(self, first: u32, second: u32, third: u32) -> (u32, u32, u32) {
        match self {
            Self::Mdy => (third, first, second),
            Self::Dmy => (third, second, first),
            Self::Ymd => (first, second, third),
        }
    }
}

/// A successfully parsed field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParsedValue {
    pub date: CalendarDate,
    /// `None` when the text carried no time segment.
    pub time: Option<TimeOfDay>,
}

/// Outcome of [`parse_combined`]: both parts, or the reason for rejection.
pub type ParseResult = Result<ParsedValue>;

/// Renders `date` (and `time`, when the field includes one) canonically.
pub fn format(date: CalendarDate, config: &FieldConfig, time: Option<TimeOfDay>) -> String {
    let mut out = format_date(date, config.date_format);
    if let (true, Some(time)) = (config.includes_time, time) {
        out.push(DATE_TIME_SEPARATOR);
        out.push_str(&format_time(time, config.time_format));
    }
    out
}

pub fn format_date(date: CalendarDate, date_format: DateFormat) -> String {
    let (year, month, day) = date.components();
    let sep = date_format.separator();
    match date_format {
        DateFormat::Mdy => format!("{month:02}{sep}{day:02}{sep}{year:04}"),
        DateFormat::Dmy => format!("{day:02}{sep}{month:02}{sep}{year:04}"),
        DateFormat::Ymd => format!("{year:04}{sep}{month:02}{sep}{day:02}"),
    }
}

/// Renders `time` on the given clock, converting notation first if needed.
pub fn format_time(time: TimeOfDay, time_format: TimeFormat) -> String {
    let time = time.to_format(time_format);
    match time.period() {
        Some(period) => format!("{:02}{TIME_SEPARATOR}{:02} {period}", time.hour(), time.minute()),
        None => format!("{:02}{TIME_SEPARATOR}{:02}", time.hour(), time.minute()),
    }
}

/// Parses a date in the configured format.
///
/// # Errors
/// `InvalidFormat` unless the text is three numeric tokens joined by `/` or
/// `-`; `InvalidYear`/`InvalidMonth`/`InvalidDay` when the numbers do not name
/// a real date.
pub fn parse_date(text: &str, config: &FieldConfig) -> Result<CalendarDate> {
    parse_date_as(text, config.date_format)
}

/// Parses a date with an explicit component order.
///
/// The separator is `/` if the text contains one, otherwise `-`, regardless
/// of which separator the format writes.
///
/// # Errors
/// Same as [`parse_date`].
pub fn parse_date_as(text: &str, date_format: DateFormat) -> Result<CalendarDate> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(DateError::InvalidFormat("Empty date string".to_owned()));
    }

    let separator = DATE_SEPARATORS
        .into_iter()
        .find(|sep| trimmed.contains(*sep))
        .ok_or_else(|| DateError::InvalidFormat(format!("No date separator in '{trimmed}'")))?;

    let mut tokens = trimmed.split(separator);
    let (Some(first), Some(second), Some(third), None) =
        (tokens.next(), tokens.next(), tokens.next(), tokens.next())
    else {
        return Err(DateError::InvalidFormat(format!(
            "Expected three '{separator}'-separated parts: '{trimmed}'"
        )));
    };

    let (year, month, day) = date_format.arrange(
        parse_number(first)?,
        parse_number(second)?,
        parse_number(third)?,
    );
    CalendarDate::new(year, month, day)
}

/// Parses a time in the configured notation.
///
/// # Errors
/// `InvalidFormat` when the text is not `H:MM` (plus `AM`/`PM` on a 12-hour
/// clock, nothing on a 24-hour clock); `InvalidHour`/`InvalidMinute` when the
/// numbers fall outside the clock's bounds.
pub fn parse_time(text: &str, config: &FieldConfig) -> Result<TimeOfDay> {
    parse_time_as(text, config.time_format)
}

/// Parses a time with an explicit notation.
///
/// # Errors
/// Same as [`parse_time`].
pub fn parse_time_as(text: &str, time_format: TimeFormat) -> Result<TimeOfDay> {
    let trimmed = text.trim();
    let marker_at = trimmed.find(|c: char| c.is_ascii_alphabetic());

    match (time_format, marker_at) {
        (TimeFormat::H12, Some(idx)) => {
            let period = Period::parse(&trimmed[idx..]).ok_or_else(|| {
                DateError::InvalidFormat(format!("Expected AM or PM in '{trimmed}'"))
            })?;
            let (hour, minute) = parse_clock(trimmed[..idx].trim_end())?;
            TimeOfDay::new_12h(hour, minute, period)
        }
        (TimeFormat::H12, None) => Err(DateError::InvalidFormat(format!(
            "Missing AM/PM in '{trimmed}'"
        ))),
        (TimeFormat::H24, None) => {
            let (hour, minute) = parse_clock(trimmed)?;
            TimeOfDay::new_24h(hour, minute)
        }
        (TimeFormat::H24, Some(_)) => Err(DateError::InvalidFormat(format!(
            "Unexpected period marker in 24-hour time '{trimmed}'"
        ))),
    }
}

/// Parses a full field value: a date, then optionally a space and a time.
///
/// A missing time segment is not an error; the time is simply unset. Trailing
/// text on a date-only field is rejected.
///
/// # Errors
/// Whatever [`parse_date`] or [`parse_time`] reports for the segments.
pub fn parse_combined(text: &str, config: &FieldConfig) -> ParseResult {
    let trimmed = text.trim();
    let (date_text, time_text) = match trimmed.split_once(DATE_TIME_SEPARATOR) {
        Some((date, rest)) => (date, rest.trim()),
        None => (trimmed, ""),
    };

    let result = parse_date(date_text, config).and_then(|date| {
        let time = match (time_text.is_empty(), config.includes_time) {
            (true, _) => None,
            (false, true) => Some(parse_time(time_text, config)?),
            (false, false) => {
                return Err(DateError::InvalidFormat(format!(
                    "Unexpected text after date: '{time_text}'"
                )));
            }
        };
        Ok(ParsedValue { date, time })
    });

    if let Err(e) = &result {
        tracing::trace!(input = trimmed, error = %e, "Rejected field value");
    }
    result
}

/// Hint text for an empty field.
pub fn placeholder(config: &FieldConfig) -> String {
    if let Some(placeholder) = &config.placeholder {
        return placeholder.clone();
    }
    let mut out = config.date_format.to_string().to_lowercase();
    if config.includes_time {
        out.push_str(match config.time_format {
            TimeFormat::H12 => " hh:mm aa",
            TimeFormat::H24 => " hh:mm",
        });
    }
    out
}

/// Whether the date segment of `text` writes its year with four digits.
///
/// Lets a caller tell "01/15/202" (still being typed) from a finished value.
pub(crate) fn has_full_year(text: &str, date_format: DateFormat) -> bool {
    let date_text = text
        .trim()
        .split(DATE_TIME_SEPARATOR)
        .next()
        .unwrap_or_default();
    let Some(separator) = DATE_SEPARATORS
        .into_iter()
        .find(|sep| date_text.contains(*sep))
    else {
        return false;
    };
    let mut tokens = date_text.split(separator);
    let year = match date_format {
        DateFormat::Ymd => tokens.next(),
        DateFormat::Mdy | DateFormat::Dmy => tokens.nth(2),
    };
    year.is_some_and(|token| token.trim().len() == 4)
}

fn parse_number(token: &str) -> Result<u32> {
    let token = token.trim();
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DateError::InvalidFormat(format!("Not a number: '{token}'")));
    }
    // All digits, so the only possible failure is overflow; saturate and let
    // range validation reject it.
    Ok(token.parse().unwrap_or(u32::MAX))
}

/// Splits `H:MM` / `HH:MM` into numbers.
fn parse_clock(text: &str) -> Result<(u8, u8)> {
    let malformed = || DateError::InvalidFormat(format!("Expected H:MM, found '{text}'"));
    let (hour, minute) = text.split_once(TIME_SEPARATOR).ok_or_else(malformed)?;

    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !(1..=2).contains(&hour.len()) || minute.len() != 2 || !all_digits(hour) || !all_digits(minute)
    {
        return Err(malformed());
    }
    let hour = hour.parse().map_err(|_| malformed())?;
    let minute = minute.parse().map_err(|_| malformed())?;
    Ok((hour, minute))
}
