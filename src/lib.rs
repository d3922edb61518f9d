//! Date and time engine for date-input widgets.
//!
//! Parses and formats dates in a configurable component order, with an
//! optional 12- or 24-hour time, decides which dates may be selected, builds
//! month grids for a calendar popup, and tracks a field's validity as the
//! user types and picks. Rendering is left to the host.

mod config;
mod consts;
mod date;
mod error;
mod field;
mod format;
mod grid;
mod policy;
mod prelude;
mod time;

pub use config::{FieldConfig, FieldOptions, QuickOption};
pub use consts::*;
pub use date::{CalendarDate, days_in_month, is_leap_year};
pub use error::{DateError, ErrorKind, Restriction, Result};
pub use field::{DateField, FieldState};
pub use format::{
    DateFormat, ParseResult, ParsedValue, format, format_date, format_time, parse_combined,
    parse_date, parse_date_as, parse_time, parse_time_as, placeholder,
};
pub use grid::{
    CalendarCell, CalendarView, DayCell, WeekStart, calendar_view, generate_month, month_title,
    navigate_month, navigate_year, weekday_headers,
};
pub use policy::{DateBounds, check_available, is_available};
pub use time::{
    Period, TimeFormat, TimeOfDay, check_minute_step, default_time, enumerate_hours,
    enumerate_minutes, enumerate_periods, set_hour, set_minute, set_period,
};
