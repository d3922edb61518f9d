/// Earliest supported year
pub const MIN_YEAR: u16 = 1;
/// Latest supported year; canonical text always writes four year digits
pub const MAX_YEAR: u16 = 9999;

/// Separator used by the month-first and day-first formats
pub const SLASH_SEPARATOR: char = '/';
/// Separator used by the year-first (ISO) format
pub const DASH_SEPARATOR: char = '-';
/// Separators recognized when parsing, in priority order
pub const DATE_SEPARATORS: [char; 2] = [SLASH_SEPARATOR, DASH_SEPARATOR];

/// Separator between the date and time segments of a combined value
pub const DATE_TIME_SEPARATOR: char = ' ';
/// Separator between hour and minute
pub const TIME_SEPARATOR: char = ':';

/// Hours on a 12-hour clock face
pub const HOURS_12: u8 = 12;
/// Hours in a day
pub const HOURS_PER_DAY: u8 = 24;
/// Minutes in an hour
pub const MINUTES_PER_HOUR: u8 = 60;

/// Minute step used when the configuration does not name one
pub const DEFAULT_MINUTE_STEP: u8 = 1;

/// Hour used when no default time is configured or it fails to parse (midnight).
/// Rendered as `00:00` on a 24-hour clock.
pub const FALLBACK_HOUR_24: u8 = 0;
/// Same instant as [`FALLBACK_HOUR_24`] on a 12-hour clock: `12:00 AM`.
pub const FALLBACK_HOUR_12: u8 = 12;
/// Minute of the fallback time
pub const FALLBACK_MINUTE: u8 = 0;

/// Days in a calendar week
pub const DAYS_PER_WEEK: usize = 7;

/// Month names used for calendar titles (index 0 unused)
pub const MONTH_NAMES: [&str; 13] = [
    "",
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Short weekday names starting from Sunday
pub const WEEKDAY_SHORT_NAMES: [&str; DAYS_PER_WEEK] =
    ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
