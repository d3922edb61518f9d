//! Month grids for the calendar popup.
//!
//! A grid is always made of whole weeks starting on the configured first day
//! of the week, so it includes the tail of the previous month and the head of
//! the next one. Cells are fully materialized so a renderer can index them
//! by row and column.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::consts::{DAYS_PER_WEEK, MAX_YEAR, MIN_YEAR, MONTH_NAMES, WEEKDAY_SHORT_NAMES};
use crate::{CalendarDate, DateError, FieldConfig, Result, is_available, prelude::*};

const MONTHS_PER_YEAR: i64 = 12;

/// First column of the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    #[display(fmt = "Sunday")]
    Sunday,
    #[display(fmt = "Monday")]
    Monday,
}

impl WeekStart {
    pub const fn weekday(self) -> Weekday {
        match self {
            Self::Sunday => Weekday::Sun,
            Self::Monday => Weekday::Mon,
        }
    }

    /// Column (0-6) that `day` occupies in a grid starting on `self`.
    pub fn column_of(self, day: Weekday) -> usize {
        let first = self.weekday().num_days_from_sunday();
        let this = day.num_days_from_sunday();
        ((this + 7 - first) % 7) as usize
    }
}

/// One day in a month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CalendarCell {
    pub date: CalendarDate,
    /// False for the leading/trailing days borrowed from adjacent months.
    pub in_current_month: bool,
}

/// A grid cell with everything a renderer needs to style it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DayCell {
    pub date: CalendarDate,
    pub in_current_month: bool,
    pub is_today: bool,
    pub is_selected: bool,
    pub is_weekend: bool,
    /// Not selectable under the field's availability rules.
    pub is_disabled: bool,
}

/// A displayable month: title, column headers and annotated cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarView {
    pub year: u32,
    pub month: u32,
    pub title: String,
    pub weekday_headers: [&'static str; DAYS_PER_WEEK],
    pub cells: Vec<DayCell>,
}

impl CalendarView {
    pub fn weeks(&self) -> impl Iterator<Item = &[DayCell]> {
        self.cells.chunks(DAYS_PER_WEEK)
    }

    /// Cell at `row`, `col`, if the grid has that many rows.
    pub fn cell(&self, row: usize, col: usize) -> Option<&DayCell> {
        if col >= DAYS_PER_WEEK {
            return None;
        }
        self.cells.get(row * DAYS_PER_WEEK + col)
    }
}

/// Builds the grid for `month` of `year`.
///
/// Starts on the most recent `week_start` on or before the 1st and stops on
/// the day before the first `week_start` after the month's last day, so the
/// length is a multiple of 7.
///
/// # Errors
/// Returns an error for an invalid month, or when the padding days would fall
/// outside years 1-9999.
pub fn generate_month(year: u32, month: u32, week_start: WeekStart) -> Result<Vec<CalendarCell>> {
    let first = CalendarDate::first_of_month(year, month)?;
    let last = CalendarDate::last_of_month(year, month)?;
    let start_day = week_start.weekday();

    let mut current = first;
    while current.weekday() != start_day {
        current = current
            .pred()
            .ok_or(DateError::InvalidYear(u32::from(MIN_YEAR) - 1))?;
    }

    let mut cells = Vec::with_capacity(6 * DAYS_PER_WEEK);
    while current <= last || current.weekday() != start_day {
        cells.push(CalendarCell {
            date: current,
            in_current_month: current.same_month(year, month),
        });
        current = current
            .succ()
            .ok_or(DateError::InvalidYear(u32::from(MAX_YEAR) + 1))?;
    }
    Ok(cells)
}

/// Shifts (year, month) by `delta` months.
///
/// Months outside 1-12 roll over (13 is January of the next year, 0 is
/// December of the previous one). The result is clamped to years 1-9999.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn navigate_month(year: u32, month: u32, delta: i32) -> (u32, u32) {
    let index = i64::from(year) * MONTHS_PER_YEAR + i64::from(month) - 1 + i64::from(delta);
    let lowest = i64::from(MIN_YEAR) * MONTHS_PER_YEAR;
    let highest = i64::from(MAX_YEAR) * MONTHS_PER_YEAR + (MONTHS_PER_YEAR - 1);
    let index = index.clamp(lowest, highest);
    (
        (index / MONTHS_PER_YEAR) as u32,
        (index % MONTHS_PER_YEAR + 1) as u32,
    )
}

/// Shifts (year, month) by `delta` years, keeping the month.
pub fn navigate_year(year: u32, month: u32, delta: i32) -> (u32, u32) {
    navigate_month(year, month, delta.saturating_mul(12))
}

/// Short weekday names in column order.
pub fn weekday_headers(week_start: WeekStart) -> [&'static str; DAYS_PER_WEEK] {
    let offset = week_start.weekday().num_days_from_sunday() as usize;
    std::array::from_fn(|col| WEEKDAY_SHORT_NAMES[(col + offset) % DAYS_PER_WEEK])
}

/// "January 2025"
pub fn month_title(year: u32, month: u32) -> String {
    let name = MONTH_NAMES.get(month as usize).copied().unwrap_or_default();
    format!("{name} {year}")
}

/// Annotated grid for rendering.
///
/// # Errors
/// Same as [`generate_month`].
pub fn calendar_view(
    year: u32,
    month: u32,
    config: &FieldConfig,
    selected: Option<CalendarDate>,
    today: Option<CalendarDate>,
) -> Result<CalendarView> {
    let cells = generate_month(year, month, config.week_start)?
        .into_iter()
        .map(|cell| DayCell {
            date: cell.date,
            in_current_month: cell.in_current_month,
            is_today: today == Some(cell.date),
            is_selected: selected == Some(cell.date),
            is_weekend: cell.date.is_weekend(),
            is_disabled: !is_available(cell.date, config),
        })
        .collect();

    Ok(CalendarView {
        year,
        month,
        title: month_title(year, month),
        weekday_headers: weekday_headers(config.week_start),
        cells,
    })
}
