//! Per-field configuration.
//!
//! [`FieldConfig`] is the typed, validated form every engine function reads.
//! [`FieldOptions`] mirrors the external options object (camelCase keys,
//! dates as strings in the field's own format) and converts into a
//! `FieldConfig` through `TryFrom`, which is where malformed dates are
//! rejected.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_MINUTE_STEP, MAX_YEAR, MINUTES_PER_HOUR, MIN_YEAR};
use crate::{CalendarDate, DateBounds, DateError, DateFormat, Result, TimeFormat, WeekStart, format};

/// A preset shown above the calendar, e.g. "Tomorrow".
///
/// `value` must already be written in the field's date format; it is parsed
/// as-is, never reformatted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuickOption {
    pub label: String,
    pub value: String,
}

impl QuickOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Validated configuration of one date field.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "FieldOptions")]
pub struct FieldConfig {
    pub date_format: DateFormat,
    pub time_format: TimeFormat,
    /// Whether values carry a time after the date.
    pub includes_time: bool,
    pub bounds: DateBounds,
    pub disabled_dates: BTreeSet<CalendarDate>,
    /// When non-empty, the only selectable dates.
    pub enabled_dates_only: BTreeSet<CalendarDate>,
    pub minute_step: u8,
    pub week_start: WeekStart,
    /// Picker time used before the user picks one, in `time_format`.
    pub default_time: Option<String>,
    /// Run a commit when the field loses focus.
    pub validate_on_blur: bool,
    pub required: bool,
    pub allow_manual_input: bool,
    pub read_only: bool,
    pub disabled: bool,
    /// Inclusive years the calendar may navigate to.
    pub year_range: Option<(u32, u32)>,
    pub quick_options: Vec<QuickOption>,
    pub placeholder: Option<String>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            date_format: DateFormat::default(),
            time_format: TimeFormat::default(),
            includes_time: false,
            bounds: DateBounds::default(),
            disabled_dates: BTreeSet::new(),
            enabled_dates_only: BTreeSet::new(),
            minute_step: DEFAULT_MINUTE_STEP,
            week_start: WeekStart::default(),
            default_time: None,
            validate_on_blur: true,
            required: false,
            allow_manual_input: true,
            read_only: false,
            disabled: false,
            year_range: None,
            quick_options: Vec::new(),
            placeholder: None,
        }
    }
}

impl FieldConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn min_date(&self) -> Option<CalendarDate> {
        self.bounds.min()
    }

    pub const fn max_date(&self) -> Option<CalendarDate> {
        self.bounds.max()
    }

    /// True when user events should be ignored.
    pub const fn is_locked(&self) -> bool {
        self.read_only || self.disabled
    }

    pub fn with_date_format(mut self, date_format: DateFormat) -> Self {
        self.date_format = date_format;
        self
    }

    /// Turns on the time segment with the given clock.
    pub fn with_time(mut self, time_format: TimeFormat) -> Self {
        self.includes_time = true;
        self.time_format = time_format;
        self
    }

    /// Sets the minimum selectable date.
    ///
    /// # Errors
    /// `InvalidConfig` if it falls after the configured maximum.
    pub fn with_min_date(self, min: CalendarDate) -> Result<Self> {
        let max = self.max_date();
        self.with_date_range(Some(min), max)
    }

    /// Sets the maximum selectable date.
    ///
    /// # Errors
    /// `InvalidConfig` if it falls before the configured minimum.
    pub fn with_max_date(self, max: CalendarDate) -> Result<Self> {
        let min = self.min_date();
        self.with_date_range(min, Some(max))
    }

    /// # Errors
    /// `InvalidConfig` if `min` is after `max`.
    pub fn with_date_range(
        mut self,
        min: Option<CalendarDate>,
        max: Option<CalendarDate>,
    ) -> Result<Self> {
        self.bounds = DateBounds::new(min, max)?;
        Ok(self)
    }

    pub fn with_disabled_dates(mut self, dates: impl IntoIterator<Item = CalendarDate>) -> Self {
        self.disabled_dates.extend(dates);
        self
    }

    pub fn with_enabled_dates_only(
        mut self,
        dates: impl IntoIterator<Item = CalendarDate>,
    ) -> Self {
        self.enabled_dates_only.extend(dates);
        self
    }

    pub fn with_minute_step(mut self, step: u8) -> Self {
        self.minute_step = step;
        self
    }

    pub fn with_week_start(mut self, week_start: WeekStart) -> Self {
        self.week_start = week_start;
        self
    }

    pub fn with_default_time(mut self, time: impl Into<String>) -> Self {
        self.default_time = Some(time.into());
        self
    }

    pub fn with_validate_on_blur(mut self, validate: bool) -> Self {
        self.validate_on_blur = validate;
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_manual_input(mut self, allow: bool) -> Self {
        self.allow_manual_input = allow;
        self
    }

    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Limits calendar navigation to years `first` through `last`.
    ///
    /// # Errors
    /// `InvalidConfig` unless `first <= last`, both within 1-9999.
    pub fn with_year_range(mut self, first: u32, last: u32) -> Result<Self> {
        check_year_range(first, last)?;
        self.year_range = Some((first, last));
        Ok(self)
    }

    pub fn with_quick_options(mut self, options: impl IntoIterator<Item = QuickOption>) -> Self {
        self.quick_options.extend(options);
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }
}

fn check_year_range(first: u32, last: u32) -> Result<()> {
    let supported = u32::from(MIN_YEAR)..=u32::from(MAX_YEAR);
    if first > last || !supported.contains(&first) || !supported.contains(&last) {
        return Err(DateError::InvalidConfig(format!(
            "yearRange [{first}, {last}] is not an ordered range within 1-9999"
        )));
    }
    Ok(())
}

/// External options object, as a host application would supply it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldOptions {
    pub date_format: DateFormat,
    pub time_format: TimeFormat,
    #[serde(alias = "showTime")]
    pub includes_time: bool,
    pub min_date: Option<String>,
    pub max_date: Option<String>,
    pub disabled_dates: Vec<String>,
    pub enabled_dates_only: Vec<String>,
    pub minute_step: u8,
    /// 0 for Sunday, 1 for Monday.
    pub first_day_of_week: u8,
    pub default_time: Option<String>,
    pub validate_on_blur: bool,
    pub required: bool,
    pub allow_manual_input: bool,
    pub read_only: bool,
    pub disabled: bool,
    pub year_range: Option<(u32, u32)>,
    pub quick_date_options: Vec<QuickOption>,
    pub placeholder: Option<String>,
}

impl Default for FieldOptions {
    fn default() -> Self {
        Self {
            date_format: DateFormat::default(),
            time_format: TimeFormat::default(),
            includes_time: false,
            min_date: None,
            max_date: None,
            disabled_dates: Vec::new(),
            enabled_dates_only: Vec::new(),
            minute_step: DEFAULT_MINUTE_STEP,
            first_day_of_week: 0,
            default_time: None,
            validate_on_blur: true,
            required: false,
            allow_manual_input: true,
            read_only: false,
            disabled: false,
            year_range: None,
            quick_date_options: Vec::new(),
            placeholder: None,
        }
    }
}

impl TryFrom<FieldOptions> for FieldConfig {
    type Error = DateError;

    fn try_from(options: FieldOptions) -> Result<Self> {
        let week_start = match options.first_day_of_week {
            0 => WeekStart::Sunday,
            1 => WeekStart::Monday,
            other => {
                return Err(DateError::InvalidConfig(format!(
                    "firstDayOfWeek must be 0 or 1, found {other}"
                )));
            }
        };

        let step = options.minute_step;
        if step == 0 || step > MINUTES_PER_HOUR || MINUTES_PER_HOUR % step != 0 {
            return Err(DateError::InvalidConfig(format!(
                "minuteStep must divide 60, found {step}"
            )));
        }

        if let Some((first, last)) = options.year_range {
            check_year_range(first, last)?;
        }

        let mut config = Self {
            date_format: options.date_format,
            time_format: options.time_format,
            includes_time: options.includes_time,
            minute_step: step,
            week_start,
            default_time: options.default_time,
            validate_on_blur: options.validate_on_blur,
            required: options.required,
            allow_manual_input: options.allow_manual_input,
            read_only: options.read_only,
            disabled: options.disabled,
            year_range: options.year_range,
            quick_options: options.quick_date_options,
            placeholder: options.placeholder,
            ..Self::default()
        };

        let parse = |name: &str, text: &str, config: &Self| {
            format::parse_date(text, config).map_err(|e| {
                DateError::InvalidConfig(format!("{name} '{text}' ({}): {e}", config.date_format))
            })
        };

        let min = options
            .min_date
            .as_deref()
            .map(|text| parse("minDate", text, &config))
            .transpose()?;
        let max = options
            .max_date
            .as_deref()
            .map(|text| parse("maxDate", text, &config))
            .transpose()?;
        config.bounds = DateBounds::new(min, max)?;

        config.disabled_dates = options
            .disabled_dates
            .iter()
            .map(|text| parse("disabledDates entry", text, &config))
            .collect::<Result<_>>()?;
        config.enabled_dates_only = options
            .enabled_dates_only
            .iter()
            .map(|text| parse("enabledDatesOnly entry", text, &config))
            .collect::<Result<_>>()?;

        tracing::debug!(
            date_format = %config.date_format,
            includes_time = config.includes_time,
            disabled = config.disabled_dates.len(),
            enabled_only = config.enabled_dates_only.len(),
            "Field configuration accepted"
        );
        Ok(config)
    }
}
