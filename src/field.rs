//! The value coordinator behind one date input.
//!
//! [`DateField`] owns a single widget instance's state (raw text, validity,
//! selection, picker time and displayed month) and turns discrete UI events
//! into state transitions:
//!
//! ```text
//! Empty --input--> Typing --commit--> Valid | Invalid
//!                     ^                     |
//!                     +-------input---------+
//! ```
//!
//! Commits happen on blur (when `validate_on_blur` is set), on an explicit
//! [`DateField::commit`], and on every selection from the calendar, a quick
//! option or the time picker. Each successful commit stores the canonical
//! string and hands it to the change callback exactly once.
//!
//! # Example
//!
//! ```
//! use date_field::{DateField, DateFormat, FieldConfig, FieldState, TimeFormat};
//!
//! let config = FieldConfig::new()
//!     .with_date_format(DateFormat::Dmy)
//!     .with_time(TimeFormat::H24);
//! let mut field = DateField::new(config);
//!
//! field.input("25/12/2025 14:30");
//! assert_eq!(field.commit().unwrap().as_deref(), Some("25/12/2025 14:30"));
//! assert_eq!(field.state(), FieldState::Valid);
//! ```

use std::fmt;

use crate::consts::MIN_YEAR;
use crate::{
    CalendarDate, CalendarView, DateError, ErrorKind, FieldConfig, ParsedValue, Period,
    QuickOption, Result, TimeOfDay, check_available, format, grid, time,
};

type ChangeCallback = Box<dyn FnMut(&str)>;

/// Validity of the field's current text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldState {
    /// No text.
    Empty,
    /// Text entered but not yet validated.
    Typing,
    /// Last commit succeeded; the text is canonical.
    Valid,
    /// Last commit failed for the given reason.
    Invalid(ErrorKind),
}

/// State and event handling for one date (and optional time) input.
pub struct DateField {
    config: FieldConfig,
    text: String,
    state: FieldState,
    error: Option<DateError>,
    selected_date: Option<CalendarDate>,
    selected_time: Option<TimeOfDay>,
    picker_time: TimeOfDay,
    displayed: (u32, u32),
    touched: bool,
    on_change: Option<ChangeCallback>,
}

impl fmt::Debug for DateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DateField")
            .field("text", &self.text)
            .field("state", &self.state)
            .field("error", &self.error)
            .field("selected_date", &self.selected_date)
            .field("selected_time", &self.selected_time)
            .field("displayed", &self.displayed)
            .finish_non_exhaustive()
    }
}

impl DateField {
    /// Creates an empty field showing the current month.
    pub fn new(config: FieldConfig) -> Self {
        let displayed = CalendarDate::today()
            .map_or((u32::from(MIN_YEAR), 1), |d| (d.year(), d.month()));
        let picker_time = time::default_time(&config);
        let mut field = Self {
            config,
            text: String::new(),
            state: FieldState::Empty,
            error: None,
            selected_date: None,
            selected_time: None,
            picker_time,
            displayed,
            touched: false,
            on_change: None,
        };
        field.displayed = field.clamp_to_year_range(displayed);
        field
    }

    /// Creates a field holding an initial value, as [`DateField::set_value`] would.
    pub fn with_value(config: FieldConfig, value: &str) -> Self {
        let mut field = Self::new(config);
        field.set_value(value);
        field
    }

    /// Registers the external change callback.
    pub fn on_change(mut self, callback: impl FnMut(&str) + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    pub fn set_on_change(&mut self, callback: impl FnMut(&str) + 'static) {
        self.on_change = Some(Box::new(callback));
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub const fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub const fn state(&self) -> FieldState {
        self.state
    }

    pub const fn error(&self) -> Option<&DateError> {
        self.error.as_ref()
    }

    /// Message to show under the field, if the last commit failed.
    pub fn error_message(&self) -> Option<&'static str> {
        self.error.as_ref().map(DateError::message)
    }

    pub const fn is_valid(&self) -> bool {
        matches!(self.state, FieldState::Valid)
    }

    /// Whether the field has lost focus at least once.
    pub const fn is_touched(&self) -> bool {
        self.touched
    }

    pub const fn selected_date(&self) -> Option<CalendarDate> {
        self.selected_date
    }

    /// Time of the last committed value, if it had one.
    pub const fn selected_time(&self) -> Option<TimeOfDay> {
        self.selected_time
    }

    /// Time currently shown by the time picker.
    pub const fn picker_time(&self) -> TimeOfDay {
        self.picker_time
    }

    /// (year, month) shown by the calendar.
    pub const fn displayed_month(&self) -> (u32, u32) {
        self.displayed
    }

    /// Time changes only apply once a date has been selected.
    pub const fn time_picker_enabled(&self) -> bool {
        self.config.includes_time && self.selected_date.is_some() && !self.config.is_locked()
    }

    pub fn placeholder(&self) -> String {
        format::placeholder(&self.config)
    }

    pub fn quick_options(&self) -> &[QuickOption] {
        &self.config.quick_options
    }

    pub fn hours(&self) -> Vec<u8> {
        time::enumerate_hours(&self.config)
    }

    pub fn minutes(&self) -> Vec<u8> {
        time::enumerate_minutes(&self.config)
    }

    pub fn periods(&self) -> Vec<Period> {
        time::enumerate_periods(&self.config)
    }

    /// The displayed month, annotated for rendering.
    ///
    /// # Errors
    /// Only when the displayed month sits at the edge of the supported years.
    pub fn calendar_view(&self, today: Option<CalendarDate>) -> Result<CalendarView> {
        let (year, month) = self.displayed;
        grid::calendar_view(year, month, &self.config, self.selected_date, today)
    }

    // =========================================================================
    // Text events
    // =========================================================================

    /// Syncs the text with a value supplied by the owner. Never emits.
    ///
    /// The text is kept as given. It is `Valid` only when it is already the
    /// canonical form of an acceptable value; a parsable value the rules
    /// reject is `Invalid`, and anything else waits for a commit as `Typing`.
    pub fn set_value(&mut self, value: &str) {
        self.text = value.to_owned();
        self.error = None;
        self.selected_date = None;
        self.selected_time = None;
        if value.trim().is_empty() {
            self.state = FieldState::Empty;
            return;
        }
        let Ok(parsed) = format::parse_combined(value, &self.config) else {
            self.state = FieldState::Typing;
            return;
        };
        if let Err(e) = self.validate(&parsed) {
            self.state = FieldState::Invalid(e.kind());
            self.error = Some(e);
            return;
        }
        let canonical = format::format(parsed.date, &self.config, parsed.time);
        self.select(parsed);
        self.state = if canonical == value {
            FieldState::Valid
        } else {
            FieldState::Typing
        };
    }

    /// A keystroke replaced the text.
    ///
    /// If the new text already parses to an acceptable value with a
    /// four-digit year, the selection follows it and the raw text is emitted
    /// and returned.
    pub fn input(&mut self, text: &str) -> Option<String> {
        if self.config.is_locked() || !self.config.allow_manual_input {
            return None;
        }
        self.text = text.to_owned();
        if text.trim().is_empty() {
            self.state = FieldState::Empty;
            self.error = None;
            return None;
        }

        let live = format::parse_combined(text, &self.config).and_then(|parsed| {
            self.validate(&parsed)?;
            Ok(parsed)
        });

        if self.config.validate_on_blur {
            self.state = FieldState::Typing;
            self.error = None;
        } else {
            match &live {
                Ok(_) => {
                    self.state = FieldState::Valid;
                    self.error = None;
                }
                Err(e) => {
                    self.state = FieldState::Invalid(e.kind());
                    self.error = Some(e.clone());
                }
            }
        }

        let parsed = live.ok()?;
        if !format::has_full_year(text, self.config.date_format) {
            return None;
        }
        self.select(parsed);
        self.emit(text);
        Some(text.to_owned())
    }

    /// The field lost focus.
    ///
    /// # Errors
    /// The commit error, when `validate_on_blur` is set and the text is invalid.
    pub fn blur(&mut self) -> Result<Option<String>> {
        self.touched = true;
        if self.config.validate_on_blur && !self.config.is_locked() {
            self.commit()
        } else {
            Ok(None)
        }
    }

    /// Validates the current text and, if it holds, canonicalizes and emits it.
    ///
    /// Returns `Ok(None)` for an empty optional field.
    ///
    /// # Errors
    /// `RequiredMissing` for an empty required field, otherwise any parse,
    /// availability or minute-step error. The field moves to `Invalid` in every error case.
    pub fn commit(&mut self) -> Result<Option<String>> {
        if self.text.trim().is_empty() {
            if self.config.required {
                return self.fail(DateError::RequiredMissing);
            }
            self.state = FieldState::Empty;
            self.error = None;
            self.selected_date = None;
            self.selected_time = None;
            return Ok(None);
        }
        match format::parse_combined(&self.text, &self.config) {
            Ok(parsed) => self.commit_value(parsed),
            Err(e) => self.fail(e),
        }
    }

    // =========================================================================
    // Selection events
    // =========================================================================

    /// A calendar cell was clicked. With time enabled, the picker's time is
    /// attached.
    ///
    /// # Errors
    /// `Unavailable` when the availability rules exclude `date`. The field
    /// keeps its previous value and state.
    pub fn select_date(&mut self, date: CalendarDate) -> Result<Option<String>> {
        if self.config.is_locked() {
            return Ok(None);
        }
        let time = self.config.includes_time.then_some(self.picker_time);
        self.commit_selection(ParsedValue { date, time })
    }

    /// A quick option was clicked. Its value is parsed in the active format
    /// exactly as typed text would be.
    ///
    /// # Errors
    /// Parse or availability errors for the option's value. The field keeps
    /// its previous value and state.
    pub fn select_quick_option(&mut self, value: &str) -> Result<Option<String>> {
        if self.config.is_locked() {
            return Ok(None);
        }
        let mut parsed = format::parse_combined(value, &self.config).inspect_err(|e| {
            tracing::debug!(value, error = %e, "Quick option rejected");
        })?;
        if self.config.includes_time && parsed.time.is_none() {
            parsed.time = Some(self.picker_time);
        }
        self.commit_selection(parsed)
    }

    /// The hour dropdown changed.
    ///
    /// # Errors
    /// `InvalidHour` for an hour the clock does not have; nothing changes.
    pub fn set_hour(&mut self, hour: u8) -> Result<Option<String>> {
        self.update_time(|t, config| time::set_hour(t, hour, config))
    }

    /// The minute dropdown changed.
    ///
    /// # Errors
    /// `InvalidMinute` or `MinuteStep`; nothing changes.
    pub fn set_minute(&mut self, minute: u8) -> Result<Option<String>> {
        self.update_time(|t, config| time::set_minute(t, minute, config))
    }

    /// The AM/PM toggle changed.
    ///
    /// # Errors
    /// `PeriodUnused` on a 24-hour clock; nothing changes.
    pub fn set_period(&mut self, period: Period) -> Result<Option<String>> {
        self.update_time(|t, config| time::set_period(t, period, config))
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    pub fn show_previous_month(&mut self) -> (u32, u32) {
        let (year, month) = self.displayed;
        self.show_month_clamped(grid::navigate_month(year, month, -1))
    }

    pub fn show_next_month(&mut self) -> (u32, u32) {
        let (year, month) = self.displayed;
        self.show_month_clamped(grid::navigate_month(year, month, 1))
    }

    pub fn show_previous_year(&mut self) -> (u32, u32) {
        let (year, month) = self.displayed;
        self.show_month_clamped(grid::navigate_year(year, month, -1))
    }

    pub fn show_next_year(&mut self) -> (u32, u32) {
        let (year, month) = self.displayed;
        self.show_month_clamped(grid::navigate_year(year, month, 1))
    }

    /// Jumps the calendar to `month` of `year` (rolled over and clamped).
    pub fn show_month(&mut self, year: u32, month: u32) -> (u32, u32) {
        self.show_month_clamped(grid::navigate_month(year, month, 0))
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn update_time(
        &mut self,
        update: impl FnOnce(TimeOfDay, &FieldConfig) -> Result<TimeOfDay>,
    ) -> Result<Option<String>> {
        if !self.time_picker_enabled() {
            tracing::debug!("Time change ignored: no date selected");
            return Ok(None);
        }
        let Some(date) = self.selected_date else {
            return Ok(None);
        };
        let new_time = update(self.picker_time, &self.config)?;
        self.picker_time = new_time;
        self.commit_selection(ParsedValue {
            date,
            time: Some(new_time),
        })
    }

    /// Availability of the date and, when present, the minute step.
    fn validate(&self, parsed: &ParsedValue) -> Result<()> {
        check_available(parsed.date, &self.config)?;
        if let Some(t) = parsed.time {
            time::check_minute_step(t, &self.config)?;
        }
        Ok(())
    }

    /// Commits text the user typed; a rejection marks the field invalid.
    fn commit_value(&mut self, parsed: ParsedValue) -> Result<Option<String>> {
        if let Err(e) = self.validate(&parsed) {
            return self.fail(e);
        }
        Ok(Some(self.store(parsed)))
    }

    /// Commits a picked value; a rejection leaves the field as it was.
    fn commit_selection(&mut self, parsed: ParsedValue) -> Result<Option<String>> {
        if let Err(e) = self.validate(&parsed) {
            tracing::debug!(date = %parsed.date, error = %e, "Selection rejected");
            return Err(e);
        }
        Ok(Some(self.store(parsed)))
    }

    fn store(&mut self, parsed: ParsedValue) -> String {
        let canonical = format::format(parsed.date, &self.config, parsed.time);
        self.select(parsed);
        self.text.clone_from(&canonical);
        self.state = FieldState::Valid;
        self.error = None;
        tracing::debug!(value = %canonical, "Committed");
        self.emit(&canonical);
        canonical
    }

    fn fail(&mut self, error: DateError) -> Result<Option<String>> {
        tracing::debug!(text = %self.text, error = %error, "Commit rejected");
        self.state = FieldState::Invalid(error.kind());
        self.error = Some(error.clone());
        Err(error)
    }

    fn select(&mut self, parsed: ParsedValue) {
        self.selected_date = Some(parsed.date);
        self.selected_time = parsed.time;
        if let Some(t) = parsed.time {
            self.picker_time = t.to_format(self.config.time_format);
        }
        self.displayed = (parsed.date.year(), parsed.date.month());
    }

    fn emit(&mut self, value: &str) {
        if let Some(callback) = self.on_change.as_mut() {
            callback(value);
        }
    }

    fn show_month_clamped(&mut self, target: (u32, u32)) -> (u32, u32) {
        let (year, _) = target;
        let in_range = self
            .config
            .year_range
            .is_none_or(|(first, last)| (first..=last).contains(&year));
        if in_range {
            tracing::debug!(year = target.0, month = target.1, "Calendar page changed");
            self.displayed = target;
        }
        self.displayed
    }

    fn clamp_to_year_range(&self, (year, month): (u32, u32)) -> (u32, u32) {
        match self.config.year_range {
            Some((first, _)) if year < first => (first, 1),
            Some((_, last)) if year > last => (last, 12),
            _ => (year, month),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DateFormat, TimeFormat};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn date(year: u32, month: u32, day: u32) -> CalendarDate {
        CalendarDate::new(year, month, day).unwrap()
    }

    /// Field plus a log of every emitted value.
    fn recording(config: FieldConfig) -> (DateField, Rc<RefCell<Vec<String>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let field = DateField::new(config).on_change(move |v| sink.borrow_mut().push(v.to_owned()));
        (field, log)
    }

    fn european_24h() -> FieldConfig {
        FieldConfig::new()
            .with_date_format(DateFormat::Dmy)
            .with_time(TimeFormat::H24)
    }

    #[test]
    fn test_dmy_24h_scenario_valid() {
        let (mut field, log) = recording(european_24h());
        field.input("25/12/2025 14:30");
        let committed = field.commit().unwrap();
        assert_eq!(committed.as_deref(), Some("25/12/2025 14:30"));
        assert_eq!(field.state(), FieldState::Valid);
        assert_eq!(field.text(), "25/12/2025 14:30");
        assert_eq!(field.error_message(), None);
        assert_eq!(log.borrow().last().map(String::as_str), Some("25/12/2025 14:30"));
    }

    #[test]
    fn test_dmy_24h_scenario_invalid_month() {
        let (mut field, log) = recording(european_24h());
        assert_eq!(field.input("25/13/2025 14:30"), None);
        let err = field.commit().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfRange);
        assert_eq!(field.state(), FieldState::Invalid(ErrorKind::OutOfRange));
        assert_eq!(field.error_message(), Some("Date is out of range"));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_typing_defers_validation() {
        let (mut field, log) = recording(FieldConfig::new());
        assert_eq!(field.state(), FieldState::Empty);
        field.input("01/1");
        assert_eq!(field.state(), FieldState::Typing);
        assert_eq!(field.error(), None);
        field.show_month(2025, 1);
        field.input("01/15/202");
        assert_eq!(field.state(), FieldState::Typing);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_partial_year_does_not_move_selection() {
        let (mut field, log) = recording(FieldConfig::new());
        field.show_month(2025, 1);
        // "202" is a real year, but the user is still typing
        assert_eq!(field.input("01/15/202"), None);
        assert_eq!(field.selected_date(), None);
        assert_eq!(field.displayed_month(), (2025, 1));

        assert_eq!(field.input("01/15/2026").as_deref(), Some("01/15/2026"));
        assert_eq!(field.displayed_month(), (2026, 1));
        assert_eq!(*log.borrow(), vec!["01/15/2026"]);
    }

    #[test]
    fn test_typed_off_step_minute_is_invalid() {
        let config = FieldConfig::new()
            .with_time(TimeFormat::H24)
            .with_minute_step(15);
        let (mut field, log) = recording(config);
        assert_eq!(field.input("01/20/2025 09:07"), None);
        let err = field.commit().unwrap_err();
        assert!(matches!(err, DateError::MinuteStep { minute: 7, step: 15 }));
        assert_eq!(field.state(), FieldState::Invalid(ErrorKind::OutOfRange));
        assert!(log.borrow().is_empty());

        field.input("01/20/2025 09:15");
        assert_eq!(field.commit().unwrap().as_deref(), Some("01/20/2025 09:15"));
    }

    #[test]
    fn test_off_step_default_time_is_not_used() {
        let config = FieldConfig::new()
            .with_time(TimeFormat::H24)
            .with_minute_step(15)
            .with_default_time("09:07");
        let mut field = DateField::new(config);
        assert!(field.minutes().contains(&field.picker_time().minute()));
        assert_eq!(
            field.select_date(date(2025, 1, 20)).unwrap().as_deref(),
            Some("01/20/2025 00:00")
        );
    }

    #[test]
    fn test_rejected_selection_keeps_committed_value() {
        let config = FieldConfig::new()
            .with_disabled_dates([date(2025, 1, 21)])
            .with_quick_options([QuickOption::new("Bad", "13/45/2025")]);
        let (mut field, log) = recording(config);
        field.select_date(date(2025, 1, 20)).unwrap();

        let err = field.select_date(date(2025, 1, 21)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unavailable);
        assert!(field.select_quick_option("13/45/2025").is_err());

        assert_eq!(field.state(), FieldState::Valid);
        assert_eq!(field.error(), None);
        assert_eq!(field.text(), "01/20/2025");
        assert_eq!(field.selected_date(), Some(date(2025, 1, 20)));
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn test_live_commit_emits_raw_text() {
        let (mut field, log) = recording(FieldConfig::new());
        assert_eq!(field.input("1/5/2025").as_deref(), Some("1/5/2025"));
        assert_eq!(field.selected_date(), Some(date(2025, 1, 5)));
        assert_eq!(field.displayed_month(), (2025, 1));
        assert_eq!(field.state(), FieldState::Typing);

        // Blur canonicalizes
        assert_eq!(field.blur().unwrap().as_deref(), Some("01/05/2025"));
        assert!(field.is_touched());
        assert_eq!(*log.borrow(), vec!["1/5/2025", "01/05/2025"]);
    }

    #[test]
    fn test_live_commit_skips_unavailable() {
        let config = FieldConfig::new().with_disabled_dates([date(2025, 1, 20)]);
        let (mut field, log) = recording(config);
        assert_eq!(field.input("01/20/2025"), None);
        assert_eq!(field.selected_date(), None);
        assert!(log.borrow().is_empty());

        let err = field.blur().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unavailable);
        assert_eq!(field.error_message(), Some("This date is not available"));
    }

    #[test]
    fn test_validate_on_keystroke_when_blur_validation_off() {
        let config = FieldConfig::new().with_validate_on_blur(false);
        let (mut field, _log) = recording(config);
        field.input("02/30/2024");
        assert_eq!(field.state(), FieldState::Invalid(ErrorKind::OutOfRange));
        field.input("02/29/2024");
        assert_eq!(field.state(), FieldState::Valid);

        // Blur does not run a commit in this mode
        field.input("02/3");
        assert_eq!(field.blur().unwrap(), None);
        assert_eq!(field.state(), FieldState::Invalid(ErrorKind::InvalidFormat));
    }

    #[test]
    fn test_required_only_on_commit() {
        let config = FieldConfig::new().with_required(true);
        let (mut field, _log) = recording(config);
        field.input("");
        assert_eq!(field.state(), FieldState::Empty);
        let err = field.blur().unwrap_err();
        assert!(matches!(err, DateError::RequiredMissing));
        assert_eq!(field.state(), FieldState::Invalid(ErrorKind::RequiredMissing));
        assert_eq!(field.error_message(), Some("This field is required"));
    }

    #[test]
    fn test_empty_optional_commit() {
        let mut field = DateField::with_value(FieldConfig::new(), "01/15/2025");
        assert_eq!(field.selected_date(), Some(date(2025, 1, 15)));
        field.input("  ");
        assert_eq!(field.commit().unwrap(), None);
        assert_eq!(field.state(), FieldState::Empty);
        assert_eq!(field.selected_date(), None);
    }

    #[test]
    fn test_select_date_commits() {
        let (mut field, log) = recording(FieldConfig::new());
        field.show_month(2025, 3);
        let value = field.select_date(date(2025, 1, 15)).unwrap();
        assert_eq!(value.as_deref(), Some("01/15/2025"));
        assert_eq!(field.displayed_month(), (2025, 1));
        assert_eq!(field.state(), FieldState::Valid);
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn test_select_unavailable_date() {
        let config = FieldConfig::new()
            .with_min_date(date(2025, 1, 1))
            .unwrap();
        let (mut field, log) = recording(config);
        let err = field.select_date(date(2024, 12, 31)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unavailable);
        assert_eq!(field.selected_date(), None);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_select_date_attaches_default_time() {
        let config = FieldConfig::new()
            .with_time(TimeFormat::H12)
            .with_default_time("09:00 AM");
        let (mut field, _log) = recording(config);
        let value = field.select_date(date(2025, 1, 20)).unwrap();
        assert_eq!(value.as_deref(), Some("01/20/2025 09:00 AM"));
    }

    #[test]
    fn test_time_change_without_date_is_noop() {
        let config = FieldConfig::new()
            .with_time(TimeFormat::H12)
            .with_minute_step(15);
        let (mut field, log) = recording(config);
        assert!(!field.time_picker_enabled());
        let before = field.picker_time();
        assert_eq!(field.set_hour(3).unwrap(), None);
        assert_eq!(field.set_minute(30).unwrap(), None);
        assert_eq!(field.picker_time(), before);
        assert_eq!(field.state(), FieldState::Empty);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_time_change_recommits_with_selected_date() {
        let config = FieldConfig::new()
            .with_time(TimeFormat::H12)
            .with_minute_step(15)
            .with_default_time("09:00 AM");
        let (mut field, log) = recording(config);
        field.select_date(date(2025, 1, 20)).unwrap();
        assert!(field.time_picker_enabled());

        assert_eq!(
            field.set_hour(2).unwrap().as_deref(),
            Some("01/20/2025 02:00 AM")
        );
        assert_eq!(
            field.set_period(Period::Pm).unwrap().as_deref(),
            Some("01/20/2025 02:00 PM")
        );
        assert_eq!(
            field.set_minute(45).unwrap().as_deref(),
            Some("01/20/2025 02:45 PM")
        );
        assert_eq!(log.borrow().len(), 4);
    }

    #[test]
    fn test_rejected_minute_keeps_state() {
        let config = FieldConfig::new()
            .with_time(TimeFormat::H24)
            .with_minute_step(15);
        let (mut field, log) = recording(config);
        field.select_date(date(2025, 1, 20)).unwrap();
        let before = field.picker_time();
        let err = field.set_minute(10).unwrap_err();
        assert!(matches!(err, DateError::MinuteStep { minute: 10, step: 15 }));
        assert_eq!(field.picker_time(), before);
        assert_eq!(field.state(), FieldState::Valid);
        assert_eq!(field.text(), "01/20/2025 00:00");
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn test_typed_time_moves_picker() {
        let (mut field, _log) = recording(european_24h());
        field.input("25/12/2025 14:30");
        field.commit().unwrap();
        assert_eq!(field.picker_time(), TimeOfDay::new_24h(14, 30).unwrap());
        assert_eq!(field.selected_time(), Some(TimeOfDay::new_24h(14, 30).unwrap()));

        // Date-only text on a time field leaves the time unset
        field.input("26/12/2025");
        assert_eq!(field.commit().unwrap().as_deref(), Some("26/12/2025"));
        assert_eq!(field.selected_time(), None);
    }

    #[test]
    fn test_quick_option_uses_active_format() {
        let config = FieldConfig::new()
            .with_quick_options([QuickOption::new("Launch", "03/15/2025")]);
        let (mut field, log) = recording(config);
        let value = field.quick_options()[0].value.clone();
        assert_eq!(
            field.select_quick_option(&value).unwrap().as_deref(),
            Some("03/15/2025")
        );

        // An ISO value on an MM/DD/YYYY field is not reformatted
        assert!(field.select_quick_option("2025-03-16").is_err());
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn test_quick_option_with_time() {
        let config = FieldConfig::new()
            .with_time(TimeFormat::H12)
            .with_default_time("09:00 AM");
        let (mut field, _log) = recording(config);
        assert_eq!(
            field.select_quick_option("01/21/2025 02:00 PM").unwrap().as_deref(),
            Some("01/21/2025 02:00 PM")
        );
        assert_eq!(
            field.select_quick_option("01/22/2025").unwrap().as_deref(),
            Some("01/22/2025 02:00 PM")
        );
    }

    #[test]
    fn test_locked_field_ignores_events() {
        let config = FieldConfig::new().with_read_only(true);
        let (mut field, log) = recording(config);
        assert_eq!(field.input("01/15/2025"), None);
        assert_eq!(field.text(), "");
        assert_eq!(field.select_date(date(2025, 1, 15)).unwrap(), None);
        assert!(log.borrow().is_empty());

        let mut field = DateField::new(FieldConfig::new().with_manual_input(false));
        assert_eq!(field.input("01/15/2025"), None);
        assert!(field.select_date(date(2025, 1, 15)).unwrap().is_some());
    }

    #[test]
    fn test_navigation_does_not_touch_validity() {
        let mut field = DateField::new(FieldConfig::new());
        field.input("garbage");
        field.commit().unwrap_err();
        field.show_month(2024, 12);
        assert_eq!(field.show_next_month(), (2025, 1));
        assert_eq!(field.show_previous_year(), (2024, 1));
        assert_eq!(field.show_previous_month(), (2023, 12));
        assert_eq!(field.show_next_year(), (2024, 12));
        assert_eq!(field.state(), FieldState::Invalid(ErrorKind::InvalidFormat));
    }

    #[test]
    fn test_year_range_limits_navigation() {
        let mut field = DateField::new(FieldConfig::new().with_year_range(2020, 2025).unwrap());
        field.show_month(2025, 12);
        assert_eq!(field.show_next_month(), (2025, 12));
        assert_eq!(field.show_next_year(), (2025, 12));
        field.show_month(2020, 1);
        assert_eq!(field.show_previous_month(), (2020, 1));
        assert_eq!(field.show_month(2030, 1), (2020, 1));
    }

    #[test]
    fn test_set_value_checks_rules_and_canonical_form() {
        let config = FieldConfig::new().with_disabled_dates([date(2025, 1, 20)]);
        let (mut field, log) = recording(config);

        field.set_value("1/20/2025");
        assert_eq!(field.state(), FieldState::Invalid(ErrorKind::Unavailable));
        assert_eq!(field.error_message(), Some("This date is not available"));
        assert_eq!(field.selected_date(), None);
        assert_eq!(field.text(), "1/20/2025");

        // Acceptable but not canonical: selected, validity decided on commit
        field.set_value("1/21/2025");
        assert_eq!(field.state(), FieldState::Typing);
        assert_eq!(field.error(), None);
        assert_eq!(field.selected_date(), Some(date(2025, 1, 21)));

        field.set_value("01/21/2025");
        assert_eq!(field.state(), FieldState::Valid);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_set_value_syncs_without_emitting() {
        let (mut field, log) = recording(FieldConfig::new());
        field.set_value("07/04/2025");
        assert_eq!(field.selected_date(), Some(date(2025, 7, 4)));
        assert_eq!(field.displayed_month(), (2025, 7));
        assert_eq!(field.state(), FieldState::Valid);
        field.set_value("not a date");
        assert_eq!(field.selected_date(), None);
        assert_eq!(field.state(), FieldState::Typing);
        field.set_value("");
        assert_eq!(field.state(), FieldState::Empty);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_calendar_view_follows_selection() {
        let mut field = DateField::new(FieldConfig::new());
        field.select_date(date(2024, 2, 14)).unwrap();
        let view = field.calendar_view(Some(date(2024, 2, 1))).unwrap();
        assert_eq!((view.year, view.month), (2024, 2));
        assert_eq!(view.cells.len(), 35);
        assert_eq!(view.cells.iter().filter(|c| c.is_selected).count(), 1);
        assert_eq!(view.cells.iter().filter(|c| c.is_today).count(), 1);
    }

    #[test]
    fn test_picker_lists() {
        let field = DateField::new(
            FieldConfig::new()
                .with_time(TimeFormat::H12)
                .with_minute_step(30),
        );
        assert_eq!(field.hours().len(), 12);
        assert_eq!(field.minutes(), vec![0, 30]);
        assert_eq!(field.periods(), vec![Period::Am, Period::Pm]);
        assert_eq!(field.placeholder(), "mm/dd/yyyy hh:mm aa");
    }
}
