use crate::{CalendarDate, DateError, FieldConfig, Restriction, Result};

/// Inclusive minimum/maximum pair. Either side may be open.
/// When both are set, the minimum is never after the maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DateBounds {
    min: Option<CalendarDate>,
    max: Option<CalendarDate>,
}

impl DateBounds {
    /// Creates bounds with validation.
    ///
    /// # Errors
    /// Returns `DateError::InvalidConfig` if min > max.
    pub fn new(min: Option<CalendarDate>, max: Option<CalendarDate>) -> Result<Self> {
        match (min, max) {
            (Some(min), Some(max)) if min > max => Err(DateError::InvalidConfig(format!(
                "minimum date ({min}) is after maximum date ({max})"
            ))),
            _ => Ok(Self { min, max }),
        }
    }

    /// Bounds open on both sides.
    pub const fn unbounded() -> Self {
        Self {
            min: None,
            max: None,
        }
    }

    pub const fn min(&self) -> Option<CalendarDate> {
        self.min
    }

    pub const fn max(&self) -> Option<CalendarDate> {
        self.max
    }

    /// Which side of the bounds `date` violates, if any.
    pub fn check(&self, date: CalendarDate) -> Option<Restriction> {
        match (self.min, self.max) {
            (Some(min), _) if date < min => Some(Restriction::BeforeMin),
            (_, Some(max)) if date > max => Some(Restriction::AfterMax),
            _ => None,
        }
    }

    pub fn contains(&self, date: CalendarDate) -> bool {
        self.check(date).is_none()
    }
}

/// Whether `date` may be selected under `config`.
pub fn is_available(date: CalendarDate, config: &FieldConfig) -> bool {
    restriction(date, config).is_none()
}

/// Like [`is_available`], but names the rule that excludes the date.
///
/// # Errors
/// `DateError::Unavailable` carrying the violated [`Restriction`].
pub fn check_available(date: CalendarDate, config: &FieldConfig) -> Result<()> {
    match restriction(date, config) {
        None => Ok(()),
        Some(reason) => Err(DateError::Unavailable { date, reason }),
    }
}

fn restriction(date: CalendarDate, config: &FieldConfig) -> Option<Restriction> {
    // A non-empty allow-list is the tightest rule, so it goes first
    if !config.enabled_dates_only.is_empty() && !config.enabled_dates_only.contains(&date) {
        return Some(Restriction::NotEnabled);
    }
    if let Some(reason) = config.bounds.check(date) {
        return Some(reason);
    }
    if config.disabled_dates.contains(&date) {
        return Some(Restriction::Disabled);
    }
    None
}
