//! Lunar dates and their display labels.

use serde::{Deserialize, Serialize};

use crate::error::{LunarError, Result};
use crate::label::{self, LEAP_MARKER, Sexagenary};

/// A decoded lunar date.
///
/// Dates returned by [`crate::LunarTable`] and [`LunarDate::new`] always have
/// `month` in 1..=12 and `day` in 1..=30, and deserializing rejects anything
/// else. A struct literal with values outside those ranges gets an empty
/// month or day label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawLunarDate")]
pub struct LunarDate {
    /// The lunar year, numbered like the Gregorian year it mostly overlaps.
    pub year: i32,
    /// The month number (1..=12). A leap month carries the number of the
    /// ordinary month it follows.
    pub month: u8,
    /// The day of month (1..=30).
    pub day: u8,
    /// Whether `month` is the intercalary month.
    pub is_leap_month: bool,
}

#[derive(Deserialize)]
struct RawLunarDate {
    year: i32,
    month: u8,
    day: u8,
    is_leap_month: bool,
}

impl TryFrom<RawLunarDate> for LunarDate {
    type Error = LunarError;

    fn try_from(raw: RawLunarDate) -> Result<Self> {
        LunarDate::new(raw.year, raw.month, raw.day, raw.is_leap_month)
    }
}

impl LunarDate {
    /// Creates a lunar date, checking that month and day have labels.
    ///
    /// This does not check the date against a year table; a 30th day in a
    /// short month is accepted.
    ///
    /// # Errors
    ///
    /// Returns [`LunarError::InvalidLunarDate`] if `month` is outside 1..=12
    /// or `day` is outside 1..=30.
    ///
    /// # Examples
    ///
    /// ```
    /// use glance_lunar::LunarDate;
    ///
    /// let date = LunarDate::new(2023, 2, 1, true).unwrap();
    /// assert_eq!(date.month_label(), "闰二月");
    ///
    /// assert!(LunarDate::new(2023, 13, 1, false).is_err());
    /// ```
    pub fn new(year: i32, month: u8, day: u8, is_leap_month: bool) -> Result<Self> {
        if !(1..=12).contains(&month) || !(1..=30).contains(&day) {
            return Err(LunarError::InvalidLunarDate { month, day });
        }
        Ok(Self {
            year,
            month,
            day,
            is_leap_month,
        })
    }

    /// Returns the stem and branch of the year.
    #[must_use]
    pub fn sexagenary(&self) -> Sexagenary {
        Sexagenary::from_year(self.year)
    }

    /// Returns the year label, e.g. `甲辰`.
    #[must_use]
    pub fn year_label(&self) -> String {
        self.sexagenary().to_string()
    }

    /// Returns the month label, prefixed with `闰` for a leap month.
    ///
    /// # Examples
    ///
    /// ```
    /// use glance_lunar::LunarDate;
    ///
    /// let date = LunarDate { year: 2023, month: 2, day: 1, is_leap_month: true };
    /// assert_eq!(date.month_label(), "闰二月");
    /// ```
    #[must_use]
    pub fn month_label(&self) -> String {
        let name = label::month_name(self.month).unwrap_or_default();
        if self.is_leap_month {
            format!("{LEAP_MARKER}{name}")
        } else {
            name.to_string()
        }
    }

    /// Returns the day label, e.g. `初一` or `廿九`.
    #[must_use]
    pub fn day_label(&self) -> String {
        label::day_name(self.day).unwrap_or_default().to_string()
    }

    /// Returns the zodiac animal of the year.
    #[must_use]
    pub fn zodiac(&self) -> &'static str {
        self.sexagenary().zodiac()
    }

    /// Returns all three labels.
    #[must_use]
    pub fn labels(&self) -> LunarDateLabels {
        LunarDateLabels {
            year: self.year_label(),
            month: self.month_label(),
            day: self.day_label(),
        }
    }
}

/// Display labels of a lunar date, as returned by [`crate::convert`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LunarDateLabels {
    /// Sexagenary year name, e.g. `癸卯`.
    pub year: String,
    /// Month name, e.g. `冬月` or `闰二月`.
    pub month: String,
    /// Day name, e.g. `十五`.
    pub day: String,
}
