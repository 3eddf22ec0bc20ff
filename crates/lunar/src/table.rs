//! The lunar year table and the day-counting decode.
//!
//! A [`LunarTable`] pairs a Gregorian epoch (the first day of its first lunar
//! year) with a run of consecutive [`LunarYear`]s. Converting a date counts the
//! days since the epoch, then walks years and months subtracting their
//! lengths until the remaining count falls inside one of them.
//!
//! The builtin table covers lunar years 1949 through 2100 and starts on
//! 1949-01-29.

use std::borrow::Cow;
use std::ops::RangeInclusive;

use chrono::{Datelike, Days, NaiveDate};
use tracing::debug;

use crate::date::{LunarDate, LunarDateLabels};
use crate::error::{LunarError, Result};
use crate::year::LunarYear;

/// First lunar year of the builtin table.
pub const FIRST_YEAR: i32 = 1949;

/// Last lunar year of the builtin table.
pub const LAST_YEAR: i32 = 2100;

/// Number of years in the builtin table.
pub const YEAR_COUNT: usize = (LAST_YEAR - FIRST_YEAR + 1) as usize;

/// 1949-01-29 as days from 0001-01-01 (day 1), the builtin epoch.
const EPOCH_DAYS_FROM_CE: i32 = 711_521;

/// Packed year entries, see [`crate::year`] for the bit layout.
#[rustfmt::skip]
const PACKED_YEARS: [u32; YEAR_COUNT] = [
    0x0b557,                                                                            // 1949
    0x06ca0, 0x0b550, 0x15355, 0x04da0, 0x0a5b0, 0x14573, 0x052b0, 0x0a9a8, 0x0e950, 0x06aa0, // 1950-1959
    0x0aea6, 0x0ab50, 0x04b60, 0x0aae4, 0x0a570, 0x05260, 0x0f263, 0x0d950, 0x05b57, 0x056a0, // 1960-1969
    0x096d0, 0x04dd5, 0x04ad0, 0x0a4d0, 0x0d4d4, 0x0d250, 0x0d558, 0x0b540, 0x0b6a0, 0x195a6, // 1970-1979
    0x095b0, 0x049b0, 0x0a974, 0x0a4b0, 0x0b27a, 0x06a50, 0x06d40, 0x0af46, 0x0ab60, 0x09570, // 1980-1989
    0x04af5, 0x04970, 0x064b0, 0x074a3, 0x0ea50, 0x06b58, 0x05ac0, 0x0ab60, 0x096d5, 0x092e0, // 1990-1999
    0x0c960, 0x0d954, 0x0d4a0, 0x0da50, 0x07552, 0x056a0, 0x0abb7, 0x025d0, 0x092d0, 0x0cab5, // 2000-2009
    0x0a950, 0x0b4a0, 0x0baa4, 0x0ad50, 0x055d9, 0x04ba0, 0x0a5b0, 0x15176, 0x052b0, 0x0a930, // 2010-2019
    0x07954, 0x06aa0, 0x0ad50, 0x05b52, 0x04b60, 0x0a6e6, 0x0a4e0, 0x0d260, 0x0ea65, 0x0d530, // 2020-2029
    0x05aa0, 0x076a3, 0x096d0, 0x04afb, 0x04ad0, 0x0a4d0, 0x1d0b6, 0x0d250, 0x0d520, 0x0dd45, // 2030-2039
    0x0b5a0, 0x056d0, 0x055b2, 0x049b0, 0x0a577, 0x0a4b0, 0x0aa50, 0x1b255, 0x06d20, 0x0ada0, // 2040-2049
    0x14b63, 0x09370, 0x049f8, 0x04970, 0x064b0, 0x168a6, 0x0ea50, 0x06b20, 0x1a6c4, 0x0aae0, // 2050-2059
    0x092e0, 0x0d2e3, 0x0c960, 0x0d557, 0x0d4a0, 0x0da50, 0x05d55, 0x056a0, 0x0a6d0, 0x055d4, // 2060-2069
    0x052d0, 0x0a9b8, 0x0a950, 0x0b4a0, 0x0b6a6, 0x0ad50, 0x055a0, 0x0aba4, 0x0a5b0, 0x052b0, // 2070-2079
    0x0b273, 0x06930, 0x07337, 0x06aa0, 0x0ad50, 0x14b55, 0x04b60, 0x0a570, 0x054e4, 0x0d160, // 2080-2089
    0x0e968, 0x0d520, 0x0daa0, 0x16aa6, 0x056d0, 0x04ae0, 0x0a9d4, 0x0a2d0, 0x0d150, 0x0f252, // 2090-2099
    0x0d520,                                                                            // 2100
];

static BUILTIN_YEARS: [LunarYear; YEAR_COUNT] = decode_all(&PACKED_YEARS);

static BUILTIN: LunarTable = LunarTable {
    epoch_days: EPOCH_DAYS_FROM_CE,
    first_year: FIRST_YEAR,
    years: Cow::Borrowed(&BUILTIN_YEARS),
};

const fn decode_all(packed: &[u32; YEAR_COUNT]) -> [LunarYear; YEAR_COUNT] {
    let mut years = [LunarYear::EMPTY; YEAR_COUNT];
    let mut i = 0;
    while i < YEAR_COUNT {
        years[i] = LunarYear::decode(packed[i]);
        i += 1;
    }
    years
}

/// A run of consecutive lunar years anchored to a Gregorian epoch.
///
/// # Examples
///
/// ```
/// use glance_lunar::LunarTable;
///
/// let table = LunarTable::builtin();
/// let labels = table.convert(2024, 2, 10).unwrap();
/// assert_eq!(labels.year, "甲辰");
/// assert_eq!(labels.month, "一月");
/// assert_eq!(labels.day, "初一");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LunarTable {
    epoch_days: i32,
    first_year: i32,
    years: Cow<'static, [LunarYear]>,
}

impl LunarTable {
    /// Returns the builtin table covering lunar years 1949 through 2100.
    #[must_use]
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// Builds a table from already decoded years.
    ///
    /// `epoch` must be the Gregorian date of the first day of `first_year`.
    #[must_use]
    pub fn new(epoch: NaiveDate, first_year: i32, years: Vec<LunarYear>) -> Self {
        Self {
            epoch_days: epoch.num_days_from_ce(),
            first_year,
            years: Cow::Owned(years),
        }
    }

    /// Builds a table from packed year entries.
    ///
    /// # Errors
    ///
    /// Returns [`LunarError::InvalidYearEntry`] if any entry is malformed.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use glance_lunar::LunarTable;
    ///
    /// let epoch = NaiveDate::from_ymd_opt(2023, 1, 22).unwrap();
    /// let table = LunarTable::from_packed(epoch, 2023, &[0x05b52]).unwrap();
    /// assert_eq!(table.year_range(), 2023..=2023);
    /// ```
    pub fn from_packed(epoch: NaiveDate, first_year: i32, packed: &[u32]) -> Result<Self> {
        let years = packed
            .iter()
            .zip(first_year..)
            .map(|(&entry, year)| LunarYear::try_decode(year, entry))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(epoch, first_year, years))
    }

    /// Returns the Gregorian date of the first day of the first year.
    #[must_use]
    pub fn epoch(&self) -> Option<NaiveDate> {
        NaiveDate::from_num_days_from_ce_opt(self.epoch_days)
    }

    /// Returns the Gregorian date of the last day of the last year, or
    /// `None` for an empty table.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use glance_lunar::LunarTable;
    ///
    /// let last = LunarTable::builtin().last_day();
    /// assert_eq!(last, NaiveDate::from_ymd_opt(2101, 1, 28));
    /// ```
    #[must_use]
    pub fn last_day(&self) -> Option<NaiveDate> {
        let total: u64 = self.years.iter().map(|y| u64::from(y.days_in_year())).sum();
        self.epoch()?.checked_add_days(Days::new(total.checked_sub(1)?))
    }

    /// Returns the range of lunar years covered by the table.
    ///
    /// An empty table yields an empty range.
    #[must_use]
    pub fn year_range(&self) -> RangeInclusive<i32> {
        let len = i32::try_from(self.years.len()).unwrap_or(i32::MAX);
        self.first_year..=self.first_year.saturating_add(len) - 1
    }

    /// Returns the decoded record of a lunar year.
    #[must_use]
    pub fn year(&self, lunar_year: i32) -> Option<&LunarYear> {
        let index = usize::try_from(lunar_year.checked_sub(self.first_year)?).ok()?;
        self.years.get(index)
    }

    /// Returns the Gregorian date of the first day of a lunar year.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use glance_lunar::LunarTable;
    ///
    /// let new_year = LunarTable::builtin().new_year(2023);
    /// assert_eq!(new_year, NaiveDate::from_ymd_opt(2023, 1, 22));
    /// ```
    #[must_use]
    pub fn new_year(&self, lunar_year: i32) -> Option<NaiveDate> {
        let index = usize::try_from(lunar_year.checked_sub(self.first_year)?).ok()?;
        if index >= self.years.len() {
            return None;
        }
        let elapsed: u64 = self.years[..index]
            .iter()
            .map(|y| u64::from(y.days_in_year()))
            .sum();
        self.epoch()?.checked_add_days(Days::new(elapsed))
    }

    /// Converts a Gregorian year/month/day triple into lunar labels.
    ///
    /// # Errors
    ///
    /// Returns [`LunarError::InvalidDate`] if the triple is not a real
    /// Gregorian date, and [`LunarError::UnsupportedYear`] or
    /// [`LunarError::UnsupportedDate`] if the date falls outside the table.
    pub fn convert(&self, year: i32, month: u32, day: u32) -> Result<LunarDateLabels> {
        let date = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or(LunarError::InvalidDate { year, month, day })?;
        Ok(self.lunar_date(date)?.labels())
    }

    /// Decodes a Gregorian date into its lunar year, month, and day.
    ///
    /// # Errors
    ///
    /// Returns [`LunarError::UnsupportedYear`] if the Gregorian year lies
    /// outside the table's year range, and [`LunarError::UnsupportedDate`]
    /// if the year is covered but the date precedes the table's first day or
    /// follows its last.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use glance_lunar::LunarTable;
    ///
    /// let date = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
    /// let lunar = LunarTable::builtin().lunar_date(date).unwrap();
    /// assert_eq!((lunar.year, lunar.month, lunar.day), (1999, 11, 25));
    /// ```
    pub fn lunar_date(&self, date: NaiveDate) -> Result<LunarDate> {
        let range = self.year_range();
        if !range.contains(&date.year()) {
            debug!(%date, first = range.start(), last = range.end(), "year outside lunar table");
            return Err(LunarError::UnsupportedYear {
                year: date.year(),
                first: *range.start(),
                last: *range.end(),
            });
        }
        let unsupported = || self.date_outside_table(date);

        // Day 1 is the epoch itself.
        let mut offset = i64::from(date.num_days_from_ce()) - i64::from(self.epoch_days) + 1;
        if offset <= 0 {
            return Err(unsupported());
        }

        let mut found = None;
        for (year, record) in (self.first_year..).zip(self.years.iter()) {
            let days = i64::from(record.days_in_year());
            offset -= days;
            if offset <= 0 {
                offset += days;
                found = Some((year, record));
                break;
            }
        }
        let (year, record) = found.ok_or_else(unsupported)?;

        for span in record.months() {
            let days = i64::from(span.days);
            offset -= days;
            if offset <= 0 {
                offset += days;
                return Ok(LunarDate {
                    year,
                    month: span.month,
                    // offset is within 1..=30 here
                    day: offset as u8,
                    is_leap_month: span.is_leap,
                });
            }
        }

        // Unreachable: the year walk guarantees offset fits inside the year.
        Err(unsupported())
    }

    fn date_outside_table(&self, date: NaiveDate) -> LunarError {
        debug!(%date, "date outside lunar table");
        match (self.epoch(), self.last_day()) {
            (Some(first), Some(last)) => LunarError::UnsupportedDate { date, first, last },
            _ => LunarError::UnsupportedYear {
                year: date.year(),
                first: *self.year_range().start(),
                last: *self.year_range().end(),
            },
        }
    }
}

/// Converts a Gregorian date into lunar labels using the builtin table.
///
/// `month` and `day` are 1-based.
///
/// # Errors
///
/// Returns [`LunarError::InvalidDate`] for impossible dates and
/// [`LunarError::UnsupportedYear`] or [`LunarError::UnsupportedDate`] for
/// dates outside 1949-01-29 through 2100-12-31.
///
/// # Examples
///
/// ```
/// let labels = glance_lunar::convert(2020, 6, 21).unwrap();
/// assert_eq!(labels.year, "庚子");
/// assert_eq!(labels.month, "五月");
/// assert_eq!(labels.day, "初一");
///
/// assert!(glance_lunar::convert(1948, 12, 31).is_err());
/// ```
pub fn convert(year: i32, month: u32, day: u32) -> Result<LunarDateLabels> {
    LunarTable::builtin().convert(year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn builtin_epoch_is_lunar_new_year_1949() {
        assert_eq!(LunarTable::builtin().epoch(), Some(ymd(1949, 1, 29)));
    }

    #[test]
    fn builtin_covers_1949_through_2100() {
        let table = LunarTable::builtin();
        assert_eq!(table.year_range(), 1949..=2100);
        assert_eq!(table.years.len(), 152);
        assert!(table.year(1948).is_none());
        assert!(table.year(2101).is_none());
        assert_eq!(table.year(1949), Some(&LunarYear::decode(0x0b557)));
    }

    #[test]
    fn epoch_is_first_day() {
        let lunar = LunarTable::builtin().lunar_date(ymd(1949, 1, 29)).unwrap();
        assert_eq!(
            lunar,
            LunarDate {
                year: 1949,
                month: 1,
                day: 1,
                is_leap_month: false
            }
        );
    }

    #[test]
    fn rejects_days_before_epoch() {
        let err = LunarTable::builtin()
            .lunar_date(ymd(1949, 1, 28))
            .unwrap_err();
        assert_eq!(
            err,
            LunarError::UnsupportedDate {
                date: ymd(1949, 1, 28),
                first: ymd(1949, 1, 29),
                last: ymd(2101, 1, 28),
            }
        );
        assert!(err.to_string().contains("1949-01-28"));
        assert!(!err.to_string().contains("1949..="));
    }

    #[test]
    fn rejects_years_outside_range() {
        let table = LunarTable::builtin();
        assert!(matches!(
            table.convert(1900, 6, 1),
            Err(LunarError::UnsupportedYear { year: 1900, .. })
        ));
        assert!(matches!(
            table.convert(2101, 1, 1),
            Err(LunarError::UnsupportedYear { year: 2101, .. })
        ));
    }

    #[test]
    fn rejects_invalid_gregorian_dates() {
        assert_eq!(
            convert(2023, 2, 29),
            Err(LunarError::InvalidDate {
                year: 2023,
                month: 2,
                day: 29
            })
        );
        assert!(matches!(convert(2023, 13, 1), Err(LunarError::InvalidDate { .. })));
        assert!(matches!(convert(2023, 0, 1), Err(LunarError::InvalidDate { .. })));
    }

    #[test]
    fn last_supported_day() {
        let lunar = LunarTable::builtin().lunar_date(ymd(2100, 12, 31)).unwrap();
        assert_eq!((lunar.year, lunar.month, lunar.day), (2100, 12, 1));
    }

    #[test]
    fn new_year_of_first_and_unknown_years() {
        let table = LunarTable::builtin();
        assert_eq!(table.new_year(1949), Some(ymd(1949, 1, 29)));
        assert_eq!(table.new_year(2100), Some(ymd(2100, 2, 9)));
        assert_eq!(table.new_year(1948), None);
        assert_eq!(table.new_year(2101), None);
    }

    #[test]
    fn last_day_of_tables() {
        assert_eq!(LunarTable::builtin().last_day(), Some(ymd(2101, 1, 28)));
        assert_eq!(LunarTable::new(ymd(2000, 1, 1), 2000, Vec::new()).last_day(), None);
    }

    #[test]
    fn from_packed_rejects_bad_entry() {
        let err = LunarTable::from_packed(ymd(2000, 1, 1), 2000, &[0x0a4d0, 0x0a4de]).unwrap_err();
        assert_eq!(
            err,
            LunarError::InvalidYearEntry {
                year: 2001,
                entry: 0x0a4de
            }
        );
    }

    #[test]
    fn empty_table_supports_nothing() {
        let table = LunarTable::new(ymd(2000, 1, 1), 2000, Vec::new());
        assert!(table.year_range().is_empty());
        assert!(table.lunar_date(ymd(2000, 1, 1)).is_err());
    }

    #[test]
    fn walking_off_the_end_is_unsupported() {
        // One year of 354 days starting on 2000-01-01 ends on 2000-12-19.
        let table = LunarTable::from_packed(ymd(2000, 1, 1), 2000, &[0x06ca0]).unwrap();
        assert!(table.lunar_date(ymd(2000, 12, 19)).is_ok());
        assert!(matches!(
            table.lunar_date(ymd(2000, 12, 20)),
            Err(LunarError::UnsupportedDate { last, .. }) if last == ymd(2000, 12, 19)
        ));
    }
}
