//! Decoded lunar year records.
//!
//! Year tables are stored compactly as packed integers, but every lookup
//! works on [`LunarYear`], the decoded form: twelve ordinary month lengths and
//! an optional leap month.
//!
//! # Packed Layout
//!
//! | Bits   | Meaning                                                  |
//! |--------|----------------------------------------------------------|
//! | 0..=3  | Leap month number (1-based), `0` when the year has none   |
//! | 4..=15 | One flag per ordinary month, bit 15 = month 1, `1` = 30 days |
//! | 16     | Leap month length, `1` = 30 days, `0` = 29 days           |

use crate::error::{LunarError, Result};

/// Days in a short (small) lunar month.
pub const SHORT_MONTH_DAYS: u8 = 29;

/// Days in a long (big) lunar month.
pub const LONG_MONTH_DAYS: u8 = 30;

/// Mask of every bit a packed year entry may use.
const PACKED_MASK: u32 = 0x1_ffff;

/// Flag of ordinary month 1; month `n` is this value shifted right by `n - 1`.
const FIRST_MONTH_FLAG: u32 = 0x8000;

/// Flag set when the leap month is long.
const LONG_LEAP_FLAG: u32 = 0x1_0000;

/// An intercalary month inserted after the ordinary month of the same number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeapMonth {
    /// The ordinary month this leap month follows (1..=12).
    pub month: u8,
    /// Length of the leap month, 29 or 30.
    pub days: u8,
}

/// A single lunar year: ordinary month lengths plus an optional leap month.
///
/// # Examples
///
/// ```
/// use glance_lunar::LunarYear;
///
/// // 2023: leap month after the second month.
/// let year = LunarYear::decode(0x05b52);
/// assert_eq!(year.leap().map(|l| l.month), Some(2));
/// assert_eq!(year.days_in_year(), 384);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LunarYear {
    month_days: [u8; 12],
    leap: Option<LeapMonth>,
}

impl LunarYear {
    pub(crate) const EMPTY: Self = Self {
        month_days: [SHORT_MONTH_DAYS; 12],
        leap: None,
    };

    /// Decodes a packed year entry without validating it.
    ///
    /// Bits outside the packed layout are ignored. Use
    /// [`LunarYear::try_decode`] for untrusted input.
    #[must_use]
    pub const fn decode(packed: u32) -> Self {
        let mut month_days = [SHORT_MONTH_DAYS; 12];
        let mut i = 0;
        while i < 12 {
            if packed & (FIRST_MONTH_FLAG >> i) != 0 {
                month_days[i] = LONG_MONTH_DAYS;
            }
            i += 1;
        }

        let leap_month = (packed & 0xf) as u8;
        let leap = if leap_month == 0 {
            None
        } else {
            Some(LeapMonth {
                month: leap_month,
                days: if packed & LONG_LEAP_FLAG != 0 {
                    LONG_MONTH_DAYS
                } else {
                    SHORT_MONTH_DAYS
                },
            })
        };

        Self { month_days, leap }
    }

    /// Decodes a packed year entry, rejecting entries that use bits outside
    /// the layout or name a leap month above 12.
    ///
    /// # Errors
    ///
    /// Returns [`LunarError::InvalidYearEntry`] for malformed entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use glance_lunar::LunarYear;
    ///
    /// assert!(LunarYear::try_decode(2000, 0x0a4d0).is_ok());
    /// assert!(LunarYear::try_decode(2000, 0x0a4dd).is_err()); // leap month 13
    /// ```
    pub fn try_decode(year: i32, packed: u32) -> Result<Self> {
        if packed & !PACKED_MASK != 0 || packed & 0xf > 12 {
            return Err(LunarError::InvalidYearEntry {
                year,
                entry: packed,
            });
        }
        Ok(Self::decode(packed))
    }

    /// Returns the leap month, if the year has one.
    #[must_use]
    pub const fn leap(&self) -> Option<LeapMonth> {
        self.leap
    }

    /// Returns the lengths of the twelve ordinary months.
    #[must_use]
    pub const fn month_days(&self) -> &[u8; 12] {
        &self.month_days
    }

    /// Returns the number of days in the given month.
    ///
    /// Returns `None` if `month` is outside 1..=12, or if `leap` is requested
    /// for a month that is not this year's leap month.
    ///
    /// # Examples
    ///
    /// ```
    /// use glance_lunar::LunarYear;
    ///
    /// let year = LunarYear::decode(0x05b52);
    /// assert_eq!(year.days_in_month(2, true), Some(29));
    /// assert_eq!(year.days_in_month(3, true), None);
    /// ```
    #[must_use]
    pub fn days_in_month(&self, month: u8, leap: bool) -> Option<u8> {
        if !(1..=12).contains(&month) {
            return None;
        }
        if leap {
            return self.leap.filter(|l| l.month == month).map(|l| l.days);
        }
        Some(self.month_days[usize::from(month - 1)])
    }

    /// Returns the total number of days in the year, leap month included.
    #[must_use]
    pub fn days_in_year(&self) -> u32 {
        let ordinary: u32 = self.month_days.iter().map(|&d| u32::from(d)).sum();
        ordinary + self.leap.map_or(0, |l| u32::from(l.days))
    }

    /// Returns whether the year has 13 months.
    #[must_use]
    pub const fn has_leap_month(&self) -> bool {
        self.leap.is_some()
    }

    /// Iterates over the months of the year in calendar order.
    ///
    /// The leap month, if any, directly follows the ordinary month of the
    /// same number.
    ///
    /// # Examples
    ///
    /// ```
    /// use glance_lunar::{LunarYear, MonthSpan};
    ///
    /// let year = LunarYear::decode(0x05b52);
    /// let months: Vec<MonthSpan> = year.months().collect();
    /// assert_eq!(months.len(), 13);
    /// assert_eq!(months[2], MonthSpan { month: 2, is_leap: true, days: 29 });
    /// assert_eq!(months[3].month, 3);
    /// ```
    pub fn months(&self) -> impl Iterator<Item = MonthSpan> + '_ {
        (1..=12u8).flat_map(move |month| {
            let ordinary = MonthSpan {
                month,
                is_leap: false,
                days: self.month_days[usize::from(month - 1)],
            };
            let leap = self
                .leap
                .filter(|l| l.month == month)
                .map(|l| MonthSpan {
                    month,
                    is_leap: true,
                    days: l.days,
                });
            std::iter::once(ordinary).chain(leap)
        })
    }
}

/// One month of a lunar year as yielded by [`LunarYear::months`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthSpan {
    /// The month number (1..=12).
    pub month: u8,
    /// Whether this is the leap month following `month`.
    pub is_leap: bool,
    /// Number of days in the month.
    pub days: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_month_flags() {
        // 1950: no leap month, months 2, 3, 5, 6, 9, 11 are long.
        let year = LunarYear::decode(0x06ca0);
        assert_eq!(
            year.month_days(),
            &[29, 30, 30, 29, 30, 30, 29, 29, 30, 29, 30, 29]
        );
        assert!(!year.has_leap_month());
        assert_eq!(year.days_in_year(), 354);
    }

    #[test]
    fn decode_long_leap_month() {
        // 2017: leap month after month 6, 30 days long.
        let year = LunarYear::decode(0x15176);
        assert_eq!(year.leap(), Some(LeapMonth { month: 6, days: 30 }));
        assert_eq!(year.days_in_year(), 384);
    }

    #[test]
    fn decode_short_leap_month() {
        let year = LunarYear::decode(0x05b52);
        assert_eq!(year.leap(), Some(LeapMonth { month: 2, days: 29 }));
    }

    #[test]
    fn try_decode_rejects_high_bits() {
        assert_eq!(
            LunarYear::try_decode(1999, 0x2_0000),
            Err(LunarError::InvalidYearEntry {
                year: 1999,
                entry: 0x2_0000
            })
        );
    }

    #[test]
    fn try_decode_rejects_leap_month_above_twelve() {
        assert!(LunarYear::try_decode(1999, 0x0000f).is_err());
        assert!(LunarYear::try_decode(1999, 0x0000c).is_ok());
    }

    #[test]
    fn days_in_month_bounds() {
        let year = LunarYear::decode(0x06ca0);
        assert_eq!(year.days_in_month(0, false), None);
        assert_eq!(year.days_in_month(13, false), None);
        assert_eq!(year.days_in_month(1, false), Some(29));
        assert_eq!(year.days_in_month(2, false), Some(30));
        assert_eq!(year.days_in_month(2, true), None);
    }

    #[test]
    fn months_without_leap() {
        let year = LunarYear::decode(0x06ca0);
        let months: Vec<_> = year.months().collect();
        assert_eq!(months.len(), 12);
        assert!(months.iter().all(|m| !m.is_leap));
        let total: u32 = months.iter().map(|m| u32::from(m.days)).sum();
        assert_eq!(total, year.days_in_year());
    }

    #[test]
    fn months_leap_in_december() {
        let year = LunarYear::decode(0x0fffc);
        let last = year.months().last().unwrap();
        assert_eq!(
            last,
            MonthSpan {
                month: 12,
                is_leap: true,
                days: 29
            }
        );
    }
}
