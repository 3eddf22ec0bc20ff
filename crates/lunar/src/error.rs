//! Error types for lunar calendar conversion.
//!
//! Conversion is a pure function, so the only failures are inputs that fall
//! outside what the year table can represent.

use chrono::NaiveDate;

/// Errors that can occur while converting dates or building year tables.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LunarError {
    /// The date falls outside the lunar years covered by the year table.
    #[error("year {year} is outside the supported range {first}..={last}")]
    UnsupportedYear {
        /// The Gregorian year that was requested.
        year: i32,
        /// The first lunar year covered by the table.
        first: i32,
        /// The last lunar year covered by the table.
        last: i32,
    },

    /// The year is covered, but the date precedes the table's first day or
    /// follows its last.
    #[error("date {date} is outside the lunar table, which covers {first} through {last}")]
    UnsupportedDate {
        /// The requested date.
        date: NaiveDate,
        /// First day of the table's first lunar year.
        first: NaiveDate,
        /// Last day of the table's last lunar year.
        last: NaiveDate,
    },

    /// The year/month/day triple is not a valid Gregorian date.
    #[error("invalid Gregorian date {year:04}-{month:02}-{day:02}")]
    InvalidDate {
        /// The requested year.
        year: i32,
        /// The requested month (1-based).
        month: u32,
        /// The requested day of month (1-based).
        day: u32,
    },

    /// A lunar month or day has no label.
    #[error("invalid lunar date: month {month} or day {day} out of range")]
    InvalidLunarDate {
        /// The month number, valid in 1..=12.
        month: u8,
        /// The day of month, valid in 1..=30.
        day: u8,
    },

    /// A packed year entry does not describe a valid lunar year.
    #[error("invalid table entry {entry:#07x} for lunar year {year}")]
    InvalidYearEntry {
        /// The lunar year the entry was meant to describe.
        year: i32,
        /// The raw packed value.
        entry: u32,
    },
}

impl LunarError {
    /// Returns whether the input was a real date the table cannot convert.
    #[must_use]
    pub fn is_unsupported(&self) -> bool {
        matches!(
            self,
            LunarError::UnsupportedYear { .. } | LunarError::UnsupportedDate { .. }
        )
    }
}

/// A specialized Result type for lunar calendar operations.
pub type Result<T> = std::result::Result<T, LunarError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = LunarError::UnsupportedYear {
            year: 1948,
            first: 1949,
            last: 2100,
        };
        assert_eq!(
            err.to_string(),
            "year 1948 is outside the supported range 1949..=2100"
        );

        let err = LunarError::UnsupportedDate {
            date: NaiveDate::from_ymd_opt(1949, 1, 28).unwrap(),
            first: NaiveDate::from_ymd_opt(1949, 1, 29).unwrap(),
            last: NaiveDate::from_ymd_opt(2101, 1, 28).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "date 1949-01-28 is outside the lunar table, which covers 1949-01-29 through 2101-01-28"
        );
        assert!(err.is_unsupported());

        let err = LunarError::InvalidDate {
            year: 2023,
            month: 2,
            day: 30,
        };
        assert_eq!(err.to_string(), "invalid Gregorian date 2023-02-30");
        assert!(!err.is_unsupported());

        let err = LunarError::InvalidYearEntry {
            year: 2000,
            entry: 0x0fffd,
        };
        assert_eq!(
            err.to_string(),
            "invalid table entry 0x0fffd for lunar year 2000"
        );
    }
}
