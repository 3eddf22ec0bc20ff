//! Traditional Chinese lunar calendar conversion for glance widgets.
//!
//! This crate turns a Gregorian date into the lunar year, month, and day
//! labels shown on calendar widgets (`癸卯年 闰二月 初一`). Conversion is a
//! pure function over a static year table covering lunar years 1949 through
//! 2100; it has no I/O and no shared mutable state, so it can be called from
//! any thread.
//!
//! # Overview
//!
//! The crate is organized into the following modules:
//!
//! - [`table`]: The builtin year table and the day-counting decode
//! - [`year`]: Decoded per-year records (month lengths, leap month)
//! - [`date`]: Lunar dates and their labels
//! - [`label`]: Glyph tables and the sexagenary cycle
//! - [`error`]: Error types for conversion
//!
//! # Examples
//!
//! ```
//! // 2023-03-22 is the first day of the leap second month.
//! let labels = glance_lunar::convert(2023, 3, 22)?;
//! assert_eq!(labels.year, "癸卯");
//! assert_eq!(labels.month, "闰二月");
//! assert_eq!(labels.day, "初一");
//! # Ok::<(), glance_lunar::LunarError>(())
//! ```

pub mod date;
pub mod error;
pub mod label;
pub mod table;
pub mod year;

// Re-export primary types at crate root for convenience
pub use date::{LunarDate, LunarDateLabels};
pub use error::{LunarError, Result};
pub use label::Sexagenary;
pub use table::{LunarTable, convert};
pub use year::{LeapMonth, LunarYear, MonthSpan};
