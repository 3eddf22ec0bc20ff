//! Traditional names for lunar years, months, and days.
//!
//! Years are named with the sexagenary (stem and branch) cycle. Month and
//! day names come from fixed tables; day names in particular are irregular
//! (`初十`, `二十`, `廿一`, `三十`) and are listed explicitly rather than
//! composed from digits.

use std::fmt;

/// The ten heavenly stems.
pub const STEMS: [&str; 10] = ["甲", "乙", "丙", "丁", "戊", "己", "庚", "辛", "壬", "癸"];

/// The twelve earthly branches.
pub const BRANCHES: [&str; 12] = [
    "子", "丑", "寅", "卯", "辰", "巳", "午", "未", "申", "酉", "戌", "亥",
];

/// Zodiac animals, aligned with [`BRANCHES`].
pub const ZODIAC: [&str; 12] = [
    "鼠", "牛", "虎", "兔", "龙", "蛇", "马", "羊", "猴", "鸡", "狗", "猪",
];

/// Month names, index 0 = first month.
pub const MONTH_NAMES: [&str; 12] = [
    "一月", "二月", "三月", "四月", "五月", "六月", "七月", "八月", "九月", "十月", "冬月", "腊月",
];

/// Day-of-month names, index 0 = first day.
pub const DAY_NAMES: [&str; 30] = [
    "初一", "初二", "初三", "初四", "初五", "初六", "初七", "初八", "初九", "初十", //
    "十一", "十二", "十三", "十四", "十五", "十六", "十七", "十八", "十九", "二十", //
    "廿一", "廿二", "廿三", "廿四", "廿五", "廿六", "廿七", "廿八", "廿九", "三十",
];

/// Prefix marking an intercalary month.
pub const LEAP_MARKER: &str = "闰";

/// A position in the 60-year stem and branch cycle.
///
/// # Examples
///
/// ```
/// use glance_lunar::Sexagenary;
///
/// let cycle = Sexagenary::from_year(2024);
/// assert_eq!(cycle.to_string(), "甲辰");
/// assert_eq!(cycle.zodiac(), "龙");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sexagenary {
    stem: u8,
    branch: u8,
}

impl Sexagenary {
    /// Computes the stem and branch of a lunar year.
    ///
    /// Stem position is `(year - 3) mod 10` and branch position is
    /// `(year - 3) mod 12`, both counted from 1 with 0 wrapping to the last
    /// entry.
    #[must_use]
    pub fn from_year(year: i32) -> Self {
        // Shifting by one turns the 1-based position (0 wrapping to the end)
        // into a plain 0-based index.
        let index = year - 3 - 1;
        let stem = index.rem_euclid(10) as u8;
        let branch = index.rem_euclid(12) as u8;
        Self { stem, branch }
    }

    /// Returns the heavenly stem glyph.
    #[must_use]
    pub fn stem(&self) -> &'static str {
        STEMS[usize::from(self.stem)]
    }

    /// Returns the earthly branch glyph.
    #[must_use]
    pub fn branch(&self) -> &'static str {
        BRANCHES[usize::from(self.branch)]
    }

    /// Returns the zodiac animal of the branch.
    #[must_use]
    pub fn zodiac(&self) -> &'static str {
        ZODIAC[usize::from(self.branch)]
    }

    /// Returns the 0-based position in the 60-year cycle (`甲子` = 0).
    #[must_use]
    pub fn cycle_index(&self) -> u8 {
        // Chinese remainder: the unique n < 60 with n ≡ stem (10), n ≡ branch (12).
        (0..60u8)
            .find(|n| n % 10 == self.stem && n % 12 == self.branch)
            .unwrap_or(0)
    }
}

impl fmt::Display for Sexagenary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.stem(), self.branch())
    }
}

/// Returns the name of an ordinary month, `None` outside 1..=12.
#[must_use]
pub fn month_name(month: u8) -> Option<&'static str> {
    MONTH_NAMES.get(usize::from(month).checked_sub(1)?).copied()
}

/// Returns the name of a day of month, `None` outside 1..=30.
#[must_use]
pub fn day_name(day: u8) -> Option<&'static str> {
    DAY_NAMES.get(usize::from(day).checked_sub(1)?).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sexagenary_known_years() {
        assert_eq!(Sexagenary::from_year(1949).to_string(), "己丑");
        assert_eq!(Sexagenary::from_year(1984).to_string(), "甲子");
        assert_eq!(Sexagenary::from_year(1999).to_string(), "己卯");
        assert_eq!(Sexagenary::from_year(2020).to_string(), "庚子");
        assert_eq!(Sexagenary::from_year(2023).to_string(), "癸卯");
        assert_eq!(Sexagenary::from_year(2100).to_string(), "庚申");
    }

    #[test]
    fn sexagenary_wraps_at_zero_remainder() {
        // (2023 - 3) mod 10 == 0 selects the tenth stem.
        assert_eq!(Sexagenary::from_year(2023).stem(), "癸");
        // (2019 - 3) mod 12 == 0 selects the twelfth branch.
        assert_eq!(Sexagenary::from_year(2019).branch(), "亥");
    }

    #[test]
    fn cycle_index_repeats_every_sixty_years() {
        assert_eq!(Sexagenary::from_year(1984).cycle_index(), 0);
        assert_eq!(Sexagenary::from_year(2043).cycle_index(), 59);
        for year in 1949..2040 {
            assert_eq!(
                Sexagenary::from_year(year),
                Sexagenary::from_year(year + 60)
            );
        }
    }

    #[test]
    fn zodiac_follows_branch() {
        assert_eq!(Sexagenary::from_year(2020).zodiac(), "鼠");
        assert_eq!(Sexagenary::from_year(2024).zodiac(), "龙");
    }

    #[test]
    fn month_names() {
        assert_eq!(month_name(0), None);
        assert_eq!(month_name(1), Some("一月"));
        assert_eq!(month_name(10), Some("十月"));
        assert_eq!(month_name(11), Some("冬月"));
        assert_eq!(month_name(12), Some("腊月"));
        assert_eq!(month_name(13), None);
    }

    #[test]
    fn day_name_bands() {
        insta::assert_snapshot!(DAY_NAMES[..10].join(" "), @"初一 初二 初三 初四 初五 初六 初七 初八 初九 初十");
        insta::assert_snapshot!(DAY_NAMES[10..19].join(" "), @"十一 十二 十三 十四 十五 十六 十七 十八 十九");
        insta::assert_snapshot!(DAY_NAMES[20..29].join(" "), @"廿一 廿二 廿三 廿四 廿五 廿六 廿七 廿八 廿九");
        assert_eq!(day_name(20), Some("二十"));
        assert_eq!(day_name(30), Some("三十"));
        assert_eq!(day_name(0), None);
        assert_eq!(day_name(31), None);
    }
}
