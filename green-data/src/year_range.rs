//! Inclusive year ranges used by the display controls.

use serde::{Deserialize, Serialize};
use std::fmt;

/// First year covered by the greenness table.
pub const FIRST_YEAR: i32 = 2001;

/// Most recent year covered by the greenness table; the "current" values are
/// recorded for this year.
pub const LAST_YEAR: i32 = 2022;

/// An inclusive range of years with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawYearRange")]
pub struct YearRange {
    start: i32,
    end: i32,
}

#[derive(Deserialize)]
struct RawYearRange {
    start: i32,
    end: i32,
}

impl TryFrom<RawYearRange> for YearRange {
    type Error = String;

    fn try_from(raw: RawYearRange) -> Result<Self, Self::Error> {
        YearRange::new(raw.start, raw.end)
            .ok_or_else(|| format!("year range {}-{} starts after it ends", raw.start, raw.end))
    }
}

impl YearRange {
    /// The full span of the dataset.
    pub const FULL: YearRange = YearRange {
        start: FIRST_YEAR,
        end: LAST_YEAR,
    };

    /// Returns `None` when `start > end`.
    pub fn new(start: i32, end: i32) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    pub fn start(&self) -> i32 {
        self.start
    }

    pub fn end(&self) -> i32 {
        self.end
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.start..=self.end).contains(&year)
    }

    /// Whether this range lies entirely inside `bounds`.
    pub fn within(&self, bounds: &YearRange) -> bool {
        bounds.start <= self.start && self.end <= bounds.end
    }
}

impl Default for YearRange {
    fn default() -> Self {
        YearRange::FULL
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_inverted_range() {
        assert!(YearRange::new(2010, 2005).is_none());
        assert!(YearRange::new(2010, 2010).is_some());
    }

    #[test]
    fn contains_is_inclusive() {
        let range = YearRange::new(2005, 2007).unwrap();
        assert!(range.contains(2005));
        assert!(range.contains(2007));
        assert!(!range.contains(2008));
        assert!(!range.contains(2004));
    }

    #[test]
    fn within_bounds() {
        let wide = YearRange::new(1995, 2010).unwrap();
        assert!(!wide.within(&YearRange::FULL));
        assert!(YearRange::new(2001, 2010).unwrap().within(&YearRange::FULL));
        assert!(YearRange::FULL.within(&YearRange::FULL));
    }
}
