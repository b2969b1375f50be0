use crate::EngineError;

/// Years the planner lets the user pick, relative to the current year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    first: i32,
    last: i32,
}

impl YearRange {
    pub const YEARS_BACK: i32 = 2;
    pub const YEARS_AHEAD: i32 = 5;

    /// `current - 2 ..= current + 5`.
    pub fn around(current: i32) -> Self {
        Self {
            first: current - Self::YEARS_BACK,
            last: current + Self::YEARS_AHEAD,
        }
    }

    pub fn first(&self) -> i32 {
        self.first
    }

    pub fn last(&self) -> i32 {
        self.last
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.first..=self.last).contains(&year)
    }

    pub fn iter(&self) -> impl Iterator<Item = i32> + use<> {
        self.first..=self.last
    }

    pub fn check(&self, year: i32) -> Result<i32, EngineError> {
        if self.contains(year) {
            Ok(year)
        } else {
            Err(EngineError::InvalidYear(year))
        }
    }

    /// Following year, clamped to the range.
    pub fn next(&self, year: i32) -> i32 {
        (year + 1).clamp(self.first, self.last)
    }

    /// Previous year, clamped to the range.
    pub fn prev(&self, year: i32) -> i32 {
        (year - 1).clamp(self.first, self.last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_spans_two_back_five_ahead() {
        let range = YearRange::around(2025);
        assert_eq!(range.first(), 2023);
        assert_eq!(range.last(), 2030);
        assert_eq!(range.iter().count(), 8);
        assert!(range.contains(2025));
        assert!(!range.contains(2022));
        assert!(!range.contains(2031));
    }

    #[test]
    fn next_and_prev_are_clamped() {
        let range = YearRange::around(2025);
        assert_eq!(range.next(2030), 2030);
        assert_eq!(range.prev(2023), 2023);
        assert_eq!(range.next(2025), 2026);
        assert_eq!(range.prev(2025), 2024);
    }

    #[test]
    fn check_rejects_out_of_range() {
        let range = YearRange::around(2025);
        assert_eq!(range.check(2040), Err(EngineError::InvalidYear(2040)));
        assert_eq!(range.check(2024), Ok(2024));
    }
}
