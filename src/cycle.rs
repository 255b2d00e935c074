//! Rotating-menu cycle selection.
//!
//! Two sources rotate through four numbered weekly menus but disagree on the
//! offset: Bombay Bistro numbers its sections from `week % 4 + 1`, the Masala
//! lookup table from `(week - 1) % 4 + 1`. Both formulas are kept as-is;
//! each adapter uses the one its own section layout was observed to follow.

use chrono::{Datelike, Local};

/// ISO week number of the current local date.
pub fn current_iso_week() -> u32 {
    Local::now().iso_week().week()
}

/// 1-based cycle selector, `week % cycles + 1`.
pub fn cycle_index(week: u32, cycles: u32) -> u32 {
    week % cycles + 1
}

/// 1-based cycle selector with a one-week offset, `(week - 1) % cycles + 1`.
/// ISO week numbers start at 1, so the subtraction cannot underflow for
/// calendar input.
pub fn cycle_index_shifted(week: u32, cycles: u32) -> u32 {
    (week.max(1) - 1) % cycles + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_week_rotation_stays_in_range_with_period_four() {
        for week in 1..=53 {
            let idx = cycle_index(week, 4);
            assert!((1..=4).contains(&idx), "week {week} gave {idx}");
            assert_eq!(idx, cycle_index(week + 4, 4));

            let idx = cycle_index_shifted(week, 4);
            assert!((1..=4).contains(&idx), "week {week} gave {idx}");
            assert_eq!(idx, cycle_index_shifted(week + 4, 4));
        }
    }

    #[test]
    fn the_two_families_differ_by_one() {
        assert_eq!(cycle_index(20, 4), 1);
        assert_eq!(cycle_index_shifted(20, 4), 4);
    }
}
