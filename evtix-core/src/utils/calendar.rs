use time::{Date, Duration, OffsetDateTime};

/// Returns the `days` calendar dates ending at `today` (inclusive), oldest first.
pub fn trailing_days(today: Date, days: u16) -> Vec<Date> {
    (0..i64::from(days))
        .rev()
        .filter_map(|offset| today.checked_sub(Duration::days(offset)))
        .collect()
}

/// Midnight UTC at the start of `date`.
pub fn start_of_day(date: Date) -> OffsetDateTime {
    date.midnight().assume_utc()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    #[test]
    fn test_trailing_days_spans_month_boundary() {
        let days = trailing_days(date!(2026 - 03 - 02), 5);
        assert_eq!(
            days,
            vec![
                date!(2026 - 02 - 26),
                date!(2026 - 02 - 27),
                date!(2026 - 02 - 28),
                date!(2026 - 03 - 01),
                date!(2026 - 03 - 02),
            ]
        );
    }

    #[test]
    fn test_trailing_days_length() {
        assert_eq!(trailing_days(date!(2026 - 10 - 19), 30).len(), 30);
        assert!(trailing_days(date!(2026 - 10 - 19), 0).is_empty());
    }

    #[test]
    fn test_start_of_day() {
        assert_eq!(
            start_of_day(date!(2026 - 10 - 19)),
            datetime!(2026-10-19 00:00 UTC)
        );
    }
}
