use chrono::{DateTime, Utc};

/// `HH:MM` in UTC, as shown beside chat messages.
#[must_use]
pub fn format_time_of_day(value: DateTime<Utc>) -> String {
    value.format("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use textbook_core::time::fixed_now;

    #[test]
    fn formats_hours_and_minutes() {
        assert_eq!(format_time_of_day(fixed_now()), "22:13");
    }
}
