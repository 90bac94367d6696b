//! Shared utility functions for temperature matrix crates.

/// Date utility functions
pub mod dates {
    use chrono::NaiveDate;

    /// Date format used by the daily temperature CSV: "YYYY-MM-DD"
    pub const DAY_FORMAT: &str = "%Y-%m-%d";

    /// English month names, January first.
    pub const MONTH_NAMES: [&str; 12] = [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ];

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format(DAY_FORMAT).to_string()
    }

    /// Parse a date string in "YYYY-MM-DD" format
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s.trim(), DAY_FORMAT)?)
    }

    /// Format a year and month as "YYYY-MM" (month zero-padded).
    pub fn month_label(year: i32, month: u32) -> String {
        format!("{year:04}-{month:02}")
    }

    /// Full English name for a month in 1..=12.
    pub fn month_name(month: u32) -> Option<&'static str> {
        match month {
            1..=12 => Some(MONTH_NAMES[(month - 1) as usize]),
            _ => None,
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use chrono::NaiveDate;

        #[test]
        fn test_format_and_parse() {
            let date = NaiveDate::from_ymd_opt(2023, 6, 15).unwrap();
            let formatted = format_date(&date);
            assert_eq!(formatted, "2023-06-15");
            let parsed = parse_date(&formatted).unwrap();
            assert_eq!(parsed, date);
        }

        #[test]
        fn test_parse_rejects_garbage() {
            assert!(parse_date("2023-13-01").is_err());
            assert!(parse_date("15/06/2023").is_err());
            assert!(parse_date("").is_err());
        }

        #[test]
        fn test_month_label_pads() {
            assert_eq!(month_label(2023, 1), "2023-01");
            assert_eq!(month_label(1999, 12), "1999-12");
        }

        #[test]
        fn test_month_name() {
            assert_eq!(month_name(1), Some("January"));
            assert_eq!(month_name(12), Some("December"));
            assert_eq!(month_name(0), None);
            assert_eq!(month_name(13), None);
        }
    }
}

/// Number formatting helpers
pub mod numbers {
    /// Round to the nearest integer, with halves going toward positive infinity.
    ///
    /// `f64::round` sends -2.5 to -3; tooltips report -2.
    pub fn round_half_up(value: f64) -> f64 {
        (value + 0.5).floor()
    }

}
