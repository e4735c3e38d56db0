use chrono::{DateTime, Datelike, NaiveDate};

/// Parse a bill date: `YYYY-MM-DD`, or an RFC 3339 timestamp
pub fn parse_bill_date(date_str: &str) -> Option<NaiveDate> {
    let trimmed = date_str.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|dt| dt.date_naive())
}

/// Short month label used in the bills table (French, three letters)
fn short_month_name(month: u32) -> &'static str {
    match month {
        1 => "Jan", 2 => "Fév", 3 => "Mar", 4 => "Avr",
        5 => "Mai", 6 => "Jui", 7 => "Jui", 8 => "Aoû",
        9 => "Sep", 10 => "Oct", 11 => "Nov", 12 => "Déc",
        _ => "Jan",
    }
}

/// Format a bill date for display, e.g. `2020-01-01` -> `1 Jan. 20`.
/// Returns `None` when the input is not a date.
pub fn format_date(date_str: &str) -> Option<String> {
    let date = parse_bill_date(date_str)?;
    let year = format!("{:04}", date.year());
    Some(format!(
        "{} {}. {}",
        date.day(),
        short_month_name(date.month()),
        &year[year.len() - 2..]
    ))
}

/// Display form of a bill date, falling back to the raw string
pub fn format_date_or_raw(date_str: &str) -> String {
    format_date(date_str).unwrap_or_else(|| date_str.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_iso_dates() {
        assert_eq!(format_date("2020-01-01").as_deref(), Some("1 Jan. 20"));
        assert_eq!(format_date("2023-12-01").as_deref(), Some("1 Déc. 23"));
        assert_eq!(format_date("2004-04-04").as_deref(), Some("4 Avr. 04"));
        assert_eq!(format_date("2021-08-15").as_deref(), Some("15 Aoû. 21"));
    }

    #[test]
    fn test_format_rfc3339() {
        assert_eq!(
            format_date("2022-06-30T10:00:00+02:00").as_deref(),
            Some("30 Jui. 22")
        );
    }

    #[test]
    fn test_invalid_dates_are_kept_raw() {
        assert_eq!(format_date("not-a-date"), None);
        assert_eq!(format_date("2023-02-30"), None);
        assert_eq!(format_date_or_raw("not-a-date"), "not-a-date");
        assert_eq!(format_date_or_raw(""), "");
    }
}
