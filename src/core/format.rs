//! Purpose: Parse record dates and format budgets/dates for display.
//! Exports: `parse_record_date`, `format_currency`, `format_date`, `INVALID_DATE`.
//! Role: Shared by the validator (date ordering) and view shaping (detail view).
//! Invariants: Date-only values are midnight UTC; timestamps keep their instant.
//! Invariants: Currency output is Thai baht with two decimals and comma grouping.

use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime};

/// Shown in place of a date that cannot be parsed.
pub const INVALID_DATE: &str = "Invalid Date";

/// Accepts `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM[:SS]` (read as UTC), and RFC 3339.
pub fn parse_record_date(raw: &str) -> Option<OffsetDateTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(ts) = OffsetDateTime::parse(trimmed, &Rfc3339) {
        return Some(ts);
    }
    if let Ok(date) = Date::parse(trimmed, format_description!("[year]-[month]-[day]")) {
        return Some(date.midnight().assume_utc());
    }
    let local_forms = [
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
        format_description!("[year]-[month]-[day]T[hour]:[minute]"),
    ];
    local_forms
        .iter()
        .find_map(|form| PrimitiveDateTime::parse(trimmed, form).ok())
        .map(PrimitiveDateTime::assume_utc)
}

/// Long US form, e.g. `January 5, 2024`.
pub fn format_date(raw: &str) -> String {
    let Some(ts) = parse_record_date(raw) else {
        return INVALID_DATE.to_string();
    };
    let date = ts.to_offset(time::UtcOffset::UTC).date();
    date.format(format_description!(
        "[month repr:long] [day padding:none], [year]"
    ))
    .unwrap_or_else(|_| INVALID_DATE.to_string())
}

/// Thai baht, e.g. `฿1,500.00` or `-฿20.50`.
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return "฿NaN".to_string();
    }
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}฿{}.{cents}", group_thousands(whole))
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{INVALID_DATE, format_currency, format_date, parse_record_date};

    #[test]
    fn currency_groups_and_rounds() {
        assert_eq!(format_currency(0.0), "฿0.00");
        assert_eq!(format_currency(1500.0), "฿1,500.00");
        assert_eq!(format_currency(1234567.891), "฿1,234,567.89");
        assert_eq!(format_currency(999.999), "฿1,000.00");
        assert_eq!(format_currency(-20.5), "-฿20.50");
    }

    #[test]
    fn dates_render_long_form() {
        assert_eq!(format_date("2024-01-05"), "January 5, 2024");
        assert_eq!(format_date("2024-12-31T23:00:00Z"), "December 31, 2024");
        assert_eq!(format_date("2024-03-01T09:30"), "March 1, 2024");
    }

    #[test]
    fn unparseable_dates_render_invalid() {
        assert_eq!(format_date(""), INVALID_DATE);
        assert_eq!(format_date("next tuesday"), INVALID_DATE);
        assert_eq!(format_date("2024-02-30"), INVALID_DATE);
    }

    #[test]
    fn timestamps_keep_their_instant() {
        let date_only = parse_record_date("2024-01-01").expect("date");
        let stamped = parse_record_date("2024-01-01T07:00:00+07:00").expect("ts");
        assert_eq!(date_only, stamped);
    }
}
