//! Date normalization for bank statement text.
//!
//! Two jobs, kept separate: cheap per-bank literal validators used to decide
//! whether a row starts a new record, and actual conversion into a calendar
//! date. Two-digit years always expand into the 2000s.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

/// Formats tried in order by the generic CSV parser
const DATE_FORMATS: &[&str] = &[
    "%d/%m/%Y", // 31/12/2024
    "%d-%m-%Y", // 31-12-2024
    "%Y-%m-%d", // 2024-12-31
    "%d %b %Y", // 31 Dec 2024
    "%d %B %Y", // 31 December 2024
];

static ZENITH_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}/\d{2}/\d{4}$").expect("zenith date regex"));
static GTBANK_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}-[A-Za-z]{3}-\d{4}$").expect("gtbank date regex"));

/// Parse a date from the formats Nigerian banks use, first match wins.
pub fn parse_statement_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    // 31/12/24 and 31-12-24 must be expanded before the format list runs:
    // chrono's %Y also accepts two-digit years and would read them as the
    // first century (and %y pivots at 1969 rather than expanding to 20YY)
    if let Some(date) =
        parse_two_digit_year(trimmed, '/').or_else(|| parse_two_digit_year(trimmed, '-'))
    {
        return Some(date);
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(date);
        }
    }
    None
}

fn parse_two_digit_year(raw: &str, sep: char) -> Option<NaiveDate> {
    let parts: Vec<&str> = raw.split(sep).collect();
    if parts.len() != 3 || parts[2].len() != 2 {
        return None;
    }
    let day: u32 = parts[0].parse().ok()?;
    let month: u32 = parts[1].parse().ok()?;
    let year: i32 = parts[2].parse().ok()?;
    NaiveDate::from_ymd_opt(2000 + year, month, day)
}

/// Does this cell look like a Zenith Bank transaction date (DD/MM/YYYY)?
pub fn is_valid_date_zenith(raw: &str) -> bool {
    ZENITH_DATE_RE.is_match(raw.trim())
}

/// Does this cell look like a GTBank transaction date (DD-MMM-YYYY)?
pub fn is_valid_date_gtbank(raw: &str) -> bool {
    GTBANK_DATE_RE.is_match(raw.trim())
}

/// Month number for a three-letter abbreviation, case-insensitive.
///
/// Unrecognized abbreviations fall back to January; that is a data-quality
/// concern worth a warning, not a reason to drop the row.
fn month_from_abbrev(abbrev: &str) -> u32 {
    match abbrev.to_lowercase().as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        other => {
            log::warn!("unrecognized month abbreviation {other:?}, assuming January");
            1
        }
    }
}

/// Convert a GTBank date (DD-MMM-YYYY) to the standard DD/MM/YYYY form.
/// Inputs that do not split into three parts pass through unchanged.
pub fn gtbank_date_to_standard(raw: &str) -> String {
    let parts: Vec<&str> = raw.trim().split('-').collect();
    if parts.len() != 3 {
        return raw.to_string();
    }
    format!("{}/{:02}/{}", parts[0], month_from_abbrev(parts[1]), parts[2])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_generic_formats_in_priority_order() {
        assert_eq!(parse_statement_date("31/12/2024"), Some(date(2024, 12, 31)));
        assert_eq!(parse_statement_date("31-12-2024"), Some(date(2024, 12, 31)));
        assert_eq!(parse_statement_date("2024-12-31"), Some(date(2024, 12, 31)));
        assert_eq!(parse_statement_date("31 Dec 2024"), Some(date(2024, 12, 31)));
        assert_eq!(parse_statement_date("31 December 2024"), Some(date(2024, 12, 31)));
    }

    #[test]
    fn test_two_digit_years_expand_to_2000s() {
        assert_eq!(parse_statement_date("31/12/24"), Some(date(2024, 12, 31)));
        assert_eq!(parse_statement_date("01-01-99"), Some(date(2099, 1, 1)));
        assert_eq!(parse_statement_date("09/01/25"), Some(date(2025, 1, 9)));
    }

    #[test]
    fn test_two_digit_years_never_read_as_first_century() {
        // Lenient %Y parsing must not see these before expansion does
        let parsed = parse_statement_date("31/12/24").unwrap();
        assert_eq!(parsed.year(), 2024);
        let parsed = parse_statement_date("01-01-99").unwrap();
        assert_eq!(parsed.year(), 2099);
    }

    #[test]
    fn test_four_digit_forms_unaffected_by_expansion_order() {
        assert_eq!(parse_statement_date("31/12/2024"), Some(date(2024, 12, 31)));
        assert_eq!(parse_statement_date("31-12-2024"), Some(date(2024, 12, 31)));
        assert_eq!(parse_statement_date("2024-12-31"), Some(date(2024, 12, 31)));
        assert_eq!(parse_statement_date("2024-12-09"), Some(date(2024, 12, 9)));
    }

    #[test]
    fn test_invalid_dates_are_absent() {
        assert_eq!(parse_statement_date("32/13/2024"), None);
        assert_eq!(parse_statement_date("OPENING BALANCE"), None);
        assert_eq!(parse_statement_date(""), None);
    }

    #[test]
    fn test_zenith_validator_is_shape_only() {
        assert!(is_valid_date_zenith("01/12/2024"));
        assert!(is_valid_date_zenith(" 01/12/2024 "));
        assert!(!is_valid_date_zenith("1/12/2024"));
        assert!(!is_valid_date_zenith("01-Dec-2024"));
        assert!(!is_valid_date_zenith("TRANSFER"));
    }

    #[test]
    fn test_gtbank_validator() {
        assert!(is_valid_date_gtbank("01-Dec-2025"));
        assert!(is_valid_date_gtbank("15-jan-2024"));
        assert!(!is_valid_date_gtbank("01/12/2025"));
        assert!(!is_valid_date_gtbank("01-December-2025"));
    }

    #[test]
    fn test_gtbank_date_conversion() {
        assert_eq!(gtbank_date_to_standard("01-Dec-2025"), "01/12/2025");
        assert_eq!(gtbank_date_to_standard("15-JAN-2024"), "15/01/2024");
        // Unknown month falls back to January
        assert_eq!(gtbank_date_to_standard("15-Xxx-2024"), "15/01/2024");
        // Unsplittable input passes through
        assert_eq!(gtbank_date_to_standard("garbage"), "garbage");
    }
}
