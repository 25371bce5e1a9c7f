//! Release-year extraction from the two date shapes the wiki hands back.

use chrono::DateTime;

/// Year of the first entry in a `;`-separated list of ISO-like dates.
///
/// `"2018-05-04;2018-05-04"` gives `"2018"`. Empty input gives `""`.
pub fn year_from_release_dates(raw: &str) -> String {
    raw.split(';')
        .next()
        .map(str::trim)
        .and_then(|first| first.split('-').next())
        .unwrap_or("")
        .to_string()
}

/// Four-digit UTC year of a Unix timestamp, as Semantic MediaWiki reports it
/// in date printouts.
pub fn year_from_timestamp(seconds: i64) -> Option<String> {
    DateTime::from_timestamp(seconds, 0).map(|dt| dt.format("%Y").to_string())
}

/// Same as [`year_from_timestamp`] for the string-encoded timestamps found in
/// JSON results. Unparseable input yields `None`.
pub fn year_from_timestamp_str(raw: &str) -> Option<String> {
    raw.trim().parse::<i64>().ok().and_then(year_from_timestamp)
}
