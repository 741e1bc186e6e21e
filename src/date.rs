//! Normalizes the heterogeneous date strings found in content front-matter
//! into a single comparable [`SortKey`]. Authors write dates in whichever
//! format is natural for the field: absolute day-first dates for articles
//! (`15.03.2024`), human-readable ranges for project and experience periods
//! (`July 2024 - January 2025`, `2018 - 2020`, `July 2017 - Present`), and
//! ISO literals everywhere else. The classifier sorts each raw string into
//! exactly one [`RawDate`] variant and each variant has its own converter,
//! so the precedence between overlapping patterns is an explicit rule
//! rather than an accident of check order.

use chrono::NaiveDate;

/// A comparable value derived from a document's raw date field, used purely
/// for ordering collections (most recent first). The variant order gives
/// the total order: an open-ended period sorts above every concrete date
/// (a current role outranks any completed one, even one dated in the
/// future), and an unparseable date sorts below everything instead of
/// failing the build.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey {
    /// The raw string matched no recognized format. Documents with an
    /// invalid date sort last rather than blocking the whole collection.
    Invalid,

    /// A concrete calendar date. Range formats without a day component
    /// compare as the first of their month.
    Date(NaiveDate),

    /// An open-ended period (`... - Present`). Sorts above every
    /// [`SortKey::Date`].
    Ongoing,
}

/// The format class of a raw date string.
#[derive(Debug, PartialEq, Eq)]
enum RawDate<'a> {
    /// `DD.MM.YYYY`, day first. Chosen iff splitting on `.` yields exactly
    /// three numeric parts, which is the tie-break rule for strings that
    /// would otherwise also match the range pattern.
    DayFirst {
        day: &'a str,
        month: &'a str,
        year: &'a str,
    },

    /// A ` - `-separated range. Only the end boundary participates in
    /// ordering; the start is display-only.
    RangeEnd(&'a str),

    /// Anything else; parsed as an ISO-style literal (`YYYY-MM-DD`,
    /// `YYYY-MM`, or a bare `YYYY`).
    Literal(&'a str),
}

fn classify(raw: &str) -> RawDate {
    let parts: Vec<&str> = raw.split('.').map(str::trim).collect();
    if let [day, month, year] = parts[..] {
        if [day, month, year]
            .iter()
            .all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()))
        {
            return RawDate::DayFirst { day, month, year };
        }
    }
    match raw.split_once(" - ") {
        Some((_, end)) => RawDate::RangeEnd(end.trim()),
        None => RawDate::Literal(raw.trim()),
    }
}

/// Derives the [`SortKey`] for a raw front-matter date string.
pub fn sort_key(raw: &str) -> SortKey {
    match classify(raw) {
        RawDate::DayFirst { day, month, year } => day_first_key(day, month, year),
        RawDate::RangeEnd(end) => range_end_key(end),
        RawDate::Literal(literal) => literal_key(literal),
    }
}

fn day_first_key(day: &str, month: &str, year: &str) -> SortKey {
    match (
        year.parse::<i32>(),
        month.parse::<u32>(),
        day.parse::<u32>(),
    ) {
        (Ok(y), Ok(m), Ok(d)) => date_key(y, m, d),
        _ => SortKey::Invalid,
    }
}

fn range_end_key(end: &str) -> SortKey {
    if end == "Present" {
        return SortKey::Ongoing;
    }
    let mut words = end.split_whitespace();
    match (words.next(), words.next(), words.next()) {
        // `Month YYYY`
        (Some(month), Some(year), None) => {
            match (month_ordinal(month), year.parse::<i32>()) {
                (Some(m), Ok(y)) => date_key(y, m, 1),
                _ => SortKey::Invalid,
            }
        }
        // A bare `YYYY`, as in experience periods like `2018 - 2020`.
        (Some(year), None, None) => match year.parse::<i32>() {
            Ok(y) => date_key(y, 1, 1),
            Err(_) => SortKey::Invalid,
        },
        _ => SortKey::Invalid,
    }
}

fn literal_key(literal: &str) -> SortKey {
    if let Ok(date) = NaiveDate::parse_from_str(literal, "%Y-%m-%d") {
        return SortKey::Date(date);
    }
    // `chrono` has no day-less or month-less calendar type, so the
    // truncated ISO forms are filled in with the first of the month/year.
    let mut parts = literal.splitn(2, '-');
    match (
        parts.next().map(str::parse::<i32>),
        parts.next().map(str::parse::<u32>),
    ) {
        (Some(Ok(y)), Some(Ok(m))) => date_key(y, m, 1),
        (Some(Ok(y)), None) => date_key(y, 1, 1),
        _ => SortKey::Invalid,
    }
}

fn date_key(year: i32, month: u32, day: u32) -> SortKey {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => SortKey::Date(date),
        None => SortKey::Invalid,
    }
}

/// Resolves an English month name to its 1-based calendar ordinal.
fn month_ordinal(name: &str) -> Option<u32> {
    const MONTHS: [&str; 12] = [
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
    MONTHS
        .iter()
        .position(|m| *m == name)
        .map(|i| i as u32 + 1)
}

#[cfg(test)]
mod test {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> SortKey {
        SortKey::Date(NaiveDate::from_ymd(y, m, d))
    }

    #[test]
    fn test_day_first() {
        assert_eq!(sort_key("15.03.2024"), date(2024, 3, 15));
    }

    #[test]
    fn test_month_range_uses_end_boundary() {
        assert_eq!(sort_key("July 2024 - January 2025"), date(2025, 1, 1));
    }

    #[test]
    fn test_year_range_uses_end_boundary() {
        assert_eq!(sort_key("2018 - 2020"), date(2020, 1, 1));
    }

    #[test]
    fn test_iso_literal() {
        assert_eq!(sort_key("2024-08-15"), date(2024, 8, 15));
    }

    #[test]
    fn test_truncated_iso_literals() {
        assert_eq!(sort_key("2025-09"), date(2025, 9, 1));
        assert_eq!(sort_key("2020"), date(2020, 1, 1));
    }

    #[test]
    fn test_present_outranks_future_dates() {
        let ongoing = sort_key("July 2017 - Present");
        assert_eq!(ongoing, SortKey::Ongoing);
        assert!(ongoing > sort_key("2999-12-31"));
    }

    #[test]
    fn test_day_first_outranks_earlier_iso_date() {
        // Jan 10 must sort above Jan 5 even though the raw strings use
        // different formats.
        assert!(sort_key("10.01.2025") > sort_key("2025-01-05"));
    }

    #[test]
    fn test_unparseable_sorts_last() {
        assert_eq!(sort_key("soonish"), SortKey::Invalid);
        assert!(sort_key("soonish") < sort_key("0001-01-01"));
    }

    #[test]
    fn test_dot_pattern_requires_three_numeric_parts() {
        // `v1.2` splits on `.` into two parts; `1.2.3 beta` has a
        // non-numeric part. Both fall through to the literal parser and
        // come out invalid rather than as nonsense dates.
        assert_eq!(sort_key("v1.2"), SortKey::Invalid);
        assert_eq!(sort_key("1.2.3 beta"), SortKey::Invalid);
    }

    #[test]
    fn test_range_with_unknown_month_is_invalid() {
        assert_eq!(sort_key("Smarch 2024 - Smarch 2025"), SortKey::Invalid);
    }

    #[test]
    fn test_impossible_calendar_date_is_invalid() {
        assert_eq!(sort_key("31.02.2024"), SortKey::Invalid);
    }
}
