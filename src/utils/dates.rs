//! Date shape checks for manifest fields and PDF date-string parsing.
//!
//! Manifest dates are validated by shape only: a month of `13` still passes.
//! Calendar validation belongs to whoever renders the date.

use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone};
use regex::Regex;

/// Accepted manifest date shapes, tried in order.
static DATE_SHAPES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    vec![
        (Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").unwrap(), "YYYY-MM-DD"),
        (Regex::new(r"^[0-9]{4}/[0-9]{2}/[0-9]{2}$").unwrap(), "YYYY/MM/DD"),
        (Regex::new(r"^[0-9]{2}\.[0-9]{2}\.[0-9]{4}$").unwrap(), "DD.MM.YYYY"),
        (
            Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2} [0-9]{2}:[0-9]{2}:[0-9]{2}$").unwrap(),
            "YYYY-MM-DD HH:MM:SS",
        ),
        (Regex::new(r"^D:[0-9]{14}$").unwrap(), "D:YYYYMMDDHHMMSS"),
    ]
});

/// PDF date string: `D:YYYY[MM[DD[HH[mm[SS]]]]][Z|+HH'mm'|-HH'mm']`.
static PDF_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^D:([0-9]{4})([0-9]{2})?([0-9]{2})?([0-9]{2})?([0-9]{2})?([0-9]{2})?(?:(Z)|([+-])([0-9]{2})'?(?:([0-9]{2})'?)?)?",
    )
    .unwrap()
});

/// Check whether a manifest date token has one of the accepted shapes.
pub fn is_valid_date(value: &str) -> bool {
    DATE_SHAPES.iter().any(|(pattern, _)| pattern.is_match(value))
}

/// Human-readable list of accepted date shapes, for error hints.
pub fn accepted_date_shapes() -> Vec<&'static str> {
    DATE_SHAPES.iter().map(|(_, label)| *label).collect()
}

/// Parse a PDF info-dictionary date string into a timestamp with its offset.
///
/// Missing month/day default to `01`, missing time components to `00`, and a
/// missing or `Z` zone to UTC. Returns `None` for anything that is not a PDF
/// date or that names an impossible calendar date.
pub fn parse_pdf_date(value: &str) -> Option<DateTime<FixedOffset>> {
    let caps = PDF_DATE.captures(value.trim())?;

    let part = |idx: usize, default: u32| -> Option<u32> {
        match caps.get(idx) {
            Some(m) => m.as_str().parse().ok(),
            None => Some(default),
        }
    };

    let year: i32 = caps.get(1)?.as_str().parse().ok()?;
    let month = part(2, 1)?;
    let day = part(3, 1)?;
    let hour = part(4, 0)?;
    let minute = part(5, 0)?;
    let second = part(6, 0)?;

    let offset_seconds = match caps.get(8) {
        Some(sign) => {
            let hours = part(9, 0)? as i32;
            let minutes = part(10, 0)? as i32;
            let magnitude = hours * 3600 + minutes * 60;
            if sign.as_str() == "-" {
                -magnitude
            } else {
                magnitude
            }
        }
        None => 0,
    };

    let offset = FixedOffset::east_opt(offset_seconds)?;
    let naive = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, second)?;
    offset.from_local_datetime(&naive).single()
}
