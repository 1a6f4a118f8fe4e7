//! Parsing `Date` / `Modified` values and attaching the site timezone.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use quire_core::{Error, Result};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Parse a front-matter date.
///
/// Date-only values mean midnight. RFC 3339 values keep their wall-clock
/// time; the offset is discarded because documents are interpreted in the
/// site timezone.
///
/// ```
/// use quire_content::dates::parse_date;
///
/// let date = parse_date("2021-03-14 10:20").unwrap();
/// assert_eq!(date.to_string(), "2021-03-14 10:20:00");
/// ```
pub fn parse_date(text: &str) -> Result<NaiveDateTime> {
    let text = text.trim();

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(dt);
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Ok(date.and_time(chrono::NaiveTime::MIN));
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.naive_local());
    }

    Err(Error::invalid_data(format!("unrecognised date '{text}'")))
}

/// Parse an IANA timezone name such as `Europe/Warsaw`.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|e| Error::config(format!("unknown timezone '{name}': {e}")))
}

/// Interpret `naive` as wall-clock time in `tz`.
///
/// Ambiguous times (clocks going back) resolve to the earlier instant.
///
/// # Errors
///
/// Returns [`Error::InvalidData`] for times skipped by a DST transition.
pub fn localize(naive: &NaiveDateTime, tz: Tz) -> Result<DateTime<Tz>> {
    tz.from_local_datetime(naive).earliest().ok_or_else(|| {
        Error::invalid_data(format!("{naive} does not exist in timezone {}", tz.name()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_date_formats() {
        let cases = [
            ("2021-03-14", (2021, 3, 14, 0, 0)),
            ("2021-03-14 10:20", (2021, 3, 14, 10, 20)),
            ("2021-03-14 10:20:30", (2021, 3, 14, 10, 20)),
            ("2021/03/14", (2021, 3, 14, 0, 0)),
            ("2021/03/14 09:05", (2021, 3, 14, 9, 5)),
            ("2021-03-14T10:20", (2021, 3, 14, 10, 20)),
            ("2021-03-14T10:20:00+01:00", (2021, 3, 14, 10, 20)),
            ("  2021-03-14  ", (2021, 3, 14, 0, 0)),
        ];
        for (input, (y, m, d, h, min)) in cases {
            let dt = parse_date(input).unwrap_or_else(|e| panic!("{input}: {e}"));
            assert_eq!(
                (dt.year(), dt.month(), dt.day(), dt.hour(), dt.minute()),
                (y, m, d, h, min),
                "{input}"
            );
        }
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        for input in ["", "yesterday", "2021-13-01", "14.03.2021"] {
            let err = parse_date(input).unwrap_err();
            assert!(err.is_content_error(), "{input}");
        }
    }

    #[test]
    fn test_parse_timezone() {
        assert_eq!(parse_timezone("Europe/Warsaw").unwrap(), chrono_tz::Europe::Warsaw);
        assert!(parse_timezone("Mars/Olympus").is_err());
    }

    #[test]
    fn test_localize_offsets() {
        let winter = parse_date("2021-01-10 12:00").unwrap();
        let summer = parse_date("2021-07-10 12:00").unwrap();
        let tz = chrono_tz::Europe::Warsaw;
        assert_eq!(
            localize(&winter, tz).unwrap().to_rfc3339(),
            "2021-01-10T12:00:00+01:00"
        );
        assert_eq!(
            localize(&summer, tz).unwrap().to_rfc3339(),
            "2021-07-10T12:00:00+02:00"
        );
    }

    #[test]
    fn test_localize_skipped_time() {
        // Clocks in Warsaw jumped from 02:00 to 03:00 on 2021-03-28.
        let skipped = parse_date("2021-03-28 02:30").unwrap();
        assert!(localize(&skipped, chrono_tz::Europe::Warsaw).is_err());
    }
}
