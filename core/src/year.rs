//! Academic year labels.
//!
//! eActivities groups reports by academic year, running from 1 August to 31
//! July in the service zone, and names each year by the last two digits of
//! its start and end: the year starting August 2014 is `"14-15"`.

use std::fmt;

use chrono::{DateTime, Datelike, TimeZone, Utc};
use chrono_tz::Tz;

use crate::zone::SERVICE_ZONE;

/// First month of a new academic year.
pub const CUTOFF_MONTH: u32 = 8;

/// A `"start-end"` academic year label such as `"14-15"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct YearLabel(String);

impl YearLabel {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for YearLabel {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for YearLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The academic year containing `date`, by the service zone's calendar.
pub fn date_to_year<Z: TimeZone>(date: &DateTime<Z>) -> YearLabel {
    date_to_year_in(date, SERVICE_ZONE)
}

/// The academic year containing `date`, by `zone`'s calendar.
///
/// The end year is the truncated start plus one, so 1999 gives `"99-100"`.
pub fn date_to_year_in<Z: TimeZone>(date: &DateTime<Z>, zone: Tz) -> YearLabel {
    let local = date.with_timezone(&zone);
    let mut start_year = local.year();
    if local.month() < CUTOFF_MONTH {
        start_year -= 1;
    }
    let start = start_year.rem_euclid(100);
    YearLabel(format!("{start}-{}", start + 1))
}

/// The academic year in progress right now.
pub fn current_year() -> YearLabel {
    date_to_year(&Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn at(rfc3339: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(rfc3339).unwrap()
    }

    #[test]
    fn exactly_changeover() {
        assert_eq!(date_to_year(&at("2016-08-01T00:00:00+01:00")).as_str(), "16-17");
    }

    #[test]
    fn changeover_in_france_is_still_july_in_london() {
        assert_eq!(date_to_year(&at("2016-08-01T00:00:00+02:00")).as_str(), "15-16");
    }

    #[test]
    fn last_moment_of_july() {
        assert_eq!(date_to_year(&at("2016-07-31T23:59:59+01:00")).as_str(), "15-16");
    }

    #[test]
    fn new_year_stays_in_same_academic_year() {
        assert_eq!(date_to_year(&at("2016-12-31T00:00:00+00:00")).as_str(), "16-17");
        assert_eq!(date_to_year(&at("2017-01-01T00:00:00+00:00")).as_str(), "16-17");
    }

    #[test]
    fn single_digit_years_are_not_padded() {
        assert_eq!(date_to_year(&at("2005-09-01T12:00:00+00:00")).as_str(), "5-6");
    }

    #[test]
    fn century_end_is_not_wrapped() {
        assert_eq!(date_to_year(&at("1999-10-01T12:00:00+00:00")).as_str(), "99-100");
        assert_eq!(date_to_year(&at("2000-03-01T12:00:00+00:00")).as_str(), "99-100");
        assert_eq!(date_to_year(&at("2000-08-01T12:00:00+00:00")).as_str(), "0-1");
    }

    #[test]
    fn zone_is_applied_before_reading_the_month() {
        let utc_july = at("2016-07-31T23:30:00+00:00");
        assert_eq!(date_to_year_in(&utc_july, chrono_tz::UTC).as_str(), "15-16");
        assert_eq!(date_to_year(&utc_july).as_str(), "16-17");
    }

    #[test]
    fn current_year_matches_today() {
        assert_eq!(current_year(), date_to_year(&Utc::now()));
    }
}
