//! Date/time values in the service's wire format.
//!
//! # Design
//! The service sends either `YYYY-MM-DD` or `YYYY-MM-DD HH:MM:SS`, with no
//! offset. Both are wall-clock readings in [`SERVICE_ZONE`], so the same
//! literal can name different UTC instants depending on the date's
//! daylight-saving state. `Time` stores the resolved absolute instant and
//! compares by it, never by the original text.

use std::fmt;
use std::str::FromStr;

use chrono::{
    DateTime, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeDelta, TimeZone,
    Timelike, Utc,
};
use chrono_tz::Tz;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ParseError;
use crate::zone::SERVICE_ZONE;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// `d` marks a digit position, every other byte must match exactly.
const DATE_SHAPE: &[u8] = b"dddd-dd-dd";
const DATE_TIME_SHAPE: &[u8] = b"dddd-dd-dd dd:dd:dd";

/// An absolute point in time read from the service.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Time(DateTime<Tz>);

impl Time {
    /// The instant, expressed in the service zone.
    pub fn instant(&self) -> DateTime<Tz> {
        self.0
    }

    pub fn to_utc(&self) -> DateTime<Utc> {
        self.0.with_timezone(&Utc)
    }
}

/// Parses a wire literal as wall-clock time in the service zone.
pub fn parse_time(literal: &str) -> Result<Time, ParseError> {
    parse_time_in(literal, SERVICE_ZONE)
}

/// Parses a wire literal as wall-clock time in `zone`.
///
/// A literal containing a space must be `YYYY-MM-DD HH:MM:SS`; any other
/// literal must be `YYYY-MM-DD` and resolves to local midnight.
pub fn parse_time_in(literal: &str, zone: Tz) -> Result<Time, ParseError> {
    let naive = if literal.contains(' ') {
        check_shape(literal, DATE_TIME_SHAPE)?;
        let naive = NaiveDateTime::parse_from_str(literal, DATE_TIME_FORMAT)
            .map_err(|e| ParseError::time(literal, e.to_string()))?;
        if naive.nanosecond() >= 1_000_000_000 {
            return Err(ParseError::time(literal, "leap seconds are not accepted"));
        }
        naive
    } else {
        check_shape(literal, DATE_SHAPE)?;
        NaiveDate::parse_from_str(literal, DATE_FORMAT)
            .map_err(|e| ParseError::time(literal, e.to_string()))?
            .and_time(NaiveTime::MIN)
    };
    Ok(Time(resolve_local(zone, naive)))
}

fn check_shape(literal: &str, shape: &[u8]) -> Result<(), ParseError> {
    let bytes = literal.as_bytes();
    if bytes.len() != shape.len() {
        return Err(ParseError::time(
            literal,
            "expected YYYY-MM-DD or YYYY-MM-DD HH:MM:SS",
        ));
    }
    let matches = bytes.iter().zip(shape).all(|(&b, &s)| match s {
        b'd' => b.is_ascii_digit(),
        sep => b == sep,
    });
    if !matches {
        return Err(ParseError::time(
            literal,
            "expected YYYY-MM-DD or YYYY-MM-DD HH:MM:SS",
        ));
    }
    Ok(())
}

/// Maps a wall-clock reading in `zone` to an instant.
///
/// Readings repeated by a fall-back transition take the earlier instant.
/// Readings skipped by a spring-forward transition keep the offset in force
/// before the gap, so 01:30 on the London spring-forward day is 02:30 BST.
fn resolve_local(zone: Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    match zone.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => {
            let before = zone.offset_from_utc_datetime(&(naive - TimeDelta::days(1)));
            let utc = naive - TimeDelta::seconds(i64::from(before.fix().local_minus_utc()));
            zone.from_utc_datetime(&utc)
        }
    }
}

impl From<DateTime<Tz>> for Time {
    fn from(instant: DateTime<Tz>) -> Self {
        Time(instant)
    }
}

impl From<Time> for DateTime<Utc> {
    fn from(time: Time) -> Self {
        time.to_utc()
    }
}

impl FromStr for Time {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_time(s)
    }
}

/// Formats as the long wire shape in the zone the instant was read in.
impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_TIME_FORMAT))
    }
}

impl<'de> Deserialize<'de> for Time {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let literal = String::deserialize(deserializer)?;
        parse_time(&literal).map_err(D::Error::custom)
    }
}

impl Serialize for Time {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
