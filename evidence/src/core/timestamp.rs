//! ISO-8601 timestamp parsing for milestone events.

use anyhow::{Result, anyhow, bail};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeDelta};

const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%dT%H:%M%z"];
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// A parsed milestone time.
///
/// Input without an offset stays naive. Naive and offset-aware times cannot be
/// compared or subtracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timestamp {
    Aware(DateTime<FixedOffset>),
    Naive(NaiveDateTime),
}

impl Timestamp {
    /// `self - earlier`, honouring offsets.
    pub fn since(&self, earlier: &Timestamp) -> Result<TimeDelta> {
        match (self, earlier) {
            (Self::Aware(later), Self::Aware(earlier)) => Ok(*later - *earlier),
            (Self::Naive(later), Self::Naive(earlier)) => Ok(*later - *earlier),
            _ => bail!("cannot compare {self} with {earlier}: only one has a UTC offset"),
        }
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Aware(at) => write!(f, "{}", at.to_rfc3339()),
            Self::Naive(at) => write!(f, "{}", at.format("%Y-%m-%dT%H:%M:%S%.f")),
        }
    }
}

/// Parse an ISO-8601 timestamp.
///
/// A trailing `Z` is read as `+00:00`. Explicit offsets are kept as given so
/// subtraction between mixed offsets stays exact. Timestamps without an
/// offset, and bare dates, parse as naive times. A space may stand in for the
/// `T` separator.
pub fn parse_timestamp(raw: &str) -> Result<Timestamp> {
    let trimmed = raw.trim();
    let mut normalized = match trimmed.strip_suffix('Z') {
        Some(head) => format!("{head}+00:00"),
        None => trimmed.to_string(),
    };
    if normalized.as_bytes().get(10) == Some(&b' ') {
        normalized.replace_range(10..11, "T");
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(&normalized) {
        return Ok(Timestamp::Aware(parsed));
    }
    for format in OFFSET_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(&normalized, format) {
            return Ok(Timestamp::Aware(parsed));
        }
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(&normalized, format) {
            return Ok(Timestamp::Naive(naive));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(&normalized, "%Y-%m-%d")
        && let Some(midnight) = date.and_hms_opt(0, 0, 0)
    {
        return Ok(Timestamp::Naive(midnight));
    }
    Err(anyhow!("invalid ISO-8601 timestamp {raw:?}"))
}
