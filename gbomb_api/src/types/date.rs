//! The upstream's loosely formatted date strings.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, ParseError};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Layout of a date with time, e.g. `2017-10-27 00:00:00`.
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Layout of a date without time, e.g. `2017-10-27`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const DATE_TIME_LEN: usize = 19;
const DATE_LEN: usize = 10;

/// A date as sent by the API, kept verbatim.
///
/// Two encodings occur: `YYYY-MM-DD HH:MM:SS` and `YYYY-MM-DD`. Parsing is
/// deferred until [`Date::time`] or [`Date::try_time`] is called. `time()` is
/// lenient: a string of any other length, or one that fails to parse, yields
/// the Unix epoch instead of an error. Callers that need to tell a real
/// midnight-1970 apart from garbage should use `try_time()`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Date {
    raw: String,
}

impl Date {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// The string exactly as received (minus stray wrapping quotes).
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Parses the date, falling back to the epoch when the string is unusable.
    pub fn time(&self) -> NaiveDateTime {
        self.try_time().unwrap_or_default()
    }

    /// Parses the date and reports why it failed.
    ///
    /// Strings that are neither 19 nor 10 characters long are parsed against
    /// an empty layout, which chrono always rejects.
    pub fn try_time(&self) -> Result<NaiveDateTime, ParseError> {
        match self.raw.len() {
            DATE_TIME_LEN => NaiveDateTime::parse_from_str(&self.raw, DATE_TIME_FORMAT),
            DATE_LEN => NaiveDate::parse_from_str(&self.raw, DATE_FORMAT)
                .map(|d| d.and_time(chrono::NaiveTime::MIN)),
            _ => NaiveDateTime::parse_from_str(&self.raw, ""),
        }
    }

    /// True when the string is empty (the API sent `null` or `""`).
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for Date {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        Ok(Date::new(strip_quotes(&raw)))
    }
}

impl Serialize for Date {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.raw)
    }
}

/// The API occasionally double-encodes its quotes; drop one from each end.
fn strip_quotes(raw: &str) -> &str {
    let raw = raw.strip_prefix('"').unwrap_or(raw);
    raw.strip_suffix('"').unwrap_or(raw)
}
