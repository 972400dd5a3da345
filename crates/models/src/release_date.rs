//! `DD-MM-YYYY` release dates on the wire.
//!
//! Use as `#[serde(default, with = "release_date")]` on an `Option<NaiveDate>`.
//! An empty string or `null` decodes as an unknown date.

use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer, Serializer};

pub const DATE_FORMAT: &str = "%d-%m-%Y";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid date {value:?}: expected DD-MM-YYYY")]
pub struct DateParseError {
    pub value: String,
}

pub fn parse_date(value: &str) -> Result<NaiveDate, DateParseError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| DateParseError {
        value: value.to_string(),
    })
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match date {
        Some(date) => serializer.serialize_str(&format_date(*date)),
        None => serializer.serialize_none(),
    }
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") | Some("null") => Ok(None),
        Some(value) => parse_date(value).map(Some).map_err(de::Error::custom),
    }
}
