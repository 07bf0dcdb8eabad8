//! Lenient deserializers for request fields.
//!
//! Clients send numbers as JSON numbers or numeric strings, and dates as
//! `YYYY-MM-DD` or a full timestamp. Both forms are accepted; anything else
//! is still a deserialization error.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::de::{self, Deserializer};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Int(i64),
    Float(f64),
    Text(String),
}

impl NumberOrText {
    fn into_f64<E: de::Error>(self) -> Result<f64, E> {
        match self {
            NumberOrText::Int(n) => Ok(n as f64),
            NumberOrText::Float(n) => Ok(n),
            NumberOrText::Text(s) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .ok_or_else(|| E::custom(format!("invalid number: {:?}", s))),
        }
    }

    fn into_i32<E: de::Error>(self) -> Result<i32, E> {
        let n = match self {
            NumberOrText::Int(n) => n,
            NumberOrText::Float(f) if f.fract() == 0.0 => f as i64,
            NumberOrText::Float(f) => return Err(E::custom(format!("invalid integer: {}", f))),
            NumberOrText::Text(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| E::custom(format!("invalid integer: {:?}", s)))?,
        };
        i32::try_from(n).map_err(|_| E::custom(format!("integer out of range: {}", n)))
    }
}

pub fn i32_lenient<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    NumberOrText::deserialize(deserializer)?.into_i32()
}

pub fn f64_lenient<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    NumberOrText::deserialize(deserializer)?.into_f64()
}

/// Like [`f64_lenient`], with `null` meaning absent. Pair with `#[serde(default)]`.
pub fn opt_f64_lenient<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<NumberOrText>::deserialize(deserializer)?
        .map(NumberOrText::into_f64)
        .transpose()
}

/// Calendar date from `YYYY-MM-DD` or a timestamp; the time part is dropped.
pub fn date_lenient<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(raw.trim()).ok_or_else(|| de::Error::custom(format!("invalid date: {:?}", raw)))
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        // Keep the calendar day as written, in the sender's own offset
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        })
}
