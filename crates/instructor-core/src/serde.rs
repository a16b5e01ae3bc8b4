//! Lenient deserializers for query-string values.
//!
//! Browsers and HTTP clients often send empty parameters (`?page=&role=`). These helpers
//! treat an empty string as absent and report anything else that fails to parse as a
//! deserialization error, which the query extractor turns into a 400.

use std::fmt::Display;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use uuid::Uuid;

fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()))
}

pub fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match non_empty(deserializer)? {
        Some(s) => s
            .parse::<i64>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("'{s}' is not a valid integer"))),
        None => Ok(None),
    }
}

pub fn deserialize_optional_uuid<'de, D>(deserializer: D) -> Result<Option<Uuid>, D::Error>
where
    D: Deserializer<'de>,
{
    match non_empty(deserializer)? {
        Some(s) => Uuid::parse_str(&s)
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Accepts `YYYY-MM-DD`.
pub fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match non_empty(deserializer)? {
        Some(s) => NaiveDate::parse_from_str(&s, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("'{s}' is not a YYYY-MM-DD date"))),
        None => Ok(None),
    }
}

/// For enums and other `FromStr` types, e.g. `?role=TRAINER`.
pub fn deserialize_optional_from_str<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    match non_empty(deserializer)? {
        Some(s) => s.parse::<T>().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Query {
        #[serde(default, deserialize_with = "deserialize_optional_i64")]
        page: Option<i64>,
        #[serde(default, deserialize_with = "deserialize_optional_uuid")]
        id: Option<Uuid>,
        #[serde(default, deserialize_with = "deserialize_optional_date")]
        date: Option<NaiveDate>,
        #[serde(default, deserialize_with = "deserialize_optional_from_str")]
        flag: Option<bool>,
    }

    #[test]
    fn test_empty_values_are_none() {
        let q: Query =
            serde_json::from_str(r#"{"page":"","id":"","date":"","flag":""}"#).unwrap();
        assert!(q.page.is_none());
        assert!(q.flag.is_none());
        assert!(q.id.is_none());
        assert!(q.date.is_none());
    }

    #[test]
    fn test_missing_values_are_none() {
        let q: Query = serde_json::from_str("{}").unwrap();
        assert!(q.page.is_none());
        assert!(q.id.is_none());
        assert!(q.date.is_none());
    }

    #[test]
    fn test_valid_values_parse() {
        let q: Query = serde_json::from_str(
            r#"{"page":"3","id":"67e55044-10b1-426f-9247-bb680e5fe0c8","date":"2024-02-29"}"#,
        )
        .unwrap();
        assert_eq!(q.page, Some(3));
        assert!(q.id.is_some());
        assert_eq!(q.date, NaiveDate::from_ymd_opt(2024, 2, 29));
    }

    #[test]
    fn test_invalid_values_fail() {
        assert!(serde_json::from_str::<Query>(r#"{"page":"abc"}"#).is_err());
        assert!(serde_json::from_str::<Query>(r#"{"id":"not-a-uuid"}"#).is_err());
        assert!(serde_json::from_str::<Query>(r#"{"date":"29/02/2024"}"#).is_err());
        assert!(serde_json::from_str::<Query>(r#"{"flag":"maybe"}"#).is_err());
    }
}
