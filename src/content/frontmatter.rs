//! Front-matter parsing

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use thiserror::Error;

/// Serialization format of a normalized `pubDate`
const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Custom deserializer that accepts any YAML scalar as a string
fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct ScalarString;

    impl<'de> Visitor<'de> for ScalarString {
        type Value = Option<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string, number or boolean")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }
    }

    deserializer.deserialize_any(ScalarString)
}

/// Front-matter of a post
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    #[serde(deserialize_with = "scalar_string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub description: Option<String>,
    /// Kept raw; see [`FrontMatter::pub_date`]
    #[serde(rename = "pubDate")]
    pub pub_date: Option<serde_yaml::Value>,
    pub draft: bool,

    /// Additional custom fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

/// Structural problems with a front-matter block
#[derive(Error, Debug, PartialEq)]
pub enum FrontMatterError {
    #[error("unclosed front-matter block, missing closing ---")]
    Unclosed,

    #[error("invalid YAML: {0}")]
    InvalidYaml(String),
}

impl FrontMatter {
    /// Split raw text into front-matter and body
    ///
    /// Text that does not open with a `---` line has no front-matter and is
    /// returned whole as the body.
    pub fn parse(content: &str) -> Result<(Self, &str), FrontMatterError> {
        let text = content.trim_start_matches('\u{feff}');

        let first_line_end = text.find('\n').unwrap_or(text.len());
        if text[..first_line_end].trim_end() != "---" {
            return Ok((FrontMatter::default(), content));
        }

        let after_open = &text[(first_line_end + 1).min(text.len())..];
        let mut offset = 0;

        for line in after_open.split_inclusive('\n') {
            if line.trim_end() == "---" {
                let yaml = &after_open[..offset];
                let body = after_open[offset + line.len()..].trim_start_matches(['\n', '\r']);

                if yaml.trim().is_empty() {
                    return Ok((FrontMatter::default(), body));
                }

                let fm = serde_yaml::from_str::<FrontMatter>(yaml)
                    .map_err(|e| FrontMatterError::InvalidYaml(e.to_string()))?;
                return Ok((fm, body));
            }
            offset += line.len();
        }

        Err(FrontMatterError::Unclosed)
    }

    /// `pubDate` normalized to an ISO-8601 UTC timestamp
    ///
    /// `None` when the field is absent; `Some(Err(raw))` when it is present
    /// but cannot be read as a date.
    pub fn pub_date(&self) -> Option<Result<String, String>> {
        let value = self.pub_date.as_ref()?;
        let parsed = match value {
            serde_yaml::Value::String(s) => parse_date_string(s),
            _ => None,
        };
        Some(
            parsed
                .map(|dt| dt.format(ISO_FORMAT).to_string())
                .ok_or_else(|| describe(value)),
        )
    }
}

fn describe(value: &serde_yaml::Value) -> String {
    match value {
        serde_yaml::Value::String(s) => s.clone(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
    }
}

/// Parse a date string in various formats; values without an offset are UTC
fn parse_date_string(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(Utc.from_utc_datetime(&dt));
        }
    }

    // Date-only forms, numeric or with month names ("January 5, 2024")
    let date_formats = [
        "%Y-%m-%d",
        "%Y/%m/%d",
        "%B %d, %Y",
        "%b %d, %Y",
        "%d %B %Y",
        "%B %d %Y",
    ];
    for fmt in date_formats {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(Utc.from_utc_datetime(&d.and_hms_opt(0, 0, 0)?));
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }

    None
}
