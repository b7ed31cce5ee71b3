use chrono::NaiveDate;
use thiserror::Error;

/// Date layouts the archive has used for its listing.
///
/// Newer entries spell the month out, older ones abbreviate it with a
/// trailing period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    /// `January 2, 2006`
    FullMonth,
    /// `Jan. 2, 2006`
    AbbreviatedMonth,
}

/// Every layout `detect` can pick, consulted in order.
pub const RECOGNIZED_FORMATS: &[DateFormat] =
    &[DateFormat::AbbreviatedMonth, DateFormat::FullMonth];

#[derive(Debug, Error, PartialEq)]
#[error("date `{text}` does not match the {format:?} layout: {source}")]
pub struct DateError {
    pub text: String,
    pub format: DateFormat,
    #[source]
    pub source: chrono::ParseError,
}

impl DateFormat {
    pub fn pattern(self) -> &'static str {
        match self {
            DateFormat::FullMonth => "%B %d, %Y",
            DateFormat::AbbreviatedMonth => "%b. %d, %Y",
        }
    }

    /// Whether a date whose first token is `month` is written in this layout.
    /// A trailing period marks the abbreviated form.
    pub fn claims(self, month: &str) -> bool {
        match self {
            DateFormat::FullMonth => !month.ends_with('.'),
            DateFormat::AbbreviatedMonth => month.ends_with('.'),
        }
    }

    /// Picks the first of `RECOGNIZED_FORMATS` that claims the month token.
    pub fn detect(text: &str) -> Self {
        let month = text.split_whitespace().next().unwrap_or_default();
        RECOGNIZED_FORMATS
            .iter()
            .copied()
            .find(|format| format.claims(month))
            .unwrap_or(DateFormat::FullMonth)
    }

    /// Rewrites the month token into the shape `pattern` expects.
    ///
    /// Abbreviations on the site are not always three letters (`Sept.`), so
    /// the month is cut down to its first three letters plus the period.
    pub fn normalize(self, text: &str) -> String {
        match self {
            DateFormat::FullMonth => text.to_string(),
            DateFormat::AbbreviatedMonth => {
                let text = text.trim_start();
                let month = text.split_whitespace().next().unwrap_or_default();
                let rest = &text[month.len()..];
                let short: String = month.trim_end_matches('.').chars().take(3).collect();
                format!("{}.{}", short, rest)
            }
        }
    }

    pub fn parse(self, text: &str) -> Result<NaiveDate, DateError> {
        let normalized = self.normalize(text);
        NaiveDate::parse_from_str(&normalized, self.pattern()).map_err(|source| DateError {
            text: text.to_string(),
            format: self,
            source,
        })
    }
}

/// Parses a listing date written in any of the `RECOGNIZED_FORMATS`.
pub fn parse_flexible_date(text: &str) -> Result<NaiveDate, DateError> {
    let text = text.trim();
    DateFormat::detect(text).parse(text)
}

/// Serde adapter writing a calendar date as an RFC 3339 timestamp at UTC
/// midnight. Reading also accepts a bare `YYYY-MM-DD`.
pub mod rfc3339 {
    use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(date) => {
                let timestamp = date
                    .and_time(NaiveTime::MIN)
                    .and_utc()
                    .to_rfc3339_opts(SecondsFormat::Secs, true);
                serializer.serialize_str(&timestamp)
            }
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Some(text) = Option::<String>::deserialize(deserializer)? else {
            return Ok(None);
        };
        if let Ok(timestamp) = DateTime::parse_from_rfc3339(&text) {
            return Ok(Some(timestamp.date_naive()));
        }
        NaiveDate::parse_from_str(&text, "%Y-%m-%d")
            .map(Some)
            .map_err(de::Error::custom)
    }
}
