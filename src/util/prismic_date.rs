use chrono::{DateTime, ParseError, Utc};
use serde::{Deserialize, Deserializer};

/// Prismic sends `2021-03-15T19:25:28+0000`, without the colon RFC 3339 requires.
const PRISMIC_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

pub fn parse_prismic_date(s: &str) -> Result<DateTime<Utc>, ParseError> {
    let date_time = DateTime::parse_from_rfc3339(s)
        .or_else(|_| DateTime::parse_from_str(s, PRISMIC_FORMAT))?;
    Ok(date_time.with_timezone(&Utc))
}

/// Serde adapter for optional publication dates. Unpublished documents seen
/// through a preview ref carry `null`.
pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
{
    use serde::de::Error;
    let value: Option<String> = Option::deserialize(deserializer)?;
    match value {
        None => Ok(None),
        Some(s) => parse_prismic_date(&s).map(Some).map_err(Error::custom),
    }
}
