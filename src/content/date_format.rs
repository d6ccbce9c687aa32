use chrono::{DateTime, Locale, Utc};
use chrono_tz::Tz;

const LOCALE: Locale = Locale::pt_BR;

/// `15 mar 2021`
pub fn format_publication_date(date: &DateTime<Utc>, tz: &Tz) -> String {
    date.with_timezone(tz)
        .format_localized("%d %b %Y", LOCALE)
        .to_string()
}

/// `* editado em 19 mar 2021, às 15:49`, only when the post changed after its
/// first publication.
pub fn format_edition_date(first: Option<&DateTime<Utc>>, last: Option<&DateTime<Utc>>, tz: &Tz) -> Option<String> {
    let last = last?;
    if first == Some(last) {
        return None;
    }

    let local = last.with_timezone(tz);
    Some(format!(
        "* editado em {}, às {}",
        local.format_localized("%d %b %Y", LOCALE),
        local.format("%H:%M"),
    ))
}
