use chrono::{DateTime, NaiveDateTime, Utc};

use crate::constants::{DB_DATETIME_FORMAT, DEFAULT_CATEGORY, DEFAULT_MEDIA_TYPE};

const NEWS_KEYWORDS: &[&str] = &["news", "update", "announcement"];
const IMPORTANT_KEYWORDS: &[&str] = &["important", "urgent", "alert"];

/// Derive a category from a post's content and media type. Later rules win:
/// any non-text media makes a post `media`, news keywords promote it to
/// `news`, importance keywords to `important`.
pub fn categorize(content: &str, media_type: &str) -> &'static str {
    let lowered = content.to_lowercase();

    let mut category = DEFAULT_CATEGORY;
    if media_type != DEFAULT_MEDIA_TYPE {
        category = "media";
    }
    if NEWS_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        category = "news";
    }
    if IMPORTANT_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        category = "important";
    }

    category
}

pub fn parse_db_datetime(datetime: &str) -> Result<DateTime<Utc>, chrono::format::ParseError> {
    NaiveDateTime::parse_from_str(datetime, DB_DATETIME_FORMAT)
        .map(|ndt| DateTime::<Utc>::from_naive_utc_and_offset(ndt, Utc))
}

/// Render a stored datetime as RFC 3339. A value that does not parse (only
/// possible via out-of-band writes) is passed through unchanged.
pub fn to_rfc3339(datetime: &str) -> String {
    match parse_db_datetime(datetime) {
        Ok(dt) => dt.to_rfc3339(),
        Err(_) => datetime.to_string(),
    }
}

#[cfg(test)]
mod test {
    use super::{categorize, to_rfc3339};

    #[test]
    fn it_defaults_to_general() {
        assert_eq!(categorize("hello channel", "text"), "general");
    }

    #[test]
    fn it_uses_media_for_non_text_posts() {
        assert_eq!(categorize("vacation pics", "photo"), "media");
    }

    #[test]
    fn it_detects_news_keywords() {
        assert_eq!(categorize("Daily news update", "text"), "news");
    }

    #[test]
    fn it_prefers_important_over_news() {
        assert_eq!(categorize("urgent news update", "text"), "important");
    }

    #[test]
    fn it_matches_keywords_case_insensitively() {
        assert_eq!(categorize("ALERT: maintenance window", "text"), "important");
    }

    #[test]
    fn it_promotes_captioned_media_with_keywords() {
        assert_eq!(categorize("announcement poster", "photo"), "news");
    }

    #[test]
    fn it_renders_stored_datetimes_as_rfc3339() {
        assert_eq!(to_rfc3339("2026-08-06 12:00:00"), "2026-08-06T12:00:00+00:00");
    }

    #[test]
    fn it_passes_unparseable_datetimes_through() {
        assert_eq!(to_rfc3339("not a date"), "not a date");
    }
}
