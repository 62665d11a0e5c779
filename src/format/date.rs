//! Date pattern handling
//!
//! Stored patterns write the day of month as lowercase `d`/`dd`. The renderer
//! uses the uppercase `D`/`DD` convention (`d` would be day-of-week there), so
//! every pattern goes through `normalize_day_tokens` before `render_pattern`.

use chrono::{DateTime, Datelike, FixedOffset, Timelike, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[[^\]]*\]|YYYY|yyyy|YY|yy|MM|M|DD|D|HH|H|hh|h|mm|m|ss|s|SSS|A|a")
        .expect("date token regex is valid")
});

/// Translate the stored lowercase day token to the renderer's uppercase one
pub fn normalize_day_tokens(pattern: &str) -> String {
    pattern.replace('d', "D")
}

/// Parse a raw timestamp: epoch milliseconds, or an RFC 3339 string
pub fn parse_timestamp(raw: &serde_json::Value) -> Option<DateTime<Utc>> {
    match raw {
        serde_json::Value::Number(n) => {
            let ms = n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?;
            DateTime::<Utc>::from_timestamp_millis(ms)
        }
        serde_json::Value::String(s) => {
            if let Ok(ms) = s.trim().parse::<i64>() {
                return DateTime::<Utc>::from_timestamp_millis(ms);
            }
            DateTime::parse_from_rfc3339(s.trim())
                .ok()
                .map(|dt| dt.with_timezone(&Utc))
        }
        _ => None,
    }
}

/// Render `instant` with a renderer-convention pattern in the given offset
///
/// Returns `None` when the offset is not a valid zone offset (beyond +/-24h).
pub fn render_pattern(pattern: &str, instant: DateTime<Utc>, utc_offset_minutes: i32) -> Option<String> {
    let offset = utc_offset_minutes.checked_mul(60).and_then(FixedOffset::east_opt)?;
    let local = instant.with_timezone(&offset);

    let rendered = TOKEN_RE
        .replace_all(pattern, |caps: &regex::Captures| {
            let token = &caps[0];
            render_token(token, &local)
        })
        .into_owned();
    Some(rendered)
}

fn render_token(token: &str, dt: &DateTime<FixedOffset>) -> String {
    let hour12 = match dt.hour() % 12 {
        0 => 12,
        h => h,
    };
    match token {
        "YYYY" | "yyyy" => format!("{:04}", dt.year()),
        "YY" | "yy" => format!("{:02}", dt.year().rem_euclid(100)),
        "MM" => format!("{:02}", dt.month()),
        "M" => dt.month().to_string(),
        "DD" => format!("{:02}", dt.day()),
        "D" => dt.day().to_string(),
        "HH" => format!("{:02}", dt.hour()),
        "H" => dt.hour().to_string(),
        "hh" => format!("{:02}", hour12),
        "h" => hour12.to_string(),
        "mm" => format!("{:02}", dt.minute()),
        "m" => dt.minute().to_string(),
        "ss" => format!("{:02}", dt.second()),
        "s" => dt.second().to_string(),
        "SSS" => format!("{:03}", dt.timestamp_subsec_millis()),
        "A" => (if dt.hour() < 12 { "AM" } else { "PM" }).to_string(),
        "a" => (if dt.hour() < 12 { "am" } else { "pm" }).to_string(),
        escaped => escaped
            .trim_start_matches('[')
            .trim_end_matches(']')
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn test_normalize_day_tokens() {
        assert_eq!(normalize_day_tokens("yyyy/MM/dd"), "yyyy/MM/DD");
        assert_eq!(normalize_day_tokens("d"), "D");
    }

    #[test]
    fn test_render_common_patterns() {
        let instant = at(2024, 3, 7, 15, 4);
        assert_eq!(render_pattern("yyyy/MM/DD", instant, 0).as_deref(), Some("2024/03/07"));
        assert_eq!(render_pattern("YYYY-MM-DD HH:mm", instant, 0).as_deref(), Some("2024-03-07 15:04"));
        assert_eq!(render_pattern("M/D/YY h:mm A", instant, 0).as_deref(), Some("3/7/24 3:04 PM"));
    }

    #[test]
    fn test_offset_moves_the_calendar_day() {
        let instant = at(2024, 3, 7, 20, 0);
        assert_eq!(render_pattern("MM-DD", instant, 8 * 60).as_deref(), Some("03-08"));
    }

    #[test]
    fn test_escaped_text_is_kept() {
        let instant = at(2024, 3, 7, 0, 0);
        assert_eq!(render_pattern("[Year] YYYY", instant, 0).as_deref(), Some("Year 2024"));
    }

    #[test]
    fn test_out_of_range_offset_is_rejected() {
        let instant = at(2024, 3, 7, 0, 0);
        assert_eq!(render_pattern("YYYY", instant, 40_000_000), None);
        assert_eq!(render_pattern("YYYY", instant, i32::MIN), None);
        assert_eq!(render_pattern("YYYY", instant, 25 * 60), None);
        assert_eq!(render_pattern("YYYY", instant, -(23 * 60)).as_deref(), Some("2024"));
    }

    #[test]
    fn test_parse_timestamp_shapes() {
        let ms = at(2024, 1, 2, 0, 0).timestamp_millis();
        assert_eq!(parse_timestamp(&serde_json::json!(ms)), Some(at(2024, 1, 2, 0, 0)));
        assert_eq!(
            parse_timestamp(&serde_json::json!("2024-01-02T00:00:00Z")),
            Some(at(2024, 1, 2, 0, 0))
        );
        assert_eq!(parse_timestamp(&serde_json::json!(true)), None);
    }
}
