use crate::components::event_store::models::ScheduleEvent;
use crate::components::event_store::time::{derived_end, event_end, event_start};
use crate::error::AppResult;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use url::Url;
use uuid::Uuid;

const GOOGLE_CALENDAR_RENDER: &str = "https://calendar.google.com/calendar/render";

/// iCalendar product identifier for generated files
const PRODID: &str = "-//Jadwalive//Schedule//ID";

/// Format a UTC instant as `YYYYMMDDTHHMMSSZ`, the form both Google
/// Calendar's `dates` parameter and iCalendar DATE-TIME fields expect.
pub fn utc_stamp(dt: DateTime<Utc>) -> String {
    dt.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Build the Google Calendar "add event" deep link for an event.
pub fn google_calendar_url(
    event: &ScheduleEvent,
    tz: Tz,
    default_duration_minutes: i64,
) -> AppResult<String> {
    let start = event_start(event, tz)?;
    let end = derived_end(start, event_end(event, tz)?, default_duration_minutes);

    let mut url = Url::parse(GOOGLE_CALENDAR_RENDER)?;
    url.query_pairs_mut()
        .append_pair("action", "TEMPLATE")
        .append_pair("text", &event.title)
        .append_pair("dates", &format!("{}/{}", utc_stamp(start), utc_stamp(end)))
        .append_pair("details", event.description.as_deref().unwrap_or(""))
        .append_pair("location", event.youtube_url.as_deref().unwrap_or(""));

    Ok(url.to_string())
}

/// Escape an iCalendar TEXT value per RFC 5545: backslash, semicolon and
/// comma are backslash-escaped, line breaks become a literal `\n`.
pub fn escape_ics_text(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace(';', "\\;")
        .replace(',', "\\,")
        .replace("\r\n", "\\n")
        .replace('\r', "\\n")
        .replace('\n', "\\n")
}

/// Render a single-event VCALENDAR document with CRLF line endings.
///
/// `now` becomes the DTSTAMP; events without an id get a fresh UUID as UID.
pub fn ics_document(
    event: &ScheduleEvent,
    tz: Tz,
    default_duration_minutes: i64,
    now: DateTime<Utc>,
) -> AppResult<String> {
    let start = event_start(event, tz)?;
    let end = derived_end(start, event_end(event, tz)?, default_duration_minutes);

    let uid = if event.id.is_empty() {
        Uuid::new_v4().to_string()
    } else {
        event.id.clone()
    };
    let watch_url = event.youtube_url.as_deref().unwrap_or("");

    let lines = [
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        format!("PRODID:{}", PRODID),
        "CALSCALE:GREGORIAN".to_string(),
        "METHOD:PUBLISH".to_string(),
        "BEGIN:VEVENT".to_string(),
        format!("UID:{}", uid),
        format!("DTSTAMP:{}", utc_stamp(now)),
        format!("DTSTART:{}", utc_stamp(start)),
        format!("DTEND:{}", utc_stamp(end)),
        format!("SUMMARY:{}", escape_ics_text(&event.title)),
        format!(
            "DESCRIPTION:{}",
            escape_ics_text(event.description.as_deref().unwrap_or(""))
        ),
        format!("URL:{}", watch_url),
        format!("LOCATION:{}", escape_ics_text(watch_url)),
        "END:VEVENT".to_string(),
        "END:VCALENDAR".to_string(),
    ];

    Ok(lines.join("\r\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::Asia::Jakarta;

    fn event(start: &str, end: Option<&str>) -> ScheduleEvent {
        ScheduleEvent {
            id: "ev-1".to_string(),
            title: "Karaoke malam".to_string(),
            description: Some("Request lagu di chat".to_string()),
            start: start.to_string(),
            end: end.map(|e| e.to_string()),
            youtube_url: Some("https://youtu.be/abc123".to_string()),
            ..Default::default()
        }
    }

    fn query_value(url: &str, key: &str) -> String {
        let parsed = Url::parse(url).unwrap();
        parsed
            .query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
            .unwrap_or_else(|| panic!("missing query parameter '{}'", key))
    }

    #[test]
    fn test_google_url_shifts_wib_to_utc_and_defaults_end() {
        // 10:00 WIB is 03:00 UTC; no end means start + 60 minutes
        let url = google_calendar_url(&event("2025-01-01T10:00:00+07:00", None), Jakarta, 60)
            .unwrap();

        assert!(url.starts_with(GOOGLE_CALENDAR_RENDER));
        assert_eq!(query_value(&url, "action"), "TEMPLATE");
        assert_eq!(
            query_value(&url, "dates"),
            "20250101T030000Z/20250101T040000Z"
        );
        assert_eq!(query_value(&url, "text"), "Karaoke malam");
        assert_eq!(query_value(&url, "location"), "https://youtu.be/abc123");
    }

    #[test]
    fn test_google_url_uses_explicit_end() {
        let url = google_calendar_url(
            &event(
                "2025-01-01T10:00:00+07:00",
                Some("2025-01-01T12:30:00+07:00"),
            ),
            Jakarta,
            60,
        )
        .unwrap();

        assert_eq!(
            query_value(&url, "dates"),
            "20250101T030000Z/20250101T053000Z"
        );
    }

    #[test]
    fn test_utc_stamp_format() {
        let dt = Utc.with_ymd_and_hms(2025, 1, 1, 3, 0, 0).unwrap();
        assert_eq!(utc_stamp(dt), "20250101T030000Z");
    }

    #[test]
    fn test_ics_document_structure() {
        let now = Utc.with_ymd_and_hms(2024, 12, 31, 8, 0, 0).unwrap();
        let ics = ics_document(&event("2025-01-01T10:00:00+07:00", None), Jakarta, 60, now)
            .unwrap();

        assert!(ics.starts_with("BEGIN:VCALENDAR\r\n"));
        assert!(ics.ends_with("END:VCALENDAR"));
        // Every line break in the document is CRLF
        assert!(!ics.replace("\r\n", "").contains('\n'));

        assert!(ics.contains("UID:ev-1\r\n"));
        assert!(ics.contains("DTSTAMP:20241231T080000Z\r\n"));
        assert!(ics.contains("DTSTART:20250101T030000Z\r\n"));
        assert!(ics.contains("DTEND:20250101T040000Z\r\n"));
        assert!(ics.contains("SUMMARY:Karaoke malam\r\n"));
        assert!(ics.contains("LOCATION:https://youtu.be/abc123\r\n"));
    }

    #[test]
    fn test_ics_uid_falls_back_to_uuid() {
        let now = Utc.with_ymd_and_hms(2024, 12, 31, 8, 0, 0).unwrap();
        let mut anonymous = event("2025-01-01T10:00:00+07:00", None);
        anonymous.id = String::new();

        let ics = ics_document(&anonymous, Jakarta, 60, now).unwrap();
        let uid_line = ics
            .split("\r\n")
            .find(|line| line.starts_with("UID:"))
            .unwrap();
        assert!(uid_line.len() > "UID:".len());
    }

    #[test]
    fn test_escape_ics_text() {
        assert_eq!(
            escape_ics_text("a,b;c\\d\ne\r\nf"),
            "a\\,b\\;c\\\\d\\ne\\nf"
        );
        assert_eq!(escape_ics_text("plain"), "plain");
    }

    #[test]
    fn test_ics_description_escapes_newlines() {
        let now = Utc.with_ymd_and_hms(2024, 12, 31, 8, 0, 0).unwrap();
        let mut multiline = event("2025-01-01T10:00:00+07:00", None);
        multiline.description = Some("baris satu\nbaris dua".to_string());

        let ics = ics_document(&multiline, Jakarta, 60, now).unwrap();
        assert!(ics.contains("DESCRIPTION:baris satu\\nbaris dua\r\n"));
    }
}
