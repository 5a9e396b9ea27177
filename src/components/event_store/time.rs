use super::models::ScheduleEvent;
use crate::error::{event_source_error, AppResult};
use chrono::{DateTime, Duration, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Parse a schedule timestamp.
///
/// The feed publishes RFC 3339 strings with an offset; bare
/// `YYYY-MM-DDTHH:MM:SS` values are interpreted in the configured timezone.
pub fn parse_event_time(value: &str, tz: Tz) -> AppResult<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }

    let naive = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .map_err(|e| event_source_error(&format!("Failed to parse datetime '{}': {}", value, e)))?;
    match tz.from_local_datetime(&naive) {
        chrono::LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        chrono::LocalResult::Ambiguous(_, _) => {
            Err(event_source_error("Ambiguous local time"))
        }
        chrono::LocalResult::None => Err(event_source_error("Invalid local time")),
    }
}

/// Get event start time as DateTime
pub fn event_start(event: &ScheduleEvent, tz: Tz) -> AppResult<DateTime<Utc>> {
    parse_event_time(&event.start, tz)
}

/// Get event end time as DateTime, if the feed provides one
pub fn event_end(event: &ScheduleEvent, tz: Tz) -> AppResult<Option<DateTime<Utc>>> {
    match &event.end {
        Some(end) => Ok(Some(parse_event_time(end, tz)?)),
        None => Ok(None),
    }
}

/// End time used for calendar export: the explicit end, or start plus the
/// configured default duration when the feed omits one.
pub fn derived_end(
    start: DateTime<Utc>,
    end: Option<DateTime<Utc>>,
    default_minutes: i64,
) -> DateTime<Utc> {
    end.unwrap_or_else(|| start + Duration::minutes(default_minutes))
}

/// Check the feed invariants: start must parse, end (when present) must be
/// after start. Returns the parsed start for valid events.
pub fn validate_event(event: &ScheduleEvent, tz: Tz) -> AppResult<DateTime<Utc>> {
    let start = event_start(event, tz)?;
    if let Some(end) = event_end(event, tz)? {
        if end <= start {
            return Err(event_source_error(&format!(
                "Event '{}' ends at or before its start",
                event.title
            )));
        }
    }
    Ok(start)
}
