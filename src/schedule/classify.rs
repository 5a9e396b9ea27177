use crate::components::event_store::time::event_start;
use crate::components::event_store::ScheduleEvent;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tracing::debug;

/// The event list split at a fixed instant, each entry paired with its
/// parsed start time
#[derive(Debug, Default)]
pub struct PartitionedSchedule {
    /// start >= now, soonest first
    pub upcoming: Vec<(ScheduleEvent, DateTime<Utc>)>,
    /// start < now, most recent first
    pub past: Vec<(ScheduleEvent, DateTime<Utc>)>,
}

impl PartitionedSchedule {
    /// The single soonest upcoming event, if any
    pub fn next_live(&self) -> Option<&(ScheduleEvent, DateTime<Utc>)> {
        self.upcoming.first()
    }
}

/// Partition events into upcoming and past relative to `now`.
///
/// The split is computed once per call; an event does not move between the
/// lists while a rendered page is open.
pub fn partition_events(
    events: &[ScheduleEvent],
    now: DateTime<Utc>,
    tz: Tz,
) -> PartitionedSchedule {
    let mut upcoming = Vec::new();
    let mut past = Vec::new();

    for event in events {
        let start = match event_start(event, tz) {
            Ok(start) => start,
            Err(e) => {
                // The store drops these at load time; be defensive anyway
                debug!("Ignoring event with unparseable start: {}", e);
                continue;
            }
        };

        if start >= now {
            upcoming.push((event.clone(), start));
        } else {
            past.push((event.clone(), start));
        }
    }

    upcoming.sort_by_key(|(_, start)| *start);
    past.sort_by(|a, b| b.1.cmp(&a.1));

    PartitionedSchedule { upcoming, past }
}

/// Case-insensitive substring match over title, description and tags.
/// An empty query matches everything.
pub fn matches_query(event: &ScheduleEvent, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    event.search_haystack().contains(&query.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::event_store::time::parse_event_time;
    use chrono_tz::Asia::Jakarta;

    fn event(id: &str, start: &str) -> ScheduleEvent {
        ScheduleEvent {
            id: id.to_string(),
            title: format!("Event {}", id),
            start: start.to_string(),
            ..Default::default()
        }
    }

    fn fixed_now() -> DateTime<Utc> {
        parse_event_time("2025-06-15T12:00:00+07:00", Jakarta).unwrap()
    }

    #[test]
    fn test_partition_is_exhaustive_and_disjoint() {
        let events = vec![
            event("a", "2025-06-15T11:00:00+07:00"),
            event("b", "2025-06-15T13:00:00+07:00"),
            event("c", "2025-06-20T20:00:00+07:00"),
            event("d", "2025-06-01T20:00:00+07:00"),
            // start == now goes to upcoming
            event("e", "2025-06-15T12:00:00+07:00"),
        ];

        let schedule = partition_events(&events, fixed_now(), Jakarta);
        assert_eq!(schedule.upcoming.len() + schedule.past.len(), events.len());

        let upcoming_ids: Vec<&str> = schedule
            .upcoming
            .iter()
            .map(|(e, _)| e.id.as_str())
            .collect();
        let past_ids: Vec<&str> = schedule.past.iter().map(|(e, _)| e.id.as_str()).collect();
        for id in &upcoming_ids {
            assert!(!past_ids.contains(id), "{} appears in both lists", id);
        }
    }

    #[test]
    fn test_upcoming_ascending_past_descending() {
        let events = vec![
            event("far", "2025-06-20T20:00:00+07:00"),
            event("soon", "2025-06-15T13:00:00+07:00"),
            event("old", "2025-06-01T20:00:00+07:00"),
            event("recent", "2025-06-15T11:00:00+07:00"),
        ];

        let schedule = partition_events(&events, fixed_now(), Jakarta);
        let upcoming_ids: Vec<&str> = schedule
            .upcoming
            .iter()
            .map(|(e, _)| e.id.as_str())
            .collect();
        let past_ids: Vec<&str> = schedule.past.iter().map(|(e, _)| e.id.as_str()).collect();

        assert_eq!(upcoming_ids, vec!["soon", "far"]);
        assert_eq!(past_ids, vec!["recent", "old"]);
        assert_eq!(schedule.next_live().unwrap().0.id, "soon");
    }

    #[test]
    fn test_matches_query_is_case_insensitive() {
        let mut karaoke = event("a", "2025-06-15T13:00:00+07:00");
        karaoke.title = "Karaoke Malam".to_string();
        karaoke.description = Some("Request lagu di chat".to_string());
        karaoke.tags = vec!["Musik".to_string()];

        assert!(matches_query(&karaoke, "KARAOKE"));
        assert!(matches_query(&karaoke, "lagu"));
        assert!(matches_query(&karaoke, "musik"));
        assert!(!matches_query(&karaoke, "valorant"));
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let plain = event("a", "2025-06-15T13:00:00+07:00");
        assert!(matches_query(&plain, ""));
    }
}
