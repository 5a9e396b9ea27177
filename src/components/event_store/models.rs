/// One livestream event as published in the schedule feed.
///
/// Date fields are kept as the raw wire strings and parsed on use,
/// see [`super::time`].
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEvent {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub start: String,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub youtube_url: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl ScheduleEvent {
    /// Text searched by the schedule filter: title, description and tags.
    pub fn search_haystack(&self) -> String {
        let mut parts = vec![self.title.clone()];
        if let Some(description) = &self.description {
            parts.push(description.clone());
        }
        parts.extend(self.tags.iter().cloned());
        parts.join(" ").to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_wire_format() {
        let json = r#"{
            "id": "ev-1",
            "title": "Karaoke malam",
            "description": "Request lagu di chat",
            "start": "2025-01-01T20:00:00+07:00",
            "end": "2025-01-01T22:00:00+07:00",
            "youtubeUrl": "https://youtu.be/abc123",
            "thumbnail": "https://example.com/thumb.jpg",
            "tags": ["karaoke", "musik"],
            "status": "upcoming"
        }"#;

        let event: ScheduleEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.id, "ev-1");
        assert_eq!(event.youtube_url.as_deref(), Some("https://youtu.be/abc123"));
        assert_eq!(event.tags, vec!["karaoke", "musik"]);
    }

    #[test]
    fn test_deserialize_minimal_event() {
        // Only title and start are required on the wire
        let json = r#"{"title": "Zatsudan", "start": "2025-01-01T20:00:00+07:00"}"#;

        let event: ScheduleEvent = serde_json::from_str(json).unwrap();
        assert!(event.id.is_empty());
        assert!(event.end.is_none());
        assert!(event.tags.is_empty());
    }

    #[test]
    fn test_search_haystack_includes_tags() {
        let event = ScheduleEvent {
            title: "Karaoke Malam".to_string(),
            description: Some("Request lagu".to_string()),
            tags: vec!["Musik".to_string()],
            ..Default::default()
        };

        let haystack = event.search_haystack();
        assert!(haystack.contains("karaoke malam"));
        assert!(haystack.contains("request lagu"));
        assert!(haystack.contains("musik"));
    }
}
