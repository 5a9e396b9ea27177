use url::Url;

const EMBED_BASE: &str = "https://www.youtube.com/embed";

/// Resolve a YouTube URL to its embeddable autoplay form.
///
/// Handles short links (`youtu.be/<id>`), watch pages (`watch?v=<id>`) and
/// live URLs (`/live/<id>`). Anything unrecognized, including URLs that fail
/// to parse, passes through unchanged.
pub fn embed_url(raw: &str) -> String {
    let parsed = match Url::parse(raw) {
        Ok(url) => url,
        Err(_) => return raw.to_string(),
    };

    if let Some(host) = parsed.host_str() {
        if host.contains("youtu.be") {
            if let Some(id) = parsed
                .path_segments()
                .and_then(|mut segments| segments.next())
                .filter(|id| !id.is_empty())
            {
                return format!("{}/{}?autoplay=1", EMBED_BASE, id);
            }
            return raw.to_string();
        }
    }

    if let Some(id) = parsed
        .query_pairs()
        .find(|(key, _)| key == "v")
        .map(|(_, value)| value.into_owned())
        .filter(|id| !id.is_empty())
    {
        return format!("{}/{}?autoplay=1", EMBED_BASE, id);
    }

    // live url pattern: /live/VIDEO_ID
    let segments: Vec<&str> = parsed
        .path()
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect();
    if let Some(live_index) = segments.iter().position(|segment| *segment == "live") {
        if let Some(id) = segments.get(live_index + 1) {
            return format!("{}/{}?autoplay=1", EMBED_BASE, id);
        }
    }

    raw.to_string()
}
