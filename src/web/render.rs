use crate::components::event_store::models::ScheduleEvent;
use crate::components::event_store::time::event_end;
use crate::components::next_live::CountdownState;
use crate::schedule::calendar_links::google_calendar_url;
use crate::schedule::classify::{matches_query, PartitionedSchedule};
use crate::schedule::countdown::{countdown_label, split_remaining};
use chrono::{DateTime, Datelike, Utc};
use chrono_tz::Tz;
use tracing::warn;

/// Placeholder thumbnail served from the static assets
const THUMBNAIL_FALLBACK: &str = "/assets/og-placeholder.png";

/// Escape text for interpolation into HTML
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Local date label with the timezone suffix, e.g.
/// `Wednesday, 01 January 2025 10:00 WIB`
pub fn start_label(start: DateTime<Utc>, tz: Tz) -> String {
    start
        .with_timezone(&tz)
        .format("%A, %d %B %Y %H:%M %Z")
        .to_string()
}

/// Duration badge text: whole minutes between start and end, or a dash when
/// the event has no end time
fn duration_badge(event: &ScheduleEvent, start: DateTime<Utc>, tz: Tz) -> String {
    match event_end(event, tz) {
        Ok(Some(end)) => {
            let minutes = (end - start).num_minutes();
            t!("duration_minutes", minutes = minutes).into_owned()
        }
        _ => t!("duration_unknown").into_owned(),
    }
}

/// Render one event row for the upcoming or past list
pub fn event_item(
    event: &ScheduleEvent,
    start: DateTime<Utc>,
    tz: Tz,
    default_duration_minutes: i64,
) -> String {
    let mut tags = String::new();
    for tag in &event.tags {
        tags.push_str(&format!("<span class=\"tag\">{}</span>", escape_html(tag)));
    }

    let mut actions = String::new();
    match google_calendar_url(event, tz, default_duration_minutes) {
        Ok(google) => actions.push_str(&format!(
            "<a class=\"btn\" href=\"{}\" target=\"_blank\" rel=\"noopener\">{}</a>",
            escape_html(&google),
            t!("btn_google_calendar")
        )),
        Err(e) => warn!("Could not build calendar link for '{}': {}", event.title, e),
    }
    if !event.id.is_empty() {
        actions.push_str(&format!(
            "<a class=\"btn\" href=\"/events/{}/calendar.ics\" download>{}</a>",
            escape_html(&event.id),
            t!("btn_download_ics")
        ));
    }
    if let Some(youtube_url) = &event.youtube_url {
        actions.push_str(&format!(
            "<a class=\"btn btn-primary\" href=\"{}\" target=\"_blank\" rel=\"noopener\">{}</a>",
            escape_html(youtube_url),
            t!("btn_open_youtube")
        ));
        if !event.id.is_empty() {
            actions.push_str(&format!(
                "<a class=\"btn\" href=\"/watch/{}\">{}</a>",
                escape_html(&event.id),
                t!("btn_watch_here")
            ));
        }
    }

    let thumbnail = event.thumbnail.as_deref().unwrap_or(THUMBNAIL_FALLBACK);

    format!(
        concat!(
            "<li class=\"event\">",
            "<img class=\"thumb\" src=\"{thumbnail}\" alt=\"Thumbnail {title}\" loading=\"lazy\">",
            "<div>",
            "<h3 class=\"title\">{title}</h3>",
            "<div class=\"meta\">{meta}</div>",
            "<div class=\"tags\">{tags}</div>",
            "<div class=\"row-actions\">{actions}</div>",
            "</div>",
            "<div class=\"badge\">{badge}</div>",
            "</li>"
        ),
        thumbnail = escape_html(thumbnail),
        title = escape_html(&event.title),
        meta = start_label(start, tz),
        tags = tags,
        actions = actions,
        badge = duration_badge(event, start, tz),
    )
}

fn tracks_event(event: &ScheduleEvent, tracked_id: &str) -> bool {
    !event.id.is_empty() && event.id == tracked_id
}

/// Render the next-live card for the soonest upcoming event.
///
/// The countdown label comes from the tracker when it is watching this
/// event; otherwise it is recomputed from `now` so a fresh page never shows
/// a stale placeholder.
pub fn next_live_card(
    event: &ScheduleEvent,
    start: DateTime<Utc>,
    countdown: &CountdownState,
    tz: Tz,
    now: DateTime<Utc>,
) -> String {
    let status = event
        .status
        .clone()
        .unwrap_or_else(|| t!("status_default").into_owned());

    let countdown_text = match countdown {
        CountdownState::Counting {
            event_id, label, ..
        } if tracks_event(event, event_id) => label.clone(),
        CountdownState::Reached { event_id, .. } if tracks_event(event, event_id) => {
            t!("in_progress").into_owned()
        }
        _ => {
            let remaining = start - now;
            if remaining.num_seconds() <= 0 {
                t!("in_progress").into_owned()
            } else {
                countdown_label(&split_remaining(remaining))
            }
        }
    };

    let mut actions = String::new();
    if let Some(youtube_url) = &event.youtube_url {
        actions.push_str(&format!(
            "<a class=\"btn btn-primary\" href=\"{}\" target=\"_blank\" rel=\"noopener\">{}</a>",
            escape_html(youtube_url),
            t!("btn_open_youtube")
        ));
        if !event.id.is_empty() {
            actions.push_str(&format!(
                "<a class=\"btn\" href=\"/watch/{}\">{}</a>",
                escape_html(&event.id),
                t!("btn_watch_here")
            ));
        }
    }

    format!(
        concat!(
            "<h3 class=\"title\">{title}</h3>",
            "<div class=\"next-meta\">",
            "<span>{meta}</span>",
            "<span class=\"badge\">{status}</span>",
            "</div>",
            "<div class=\"countdown\" id=\"countdown\">{countdown}</div>",
            "<div class=\"actions\">{actions}</div>"
        ),
        title = escape_html(&event.title),
        meta = start_label(start, tz),
        status = escape_html(&t!("status_label", status = status)),
        countdown = escape_html(&countdown_text),
        actions = actions,
    )
}

/// Message shown in the next-live panel when there is nothing scheduled
pub fn no_upcoming_message() -> String {
    format!("<p class=\"empty\">{}</p>", t!("no_upcoming"))
}

/// Message shown in the next-live panel when the event list failed to load
pub fn load_failed_message() -> String {
    format!("<p class=\"empty\">{}</p>", t!("load_failed"))
}

/// Render the full schedule page
#[allow(clippy::too_many_arguments)]
pub fn render_index(
    site_title: &str,
    query: &str,
    schedule: &PartitionedSchedule,
    countdown: &CountdownState,
    tz: Tz,
    default_duration_minutes: i64,
    now: DateTime<Utc>,
    load_failed: bool,
) -> String {
    let mut upcoming_list = String::new();
    for (event, start) in &schedule.upcoming {
        if matches_query(event, query) {
            upcoming_list.push_str(&event_item(event, *start, tz, default_duration_minutes));
            upcoming_list.push('\n');
        }
    }

    let mut past_list = String::new();
    for (event, start) in &schedule.past {
        if matches_query(event, query) {
            past_list.push_str(&event_item(event, *start, tz, default_duration_minutes));
            past_list.push('\n');
        }
    }

    let next_live = if load_failed {
        load_failed_message()
    } else {
        match schedule.next_live() {
            Some((event, start)) => next_live_card(event, *start, countdown, tz, now),
            None => no_upcoming_message(),
        }
    };

    include_str!("../../assets/schedule/index.html")
        .replace("<!-- SITE_TITLE -->", &escape_html(site_title))
        .replace("<!-- SEARCH_PLACEHOLDER -->", &t!("search_placeholder"))
        .replace("<!-- SEARCH_BUTTON -->", &t!("search_button"))
        .replace("<!-- NEXT_LIVE_HEADING -->", &t!("next_live_heading"))
        .replace("<!-- UPCOMING_HEADING -->", &t!("upcoming_heading"))
        .replace("<!-- PAST_HEADING -->", &t!("past_heading"))
        .replace("value=\"\"", &format!("value=\"{}\"", escape_html(query)))
        .replace("<!-- NEXT_LIVE -->", &next_live)
        .replace("<!-- UPCOMING_LIST -->", &upcoming_list)
        .replace("<!-- PAST_LIST -->", &past_list)
        .replace("<!-- FOOTER_YEAR -->", &now.with_timezone(&tz).year().to_string())
}

/// Render the watch page with the embedded player
pub fn render_watch(site_title: &str, event_title: &str, embed_url: &str) -> String {
    include_str!("../../assets/schedule/watch.html")
        .replace("<!-- EVENT_TITLE -->", &escape_html(event_title))
        .replace("<!-- SITE_TITLE -->", &escape_html(site_title))
        .replace("<!-- CLOSE_LABEL -->", &t!("btn_close_player"))
        .replace("src=\"\"", &format!("src=\"{}\"", escape_html(embed_url)))
}
