use chrono::Utc;
use jadwalive::components::event_store::EventStoreActor;
use jadwalive::config::Config;
use jadwalive::error::{event_source_error, AppResult};
use jadwalive::schedule::calendar_links::ics_document;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

#[tokio::main]
async fn main() -> AppResult<()> {
    // Load configuration
    let config = Config::load()?;
    let config = Arc::new(RwLock::new(config));

    // Output directory, first CLI argument
    let out_dir = std::env::args().nth(1).unwrap_or_else(|| "ics".to_string());
    std::fs::create_dir_all(&out_dir)?;

    // Spawn the event store actor
    let (mut store_actor, store_handle) = EventStoreActor::new(config.clone());
    let _store_task = tokio::spawn(async move {
        store_actor.run().await;
    });

    let events = store_handle.get_events().await?;
    if events.is_empty() {
        return Err(event_source_error("Event list is empty"));
    }

    let (tz, default_duration_minutes) = {
        let config_read = config.read().await;
        (config_read.tz(), config_read.default_duration_minutes)
    };

    let now = Utc::now();
    for (index, event) in events.iter().enumerate() {
        let stem = if event.id.is_empty() {
            format!("event-{}", index + 1)
        } else {
            event.id.clone()
        };
        let path = Path::new(&out_dir).join(format!("{}.ics", stem));

        let ics = ics_document(event, tz, default_duration_minutes, now)?;
        std::fs::write(&path, ics)?;
        println!("Wrote {}", path.display());
    }

    println!("Exported {} events to {}", events.len(), out_dir);

    Ok(())
}
