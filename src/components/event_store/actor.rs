use super::models::ScheduleEvent;
use super::time::validate_event;
use crate::config::Config;
use crate::error::{event_source_error, AppResult};
use reqwest::Client;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use tracing::{info, warn};

/// The event store actor that owns the in-memory event list
pub struct EventStoreActor {
    config: Arc<RwLock<Config>>,
    client: Client,
    events: Vec<ScheduleEvent>,
    load_error: Option<String>,
    command_rx: mpsc::Receiver<EventStoreCommand>,
}

/// Commands that can be sent to the event store actor
pub enum EventStoreCommand {
    GetEvents(mpsc::Sender<AppResult<Vec<ScheduleEvent>>>),
    Shutdown,
}

/// Handle for communicating with the event store actor
#[derive(Clone)]
pub struct EventStoreHandle {
    command_tx: mpsc::Sender<EventStoreCommand>,
}

impl EventStoreHandle {
    /// Create a new empty handle for initialization purposes
    pub fn empty() -> Self {
        let (command_tx, _) = mpsc::channel(32);
        Self { command_tx }
    }

    /// Get the loaded event list.
    ///
    /// After a failed load this returns the captured load error on every
    /// call; the list is fetched once per process and never retried.
    pub async fn get_events(&self) -> AppResult<Vec<ScheduleEvent>> {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.command_tx
            .send(EventStoreCommand::GetEvents(response_tx))
            .await
            .map_err(|e| event_source_error(&format!("Actor mailbox error: {}", e)))?;

        response_rx
            .recv()
            .await
            .ok_or_else(|| event_source_error("Response channel closed"))?
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> AppResult<()> {
        let _ = self.command_tx.send(EventStoreCommand::Shutdown).await;
        Ok(())
    }
}

impl EventStoreActor {
    /// Create a new actor and return its handle
    pub fn new(config: Arc<RwLock<Config>>) -> (Self, EventStoreHandle) {
        let (command_tx, command_rx) = mpsc::channel(32);

        let actor = Self {
            config,
            client: Client::new(),
            events: Vec::new(),
            load_error: None,
            command_rx,
        };

        let handle = EventStoreHandle { command_tx };

        (actor, handle)
    }

    /// Start the actor's processing loop.
    ///
    /// The event list is loaded exactly once, before the first command is
    /// served. A failed load is remembered and surfaced through `GetEvents`.
    pub async fn run(&mut self) {
        info!("Event store actor started");

        match Self::load_events(Arc::clone(&self.config), self.client.clone()).await {
            Ok(events) => {
                info!("Loaded {} events", events.len());
                self.events = events;
            }
            Err(e) => {
                warn!("Failed to load event list: {}", e);
                self.load_error = Some(e.to_string());
            }
        }

        // Process commands
        while let Some(cmd) = self.command_rx.recv().await {
            match cmd {
                EventStoreCommand::GetEvents(response_tx) => {
                    let result = match &self.load_error {
                        Some(message) => Err(event_source_error(message)),
                        None => Ok(self.events.clone()),
                    };
                    let _ = response_tx.send(result).await;
                }
                EventStoreCommand::Shutdown => {
                    info!("Event store actor shutting down");
                    break;
                }
            }
        }

        info!("Event store actor shut down");
    }

    /// Load the event list from the configured source
    pub async fn load_events(
        config: Arc<RwLock<Config>>,
        client: Client,
    ) -> AppResult<Vec<ScheduleEvent>> {
        let (source, tz) = {
            let config_read = config.read().await;
            (config_read.events_source.clone(), config_read.tz())
        };

        let raw = if source.starts_with("http://") || source.starts_with("https://") {
            let response = client.get(&source).send().await?;

            if !response.status().is_success() {
                return Err(event_source_error(&format!(
                    "Failed to fetch event list: HTTP {}",
                    response.status()
                )));
            }

            response.text().await?
        } else {
            tokio::fs::read_to_string(&source).await.map_err(|e| {
                event_source_error(&format!("Failed to read '{}': {}", source, e))
            })?
        };

        let events: Vec<ScheduleEvent> = serde_json::from_str(&raw)
            .map_err(|e| event_source_error(&format!("Failed to parse event list: {}", e)))?;

        // Drop events that violate the feed invariants, keep the rest
        let mut valid = Vec::with_capacity(events.len());
        for event in events {
            match validate_event(&event, tz) {
                Ok(_) => valid.push(event),
                Err(e) => warn!("Skipping event '{}': {}", event.title, e),
            }
        }

        Ok(valid)
    }
}
