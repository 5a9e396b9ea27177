pub mod handlers;
pub mod render;

use crate::components::event_store::EventStoreHandle;
use crate::components::next_live::CountdownState;
use crate::config::Config;
use std::sync::Arc;
use tokio::sync::{watch, RwLock};

/// Shared state for all request handlers
#[derive(Clone)]
pub struct AppState {
    /// Service configuration
    pub config: Arc<RwLock<Config>>,
    /// Handle to the event store actor
    pub store: EventStoreHandle,
    /// Countdown state published by the next-live tracker
    pub countdown: watch::Receiver<CountdownState>,
}
