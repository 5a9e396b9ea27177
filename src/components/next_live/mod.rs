mod tracker;

use crate::components::event_store::EventStoreHandle;
use crate::config::Config;
use crate::error::AppResult;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::{watch, RwLock};
use tokio_util::sync::CancellationToken;

/// Published countdown state for the single soonest upcoming event
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CountdownState {
    /// No upcoming event to count down to
    #[default]
    Idle,
    /// Counting down to the target start
    Counting {
        event_id: String,
        title: String,
        label: String,
    },
    /// Target start has passed; the stream is in progress or starting
    Reached { event_id: String, title: String },
}

/// Next-live component: owns the countdown tracker task
pub struct NextLive {
    state_tx: watch::Sender<CountdownState>,
    cancel: CancellationToken,
}

impl NextLive {
    /// Create the component around a state channel created by the caller
    pub fn new(state_tx: watch::Sender<CountdownState>) -> Self {
        Self {
            state_tx,
            cancel: CancellationToken::new(),
        }
    }

    /// Subscribe to countdown state updates
    #[allow(dead_code)]
    pub fn subscribe(&self) -> watch::Receiver<CountdownState> {
        self.state_tx.subscribe()
    }
}

#[async_trait]
impl super::Component for NextLive {
    fn name(&self) -> &'static str {
        "next_live"
    }

    async fn init(
        &self,
        config: Arc<RwLock<Config>>,
        store_handle: EventStoreHandle,
    ) -> AppResult<()> {
        tracker::start_tracker(
            config,
            store_handle,
            self.state_tx.clone(),
            self.cancel.clone(),
        )
        .await;
        Ok(())
    }

    async fn shutdown(&self) -> AppResult<()> {
        self.cancel.cancel();
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
