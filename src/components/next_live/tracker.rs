use super::CountdownState;
use crate::components::event_store::EventStoreHandle;
use crate::config::Config;
use crate::schedule::classify::partition_events;
use crate::schedule::countdown::{countdown_label, split_remaining};
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::{watch, RwLock};
use tokio::time::{interval, Duration as TokioDuration};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Start the countdown tracker task.
///
/// The tracker targets the soonest upcoming event at spawn time, recomputes
/// the remaining time once per second, and stops after publishing the
/// `Reached` state. Exactly one tracker runs; the cancellation token tears it
/// down on shutdown.
pub async fn start_tracker(
    config: Arc<RwLock<Config>>,
    store: EventStoreHandle,
    state_tx: watch::Sender<CountdownState>,
    cancel: CancellationToken,
) {
    let tz = {
        let config_read = config.read().await;
        config_read.tz()
    };

    tokio::spawn(async move {
        let events = match store.get_events().await {
            Ok(events) => events,
            Err(e) => {
                error!("Countdown tracker could not read the event list: {}", e);
                let _ = state_tx.send(CountdownState::Idle);
                return;
            }
        };

        let schedule = partition_events(&events, Utc::now(), tz);
        let (next, target) = match schedule.next_live() {
            Some((event, start)) => (event.clone(), *start),
            None => {
                info!("No upcoming event, countdown tracker idle");
                let _ = state_tx.send(CountdownState::Idle);
                return;
            }
        };

        info!("Counting down to '{}' at {}", next.title, target);

        let mut tick = interval(TokioDuration::from_secs(1));
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("Countdown tracker cancelled");
                    return;
                }
                _ = tick.tick() => {
                    let remaining = target - Utc::now();
                    if remaining.num_seconds() <= 0 {
                        // Latch the final state and stop recomputing
                        info!("'{}' has reached its start time", next.title);
                        let _ = state_tx.send(CountdownState::Reached {
                            event_id: next.id.clone(),
                            title: next.title.clone(),
                        });
                        return;
                    }

                    let label = countdown_label(&split_remaining(remaining));
                    let _ = state_tx.send(CountdownState::Counting {
                        event_id: next.id.clone(),
                        title: next.title.clone(),
                        label,
                    });
                }
            }
        }
    });
}
