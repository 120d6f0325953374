use log::{debug, info, warn};
use serde::Serialize;
use tokio::sync::broadcast;

const CHANNEL_CAPACITY: usize = 64;

/// Published after every successful catalogue mutation so that anything
/// holding a copy of the merged list knows to refetch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum PostEvent {
    Created(String),
    Updated(String),
    Deleted(String),
    Restored(String),
    FeaturedChanged(Option<String>),
}

#[derive(Clone)]
pub struct PostEvents {
    sender: broadcast::Sender<PostEvent>,
}

impl PostEvents {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PostEvent> {
        self.sender.subscribe()
    }

    pub fn publish(&self, event: PostEvent) {
        // No receivers is fine.
        if self.sender.send(event).is_err() {
            debug!("post event dropped: no subscribers");
        }
    }
}

impl Default for PostEvents {
    fn default() -> Self {
        Self::new()
    }
}

/// Log every event until the bus is closed.
pub async fn log_events(mut receiver: broadcast::Receiver<PostEvent>) {
    loop {
        match receiver.recv().await {
            Ok(event) => info!("catalogue changed: {:?}", event),
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                warn!("event logger lagged, skipped {} events", skipped)
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}
