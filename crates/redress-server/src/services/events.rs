//! Dashboard Broadcast Channel
//!
//! Fan-out of activity events and stats snapshots to connected dashboard
//! viewers. Pure fan-out: no history replay for late subscribers, no
//! buffering for unreachable viewers beyond the channel's ring buffer.

use tokio::sync::broadcast;

use crate::models::{DashboardMessage, StatsSnapshot};

const CHANNEL_CAPACITY: usize = 256;

/// Single-writer-many-reader broadcast of dashboard messages.
#[derive(Clone)]
pub struct EventBroadcaster {
    tx: broadcast::Sender<DashboardMessage>,
}

impl EventBroadcaster {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Subscribe a new dashboard viewer. The receiver only sees messages
    /// published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<DashboardMessage> {
        self.tx.subscribe()
    }

    /// Publish a message to all live viewers. A send with no receivers is
    /// not an error; the message is simply dropped.
    pub fn publish(&self, message: DashboardMessage) {
        let _ = self.tx.send(message);
    }

    /// Publish a discrete activity event, stamped with the current UTC time.
    pub fn event(
        &self,
        icon: impl Into<String>,
        title: impl Into<String>,
        subtitle: impl Into<String>,
    ) {
        self.publish(DashboardMessage::Event {
            icon: icon.into(),
            title: title.into(),
            subtitle: subtitle.into(),
            time: chrono::Utc::now().format("%H:%M").to_string(),
        });
    }

    /// Publish a stats snapshot.
    pub fn stats(&self, data: StatsSnapshot) {
        self.publish(DashboardMessage::Stats { data });
    }

    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscriber_receives_event() {
        let events = EventBroadcaster::new();
        let mut rx = events.subscribe();

        events.event("receipt_long", "REFUND", "Valid claim");

        let msg = rx.recv().await.unwrap();
        match msg {
            DashboardMessage::Event { icon, title, .. } => {
                assert_eq!(icon, "receipt_long");
                assert_eq!(title, "REFUND");
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_late_subscriber_gets_no_history() {
        let events = EventBroadcaster::new();
        let mut early = events.subscribe();

        events.event("receipt_long", "REFUND", "Valid claim");

        // Connects after the event: must see nothing from before
        let mut late = events.subscribe();
        events.event("support_agent", "ESCALATE", "Needs human");

        // Early viewer sees both, in order
        assert!(matches!(
            early.recv().await.unwrap(),
            DashboardMessage::Event { ref title, .. } if title == "REFUND"
        ));
        assert!(matches!(
            early.recv().await.unwrap(),
            DashboardMessage::Event { ref title, .. } if title == "ESCALATE"
        ));

        // Late viewer sees exactly one
        assert!(matches!(
            late.recv().await.unwrap(),
            DashboardMessage::Event { ref title, .. } if title == "ESCALATE"
        ));
        assert!(late.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_publish_without_receivers_is_silent() {
        let events = EventBroadcaster::new();
        // No subscribers; must not panic or error
        events.event("image", "Image Analysis", "Completed");
        assert_eq!(events.receiver_count(), 0);
    }
}
