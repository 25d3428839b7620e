use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    /// Creates a new EventSender
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Sends an event asynchronously. Events are fire-and-forget; a full or
    /// closed channel is logged and the request proceeds.
    pub async fn send(&self, event: Event) {
        if let Err(e) = self.sender.send(event).await {
            warn!("Failed to send event: {}", e);
        }
    }
}

// Define the various events that can occur in the system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    // Order events
    OrderCreated(i32),
    OrderDeleted(i32),

    // Pipeline step events
    StepSubmitted {
        sales_order_id: i32,
        step_key: String,
    },
    StepStatusChanged {
        sales_order_id: i32,
        step_key: String,
        old_status: String,
        new_status: String,
    },
    StepAssigned {
        sales_order_id: i32,
        step_key: String,
        assignee: String,
    },
    StepReset {
        sales_order_id: i32,
        step_key: String,
    },

    // Production phase events
    PhaseSaved {
        sales_order_id: i32,
        sub_task_key: String,
    },
    PhaseStarted(i32),
    PhaseFinished(i32),
    PhaseHeld(i32),
    PhaseCancelled(i32),

    // Outsourcing events
    OutwardChallanIssued {
        tracking_id: i32,
        challan_number: String,
    },
    InwardChallanReceived {
        outward_challan_id: i32,
        challan_number: String,
    },

    // Generic event for custom messages
    Generic {
        message: String,
        timestamp: DateTime<Utc>,
        metadata: serde_json::Value,
    },
}

impl Event {
    /// Create a generic event with string data
    pub fn with_data(data: String) -> Self {
        Event::Generic {
            message: data,
            timestamp: Utc::now(),
            metadata: serde_json::Value::Null,
        }
    }
}

/// Consumes events from the channel and logs them. This is where a
/// notification store or webhook dispatcher would hang off.
pub async fn process_events(mut rx: mpsc::Receiver<Event>) {
    info!("Starting event processing loop");

    while let Some(event) = rx.recv().await {
        match &event {
            Event::StepStatusChanged {
                sales_order_id,
                step_key,
                old_status,
                new_status,
            } => {
                info!(
                    sales_order_id,
                    step_key, old_status, new_status, "step status changed"
                );
            }
            Event::OutwardChallanIssued {
                tracking_id,
                challan_number,
            } => {
                info!(tracking_id, challan_number, "outward challan issued");
            }
            Event::InwardChallanReceived {
                outward_challan_id,
                challan_number,
            } => {
                info!(outward_challan_id, challan_number, "inward challan received");
            }
            other => {
                info!("Received event: {:?}", other);
            }
        }
    }

    info!("Event processing loop stopped");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn send_delivers_to_receiver() {
        let (tx, mut rx) = mpsc::channel(8);
        let sender = EventSender::new(tx);

        sender.send(Event::OrderCreated(42)).await;

        match rx.recv().await {
            Some(Event::OrderCreated(id)) => assert_eq!(id, 42),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn send_on_closed_channel_does_not_panic() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let sender = EventSender::new(tx);
        sender.send(Event::OrderDeleted(1)).await;
    }
}
