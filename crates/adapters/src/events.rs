use photo_flow_application::{EventPublisher, WorkflowEvent};
use tokio::sync::broadcast;
use tracing::{debug, info};

/// Fans workflow events out to every subscriber.
#[derive(Clone)]
pub struct BroadcastEventBus {
    tx: broadcast::Sender<WorkflowEvent>,
}

impl BroadcastEventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        info!(capacity, "event bus initialized");
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<WorkflowEvent> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl EventPublisher for BroadcastEventBus {
    fn publish(&self, event: WorkflowEvent) {
        let name = event.name();
        match self.tx.send(event) {
            Ok(receivers) => debug!(event = name, receivers, "event published"),
            Err(_) => debug!(event = name, "event dropped, no subscribers"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscribers_receive_events_in_order() {
        let bus = BroadcastEventBus::new(8);
        let mut rx = bus.subscribe();

        bus.publish(WorkflowEvent::BusyStart);
        bus.publish(WorkflowEvent::BusyEnd);

        assert_eq!(rx.try_recv().expect("first"), WorkflowEvent::BusyStart);
        assert_eq!(rx.try_recv().expect("second"), WorkflowEvent::BusyEnd);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn publishing_without_subscribers_is_harmless() {
        let bus = BroadcastEventBus::new(0);
        assert_eq!(bus.subscriber_count(), 0);
        bus.publish(WorkflowEvent::RefreshRequested);

        let mut rx = bus.subscribe();
        bus.publish(WorkflowEvent::RefreshRequested);
        assert_eq!(
            rx.try_recv().expect("event"),
            WorkflowEvent::RefreshRequested
        );
    }
}
