use crate::tui::UiLogEntry;
use chrono::Local;
use tokio::sync::mpsc;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;

// Visitor that pulls the message field out of a tracing event
struct LogEntryVisitor {
    timestamp: String,
    level: Level,
    target: String,
    message: Option<String>,
}

impl LogEntryVisitor {
    fn new(level: Level, target: String) -> Self {
        Self {
            timestamp: Local::now().format("%H:%M:%S").to_string(),
            level,
            target,
            message: None,
        }
    }
}

impl tracing::field::Visit for LogEntryVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{:?}", value));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        }
    }
}

/// Forwards log events to the in-app log view over a channel.
pub struct UiLogCollectorLayer {
    sender: mpsc::UnboundedSender<UiLogEntry>,
}

impl UiLogCollectorLayer {
    pub fn new(sender: mpsc::UnboundedSender<UiLogEntry>) -> Self {
        Self { sender }
    }
}

impl<S: Subscriber> Layer<S> for UiLogCollectorLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let meta = event.metadata();
        let level = *meta.level();
        let target = meta.target().to_string();

        let mut visitor = LogEntryVisitor::new(level, target);
        event.record(&mut visitor);

        if let Some(message) = visitor.message {
            let log_entry = UiLogEntry {
                timestamp: visitor.timestamp,
                level: visitor.level,
                target: visitor.target,
                message,
            };
            // Headless runs drop the receiver; losing these events is fine
            // because the file layer still has them.
            let _ = self.sender.send(log_entry);
        }
    }
}
