//! Message sinks: where received runtime messages go.

use serde_json::Value;
use std::sync::Mutex;

/// Marker written in front of every logged message.
pub const MESSAGE_TAG: &str = "HttpSocketIO::log";

/// Destination for parsed inbound messages. Called once per accepted request.
pub trait MessageSink: Send + Sync {
    fn record(&self, message: &Value);
}

/// Writes each message as one INFO log line: `HttpSocketIO::log {json}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl MessageSink for LogSink {
    fn record(&self, message: &Value) {
        log::info!("{} {}", MESSAGE_TAG, message);
    }
}

/// Keeps every message in memory, in arrival order.
#[derive(Debug, Default)]
pub struct MemorySink {
    messages: Mutex<Vec<Value>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the messages recorded so far.
    pub fn messages(&self) -> Vec<Value> {
        self.messages
            .lock()
            .map(|g| g.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }
}

impl MessageSink for MemorySink {
    fn record(&self, message: &Value) {
        let mut g = self
            .messages
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        g.push(message.clone());
    }
}
