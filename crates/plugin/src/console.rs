//! Overlay console sink
//!
//! A `tracing` layer that renders each event as `"[LEVEL] message"` and
//! queues it for the camera system's overlay. The overlay drains the queue
//! through `inputgate_next_console_line`; when it falls behind, new lines
//! are dropped rather than blocking the thread that logged them.

use std::fmt::{self, Write as _};

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

/// Bounded queue of rendered log lines
pub struct ConsoleQueue {
    sender: Sender<String>,
    receiver: Receiver<String>,
}

impl ConsoleQueue {
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity.max(1));
        Self { sender, receiver }
    }

    /// Queue a line, dropping it if the overlay hasn't kept up
    pub fn push(&self, line: String) -> bool {
        match self.sender.try_send(line) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) | Err(TrySendError::Disconnected(_)) => false,
        }
    }

    /// Take the oldest queued line
    pub fn pop(&self) -> Option<String> {
        self.receiver.try_recv().ok()
    }

    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }

    /// Layer feeding this queue
    pub fn layer(&self) -> ConsoleLayer {
        ConsoleLayer {
            sender: self.sender.clone(),
        }
    }
}

impl fmt::Debug for ConsoleQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsoleQueue")
            .field("len", &self.len())
            .field("capacity", &self.sender.capacity())
            .finish()
    }
}

/// `tracing` layer writing into a [`ConsoleQueue`]
pub struct ConsoleLayer {
    sender: Sender<String>,
}

impl<S: Subscriber> Layer<S> for ConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = LineVisitor::default();
        event.record(&mut visitor);

        let line = format!(
            "[{}] {}{}",
            event.metadata().level(),
            visitor.line,
            visitor.fields
        );
        // Never block or fail the logging thread
        let _ = self.sender.try_send(line);
    }
}

/// Collects the `message` field first, then any other fields as `key=value`
#[derive(Default)]
struct LineVisitor {
    line: String,
    fields: String,
}

impl LineVisitor {
    fn push_field(&mut self, field: &Field, value: fmt::Arguments<'_>) {
        if field.name() == "message" {
            let _ = write!(self.line, "{}", value);
        } else {
            let _ = write!(self.fields, " {}={}", field.name(), value);
        }
    }
}

impl Visit for LineVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.push_field(field, format_args!("{}", value));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.push_field(field, format_args!("{:?}", value));
    }
}
