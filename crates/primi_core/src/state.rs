use crate::NotificationRegistry;

/// Connection phase of the single event-stream subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StreamPhase {
    /// No connection attempt yet.
    #[default]
    Idle,
    /// The subscription is live.
    Open,
    /// The transport ended; it is never reopened within this lifecycle.
    Closed,
}

/// State for one watch lifecycle.
///
/// The server address is captured once at initialization: a configuration
/// edit while the stream is open neither retargets the connection nor the
/// URLs its notifications open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientState {
    addr: String,
    stream: StreamPhase,
    registry: NotificationRegistry,
}

impl ClientState {
    pub fn new(addr: impl Into<String>) -> Self {
        Self {
            addr: addr.into(),
            stream: StreamPhase::Idle,
            registry: NotificationRegistry::new(),
        }
    }

    pub fn addr(&self) -> &str {
        &self.addr
    }

    pub fn stream_phase(&self) -> StreamPhase {
        self.stream
    }

    /// Number of notifications currently awaiting a click or dismissal.
    pub fn pending_notifications(&self) -> usize {
        self.registry.len()
    }

    pub(crate) fn registry_mut(&mut self) -> &mut NotificationRegistry {
        &mut self.registry
    }

    pub(crate) fn mark_stream_open(&mut self) {
        self.stream = StreamPhase::Open;
    }

    pub(crate) fn mark_stream_closed(&mut self) {
        self.stream = StreamPhase::Closed;
    }
}
