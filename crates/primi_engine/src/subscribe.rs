use std::sync::mpsc;
use std::time::Duration;

use client_logging::{client_debug, client_trace, client_warn};
use futures_util::StreamExt;
use reqwest::header::ACCEPT;

use crate::sse::{SseEvent, SseParser};
use crate::types::{ClientEvent, ImagePayload, ServerEvent, StreamError, StreamFailureKind};

/// Settings for the push-stream subscription.
#[derive(Debug, Clone)]
pub struct SubscribeSettings {
    /// Connect timeout only. The stream itself is long-lived and must not
    /// carry a request timeout, or it would be cut mid-subscription.
    pub connect_timeout: Duration,
}

impl Default for SubscribeSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Where stream events go as they arrive.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: ClientEvent);
}

/// Sink that forwards into an `mpsc` channel. Send failures are ignored: a
/// dropped receiver means the owner has already gone away.
pub struct ChannelEventSink {
    tx: mpsc::Sender<ClientEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<ClientEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: ClientEvent) {
        let _ = self.tx.send(event);
    }
}

/// Holds a server's push stream open and feeds its events to a sink.
#[async_trait::async_trait]
pub trait Subscriber: Send + Sync {
    /// Opens `<addr>/primi` and pumps events into `sink` until the transport
    /// ends. `Ok(())` is a clean server close.
    async fn subscribe(&self, addr: &str, sink: &dyn EventSink) -> Result<(), StreamError>;
}

#[derive(Debug, Clone)]
pub struct SseSubscriber {
    settings: SubscribeSettings,
}

impl SseSubscriber {
    pub fn new(settings: SubscribeSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, StreamError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .build()
            .map_err(|err| StreamError::new(StreamFailureKind::Transport, err.to_string()))
    }
}

#[async_trait::async_trait]
impl Subscriber for SseSubscriber {
    async fn subscribe(&self, addr: &str, sink: &dyn EventSink) -> Result<(), StreamError> {
        let endpoint = format!("{addr}/primi");
        let target = reqwest::Url::parse(&endpoint).map_err(|err| {
            StreamError::new(StreamFailureKind::InvalidAddress, err.to_string())
        })?;
        let client = self.build_client()?;

        let response = client
            .get(target)
            .header(ACCEPT, "text/event-stream")
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        // The stream counts as open only on a plain 200, like a browser
        // EventSource.
        if status != reqwest::StatusCode::OK {
            return Err(StreamError::new(
                StreamFailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        sink.emit(ClientEvent::StreamOpened);

        let mut parser = SseParser::new();
        let mut body = response.bytes_stream();
        while let Some(chunk) = body.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            client_trace!("stream chunk: {} bytes", chunk.len());
            for frame in parser.push(&chunk) {
                if let Some(event) = interpret_frame(frame) {
                    sink.emit(ClientEvent::Stream(event));
                }
            }
        }
        Ok(())
    }
}

/// Maps one wire frame to a server event. Unknown names and undecodable
/// payloads are logged and skipped; a bad frame never ends the stream.
fn interpret_frame(frame: SseEvent) -> Option<ServerEvent> {
    match frame.name.as_deref() {
        Some("image") => match serde_json::from_str::<ImagePayload>(&frame.data) {
            Ok(payload) => Some(ServerEvent::Image(payload)),
            Err(err) => {
                client_warn!("undecodable image event ({err}): {}", frame.data);
                None
            }
        },
        Some("problem") => Some(ServerEvent::Problem { detail: frame.data }),
        Some(other) => {
            client_debug!("ignoring stream event {other:?}");
            None
        }
        None => {
            client_debug!("ignoring unnamed stream event");
            None
        }
    }
}

fn map_reqwest_error(err: reqwest::Error) -> StreamError {
    if err.is_timeout() {
        return StreamError::new(StreamFailureKind::Timeout, err.to_string());
    }
    StreamError::new(StreamFailureKind::Transport, err.to_string())
}
