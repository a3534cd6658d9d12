use std::fmt;

use serde::Deserialize;

/// Rendering style the server applies to a submitted image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawMode {
    Primitive,
    Triangle,
}

impl DrawMode {
    /// The `draw` form value the server expects.
    pub fn as_str(self) -> &'static str {
        match self {
            DrawMode::Primitive => "primitive",
            DrawMode::Triangle => "triangle",
        }
    }

    pub fn parse(value: &str) -> Option<DrawMode> {
        match value {
            "primitive" => Some(DrawMode::Primitive),
            "triangle" => Some(DrawMode::Triangle),
            _ => None,
        }
    }
}

impl fmt::Display for DrawMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One draw submission: the source image plus the requested style.
///
/// `draw_mode` stays `None` when the trigger did not name a known style; the
/// request is still sent, with an empty body, and the server decides what to
/// make of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawRequest {
    pub src_url: String,
    pub draw_mode: Option<DrawMode>,
}

impl DrawRequest {
    /// The literal form body, or `None` when no style is set.
    ///
    /// Values are deliberately not percent-encoded: the server's form parser
    /// reads the raw `url=<src>&draw=<mode>` pair as-is.
    pub fn form_body(&self) -> Option<String> {
        self.draw_mode
            .map(|mode| format!("url={}&draw={}", self.src_url, mode.as_str()))
    }
}

/// Payload of an `image` event on the push stream.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImagePayload {
    /// Human-readable result line, used as the notification body.
    pub message: String,
    /// Server-relative page for the finished render.
    pub url: String,
    /// Direct link to the rendered PNG.
    #[serde(default)]
    pub img: Option<String>,
    /// Source image the render was produced from.
    #[serde(default)]
    pub src: Option<String>,
}

/// One named event from the server's push stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerEvent {
    /// A finished render.
    Image(ImagePayload),
    /// A failed render; the payload is opaque text.
    Problem { detail: String },
}

/// What went wrong while sending a draw request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchFailureKind {
    /// The configured address does not form a usable request URL.
    InvalidAddress,
    /// The server answered, but not with 202 Accepted.
    Rejected(u16),
    Timeout,
    Network,
}

impl fmt::Display for DispatchFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchFailureKind::InvalidAddress => f.write_str("invalid address"),
            DispatchFailureKind::Rejected(status) => write!(f, "rejected with status {status}"),
            DispatchFailureKind::Timeout => f.write_str("timed out"),
            DispatchFailureKind::Network => f.write_str("network error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchError {
    pub kind: DispatchFailureKind,
    pub message: String,
}

impl DispatchError {
    pub(crate) fn new(kind: DispatchFailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// What ended the push stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamFailureKind {
    /// The configured address does not form a usable request URL.
    InvalidAddress,
    /// The subscription was rejected with a non-success status.
    HttpStatus(u16),
    Timeout,
    /// Connect or read failure on the open transport.
    Transport,
}

impl fmt::Display for StreamFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamFailureKind::InvalidAddress => f.write_str("invalid address"),
            StreamFailureKind::HttpStatus(status) => write!(f, "rejected with status {status}"),
            StreamFailureKind::Timeout => f.write_str("timed out"),
            StreamFailureKind::Transport => f.write_str("transport error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamError {
    pub kind: StreamFailureKind,
    pub message: String,
}

impl StreamError {
    pub(crate) fn new(kind: StreamFailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// Everything the engine reports back to its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    /// The subscription got a successful response; events may follow.
    StreamOpened,
    /// One parsed event from the open stream.
    Stream(ServerEvent),
    /// The stream ended. `Ok` is a clean server close.
    StreamClosed { result: Result<(), StreamError> },
    /// A dispatched draw request finished.
    DispatchCompleted {
        src_url: String,
        result: Result<(), DispatchError>,
    },
}
