use bytes::BytesMut;

/// One decoded server-sent event: the optional `event` name plus the joined
/// `data` payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseEvent {
    pub name: Option<String>,
    pub data: String,
}

/// Incremental decoder for the `text/event-stream` wire format.
///
/// Bytes arrive in arbitrary chunks; only complete lines are interpreted, so
/// an event split across reads reassembles correctly. Comment lines (leading
/// `:`) are the server's keep-alives and produce nothing. `id` and `retry`
/// fields are tolerated and ignored.
#[derive(Debug, Default)]
pub struct SseParser {
    buffer: BytesMut,
    event_name: Option<String>,
    data_lines: Vec<String>,
}

impl SseParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one chunk and returns every event it completed.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<SseEvent> {
        self.buffer.extend_from_slice(chunk);
        let mut events = Vec::new();
        while let Some(line) = self.next_line() {
            if let Some(event) = self.handle_line(&line) {
                events.push(event);
            }
        }
        events
    }

    fn next_line(&mut self) -> Option<String> {
        let end = self.buffer.iter().position(|byte| *byte == b'\n')?;
        let mut line = self.buffer.split_to(end + 1);
        line.truncate(end);
        if line.last() == Some(&b'\r') {
            line.truncate(line.len() - 1);
        }
        Some(String::from_utf8_lossy(&line).into_owned())
    }

    fn handle_line(&mut self, line: &str) -> Option<SseEvent> {
        if line.is_empty() {
            return self.flush();
        }
        if line.starts_with(':') {
            // Keep-alive comment.
            return None;
        }
        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };
        match field {
            "event" => self.event_name = Some(value.to_string()),
            "data" => self.data_lines.push(value.to_string()),
            // `id` and `retry` are part of the format but carry nothing we use.
            _ => {}
        }
        None
    }

    /// Ends the current event. Events that carried no data lines, keep-alive
    /// frames included, dispatch nothing; the pending name is dropped either
    /// way.
    fn flush(&mut self) -> Option<SseEvent> {
        let name = self.event_name.take();
        if self.data_lines.is_empty() {
            return None;
        }
        let data = self.data_lines.join("\n");
        self.data_lines.clear();
        Some(SseEvent { name, data })
    }
}
