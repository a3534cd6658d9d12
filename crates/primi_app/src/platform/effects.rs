use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use client_logging::{client_debug, client_info, client_warn};
use primi_core::{Effect, Msg};
use primi_engine::{ClientEvent, DrawMode, DrawRequest, EngineCommander, EngineHandle, ServerEvent};

use super::browser;
use super::notify::NotificationSurface;

/// Executes the effects the state machine asks for. Effects inside one batch
/// run in order, which is what keeps "dismiss, then open" intact on a
/// notification click.
pub struct EffectRunner {
    commander: EngineCommander,
    surface: Box<dyn NotificationSurface>,
    addr: String,
    msg_tx: mpsc::Sender<Msg>,
}

impl EffectRunner {
    pub fn new(
        commander: EngineCommander,
        surface: Box<dyn NotificationSurface>,
        addr: String,
        msg_tx: mpsc::Sender<Msg>,
    ) -> Self {
        Self {
            commander,
            surface,
            addr,
            msg_tx,
        }
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SendDrawRequest { src_url, draw_mode } => {
                    client_info!("SendDrawRequest url={} mode={:?}", src_url, draw_mode);
                    self.commander
                        .dispatch(self.addr.clone(), build_request(src_url, draw_mode));
                }
                Effect::ShowNotification {
                    message,
                    target_url,
                } => {
                    if let Some(id) = self.surface.show(&message) {
                        let _ = self.msg_tx.send(Msg::NotificationShown { id, target_url });
                    }
                }
                Effect::DismissNotification { id } => {
                    self.surface.dismiss(id);
                }
                Effect::OpenInBrowser { url } => {
                    browser::open_url(&url);
                }
            }
        }
    }
}

/// Translates the state machine's idea of a draw into the engine's. An
/// unrecognized style stays unrecognized: the request goes out with no mode.
pub(crate) fn build_request(src_url: String, draw_mode: Option<String>) -> DrawRequest {
    DrawRequest {
        src_url,
        draw_mode: draw_mode.as_deref().and_then(DrawMode::parse),
    }
}

/// Moves the engine's event side onto its own thread and republishes
/// everything as messages. The thread ends when the message loop goes away.
pub fn spawn_event_bridge(engine: EngineHandle, msg_tx: mpsc::Sender<Msg>) {
    thread::spawn(move || loop {
        if let Some(event) = engine.try_recv() {
            let msg = match event {
                ClientEvent::StreamOpened => {
                    client_info!("Subscribed to the render stream");
                    Msg::StreamOpened
                }
                ClientEvent::Stream(ServerEvent::Image(payload)) => {
                    client_debug!(
                        "Image event: url={} img={:?} src={:?}",
                        payload.url,
                        payload.img,
                        payload.src
                    );
                    Msg::ImageReady {
                        message: payload.message,
                        target_url: payload.url,
                    }
                }
                ClientEvent::Stream(ServerEvent::Problem { detail }) => {
                    client_warn!("Server reported a problem: {}", detail);
                    Msg::ProblemReported { detail }
                }
                ClientEvent::StreamClosed { result } => {
                    match &result {
                        Ok(()) => client_info!("Stream closed by the server"),
                        Err(err) => client_warn!("Stream closed: {}", err),
                    }
                    Msg::StreamClosed {
                        error: result.err().map(|err| err.to_string()),
                    }
                }
                ClientEvent::DispatchCompleted { src_url, result } => {
                    match result {
                        Ok(()) => client_info!("Draw request for {} accepted", src_url),
                        Err(err) => client_warn!("Draw request for {} failed: {}", src_url, err),
                    }
                    Msg::NoOp
                }
            };
            if msg_tx.send(msg).is_err() {
                break;
            }
        } else {
            thread::sleep(Duration::from_millis(20));
        }
    });
}
