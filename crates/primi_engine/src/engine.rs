use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use client_logging::client_warn;

use crate::dispatch::{DispatchSettings, DrawDispatcher, ReqwestDispatcher};
use crate::subscribe::{ChannelEventSink, SseSubscriber, SubscribeSettings, Subscriber};
use crate::types::{ClientEvent, DrawRequest};

/// Network-side configuration for one engine.
#[derive(Debug, Clone, Default)]
pub struct EngineSettings {
    pub dispatch: DispatchSettings,
    pub subscribe: SubscribeSettings,
}

enum EngineCommand {
    Dispatch { addr: String, request: DrawRequest },
    Subscribe { addr: String },
}

/// Handle to the network engine: commands in, events out.
///
/// All async IO runs on one dedicated runtime thread; the owner stays
/// synchronous and polls events over a channel. Draw requests are
/// fire-and-forget from the owner's point of view: the completion event
/// exists for logging, nothing blocks on it.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<ClientEvent>,
}

impl EngineHandle {
    pub fn new(settings: EngineSettings) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel::<EngineCommand>();
        let (event_tx, event_rx) = mpsc::channel::<ClientEvent>();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            let dispatcher = Arc::new(ReqwestDispatcher::new(settings.dispatch));
            let subscriber = Arc::new(SseSubscriber::new(settings.subscribe));
            let mut subscribed = false;

            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::Dispatch { addr, request } => {
                        let dispatcher = dispatcher.clone();
                        let event_tx = event_tx.clone();
                        runtime.spawn(async move {
                            let result = dispatcher.dispatch(&addr, &request).await;
                            let _ = event_tx.send(ClientEvent::DispatchCompleted {
                                src_url: request.src_url,
                                result,
                            });
                        });
                    }
                    EngineCommand::Subscribe { addr } => {
                        // The stream is opened at most once per engine.
                        if subscribed {
                            client_warn!("ignoring repeated subscribe to {addr}");
                            continue;
                        }
                        subscribed = true;
                        let subscriber = subscriber.clone();
                        let event_tx = event_tx.clone();
                        runtime.spawn(async move {
                            let sink = ChannelEventSink::new(event_tx.clone());
                            let result = subscriber.subscribe(&addr, &sink).await;
                            let _ = event_tx.send(ClientEvent::StreamClosed { result });
                        });
                    }
                }
            }
        });

        Self { cmd_tx, event_rx }
    }

    /// Queues one draw request.
    pub fn dispatch(&self, addr: impl Into<String>, request: DrawRequest) {
        self.commander().dispatch(addr, request);
    }

    /// Opens the push stream. Repeated calls are ignored.
    pub fn subscribe(&self, addr: impl Into<String>) {
        self.commander().subscribe(addr);
    }

    /// Cloneable command side, for callers that hand the event side to
    /// another thread.
    pub fn commander(&self) -> EngineCommander {
        EngineCommander {
            cmd_tx: self.cmd_tx.clone(),
        }
    }

    /// Non-blocking poll for the next engine event.
    pub fn try_recv(&self) -> Option<ClientEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Blocking poll with a deadline, for one-shot callers.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<ClientEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

/// Command side of an engine, detached from the event channel.
#[derive(Clone)]
pub struct EngineCommander {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineCommander {
    pub fn dispatch(&self, addr: impl Into<String>, request: DrawRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Dispatch {
            addr: addr.into(),
            request,
        });
    }

    pub fn subscribe(&self, addr: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Subscribe { addr: addr.into() });
    }
}
