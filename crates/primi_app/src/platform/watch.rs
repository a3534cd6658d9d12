use std::path::Path;
use std::sync::mpsc;

use client_logging::client_info;
use primi_core::{update, ClientState, Msg, StreamPhase};
use primi_engine::{EngineHandle, EngineSettings};

use super::config;
use super::effects::{spawn_event_bridge, EffectRunner};
use super::notify;

/// Runs the long-lived watcher: subscribe to the server's push stream once
/// and turn every finished render into a notification, until the stream
/// ends. There is no reconnect; restarting the watcher is the retry.
pub fn run_watch(data_dir: &Path) -> anyhow::Result<()> {
    let addr = config::load_server_addr(data_dir);
    client_info!("Watching {}", addr);

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();

    let engine = EngineHandle::new(EngineSettings::default());
    let commander = engine.commander();
    engine.subscribe(addr.clone());
    spawn_event_bridge(engine, msg_tx.clone());

    let surface = notify::platform_surface(msg_tx.clone());
    let runner = EffectRunner::new(commander, surface, addr.clone(), msg_tx);

    let mut state = ClientState::new(addr);
    let mut close_error = None;
    while let Ok(msg) = msg_rx.recv() {
        if let Msg::StreamClosed { error } = &msg {
            close_error = error.clone();
        }
        let (next, effects) = update(state, msg);
        state = next;
        runner.enqueue(effects);
        if state.stream_phase() == StreamPhase::Closed {
            break;
        }
    }

    if let Some(detail) = close_error {
        anyhow::bail!("stream closed: {detail}");
    }
    Ok(())
}
