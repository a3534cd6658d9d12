mod browser;
mod config;
mod effects;
mod logging;
mod notify;
mod watch;

use std::path::Path;
use std::time::Duration;

use client_logging::{client_info, client_warn};
use primi_core::{update, ClientState, Effect, MenuAction, Msg};
use primi_engine::{ClientEvent, EngineHandle, EngineSettings};

use crate::cli::{Cli, Command};
use logging::LogDestination;

// Longer than the engine's request timeout, so a slow server surfaces as a
// dispatch failure rather than a missing reply.
const DRAW_WAIT: Duration = Duration::from_secs(35);

pub fn run(args: Cli) -> anyhow::Result<()> {
    let data_dir = args.data_dir.unwrap_or_else(config::default_config_dir);

    match args.command.unwrap_or(Command::Watch) {
        Command::Watch => {
            logging::initialize(LogDestination::Both, &data_dir);
            watch::run_watch(&data_dir)
        }
        Command::Draw { src_url, style } => {
            logging::initialize(LogDestination::Terminal, &data_dir);
            run_draw(&data_dir, style.into(), src_url)
        }
        Command::Addr { value } => {
            logging::initialize(LogDestination::Terminal, &data_dir);
            run_addr(&data_dir, value)
        }
        Command::Actions => {
            run_actions();
            Ok(())
        }
        Command::Options => {
            logging::initialize(LogDestination::Terminal, &data_dir);
            run_options(&data_dir)
        }
    }
}

/// Sends one draw request the same way a click on a draw action would, waits
/// long enough to log the outcome, and exits cleanly either way.
fn run_draw(data_dir: &Path, action: MenuAction, src_url: String) -> anyhow::Result<()> {
    let addr = config::load_server_addr(data_dir);
    let state = ClientState::new(addr.clone());
    let (_state, effects) = update(
        state,
        Msg::MenuClicked {
            menu_item_id: action.id().to_string(),
            src_url,
        },
    );

    let engine = EngineHandle::new(EngineSettings::default());
    for effect in effects {
        if let Effect::SendDrawRequest { src_url, draw_mode } = effect {
            engine.dispatch(addr.clone(), effects::build_request(src_url, draw_mode));
        }
    }

    // Submissions are fire-and-forget: the outcome is logged and the exit
    // code stays zero.
    match engine.recv_timeout(DRAW_WAIT) {
        Some(ClientEvent::DispatchCompleted { src_url, result }) => match result {
            Ok(()) => client_info!("Draw request for {} accepted", src_url),
            Err(err) => client_warn!("Draw request for {} failed: {}", src_url, err),
        },
        _ => client_warn!("No reply from the engine"),
    }
    Ok(())
}

/// Prints the stored server address; with a value, stores it first. What
/// prints is always re-read from the file, so the caller sees exactly what
/// took effect.
fn run_addr(data_dir: &Path, value: Option<String>) -> anyhow::Result<()> {
    if let Some(value) = value {
        config::save_server_addr(data_dir, &value)?;
    }
    println!("{}", config::load_server_addr(data_dir));
    Ok(())
}

fn run_actions() {
    for action in MenuAction::ALL {
        println!("{}\t{}", action.id(), action.title());
    }
}

/// Opens the configuration file with the system handler, creating it first
/// so there is something to open.
fn run_options(data_dir: &Path) -> anyhow::Result<()> {
    let path = config::ensure_config_file(data_dir)?;
    client_info!("Opening {:?}", path);
    if let Err(err) = open::that(&path) {
        // Some desktops report an error here even though the editor opened.
        client_warn!("Opening {:?} reported: {}", path, err);
    }
    Ok(())
}
