use std::sync::Once;

use primi_core::{update, ClientState, Msg, StreamPhase};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(client_logging::initialize_for_tests);
}

#[test]
fn stream_lifecycle_moves_idle_open_closed() {
    init_logging();
    let state = ClientState::new("http://localhost:8100");
    assert_eq!(state.stream_phase(), StreamPhase::Idle);

    let (state, effects) = update(state, Msg::StreamOpened);
    assert!(effects.is_empty());
    assert_eq!(state.stream_phase(), StreamPhase::Open);

    let (state, effects) = update(state, Msg::StreamClosed { error: None });
    assert!(effects.is_empty());
    assert_eq!(state.stream_phase(), StreamPhase::Closed);
}

#[test]
fn stream_error_close_also_reaches_closed() {
    init_logging();
    let state = ClientState::new("http://localhost:8100");
    let (state, _) = update(state, Msg::StreamOpened);

    let (state, effects) = update(
        state,
        Msg::StreamClosed {
            error: Some("connection reset".to_string()),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.stream_phase(), StreamPhase::Closed);
}

#[test]
fn problem_report_has_no_effects() {
    init_logging();
    let state = ClientState::new("http://localhost:8100");

    let (state, effects) = update(
        state,
        Msg::ProblemReported {
            detail: "image decode failed".to_string(),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.pending_notifications(), 0);
    assert_eq!(state.stream_phase(), StreamPhase::Idle);
}

#[test]
fn pending_notifications_survive_stream_close() {
    init_logging();
    let state = ClientState::new("http://localhost:8100");
    let (state, _) = update(
        state,
        Msg::NotificationShown {
            id: 5,
            target_url: "/show/xyz".to_string(),
        },
    );

    let (state, _) = update(state, Msg::StreamClosed { error: None });

    // The registry is not torn down with the transport; a click that still
    // arrives in this lifecycle resolves normally.
    assert_eq!(state.pending_notifications(), 1);
    let (_state, effects) = update(state, Msg::NotificationClicked { id: 5 });
    assert_eq!(effects.len(), 2);
}
