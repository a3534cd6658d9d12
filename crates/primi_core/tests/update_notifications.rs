use std::sync::Once;

use primi_core::{update, ClientState, Effect, Msg};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(client_logging::initialize_for_tests);
}

fn image_ready(state: ClientState, message: &str, target_url: &str) -> (ClientState, Vec<Effect>) {
    update(
        state,
        Msg::ImageReady {
            message: message.to_string(),
            target_url: target_url.to_string(),
        },
    )
}

#[test]
fn image_event_shows_one_notification() {
    init_logging();
    let state = ClientState::new("http://localhost:8100");

    let (next, effects) = image_ready(state, "done", "/out/1.png");

    assert_eq!(
        effects,
        vec![Effect::ShowNotification {
            message: "done".to_string(),
            target_url: "/out/1.png".to_string(),
        }]
    );
    // Nothing is tracked until the surface reports the created notification.
    assert_eq!(next.pending_notifications(), 0);
}

#[test]
fn shown_notification_is_tracked_until_clicked() {
    init_logging();
    let state = ClientState::new("http://localhost:8100");
    let (state, _effects) = image_ready(state, "done", "/out/1.png");

    let (state, effects) = update(
        state,
        Msg::NotificationShown {
            id: 7,
            target_url: "/out/1.png".to_string(),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.pending_notifications(), 1);

    let (state, effects) = update(state, Msg::NotificationClicked { id: 7 });
    assert_eq!(
        effects,
        vec![
            Effect::DismissNotification { id: 7 },
            Effect::OpenInBrowser {
                url: "http://localhost:8100/out/1.png".to_string(),
            },
        ]
    );
    assert_eq!(state.pending_notifications(), 0);
}

#[test]
fn second_click_on_same_notification_does_nothing() {
    init_logging();
    let state = ClientState::new("http://localhost:8100");
    let (state, _) = update(
        state,
        Msg::NotificationShown {
            id: 3,
            target_url: "/show/abc".to_string(),
        },
    );

    let (state, first) = update(state, Msg::NotificationClicked { id: 3 });
    assert_eq!(first.len(), 2);

    let (_state, second) = update(state, Msg::NotificationClicked { id: 3 });
    assert!(second.is_empty());
}

#[test]
fn click_for_unknown_notification_is_ignored() {
    init_logging();
    let state = ClientState::new("http://localhost:8100");

    let (_state, effects) = update(state, Msg::NotificationClicked { id: 42 });

    assert!(effects.is_empty());
}

#[test]
fn dismissal_without_click_forgets_the_target() {
    init_logging();
    let state = ClientState::new("http://localhost:8100");
    let (state, _) = update(
        state,
        Msg::NotificationShown {
            id: 9,
            target_url: "/show/def".to_string(),
        },
    );
    assert_eq!(state.pending_notifications(), 1);

    let (state, effects) = update(state, Msg::NotificationDismissed { id: 9 });
    assert!(effects.is_empty());
    assert_eq!(state.pending_notifications(), 0);

    // A late click signal after dismissal opens nothing.
    let (_state, effects) = update(state, Msg::NotificationClicked { id: 9 });
    assert!(effects.is_empty());
}

#[test]
fn concurrent_notifications_resolve_independently() {
    init_logging();
    let state = ClientState::new("http://primi.example");
    let (state, _) = update(
        state,
        Msg::NotificationShown {
            id: 1,
            target_url: "/show/first".to_string(),
        },
    );
    let (state, _) = update(
        state,
        Msg::NotificationShown {
            id: 2,
            target_url: "/show/second".to_string(),
        },
    );
    assert_eq!(state.pending_notifications(), 2);

    // Click order is not creation order.
    let (state, effects) = update(state, Msg::NotificationClicked { id: 2 });
    assert_eq!(
        effects,
        vec![
            Effect::DismissNotification { id: 2 },
            Effect::OpenInBrowser {
                url: "http://primi.example/show/second".to_string(),
            },
        ]
    );

    let (state, effects) = update(state, Msg::NotificationClicked { id: 1 });
    assert_eq!(
        effects,
        vec![
            Effect::DismissNotification { id: 1 },
            Effect::OpenInBrowser {
                url: "http://primi.example/show/first".to_string(),
            },
        ]
    );
    assert_eq!(state.pending_notifications(), 0);
}
