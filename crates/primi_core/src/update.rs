use crate::{ClientState, Effect, MenuAction, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: ClientState, msg: Msg) -> (ClientState, Vec<Effect>) {
    let effects = match msg {
        Msg::MenuClicked {
            menu_item_id,
            src_url,
        } => {
            // Unrecognized ids still produce a request; the body stays empty
            // and the server ignores it.
            let draw_mode =
                MenuAction::from_id(&menu_item_id).map(|action| action.draw_mode().to_string());
            vec![Effect::SendDrawRequest { src_url, draw_mode }]
        }
        Msg::StreamOpened => {
            state.mark_stream_open();
            Vec::new()
        }
        Msg::ImageReady {
            message,
            target_url,
        } => {
            vec![Effect::ShowNotification {
                message,
                target_url,
            }]
        }
        Msg::ProblemReported { .. } => {
            // Logged where it arrives; no user-facing effect.
            Vec::new()
        }
        Msg::StreamClosed { .. } => {
            state.mark_stream_closed();
            Vec::new()
        }
        Msg::NotificationShown { id, target_url } => {
            state.registry_mut().insert(id, target_url);
            Vec::new()
        }
        Msg::NotificationClicked { id } => match state.registry_mut().take(id) {
            Some(target_url) => {
                // Dismiss before opening, preserving the click-handling order.
                let url = format!("{}{}", state.addr(), target_url);
                vec![
                    Effect::DismissNotification { id },
                    Effect::OpenInBrowser { url },
                ]
            }
            // A click for an id we no longer track (already handled, or
            // shown by an earlier process) is dropped.
            None => Vec::new(),
        },
        Msg::NotificationDismissed { id } => {
            state.registry_mut().remove(id);
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
