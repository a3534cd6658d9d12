//! Desktop notifications for finished renders.
//!
//! On freedesktop targets every notification stays up until the user acts on
//! it, and a click comes back as a message so the render can be opened in
//! the browser. Other platforms get a logging stub: the watcher still runs,
//! the results just stay in the log.

use std::sync::mpsc;

use primi_core::{Msg, NotificationId};

/// What the watcher needs from the OS notification system.
pub trait NotificationSurface {
    /// Shows one persistent notification. Returns its id, or `None` when the
    /// platform refused it; refusals are logged, not fatal.
    fn show(&self, message: &str) -> Option<NotificationId>;

    /// Drops client-side tracking for `id`. The on-screen toast is closed by
    /// the notification server when its action fires, so there is nothing
    /// left to tear down remotely.
    fn dismiss(&self, id: NotificationId);
}

/// The surface for the platform this binary was built for.
pub fn platform_surface(msg_tx: mpsc::Sender<Msg>) -> Box<dyn NotificationSurface> {
    #[cfg(all(unix, not(target_os = "macos")))]
    {
        Box::new(freedesktop::FreedesktopSurface::new(msg_tx))
    }
    #[cfg(not(all(unix, not(target_os = "macos"))))]
    {
        Box::new(fallback::LoggingSurface::new(msg_tx))
    }
}

/// Maps one action identifier from the notification server to a message.
/// `__closed` is the server's word for a dismissal; every real action,
/// including the implicit body click, counts as a click.
fn action_to_msg(id: NotificationId, action: &str) -> Msg {
    if action == "__closed" {
        Msg::NotificationDismissed { id }
    } else {
        Msg::NotificationClicked { id }
    }
}

#[cfg(all(unix, not(target_os = "macos")))]
mod freedesktop {
    use std::sync::mpsc;
    use std::thread;

    use client_logging::{client_debug, client_warn};
    use notify_rust::{Notification, Timeout};
    use primi_core::{Msg, NotificationId};

    use super::{action_to_msg, NotificationSurface};

    const SUMMARY: &str = "primi";

    pub struct FreedesktopSurface {
        msg_tx: mpsc::Sender<Msg>,
    }

    impl FreedesktopSurface {
        pub fn new(msg_tx: mpsc::Sender<Msg>) -> Self {
            Self { msg_tx }
        }
    }

    impl NotificationSurface for FreedesktopSurface {
        fn show(&self, message: &str) -> Option<NotificationId> {
            let shown = Notification::new()
                .summary(SUMMARY)
                .body(message)
                // "default" is the body-click action on freedesktop servers.
                .action("default", "Open")
                .timeout(Timeout::Never)
                .show();

            let handle = match shown {
                Ok(handle) => handle,
                Err(err) => {
                    client_warn!("Could not show notification: {}", err);
                    return None;
                }
            };

            let id = handle.id();
            let msg_tx = self.msg_tx.clone();
            // wait_for_action blocks until the user clicks or closes, so each
            // notification gets its own watcher thread.
            thread::spawn(move || {
                handle.wait_for_action(|action| {
                    let _ = msg_tx.send(action_to_msg(id, action));
                });
            });
            Some(id)
        }

        fn dismiss(&self, id: NotificationId) {
            client_debug!("Notification {} handled", id);
        }
    }
}

#[cfg(not(all(unix, not(target_os = "macos"))))]
mod fallback {
    use std::sync::mpsc;

    use client_logging::client_info;
    use primi_core::{Msg, NotificationId};

    use super::NotificationSurface;

    /// No notification wiring on this platform; renders are only logged.
    pub struct LoggingSurface {
        _msg_tx: mpsc::Sender<Msg>,
    }

    impl LoggingSurface {
        pub fn new(msg_tx: mpsc::Sender<Msg>) -> Self {
            Self { _msg_tx: msg_tx }
        }
    }

    impl NotificationSurface for LoggingSurface {
        fn show(&self, message: &str) -> Option<NotificationId> {
            client_info!("Render ready (notifications unavailable here): {}", message);
            None
        }

        fn dismiss(&self, _id: NotificationId) {}
    }
}
