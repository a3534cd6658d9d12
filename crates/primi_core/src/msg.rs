use crate::NotificationId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// A draw action was picked for an image: the clicked action id plus the
    /// image's source URL.
    MenuClicked {
        menu_item_id: String,
        src_url: String,
    },
    /// The event-stream connection to the server is up.
    StreamOpened,
    /// The server finished rendering an image; `target_url` is the relative
    /// result page to open when the matching notification is clicked.
    ImageReady {
        message: String,
        target_url: String,
    },
    /// The server reported a failed render (already logged at the bridge).
    ProblemReported { detail: String },
    /// The event-stream transport ended; `error` carries the failure reason
    /// when the close was not a clean server shutdown.
    StreamClosed { error: Option<String> },
    /// The desktop surface created a notification for a finished render.
    NotificationShown {
        id: NotificationId,
        target_url: String,
    },
    /// The user clicked a notification.
    NotificationClicked { id: NotificationId },
    /// A notification was dismissed without being clicked.
    NotificationDismissed { id: NotificationId },
    /// Fallback for placeholder wiring.
    NoOp,
}
