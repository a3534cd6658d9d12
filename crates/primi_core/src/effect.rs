use crate::NotificationId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// POST one draw request to the configured server. `draw_mode` is `None`
    /// when the clicked id is not in the menu table; the request still goes
    /// out, with an empty body the server treats as a no-op.
    SendDrawRequest {
        src_url: String,
        draw_mode: Option<String>,
    },
    /// Create one persistent, clickable desktop notification.
    ShowNotification {
        message: String,
        target_url: String,
    },
    /// Dismiss the notification with this id.
    DismissNotification { id: NotificationId },
    /// Open the absolute result URL in the default browser.
    OpenInBrowser { url: String },
}
