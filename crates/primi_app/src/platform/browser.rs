use client_logging::{client_info, client_warn};

/// Opens `url` with the system handler. Failures are logged, never fatal.
pub(crate) fn open_url(url: &str) {
    client_info!("Opening {}", url);
    if let Err(err) = open::that(url) {
        client_warn!("Failed to open {}: {}", url, err);
    }
}
