use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;

use crate::types::{DispatchError, DispatchFailureKind, DrawRequest};

/// Timeouts for one draw submission.
#[derive(Debug, Clone)]
pub struct DispatchSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Sends draw requests to a server. The trait exists so the rest of the
/// client can be exercised without a network.
#[async_trait::async_trait]
pub trait DrawDispatcher: Send + Sync {
    /// Submits one draw request to `<addr>/images`.
    ///
    /// Success is HTTP 202 exactly; anything else, including other 2xx
    /// statuses, is an error for the caller to log.
    async fn dispatch(&self, addr: &str, request: &DrawRequest) -> Result<(), DispatchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestDispatcher {
    settings: DispatchSettings,
}

impl ReqwestDispatcher {
    pub fn new(settings: DispatchSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, DispatchError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| DispatchError::new(DispatchFailureKind::Network, err.to_string()))
    }
}

#[async_trait::async_trait]
impl DrawDispatcher for ReqwestDispatcher {
    async fn dispatch(&self, addr: &str, request: &DrawRequest) -> Result<(), DispatchError> {
        let endpoint = format!("{addr}/images");
        let target = reqwest::Url::parse(&endpoint).map_err(|err| {
            DispatchError::new(DispatchFailureKind::InvalidAddress, err.to_string())
        })?;
        let client = self.build_client()?;

        // The body is assembled by hand so the wire bytes match the server's
        // form parser. A request without a recognized style goes out empty.
        let body = request.form_body().unwrap_or_default();
        let response = client
            .post(target)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if status != StatusCode::ACCEPTED {
            return Err(DispatchError::new(
                DispatchFailureKind::Rejected(status.as_u16()),
                status.to_string(),
            ));
        }
        Ok(())
    }
}

fn map_reqwest_error(err: reqwest::Error) -> DispatchError {
    if err.is_timeout() {
        return DispatchError::new(DispatchFailureKind::Timeout, err.to_string());
    }
    DispatchError::new(DispatchFailureKind::Network, err.to_string())
}
