//! HTTP transport for the router's goform command endpoints.
//!
//! All commands go through two CGI-style paths: `goform_get_cmd_process` for
//! reads and `goform_set_cmd_process` for writes. The session cookie set by a
//! successful login lives in the client's cookie jar, so every call made
//! through the same transport instance after login is authenticated.

use crate::error::RouterError;
use reqwest::header::{self, HeaderMap, HeaderValue};
use tracing::debug;

/// Blocking request/response seam between the protocol logic and the wire.
///
/// [`AuthSession`](crate::auth::AuthSession) and
/// [`SmsSync`](crate::sms::SmsSync) only ever talk to this trait, which keeps
/// them testable against a canned transport.
pub trait RouterTransport {
    /// GET `goform_get_cmd_process?{query}` and return the body text.
    fn get_cmd(&self, query: &str) -> Result<String, RouterError>;

    /// POST the form to `goform_set_cmd_process` and return the body text.
    fn set_cmd(&self, form: &[(&str, &str)]) -> Result<String, RouterError>;
}

/// Transport backed by a blocking `reqwest` client with a cookie jar.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpTransport {
    /// Builds a transport for the router at `modem_ip`.
    ///
    /// The firmware rejects requests without a matching `Referer`, so it is
    /// installed as a default header on every call.
    pub fn new(modem_ip: &str) -> Result<Self, RouterError> {
        let referer = HeaderValue::from_str(&format!("http://{modem_ip}/"))
            .map_err(|_| RouterError::InvalidAddress(modem_ip.to_string()))?;
        let mut headers = HeaderMap::new();
        headers.insert(header::REFERER, referer);

        let client = reqwest::blocking::Client::builder()
            .cookie_store(true)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: format!("http://{modem_ip}/goform/"),
        })
    }

    fn check_status(url: String, resp: reqwest::blocking::Response) -> Result<String, RouterError> {
        if !resp.status().is_success() {
            return Err(RouterError::HttpStatus {
                status: resp.status().as_u16(),
                url,
            });
        }
        Ok(resp.text()?)
    }
}

impl RouterTransport for HttpTransport {
    fn get_cmd(&self, query: &str) -> Result<String, RouterError> {
        let url = format!("{}goform_get_cmd_process?{}", self.base_url, query);
        debug!(%url, "goform get");
        let resp = self.client.get(&url).send()?;
        Self::check_status(url, resp)
    }

    fn set_cmd(&self, form: &[(&str, &str)]) -> Result<String, RouterError> {
        let url = format!("{}goform_set_cmd_process", self.base_url);
        debug!(%url, "goform set");
        let resp = self.client.post(&url).form(form).send()?;
        Self::check_status(url, resp)
    }
}

/// Current unix time in milliseconds, used as the firmware's `_` cache-buster
/// query parameter. Not security-relevant.
pub(crate) fn unix_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
