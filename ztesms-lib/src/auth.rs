//! Challenge-response login against the router's web interface.

use crate::codec::{self, PasswordEncoding};
use crate::error::RouterError;
use crate::transport::{RouterTransport, unix_millis};
use serde::Deserialize;
use tracing::{info, warn};

#[derive(Deserialize)]
struct ChallengeResponse {
    #[serde(rename = "LD", default)]
    ld: String,
}

#[derive(Deserialize)]
struct LoginResponse {
    #[serde(default)]
    result: String,
}

/// Orchestrates challenge retrieval and login over an injected transport.
///
/// A successful [`login`](Self::login) leaves the session cookie in the
/// transport's cookie jar; there is no explicit logout.
pub struct AuthSession<'a, T: RouterTransport + ?Sized> {
    transport: &'a T,
}

impl<'a, T: RouterTransport + ?Sized> AuthSession<'a, T> {
    pub fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    /// Fetches a fresh LD challenge. Valid for one login attempt.
    pub fn fetch_challenge(&self) -> Result<String, RouterError> {
        let query = format!("isTest=false&cmd=LD&_={}", unix_millis());
        let body = self.transport.get_cmd(&query).map_err(|err| {
            warn!(%err, "challenge fetch failed");
            RouterError::ChallengeUnavailable
        })?;
        let resp: ChallengeResponse =
            serde_json::from_str(&body).map_err(|_| RouterError::ChallengeUnavailable)?;
        if resp.ld.is_empty() {
            return Err(RouterError::ChallengeUnavailable);
        }
        info!("received login challenge");
        Ok(resp.ld)
    }

    /// Hashes `password` under `encoding` and submits the LOGIN form.
    ///
    /// Result mapping per the firmware contract: `"0"` is success, `"1"`
    /// means the account is locked after too many attempts, anything else is
    /// a generic failure (usually a wrong password).
    pub fn login(
        &self,
        password: &str,
        challenge: &str,
        encoding: PasswordEncoding,
    ) -> Result<(), RouterError> {
        let hash = codec::password_hash(password, challenge, encoding);
        let body = self.transport.set_cmd(&[
            ("isTest", "false"),
            ("goformId", "LOGIN"),
            ("password", &hash),
        ])?;
        let resp: LoginResponse = serde_json::from_str(&body)?;
        match resp.result.as_str() {
            "0" => {
                info!("login accepted");
                Ok(())
            }
            "1" => Err(RouterError::AccountLocked),
            other => Err(RouterError::LoginFailed {
                result: other.to_string(),
            }),
        }
    }
}
