use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::HeptaUrl;

const SESSION_COOKIE: &str = "session";
const CSRF_COOKIE: &str = "csrf_token";

/// Session credentials for the Hepta-Conexiones server.
///
/// The server authenticates with a session cookie and expects the CSRF token
/// both as a form field / JSON header (depending on the endpoint) and as the
/// `X-CSRFToken` header on every state-changing request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub session_id: String,
    pub csrf_token: String,
}

#[derive(Error, Debug)]
pub enum LoginError {
    #[error("CSRF token cookie not issued by the server")]
    MissingCsrfToken,
    #[error("Session cookie not issued by the server")]
    MissingSessionCookie,
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("LoginFailed: {0}")]
    Other(String),
}

impl Credentials {
    pub fn new(session_id: impl Into<String>, csrf_token: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            csrf_token: csrf_token.into(),
        }
    }

    /// Authenticate against the server with a username and password.
    ///
    /// The login page issues the CSRF cookie on GET; the POST must echo that
    /// token as a form field. On success the server sets the session cookie.
    pub async fn login(
        base_url: &str,
        username: &str,
        password: &str,
    ) -> Result<Credentials, LoginError> {
        let login_url = HeptaUrl::new(base_url).append_path("/auth/login");
        let client = Client::builder()
            .build()
            .map_err(|e| LoginError::Other(e.to_string()))?;

        let resp = client
            .get(login_url.as_ref())
            .send()
            .await
            .map_err(|e| LoginError::Other(e.to_string()))?;
        let csrf_token = resp
            .cookies()
            .find(|c| c.name() == CSRF_COOKIE)
            .map(|c| c.value().to_string())
            .ok_or(LoginError::MissingCsrfToken)?;

        let form = [
            ("username", username),
            ("password", password),
            ("csrf_token", csrf_token.as_str()),
        ];
        let resp = client
            .post(login_url.as_ref())
            .header("Cookie", format!("{}={}", CSRF_COOKIE, csrf_token))
            .header("X-CSRFToken", &csrf_token)
            .form(&form)
            .send()
            .await
            .map_err(|e| LoginError::Other(e.to_string()))?;

        if resp.status() == 401 || resp.status() == 403 {
            return Err(LoginError::InvalidCredentials);
        }

        let session_id = resp
            .cookies()
            .find(|c| c.name() == SESSION_COOKIE)
            .map(|c| c.value().to_string())
            .ok_or(LoginError::MissingSessionCookie)?;

        Ok(Credentials {
            session_id,
            csrf_token,
        })
    }

    pub fn as_cookie_header(&self) -> String {
        format!(
            "{}={}; {}={}",
            SESSION_COOKIE, self.session_id, CSRF_COOKIE, self.csrf_token
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_header_carries_session_and_csrf() {
        let creds = Credentials::new("abc123", "tok456");
        assert_eq!(
            creds.as_cookie_header(),
            "session=abc123; csrf_token=tok456"
        );
    }
}
