use super::envelope::Envelope;
use super::error::ApiError;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Base URL and auth token shared by every request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    base_url: String,
    token: Option<String>,
}

impl Session {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Session {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.map(|t| t.trim().to_string()).filter(|t| !t.is_empty()),
        }
    }

    /// Build a session from a direct token, falling back to a token file.
    pub fn resolve(
        base_url: &str,
        token: Option<&str>,
        token_file: Option<&Path>,
    ) -> std::io::Result<Self> {
        let session = Session::new(base_url, token.map(str::to_string));
        if session.token.is_some() {
            return Ok(session);
        }
        match token_file {
            Some(path) => {
                let token = fs::read_to_string(path)?;
                log::debug!("Read API token from {}", path.display());
                Ok(Session::new(base_url, Some(token)))
            }
            None => Ok(session),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Absolute URL for an endpoint path
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Value for the `Authorization` header
    pub fn authorization(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Token {}", t))
    }
}

pub struct ApiClient {
    session: Session,
    agent: ureq::Agent,
}

impl ApiClient {
    pub fn new(session: Session, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        ApiClient { session, agent }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// GET an endpoint and unwrap its response envelope
    pub fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let auth = self.session.authorization().ok_or(ApiError::MissingToken)?;
        let url = self.session.url(path);
        log::info!("Fetching {}", url);

        let result = self
            .agent
            .get(&url)
            .set("Authorization", &auth)
            .set("Accept", "application/json")
            .call();

        match result {
            Ok(response) => {
                let envelope: Envelope<T> = response
                    .into_json()
                    .map_err(|e| ApiError::Decode(e.to_string()))?;
                envelope.into_result()
            }
            Err(ureq::Error::Status(code, response)) => {
                let body = response.into_string().unwrap_or_default();
                Err(status_error(code, body))
            }
            Err(ureq::Error::Transport(transport)) => Err(ApiError::Transport(transport.to_string())),
        }
    }
}

fn status_error(code: u16, body: String) -> ApiError {
    match code {
        401 => ApiError::Unauthorized,
        403 => ApiError::Forbidden,
        _ => match serde_json::from_str::<Envelope<serde_json::Value>>(&body) {
            Ok(Envelope {
                success: false,
                message: Some(message),
                ..
            }) if !message.trim().is_empty() => ApiError::Rejected { message },
            _ => ApiError::Status { code, body },
        },
    }
}
