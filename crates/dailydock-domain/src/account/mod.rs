use std::fmt;

use crate::shared::DomainError;

/// Number of leading characters kept when a credential is rendered for logs
const VISIBLE_PREFIX: usize = 6;

/// Cookie key that a complete GLaDOS session credential carries
const SESSION_COOKIE_KEY: &str = "koa:sess";

/// Opaque session credential (the raw cookie header of one account).
///
/// `Debug` and `Display` only ever show a masked prefix; the full value is
/// available through [`Credential::expose`] for building requests.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(raw: impl Into<String>) -> Result<Self, DomainError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidCredentials(
                "credential cannot be empty".to_string(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Raw value, for the cookie header only
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn masked(&self) -> String {
        let prefix: String = self.0.chars().take(VISIBLE_PREFIX).collect();
        format!("{}***", prefix)
    }

    /// Whether the session cookie the service expects is present
    pub fn has_session_cookie(&self) -> bool {
        self.0.contains(SESSION_COOKIE_KEY)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Credential").field(&self.masked()).finish()
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.masked())
    }
}

/// Split a delimiter-joined credential list, dropping blank entries
pub fn parse_credential_list(raw: &str, delimiter: char) -> Vec<Credential> {
    raw.split(delimiter)
        .filter_map(|part| Credential::new(part).ok())
        .collect()
}
