use chrono::{DateTime, Utc};
use taskboard_core::{BoardError, BoardResult, Credentials};

/// An authenticated user session.
///
/// Obtained only through [`Session::login`] and passed explicitly to the
/// operations that need to know who is acting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    username: String,
    started_at: DateTime<Utc>,
}

impl Session {
    pub fn login(username: &str, password: &str, credentials: &Credentials) -> BoardResult<Self> {
        if username != credentials.username || password != credentials.password {
            return Err(BoardError::Unauthorized("Invalid credentials".into()));
        }
        Ok(Self {
            username: username.to_string(),
            started_at: Utc::now(),
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// End the session. Consumes it so it cannot be reused.
    pub fn logout(self) -> String {
        self.username
    }
}
