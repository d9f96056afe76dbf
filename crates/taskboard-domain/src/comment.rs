use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Write};
use taskboard_core::{BoardError, BoardResult};
use uuid::Uuid;

pub type CommentId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub username: String,
    pub text: String,
    /// Display date, rendered once when the comment is written
    pub date: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Build a comment stamped with the current local date.
    pub fn new(username: &str, text: &str, date_format: &str) -> BoardResult<Self> {
        let now = Utc::now();
        let date = format_date(&now.with_timezone(&Local), date_format)?;
        Self::build(username, text, date, now)
    }

    pub fn at<Tz: TimeZone>(
        username: &str,
        text: &str,
        at: &DateTime<Tz>,
        date_format: &str,
    ) -> BoardResult<Self>
    where
        Tz::Offset: Display,
    {
        let date = format_date(at, date_format)?;
        Self::build(username, text, date, at.with_timezone(&Utc))
    }

    fn build(
        username: &str,
        text: &str,
        date: String,
        created_at: DateTime<Utc>,
    ) -> BoardResult<Self> {
        let text = text.trim();
        if text.is_empty() {
            return Err(BoardError::Validation("Comment cannot be empty".into()));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            username: username.to_string(),
            text: text.to_string(),
            date,
            created_at,
        })
    }
}

/// Render a date with a strftime-style pattern.
///
/// chrono reports malformed patterns through `fmt::Error`, which is turned into
/// a validation error here instead of a panic.
pub fn format_date<Tz: TimeZone>(at: &DateTime<Tz>, pattern: &str) -> BoardResult<String>
where
    Tz::Offset: Display,
{
    let mut out = String::new();
    write!(out, "{}", at.format(pattern))
        .map_err(|_| BoardError::Validation(format!("Invalid date format: {}", pattern)))?;
    Ok(out)
}
