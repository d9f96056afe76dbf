use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use taskboard_core::{BoardError, UserRef};
use uuid::Uuid;

use crate::{Checklist, Comment, FieldUpdate};

pub type CardId = Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardPriority {
    Low,
    #[default]
    Normal,
    High,
}

impl FromStr for CardPriority {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "normal" => Ok(Self::Normal),
            "high" => Ok(Self::High),
            other => Err(BoardError::Validation(format!(
                "Unknown priority '{}', expected low, normal or high",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reminder {
    #[default]
    #[serde(rename = "None")]
    None,
    #[serde(rename = "1 Hour Before")]
    OneHourBefore,
    #[serde(rename = "1 Day Before")]
    OneDayBefore,
}

impl Reminder {
    pub fn label(self) -> &'static str {
        match self {
            Reminder::None => "None",
            Reminder::OneHourBefore => "1 Hour Before",
            Reminder::OneDayBefore => "1 Day Before",
        }
    }

    /// When the reminder should fire for a card due at `due`.
    pub fn fire_at(self, due: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Reminder::None => None,
            Reminder::OneHourBefore => Some(due - chrono::Duration::hours(1)),
            Reminder::OneDayBefore => Some(due - chrono::Duration::days(1)),
        }
    }
}

impl fmt::Display for Reminder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Reminder {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect();
        match normalized.as_str() {
            "none" => Ok(Self::None),
            "1hourbefore" | "onehourbefore" | "hour" => Ok(Self::OneHourBefore),
            "1daybefore" | "onedaybefore" | "day" => Ok(Self::OneDayBefore),
            _ => Err(BoardError::Validation(format!(
                "Unknown reminder '{}', expected none, '1 Hour Before' or '1 Day Before'",
                s
            ))),
        }
    }
}

/// A file reference attached to a card. Contents are never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub name: String,
    #[serde(default)]
    pub size_bytes: Option<u64>,
    #[serde(default)]
    pub media_type: Option<String>,
}

impl Attachment {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size_bytes: None,
            media_type: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardDetails {
    pub description: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub priority: CardPriority,
    pub reminder: Reminder,
    pub assigned_by: String,
    pub assignees: Vec<UserRef>,
    pub attachments: Vec<Attachment>,
    pub checklist: Checklist,
    pub comments: Vec<Comment>,
    pub archived: bool,
}

impl Default for CardDetails {
    fn default() -> Self {
        Self {
            description: None,
            start_date: None,
            end_date: None,
            priority: CardPriority::Normal,
            reminder: Reminder::None,
            assigned_by: "Manager".to_string(),
            assignees: Vec::new(),
            attachments: Vec::new(),
            checklist: Checklist::default(),
            comments: Vec::new(),
            archived: false,
        }
    }
}

impl CardDetails {
    /// Add the user if absent, remove it if present. Returns whether the user
    /// is assigned afterwards.
    pub fn toggle_assignee(&mut self, user: UserRef) -> bool {
        if let Some(pos) = self.assignees.iter().position(|u| u.id == user.id) {
            self.assignees.remove(pos);
            false
        } else {
            self.assignees.push(user);
            true
        }
    }

    pub fn is_assigned(&self, user_id: &str) -> bool {
        self.assignees.iter().any(|u| u.id == user_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub text: String,
    #[serde(default)]
    pub details: CardDetails,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

/// Partial update for a card. Fields left at their default are untouched.
#[derive(Debug, Clone, Default)]
pub struct CardUpdate {
    pub text: Option<String>,
    pub description: FieldUpdate<String>,
    pub start_date: FieldUpdate<DateTime<Utc>>,
    pub end_date: FieldUpdate<DateTime<Utc>>,
    pub priority: Option<CardPriority>,
    pub reminder: Option<Reminder>,
    pub assigned_by: Option<String>,
    pub assignees: Option<Vec<UserRef>>,
    pub attachments: Option<Vec<Attachment>>,
    pub checklist: Option<Checklist>,
    pub comments: Option<Vec<Comment>>,
    pub archived: Option<bool>,
}

impl CardUpdate {
    pub fn is_empty(&self) -> bool {
        self.text.is_none()
            && !self.description.is_change()
            && !self.start_date.is_change()
            && !self.end_date.is_change()
            && self.priority.is_none()
            && self.reminder.is_none()
            && self.assigned_by.is_none()
            && self.assignees.is_none()
            && self.attachments.is_none()
            && self.checklist.is_none()
            && self.comments.is_none()
            && self.archived.is_none()
    }
}

impl Card {
    pub fn new(text: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            text,
            details: CardDetails::default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn update(&mut self, updates: CardUpdate) {
        if let Some(text) = updates.text {
            self.text = text;
        }
        updates.description.apply_to(&mut self.details.description);
        updates.start_date.apply_to(&mut self.details.start_date);
        updates.end_date.apply_to(&mut self.details.end_date);
        if let Some(priority) = updates.priority {
            self.details.priority = priority;
        }
        if let Some(reminder) = updates.reminder {
            self.details.reminder = reminder;
        }
        if let Some(assigned_by) = updates.assigned_by {
            self.details.assigned_by = assigned_by;
        }
        if let Some(assignees) = updates.assignees {
            self.details.assignees = assignees;
        }
        if let Some(attachments) = updates.attachments {
            self.details.attachments = attachments;
        }
        if let Some(checklist) = updates.checklist {
            self.details.checklist = checklist;
        }
        if let Some(comments) = updates.comments {
            self.details.comments = comments;
        }
        if let Some(archived) = updates.archived {
            self.details.archived = archived;
        }
        self.updated_at = Utc::now();
    }

    /// Next reminder time, based on the card's end date.
    pub fn reminder_at(&self) -> Option<DateTime<Utc>> {
        self.details
            .end_date
            .and_then(|due| self.details.reminder.fire_at(due))
    }
}
