//! Card detail editor.
//!
//! A `CardEditor` holds a detached draft of one card. Nothing reaches the
//! board until [`CardEditor::save`] produces a [`CardUpdate`] that the caller
//! commits; dropping the editor discards every edit.

use chrono::{DateTime, Utc};
use taskboard_core::{BoardResult, Editable, UserRef};

use crate::checklist::ChecklistItemId;
use crate::session::Session;
use crate::{Attachment, Card, CardId, CardPriority, CardUpdate, Checklist, Comment, Reminder};

#[derive(Debug, Clone, PartialEq)]
pub struct CardDraft {
    pub text: String,
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

impl Editable<Card> for CardDraft {
    fn from_entity(card: &Card) -> Self {
        let d = &card.details;
        Self {
            text: card.text.clone(),
            description: d.description.clone(),
            start_date: d.start_date,
            end_date: d.end_date,
            priority: d.priority,
            reminder: d.reminder,
            assigned_by: d.assigned_by.clone(),
            assignees: d.assignees.clone(),
            attachments: d.attachments.clone(),
            checklist: d.checklist.clone(),
            comments: d.comments.clone(),
            archived: d.archived,
        }
    }

    fn apply_to(self, card: &mut Card) {
        card.update(self.into());
    }
}

impl From<CardDraft> for CardUpdate {
    fn from(draft: CardDraft) -> Self {
        Self {
            text: Some(draft.text),
            description: draft.description.into(),
            start_date: draft.start_date.into(),
            end_date: draft.end_date.into(),
            priority: Some(draft.priority),
            reminder: Some(draft.reminder),
            assigned_by: Some(draft.assigned_by),
            assignees: Some(draft.assignees),
            attachments: Some(draft.attachments),
            checklist: Some(draft.checklist),
            comments: Some(draft.comments),
            archived: Some(draft.archived),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CardEditor {
    card_id: CardId,
    original: CardDraft,
    draft: CardDraft,
}

impl CardEditor {
    /// Start editing `card`. All fields are taken from the card as it is now.
    pub fn open(card: &Card) -> Self {
        let draft = CardDraft::from_entity(card);
        Self {
            card_id: card.id,
            original: draft.clone(),
            draft,
        }
    }

    pub fn card_id(&self) -> CardId {
        self.card_id
    }

    pub fn draft(&self) -> &CardDraft {
        &self.draft
    }

    pub fn is_dirty(&self) -> bool {
        self.draft != self.original
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.draft.text = text.into();
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.draft.description = description;
    }

    pub fn set_start_date(&mut self, date: Option<DateTime<Utc>>) {
        self.draft.start_date = date;
    }

    pub fn set_end_date(&mut self, date: Option<DateTime<Utc>>) {
        self.draft.end_date = date;
    }

    pub fn set_priority(&mut self, priority: CardPriority) {
        self.draft.priority = priority;
    }

    pub fn set_reminder(&mut self, reminder: Reminder) {
        self.draft.reminder = reminder;
    }

    pub fn set_assigned_by(&mut self, assigned_by: impl Into<String>) {
        self.draft.assigned_by = assigned_by.into();
    }

    /// Returns whether the user is assigned after the toggle.
    pub fn toggle_assignee(&mut self, user: UserRef) -> bool {
        if let Some(pos) = self.draft.assignees.iter().position(|u| u.id == user.id) {
            self.draft.assignees.remove(pos);
            false
        } else {
            self.draft.assignees.push(user);
            true
        }
    }

    /// Replace the attachment set with a new file selection.
    pub fn set_attachments(&mut self, attachments: Vec<Attachment>) {
        self.draft.attachments = attachments;
    }

    pub fn add_checklist_item(&mut self, text: &str) -> BoardResult<ChecklistItemId> {
        self.draft.checklist.add(text).map(|item| item.id)
    }

    pub fn toggle_checklist_item(&mut self, id: ChecklistItemId) -> BoardResult<bool> {
        self.draft.checklist.toggle(id)
    }

    pub fn remove_checklist_item(&mut self, id: ChecklistItemId) -> BoardResult<()> {
        self.draft.checklist.remove(id).map(|_| ())
    }

    pub fn toggle_hide_completed(&mut self) -> bool {
        self.draft.checklist.toggle_hide_completed()
    }

    pub fn add_comment(
        &mut self,
        session: &Session,
        text: &str,
        date_format: &str,
    ) -> BoardResult<&Comment> {
        let comment = Comment::new(session.username(), text, date_format)?;
        self.draft.comments.push(comment);
        Ok(&self.draft.comments[self.draft.comments.len() - 1])
    }

    pub fn toggle_archived(&mut self) -> bool {
        self.draft.archived = !self.draft.archived;
        self.draft.archived
    }

    /// Finish editing and produce the update to commit.
    pub fn save(self) -> (CardId, CardUpdate) {
        (self.card_id, self.draft.into())
    }

    /// Write the draft straight into a card value.
    pub fn apply(self, card: &mut Card) {
        debug_assert_eq!(card.id, self.card_id);
        self.draft.apply_to(card);
    }

    pub fn discard(self) {}
}
