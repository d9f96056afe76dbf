use serde::{Deserialize, Serialize};
use taskboard_core::{BoardError, BoardResult};
use uuid::Uuid;

pub type ChecklistItemId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: ChecklistItemId,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

impl ChecklistItem {
    pub fn new(text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            text,
            completed: false,
        }
    }
}

/// Ordered checklist attached to a card.
///
/// Completed items can be hidden from view but never removed; only items that
/// are still open can be deleted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checklist {
    #[serde(default)]
    pub items: Vec<ChecklistItem>,
    #[serde(default)]
    pub hide_completed: bool,
}

impl Checklist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, text: &str) -> BoardResult<&ChecklistItem> {
        let text = text.trim();
        if text.is_empty() {
            return Err(BoardError::Validation(
                "Checklist item text cannot be empty".into(),
            ));
        }
        self.items.push(ChecklistItem::new(text.to_string()));
        Ok(&self.items[self.items.len() - 1])
    }

    /// Flip an item's completion state, returning the new state.
    pub fn toggle(&mut self, id: ChecklistItemId) -> BoardResult<bool> {
        let item = self
            .items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| BoardError::NotFound(format!("Checklist item {}", id)))?;
        item.completed = !item.completed;
        Ok(item.completed)
    }

    pub fn remove(&mut self, id: ChecklistItemId) -> BoardResult<ChecklistItem> {
        let pos = self
            .items
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| BoardError::NotFound(format!("Checklist item {}", id)))?;
        if self.items[pos].completed {
            return Err(BoardError::Validation(
                "Completed checklist items cannot be removed".into(),
            ));
        }
        Ok(self.items.remove(pos))
    }

    pub fn toggle_hide_completed(&mut self) -> bool {
        self.hide_completed = !self.hide_completed;
        self.hide_completed
    }

    pub fn visible_items(&self) -> impl Iterator<Item = &ChecklistItem> {
        let hide = self.hide_completed;
        self.items.iter().filter(move |i| !(hide && i.completed))
    }

    /// `(completed, total)`
    pub fn progress(&self) -> (usize, usize) {
        let done = self.items.iter().filter(|i| i.completed).count();
        (done, self.items.len())
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
