//! Point-in-time capture of the board.
//!
//! `BoardSnapshot` is what gets serialized into the `data` section of the
//! persisted document, and what the store hands out to readers.

use crate::{Card, CardId, ListId, TaskList};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    /// Lists in display order
    #[serde(default)]
    pub lists: Vec<TaskList>,
}

impl BoardSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_lists(lists: Vec<TaskList>) -> Self {
        Self { lists }
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    pub fn card_count(&self) -> usize {
        self.lists.iter().map(|l| l.cards.len()).sum()
    }

    pub fn find_list(&self, id: ListId) -> Option<&TaskList> {
        self.lists.iter().find(|l| l.id == id)
    }

    /// Locate a card, returning the list it lives in and its index there.
    pub fn find_card(&self, id: CardId) -> Option<(&TaskList, usize, &Card)> {
        self.lists.iter().find_map(|list| {
            list.card_index(id)
                .map(|index| (list, index, &list.cards[index]))
        })
    }
}
