use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::card::{Card, CardId};

pub type ListId = Uuid;

/// A named, ordered column of cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskList {
    pub id: ListId,
    pub name: String,
    #[serde(default)]
    pub cards: Vec<Card>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl TaskList {
    pub fn new(name: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            cards: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_cards<I>(name: String, texts: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut list = Self::new(name);
        list.cards = texts.into_iter().map(Card::new).collect();
        list
    }

    pub fn rename(&mut self, name: String) {
        self.name = name;
        self.touch();
    }

    pub fn push_card(&mut self, card: Card) {
        self.cards.push(card);
        self.touch();
    }

    pub fn remove_card_at(&mut self, index: usize) -> Option<Card> {
        if index >= self.cards.len() {
            return None;
        }
        let card = self.cards.remove(index);
        self.touch();
        Some(card)
    }

    pub fn card_index(&self, card_id: CardId) -> Option<usize> {
        self.cards.iter().position(|c| c.id == card_id)
    }

    pub fn card_texts(&self) -> Vec<&str> {
        self.cards.iter().map(|c| c.text.as_str()).collect()
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_cards_preserves_order() {
        let list = TaskList::with_cards(
            "Groceries".to_string(),
            vec!["milk".to_string(), "eggs".to_string()],
        );
        assert_eq!(list.card_texts(), vec!["milk", "eggs"]);
        assert_ne!(list.cards[0].id, list.cards[1].id);
    }

    #[test]
    fn test_remove_card_shifts_later_cards() {
        let mut list = TaskList::with_cards(
            "L".to_string(),
            ["a", "b", "c", "d"].iter().map(|s| s.to_string()),
        );

        let removed = list.remove_card_at(1).unwrap();
        assert_eq!(removed.text, "b");
        assert_eq!(list.card_texts(), vec!["a", "c", "d"]);
        assert!(list.remove_card_at(3).is_none());
        assert_eq!(list.cards.len(), 3);
    }

    #[test]
    fn test_removing_only_card_leaves_empty_list() {
        let mut list = TaskList::with_cards("Solo".to_string(), vec!["one".to_string()]);
        list.remove_card_at(0).unwrap();
        assert!(list.cards.is_empty());
        assert_eq!(list.name, "Solo");
    }
}
