use super::{Command, CommandContext};
use crate::{Card, CardUpdate};
use taskboard_core::{BoardError, BoardResult};
use uuid::Uuid;

/// Append a card to the end of a list
pub struct AddCard {
    pub list_id: Uuid,
    pub text: String,
}

impl Command for AddCard {
    fn execute(&self, context: &mut CommandContext) -> BoardResult<()> {
        if self.text.trim().is_empty() {
            return Err(BoardError::Validation("Card text cannot be empty".into()));
        }
        context
            .list_mut(self.list_id)?
            .push_card(Card::new(self.text.clone()));
        Ok(())
    }

    fn description(&self) -> String {
        format!("Add card '{}' to list {}", self.text, self.list_id)
    }
}

/// Remove the card currently at `index` in a list
pub struct RemoveCard {
    pub list_id: Uuid,
    pub index: usize,
}

impl Command for RemoveCard {
    fn execute(&self, context: &mut CommandContext) -> BoardResult<()> {
        let list = context.list_mut(self.list_id)?;
        let len = list.cards.len();
        list.remove_card_at(self.index).ok_or_else(|| {
            BoardError::NotFound(format!(
                "Card at index {} in list {} ({} cards)",
                self.index, self.list_id, len
            ))
        })?;
        Ok(())
    }

    fn description(&self) -> String {
        format!("Remove card {} from list {}", self.index, self.list_id)
    }
}

/// Remove a card by its stable id, wherever it lives
pub struct RemoveCardById {
    pub card_id: Uuid,
}

impl Command for RemoveCardById {
    fn execute(&self, context: &mut CommandContext) -> BoardResult<()> {
        for list in context.lists.iter_mut() {
            if let Some(index) = list.card_index(self.card_id) {
                list.remove_card_at(index);
                return Ok(());
            }
        }
        Err(BoardError::NotFound(format!("Card {}", self.card_id)))
    }

    fn description(&self) -> String {
        format!("Remove card {}", self.card_id)
    }
}

/// Move a card within a list or across lists
pub struct MoveCard {
    pub source_list_id: Uuid,
    pub from: usize,
    pub destination_list_id: Uuid,
    pub to: usize,
}

impl Command for MoveCard {
    fn execute(&self, context: &mut CommandContext) -> BoardResult<()> {
        *context.lists = crate::reorder::reorder_cards(
            context.lists.as_slice(),
            self.source_list_id,
            self.from,
            self.destination_list_id,
            self.to,
        )?;
        Ok(())
    }

    fn description(&self) -> String {
        format!(
            "Move card {}[{}] -> {}[{}]",
            self.source_list_id, self.from, self.destination_list_id, self.to
        )
    }
}

/// Write edited card fields back to the board
pub struct UpdateCard {
    pub card_id: Uuid,
    pub updates: CardUpdate,
}

impl Command for UpdateCard {
    fn execute(&self, context: &mut CommandContext) -> BoardResult<()> {
        let list = context
            .lists
            .iter_mut()
            .find(|l| l.card_index(self.card_id).is_some())
            .ok_or_else(|| BoardError::NotFound(format!("Card {}", self.card_id)))?;
        if let Some(card) = list.cards.iter_mut().find(|c| c.id == self.card_id) {
            card.update(self.updates.clone());
        }
        list.touch();
        Ok(())
    }

    fn description(&self) -> String {
        "Update card".to_string()
    }
}

/// Apply a drag-completion event. Cancelled drags do nothing.
pub struct ApplyDrag {
    pub drag: crate::DragResult,
}

impl Command for ApplyDrag {
    fn execute(&self, context: &mut CommandContext) -> BoardResult<()> {
        if let Some(next) = crate::reorder::apply_drag(context.lists.as_slice(), &self.drag)? {
            *context.lists = next;
        }
        Ok(())
    }

    fn description(&self) -> String {
        format!("Apply {:?} drag of {}", self.drag.kind, self.drag.dragged_id)
    }
}
