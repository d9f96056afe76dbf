use super::{Command, CommandContext};
use crate::TaskList;
use taskboard_core::{BoardError, BoardResult};
use uuid::Uuid;

/// Append a new list, optionally seeded with cards
pub struct CreateList {
    pub name: String,
    pub cards: Vec<String>,
}

impl Command for CreateList {
    fn execute(&self, context: &mut CommandContext) -> BoardResult<()> {
        if self.name.trim().is_empty() {
            return Err(BoardError::Validation("List name cannot be empty".into()));
        }
        let list = TaskList::with_cards(self.name.clone(), self.cards.iter().cloned());
        context.lists.push(list);
        Ok(())
    }

    fn description(&self) -> String {
        format!("Create list: '{}'", self.name)
    }
}

/// Rename a list. Any name is accepted, including an empty one.
pub struct RenameList {
    pub list_id: Uuid,
    pub name: String,
}

impl Command for RenameList {
    fn execute(&self, context: &mut CommandContext) -> BoardResult<()> {
        context.list_mut(self.list_id)?.rename(self.name.clone());
        Ok(())
    }

    fn description(&self) -> String {
        format!("Rename list {} to '{}'", self.list_id, self.name)
    }
}

pub struct DeleteList {
    pub list_id: Uuid,
}

impl Command for DeleteList {
    fn execute(&self, context: &mut CommandContext) -> BoardResult<()> {
        let before = context.lists.len();
        context.lists.retain(|l| l.id != self.list_id);
        if context.lists.len() == before {
            return Err(BoardError::NotFound(format!("List {}", self.list_id)));
        }
        Ok(())
    }

    fn description(&self) -> String {
        format!("Delete list {}", self.list_id)
    }
}

pub struct ReorderLists {
    pub from: usize,
    pub to: usize,
}

impl Command for ReorderLists {
    fn execute(&self, context: &mut CommandContext) -> BoardResult<()> {
        *context.lists = crate::reorder::reorder_lists(context.lists.as_slice(), self.from, self.to)?;
        Ok(())
    }

    fn description(&self) -> String {
        format!("Move list {} -> {}", self.from, self.to)
    }
}
