use taskboard_core::BoardResult;

pub mod card_commands;
pub mod list_commands;

pub use card_commands::*;
pub use list_commands::*;

/// Trait for domain commands that mutate board state
pub trait Command: Send + Sync {
    /// Execute this command against the board. A command that returns an
    /// error leaves the board unchanged.
    fn execute(&self, context: &mut CommandContext) -> BoardResult<()>;

    /// Human-readable description of what this command does
    fn description(&self) -> String;
}

/// Mutable view of the board handed to commands
pub struct CommandContext<'a> {
    pub lists: &'a mut Vec<crate::TaskList>,
}

impl CommandContext<'_> {
    pub(crate) fn list_mut(&mut self, id: uuid::Uuid) -> BoardResult<&mut crate::TaskList> {
        self.lists
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| taskboard_core::BoardError::NotFound(format!("List {}", id)))
    }
}
