//! Drag-completion events.
//!
//! These types describe what a drag-and-drop front end reports once a gesture
//! ends. A missing destination means the drag was cancelled or dropped outside
//! any target, which is different from dropping an item back where it was.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use taskboard_core::BoardError;
use uuid::Uuid;

use crate::list::ListId;

/// Droppable id used by the board itself when lists are being reordered.
pub const BOARD_CONTAINER_ID: &str = "all-tasks";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragKind {
    /// A whole list dragged along the board
    List,
    /// A card dragged within or between lists
    Card,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ContainerId {
    Board,
    List(ListId),
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerId::Board => f.write_str(BOARD_CONTAINER_ID),
            ContainerId::List(id) => write!(f, "{}", id),
        }
    }
}

impl FromStr for ContainerId {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == BOARD_CONTAINER_ID || s.eq_ignore_ascii_case("board") {
            return Ok(ContainerId::Board);
        }
        Uuid::parse_str(s)
            .map(ContainerId::List)
            .map_err(|_| BoardError::Validation(format!("Invalid container id: {}", s)))
    }
}

impl TryFrom<String> for ContainerId {
    type Error = BoardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ContainerId> for String {
    fn from(value: ContainerId) -> Self {
        value.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropLocation {
    pub container_id: ContainerId,
    pub index: usize,
}

impl DropLocation {
    pub fn new(container_id: ContainerId, index: usize) -> Self {
        Self {
            container_id,
            index,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragResult {
    pub dragged_id: String,
    pub kind: DragKind,
    pub source: DropLocation,
    #[serde(default)]
    pub destination: Option<DropLocation>,
}

impl DragResult {
    pub fn list_move(list_id: ListId, from: usize, to: usize) -> Self {
        Self {
            dragged_id: list_id.to_string(),
            kind: DragKind::List,
            source: DropLocation::new(ContainerId::Board, from),
            destination: Some(DropLocation::new(ContainerId::Board, to)),
        }
    }

    pub fn card_move(
        dragged_id: impl Into<String>,
        source_list: ListId,
        from: usize,
        destination_list: ListId,
        to: usize,
    ) -> Self {
        Self {
            dragged_id: dragged_id.into(),
            kind: DragKind::Card,
            source: DropLocation::new(ContainerId::List(source_list), from),
            destination: Some(DropLocation::new(ContainerId::List(destination_list), to)),
        }
    }

    pub fn cancelled(dragged_id: impl Into<String>, kind: DragKind, source: DropLocation) -> Self {
        Self {
            dragged_id: dragged_id.into(),
            kind,
            source,
            destination: None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.destination.is_none()
    }
}
