pub mod card;
pub mod checklist;
pub mod comment;
pub mod commands;
pub mod drag;
pub mod editor;
pub mod field_update;
pub mod list;
pub mod reorder;
pub mod session;
pub mod snapshot;

pub use card::{Attachment, Card, CardDetails, CardId, CardPriority, CardUpdate, Reminder};
pub use checklist::{Checklist, ChecklistItem, ChecklistItemId};
pub use comment::{Comment, CommentId};
pub use drag::{ContainerId, DragKind, DragResult, DropLocation, BOARD_CONTAINER_ID};
pub use editor::{CardDraft, CardEditor};
pub use field_update::FieldUpdate;
pub use list::{ListId, TaskList};
pub use session::Session;
pub use snapshot::BoardSnapshot;
pub use taskboard_core::UserRef;
