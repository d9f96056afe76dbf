pub mod card;
pub mod details;
pub mod drag;
pub mod list;
