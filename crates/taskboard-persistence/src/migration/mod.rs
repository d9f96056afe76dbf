pub mod migrator;

pub use migrator::{LegacyList, Migrator};
