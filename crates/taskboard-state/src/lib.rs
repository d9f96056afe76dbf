pub mod board_store;

pub use board_store::BoardStore;
