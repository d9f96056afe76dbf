pub mod config;
pub mod error;
pub mod reorder;
pub mod result;
pub mod traits;
pub mod user;

pub use config::AppConfig;
pub use error::BoardError;
pub use result::BoardResult;
pub use traits::Editable;
pub use user::{Credentials, UserRef};
