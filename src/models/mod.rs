pub mod progress;
pub mod user;

pub use progress::ProgressRecord;
pub use user::{User, UserId};
