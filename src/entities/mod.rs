pub mod prelude;

pub mod progress;
pub mod progress_history;
pub mod users;
