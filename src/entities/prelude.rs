pub use super::progress::Entity as Progress;
pub use super::progress_history::Entity as ProgressHistory;
pub use super::users::Entity as Users;
