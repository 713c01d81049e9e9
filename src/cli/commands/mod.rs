mod create_user;
mod init_config;

pub use create_user::cmd_create_user;
pub use init_config::cmd_init_config;
