pub mod auth_service;
pub use auth_service::{AuthError, Authenticator};

pub mod auth_service_impl;
pub use auth_service_impl::StoreAuthenticator;

pub mod clock;
pub use clock::{Clock, FixedClock, SystemClock};

pub mod sync_service;
pub use sync_service::{NewAccount, ProgressAck, ProgressUpdate, SyncError, SyncService};

pub mod sync_service_impl;
pub use sync_service_impl::SeaOrmSyncService;
