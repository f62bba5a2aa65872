pub mod profile;
pub mod registration;
pub mod store;

pub use profile::UserProfile;
pub use registration::{AccountError, AccountManager};
pub use store::{UserRecord, UserStore};
