// Stores layer - sea-orm data access for the local backend
pub mod account_store;
pub mod role_store;
pub mod session_store;
pub mod submission_store;

pub use account_store::AccountStore;
pub use role_store::RoleStore;
pub use session_store::SessionStore;
pub use submission_store::SubmissionStore;
