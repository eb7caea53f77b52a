// Database entities - SeaORM models
pub mod account;
pub mod session;
pub mod submission;
pub mod user_role;
