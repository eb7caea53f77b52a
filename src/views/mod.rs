// Headless view-models for the form and dashboard screens
pub mod admin_dashboard;
pub mod notification;
pub mod submission_card;
pub mod submission_detail;
pub mod submission_form;

pub use admin_dashboard::{AdminDashboard, EmptyState};
pub use notification::{Notification, NotificationVariant};
pub use submission_card::SubmissionCard;
pub use submission_detail::{SubmissionDetail, NO_LOCATION};
pub use submission_form::{FormStatus, SubmissionForm};
