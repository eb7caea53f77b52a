// Coordinators layer - Workflow orchestration
//
// Coordinators sequence backend calls for one use case each. Validation and
// formatting live in services and views.
pub mod setup_admin_coordinator;
pub mod submission_coordinator;

pub use setup_admin_coordinator::{SetupAdminCoordinator, SetupAdminOutcome};
pub use submission_coordinator::SubmissionCoordinator;
