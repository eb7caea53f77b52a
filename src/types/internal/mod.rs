// Internal types not exposed through the API
pub mod auth;
pub mod submission;

pub use auth::{Account, AuthSession, Claims, RoleInsert, ADMIN_ROLE};
pub use submission::{
    AcceptedPhoto, Coordinates, NewSubmission, Submission, SubmissionDraft, ValidatedSubmission,
};
