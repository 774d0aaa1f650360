pub mod auth;
pub mod metadata;
pub mod navigation;
pub mod new_version;
pub mod submission;

// Re-export main types for convenience
pub use auth::{AuthOutcome, sign_in};
pub use metadata::{
    finish, open_prepare_submission, save_changes, select_build, submit_for_review,
    type_promotional_text, type_release_notes,
};
pub use navigation::{TeamSwitch, open_app, open_apps, select_team};
pub use new_version::create_version;
pub use submission::{SubmissionState, submission_state};
