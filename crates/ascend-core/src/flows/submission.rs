use crate::config::SettlePoint;
use crate::contract;
use crate::platform::Platform;
use crate::ui::Ui;
use crate::Result;

/// Whether the app has a version record in progress for a platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    NoActiveSubmission,
    ActiveSubmission,
}

/// Inspect the app page for a "Prepare for Submission" entry
///
/// Read-only: nothing is clicked, so calling it repeatedly is safe.
pub async fn submission_state(ui: Ui<'_>, platform: Platform) -> Result<SubmissionState> {
    ui.settle(SettlePoint::SubmissionState).await;

    let prepare = contract::prepare_for_submission(platform);
    let state = if ui.exists(&prepare).await? {
        SubmissionState::ActiveSubmission
    } else {
        SubmissionState::NoActiveSubmission
    };

    tracing::info!("{} submission state: {:?}", platform, state);
    Ok(state)
}
