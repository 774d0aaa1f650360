use crate::config::FinishAction;
use crate::contract;
use crate::platform::Platform;
use crate::ui::Ui;
use crate::{Error, Result};

/// Open the in-progress version record
pub async fn open_prepare_submission(ui: Ui<'_>, platform: Platform) -> Result<()> {
    tracing::debug!("Opening {} submission", platform);

    ui.click(&contract::prepare_for_submission(platform)).await?;
    ui.wait_for(&contract::status_waiting()).await
}

pub async fn type_release_notes(ui: Ui<'_>, text: &str) -> Result<()> {
    tracing::debug!("Typing release notes ({} chars)", text.chars().count());
    ui.replace(&contract::release_notes_field(), text).await
}

/// Replace the promotional text; an empty `text` clears the field
pub async fn type_promotional_text(ui: Ui<'_>, text: &str) -> Result<()> {
    tracing::debug!("Typing promotional text ({} chars)", text.chars().count());
    ui.replace(&contract::promotional_text_field(), text).await
}

/// Attach the build whose picker row contains `build`
///
/// A previously staged build is removed first since only one can be attached.
pub async fn select_build(ui: Ui<'_>, build: &str) -> Result<()> {
    tracing::debug!("Selecting build {}", build);

    let staged = contract::staged_build_delete();
    if ui.exists(&staged).await? {
        tracing::info!("Removing previously staged build");
        ui.driver().click(&staged).await?;
    }

    ui.click(&contract::add_build_button()).await?;
    ui.wait_for(&contract::build_modal()).await?;
    ui.wait_for(&contract::build_row(build)).await?;

    let checkbox = contract::build_row_checkbox(build);
    if !ui.exists(&checkbox).await? {
        return Err(Error::MissingBuildCheckbox(build.to_string()));
    }

    ui.driver().click(&checkbox).await?;
    ui.wait_for(&contract::build_checked()).await?;
    ui.click(&contract::modal_primary_button()).await
}

pub async fn save_changes(ui: Ui<'_>) -> Result<()> {
    tracing::debug!("Saving changes");
    ui.click(&contract::save_button()).await
}

pub async fn submit_for_review(ui: Ui<'_>) -> Result<()> {
    tracing::debug!("Submitting for review");
    ui.click(&contract::submit_for_review_button()).await
}

/// Save, and submit for review when asked to
pub async fn finish(ui: Ui<'_>, action: FinishAction) -> Result<()> {
    save_changes(ui).await?;

    if action == FinishAction::SubmitForReview {
        submit_for_review(ui).await?;
    }

    Ok(())
}
