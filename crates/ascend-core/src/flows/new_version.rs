use crate::config::SettlePoint;
use crate::contract;
use crate::platform::Platform;
use crate::ui::Ui;
use crate::version::PublishedVersion;
use crate::{Error, Result};

/// Create the next version record for `platform`, returning the version typed
///
/// The next version is computed before the version picker is touched, so a
/// malformed published version leaves the console untouched.
pub async fn create_version(ui: Ui<'_>, platform: Platform) -> Result<String> {
    tracing::debug!("Creating new {} version", platform);

    let current = current_version(ui, platform).await?;
    let next = current.next_minor()?;
    tracing::info!("Current version {}, creating {}", current.as_str(), next);

    ui.click(&contract::new_version_link()).await?;
    ui.wait_for(&contract::version_popup_open()).await?;

    let option = contract::version_option(platform);
    ui.wait_for(&option).await.map_err(|e| match e {
        Error::ElementNotFound(_) => Error::MissingOption(platform.to_string()),
        other => other,
    })?;
    ui.click(&option).await?;
    ui.wait_for(&contract::modal_open()).await?;

    ui.driver().type_text(&next).await?;
    ui.click(&contract::modal_primary_button()).await?;
    ui.wait_for(&contract::status_waiting()).await?;

    Ok(next)
}

async fn current_version(ui: Ui<'_>, platform: Platform) -> Result<PublishedVersion> {
    open_ready_for_sale(ui, platform).await?;

    ui.settle(SettlePoint::VersionHeader).await;
    let header = ui.text(&contract::version_header()).await?;

    PublishedVersion::from_header(&header)
}

async fn open_ready_for_sale(ui: Ui<'_>, platform: Platform) -> Result<()> {
    let route = platform.ready_for_sale_route()?;
    let link = contract::ready_for_sale_link(route);

    ui.wait_for(&link).await?;
    ui.settle(SettlePoint::ReadyForSale).await;
    ui.click(&link).await?;
    ui.wait_for_navigation().await
}
