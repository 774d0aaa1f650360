use crate::config::SettlePoint;
use crate::contract;
use crate::ui::Ui;
use crate::{Error, Result};

/// Result of selecting a team in the account menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamSwitch {
    /// The team was already active; the menu was closed again
    AlreadyActive,
    /// The team was selected and the console reloaded
    Switched,
}

/// Go from the home page to the app list
pub async fn open_apps(ui: Ui<'_>) -> Result<()> {
    tracing::debug!("Opening My Apps");

    let my_apps = contract::my_apps();
    ui.wait_for(&my_apps).await?;
    ui.settle(SettlePoint::AppsMenu).await;
    ui.click(&my_apps).await?;
    ui.wait_for_navigation().await?;
    ui.wait_for(&contract::apps_search()).await
}

/// Make `team` the active team, switching only when it is not already active
pub async fn select_team(ui: Ui<'_>, team: &str) -> Result<TeamSwitch> {
    tracing::debug!("Selecting team {}", team);

    open_user_menu(ui).await?;

    let label = contract::team_label(team);
    let input_id = ui
        .attribute(&label, "for")
        .await?
        .ok_or_else(|| Error::ElementNotFound(format!("{} [for]", label)))?;

    let input = contract::element_by_id(&input_id);
    if !ui.exists(&input).await? {
        return Err(Error::ElementNotFound(format!(
            "select team input {}",
            input
        )));
    }

    let is_checked = ui.driver().attribute(&input, "checked").await?.is_some();
    if is_checked {
        tracing::info!("Team '{}' is already active", team);
        close_user_menu(ui).await?;
        return Ok(TeamSwitch::AlreadyActive);
    }

    ui.click(&label).await?;
    ui.wait_for_navigation().await?;
    tracing::info!("Switched to team '{}'", team);

    Ok(TeamSwitch::Switched)
}

async fn open_user_menu(ui: Ui<'_>) -> Result<()> {
    let avatar = contract::user_avatar();
    ui.wait_for(&avatar).await?;
    ui.settle(SettlePoint::UserMenu).await;
    ui.click(&avatar).await?;
    ui.wait_for(&contract::user_menu_open()).await
}

async fn close_user_menu(ui: Ui<'_>) -> Result<()> {
    ui.click(&contract::user_avatar()).await?;
    ui.wait_for(&contract::user_menu_closed()).await
}

/// Open the application with the given Apple ID from the app list
pub async fn open_app(ui: Ui<'_>, apple_id: &str) -> Result<()> {
    tracing::debug!("Opening app {}", apple_id);

    ui.click(&contract::app_link(apple_id)).await?;
    ui.wait_for(&contract::app_header()).await
}
