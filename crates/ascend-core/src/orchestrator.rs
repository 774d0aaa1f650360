//! Top-level submission run
//!
//! Sequences the flows, then persists cookies and closes the browsing context
//! on every exit path: success, workflow error, or panic.

use crate::config::{FinishAction, ReleaseConfig};
use crate::contract;
use crate::cookies::CookieStore;
use crate::driver::Driver;
use crate::flows::{self, AuthOutcome, SubmissionState, TeamSwitch};
use crate::session::Session;
use crate::ui::Ui;
use crate::verification::VerificationCodeProvider;
use crate::{Error, Result};
use futures::FutureExt;
use std::panic::AssertUnwindSafe;

/// What a successful run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// `None` when a persisted session was still valid
    pub auth: Option<AuthOutcome>,
    pub team: Option<TeamSwitch>,
    /// Submission state found on the app page before any change
    pub state: SubmissionState,
    /// Version created when no submission was in progress
    pub created_version: Option<String>,
    pub finish: FinishAction,
    pub cookies_saved: usize,
}

pub struct Orchestrator<'a> {
    config: &'a ReleaseConfig,
    store: CookieStore,
}

impl<'a> Orchestrator<'a> {
    pub fn new(config: &'a ReleaseConfig) -> Self {
        Self {
            config,
            store: CookieStore::new(config.cookie_path.clone()),
        }
    }

    /// Run the workflow against an already opened browsing context
    ///
    /// The context is closed before this returns, whatever the outcome.
    pub async fn run(
        &self,
        driver: &dyn Driver,
        codes: &dyn VerificationCodeProvider,
    ) -> Result<RunReport> {
        let session = Session::new(driver, &self.store);

        let outcome = AssertUnwindSafe(self.drive(driver, &session, codes))
            .catch_unwind()
            .await;

        let saved = session.save_cookies().await;
        tracing::debug!("Closing browser");
        let closed = driver.close().await;

        let report = match outcome {
            Ok(result) => result,
            Err(panic) => std::panic::resume_unwind(panic),
        };

        match report {
            Ok(mut report) => {
                report.cookies_saved = saved?;
                closed?;
                Ok(report)
            }
            Err(e) => {
                if let Err(save_err) = saved {
                    tracing::warn!("Failed to save cookies after error: {}", save_err);
                }
                if let Err(close_err) = closed {
                    tracing::warn!("Failed to close browser after error: {}", close_err);
                }
                Err(e)
            }
        }
    }

    async fn drive(
        &self,
        driver: &dyn Driver,
        session: &Session<'_>,
        codes: &dyn VerificationCodeProvider,
    ) -> Result<RunReport> {
        let config = self.config;
        let ui = Ui::new(driver, &config.timings);

        let loaded = session.load_cookies().await?;
        tracing::debug!("Replayed {} cookies", loaded);

        tracing::info!("Opening {}", config.console_url);
        driver.navigate(&config.console_url).await?;

        let login = contract::auth_frame();
        let home = contract::home_page();
        ui.wait_for_any(&[&login, &home]).await?;

        let auth = if session.is_login_form().await? {
            let outcome = flows::sign_in(ui, &config.credentials, codes).await?;
            ui.wait_for_navigation().await?;
            ui.wait_for(&home).await?;
            tracing::info!("Signed in ({:?})", outcome);
            Some(outcome)
        } else {
            tracing::info!("Session still valid, skipping sign-in");
            None
        };

        if !session.is_home_page().await? {
            return Err(Error::ElementNotFound(contract::HOME_PAGE.to_string()));
        }

        flows::open_apps(ui).await?;

        let team = match &config.team {
            Some(team) => Some(flows::select_team(ui, team).await?),
            None => None,
        };

        flows::open_app(ui, &config.app_id).await?;

        let state = flows::submission_state(ui, config.platform).await?;
        let created_version = match state {
            SubmissionState::ActiveSubmission => None,
            SubmissionState::NoActiveSubmission => {
                Some(flows::create_version(ui, config.platform).await?)
            }
        };

        flows::open_prepare_submission(ui, config.platform).await?;
        flows::type_release_notes(ui, &config.release_notes).await?;
        flows::type_promotional_text(ui, &config.promotional_text).await?;
        flows::select_build(ui, &config.build_version).await?;
        flows::finish(ui, config.finish).await?;

        tracing::info!("Submission for app {} updated", config.app_id);

        Ok(RunReport {
            auth,
            team,
            state,
            created_version,
            finish: config.finish,
            cookies_saved: 0,
        })
    }
}
