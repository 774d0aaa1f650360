//! Immutable run configuration
//!
//! Built once by the caller and passed by reference into the orchestrator.
//! Nothing in the workflow reads process-wide state.

use crate::contract::CONSOLE_URL;
use crate::platform::Platform;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Account used to sign in to the console
#[derive(Clone)]
pub struct Credentials {
    pub account: String,
    pub secret: String,
}

impl Credentials {
    pub fn new(account: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            secret: secret.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("account", &self.account)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Last action of the workflow once metadata and build are in place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FinishAction {
    /// Save the draft and stop
    #[default]
    Save,
    /// Save, then submit the version for review
    SubmitForReview,
}

/// Call sites where the console needs a fixed delay to finish a client-side
/// transition that has no observable marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettlePoint {
    /// Password field is present before it accepts input
    PasswordField,
    /// "My Apps" entry renders before its handler is bound
    AppsMenu,
    /// Account avatar renders before the menu toggle works
    UserMenu,
    /// Platform sections of the app page are still being filled in
    SubmissionState,
    /// Ready-for-sale link renders before it is clickable
    ReadyForSale,
    /// Version header text is replaced after load
    VersionHeader,
}

/// Wait and delay policy for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timings {
    /// Budget for a required element to appear
    pub element_timeout: Duration,
    /// Interval between existence checks while waiting
    pub poll_interval: Duration,
    /// Budget for the device-verification prompt or home page after sign-in
    pub verification_window: Duration,
    pub password_field: Duration,
    pub apps_menu: Duration,
    pub user_menu: Duration,
    pub submission_state: Duration,
    pub ready_for_sale: Duration,
    pub version_header: Duration,
}

impl Timings {
    /// No delays and single-shot waits
    pub fn immediate() -> Self {
        Self {
            element_timeout: Duration::ZERO,
            poll_interval: Duration::ZERO,
            verification_window: Duration::ZERO,
            password_field: Duration::ZERO,
            apps_menu: Duration::ZERO,
            user_menu: Duration::ZERO,
            submission_state: Duration::ZERO,
            ready_for_sale: Duration::ZERO,
            version_header: Duration::ZERO,
        }
    }

    pub fn with_element_timeout(mut self, timeout: Duration) -> Self {
        self.element_timeout = timeout;
        self
    }

    pub fn settle(&self, point: SettlePoint) -> Duration {
        match point {
            SettlePoint::PasswordField => self.password_field,
            SettlePoint::AppsMenu => self.apps_menu,
            SettlePoint::UserMenu => self.user_menu,
            SettlePoint::SubmissionState => self.submission_state,
            SettlePoint::ReadyForSale => self.ready_for_sale,
            SettlePoint::VersionHeader => self.version_header,
        }
    }
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            element_timeout: Duration::from_secs(30),
            poll_interval: Duration::from_millis(100),
            verification_window: Duration::from_secs(30),
            password_field: Duration::from_millis(2000),
            apps_menu: Duration::from_millis(1500),
            user_menu: Duration::from_millis(3000),
            submission_state: Duration::from_millis(1500),
            ready_for_sale: Duration::from_millis(1500),
            version_header: Duration::from_millis(2000),
        }
    }
}

/// Everything one submission run needs
#[derive(Debug, Clone)]
pub struct ReleaseConfig {
    pub credentials: Credentials,
    /// Apple ID of the application
    pub app_id: String,
    /// "What's New in This Version" text
    pub release_notes: String,
    /// May be empty
    pub promotional_text: String,
    /// Identifier matched against the build picker rows
    pub build_version: String,
    pub team: Option<String>,
    pub platform: Platform,
    pub console_url: String,
    pub cookie_path: PathBuf,
    pub finish: FinishAction,
    pub timings: Timings,
}

impl ReleaseConfig {
    pub fn new(
        credentials: Credentials,
        app_id: impl Into<String>,
        release_notes: impl Into<String>,
        build_version: impl Into<String>,
    ) -> Self {
        Self {
            credentials,
            app_id: app_id.into(),
            release_notes: release_notes.into(),
            promotional_text: String::new(),
            build_version: build_version.into(),
            team: None,
            platform: Platform::Ios,
            console_url: CONSOLE_URL.to_string(),
            cookie_path: PathBuf::from("cookies.json"),
            finish: FinishAction::Save,
            timings: Timings::default(),
        }
    }

    pub fn with_team(mut self, team: impl Into<String>) -> Self {
        self.team = Some(team.into());
        self
    }

    pub fn with_promotional_text(mut self, text: impl Into<String>) -> Self {
        self.promotional_text = text.into();
        self
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub fn with_console_url(mut self, url: impl Into<String>) -> Self {
        self.console_url = url.into();
        self
    }

    pub fn with_cookie_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.cookie_path = path.into();
        self
    }

    pub fn with_finish(mut self, finish: FinishAction) -> Self {
        self.finish = finish;
        self
    }

    pub fn with_timings(mut self, timings: Timings) -> Self {
        self.timings = timings;
        self
    }
}
