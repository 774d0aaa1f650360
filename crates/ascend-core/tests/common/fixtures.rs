//! Console layouts and configuration shared by workflow tests

#![allow(dead_code)]

use super::fake_driver::FakeDriver;
use ascend_core::contract;
use ascend_core::{Credentials, Error, Platform, ReleaseConfig, Result, Timings};
use ascend_core::VerificationCodeProvider;
use async_trait::async_trait;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const ACCOUNT: &str = "release@example.com";
pub const SECRET: &str = "correct horse battery staple";
pub const APP_ID: &str = "1234567890";
pub const BUILD: &str = "4.2 (108)";
pub const NOTES: &str = "Bug fixes and performance improvements.";
pub const PROMO: &str = "Now with dark mode";

pub fn release_config(dir: &Path) -> ReleaseConfig {
    ReleaseConfig::new(Credentials::new(ACCOUNT, SECRET), APP_ID, NOTES, BUILD)
        .with_promotional_text(PROMO)
        .with_cookie_path(dir.join("cookies.json"))
        .with_timings(Timings::immediate())
}

/// Sign-in widget without device verification
pub fn show_login(driver: &FakeDriver) {
    driver
        .show(&contract::auth_frame())
        .show(&contract::account_name_field())
        .show(&contract::sign_in_button())
        .show(&contract::password_field());
}

/// Device verification prompt inside the sign-in widget
pub fn show_device_verification(driver: &FakeDriver) {
    driver
        .show(&contract::verify_device())
        .show(&contract::other_verification_options())
        .show(&contract::use_phone_text_code())
        .show(&contract::trust_browser_button());
}

/// Home page through to the app page of `APP_ID`
pub fn show_home_to_app(driver: &FakeDriver) {
    driver
        .show(&contract::home_page())
        .show(&contract::my_apps())
        .show(&contract::apps_search())
        .show(&contract::app_link(APP_ID))
        .show(&contract::app_header());
}

/// Version form, build picker and header buttons of an open submission
pub fn show_submission_form(driver: &FakeDriver) {
    driver
        .show(&contract::status_waiting())
        .show(&contract::release_notes_field())
        .show(&contract::promotional_text_field())
        .show(&contract::add_build_button())
        .show(&contract::build_modal())
        .show(&contract::build_row(BUILD))
        .show(&contract::build_row_checkbox(BUILD))
        .show(&contract::modal_primary_button())
        .show(&contract::save_button())
        .show(&contract::submit_for_review_button());
    driver.reveal_on_click(
        &contract::build_row_checkbox(BUILD),
        &contract::build_checked(),
    );
}

/// Ready-for-sale page and version picker for iOS, with `header` as the
/// published version header
pub fn show_version_creation(driver: &FakeDriver, header: &str) {
    let route = Platform::Ios.ready_for_sale_route().unwrap();
    driver
        .show(&contract::ready_for_sale_link(route))
        .set_text(&contract::version_header(), header)
        .show(&contract::new_version_link())
        .show(&contract::modal_primary_button());
    driver
        .reveal_on_click(&contract::new_version_link(), &contract::version_popup_open())
        .reveal_on_click(&contract::new_version_link(), &contract::version_option(Platform::Ios))
        .reveal_on_click(&contract::version_option(Platform::Ios), &contract::modal_open())
        .reveal_on_click(&contract::modal_primary_button(), &contract::status_waiting())
        .reveal_on_click(
            &contract::modal_primary_button(),
            &contract::prepare_for_submission(Platform::Ios),
        );
}

/// Fresh run that has to sign in and finds a submission in progress
pub fn console_with_active_submission() -> FakeDriver {
    let driver = FakeDriver::new();
    show_login(&driver);
    show_home_to_app(&driver);
    driver.show(&contract::prepare_for_submission(Platform::Ios));
    show_submission_form(&driver);
    driver
}

/// Code provider that answers with a fixed code and counts prompts
pub struct FixedCode {
    code: String,
    calls: AtomicUsize,
}

impl FixedCode {
    pub fn new(code: &str) -> Self {
        Self {
            code: code.to_string(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VerificationCodeProvider for FixedCode {
    async fn verification_code(&self) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.code.clone())
    }
}

/// Code provider for runs that must never prompt
pub struct NoPrompt;

#[async_trait]
impl VerificationCodeProvider for NoPrompt {
    async fn verification_code(&self) -> Result<String> {
        Err(Error::Verification("unexpected prompt".to_string()))
    }
}
