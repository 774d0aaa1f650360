//! Selectors and markers of the App Store Connect web console.
//!
//! This catalog is the wire contract with the remote UI. Any structural change
//! on the console side shows up here first.

use crate::driver::Locator;
use crate::platform::Platform;

pub const CONSOLE_URL: &str = "https://appstoreconnect.apple.com/";

/// Sign-in widget frame
pub const AUTH_FRAME: &str = "#aid-auth-widget-iFrame";
pub const HOME_PAGE: &str = "#homepage-container";

pub fn auth_frame() -> Locator {
    Locator::css(AUTH_FRAME)
}

pub fn home_page() -> Locator {
    Locator::css(HOME_PAGE)
}

// Sign-in widget, all inside the auth frame

pub fn account_name_field() -> Locator {
    Locator::css("#account_name_text_field").in_frame(AUTH_FRAME)
}

pub fn password_field() -> Locator {
    Locator::css("#password_text_field").in_frame(AUTH_FRAME)
}

pub fn sign_in_button() -> Locator {
    Locator::css("#stepEl > sign-in > #signin > .container > #sign-in:not(disabled)")
        .in_frame(AUTH_FRAME)
}

pub fn verify_device() -> Locator {
    Locator::css("verify-device").in_frame(AUTH_FRAME)
}

pub fn other_verification_options() -> Locator {
    Locator::css("#no-trstd-device-pop").in_frame(AUTH_FRAME)
}

pub fn use_phone_text_code() -> Locator {
    Locator::css("#use-phone-link").in_frame(AUTH_FRAME)
}

pub fn trust_browser_button() -> Locator {
    Locator::css("button.trust-browser").in_frame(AUTH_FRAME)
}

// Navigation

pub fn my_apps() -> Locator {
    Locator::xpath(r#"//div[text()="My Apps"]"#)
}

pub fn apps_search() -> Locator {
    Locator::css("#manage-your-apps-search")
}

pub fn user_avatar() -> Locator {
    Locator::css(".mobile-user-avatar")
}

pub fn user_menu_open() -> Locator {
    Locator::css("#itc-user-menustate:checked")
}

pub fn user_menu_closed() -> Locator {
    Locator::css("#itc-user-menustate:not(:checked)")
}

/// Radio label of a team in the account menu, matched by exact text
pub fn team_label(team: &str) -> Locator {
    Locator::xpath(format!(
        "//label[contains(@class, 'custom-radio-check') and text() = {}]",
        xpath_literal(team)
    ))
}

/// Element whose `id` attribute equals `id`
pub fn element_by_id(id: &str) -> Locator {
    Locator::css(format!("[id={}]", css_string(id)))
}

pub fn app_link(apple_id: &str) -> Locator {
    Locator::css(format!("a[href$={}]", css_string(&format!("app/{}", apple_id))))
}

pub fn app_header() -> Locator {
    Locator::css("#appPageHeader")
}

// Versions

pub fn prepare_for_submission(platform: Platform) -> Locator {
    Locator::xpath(format!(
        "//h3[text()='{}']/following-sibling::ul//a[contains(text(), 'Prepare for Submission')]",
        platform.section_heading()
    ))
}

pub fn ready_for_sale_link(route: &str) -> Locator {
    Locator::css(format!("a[href$={}]", css_string(route)))
}

pub fn version_header() -> Locator {
    Locator::css("#appVerionInfoHeaderId h1")
}

pub fn new_version_link() -> Locator {
    Locator::css("a.newVersion_link")
}

pub fn version_popup_open() -> Locator {
    Locator::css("#versionPopUp.open")
}

pub fn version_option(platform: Platform) -> Locator {
    Locator::xpath(format!(
        r#"//div[@id="versionPopUp"]//a[not(@class="ng-hide") and text()="{}"]"#,
        platform.as_str()
    ))
}

pub fn modal_open() -> Locator {
    Locator::css(".ng-modal:not(.ng-hide)")
}

pub fn modal_primary_button() -> Locator {
    Locator::css(".modal-buttons .primary")
}

/// Status shown once a version record is waiting for submission
pub fn status_waiting() -> Locator {
    Locator::css("#appStorePageContent p.status.waiting")
}

// Version information form

pub fn release_notes_field() -> Locator {
    labelled_textarea("What's New in This Version")
}

pub fn promotional_text_field() -> Locator {
    labelled_textarea("Promotional Text")
}

fn labelled_textarea(label: &str) -> Locator {
    Locator::xpath(format!(
        "//label[contains(text(), {})]/following-sibling::span//span//textarea",
        xpath_literal(label)
    ))
}

// Builds

pub fn staged_build_delete() -> Locator {
    Locator::css("td a.deleteIcon")
}

pub fn add_build_button() -> Locator {
    Locator::xpath(r#"//h1[contains(text(), "Build")]//a[contains(@class, "addIcon")]"#)
}

pub fn build_modal() -> Locator {
    Locator::css("div.buildModalList")
}

const BUILD_ROWS: &str = r#"//div[contains(@class, "buildModalList")]//tr"#;

/// Build picker row whose text contains `build`
pub fn build_row(build: &str) -> Locator {
    Locator::xpath(format!(
        "{}[td//text()[contains(., {})]]",
        BUILD_ROWS,
        xpath_literal(build)
    ))
}

pub fn build_row_checkbox(build: &str) -> Locator {
    Locator::xpath(format!(
        "{}[td//text()[contains(., {})]]//a[contains(concat(' ', normalize-space(@class), ' '), ' radiostyle ')]",
        BUILD_ROWS,
        xpath_literal(build)
    ))
}

pub fn build_checked() -> Locator {
    Locator::css("div.buildModalList a.radiostyle.checked")
}

// Header actions

pub fn save_button() -> Locator {
    Locator::xpath(
        r#"//div[contains(@class, "pane-layout-content-header-buttons")]//button[span[contains(text(), "Save")]]"#,
    )
}

pub fn submit_for_review_button() -> Locator {
    Locator::xpath(
        r#"//div[contains(@class, "pane-layout-content-header-buttons")]//button[contains(text(), "Submit for Review")]"#,
    )
}

/// Quote `value` as an XPath 1.0 string literal
pub fn xpath_literal(value: &str) -> String {
    if !value.contains('"') {
        return format!("\"{}\"", value);
    }
    if !value.contains('\'') {
        return format!("'{}'", value);
    }

    let parts: Vec<String> = value
        .split('"')
        .map(|part| format!("\"{}\"", part))
        .collect();
    format!("concat({})", parts.join(", '\"', "))
}

/// Quote `value` as a CSS string
pub fn css_string(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{}\"", escaped)
}
