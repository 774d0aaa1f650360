//! Sign-in through the embedded authentication widget.
//!
//! ```text
//! Start -> CredentialsEntered -> PasswordEntered -+-> Done
//!                                                 |
//!                                                 +-> DeviceVerificationPrompted
//!                                                       -> CodeEntered -> Trusted
//! ```

use crate::config::{Credentials, SettlePoint};
use crate::contract;
use crate::ui::Ui;
use crate::verification::VerificationCodeProvider;
use crate::{Error, Result};

/// How sign-in completed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthOutcome {
    /// Credentials were enough
    SignedIn,
    /// A verification code was entered and the browser trusted
    DeviceTrusted,
}

/// Sign in with `credentials`, asking `codes` if the account wants a
/// verification code
pub async fn sign_in(
    ui: Ui<'_>,
    credentials: &Credentials,
    codes: &dyn VerificationCodeProvider,
) -> Result<AuthOutcome> {
    tracing::debug!("Signing in as {}", credentials.account);

    if !ui.exists(&contract::auth_frame()).await? {
        return Err(Error::MissingFrame(contract::AUTH_FRAME.to_string()));
    }

    ui.fill(&contract::account_name_field(), &credentials.account).await?;
    ui.click(&contract::sign_in_button()).await?;
    tracing::debug!("Credentials entered");

    let password = contract::password_field();
    ui.wait_for(&password).await?;
    ui.settle(SettlePoint::PasswordField).await;
    ui.fill(&password, &credentials.secret).await?;
    ui.click(&contract::sign_in_button()).await?;
    tracing::debug!("Password entered");

    let verify = contract::verify_device();
    let home = contract::home_page();
    let window = ui.timings().verification_window;
    let prompted = ui.first_within(&[&verify, &home], window).await?;

    if prompted == Some(0) {
        verify_device(ui, codes).await?;
        return Ok(AuthOutcome::DeviceTrusted);
    }

    Ok(AuthOutcome::SignedIn)
}

async fn verify_device(ui: Ui<'_>, codes: &dyn VerificationCodeProvider) -> Result<()> {
    tracing::info!("Verify device.");

    ui.click(&contract::other_verification_options()).await?;
    ui.click(&contract::use_phone_text_code()).await?;

    let code = codes.verification_code().await?;
    let code = code.trim();
    if code.is_empty() {
        return Err(Error::Verification("empty verification code".to_string()));
    }

    ui.driver().type_text(code).await?;
    tracing::debug!("Verification code entered");

    ui.click(&contract::trust_browser_button()).await?;
    tracing::info!("Browser trusted");

    Ok(())
}
