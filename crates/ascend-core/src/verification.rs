use crate::Result;
use async_trait::async_trait;

/// Source of the one-time code for device verification
///
/// This is the only point where the workflow waits on a human.
#[async_trait]
pub trait VerificationCodeProvider: Send + Sync {
    async fn verification_code(&self) -> Result<String>;
}
