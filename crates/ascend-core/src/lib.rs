pub mod config;
pub mod contract;
pub mod cookies;
pub mod driver;
pub mod error;
pub mod flows;
pub mod orchestrator;
pub mod platform;
pub mod session;
pub mod ui;
pub mod verification;
pub mod version;

pub use config::{Credentials, FinishAction, ReleaseConfig, SettlePoint, Timings};
pub use driver::{Driver, Locator, Pattern, Scope};
pub use error::{Error, Result};
pub use orchestrator::{Orchestrator, RunReport};
pub use platform::Platform;
pub use verification::VerificationCodeProvider;
