//! Chrome-backed implementation of the console [`Driver`](ascend_core::Driver)

mod chrome_finder;
mod driver;
mod error;
mod launcher;
mod script;

pub use chrome_finder::ChromeFinder;
pub use driver::ChromeDriver;
pub use error::{Error, Result};
pub use launcher::ChromeLauncher;
