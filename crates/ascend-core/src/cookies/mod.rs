mod store;
mod types;

pub use store::CookieStore;
pub use types::CookieRecord;
