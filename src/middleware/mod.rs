pub mod flash;
pub mod session;

pub use session::{CookieSession, SessionUser};
