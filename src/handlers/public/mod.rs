// handlers/public - endpoints reachable without a session.
pub mod health;
pub mod login;
pub mod logout;

pub use health::health;
pub use login::{login_form, login_submit};
pub use logout::logout;
