pub mod handlers;
pub mod session;

pub use handlers::{AppState, router};
pub use session::{DocumentSession, SessionStore};
