pub mod guard;
pub mod service;
pub mod session;

pub use guard::require_authenticated;
pub use service::AuthService;
pub use session::{Session, SessionState};
