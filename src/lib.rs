// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod app_dirs;
pub mod config;
pub mod controller;
pub mod logging;
pub mod notification;
pub mod runtime;
pub mod session;
pub mod surface;
pub mod timer_queue;

pub use controller::{Presenter, SessionController};
pub use notification::Notification;
pub use session::{ConfigError, Progress, SessionConfig, SessionState};
pub use surface::Surface;
