pub mod error;
pub mod lifecycle;
pub mod models;
pub mod render;
#[cfg(test)]
pub mod testutil;
pub mod traits;

pub use error::{BrowserError, RunError};
pub use lifecycle::LifecycleWatcher;
pub use models::WaitUntil;
pub use render::RenderService;
pub use traits::{BrowserLauncher, BrowserSession, PageHandle};
