use std::future::Future;

use crate::error::BrowserError;
use crate::models::WaitUntil;

/// Starts browser processes.
pub trait BrowserLauncher: Send + Sync {
    type Session: BrowserSession;

    /// Launches one browser instance with OS sandboxing disabled.
    fn launch(&self) -> impl Future<Output = Result<Self::Session, BrowserError>> + Send;
}

/// A running browser instance, owned by a single render.
///
/// `close` consumes the session: once released it cannot be used or closed again.
pub trait BrowserSession: Send {
    type Page: PageHandle;

    /// Opens a blank page/tab.
    fn new_page(&mut self) -> impl Future<Output = Result<Self::Page, BrowserError>> + Send;

    /// Terminates the browser process.
    fn close(self) -> impl Future<Output = Result<(), BrowserError>> + Send;
}

/// A single tab inside a [`BrowserSession`].
pub trait PageHandle: Send + Sync {
    /// Navigates to `url` and suspends until `wait_until` is satisfied.
    fn goto(
        &self,
        url: &str,
        wait_until: WaitUntil,
    ) -> impl Future<Output = Result<(), BrowserError>> + Send;

    /// Returns the serialized HTML of the current document.
    fn content(&self) -> impl Future<Output = Result<String, BrowserError>> + Send;
}
