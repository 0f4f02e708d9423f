//! Test utilities: a mock browser collaborator.
//!
//! Handwritten mocks for dependency injection in unit tests.
//! Every collaborator call is recorded in an `Arc<Mutex<_>>` shared by the
//! launcher, its sessions and pages, allowing assertions on call order.

use std::sync::{Arc, Mutex};

use crate::error::BrowserError;
use crate::models::WaitUntil;
use crate::traits::{BrowserLauncher, BrowserSession, PageHandle};

/// One recorded collaborator operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Launch,
    NewPage,
    Goto { url: String, wait_until: WaitUntil },
    Content,
    Close,
}

/// Errors to inject, each consumed by the first matching call.
#[derive(Default)]
struct Failures {
    launch: Option<BrowserError>,
    new_page: Option<BrowserError>,
    goto: Option<BrowserError>,
    content: Option<BrowserError>,
    close: Option<BrowserError>,
}

#[derive(Clone)]
struct Shared {
    html: String,
    reject_malformed: bool,
    calls: Arc<Mutex<Vec<Call>>>,
    failures: Arc<Mutex<Failures>>,
}

impl Shared {
    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

// ---------------------------------------------------------------------------
// MockLauncher
// ---------------------------------------------------------------------------

/// Mock launcher whose pages always render a fixed HTML string.
#[derive(Clone)]
pub struct MockLauncher {
    shared: Shared,
}

impl MockLauncher {
    pub fn new(html: &str) -> Self {
        Self {
            shared: Shared {
                html: html.to_string(),
                reject_malformed: false,
                calls: Arc::new(Mutex::new(Vec::new())),
                failures: Arc::new(Mutex::new(Failures::default())),
            },
        }
    }

    /// Navigation fails for targets without a `scheme://` prefix, the way
    /// Chrome rejects them.
    pub fn reject_malformed_urls(mut self) -> Self {
        self.shared.reject_malformed = true;
        self
    }

    pub fn fail_launch(self, error: BrowserError) -> Self {
        self.shared.failures.lock().unwrap().launch = Some(error);
        self
    }

    pub fn fail_new_page(self, error: BrowserError) -> Self {
        self.shared.failures.lock().unwrap().new_page = Some(error);
        self
    }

    pub fn fail_goto(self, error: BrowserError) -> Self {
        self.shared.failures.lock().unwrap().goto = Some(error);
        self
    }

    pub fn fail_content(self, error: BrowserError) -> Self {
        self.shared.failures.lock().unwrap().content = Some(error);
        self
    }

    pub fn fail_close(self, error: BrowserError) -> Self {
        self.shared.failures.lock().unwrap().close = Some(error);
        self
    }

    /// Snapshot of every call recorded so far.
    pub fn calls(&self) -> Vec<Call> {
        self.shared.calls.lock().unwrap().clone()
    }

    /// Number of recorded calls equal to `call`.
    pub fn count(&self, call: &Call) -> usize {
        self.calls().iter().filter(|c| *c == call).count()
    }
}

impl BrowserLauncher for MockLauncher {
    type Session = MockSession;

    async fn launch(&self) -> Result<MockSession, BrowserError> {
        self.shared.record(Call::Launch);
        if let Some(e) = self.shared.failures.lock().unwrap().launch.take() {
            return Err(e);
        }
        Ok(MockSession {
            shared: self.shared.clone(),
        })
    }
}

// ---------------------------------------------------------------------------
// MockSession / MockPage
// ---------------------------------------------------------------------------

pub struct MockSession {
    shared: Shared,
}

impl BrowserSession for MockSession {
    type Page = MockPage;

    async fn new_page(&mut self) -> Result<MockPage, BrowserError> {
        self.shared.record(Call::NewPage);
        if let Some(e) = self.shared.failures.lock().unwrap().new_page.take() {
            return Err(e);
        }
        Ok(MockPage {
            shared: self.shared.clone(),
        })
    }

    async fn close(self) -> Result<(), BrowserError> {
        self.shared.record(Call::Close);
        match self.shared.failures.lock().unwrap().close.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

pub struct MockPage {
    shared: Shared,
}

impl PageHandle for MockPage {
    async fn goto(&self, url: &str, wait_until: WaitUntil) -> Result<(), BrowserError> {
        self.shared.record(Call::Goto {
            url: url.to_string(),
            wait_until,
        });
        if let Some(e) = self.shared.failures.lock().unwrap().goto.take() {
            return Err(e);
        }
        if self.shared.reject_malformed && !url.contains("://") {
            return Err(BrowserError::navigation(url, "Cannot navigate to invalid URL"));
        }
        Ok(())
    }

    async fn content(&self) -> Result<String, BrowserError> {
        self.shared.record(Call::Content);
        if let Some(e) = self.shared.failures.lock().unwrap().content.take() {
            return Err(e);
        }
        Ok(self.shared.html.clone())
    }
}
