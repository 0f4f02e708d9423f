use thiserror::Error;

/// Failures raised by the browser-automation collaborator.
#[derive(Error, Debug)]
pub enum BrowserError {
    /// The browser process could not be configured or started.
    #[error("Failed to launch browser: {0}")]
    Launch(String),

    /// A new page/tab could not be opened.
    #[error("Failed to open page: {0}")]
    Page(String),

    /// Navigation was rejected or failed (DNS, refused connection, invalid target).
    #[error("Failed to navigate to {url}: {message}")]
    Navigation { url: String, message: String },

    /// The navigation did not settle before the collaborator's deadline.
    #[error("Navigation to {url} timed out after {secs} seconds")]
    Timeout { url: String, secs: u64 },

    /// The serialized document could not be read back.
    #[error("Failed to read page content: {0}")]
    Content(String),

    /// The browser process could not be shut down cleanly.
    #[error("Failed to close browser: {0}")]
    Close(String),
}

impl BrowserError {
    pub fn navigation(url: &str, message: impl Into<String>) -> Self {
        BrowserError::Navigation {
            url: url.to_string(),
            message: message.into(),
        }
    }
}

/// Top-level outcome of one `prerender` invocation.
///
/// The binary matches on every variant to pick the diagnostic and exit code.
#[derive(Error, Debug)]
pub enum RunError {
    /// No URL argument was supplied.
    #[error("No URL provided.")]
    Usage,

    /// Any failure surfaced by the browser collaborator.
    #[error(transparent)]
    Collaborator(#[from] BrowserError),

    /// The rendered document could not be written to stdout.
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl RunError {
    /// Process exit status for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            RunError::Usage => 1,
            RunError::Collaborator(_) => 1,
            RunError::Output(_) => 1,
        }
    }
}
