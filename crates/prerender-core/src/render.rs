use crate::error::BrowserError;
use crate::models::WaitUntil;
use crate::traits::{BrowserLauncher, BrowserSession, PageHandle};

/// Renders a URL to HTML: launch → open page → navigate and wait → read → close.
///
/// Generic over the browser collaborator via [`BrowserLauncher`], enabling
/// tests without a real Chromium.
pub struct RenderService<L>
where
    L: BrowserLauncher,
{
    launcher: L,
    wait_until: WaitUntil,
}

impl<L> RenderService<L>
where
    L: BrowserLauncher,
{
    /// Create a service that waits for the network to be almost idle.
    pub fn new(launcher: L) -> Self {
        Self {
            launcher,
            wait_until: WaitUntil::default(),
        }
    }

    /// Override the navigation completion condition.
    pub fn with_wait_until(mut self, wait_until: WaitUntil) -> Self {
        self.wait_until = wait_until;
        self
    }

    /// Render `url` and return the serialized document.
    ///
    /// The URL is handed to the browser unchanged. Once a browser has been
    /// launched it is closed exactly once, whether or not the page steps
    /// succeed. A failed close fails the render, so HTML is only returned
    /// when every step succeeded.
    pub async fn render(&self, url: &str) -> Result<String, BrowserError> {
        tracing::info!("Launching browser");
        let mut session = self.launcher.launch().await?;

        let rendered = self.render_in(&mut session, url).await;

        tracing::debug!("Closing browser");
        let closed = session.close().await;

        match (rendered, closed) {
            (Ok(html), Ok(())) => Ok(html),
            (Ok(_), Err(close_err)) => Err(close_err),
            (Err(err), Ok(())) => Err(err),
            (Err(err), Err(close_err)) => {
                tracing::warn!("Browser close also failed: {close_err}");
                Err(err)
            }
        }
    }

    async fn render_in(&self, session: &mut L::Session, url: &str) -> Result<String, BrowserError> {
        let page = session.new_page().await?;

        tracing::info!(wait_until = %self.wait_until, "Navigating to {}", url);
        page.goto(url, self.wait_until).await?;

        let html = page.content().await?;
        tracing::info!("Rendered {} bytes of HTML", html.len());

        Ok(html)
    }
}
