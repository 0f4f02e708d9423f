use std::path::{Path, PathBuf};
use std::time::Duration;

use chromiumoxide::cdp::browser_protocol::page::{
    EventLifecycleEvent, NavigateParams, SetLifecycleEventsEnabledParams,
};
use chromiumoxide::error::CdpError;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use prerender_core::error::BrowserError;
use prerender_core::lifecycle::LifecycleWatcher;
use prerender_core::models::WaitUntil;
use prerender_core::traits::{BrowserLauncher, BrowserSession, PageHandle};
use tokio::task::JoinHandle;

/// Navigation deadline applied when none is configured.
pub const DEFAULT_NAVIGATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Options for launching Chromium.
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    /// Explicit Chrome/Chromium binary. When `None` the binary is discovered.
    pub chrome_executable: Option<PathBuf>,
    /// How long a navigation may take to reach its wait condition.
    pub navigation_timeout: Duration,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            chrome_executable: None,
            navigation_timeout: DEFAULT_NAVIGATION_TIMEOUT,
        }
    }
}

/// Launches headless Chromium via the Chrome DevTools Protocol.
///
/// Every [`BrowserLauncher::launch`] starts its own Chromium process with
/// the OS sandbox disabled, so it runs inside containers and CI runners
/// that forbid the namespaces the sandbox needs.
///
/// # Example
///
/// ```rust,no_run
/// use prerender_browser::ChromiumLauncher;
/// use prerender_core::RenderService;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let service = RenderService::new(ChromiumLauncher::new());
/// let html = service.render("https://example.com").await?;
/// println!("{html}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ChromiumLauncher {
    options: LaunchOptions,
}

impl ChromiumLauncher {
    /// Launcher with a **30 s** navigation timeout and automatic binary discovery.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: LaunchOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &LaunchOptions {
        &self.options
    }

    /// Tries to locate the real Chrome/Chromium binary.
    ///
    /// An explicit path always wins, even if it does not exist, so a typo
    /// surfaces as a launch failure instead of silently picking another
    /// browser. Otherwise `CHROME_BIN` is honoured when it points at a file,
    /// then well-known install locations are probed. On systems where
    /// Chromium is installed via **snap**, the wrapper at `/snap/bin/chromium`
    /// strips unknown CLI flags, so the real binary inside the snap is
    /// preferred. `None` lets `chromiumoxide` do its own lookup.
    fn find_chrome_binary(explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }

        if let Ok(p) = std::env::var("CHROME_BIN") {
            let path = PathBuf::from(&p);
            if path.exists() {
                return Some(path);
            }
            tracing::debug!("Ignoring CHROME_BIN={p}: no such file");
        }

        let candidates: &[&str] = &[
            // Snap (Ubuntu default)
            "/snap/chromium/current/usr/lib/chromium-browser/chrome",
            // Flatpak
            "/var/lib/flatpak/exports/bin/org.chromium.Chromium",
            // Common apt / manual installs
            "/usr/bin/google-chrome-stable",
            "/usr/bin/google-chrome",
            "/usr/bin/chromium",
            "/usr/bin/chromium-browser",
        ];

        candidates.iter().map(PathBuf::from).find(|p| p.exists())
    }
}

impl BrowserLauncher for ChromiumLauncher {
    type Session = ChromiumSession;

    async fn launch(&self) -> Result<ChromiumSession, BrowserError> {
        let mut builder = BrowserConfig::builder().no_sandbox().disable_default_args();

        if let Some(bin) = Self::find_chrome_binary(self.options.chrome_executable.as_deref()) {
            tracing::info!("Using Chrome binary: {}", bin.display());
            builder = builder.chrome_executable(bin);
        }

        let config = builder
            .arg("--headless=new")
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-extensions")
            .arg("--disable-popup-blocking")
            .arg("--disable-translate")
            .arg("--no-first-run")
            .build()
            .map_err(|e| BrowserError::Launch(format!("Browser config error: {e}")))?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| BrowserError::Launch(e.to_string()))?;

        // The CDP handler must be polled continuously for the connection to work.
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("Browser CDP handler error: {e}");
                }
            }
        });

        Ok(ChromiumSession {
            browser,
            handler,
            navigation_timeout: self.options.navigation_timeout,
        })
    }
}

/// One running Chromium process and the task driving its CDP connection.
pub struct ChromiumSession {
    browser: Browser,
    handler: JoinHandle<()>,
    navigation_timeout: Duration,
}

impl BrowserSession for ChromiumSession {
    type Page = ChromiumPage;

    async fn new_page(&mut self) -> Result<ChromiumPage, BrowserError> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| BrowserError::Page(e.to_string()))?;

        Ok(ChromiumPage {
            page,
            navigation_timeout: self.navigation_timeout,
        })
    }

    async fn close(mut self) -> Result<(), BrowserError> {
        let closed = self
            .browser
            .close()
            .await
            .map(|_| ())
            .map_err(|e| BrowserError::Close(e.to_string()));

        // Reap the child only after a clean close; otherwise dropping the
        // `Browser` kills it.
        if closed.is_ok()
            && let Err(e) = self.browser.wait().await
        {
            tracing::debug!("Failed to reap browser process: {e}");
        }

        self.handler.abort();
        closed
    }
}

/// A Chromium tab.
pub struct ChromiumPage {
    page: Page,
    navigation_timeout: Duration,
}

impl ChromiumPage {
    async fn navigate(&self, url: &str, wait_until: WaitUntil) -> Result<(), BrowserError> {
        let fail = |e: CdpError| BrowserError::navigation(url, e.to_string());

        self.page
            .execute(SetLifecycleEventsEnabledParams::new(true))
            .await
            .map_err(fail)?;

        // Subscribe before navigating so no lifecycle event is missed.
        let mut events = self
            .page
            .event_listener::<EventLifecycleEvent>()
            .await
            .map_err(fail)?;

        let response = self
            .page
            .execute(NavigateParams::new(url))
            .await
            .map_err(fail)?;
        let navigation = &response.result;

        // DNS failures, refused connections and invalid targets land here.
        if let Some(error_text) = &navigation.error_text {
            return Err(BrowserError::navigation(url, error_text.clone()));
        }

        let mut watcher = LifecycleWatcher::new(wait_until);
        watcher.bind(
            navigation.frame_id.inner(),
            navigation.loader_id.as_ref().map(|id| id.inner().as_str()),
        );

        while !watcher.is_settled() {
            let Some(event) = events.next().await else {
                return Err(BrowserError::navigation(
                    url,
                    "page closed before navigation settled",
                ));
            };
            tracing::debug!(frame = %event.frame_id.inner(), "Lifecycle event {}", event.name);
            watcher.observe(event.frame_id.inner(), event.loader_id.inner(), &event.name);
        }

        Ok(())
    }
}

impl PageHandle for ChromiumPage {
    async fn goto(&self, url: &str, wait_until: WaitUntil) -> Result<(), BrowserError> {
        let timeout = self.navigation_timeout;

        match tokio::time::timeout(timeout, self.navigate(url, wait_until)).await {
            Ok(result) => result,
            Err(_) => Err(BrowserError::Timeout {
                url: url.to_string(),
                secs: timeout.as_secs(),
            }),
        }
    }

    async fn content(&self) -> Result<String, BrowserError> {
        self.page
            .content()
            .await
            .map_err(|e| BrowserError::Content(e.to_string()))
    }
}
