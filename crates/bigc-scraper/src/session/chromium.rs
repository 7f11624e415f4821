//! Chromium-backed [`BrowserSession`] via `chromiumoxide`.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;

use super::{BrowserSession, SessionLauncher};
use crate::error::ScraperError;

/// Upper bound for the best-effort reset to `about:blank` after a failed load.
const RESET_TIMEOUT: Duration = Duration::from_secs(5);

/// Launches a local Chromium with one blank tab.
#[derive(Debug, Clone)]
pub struct ChromiumLauncher {
    headless: bool,
    chrome_executable: Option<PathBuf>,
    user_agent: String,
}

impl ChromiumLauncher {
    #[must_use]
    pub fn new(headless: bool, chrome_executable: Option<PathBuf>, user_agent: &str) -> Self {
        Self {
            headless,
            chrome_executable,
            user_agent: user_agent.to_owned(),
        }
    }

    #[must_use]
    pub fn from_config(config: &bigc_core::AppConfig) -> Self {
        Self::new(
            config.headless,
            config.chrome_path.clone(),
            &config.user_agent,
        )
    }

    fn browser_config(&self) -> Result<BrowserConfig, ScraperError> {
        let mut builder = BrowserConfig::builder()
            .request_timeout(Duration::from_secs(60))
            .window_size(1920, 1080)
            .arg(format!("--user-agent={}", self.user_agent))
            .arg("--disable-gpu")
            .arg("--no-sandbox")
            .arg("--disable-dev-shm-usage")
            .arg("--no-first-run")
            .arg("--no-default-browser-check");

        if !self.headless {
            builder = builder.with_head();
        }
        if let Some(path) = &self.chrome_executable {
            builder = builder.chrome_executable(path);
        }

        builder
            .build()
            .map_err(|e| ScraperError::Browser(format!("invalid browser config: {e}")))
    }
}

#[async_trait]
impl SessionLauncher for ChromiumLauncher {
    type Session = ChromiumSession;

    async fn launch(&self) -> Result<ChromiumSession, ScraperError> {
        let config = self.browser_config()?;

        tracing::info!(headless = self.headless, "launching browser");
        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| ScraperError::Browser(format!("failed to launch browser: {e}")))?;

        // The CDP handler must be polled for the browser to make progress.
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!(error = %e, "browser handler event error");
                }
            }
            tracing::debug!("browser event handler finished");
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                handler.abort();
                return Err(ScraperError::Browser(format!("failed to open tab: {e}")));
            }
        };

        Ok(ChromiumSession {
            browser,
            page,
            handler,
            closed: false,
        })
    }
}

/// One Chromium process with a single tab reused for every product page.
///
/// Dropping the session aborts the CDP handler task and `Browser`'s own drop
/// kills the child process, so the browser is released even when
/// [`BrowserSession::close`] is never reached.
pub struct ChromiumSession {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
    closed: bool,
}

impl ChromiumSession {
    /// Abandon whatever the tab is still loading.
    async fn reset_page(&self) {
        match tokio::time::timeout(RESET_TIMEOUT, self.page.goto("about:blank")).await {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => tracing::debug!(error = %e, "failed to reset tab after failed load"),
            Err(_) => tracing::debug!("timed out resetting tab after failed load"),
        }
    }
}

#[async_trait]
impl BrowserSession for ChromiumSession {
    async fn navigate(&mut self, url: &str, timeout: Duration) -> Result<(), ScraperError> {
        match tokio::time::timeout(timeout, self.page.goto(url)).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => {
                self.reset_page().await;
                Err(ScraperError::Navigation {
                    url: url.to_owned(),
                    reason: e.to_string(),
                })
            }
            Err(_) => {
                self.reset_page().await;
                Err(ScraperError::NavigationTimeout {
                    url: url.to_owned(),
                    timeout_secs: timeout.as_secs(),
                })
            }
        }
    }

    async fn text(&self, selector: &str) -> Result<Option<String>, ScraperError> {
        let element = self
            .page
            .find_element(selector)
            .await
            .map_err(|e| ScraperError::Element {
                selector: selector.to_owned(),
                reason: e.to_string(),
            })?;

        element
            .inner_text()
            .await
            .map_err(|e| ScraperError::Element {
                selector: selector.to_owned(),
                reason: e.to_string(),
            })
    }

    async fn texts(&self, selector: &str) -> Result<Vec<String>, ScraperError> {
        let elements = self
            .page
            .find_elements(selector)
            .await
            .map_err(|e| ScraperError::Element {
                selector: selector.to_owned(),
                reason: e.to_string(),
            })?;

        let mut texts = Vec::with_capacity(elements.len());
        for element in elements {
            let text = element
                .inner_text()
                .await
                .map_err(|e| ScraperError::Element {
                    selector: selector.to_owned(),
                    reason: e.to_string(),
                })?;
            texts.push(text.unwrap_or_default());
        }
        Ok(texts)
    }

    async fn close(&mut self) -> Result<(), ScraperError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        let result = self
            .browser
            .close()
            .await
            .map(|_| ())
            .map_err(|e| ScraperError::Browser(format!("failed to close browser: {e}")));
        if let Err(e) = self.browser.wait().await {
            tracing::debug!(error = %e, "browser process did not exit cleanly");
        }
        self.handler.abort();
        tracing::info!("browser closed");
        result
    }
}

impl Drop for ChromiumSession {
    fn drop(&mut self) {
        if !self.closed {
            tracing::warn!("browser session dropped without close; killing browser");
        }
        self.handler.abort();
    }
}
