//! Browser automation capability used to render product detail pages.
//!
//! The pipeline only needs four things from a browser: load a URL under a
//! deadline, read one element's text, read every matching element's text,
//! and shut down. [`BrowserSession`] captures exactly that, so detail
//! extraction can be exercised against an in-memory page in tests and the
//! Chromium backend stays swappable.

pub mod chromium;

use std::time::Duration;

use async_trait::async_trait;

use crate::error::ScraperError;

pub use chromium::{ChromiumLauncher, ChromiumSession};

/// A single browser tab driven sequentially. Never shared between two
/// in-flight operations.
#[async_trait]
pub trait BrowserSession: Send + Sync {
    /// Navigate the session's page to `url`, failing if loading does not
    /// finish within `timeout`. On failure the session must stay usable for
    /// the next call.
    async fn navigate(&mut self, url: &str, timeout: Duration) -> Result<(), ScraperError>;

    /// Inner text of the first element matching `selector` on the current
    /// page. `Ok(None)` when nothing matches.
    async fn text(&self, selector: &str) -> Result<Option<String>, ScraperError>;

    /// Inner text of every element matching `selector`, in document order.
    async fn texts(&self, selector: &str) -> Result<Vec<String>, ScraperError>;

    /// Release the underlying browser. Safe to call more than once.
    async fn close(&mut self) -> Result<(), ScraperError>;
}

/// Starts a [`BrowserSession`]. The orchestrator owns the session it gets
/// back and closes it on every exit path.
#[async_trait]
pub trait SessionLauncher: Send + Sync {
    type Session: BrowserSession;

    async fn launch(&self) -> Result<Self::Session, ScraperError>;
}
