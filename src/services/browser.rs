use std::{fmt, time::Duration};

use async_trait::async_trait;
use thirtyfour::By;

/// How an element is located on the rendered page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Locator {
    ClassName(&'static str),
    Css(&'static str),
    XPath(&'static str),
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::ClassName(name) => write!(f, "class '{}'", name),
            Locator::Css(selector) => write!(f, "css '{}'", selector),
            Locator::XPath(path) => write!(f, "xpath '{}'", path),
        }
    }
}

impl From<Locator> for By {
    fn from(locator: Locator) -> Self {
        match locator {
            Locator::ClassName(name) => By::ClassName(name),
            Locator::Css(selector) => By::Css(selector),
            Locator::XPath(path) => By::XPath(path),
        }
    }
}

/// A bounded wait expired before the element showed up (or became clickable).
#[derive(Debug, thiserror::Error)]
#[error("Timed out after {timeout:?} waiting for {locator}")]
pub struct WaitTimeout {
    pub locator: Locator,
    pub timeout: Duration,
}

impl WaitTimeout {
    pub fn new(locator: Locator, timeout: Duration) -> Self {
        WaitTimeout { locator, timeout }
    }
}

#[async_trait]
pub trait PageElement: Send + Sync + Sized {
    async fn find(&self, locator: Locator) -> anyhow::Result<Self>;
    async fn find_all(&self, locator: Locator) -> anyhow::Result<Vec<Self>>;
    async fn text(&self) -> anyhow::Result<String>;
    /// Raw markup attribute.
    async fn attr(&self, name: &str) -> anyhow::Result<Option<String>>;
    /// Live DOM property, e.g. the resolved `href` of a link.
    async fn prop(&self, name: &str) -> anyhow::Result<Option<String>>;
    async fn click(&self) -> anyhow::Result<()>;
}

#[async_trait]
pub trait BrowserSession: Send + Sync + Sized {
    type Element: PageElement;

    async fn goto(&self, url: &str) -> anyhow::Result<()>;

    /// Waits until at least one element matches, then returns all matches.
    /// Expiry is reported as [`WaitTimeout`].
    async fn wait_for_all(
        &self,
        locator: Locator,
        timeout: Duration,
    ) -> anyhow::Result<Vec<Self::Element>>;

    /// Waits until the first match is clickable. Expiry is reported as [`WaitTimeout`].
    async fn wait_for_clickable(
        &self,
        locator: Locator,
        timeout: Duration,
    ) -> anyhow::Result<Self::Element>;

    async fn quit(self) -> anyhow::Result<()>;
}
