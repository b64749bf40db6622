use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use thirtyfour::{
    common::capabilities::firefox::FirefoxPreferences, error::WebDriverError,
    prelude::ElementQueryable, By, DesiredCapabilities, FirefoxCapabilities, WebDriver,
    WebElement,
};

use crate::configuration::WebDriverSettings;

use super::{BrowserSession, Locator, PageElement, WaitTimeout};

const POLL_INTERVAL: Duration = Duration::from_millis(500);

pub struct Droid {
    pub driver: WebDriver,
}

/// Firefox capabilities: optional headless mode and the user-agent override.
fn firefox_capabilities(settings: &WebDriverSettings) -> anyhow::Result<FirefoxCapabilities> {
    let mut caps = DesiredCapabilities::firefox();
    if settings.headless {
        caps.set_headless()?;
    }

    let mut prefs = FirefoxPreferences::new();
    prefs.set_user_agent(settings.user_agent.clone())?;
    caps.set_preferences(prefs)?;

    Ok(caps)
}

impl Droid {
    /// Opens a Firefox session on the configured WebDriver server (geckodriver).
    pub async fn new(settings: &WebDriverSettings) -> anyhow::Result<Self> {
        let caps = firefox_capabilities(settings)?;

        let driver = WebDriver::new(settings.server_url.as_str(), caps)
            .await
            .with_context(|| format!("Failed to start a session on {}", settings.server_url))?;

        Ok(Droid { driver })
    }
}

fn wait_error(err: WebDriverError, locator: Locator, timeout: Duration) -> anyhow::Error {
    match err {
        WebDriverError::NoSuchElement(_) => WaitTimeout::new(locator, timeout).into(),
        other => other.into(),
    }
}

#[async_trait]
impl BrowserSession for Droid {
    type Element = WebElement;

    async fn goto(&self, url: &str) -> anyhow::Result<()> {
        self.driver.goto(url).await?;
        Ok(())
    }

    async fn wait_for_all(
        &self,
        locator: Locator,
        timeout: Duration,
    ) -> anyhow::Result<Vec<WebElement>> {
        self.driver
            .query(By::from(locator))
            .wait(timeout, POLL_INTERVAL)
            .all_from_selector_required()
            .await
            .map_err(|e| wait_error(e, locator, timeout))
    }

    async fn wait_for_clickable(
        &self,
        locator: Locator,
        timeout: Duration,
    ) -> anyhow::Result<WebElement> {
        self.driver
            .query(By::from(locator))
            .wait(timeout, POLL_INTERVAL)
            .and_clickable()
            .first()
            .await
            .map_err(|e| wait_error(e, locator, timeout))
    }

    async fn quit(self) -> anyhow::Result<()> {
        self.driver.quit().await?;
        Ok(())
    }
}

#[async_trait]
impl PageElement for WebElement {
    async fn find(&self, locator: Locator) -> anyhow::Result<Self> {
        Ok(WebElement::find(self, By::from(locator)).await?)
    }

    async fn find_all(&self, locator: Locator) -> anyhow::Result<Vec<Self>> {
        Ok(WebElement::find_all(self, By::from(locator)).await?)
    }

    async fn text(&self) -> anyhow::Result<String> {
        Ok(WebElement::text(self).await?)
    }

    async fn attr(&self, name: &str) -> anyhow::Result<Option<String>> {
        Ok(WebElement::attr(self, name).await?)
    }

    async fn prop(&self, name: &str) -> anyhow::Result<Option<String>> {
        Ok(WebElement::prop(self, name).await?)
    }

    async fn click(&self) -> anyhow::Result<()> {
        Ok(WebElement::click(self).await?)
    }
}
