//! Wait-then-act primitives every workflow step is built from.

use crate::config::{SettlePoint, Timings};
use crate::driver::{Driver, Locator};
use crate::{Error, Result};
use std::time::Duration;
use tokio::time::Instant;

/// Driver handle plus the wait policy of the current run
#[derive(Clone, Copy)]
pub struct Ui<'a> {
    driver: &'a dyn Driver,
    timings: &'a Timings,
}

impl<'a> Ui<'a> {
    pub fn new(driver: &'a dyn Driver, timings: &'a Timings) -> Self {
        Self { driver, timings }
    }

    pub fn driver(&self) -> &'a dyn Driver {
        self.driver
    }

    pub fn timings(&self) -> &'a Timings {
        self.timings
    }

    /// Non-blocking existence check
    pub async fn exists(&self, locator: &Locator) -> Result<bool> {
        self.driver.exists(locator).await
    }

    /// Poll until `locator` matches or `timeout` elapses
    ///
    /// The element is checked at least once, even with a zero timeout.
    pub async fn appears_within(&self, locator: &Locator, timeout: Duration) -> Result<bool> {
        Ok(self.first_within(&[locator], timeout).await?.is_some())
    }

    /// Poll until one of `locators` matches, returning its index
    pub async fn first_within(
        &self,
        locators: &[&Locator],
        timeout: Duration,
    ) -> Result<Option<usize>> {
        let deadline = Instant::now() + timeout;

        loop {
            for (index, locator) in locators.iter().enumerate() {
                if self.driver.exists(locator).await? {
                    return Ok(Some(index));
                }
            }

            if Instant::now() >= deadline {
                return Ok(None);
            }

            tokio::time::sleep(self.timings.poll_interval).await;
        }
    }

    /// Wait for a required element
    pub async fn wait_for(&self, locator: &Locator) -> Result<()> {
        tracing::debug!("Waiting for {}", locator);

        if self.appears_within(locator, self.timings.element_timeout).await? {
            Ok(())
        } else {
            Err(Error::ElementNotFound(locator.to_string()))
        }
    }

    /// Wait for whichever of `locators` appears first
    pub async fn wait_for_any(&self, locators: &[&Locator]) -> Result<usize> {
        match self
            .first_within(locators, self.timings.element_timeout)
            .await?
        {
            Some(index) => Ok(index),
            None => Err(Error::ElementNotFound(
                locators
                    .iter()
                    .map(|l| l.to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
            )),
        }
    }

    pub async fn click(&self, locator: &Locator) -> Result<()> {
        self.wait_for(locator).await?;
        tracing::debug!("Clicking {}", locator);
        self.driver.click(locator).await
    }

    /// Focus a field and type into it
    pub async fn fill(&self, locator: &Locator, text: &str) -> Result<()> {
        self.wait_for(locator).await?;
        self.driver.focus(locator).await?;
        self.driver.type_text(text).await
    }

    /// Clear a field's current value, then type into it
    pub async fn replace(&self, locator: &Locator, text: &str) -> Result<()> {
        self.wait_for(locator).await?;
        self.driver.clear(locator).await?;
        self.driver.focus(locator).await?;
        self.driver.type_text(text).await
    }

    pub async fn text(&self, locator: &Locator) -> Result<String> {
        self.wait_for(locator).await?;
        self.driver.text_content(locator).await
    }

    pub async fn attribute(&self, locator: &Locator, name: &str) -> Result<Option<String>> {
        self.wait_for(locator).await?;
        self.driver.attribute(locator, name).await
    }

    pub async fn wait_for_navigation(&self) -> Result<()> {
        tracing::debug!("Waiting for navigation");
        self.driver.wait_for_navigation().await
    }

    /// Fixed delay at a known call site
    pub async fn settle(&self, point: SettlePoint) {
        let delay = self.timings.settle(point);
        if !delay.is_zero() {
            tracing::debug!("Settling {:?} for {:?}", point, delay);
            tokio::time::sleep(delay).await;
        }
    }
}
