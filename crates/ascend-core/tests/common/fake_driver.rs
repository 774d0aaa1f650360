//! In-memory driver for workflow tests
//!
//! Not every helper is used by every test binary.

#![allow(dead_code)]

use ascend_core::cookies::CookieRecord;
use ascend_core::{Driver, Error, Locator, Result};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// Recorded driver call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Navigate(String),
    WaitForNavigation,
    Click(String),
    Focus(String),
    Clear(String),
    Type(String),
    SetCookie(String),
    Close,
}

/// Scripted console page
///
/// Elements exist when their locator has been shown. Clicking an element can
/// reveal further elements, which is enough to model the console's dialogs.
#[derive(Default)]
pub struct FakeDriver {
    present: Mutex<HashSet<String>>,
    texts: Mutex<HashMap<String, String>>,
    attributes: Mutex<HashMap<(String, String), String>>,
    reveals: Mutex<HashMap<String, Vec<String>>>,
    jar: Mutex<Vec<CookieRecord>>,
    actions: Mutex<Vec<Action>>,
    // Failure injection
    error_on_click: Mutex<Option<(String, String)>>,
    panic_on_click: Mutex<Option<String>>,
    error_on_close: Mutex<bool>,
}

impl FakeDriver {
    pub fn new() -> Self {
        Self::default()
    }

    // === Page setup ===

    pub fn show(&self, locator: &Locator) -> &Self {
        self.present.lock().unwrap().insert(locator.to_string());
        self
    }

    pub fn hide(&self, locator: &Locator) -> &Self {
        self.present.lock().unwrap().remove(&locator.to_string());
        self
    }

    pub fn set_text(&self, locator: &Locator, text: &str) -> &Self {
        self.show(locator);
        self.texts
            .lock()
            .unwrap()
            .insert(locator.to_string(), text.to_string());
        self
    }

    pub fn set_attribute(&self, locator: &Locator, name: &str, value: &str) -> &Self {
        self.show(locator);
        self.attributes
            .lock()
            .unwrap()
            .insert((locator.to_string(), name.to_string()), value.to_string());
        self
    }

    /// Make `revealed` appear once `clicked` is clicked
    pub fn reveal_on_click(&self, clicked: &Locator, revealed: &Locator) -> &Self {
        self.reveals
            .lock()
            .unwrap()
            .entry(clicked.to_string())
            .or_default()
            .push(revealed.to_string());
        self
    }

    pub fn set_jar(&self, cookies: Vec<CookieRecord>) -> &Self {
        *self.jar.lock().unwrap() = cookies;
        self
    }

    // === Error injection ===

    pub fn fail_click(&self, locator: &Locator, msg: &str) {
        *self.error_on_click.lock().unwrap() = Some((locator.to_string(), msg.to_string()));
    }

    pub fn panic_click(&self, locator: &Locator) {
        *self.panic_on_click.lock().unwrap() = Some(locator.to_string());
    }

    pub fn fail_close(&self) {
        *self.error_on_close.lock().unwrap() = true;
    }

    // === Call verification ===

    pub fn jar(&self) -> Vec<CookieRecord> {
        self.jar.lock().unwrap().clone()
    }

    pub fn actions(&self) -> Vec<Action> {
        self.actions.lock().unwrap().clone()
    }

    pub fn clicks(&self) -> Vec<String> {
        self.actions()
            .into_iter()
            .filter_map(|a| match a {
                Action::Click(target) => Some(target),
                _ => None,
            })
            .collect()
    }

    pub fn typed(&self) -> Vec<String> {
        self.actions()
            .into_iter()
            .filter_map(|a| match a {
                Action::Type(text) => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn navigations(&self) -> usize {
        self.actions()
            .iter()
            .filter(|a| matches!(a, Action::WaitForNavigation | Action::Navigate(_)))
            .count()
    }

    pub fn was_clicked(&self, locator: &Locator) -> bool {
        self.clicks().contains(&locator.to_string())
    }

    pub fn was_closed(&self) -> bool {
        self.actions().contains(&Action::Close)
    }

    fn record(&self, action: Action) {
        self.actions.lock().unwrap().push(action);
    }

    fn require(&self, locator: &Locator) -> Result<String> {
        let key = locator.to_string();
        if self.present.lock().unwrap().contains(&key) {
            Ok(key)
        } else {
            Err(Error::ElementNotFound(key))
        }
    }
}

#[async_trait]
impl Driver for FakeDriver {
    async fn navigate(&self, url: &str) -> Result<()> {
        self.record(Action::Navigate(url.to_string()));
        Ok(())
    }

    async fn wait_for_navigation(&self) -> Result<()> {
        self.record(Action::WaitForNavigation);
        Ok(())
    }

    async fn exists(&self, locator: &Locator) -> Result<bool> {
        Ok(self.present.lock().unwrap().contains(&locator.to_string()))
    }

    async fn click(&self, locator: &Locator) -> Result<()> {
        let key = self.require(locator)?;

        let should_panic = self.panic_on_click.lock().unwrap().as_deref() == Some(key.as_str());
        if should_panic {
            panic!("injected panic clicking {}", key);
        }
        if let Some((target, msg)) = self.error_on_click.lock().unwrap().as_ref() {
            if *target == key {
                return Err(Error::Driver(msg.clone()));
            }
        }

        self.record(Action::Click(key.clone()));

        let revealed = self.reveals.lock().unwrap().get(&key).cloned();
        if let Some(revealed) = revealed {
            self.present.lock().unwrap().extend(revealed);
        }
        Ok(())
    }

    async fn focus(&self, locator: &Locator) -> Result<()> {
        let key = self.require(locator)?;
        self.record(Action::Focus(key));
        Ok(())
    }

    async fn clear(&self, locator: &Locator) -> Result<()> {
        let key = self.require(locator)?;
        self.record(Action::Clear(key));
        Ok(())
    }

    async fn type_text(&self, text: &str) -> Result<()> {
        self.record(Action::Type(text.to_string()));
        Ok(())
    }

    async fn text_content(&self, locator: &Locator) -> Result<String> {
        let key = self.require(locator)?;
        Ok(self.texts.lock().unwrap().get(&key).cloned().unwrap_or_default())
    }

    async fn attribute(&self, locator: &Locator, name: &str) -> Result<Option<String>> {
        let key = self.require(locator)?;
        Ok(self
            .attributes
            .lock()
            .unwrap()
            .get(&(key, name.to_string()))
            .cloned())
    }

    async fn cookies(&self) -> Result<Vec<CookieRecord>> {
        Ok(self.jar())
    }

    async fn set_cookie(&self, cookie: &CookieRecord) -> Result<()> {
        self.record(Action::SetCookie(cookie.name.clone()));
        self.jar.lock().unwrap().push(cookie.clone());
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        self.record(Action::Close);
        if *self.error_on_close.lock().unwrap() {
            return Err(Error::Driver("browser already gone".to_string()));
        }
        Ok(())
    }
}
