//! Remote UI driver seam
//!
//! The workflow only ever talks to the console through [`Driver`]. A locator
//! names one element either in the top-level page or inside an embedded frame
//! identified by the frame element's CSS selector.

use crate::Result;
use crate::cookies::CookieRecord;
use async_trait::async_trait;
use std::fmt;

/// How an element is matched
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Pattern {
    Css(String),
    XPath(String),
}

impl Pattern {
    pub fn as_str(&self) -> &str {
        match self {
            Pattern::Css(selector) | Pattern::XPath(selector) => selector,
        }
    }
}

/// Document an element is searched in
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    Page,
    /// Content document of the frame element matching this CSS selector
    Frame(String),
}

/// Selection pattern plus the document it applies to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locator {
    pub scope: Scope,
    pub pattern: Pattern,
}

impl Locator {
    pub fn css(selector: impl Into<String>) -> Self {
        Self {
            scope: Scope::Page,
            pattern: Pattern::Css(selector.into()),
        }
    }

    pub fn xpath(expression: impl Into<String>) -> Self {
        Self {
            scope: Scope::Page,
            pattern: Pattern::XPath(expression.into()),
        }
    }

    /// Search inside the frame whose element matches `frame_selector`
    pub fn in_frame(mut self, frame_selector: impl Into<String>) -> Self {
        self.scope = Scope::Frame(frame_selector.into());
        self
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.scope {
            Scope::Page => write!(f, "{}", self.pattern.as_str()),
            Scope::Frame(frame) => write!(f, "{} >> {}", frame, self.pattern.as_str()),
        }
    }
}

/// Capability to operate one browsing context
///
/// Element operations act on the first element matching the locator and fail
/// with `Error::ElementNotFound` when nothing matches at the time of the call.
/// Waiting is the caller's concern (see [`crate::ui::Ui`]).
#[async_trait]
pub trait Driver: Send + Sync {
    /// Load `url` and wait for the page to finish loading
    async fn navigate(&self, url: &str) -> Result<()>;

    /// Wait for the navigation triggered by the previous action to settle
    async fn wait_for_navigation(&self) -> Result<()>;

    /// Non-blocking existence check
    async fn exists(&self, locator: &Locator) -> Result<bool>;

    async fn click(&self, locator: &Locator) -> Result<()>;

    async fn focus(&self, locator: &Locator) -> Result<()>;

    /// Clear the value of a form control
    async fn clear(&self, locator: &Locator) -> Result<()>;

    /// Type into whichever element currently has focus
    async fn type_text(&self, text: &str) -> Result<()>;

    async fn text_content(&self, locator: &Locator) -> Result<String>;

    /// Attribute value, or `None` when the element lacks it
    async fn attribute(&self, locator: &Locator, name: &str) -> Result<Option<String>>;

    /// Full cookie jar of the browsing context
    async fn cookies(&self) -> Result<Vec<CookieRecord>>;

    async fn set_cookie(&self, cookie: &CookieRecord) -> Result<()>;

    /// Tear down the browsing context
    async fn close(&self) -> Result<()>;
}
