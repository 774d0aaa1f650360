use crate::script::{self, ElementAction, Probe};
use crate::{Error, Result};
use ascend_core::cookies::CookieRecord;
use ascend_core::{Driver, Locator, Scope};
use async_trait::async_trait;
use chromiumoxide::browser::Browser;
use chromiumoxide::cdp::browser_protocol::dom::DescribeNodeParams;
use chromiumoxide::cdp::browser_protocol::input::InsertTextParams;
use chromiumoxide::cdp::browser_protocol::network::{
    CookieParam, CookieSameSite, SetCookiesParams, TimeSinceEpoch,
};
use chromiumoxide::cdp::browser_protocol::page::CreateIsolatedWorldParams;
use chromiumoxide::cdp::browser_protocol::storage::GetCookiesParams;
use chromiumoxide::cdp::js_protocol::runtime::{EvaluateParams, ExecutionContextId};
use chromiumoxide::Page;
use serde_json::Value;
use std::collections::HashMap;
use tempfile::TempDir;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

const WORLD_NAME: &str = "ascend";

/// One Chrome tab driven over CDP
///
/// Frame-scoped locators are evaluated in an isolated world created inside
/// the frame, cached per frame id.
pub struct ChromeDriver {
    browser: Mutex<Option<Browser>>,
    page: Page,
    handler: Mutex<Option<JoinHandle<()>>>,
    contexts: Mutex<HashMap<String, ExecutionContextId>>,
    _profile: TempDir,
}

impl ChromeDriver {
    pub(crate) fn new(
        browser: Browser,
        page: Page,
        handler: JoinHandle<()>,
        profile: TempDir,
    ) -> Self {
        Self {
            browser: Mutex::new(Some(browser)),
            page,
            handler: Mutex::new(Some(handler)),
            contexts: Mutex::new(HashMap::new()),
            _profile: profile,
        }
    }

    async fn evaluate(
        &self,
        expression: String,
        context: Option<ExecutionContextId>,
    ) -> Result<Value> {
        let mut params = EvaluateParams::builder()
            .expression(expression)
            .return_by_value(true)
            .await_promise(true);
        if let Some(context) = context {
            params = params.context_id(context);
        }
        let params = params.build().map_err(Error::Cdp)?;

        let response = self.page.execute(params).await?;
        if let Some(exception) = &response.result.exception_details {
            return Err(Error::Script(exception.text.clone()));
        }

        Ok(response.result.result.value.clone().unwrap_or(Value::Null))
    }

    /// Isolated world inside the frame matched by `frame_selector`
    ///
    /// `None` when the frame element is absent or has no content frame yet.
    async fn frame_context(
        &self,
        frame_selector: &str,
    ) -> Result<Option<(String, ExecutionContextId)>> {
        let lookup = EvaluateParams::builder()
            .expression(script::frame_element(frame_selector))
            .build()
            .map_err(Error::Cdp)?;
        let element = self.page.execute(lookup).await?;
        let Some(object_id) = element.result.result.object_id.clone() else {
            return Ok(None);
        };

        let node = self
            .page
            .execute(DescribeNodeParams::builder().object_id(object_id).build())
            .await?;
        let Some(frame_id) = node.result.node.frame_id.clone() else {
            return Ok(None);
        };

        let key = frame_id.inner().clone();
        if let Some(context) = self.contexts.lock().await.get(&key) {
            return Ok(Some((key, context.clone())));
        }

        let world = CreateIsolatedWorldParams::builder()
            .frame_id(frame_id)
            .world_name(WORLD_NAME)
            .build()
            .map_err(Error::Cdp)?;
        let created = self.page.execute(world).await?;
        let context = created.result.execution_context_id.clone();
        tracing::debug!("Created isolated world in frame {} ({})", frame_selector, key);

        self.contexts.lock().await.insert(key.clone(), context.clone());
        Ok(Some((key, context)))
    }

    /// Run an element script where `locator` is scoped
    ///
    /// A missing frame yields a not-found probe.
    async fn probe(&self, locator: &Locator, action: ElementAction) -> Result<Probe> {
        let expression = script::element_script(&locator.pattern, &action);

        let value = match &locator.scope {
            Scope::Page => self.evaluate(expression, None).await?,
            Scope::Frame(frame) => {
                let Some((key, context)) = self.frame_context(frame).await? else {
                    return Ok(Probe::default());
                };
                match self.evaluate(expression.clone(), Some(context)).await {
                    // The frame navigated since the world was created
                    Err(Error::Cdp(e)) => {
                        tracing::debug!("Stale context for frame {}: {}", key, e);
                        self.contexts.lock().await.remove(&key);
                        let Some((_, context)) = self.frame_context(frame).await? else {
                            return Ok(Probe::default());
                        };
                        self.evaluate(expression, Some(context)).await?
                    }
                    other => other?,
                }
            }
        };

        Ok(serde_json::from_value(value)?)
    }

    async fn act(&self, locator: &Locator, action: ElementAction) -> ascend_core::Result<Probe> {
        let probe = self.probe(locator, action).await?;
        if probe.found {
            Ok(probe)
        } else {
            Err(ascend_core::Error::ElementNotFound(locator.to_string()))
        }
    }
}

#[async_trait]
impl Driver for ChromeDriver {
    async fn navigate(&self, url: &str) -> ascend_core::Result<()> {
        tracing::debug!("Navigating to {}", url);
        self.page.goto(url).await.map_err(Error::from)?;
        Ok(())
    }

    async fn wait_for_navigation(&self) -> ascend_core::Result<()> {
        self.page.wait_for_navigation().await.map_err(Error::from)?;
        Ok(())
    }

    async fn exists(&self, locator: &Locator) -> ascend_core::Result<bool> {
        Ok(self.probe(locator, ElementAction::Exists).await?.found)
    }

    async fn click(&self, locator: &Locator) -> ascend_core::Result<()> {
        self.act(locator, ElementAction::Click).await?;
        Ok(())
    }

    async fn focus(&self, locator: &Locator) -> ascend_core::Result<()> {
        self.act(locator, ElementAction::Focus).await?;
        Ok(())
    }

    async fn clear(&self, locator: &Locator) -> ascend_core::Result<()> {
        self.act(locator, ElementAction::Clear).await?;
        Ok(())
    }

    async fn type_text(&self, text: &str) -> ascend_core::Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        self.page
            .execute(InsertTextParams::new(text))
            .await
            .map_err(Error::from)?;
        Ok(())
    }

    async fn text_content(&self, locator: &Locator) -> ascend_core::Result<String> {
        let probe = self.act(locator, ElementAction::Text).await?;
        Ok(probe.value.as_str().unwrap_or_default().to_string())
    }

    async fn attribute(
        &self,
        locator: &Locator,
        name: &str,
    ) -> ascend_core::Result<Option<String>> {
        let probe = self
            .act(locator, ElementAction::Attribute(name.to_string()))
            .await?;
        Ok(probe.value.as_str().map(str::to_string))
    }

    async fn cookies(&self) -> ascend_core::Result<Vec<CookieRecord>> {
        let response = self
            .page
            .execute(jar_params())
            .await
            .map_err(Error::from)?;

        let mut records = Vec::with_capacity(response.result.cookies.len());
        for cookie in &response.result.cookies {
            let value = serde_json::to_value(cookie).map_err(Error::from)?;
            records.push(serde_json::from_value(value).map_err(Error::from)?);
        }
        Ok(records)
    }

    async fn set_cookie(&self, cookie: &CookieRecord) -> ascend_core::Result<()> {
        let param = cookie_param(cookie)?;
        self.page
            .execute(SetCookiesParams::new(vec![param]))
            .await
            .map_err(Error::from)?;
        Ok(())
    }

    async fn close(&self) -> ascend_core::Result<()> {
        let Some(mut browser) = self.browser.lock().await.take() else {
            return Ok(());
        };

        let closed = browser.close().await.map_err(Error::from);
        if let Err(e) = browser.wait().await {
            tracing::debug!("Chrome did not exit cleanly: {}", e);
        }
        if let Some(handler) = self.handler.lock().await.take() {
            handler.abort();
        }

        closed?;
        Ok(())
    }
}

/// Every cookie of the browser context, not only those sent to the current page
fn jar_params() -> GetCookiesParams {
    GetCookiesParams::default()
}

fn cookie_param(cookie: &CookieRecord) -> Result<CookieParam> {
    let mut builder = CookieParam::builder()
        .name(cookie.name.clone())
        .value(cookie.value.clone())
        .domain(cookie.domain.clone())
        .path(cookie.path.clone())
        .secure(cookie.secure)
        .http_only(cookie.http_only);

    if !cookie.session && cookie.expires > 0.0 {
        builder = builder.expires(TimeSinceEpoch::new(cookie.expires));
    }
    if let Some(same_site) = cookie
        .same_site
        .as_deref()
        .and_then(|s| s.parse::<CookieSameSite>().ok())
    {
        builder = builder.same_site(same_site);
    }

    builder.build().map_err(Error::Cdp)
}
