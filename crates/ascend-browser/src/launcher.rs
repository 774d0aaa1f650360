use crate::driver::ChromeDriver;
use crate::{Error, Result};
use chromiumoxide::browser::{Browser, BrowserConfig};
use futures::StreamExt;
use std::path::PathBuf;

/// Starts Chrome with a throwaway profile and hands back a driver for it
pub struct ChromeLauncher {
    chrome_path: PathBuf,
    headless: bool,
    window_size: (u32, u32),
}

impl ChromeLauncher {
    pub fn new(chrome_path: PathBuf) -> Self {
        Self {
            chrome_path,
            headless: true,
            window_size: (1280, 1024),
        }
    }

    pub fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    pub async fn launch(&self) -> Result<ChromeDriver> {
        let profile = tempfile::Builder::new().prefix("ascend-profile-").tempdir()?;
        tracing::debug!("Chrome profile at {}", profile.path().display());

        let mut builder = BrowserConfig::builder()
            .chrome_executable(&self.chrome_path)
            .user_data_dir(profile.path())
            .window_size(self.window_size.0, self.window_size.1)
            .args(self.build_args());
        if !self.headless {
            builder = builder.with_head();
        }
        let config = builder.build().map_err(Error::Browser)?;

        tracing::info!(
            "Launching Chrome ({})",
            if self.headless { "headless" } else { "headful" }
        );
        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| Error::Browser(format!("Failed to launch Chrome: {}", e)))?;

        // Commands only resolve while the handler is polled
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("CDP handler event error (continuing): {}", e);
                }
            }
        });

        let page = browser.new_page("about:blank").await?;

        Ok(ChromeDriver::new(browser, page, handler_task, profile))
    }

    /// Extra command-line switches on top of chromiumoxide's defaults
    ///
    /// The sign-in widget is a cross-origin iframe; keeping it in-process lets
    /// the driver reach it from the page session.
    fn build_args(&self) -> Vec<String> {
        vec![
            "--no-first-run".to_string(),
            "--no-default-browser-check".to_string(),
            "--disable-features=IsolateOrigins,site-per-process".to_string(),
            "--disable-site-isolation-trials".to_string(),
        ]
    }
}
