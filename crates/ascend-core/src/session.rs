use crate::contract;
use crate::cookies::CookieStore;
use crate::driver::Driver;
use crate::Result;

/// Cookie persistence and sign-in state of the browsing context
pub struct Session<'a> {
    driver: &'a dyn Driver,
    store: &'a CookieStore,
}

impl<'a> Session<'a> {
    pub fn new(driver: &'a dyn Driver, store: &'a CookieStore) -> Self {
        Self { driver, store }
    }

    /// Replay persisted cookies into the context in file order
    ///
    /// Without a cookie file this does nothing.
    pub async fn load_cookies(&self) -> Result<usize> {
        tracing::debug!("Loading cookies");

        let Some(cookies) = self.store.load()? else {
            return Ok(0);
        };

        for cookie in &cookies {
            self.driver.set_cookie(cookie).await?;
        }

        Ok(cookies.len())
    }

    /// Overwrite the cookie file with the context's current cookie jar
    pub async fn save_cookies(&self) -> Result<usize> {
        tracing::debug!("Saving cookies");

        let cookies = self.driver.cookies().await?;
        self.store.save(&cookies)?;

        Ok(cookies.len())
    }

    pub async fn is_login_form(&self) -> Result<bool> {
        self.driver.exists(&contract::auth_frame()).await
    }

    pub async fn is_home_page(&self) -> Result<bool> {
        self.driver.exists(&contract::home_page()).await
    }
}
