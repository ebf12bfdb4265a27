use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use super::driver::{DriverError, PageDriver};
use super::pacer::Pacer;
use super::selectors;

const LOGIN_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Owns the authenticated browsing session: liveness check, cookie-jar
/// restore, and the operator-supervised manual login wait.
pub struct SessionManager {
    driver: Arc<dyn PageDriver>,
    pacer: Arc<dyn Pacer>,
    base_url: String,
    cookies_path: PathBuf,
    /// None preserves the indefinite manual-login wait.
    max_login_wait: Option<Duration>,
}

impl SessionManager {
    pub fn new(
        driver: Arc<dyn PageDriver>,
        pacer: Arc<dyn Pacer>,
        base_url: String,
        cookies_path: PathBuf,
        max_login_wait: Option<Duration>,
    ) -> Self {
        SessionManager {
            driver,
            pacer,
            base_url,
            cookies_path,
            max_login_wait,
        }
    }

    /// Returns once an authenticated session is confirmed. Tries, in order:
    /// the session as-is, a cookie-jar restore, and finally blocking until a
    /// human completes login in the visible browser.
    pub async fn ensure_logged_in(&self) -> Result<(), DriverError> {
        self.driver.goto(&self.base_url).await?;
        if self.is_logged_in().await {
            return Ok(());
        }

        if self.restore_from_cookies().await? {
            log::info!("Session restored from persisted cookies");
            return Ok(());
        }

        log::info!("Waiting for manual login in the browser window");
        let mut waited = Duration::ZERO;
        loop {
            if self.is_logged_in().await {
                break;
            }
            if let Some(max_wait) = self.max_login_wait {
                if waited >= max_wait {
                    return Err(DriverError::SessionLost(format!(
                        "manual login did not complete within {:?}",
                        max_wait
                    )));
                }
            }
            self.pacer.wait(LOGIN_POLL_INTERVAL).await;
            waited += LOGIN_POLL_INTERVAL;
        }

        self.persist_cookies().await;
        log::info!("Login detected and cookies saved");
        Ok(())
    }

    pub async fn is_logged_in(&self) -> bool {
        if self.driver.goto(&self.feed_url()).await.is_err() {
            return false;
        }
        self.driver.exists(&selectors::logged_in_marker()).await
    }

    fn feed_url(&self) -> String {
        format!("{}/feed/", self.base_url.trim_end_matches('/'))
    }

    async fn restore_from_cookies(&self) -> Result<bool, DriverError> {
        let Ok(blob) = std::fs::read_to_string(&self.cookies_path) else {
            return Ok(false);
        };

        self.driver.clear_cookies().await?;
        self.driver.goto(&self.base_url).await?;
        if let Err(e) = self.driver.import_cookies(&blob).await {
            log::error!("Could not restore session cookies: {:?}", e);
            return Ok(false);
        }
        self.driver.refresh().await?;

        Ok(self.is_logged_in().await)
    }

    /// Best-effort: a failed write only costs a manual login next run.
    async fn persist_cookies(&self) {
        match self.driver.export_cookies().await {
            Ok(blob) => {
                if let Err(e) = std::fs::write(&self.cookies_path, blob) {
                    log::error!("Could not persist session cookies: {:?}", e);
                }
            }
            Err(e) => log::error!("Could not export session cookies: {:?}", e),
        }
    }
}
