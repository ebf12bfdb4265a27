use async_trait::async_trait;
use fake_user_agent::get_chrome_rua;
use thirtyfour::error::WebDriverError;
use thirtyfour::{By, ChromiumLikeCapabilities, DesiredCapabilities, WebDriver};

use super::driver::{DriverError, Locator, PageDriver};

/// The real browser: a Chrome session over WebDriver, set up to look as
/// little like automation as Chrome allows.
pub struct Droid {
    driver: WebDriver,
}

fn map_err(e: WebDriverError) -> DriverError {
    match e {
        WebDriverError::NoSuchElement(info) => DriverError::ElementMissing(format!("{:?}", info)),
        WebDriverError::NoSuchWindow(info) => DriverError::SessionLost(format!("{:?}", info)),
        other => DriverError::Navigation(other.to_string()),
    }
}

fn to_by(locator: &Locator) -> By {
    match locator {
        Locator::Css(selector) => By::Css(selector.as_str()),
        Locator::XPath(selector) => By::XPath(selector.as_str()),
    }
}

impl Droid {
    pub async fn new(webdriver_url: &str) -> Result<Self, DriverError> {
        let mut caps = DesiredCapabilities::chrome();
        caps.add_arg("--window-size=1920,1080").map_err(map_err)?;
        caps.add_arg("--no-sandbox").map_err(map_err)?;
        caps.add_arg("--disable-dev-shm-usage").map_err(map_err)?;
        caps.add_arg("--disable-blink-features=AutomationControlled")
            .map_err(map_err)?;
        caps.add_arg(&format!("--user-agent={}", get_chrome_rua()))
            .map_err(map_err)?;
        caps.add_experimental_option("excludeSwitches", ["enable-automation"])
            .map_err(map_err)?;
        caps.add_experimental_option("useAutomationExtension", false)
            .map_err(map_err)?;

        let driver = WebDriver::new(webdriver_url, caps)
            .await
            .map_err(|e| DriverError::SessionLost(e.to_string()))?;
        driver.maximize_window().await.map_err(map_err)?;

        Ok(Droid { driver })
    }

    pub async fn quit(&self) -> Result<(), DriverError> {
        self.driver.clone().quit().await.map_err(map_err)
    }
}

#[async_trait]
impl PageDriver for Droid {
    async fn goto(&self, url: &str) -> Result<(), DriverError> {
        self.driver.goto(url).await.map_err(map_err)
    }

    async fn back(&self) -> Result<(), DriverError> {
        self.driver.back().await.map_err(map_err)
    }

    async fn refresh(&self) -> Result<(), DriverError> {
        self.driver.refresh().await.map_err(map_err)
    }

    async fn page_source(&self) -> Result<String, DriverError> {
        self.driver.source().await.map_err(map_err)
    }

    async fn exists(&self, locator: &Locator) -> bool {
        self.driver.find(to_by(locator)).await.is_ok()
    }

    async fn text_of(&self, locator: &Locator) -> Result<String, DriverError> {
        let element = self.driver.find(to_by(locator)).await.map_err(map_err)?;
        element.text().await.map_err(map_err)
    }

    async fn texts_of(&self, locator: &Locator) -> Result<Vec<String>, DriverError> {
        let elements = self
            .driver
            .find_all(to_by(locator))
            .await
            .map_err(map_err)?;
        let mut texts = Vec::with_capacity(elements.len());
        for element in elements {
            texts.push(element.text().await.map_err(map_err)?);
        }
        Ok(texts)
    }

    async fn attr_of(
        &self,
        locator: &Locator,
        attr: &str,
    ) -> Result<Option<String>, DriverError> {
        let element = self.driver.find(to_by(locator)).await.map_err(map_err)?;
        element.attr(attr).await.map_err(map_err)
    }

    async fn attrs_of(
        &self,
        locator: &Locator,
        attr: &str,
    ) -> Result<Vec<Option<String>>, DriverError> {
        let elements = self
            .driver
            .find_all(to_by(locator))
            .await
            .map_err(map_err)?;
        let mut attrs = Vec::with_capacity(elements.len());
        for element in elements {
            attrs.push(element.attr(attr).await.map_err(map_err)?);
        }
        Ok(attrs)
    }

    async fn count(&self, locator: &Locator) -> usize {
        self.driver
            .find_all(to_by(locator))
            .await
            .map(|elements| elements.len())
            .unwrap_or(0)
    }

    async fn click(&self, locator: &Locator) -> Result<(), DriverError> {
        let element = self.driver.find(to_by(locator)).await.map_err(map_err)?;
        element.click().await.map_err(map_err)
    }

    async fn click_nth(&self, locator: &Locator, index: usize) -> Result<(), DriverError> {
        let elements = self
            .driver
            .find_all(to_by(locator))
            .await
            .map_err(map_err)?;
        let element = elements
            .get(index)
            .ok_or_else(|| DriverError::ElementMissing(format!("{:?}[{}]", locator, index)))?;
        element.click().await.map_err(map_err)
    }

    async fn is_enabled(&self, locator: &Locator) -> Result<bool, DriverError> {
        let element = self.driver.find(to_by(locator)).await.map_err(map_err)?;
        element.is_enabled().await.map_err(map_err)
    }

    async fn send_keys(&self, locator: &Locator, text: &str) -> Result<(), DriverError> {
        let element = self.driver.find(to_by(locator)).await.map_err(map_err)?;
        element.send_keys(text).await.map_err(map_err)
    }

    async fn clear(&self, locator: &Locator) -> Result<(), DriverError> {
        let element = self.driver.find(to_by(locator)).await.map_err(map_err)?;
        element.clear().await.map_err(map_err)
    }

    async fn hover_nth(&self, locator: &Locator, index: usize) -> Result<(), DriverError> {
        let elements = self
            .driver
            .find_all(to_by(locator))
            .await
            .map_err(map_err)?;
        let element = elements
            .get(index)
            .ok_or_else(|| DriverError::ElementMissing(format!("{:?}[{}]", locator, index)))?;
        self.driver
            .action_chain()
            .move_to_element_center(element)
            .perform()
            .await
            .map_err(map_err)
    }

    async fn scroll_by(&self, delta_y: i64) -> Result<(), DriverError> {
        self.driver
            .execute(
                "window.scrollBy(0, arguments[0]);",
                vec![serde_json::json!(delta_y)],
            )
            .await
            .map_err(map_err)?;
        Ok(())
    }

    async fn scroll_to_end(&self) -> Result<(), DriverError> {
        self.driver
            .execute(
                "window.scrollTo(0, document.body.scrollHeight);",
                Vec::new(),
            )
            .await
            .map_err(map_err)?;
        Ok(())
    }

    async fn open_tab(&self, url: &str) -> Result<(), DriverError> {
        self.driver
            .execute("window.open(arguments[0]);", vec![serde_json::json!(url)])
            .await
            .map_err(map_err)?;
        let handles = self.driver.windows().await.map_err(map_err)?;
        let last = handles
            .last()
            .ok_or_else(|| DriverError::SessionLost("no browser windows".to_string()))?;
        self.driver
            .switch_to_window(last.clone())
            .await
            .map_err(map_err)
    }

    async fn close_tab(&self) -> Result<(), DriverError> {
        self.driver.close_window().await.map_err(map_err)?;
        let handles = self.driver.windows().await.map_err(map_err)?;
        let first = handles
            .first()
            .ok_or_else(|| DriverError::SessionLost("no browser windows".to_string()))?;
        self.driver
            .switch_to_window(first.clone())
            .await
            .map_err(map_err)
    }

    async fn tab_count(&self) -> usize {
        self.driver
            .windows()
            .await
            .map(|handles| handles.len())
            .unwrap_or(0)
    }

    async fn switch_tab(&self, index: usize) -> Result<(), DriverError> {
        let handles = self.driver.windows().await.map_err(map_err)?;
        let handle = handles
            .get(index)
            .ok_or_else(|| DriverError::Navigation(format!("no tab at index {}", index)))?;
        self.driver
            .switch_to_window(handle.clone())
            .await
            .map_err(map_err)
    }

    async fn export_cookies(&self) -> Result<String, DriverError> {
        let cookies = self.driver.get_all_cookies().await.map_err(map_err)?;
        serde_json::to_string(&cookies)
            .map_err(|e| DriverError::Navigation(format!("cookie serialization: {}", e)))
    }

    async fn import_cookies(&self, blob: &str) -> Result<(), DriverError> {
        let cookies: Vec<thirtyfour::Cookie> = serde_json::from_str(blob)
            .map_err(|e| DriverError::Navigation(format!("cookie deserialization: {}", e)))?;
        for cookie in cookies {
            self.driver.add_cookie(cookie).await.map_err(map_err)?;
        }
        Ok(())
    }

    async fn clear_cookies(&self) -> Result<(), DriverError> {
        self.driver.delete_all_cookies().await.map_err(map_err)
    }
}
