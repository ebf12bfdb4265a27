use async_trait::async_trait;

/// How an element is addressed on a page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Locator {
    Css(String),
    XPath(String),
}

impl Locator {
    pub fn css(selector: &str) -> Self {
        Locator::Css(selector.to_string())
    }

    pub fn xpath(selector: &str) -> Self {
        Locator::XPath(selector.to_string())
    }
}

#[derive(thiserror::Error, Debug)]
pub enum DriverError {
    /// An expected element is absent; contained at the loop site, never
    /// fatal to a run.
    #[error("element not found: {0}")]
    ElementMissing(String),
    #[error("navigation failed: {0}")]
    Navigation(String),
    /// The browsing session itself is gone; terminates the current run.
    #[error("session lost: {0}")]
    SessionLost(String),
}

impl DriverError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, DriverError::SessionLost(_))
    }
}

/// Capability surface over the interactive browser session. Every structural
/// and cosmetic page interaction the engine performs goes through this
/// trait, so the whole crawl can run against a scripted fake in tests.
#[async_trait]
pub trait PageDriver: Send + Sync {
    async fn goto(&self, url: &str) -> Result<(), DriverError>;
    async fn back(&self) -> Result<(), DriverError>;
    async fn refresh(&self) -> Result<(), DriverError>;
    async fn page_source(&self) -> Result<String, DriverError>;

    async fn exists(&self, locator: &Locator) -> bool;
    async fn text_of(&self, locator: &Locator) -> Result<String, DriverError>;
    async fn texts_of(&self, locator: &Locator) -> Result<Vec<String>, DriverError>;
    async fn attr_of(&self, locator: &Locator, attr: &str)
        -> Result<Option<String>, DriverError>;
    async fn attrs_of(
        &self,
        locator: &Locator,
        attr: &str,
    ) -> Result<Vec<Option<String>>, DriverError>;
    async fn count(&self, locator: &Locator) -> usize;

    async fn click(&self, locator: &Locator) -> Result<(), DriverError>;
    async fn click_nth(&self, locator: &Locator, index: usize) -> Result<(), DriverError>;
    async fn is_enabled(&self, locator: &Locator) -> Result<bool, DriverError>;
    async fn send_keys(&self, locator: &Locator, text: &str) -> Result<(), DriverError>;
    async fn clear(&self, locator: &Locator) -> Result<(), DriverError>;
    async fn hover_nth(&self, locator: &Locator, index: usize) -> Result<(), DriverError>;

    async fn scroll_by(&self, delta_y: i64) -> Result<(), DriverError>;
    async fn scroll_to_end(&self) -> Result<(), DriverError>;

    async fn open_tab(&self, url: &str) -> Result<(), DriverError>;
    async fn close_tab(&self) -> Result<(), DriverError>;
    async fn tab_count(&self) -> usize;
    async fn switch_tab(&self, index: usize) -> Result<(), DriverError>;

    /// Cookies are an opaque serialized blob; only the session manager
    /// reads or writes them.
    async fn export_cookies(&self) -> Result<String, DriverError>;
    async fn import_cookies(&self, blob: &str) -> Result<(), DriverError>;
    async fn clear_cookies(&self) -> Result<(), DriverError>;
}
