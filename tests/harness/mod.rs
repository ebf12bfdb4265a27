#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use magnet::services::driver::{DriverError, Locator, PageDriver};
use magnet::services::pacer::Pacer;
use magnet::services::selectors;

pub const EXPORTED_COOKIE_BLOB: &str = "[{\"name\":\"li_at\",\"value\":\"fake\"}]";

/// One scripted page: element lists keyed by the same locators the engine
/// uses, plus optional click navigation and a page-source sequence (later
/// sources replace earlier ones on each read, for robot-check simulation).
#[derive(Default, Clone)]
pub struct FakePage {
    pub sources: Vec<String>,
    pub texts: HashMap<Locator, Vec<String>>,
    pub attrs: HashMap<(Locator, String), Vec<Option<String>>>,
    pub clickable: HashMap<Locator, usize>,
    pub click_nav: HashMap<Locator, String>,
    pub disabled: Vec<Locator>,
}

impl FakePage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source(mut self, source: &str) -> Self {
        self.sources = vec![source.to_string()];
        self
    }

    pub fn sources(mut self, sources: Vec<&str>) -> Self {
        self.sources = sources.into_iter().map(str::to_string).collect();
        self
    }

    pub fn texts(mut self, locator: Locator, texts: Vec<&str>) -> Self {
        self.texts
            .insert(locator, texts.into_iter().map(str::to_string).collect());
        self
    }

    pub fn attrs(mut self, locator: Locator, attr: &str, values: Vec<Option<&str>>) -> Self {
        self.attrs.insert(
            (locator, attr.to_string()),
            values.into_iter().map(|v| v.map(str::to_string)).collect(),
        );
        self
    }

    pub fn clickable(mut self, locator: Locator) -> Self {
        self.clickable.insert(locator, 1);
        self
    }

    pub fn clickable_many(mut self, locator: Locator, count: usize) -> Self {
        self.clickable.insert(locator, count);
        self
    }

    pub fn click_nav(mut self, locator: Locator, target: &str) -> Self {
        self.click_nav.insert(locator, target.to_string());
        self
    }

    pub fn disabled(mut self, locator: Locator) -> Self {
        self.disabled.push(locator);
        self
    }
}

/// Session behavior knobs: whether the fake browser considers itself
/// authenticated, which cookie blob restores a session, and how many
/// logged-in checks fail before a simulated manual login completes.
#[derive(Default)]
struct SessionSim {
    authenticated: AtomicBool,
    valid_cookie_blob: Mutex<Option<String>>,
    login_after_checks: AtomicI32,
}

/// Scripted stand-in for the WebDriver session. Pages are keyed by URL;
/// navigation to an unscripted URL lands on a blank page where every lookup
/// fails the way a missing element would.
pub struct FakeDriver {
    pages: Mutex<HashMap<String, FakePage>>,
    source_cursors: Mutex<HashMap<String, usize>>,
    tabs: Mutex<Vec<String>>,
    current: Mutex<usize>,
    session: SessionSim,
    pub clicks: Mutex<Vec<(String, Locator)>>,
    pub typed: Mutex<Vec<(String, Locator, String)>>,
}

impl FakeDriver {
    pub fn new(start_url: &str) -> Self {
        FakeDriver {
            pages: Mutex::new(HashMap::new()),
            source_cursors: Mutex::new(HashMap::new()),
            tabs: Mutex::new(vec![start_url.to_string()]),
            current: Mutex::new(0),
            session: SessionSim {
                authenticated: AtomicBool::new(true),
                valid_cookie_blob: Mutex::new(None),
                login_after_checks: AtomicI32::new(-1),
            },
            clicks: Mutex::new(vec![]),
            typed: Mutex::new(vec![]),
        }
    }

    pub fn add_page(&self, url: &str, page: FakePage) {
        self.pages.lock().unwrap().insert(url.to_string(), page);
    }

    pub fn set_authenticated(&self, value: bool) {
        self.session.authenticated.store(value, Ordering::Relaxed);
    }

    pub fn authenticated(&self) -> bool {
        self.session.authenticated.load(Ordering::Relaxed)
    }

    pub fn set_valid_cookie_blob(&self, blob: &str) {
        *self.session.valid_cookie_blob.lock().unwrap() = Some(blob.to_string());
    }

    /// The next `checks` logged-in probes fail, then the session counts as
    /// authenticated (simulating an operator completing login).
    pub fn login_after_checks(&self, checks: i32) {
        self.session
            .login_after_checks
            .store(checks, Ordering::Relaxed);
    }

    pub fn current_url(&self) -> String {
        let tabs = self.tabs.lock().unwrap();
        tabs[*self.current.lock().unwrap()].clone()
    }

    pub fn clicks_on(&self, locator: &Locator) -> usize {
        self.clicks
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, l)| l == locator)
            .count()
    }

    pub fn typed_into(&self, locator: &Locator) -> String {
        self.typed
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, l, _)| l == locator)
            .map(|(_, _, text)| text.as_str())
            .collect()
    }

    fn logged_in_probe(&self) -> bool {
        if self.session.authenticated.load(Ordering::Relaxed) {
            return true;
        }
        let remaining = self.session.login_after_checks.load(Ordering::Relaxed);
        if remaining < 0 {
            return false;
        }
        if remaining == 0 {
            self.session.authenticated.store(true, Ordering::Relaxed);
            return true;
        }
        self.session
            .login_after_checks
            .store(remaining - 1, Ordering::Relaxed);
        false
    }

    fn with_page<T>(&self, f: impl FnOnce(Option<&FakePage>) -> T) -> T {
        let url = self.current_url();
        let pages = self.pages.lock().unwrap();
        f(pages.get(&url))
    }

    fn element_count(page: &FakePage, locator: &Locator) -> usize {
        if let Some(texts) = page.texts.get(locator) {
            return texts.len();
        }
        if let Some((_, values)) = page.attrs.iter().find(|((l, _), _)| l == locator) {
            return values.len();
        }
        if let Some(count) = page.clickable.get(locator) {
            return *count;
        }
        if page.click_nav.contains_key(locator) {
            return 1;
        }
        0
    }

    fn navigate_current(&self, url: &str) {
        let mut tabs = self.tabs.lock().unwrap();
        let current = *self.current.lock().unwrap();
        tabs[current] = url.to_string();
    }
}

#[async_trait]
impl PageDriver for FakeDriver {
    async fn goto(&self, url: &str) -> Result<(), DriverError> {
        self.navigate_current(url);
        Ok(())
    }

    async fn back(&self) -> Result<(), DriverError> {
        Ok(())
    }

    async fn refresh(&self) -> Result<(), DriverError> {
        Ok(())
    }

    async fn page_source(&self) -> Result<String, DriverError> {
        let url = self.current_url();
        let source = self.with_page(|page| {
            let Some(page) = page else {
                return String::new();
            };
            if page.sources.is_empty() {
                return String::new();
            }
            let mut cursors = self.source_cursors.lock().unwrap();
            let cursor = cursors.entry(url.clone()).or_insert(0);
            let source = page.sources[(*cursor).min(page.sources.len() - 1)].clone();
            if *cursor + 1 < page.sources.len() {
                *cursor += 1;
            }
            source
        });
        Ok(source)
    }

    async fn exists(&self, locator: &Locator) -> bool {
        if *locator == selectors::logged_in_marker() {
            return self.logged_in_probe();
        }
        self.with_page(|page| {
            page.map(|p| Self::element_count(p, locator) > 0)
                .unwrap_or(false)
        })
    }

    async fn text_of(&self, locator: &Locator) -> Result<String, DriverError> {
        self.with_page(|page| {
            page.and_then(|p| p.texts.get(locator))
                .and_then(|texts| texts.first().cloned())
                .ok_or_else(|| DriverError::ElementMissing(format!("{:?}", locator)))
        })
    }

    async fn texts_of(&self, locator: &Locator) -> Result<Vec<String>, DriverError> {
        self.with_page(|page| {
            page.and_then(|p| p.texts.get(locator))
                .cloned()
                .ok_or_else(|| DriverError::ElementMissing(format!("{:?}", locator)))
        })
    }

    async fn attr_of(
        &self,
        locator: &Locator,
        attr: &str,
    ) -> Result<Option<String>, DriverError> {
        self.attrs_of(locator, attr)
            .await?
            .first()
            .cloned()
            .ok_or_else(|| DriverError::ElementMissing(format!("{:?}", locator)))
    }

    async fn attrs_of(
        &self,
        locator: &Locator,
        attr: &str,
    ) -> Result<Vec<Option<String>>, DriverError> {
        self.with_page(|page| {
            page.and_then(|p| p.attrs.get(&(locator.clone(), attr.to_string())))
                .cloned()
                .ok_or_else(|| DriverError::ElementMissing(format!("{:?}", locator)))
        })
    }

    async fn count(&self, locator: &Locator) -> usize {
        self.with_page(|page| page.map(|p| Self::element_count(p, locator)).unwrap_or(0))
    }

    async fn click(&self, locator: &Locator) -> Result<(), DriverError> {
        let url = self.current_url();
        let target = self.with_page(|page| {
            let Some(page) = page else {
                return Err(DriverError::ElementMissing(format!("{:?}", locator)));
            };
            if let Some(target) = page.click_nav.get(locator) {
                return Ok(Some(target.clone()));
            }
            if Self::element_count(page, locator) > 0 {
                return Ok(None);
            }
            Err(DriverError::ElementMissing(format!("{:?}", locator)))
        })?;

        self.clicks.lock().unwrap().push((url, locator.clone()));
        if let Some(target) = target {
            self.navigate_current(&target);
        }
        Ok(())
    }

    async fn click_nth(&self, locator: &Locator, index: usize) -> Result<(), DriverError> {
        let available = self.count(locator).await;
        if index >= available {
            return Err(DriverError::ElementMissing(format!(
                "{:?}[{}]",
                locator, index
            )));
        }
        self.click(locator).await
    }

    async fn is_enabled(&self, locator: &Locator) -> Result<bool, DriverError> {
        self.with_page(|page| {
            let Some(page) = page else {
                return Err(DriverError::ElementMissing(format!("{:?}", locator)));
            };
            if Self::element_count(page, locator) == 0 {
                return Err(DriverError::ElementMissing(format!("{:?}", locator)));
            }
            Ok(!page.disabled.contains(locator))
        })
    }

    async fn send_keys(&self, locator: &Locator, text: &str) -> Result<(), DriverError> {
        let url = self.current_url();
        let present = self.with_page(|page| {
            page.map(|p| Self::element_count(p, locator) > 0)
                .unwrap_or(false)
        });
        if !present {
            return Err(DriverError::ElementMissing(format!("{:?}", locator)));
        }
        self.typed
            .lock()
            .unwrap()
            .push((url, locator.clone(), text.to_string()));
        Ok(())
    }

    async fn clear(&self, locator: &Locator) -> Result<(), DriverError> {
        let present = self.with_page(|page| {
            page.map(|p| Self::element_count(p, locator) > 0)
                .unwrap_or(false)
        });
        if present {
            Ok(())
        } else {
            Err(DriverError::ElementMissing(format!("{:?}", locator)))
        }
    }

    async fn hover_nth(&self, locator: &Locator, index: usize) -> Result<(), DriverError> {
        let available = self.count(locator).await;
        if index >= available {
            return Err(DriverError::ElementMissing(format!(
                "{:?}[{}]",
                locator, index
            )));
        }
        Ok(())
    }

    async fn scroll_by(&self, _delta_y: i64) -> Result<(), DriverError> {
        Ok(())
    }

    async fn scroll_to_end(&self) -> Result<(), DriverError> {
        Ok(())
    }

    async fn open_tab(&self, url: &str) -> Result<(), DriverError> {
        let mut tabs = self.tabs.lock().unwrap();
        tabs.push(url.to_string());
        *self.current.lock().unwrap() = tabs.len() - 1;
        Ok(())
    }

    async fn close_tab(&self) -> Result<(), DriverError> {
        let mut tabs = self.tabs.lock().unwrap();
        if tabs.len() > 1 {
            let current = *self.current.lock().unwrap();
            tabs.remove(current);
            *self.current.lock().unwrap() = 0;
        }
        Ok(())
    }

    async fn tab_count(&self) -> usize {
        self.tabs.lock().unwrap().len()
    }

    async fn switch_tab(&self, index: usize) -> Result<(), DriverError> {
        let tabs = self.tabs.lock().unwrap();
        if index >= tabs.len() {
            return Err(DriverError::Navigation(format!("no tab at index {}", index)));
        }
        *self.current.lock().unwrap() = index;
        Ok(())
    }

    async fn export_cookies(&self) -> Result<String, DriverError> {
        Ok(EXPORTED_COOKIE_BLOB.to_string())
    }

    async fn import_cookies(&self, blob: &str) -> Result<(), DriverError> {
        let valid = self.session.valid_cookie_blob.lock().unwrap();
        if valid.as_deref() == Some(blob) {
            self.session.authenticated.store(true, Ordering::Relaxed);
        }
        Ok(())
    }

    async fn clear_cookies(&self) -> Result<(), DriverError> {
        self.session.authenticated.store(false, Ordering::Relaxed);
        Ok(())
    }
}

/// Records every requested wait instead of sleeping.
#[derive(Default)]
pub struct NoopPacer {
    pub waits: Mutex<Vec<Duration>>,
}

impl NoopPacer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn waits_of(&self, duration: Duration) -> usize {
        self.waits
            .lock()
            .unwrap()
            .iter()
            .filter(|d| **d == duration)
            .count()
    }
}

#[async_trait]
impl Pacer for NoopPacer {
    async fn wait(&self, duration: Duration) {
        self.waits.lock().unwrap().push(duration);
    }
}

/// The same company-search URL the navigator builds.
pub fn search_url(base: &str, industry: &str) -> String {
    let mut url = url::Url::parse(base).expect("valid base url");
    url.set_path("/search/results/companies/");
    url.query_pairs_mut()
        .append_pair("keywords", industry)
        .append_pair("origin", "GLOBAL_SEARCH_HEADER");
    url.to_string()
}

pub struct PersonSpec {
    pub name: String,
    pub title: String,
    pub profile_url: String,
    pub about: String,
    pub posts: Vec<String>,
}

impl PersonSpec {
    pub fn new(name: &str, title: &str, profile_url: &str) -> Self {
        PersonSpec {
            name: name.to_string(),
            title: title.to_string(),
            profile_url: profile_url.to_string(),
            about: String::new(),
            posts: vec![],
        }
    }

    pub fn about(mut self, about: &str) -> Self {
        self.about = about.to_string();
        self
    }

    pub fn posts(mut self, posts: Vec<&str>) -> Self {
        self.posts = posts.into_iter().map(str::to_string).collect();
        self
    }
}

pub struct CompanySpec {
    pub name: String,
    pub url: String,
    pub website: Option<String>,
    pub employees_text: Option<String>,
    pub jobs_text: Option<String>,
    pub posts: Vec<String>,
    pub people: Vec<PersonSpec>,
}

impl CompanySpec {
    pub fn new(name: &str, url: &str) -> Self {
        CompanySpec {
            name: name.to_string(),
            url: url.to_string(),
            website: None,
            employees_text: None,
            jobs_text: None,
            posts: vec![],
            people: vec![],
        }
    }

    pub fn website(mut self, website: &str) -> Self {
        self.website = Some(website.to_string());
        self
    }

    pub fn employees(mut self, text: &str) -> Self {
        self.employees_text = Some(text.to_string());
        self
    }

    pub fn jobs(mut self, text: &str) -> Self {
        self.jobs_text = Some(text.to_string());
        self
    }

    pub fn posts(mut self, posts: Vec<&str>) -> Self {
        self.posts = posts.into_iter().map(str::to_string).collect();
        self
    }

    pub fn person(mut self, person: PersonSpec) -> Self {
        self.people.push(person);
        self
    }
}

fn sub_view_navs(company_url: &str, page: FakePage) -> FakePage {
    page.click_nav(selectors::about_tab(), &format!("{}/about", company_url))
        .click_nav(selectors::jobs_tab(), &format!("{}/jobs", company_url))
        .click_nav(selectors::posts_tab(), &format!("{}/posts", company_url))
        .click_nav(selectors::people_tab(), &format!("{}/people", company_url))
}

/// A profile page with everything outreach needs: connect flow, message
/// composer, and commentable posts.
fn profile_page(person: &PersonSpec) -> FakePage {
    let mut page = FakePage::new()
        .clickable(selectors::connect_button())
        .clickable(selectors::add_note_button())
        .clickable(selectors::note_box())
        .clickable(selectors::send_now_button())
        .clickable(selectors::message_button())
        .clickable(selectors::message_box())
        .clickable(selectors::send_message_button())
        .clickable(selectors::comment_box())
        .clickable(selectors::post_comment_button())
        .clickable_many(selectors::comment_button(), person.posts.len().max(1));
    if !person.about.is_empty() {
        page = page.texts(selectors::person_about(), vec![person.about.as_str()]);
    }
    if !person.posts.is_empty() {
        page = page.texts(
            selectors::post_card(),
            person.posts.iter().map(String::as_str).collect(),
        );
    }
    page
}

/// Scripts the search page for one industry plus every company's sub-views
/// and personnel profiles.
pub fn script_site(driver: &FakeDriver, base: &str, industry: &str, companies: &[CompanySpec]) {
    let titles: Vec<&str> = companies.iter().map(|c| c.name.as_str()).collect();
    let links: Vec<Option<&str>> = companies.iter().map(|c| Some(c.url.as_str())).collect();

    driver.add_page(
        &search_url(base, industry),
        FakePage::new()
            .texts(selectors::result_card_title(), titles)
            .attrs(selectors::result_card_title(), "href", links),
    );

    for company in companies {
        driver.add_page(&company.url, sub_view_navs(&company.url, FakePage::new()));

        let mut about_page = FakePage::new();
        if let Some(website) = &company.website {
            about_page = about_page.attrs(
                selectors::about_section_links(),
                "href",
                vec![Some(website.as_str())],
            );
        }
        if let Some(employees) = &company.employees_text {
            about_page = about_page.texts(selectors::employee_count(), vec![employees.as_str()]);
        }
        driver.add_page(
            &format!("{}/about", company.url),
            sub_view_navs(&company.url, about_page),
        );

        let mut jobs_page = FakePage::new();
        if let Some(jobs) = &company.jobs_text {
            jobs_page = jobs_page.texts(selectors::jobs_section(), vec![jobs.as_str()]);
        }
        driver.add_page(
            &format!("{}/jobs", company.url),
            sub_view_navs(&company.url, jobs_page),
        );

        let mut posts_page = FakePage::new();
        if !company.posts.is_empty() {
            posts_page = posts_page.texts(
                selectors::post_card(),
                company.posts.iter().map(String::as_str).collect(),
            );
        }
        driver.add_page(
            &format!("{}/posts", company.url),
            sub_view_navs(&company.url, posts_page),
        );

        let people_page = FakePage::new()
            .texts(
                selectors::people_card_name(),
                company.people.iter().map(|p| p.name.as_str()).collect(),
            )
            .texts(
                selectors::people_card_title(),
                company.people.iter().map(|p| p.title.as_str()).collect(),
            )
            .attrs(
                selectors::people_card_link(),
                "href",
                company
                    .people
                    .iter()
                    .map(|p| Some(p.profile_url.as_str()))
                    .collect(),
            );
        driver.add_page(
            &format!("{}/people", company.url),
            sub_view_navs(&company.url, people_page),
        );

        for person in &company.people {
            driver.add_page(&person.profile_url, profile_page(person));
        }
    }
}
