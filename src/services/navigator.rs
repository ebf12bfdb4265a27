use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use url::Url;

use crate::dal::LeadStore;
use crate::domain::classifier::{
    is_decision_maker, is_preferred_decision_maker, parse_company_size,
    profile_text_indicates_decision_maker,
};
use crate::domain::lead::{HiringSignal, Lead};
use crate::domain::personalizer::{generate_message, ProspectProfile};
use crate::domain::quota::{QuotaCeilings, QuotaCounters};
use crate::domain::variant::predict_best_variant;

use super::behavior::BehaviorSimulator;
use super::crawler::{CrawlStatus, RunState, StopSignal};
use super::driver::{DriverError, PageDriver};
use super::outreach::{OutreachEngine, OutreachPolicy};
use super::pacer::Pacer;
use super::selectors;

const MAX_DECISION_MAKERS_PER_ENTITY: u32 = 3;
const ROBOT_POLL_INTERVAL: Duration = Duration::from_secs(10);
const ROBOT_MARKERS: [&str; 3] = ["captcha", "are you a robot", "unusual activity"];

/// Where the per-industry crawl currently is. Robot checks interpose between
/// extraction attempts; everything ends in Done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlPhase {
    Searching,
    ExtractingPage,
    RobotCheck,
    Paginating,
    Done,
}

/// Drives the paginated search traversal for one industry and everything
/// below it: entity sub-pages, personnel classification, dedup, persistence
/// and outreach. Transient extraction failures are contained at each loop
/// site; only a lost session propagates out.
pub struct CrawlNavigator {
    driver: Arc<dyn PageDriver>,
    pacer: Arc<dyn Pacer>,
    store: Arc<dyn LeadStore>,
    behavior: BehaviorSimulator,
    outreach: OutreachEngine,
    quotas: QuotaCounters,
    base_url: String,
    model_path: PathBuf,
    stop: StopSignal,
    status: Arc<CrawlStatus>,
    rng: StdRng,
}

impl CrawlNavigator {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        driver: Arc<dyn PageDriver>,
        pacer: Arc<dyn Pacer>,
        store: Arc<dyn LeadStore>,
        ceilings: QuotaCeilings,
        policy: OutreachPolicy,
        base_url: String,
        model_path: PathBuf,
        stop: StopSignal,
        status: Arc<CrawlStatus>,
        seed: u64,
    ) -> Self {
        CrawlNavigator {
            behavior: BehaviorSimulator::seeded(driver.clone(), pacer.clone(), seed.wrapping_add(1)),
            outreach: OutreachEngine::seeded(driver.clone(), policy, seed.wrapping_add(2)),
            quotas: QuotaCounters::new(ceilings),
            driver,
            pacer,
            store,
            base_url,
            model_path,
            stop,
            status,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn quotas(&self) -> &QuotaCounters {
        &self.quotas
    }

    /// Walks search result pages for one industry until pagination is
    /// exhausted, the lead ceiling is reached, or a stop is requested.
    pub async fn crawl_industry(&mut self, industry: &str) -> Result<(), DriverError> {
        log::info!("Crawling industry: {}", industry);
        let mut phase = CrawlPhase::Searching;
        let mut page: u32 = 1;

        loop {
            phase = match phase {
                CrawlPhase::Searching => {
                    self.driver.goto(&self.search_url(industry)).await?;
                    self.behavior.page_routine().await;
                    CrawlPhase::ExtractingPage
                }
                CrawlPhase::ExtractingPage => {
                    if self.is_robot_check().await {
                        CrawlPhase::RobotCheck
                    } else {
                        self.extract_result_page(industry).await?;
                        CrawlPhase::Paginating
                    }
                }
                CrawlPhase::RobotCheck => {
                    self.robot_check_pause().await;
                    CrawlPhase::ExtractingPage
                }
                CrawlPhase::Paginating => {
                    if self.stop.requested() || !self.quotas.can_collect_lead() {
                        CrawlPhase::Done
                    } else if self.advance_page().await? {
                        page += 1;
                        log::info!("Paginating to page {} for industry {}", page, industry);
                        self.page_pause(page).await;
                        CrawlPhase::ExtractingPage
                    } else {
                        CrawlPhase::Done
                    }
                }
                CrawlPhase::Done => break,
            };
        }

        Ok(())
    }

    fn search_url(&self, industry: &str) -> String {
        match Url::parse(&self.base_url) {
            Ok(mut url) => {
                url.set_path("/search/results/companies/");
                url.query_pairs_mut()
                    .append_pair("keywords", industry)
                    .append_pair("origin", "GLOBAL_SEARCH_HEADER");
                url.to_string()
            }
            Err(_) => format!(
                "{}/search/results/companies/?keywords={}",
                self.base_url, industry
            ),
        }
    }

    async fn is_robot_check(&self) -> bool {
        let source = self
            .driver
            .page_source()
            .await
            .unwrap_or_default()
            .to_lowercase();
        if ROBOT_MARKERS.iter().any(|marker| source.contains(marker)) {
            return true;
        }
        self.driver.exists(&selectors::captcha_marker()).await
    }

    /// Blocks until the anti-bot challenge indicator disappears, assumed
    /// manually resolved by the operator. Intentionally unbounded.
    async fn robot_check_pause(&mut self) {
        log::info!("Anti-bot challenge detected, pausing until it is resolved");
        self.status.set_state(RunState::WaitingOnChallenge);
        while self.is_robot_check().await {
            if self.stop.requested() {
                break;
            }
            self.pacer.wait(ROBOT_POLL_INTERVAL).await;
        }
        self.status.set_state(RunState::Running);
        log::info!("Challenge cleared, resuming crawl");
    }

    async fn extract_result_page(&mut self, industry: &str) -> Result<(), DriverError> {
        for _ in 0..3 {
            let _ = self.driver.scroll_to_end().await;
            self.behavior.pause_range(2_000, 4_000).await;
        }

        let titles = match self.driver.texts_of(&selectors::result_card_title()).await {
            Ok(titles) => titles,
            Err(e) => {
                log::error!("No company results on this page: {:?}", e);
                return Ok(());
            }
        };
        let links = match self
            .driver
            .attrs_of(&selectors::result_card_title(), "href")
            .await
        {
            Ok(links) => links,
            Err(e) => {
                log::error!("No company links on this page: {:?}", e);
                return Ok(());
            }
        };

        for (company_name, link) in titles.into_iter().zip(links.into_iter()) {
            if self.stop.requested() || !self.quotas.can_collect_lead() {
                break;
            }
            let Some(company_url) = link else {
                continue;
            };
            match self
                .process_entity(&company_name, &company_url, industry)
                .await
            {
                Ok(()) => {}
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => log::error!("Error scraping company {}: {:?}", company_name, e),
            }
        }

        Ok(())
    }

    /// One company: open it in its own tab, visit its sub-views, classify
    /// its personnel, persist and engage accepted leads. The tab is closed
    /// whatever happens inside.
    async fn process_entity(
        &mut self,
        company_name: &str,
        company_url: &str,
        industry: &str,
    ) -> Result<(), DriverError> {
        self.driver.open_tab(company_url).await?;
        let result = self
            .extract_entity(company_name, company_url, industry)
            .await;
        if self.driver.tab_count().await > 1 {
            let _ = self.driver.close_tab().await;
        }
        self.behavior.pause_range(2_000, 5_000).await;
        result
    }

    async fn extract_entity(
        &mut self,
        company_name: &str,
        company_url: &str,
        industry: &str,
    ) -> Result<(), DriverError> {
        self.behavior.page_routine().await;

        let (website, company_size) = self.visit_about_view().await;
        let mut hiring = self.visit_jobs_view().await;
        let company_recent_post = self.visit_posts_view(&mut hiring).await;
        let people = self.collect_people().await;

        // Counts decision-makers found, not inserted, so a rerun over
        // already-persisted people never falls through to a company-only row.
        let mut found: u32 = 0;
        for (person_name, title, profile_link) in people {
            if self.stop.requested() {
                break;
            }
            if found >= MAX_DECISION_MAKERS_PER_ENTITY || !self.quotas.can_collect_lead() {
                break;
            }

            let title_matches = is_decision_maker(&title, industry);
            let profile_matches = if title_matches {
                false
            } else {
                self.deep_scan_profile(&profile_link).await
            };
            if !(title_matches || profile_matches) {
                continue;
            }
            if !is_preferred_decision_maker(&title, company_size) {
                continue;
            }
            found += 1;

            match self
                .store
                .exists(company_name, &person_name, &title, &profile_link)
                .await
            {
                Ok(true) => {
                    log::info!(
                        "Duplicate lead skipped: {} - {} - {}",
                        company_name,
                        person_name,
                        title
                    );
                    continue;
                }
                Ok(false) => {}
                Err(e) => {
                    log::error!("Lead existence check failed: {:?}", e);
                    continue;
                }
            }

            let (about, person_post) = self.visit_person_profile(&profile_link).await;
            let recent_post = if person_post.is_empty() {
                company_recent_post.clone()
            } else {
                person_post
            };

            let profile = ProspectProfile {
                name: person_name.clone(),
                company: company_name.to_string(),
                industry: industry.to_string(),
                role: title.clone(),
                about: about.clone(),
                recent_post: recent_post.clone(),
                mutuals: vec![],
            };
            let best_variant = predict_best_variant(&self.model_path);
            let (message, variant) =
                generate_message(&profile, best_variant.as_deref(), &mut self.rng);

            let mut lead = Lead::for_person(
                company_name.to_string(),
                website.clone(),
                industry.to_string(),
                company_size,
                hiring,
                person_name,
                title,
                profile_link,
                about,
                recent_post,
            );
            lead.message = Some(message);
            lead.message_variant = Some(variant);

            if let Err(e) = self.store.insert(&lead).await {
                log::error!("Could not persist lead: {:?}", e);
                continue;
            }
            self.quotas.record_lead();

            self.outreach
                .engage(&mut self.behavior, &mut self.quotas, &lead)
                .await?;
            self.status.sync_counters(&self.quotas);
        }

        if found == 0 {
            self.record_company_only_lead(
                company_name,
                company_url,
                website,
                industry,
                company_size,
                hiring,
            )
            .await;
        }

        Ok(())
    }

    /// About view carries the website link and the employee-count text.
    async fn visit_about_view(&mut self) -> (Option<String>, Option<u32>) {
        if self.driver.click(&selectors::about_tab()).await.is_err() {
            return (None, None);
        }
        self.behavior.pause_range(2_000, 4_000).await;

        let website = match self
            .driver
            .attrs_of(&selectors::about_section_links(), "href")
            .await
        {
            Ok(hrefs) => hrefs.into_iter().flatten().find(|href| {
                Url::parse(href).is_ok_and(|url| url.scheme().starts_with("http"))
            }),
            Err(_) => None,
        };

        let company_size = match self.driver.text_of(&selectors::employee_count()).await {
            Ok(text) => parse_company_size(&text),
            Err(_) => None,
        };

        (website, company_size)
    }

    async fn visit_jobs_view(&mut self) -> HiringSignal {
        if self.driver.click(&selectors::jobs_tab()).await.is_err() {
            return HiringSignal::Unknown;
        }
        self.behavior.pause_range(2_000, 4_000).await;

        match self.driver.text_of(&selectors::jobs_section()).await {
            Ok(text) => {
                let text = text.to_lowercase();
                if text.contains("hiring") || text.contains("open jobs") {
                    HiringSignal::Yes
                } else {
                    HiringSignal::Unknown
                }
            }
            Err(_) => HiringSignal::Unknown,
        }
    }

    /// Posts view doubles as a hiring signal and the company-level recent
    /// post fallback.
    async fn visit_posts_view(&mut self, hiring: &mut HiringSignal) -> String {
        if self.driver.click(&selectors::posts_tab()).await.is_err() {
            return String::new();
        }
        self.behavior.pause_range(2_000, 4_000).await;

        match self.driver.text_of(&selectors::post_card()).await {
            Ok(text) => {
                if text.to_lowercase().contains("hiring") {
                    *hiring = HiringSignal::Yes;
                }
                text.trim().to_string()
            }
            Err(_) => String::new(),
        }
    }

    /// Personnel cards from the people view, shuffled so processing order is
    /// never deterministic.
    async fn collect_people(&mut self) -> Vec<(String, String, String)> {
        if self.driver.click(&selectors::people_tab()).await.is_err() {
            log::info!("No people view for this company");
            return vec![];
        }
        self.behavior.pause_range(3_000, 6_000).await;

        let names = self
            .driver
            .texts_of(&selectors::people_card_name())
            .await
            .unwrap_or_default();
        let titles = self
            .driver
            .texts_of(&selectors::people_card_title())
            .await
            .unwrap_or_default();
        let links = self
            .driver
            .attrs_of(&selectors::people_card_link(), "href")
            .await
            .unwrap_or_default();

        let mut people: Vec<(String, String, String)> = names
            .into_iter()
            .zip(titles)
            .zip(links)
            .filter_map(|((name, title), link)| {
                link.map(|link| (name.trim().to_string(), title.trim().to_string(), link))
            })
            .collect();
        people.shuffle(&mut self.rng);
        people
    }

    /// The expensive path: only reached when the title checks were
    /// inconclusive. Expands About and Experience and looks for authority
    /// language.
    async fn deep_scan_profile(&mut self, profile_url: &str) -> bool {
        if self.driver.goto(profile_url).await.is_err() {
            return false;
        }
        self.behavior.pause_range(3_000, 6_000).await;

        let _ = self.driver.click(&selectors::about_see_more()).await;
        let _ = self.driver.click(&selectors::experience_see_more()).await;

        let about = self
            .driver
            .text_of(&selectors::person_about())
            .await
            .unwrap_or_default();
        let experience = self
            .driver
            .text_of(&selectors::experience_section())
            .await
            .unwrap_or_default();

        profile_text_indicates_decision_maker(&format!("{} {}", about, experience))
    }

    /// Navigates to the person's profile (where outreach will also happen)
    /// and pulls the about snippet and their most recent post.
    async fn visit_person_profile(&mut self, profile_url: &str) -> (String, String) {
        if self.driver.goto(profile_url).await.is_err() {
            return (String::new(), String::new());
        }
        self.behavior.pause_range(3_000, 6_000).await;

        let about = self
            .driver
            .text_of(&selectors::person_about())
            .await
            .map(|text| text.trim().to_string())
            .unwrap_or_default();
        let recent_post = self
            .driver
            .text_of(&selectors::post_card())
            .await
            .map(|text| text.trim().to_string())
            .unwrap_or_default();

        (about, recent_post)
    }

    async fn record_company_only_lead(
        &mut self,
        company_name: &str,
        company_url: &str,
        website: Option<String>,
        industry: &str,
        company_size: Option<u32>,
        hiring: HiringSignal,
    ) {
        match self
            .store
            .exists(company_name, "", "", company_url)
            .await
        {
            Ok(true) => {
                log::info!("Duplicate company skipped: {}", company_name);
                return;
            }
            Ok(false) => {}
            Err(e) => {
                log::error!("Company existence check failed: {:?}", e);
                return;
            }
        }

        let lead = Lead::company_only(
            company_name.to_string(),
            website,
            industry.to_string(),
            company_size,
            hiring,
            company_url.to_string(),
        );
        match self.store.insert(&lead).await {
            Ok(()) => {
                self.quotas.record_lead();
                self.status.sync_counters(&self.quotas);
            }
            Err(e) => log::error!("Could not persist company lead: {:?}", e),
        }
    }

    /// True when a further page was opened.
    async fn advance_page(&mut self) -> Result<bool, DriverError> {
        let next = selectors::next_page_button();
        if !self.driver.exists(&next).await {
            log::info!("No more pages, Next button not found");
            return Ok(false);
        }
        match self.driver.is_enabled(&next).await {
            Ok(false) => return Ok(false),
            Ok(true) => {}
            Err(e) if e.is_fatal() => return Err(e),
            Err(_) => return Ok(false),
        }
        match self.driver.click(&next).await {
            Ok(()) => Ok(true),
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => {
                log::error!("Could not advance to the next page: {:?}", e);
                Ok(false)
            }
        }
    }

    /// Short pause between pages; a long one after every third page to blunt
    /// request-rate fingerprinting.
    async fn page_pause(&mut self, page: u32) {
        if page % 3 == 0 {
            log::info!("Taking a longer break to avoid detection");
            self.behavior.pause_range(60_000, 120_000).await;
        } else {
            self.behavior.pause_range(5_000, 15_000).await;
        }
    }
}
