use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

use crate::configuration::CrawlerSettings;
use crate::dal::LeadStore;
use crate::domain::quota::{QuotaCeilings, QuotaCounters};

use super::droid::Droid;
use super::navigator::CrawlNavigator;
use super::outreach::OutreachPolicy;
use super::pacer::{Pacer, TokioPacer};
use super::session::SessionManager;
use super::driver::PageDriver;

/// Cooperative cancellation. Checked at entity and page boundaries, never
/// inside a sleep; work in flight for the current entity may be lost, which
/// dedup makes safe to reprocess.
#[derive(Clone, Default)]
pub struct StopSignal {
    flag: Arc<AtomicBool>,
}

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn clear(&self) {
        self.flag.store(false, Ordering::Relaxed);
    }

    pub fn requested(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    WaitingOnLogin,
    Running,
    WaitingOnChallenge,
}

impl RunState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunState::Idle => "idle",
            RunState::WaitingOnLogin => "waiting_on_login",
            RunState::Running => "running",
            RunState::WaitingOnChallenge => "waiting_on_challenge",
        }
    }

    fn from_u8(value: u8) -> Self {
        match value {
            1 => RunState::WaitingOnLogin,
            2 => RunState::Running,
            3 => RunState::WaitingOnChallenge,
            _ => RunState::Idle,
        }
    }

    fn as_u8(self) -> u8 {
        match self {
            RunState::Idle => 0,
            RunState::WaitingOnLogin => 1,
            RunState::Running => 2,
            RunState::WaitingOnChallenge => 3,
        }
    }
}

/// Observable run state plus a live counter snapshot, shared between the
/// crawl worker and the status route. Atomics only, no locks.
#[derive(Default)]
pub struct CrawlStatus {
    state: AtomicU8,
    leads_collected: AtomicU32,
    connections_sent: AtomicU32,
    comments_left: AtomicU32,
    messages_sent: AtomicU32,
}

#[derive(serde::Serialize)]
pub struct StatusSnapshot {
    pub state: String,
    pub leads_collected: u32,
    pub connections_sent: u32,
    pub comments_left: u32,
    pub messages_sent: u32,
}

impl CrawlStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_state(&self, state: RunState) {
        self.state.store(state.as_u8(), Ordering::Relaxed);
    }

    pub fn state(&self) -> RunState {
        RunState::from_u8(self.state.load(Ordering::Relaxed))
    }

    pub fn sync_counters(&self, quotas: &QuotaCounters) {
        self.leads_collected
            .store(quotas.leads_collected, Ordering::Relaxed);
        self.connections_sent
            .store(quotas.connections_sent, Ordering::Relaxed);
        self.comments_left
            .store(quotas.comments_left, Ordering::Relaxed);
        self.messages_sent
            .store(quotas.messages_sent, Ordering::Relaxed);
    }

    pub fn reset_counters(&self) {
        self.leads_collected.store(0, Ordering::Relaxed);
        self.connections_sent.store(0, Ordering::Relaxed);
        self.comments_left.store(0, Ordering::Relaxed);
        self.messages_sent.store(0, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatusSnapshot {
        StatusSnapshot {
            state: self.state().as_str().to_string(),
            leads_collected: self.leads_collected.load(Ordering::Relaxed),
            connections_sent: self.connections_sent.load(Ordering::Relaxed),
            comments_left: self.comments_left.load(Ordering::Relaxed),
            messages_sent: self.messages_sent.load(Ordering::Relaxed),
        }
    }
}

/// One requested crawl run. With no explicit industries, the run covers
/// every industry already present in the lead store.
#[derive(Debug, Default)]
pub struct CrawlRequest {
    pub industries: Option<Vec<String>>,
}

pub struct CrawlRequestSender {
    pub sender: UnboundedSender<CrawlRequest>,
}

/// Background worker: receives run requests and executes them one at a
/// time. The serial loop is what guarantees a single interactive session;
/// the start route refuses requests while a run is underway.
pub async fn crawl_run_handler(
    mut run_receiver: UnboundedReceiver<CrawlRequest>,
    store: Arc<dyn LeadStore>,
    settings: CrawlerSettings,
    stop: StopSignal,
    status: Arc<CrawlStatus>,
) {
    log::info!("Started crawl run worker");

    while let Some(request) = run_receiver.recv().await {
        stop.clear();
        status.reset_counters();

        match run_crawl(&request, store.clone(), &settings, stop.clone(), status.clone()).await {
            Ok(()) => log::info!("Crawl run finished"),
            Err(e) => log::error!("Crawl run aborted: {:?}", e),
        }

        stop.clear();
        status.set_state(RunState::Idle);
    }
}

/// Owns the browser session for one run and always releases it, so a failed
/// run never wedges the next one.
async fn run_crawl(
    request: &CrawlRequest,
    store: Arc<dyn LeadStore>,
    settings: &CrawlerSettings,
    stop: StopSignal,
    status: Arc<CrawlStatus>,
) -> anyhow::Result<()> {
    let droid = Arc::new(Droid::new(&settings.webdriver_url).await?);
    let result = drive_crawl(droid.clone(), request, store, settings, stop, status).await;
    if let Err(e) = droid.quit().await {
        log::error!("Could not shut down browser session: {:?}", e);
    }
    result
}

async fn drive_crawl(
    droid: Arc<Droid>,
    request: &CrawlRequest,
    store: Arc<dyn LeadStore>,
    settings: &CrawlerSettings,
    stop: StopSignal,
    status: Arc<CrawlStatus>,
) -> anyhow::Result<()> {
    let driver: Arc<dyn PageDriver> = droid;
    let pacer: Arc<dyn Pacer> = Arc::new(TokioPacer);

    status.set_state(RunState::WaitingOnLogin);
    let session = SessionManager::new(
        driver.clone(),
        pacer.clone(),
        settings.base_url.clone(),
        PathBuf::from(&settings.cookies_path),
        settings.max_login_wait_secs.map(Duration::from_secs),
    );
    session.ensure_logged_in().await?;
    status.set_state(RunState::Running);

    let industries = match &request.industries {
        Some(industries) if !industries.is_empty() => industries.clone(),
        _ => store.distinct_industries().await?,
    };
    if industries.is_empty() {
        log::info!("No industries to crawl");
        return Ok(());
    }

    let ceilings = QuotaCeilings {
        max_leads: settings.max_leads,
        max_connections: settings.max_connections,
        max_comments: settings.max_comments,
        max_messages: settings.max_messages,
    };
    let mut navigator = CrawlNavigator::new(
        driver,
        pacer,
        store,
        ceilings,
        OutreachPolicy::default(),
        settings.base_url.clone(),
        PathBuf::from(&settings.model_path),
        stop.clone(),
        status.clone(),
        rand::random(),
    );

    for industry in industries {
        if stop.requested() {
            log::info!("Stop requested, ending run");
            break;
        }
        if !navigator.quotas().can_collect_lead() {
            break;
        }
        match navigator.crawl_industry(&industry).await {
            Ok(()) => {}
            Err(e) if e.is_fatal() => return Err(e.into()),
            Err(e) => log::error!("Industry {} crawl failed: {:?}", industry, e),
        }
    }

    Ok(())
}
