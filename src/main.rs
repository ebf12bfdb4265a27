use std::{net::TcpListener, path::PathBuf, sync::Arc, time::Duration};

use env_logger::Env;
use magnet::{
    configuration::get_configuration,
    dal::{LeadStore, PgLeadStore},
    services::{
        crawl_run_handler, retrain_handler, CrawlRequest, CrawlRequestSender, CrawlStatus,
        StopSignal,
    },
    startup::run,
};
use sqlx::postgres::PgPoolOptions;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let configuration = get_configuration().expect("Failed to read configuration.");

    let pool_options = PgPoolOptions::new()
        .max_connections(20)
        .min_connections(5)
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(15 * 60)) // 15 minutes
        .max_lifetime(None);
    let connection_pool = pool_options.connect_lazy_with(configuration.database.with_db());

    let address = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    );
    let listener = TcpListener::bind(address)?;

    let store: Arc<dyn LeadStore> = Arc::new(PgLeadStore::new(connection_pool));
    let stop = StopSignal::new();
    let status = Arc::new(CrawlStatus::new());

    let (run_sender, run_receiver) = mpsc::unbounded_channel::<CrawlRequest>();
    let run_sender = CrawlRequestSender { sender: run_sender };

    // Spawn background workers
    let store_clone = store.clone();
    let crawler_settings = configuration.crawler.clone();
    let stop_clone = stop.clone();
    let status_clone = status.clone();
    tokio::spawn(async move {
        crawl_run_handler(
            run_receiver,
            store_clone,
            crawler_settings,
            stop_clone,
            status_clone,
        )
        .await
    });

    let store_clone = store.clone();
    let model_path = PathBuf::from(&configuration.crawler.model_path);
    let retrain_interval = configuration.crawler.retrain_interval_hours;
    tokio::spawn(async move { retrain_handler(store_clone, model_path, retrain_interval).await });

    run(listener, run_sender, stop, status)?.await
}
