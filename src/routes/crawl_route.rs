use actix_web::{get, post, web, HttpResponse};
use serde::Deserialize;

use crate::services::{CrawlRequest, CrawlRequestSender, CrawlStatus, RunState, StopSignal};

#[derive(Deserialize)]
struct StartCrawlBody {
    industries: Option<Vec<String>>,
}

/// Queues one crawl run. Refused while a run is underway: the browsing
/// session is an exclusive resource.
#[post("/start")]
async fn start_crawl(
    run_sender: web::Data<CrawlRequestSender>,
    status: web::Data<CrawlStatus>,
    body: Option<web::Json<StartCrawlBody>>,
) -> HttpResponse {
    if status.state() != RunState::Idle {
        return HttpResponse::Conflict().body("A crawl run is already in progress");
    }

    let industries = body.and_then(|body| body.into_inner().industries);
    match run_sender.sender.send(CrawlRequest { industries }) {
        Ok(()) => HttpResponse::Accepted().body("Crawl run queued"),
        Err(e) => {
            log::error!("Crawl request channel got an error: {:?}", e);
            HttpResponse::InternalServerError().body("Crawl worker unavailable")
        }
    }
}

/// Sets the cooperative stop flag; the worker exits at its next entity or
/// page boundary.
#[post("/stop")]
async fn stop_crawl(stop: web::Data<StopSignal>) -> HttpResponse {
    stop.request();
    HttpResponse::Accepted().body("Stop requested")
}

#[get("/status")]
async fn crawl_status(status: web::Data<CrawlStatus>) -> HttpResponse {
    HttpResponse::Ok().json(status.snapshot())
}
