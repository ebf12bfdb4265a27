use std::net::TcpListener;
use std::sync::Arc;

use actix_web::{dev::Server, middleware::Logger, web, App, HttpServer};

use crate::{
    routes::{crawl_route, default_route},
    services::{CrawlRequestSender, CrawlStatus, StopSignal},
};

pub fn run(
    listener: TcpListener,
    run_sender: CrawlRequestSender,
    stop: StopSignal,
    status: Arc<CrawlStatus>,
) -> Result<Server, std::io::Error> {
    let run_sender = web::Data::new(run_sender);
    let stop = web::Data::new(stop);
    let status = web::Data::from(status);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .service(default_route::default)
            .service(default_route::health_check)
            .service(
                web::scope("/crawl")
                    .service(crawl_route::start_crawl)
                    .service(crawl_route::stop_crawl)
                    .service(crawl_route::crawl_status),
            )
            .app_data(run_sender.clone())
            .app_data(stop.clone())
            .app_data(status.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
