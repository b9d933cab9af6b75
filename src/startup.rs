use std::net::TcpListener;

use actix_files::Files;
use actix_web::{dev::Server, middleware::Logger, web, App, HttpServer};

use crate::routes::{default_route, listings_route};
use crate::services::ScrapeOrchestrator;

pub fn run(listener: TcpListener, orchestrator: ScrapeOrchestrator) -> Result<Server, std::io::Error> {
    let orchestrator = web::Data::new(orchestrator);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .service(Files::new("/static", "./static").prefer_utf8(true))
            .service(default_route::index)
            .service(listings_route::get_listings)
            .app_data(orchestrator.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
