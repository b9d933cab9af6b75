use std::net::TcpListener;

use env_logger::Env;
use hometracker::{
    configuration::get_configuration,
    services::{ListingStore, PageFetcher, ScrapeOrchestrator},
    startup::run,
};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let configuration = get_configuration().expect("Failed to read configuration.");

    let address = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    );
    let listener = TcpListener::bind(address)?;

    let orchestrator = ScrapeOrchestrator::new(
        PageFetcher::new(),
        ListingStore::new(&configuration.scraper.data_dir),
        configuration.scraper.base_url,
        configuration.scraper.mode,
    );

    run(listener, orchestrator)?.await
}
