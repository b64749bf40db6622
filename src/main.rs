use std::path::Path;

use bidscout::{configuration::get_configuration, services::report, startup::run};
use env_logger::Env;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let configuration = get_configuration().expect("Failed to read configuration.");

    log::info!("Starting the web scraping process with Firefox.");
    let records = run(&configuration).await;

    report(&records, Path::new(&configuration.scraper.output_file));
    log::info!("Script finished.");
}
