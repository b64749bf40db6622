use crate::{
    configuration::Settings,
    domain::bid_record::BidRecord,
    services::{scrape_until, Droid},
};

async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Unable to listen for Ctrl+C: {:?}", e);
        std::future::pending::<()>().await;
    }
}

/// Opens the browser and scrapes every listing page. Any failure, including
/// not getting a browser at all, ends in whatever was collected so far.
pub async fn run(settings: &Settings) -> Vec<BidRecord> {
    let droid = match Droid::new(&settings.webdriver).await {
        Ok(droid) => droid,
        Err(e) => {
            log::error!("Could not start the browser: {:#}", e);
            return vec![];
        }
    };

    scrape_until(droid, &settings.scraper, interrupted()).await
}
