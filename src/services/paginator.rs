use std::future::Future;

use crate::{configuration::ScraperSettings, domain::bid_record::BidRecord};

use super::{extract, politeness_pause, BrowserSession, Locator, PageElement, WaitTimeout};

pub const NEXT_PAGE: Locator = Locator::Css("a.page-link.next");
pub const PARENT: Locator = Locator::XPath("..");

const DISABLED_MARKER: &str = "disabled";

#[derive(Debug, PartialEq)]
pub enum Step {
    LoadingPage,
    Done,
}

/// Moves to the next results page and extracts it. `Ok(None)` means the
/// control is there but disabled.
async fn advance<S: BrowserSession>(
    session: &S,
    settings: &ScraperSettings,
) -> anyhow::Result<Option<Vec<BidRecord>>> {
    politeness_pause(settings.min_delay_secs, settings.max_delay_secs).await;

    let next_page_button = session
        .wait_for_clickable(NEXT_PAGE, settings.next_page_wait())
        .await?;

    let class = next_page_button.find(PARENT).await?.attr("class").await?;
    if class.is_some_and(|class| class.contains(DISABLED_MARKER)) {
        return Ok(None);
    }

    log::info!("Clicking the next page button.");
    next_page_button.click().await?;

    Ok(Some(extract(session, settings.card_wait()).await))
}

/// Walks the listing from the configured start URL until the last page,
/// appending every page's records to `records` as soon as they are extracted.
pub async fn paginate<S: BrowserSession>(
    session: &S,
    settings: &ScraperSettings,
    records: &mut Vec<BidRecord>,
) {
    let start_url = settings.start_url.as_str();
    log::info!("Navigating to {}", start_url);
    if let Err(e) = session.goto(start_url).await {
        log::error!("Failed to load {}: {:#}", start_url, e);
        return;
    }
    records.extend(extract(session, settings.card_wait()).await);

    let mut step = Step::LoadingPage;
    while step == Step::LoadingPage {
        step = match advance(session, settings).await {
            Ok(Some(page)) => {
                records.extend(page);
                Step::LoadingPage
            }
            Ok(None) => {
                log::info!("Next page button is disabled. Exiting pagination loop.");
                Step::Done
            }
            Err(e) => {
                match e.downcast_ref::<WaitTimeout>() {
                    Some(timeout) => log::info!("No next page button found: {}", timeout),
                    None => log::error!("An error occurred during pagination: {:#}", e),
                }
                log::info!("Assuming end of pages and exiting loop.");
                Step::Done
            }
        };
    }
}

/// Paginates until done or until `shutdown` resolves, then closes the session.
/// Records gathered before an interruption are kept.
pub async fn scrape_until<S, F>(
    session: S,
    settings: &ScraperSettings,
    shutdown: F,
) -> Vec<BidRecord>
where
    S: BrowserSession,
    F: Future<Output = ()>,
{
    let mut records = vec![];

    tokio::select! {
        _ = paginate(&session, settings, &mut records) => {}
        _ = shutdown => {
            log::info!("Scraping interrupted by user (Ctrl+C). Saving data...");
        }
    }

    log::info!("Closing the browser.");
    if let Err(e) = session.quit().await {
        log::error!("Failed to close the browser: {:#}", e);
    }

    log::info!("Total bids scraped: {}", records.len());
    records
}
