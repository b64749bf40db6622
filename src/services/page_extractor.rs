use std::time::Duration;

use anyhow::{anyhow, Context};

use crate::domain::bid_record::{strip_label, BidRecord, ITEMS_LABEL, QUANTITY_LABEL};

use super::{BrowserSession, Locator, PageElement};

pub const CARD: Locator = Locator::ClassName("card");
pub const BID_LINK: Locator = Locator::ClassName("bid_no_hover");
pub const ITEMS_LINK: Locator =
    Locator::XPath(".//strong[text()='Items:']/following-sibling::a");
pub const ITEMS_CONTAINER: Locator = Locator::XPath(".//strong[text()='Items:']/parent::div");
pub const QUANTITY_CONTAINER: Locator =
    Locator::XPath(".//strong[text()='Quantity:']/parent::div");
pub const DEPARTMENT_CONTAINER: Locator = Locator::XPath(
    ".//strong[text()='Department Name And Address:']/parent::div/following-sibling::div",
);
pub const START_DATE: Locator = Locator::Css("span.start_date");
pub const END_DATE: Locator = Locator::Css("span.end_date");

/// Full item description, truncated in the visible card text.
const ITEMS_FULL_TEXT_ATTR: &str = "data-content";

/// Extracts every parsable bid card on the current page, in rendered order.
/// Never fails: a page whose cards never render yields nothing and a card that
/// doesn't parse is skipped.
pub async fn extract<S: BrowserSession>(session: &S, card_wait: Duration) -> Vec<BidRecord> {
    let cards = match session.wait_for_all(CARD, card_wait).await {
        Ok(cards) => {
            log::info!("Bid cards loaded successfully.");
            cards
        }
        Err(e) => {
            log::error!("Error waiting for bid cards: {}", e);
            return vec![];
        }
    };

    let mut records = Vec::with_capacity(cards.len());
    for card in cards.iter() {
        match extract_card(card).await {
            Ok(record) => records.push(record),
            Err(e) => log::error!("Could not parse a bid card. Skipping. Error: {:#}", e),
        }
    }

    records
}

async fn trimmed_text<E: PageElement>(card: &E, locator: Locator) -> anyhow::Result<String> {
    let element = card
        .find(locator)
        .await
        .with_context(|| format!("Missing {}", locator))?;
    Ok(element.text().await?.trim().to_string())
}

async fn extract_card<E: PageElement>(card: &E) -> anyhow::Result<BidRecord> {
    let bid_link = card.find(BID_LINK).await.context("Missing bid number link")?;
    let bid_number = bid_link.text().await?.trim().to_string();
    let bid_url = bid_link
        .prop("href")
        .await?
        .ok_or_else(|| anyhow!("Bid number link has no href"))?
        .trim()
        .to_string();

    let items = match card.find_all(ITEMS_LINK).await?.first() {
        Some(items_link) => {
            let full_text = items_link
                .attr(ITEMS_FULL_TEXT_ATTR)
                .await?
                .ok_or_else(|| anyhow!("Items link has no {}", ITEMS_FULL_TEXT_ATTR))?;
            log::info!("Found full 'Items' name for bid: {}", bid_number);
            full_text.trim().to_string()
        }
        None => {
            let container = card
                .find(ITEMS_CONTAINER)
                .await
                .context("Missing items container")?;
            log::warn!(
                "Falling back to original format for 'Items' on bid: {}",
                bid_number
            );
            strip_label(&container.text().await?, ITEMS_LABEL)
        }
    };

    let quantity = card
        .find(QUANTITY_CONTAINER)
        .await
        .context("Missing quantity container")?
        .text()
        .await?;
    let quantity = strip_label(&quantity, QUANTITY_LABEL);

    let department_details = trimmed_text(card, DEPARTMENT_CONTAINER).await?;
    let start_date = trimmed_text(card, START_DATE).await?;
    let end_date = trimmed_text(card, END_DATE).await?;

    Ok(BidRecord {
        bid_number,
        bid_url,
        items,
        quantity,
        department_details,
        start_date,
        end_date,
    })
}
