#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use anyhow::anyhow;
use async_trait::async_trait;
use bidscout::{
    configuration::ScraperSettings,
    services::{
        BrowserSession, Locator, PageElement, WaitTimeout, BID_LINK, DEPARTMENT_CONTAINER,
        END_DATE, ITEMS_CONTAINER, ITEMS_LINK, NEXT_PAGE, PARENT, QUANTITY_CONTAINER, START_DATE,
    },
};

#[derive(Clone, Default)]
pub struct FakeElement {
    text: String,
    attrs: HashMap<String, String>,
    children: HashMap<Locator, Vec<FakeElement>>,
    on_click: Click,
}

#[derive(Clone, Default)]
enum Click {
    #[default]
    Nothing,
    Advance(Arc<AtomicUsize>),
    Fail,
}

impl FakeElement {
    pub fn new(text: &str) -> Self {
        FakeElement {
            text: text.to_string(),
            ..Default::default()
        }
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.insert(name.to_string(), value.to_string());
        self
    }

    pub fn child(mut self, locator: Locator, element: FakeElement) -> Self {
        self.children.entry(locator).or_default().push(element);
        self
    }

    pub fn without(mut self, locator: Locator) -> Self {
        self.children.remove(&locator);
        self
    }
}

#[async_trait]
impl PageElement for FakeElement {
    async fn find(&self, locator: Locator) -> anyhow::Result<Self> {
        self.children
            .get(&locator)
            .and_then(|found| found.first())
            .cloned()
            .ok_or_else(|| anyhow!("no such element: {}", locator))
    }

    async fn find_all(&self, locator: Locator) -> anyhow::Result<Vec<Self>> {
        Ok(self.children.get(&locator).cloned().unwrap_or_default())
    }

    async fn text(&self) -> anyhow::Result<String> {
        Ok(self.text.clone())
    }

    async fn attr(&self, name: &str) -> anyhow::Result<Option<String>> {
        Ok(self.attrs.get(name).cloned())
    }

    async fn prop(&self, name: &str) -> anyhow::Result<Option<String>> {
        Ok(self.attrs.get(name).cloned())
    }

    async fn click(&self) -> anyhow::Result<()> {
        match &self.on_click {
            Click::Nothing => Ok(()),
            Click::Advance(current) => {
                current.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
            Click::Fail => Err(anyhow!("element click intercepted")),
        }
    }
}

/// A bid card as the portal renders it, with the padding the real markup has.
pub fn card(bid_number: &str, items_full_text: Option<&str>) -> FakeElement {
    let bid_link = FakeElement::new(&format!("  {}\n", bid_number)).with_attr(
        "href",
        &format!("https://bidplus.gem.gov.in/showbidDocument/{}", bid_number),
    );

    let mut card = FakeElement::new("")
        .child(BID_LINK, bid_link)
        .child(ITEMS_CONTAINER, FakeElement::new("Items: Office Chair Hi..."))
        .child(QUANTITY_CONTAINER, FakeElement::new("Quantity: 25 "))
        .child(
            DEPARTMENT_CONTAINER,
            FakeElement::new("\n Ministry Of Defence\n Department Of Military Affairs "),
        )
        .child(START_DATE, FakeElement::new(" 01-05-2024 10:00 AM "))
        .child(END_DATE, FakeElement::new(" 21-05-2024 11:00 AM"));

    if let Some(full_text) = items_full_text {
        card = card.child(
            ITEMS_LINK,
            FakeElement::new("Office Chair Hi...").with_attr("data-content", full_text),
        );
    }

    card
}

pub enum NextControl {
    Absent,
    Disabled,
    Enabled,
    /// Enabled, but its parent carries no `class` attribute.
    Unmarked,
    Broken,
    Hangs,
}

pub struct FakePage {
    pub cards: Vec<FakeElement>,
    pub next: NextControl,
}

pub struct FakeSession {
    pages: Vec<FakePage>,
    current: Arc<AtomicUsize>,
    pub visited: Arc<std::sync::Mutex<Vec<String>>>,
    pub closed: Arc<AtomicBool>,
}

impl FakeSession {
    pub fn new(pages: Vec<FakePage>) -> Self {
        FakeSession {
            pages,
            current: Arc::new(AtomicUsize::new(0)),
            visited: Arc::default(),
            closed: Arc::default(),
        }
    }

    fn page(&self) -> anyhow::Result<&FakePage> {
        self.pages
            .get(self.current.load(Ordering::SeqCst))
            .ok_or_else(|| anyhow!("navigated past the last page"))
    }

    fn next_control(&self, parent_class: &str, click: Click) -> FakeElement {
        self.next_control_under(FakeElement::new("").with_attr("class", parent_class), click)
    }

    fn next_control_under(&self, parent: FakeElement, click: Click) -> FakeElement {
        let mut control = FakeElement::new("Next").child(PARENT, parent);
        control.on_click = click;
        control
    }
}

#[async_trait]
impl BrowserSession for FakeSession {
    type Element = FakeElement;

    async fn goto(&self, url: &str) -> anyhow::Result<()> {
        self.visited.lock().unwrap().push(url.to_string());
        self.current.store(0, Ordering::SeqCst);
        Ok(())
    }

    async fn wait_for_all(
        &self,
        locator: Locator,
        timeout: Duration,
    ) -> anyhow::Result<Vec<FakeElement>> {
        let cards = &self.page()?.cards;
        if cards.is_empty() {
            return Err(WaitTimeout::new(locator, timeout).into());
        }
        Ok(cards.clone())
    }

    async fn wait_for_clickable(
        &self,
        locator: Locator,
        timeout: Duration,
    ) -> anyhow::Result<FakeElement> {
        assert_eq!(locator, NEXT_PAGE);
        match self.page()?.next {
            NextControl::Absent => Err(WaitTimeout::new(locator, timeout).into()),
            NextControl::Disabled => Ok(self.next_control("page-item disabled", Click::Nothing)),
            NextControl::Enabled => Ok(self.next_control(
                "page-item",
                Click::Advance(self.current.clone()),
            )),
            NextControl::Unmarked => Ok(self.next_control_under(
                FakeElement::new(""),
                Click::Advance(self.current.clone()),
            )),
            NextControl::Broken => Ok(self.next_control("page-item", Click::Fail)),
            NextControl::Hangs => std::future::pending().await,
        }
    }

    async fn quit(self) -> anyhow::Result<()> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

pub fn settings() -> ScraperSettings {
    ScraperSettings {
        start_url: "https://bidplus.gem.gov.in/bidresultlists/?lang=english".to_string(),
        output_file: "scraped_bids.json".to_string(),
        card_wait_secs: 1,
        next_page_wait_secs: 1,
        min_delay_secs: 0.0,
        max_delay_secs: 0.0,
    }
}
