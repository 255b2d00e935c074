//! Cuckoo's Nest: one fixed weekly menu. Headings carry keyword-inferable
//! categories, paragraphs carry the dishes, and the same list applies
//! Monday through Friday.

use async_trait::async_trait;
use reqwest::Client;
use scraper::Html;

use super::{LunchScraper, css, text_of};
use crate::error::ScrapeError;
use crate::model::{MenuItem, MenuSet};

/// Heading keyword → category label, first match wins.
const CATEGORY_KEYWORDS: [(&str, &str); 6] = [
    ("FISK", "FISK"),
    ("KÖTT", "KÖTT"),
    ("VEG", "VEG"),
    ("CAESARSALLAD", "CAESARSALLAD"),
    ("RÄKMACKA", "RÄKMACKA"),
    ("DOUBLE SMASHED CHEESEBURGER", "DOUBLE SMASHED CHEESEBURGER"),
];

pub struct CuckoosNestScraper {
    client: Client,
    menus: MenuSet,
}

impl CuckoosNestScraper {
    const URL: &'static str = "https://www.cuckoosnest.se/menyer/lunch";

    pub fn new(client: Client) -> Self {
        Self { client, menus: MenuSet::new() }
    }

    fn parse(&mut self, html: &str) {
        let document = Html::parse_document(html);
        let column_sel = css("div.content-region");
        let Some(column) = document.select(&column_sel).next() else {
            tracing::warn!("swedish menu column not found");
            return;
        };

        let stream_sel = css("h3, h4, p");
        let mut current_category: Option<&'static str> = None;
        let mut items = Vec::new();

        for el in column.select(&stream_sel) {
            let line = text_of(el);
            if line.is_empty() {
                continue;
            }

            let upper = line.to_uppercase();
            if let Some((_, label)) = CATEGORY_KEYWORDS
                .iter()
                .find(|(kw, _)| upper.contains(kw))
            {
                current_category = Some(label);
            } else if el.value().name() == "p" {
                if let Some(mut item) = MenuItem::new(&line) {
                    if let Some(cat) = current_category {
                        item = item.with_category(cat);
                    }
                    items.push(item);
                }
            }
        }

        self.menus.insert_uniform(items);
    }
}

#[async_trait]
impl LunchScraper for CuckoosNestScraper {
    fn name(&self) -> &'static str {
        "CuckoosNestScraper"
    }

    fn menus(&self) -> &MenuSet {
        &self.menus
    }

    async fn fetch(&mut self) -> Result<(), ScrapeError> {
        self.menus.clear();
        let html = self
            .client
            .get(Self::URL)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        self.parse(&html);
        Ok(())
    }
}
