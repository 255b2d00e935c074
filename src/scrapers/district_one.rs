//! District One: one long paragraph stream where Swedish weekday tokens
//! open a new day bucket and underlined spans mark category changes.
//! Anything before the first weekday header is preamble and dropped.

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Client;
use scraper::Html;

use super::{LunchScraper, css, text_of};
use crate::error::ScrapeError;
use crate::model::{MenuItem, MenuSet, Weekday};
use crate::text;

pub struct DistrictOneScraper {
    client: Client,
    menus: MenuSet,
}

impl DistrictOneScraper {
    const URL: &'static str = "https://www.districtone.se/lunch.html";

    /// Footer phrases after which nothing menu-related follows.
    const TERMINATORS: [&'static str; 2] = ["kontakta oss", "oppettider"];

    pub fn new(client: Client) -> Self {
        Self { client, menus: MenuSet::new() }
    }

    fn parse(&mut self, html: &str) {
        let document = Html::parse_document(html);
        let container_sel = css("div[class*='styles_contentContainer']");
        let Some(container) = document.select(&container_sel).next() else {
            tracing::debug!("lunch content container not found");
            return;
        };

        let p_sel = css("p");
        let underline_sel = css("span[style*='underline']");

        let mut current_day: Option<Weekday> = None;
        let mut current_category: Option<String> = None;
        let mut buckets: HashMap<Weekday, Vec<MenuItem>> = HashMap::new();

        for p in container.select(&p_sel) {
            let line = text_of(p);
            let folded = text::fold_ascii_lower(&line);

            if Self::TERMINATORS.iter().any(|t| folded.contains(t)) {
                break;
            }

            if let Some(day) = Weekday::from_swedish(&line) {
                current_day = Some(day);
                current_category = None;
                continue;
            }

            // Text seen before any weekday header is not menu content.
            let Some(day) = current_day else { continue };

            if p.select(&underline_sel).next().is_some() {
                current_category = Some(line);
                continue;
            }

            if text::is_noise(&line) || line.starts_with("...") {
                continue;
            }

            if let Some(mut item) = MenuItem::new(&line) {
                if let Some(cat) = &current_category {
                    item = item.with_category(cat);
                }
                buckets.entry(day).or_default().push(item);
            }
        }

        for (day, items) in buckets {
            self.menus.insert_day(day, items);
        }
    }
}

#[async_trait]
impl LunchScraper for DistrictOneScraper {
    fn name(&self) -> &'static str {
        "DistrictOneScraper"
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
