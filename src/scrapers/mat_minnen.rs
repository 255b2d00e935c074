//! Mat & Minnen: Swedish weekday headers partition a paragraph stream, and
//! a "Veckans sallad" section holds weekly add-ons that join every
//! populated day's menu.

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Client;
use scraper::Html;

use super::{LunchScraper, css, text_of};
use crate::error::ScrapeError;
use crate::model::{MenuItem, MenuSet, Weekday};
use crate::text;

/// Where the cursor currently points in the paragraph stream.
enum Cursor {
    None,
    Day(Weekday),
    WeeklySalad,
}

pub struct MatMinnenScraper {
    client: Client,
    menus: MenuSet,
}

impl MatMinnenScraper {
    const URL: &'static str = "https://matminnen.se/lunchmeny";

    pub fn new(client: Client) -> Self {
        Self { client, menus: MenuSet::new() }
    }

    fn parse(&mut self, html: &str) {
        let document = Html::parse_document(html);
        let body_sel = css(".contentgroup__body");
        let Some(body) = document.select(&body_sel).next() else {
            return;
        };

        let p_sel = css("p");
        let mut cursor = Cursor::None;
        let mut buckets: HashMap<Weekday, Vec<MenuItem>> = HashMap::new();
        let mut weekly: Vec<MenuItem> = Vec::new();

        for p in body.select(&p_sel) {
            let line = text_of(p);
            if line.is_empty() {
                continue;
            }

            if let Some(day) = Weekday::from_swedish(&line) {
                cursor = Cursor::Day(day);
                continue;
            }
            if text::fold_ascii_lower(&line).contains("veckans sallad") {
                cursor = Cursor::WeeklySalad;
                continue;
            }
            if text::is_noise(&line) {
                continue;
            }

            let (name, desc) = text::split_name_description(&line);
            let Some(mut item) = MenuItem::new(&name) else {
                continue;
            };
            if let Some(desc) = desc {
                item = item.with_description(&desc);
            }

            match cursor {
                Cursor::Day(day) => buckets.entry(day).or_default().push(item),
                Cursor::WeeklySalad => weekly.push(item.with_category("Veckans sallad")),
                Cursor::None => {}
            }
        }

        for (day, items) in buckets {
            self.menus.insert_day(day, items);
        }
        self.menus.append_to_existing(&weekly);
    }
}

#[async_trait]
impl LunchScraper for MatMinnenScraper {
    fn name(&self) -> &'static str {
        "MatMinnenScraper"
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
