//! Kooperativet publishes one `<div id="monday">`..`<div id="friday">`
//! section per weekday, with `<strong>` spans marking category changes.

use async_trait::async_trait;
use reqwest::Client;
use scraper::Html;

use super::{LunchScraper, css, text_without};
use crate::error::ScrapeError;
use crate::model::{MenuItem, MenuSet, Weekday};
use crate::text;

pub struct KooperativetScraper {
    client: Client,
    menus: MenuSet,
}

impl KooperativetScraper {
    const URL: &'static str = "https://www.kooperativet.se/";

    pub fn new(client: Client) -> Self {
        Self { client, menus: MenuSet::new() }
    }

    fn parse(&mut self, html: &str) {
        let document = Html::parse_document(html);
        let strong_sel = css("strong");
        let p_sel = css("p");

        for day in Weekday::ALL {
            let section_sel = css(&format!("div#{}", day.as_str()));
            let Some(section) = document.select(&section_sel).next() else {
                continue;
            };

            let mut current_category: Option<String> = None;
            let mut items = Vec::new();

            for p in section.select(&p_sel) {
                if let Some(strong) = p.select(&strong_sel).next() {
                    let label = text::clean_category(&super::text_of(strong));
                    if !label.is_empty() {
                        current_category = Some(label);
                    }
                }

                let line = text_without(p, &["strong"]);
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
                if let Some(cat) = &current_category {
                    item = item.with_category(cat);
                }
                items.push(item);
            }

            self.menus.insert_day(day, items);
        }
    }
}

#[async_trait]
impl LunchScraper for KooperativetScraper {
    fn name(&self) -> &'static str {
        "KooperativetScraper"
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
