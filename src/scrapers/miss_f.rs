//! Miss F: a fixed weekly menu of heading/menu-block pairs. A local sample
//! file, when present, overrides the live fetch — handy when the site is
//! being reworked.

use std::path::PathBuf;

use async_trait::async_trait;
use reqwest::Client;
use scraper::{ElementRef, Html};

use super::{LunchScraper, css, text_of};
use crate::error::ScrapeError;
use crate::model::{MenuItem, MenuSet};

pub struct MissFScraper {
    client: Client,
    local_file: PathBuf,
    menus: MenuSet,
}

impl MissFScraper {
    const URL: &'static str = "https://www.missf.se/";

    pub fn new(client: Client) -> Self {
        Self {
            client,
            local_file: PathBuf::from("sample_miss_f.htm"),
            menus: MenuSet::new(),
        }
    }

    fn parse(&mut self, html: &str) {
        let document = Html::parse_document(html);
        let heading_wrap_sel = css("div.seasidetms_heading_wrap");
        let h3_sel = css("h3.seasidetms_heading");
        let item_sel = css("div.seasidetms_menu_item");
        let title_sel = css("h5.menu_title");
        let desc_sel = css("ul.menu_feature_list li");

        let mut items = Vec::new();

        for wrap in document.select(&heading_wrap_sel) {
            let Some(h3) = wrap.select(&h3_sel).next() else {
                continue;
            };
            let category = text_of(h3);

            // The dish list is the nearest following sibling menu block.
            let Some(menu_block) = next_sibling_menu(wrap) else {
                continue;
            };

            for item_div in menu_block.select(&item_sel) {
                let Some(title) = item_div.select(&title_sel).next() else {
                    continue;
                };
                let Some(mut item) = MenuItem::new(&text_of(title)) else {
                    continue;
                };
                if let Some(desc) = item_div.select(&desc_sel).next() {
                    item = item.with_description(&text_of(desc));
                }
                items.push(item.with_category(&category));
            }
        }

        self.menus.insert_uniform(items);
    }
}

fn next_sibling_menu<'a>(wrap: ElementRef<'a>) -> Option<ElementRef<'a>> {
    wrap.next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().classes().any(|c| c == "seasidetms_menu"))
}

#[async_trait]
impl LunchScraper for MissFScraper {
    fn name(&self) -> &'static str {
        "MissFScraper"
    }

    fn menus(&self) -> &MenuSet {
        &self.menus
    }

    async fn fetch(&mut self) -> Result<(), ScrapeError> {
        self.menus.clear();
        let html = if self.local_file.exists() {
            std::fs::read_to_string(&self.local_file).map_err(|source| {
                ScrapeError::DataFile { path: self.local_file.clone(), source }
            })?
        } else {
            self.client
                .get(Self::URL)
                .send()
                .await?
                .error_for_status()?
                .text()
                .await?
        };
        self.parse(&html);
        Ok(())
    }
}
