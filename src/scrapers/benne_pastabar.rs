//! Benne Pastabar: a fixed weekly card menu. Pasta dishes and the guest
//! "Visitor" dish live in `<article>` blocks, snacks in a separate bites
//! wrapper. Same list every weekday.

use async_trait::async_trait;
use reqwest::Client;
use scraper::Html;

use super::{LunchScraper, css, text_of};
use crate::error::ScrapeError;
use crate::model::{MenuItem, MenuSet};

pub struct BennePastabarScraper {
    client: Client,
    menus: MenuSet,
}

impl BennePastabarScraper {
    const URL: &'static str = "https://bennepastabar.se/#menu";

    pub fn new(client: Client) -> Self {
        Self { client, menus: MenuSet::new() }
    }

    fn parse(&mut self, html: &str) {
        let document = Html::parse_document(html);
        let article_sel = css("article");
        let name_sel = css("h4");
        let desc_sel = css("p");
        let visitor_sel = css(".thevisitor-lable");
        let bites_sel = css("div.bites-wrapper .figure");

        let mut pasta = Vec::new();
        let mut visitor = Vec::new();
        let mut bites = Vec::new();

        for article in document.select(&article_sel) {
            let (Some(name), Some(desc)) = (
                article.select(&name_sel).next(),
                article.select(&desc_sel).next(),
            ) else {
                continue;
            };
            let Some(item) = MenuItem::new(&text_of(name)) else {
                continue;
            };
            let item = item.with_description(&text_of(desc));
            if article.select(&visitor_sel).next().is_some() {
                visitor.push(item.with_category("The Visitor"));
            } else {
                pasta.push(item.with_category("Benne Pasta"));
            }
        }

        for figure in document.select(&bites_sel) {
            let (Some(name), Some(desc)) = (
                figure.select(&name_sel).next(),
                figure.select(&desc_sel).next(),
            ) else {
                continue;
            };
            if let Some(item) = MenuItem::new(&text_of(name)) {
                bites.push(
                    item.with_description(&text_of(desc)).with_category("Benne Bites"),
                );
            }
        }

        let mut items = pasta;
        items.extend(visitor);
        items.extend(bites);
        self.menus.insert_uniform(items);
    }
}

#[async_trait]
impl LunchScraper for BennePastabarScraper {
    fn name(&self) -> &'static str {
        "BennePastabarScraper"
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
