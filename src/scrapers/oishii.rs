//! Oishii: fixed weekly menu. `<h1>` headings name the categories and each
//! is followed (somewhere later in the document) by a price-list block of
//! dot-connected rows: name span, optional price span, optional
//! description row.

use async_trait::async_trait;
use reqwest::Client;
use scraper::{ElementRef, Html};

use super::{LunchScraper, css, text_of};
use crate::error::ScrapeError;
use crate::model::{MenuItem, MenuSet};

pub struct OishiiScraper {
    client: Client,
    menus: MenuSet,
}

impl OishiiScraper {
    const URL: &'static str = "https://oishii.se/lunchmeny/";

    pub fn new(client: Client) -> Self {
        Self { client, menus: MenuSet::new() }
    }

    fn parse(&mut self, html: &str) {
        let document = Html::parse_document(html);
        let row_sel = css("div.menurow");
        let span_sel = css("div.dotconnected span.endsofdots");
        let desc_sel = css("div.description");

        // Walk the document in order, keeping the most recent <h1> as the
        // category cursor for each price-list block that follows.
        let mut current_category: Option<String> = None;
        let mut items = Vec::new();

        for node in document.root_element().descendants() {
            let Some(el) = ElementRef::wrap(node) else {
                continue;
            };
            if el.value().name() == "h1" {
                let heading = text_of(el);
                if !heading.is_empty() {
                    current_category = Some(heading);
                }
                continue;
            }

            let is_pricelist = el.value().name() == "div"
                && el.value().classes().any(|c| c == "pricelist_container");
            if !is_pricelist {
                continue;
            }
            let Some(category) = &current_category else {
                continue;
            };

            for row in el.select(&row_sel) {
                let spans: Vec<ElementRef<'_>> = row.select(&span_sel).collect();
                let (name, price) = match spans.as_slice() {
                    [] => continue,
                    [only] => (text_of(*only), None),
                    [first, .., last] => (text_of(*first), Some(text_of(*last))),
                };

                let Some(mut item) = MenuItem::new(&name) else {
                    continue;
                };
                if let Some(price) = price {
                    item = item.with_price(&price);
                }
                if let Some(desc) = row.select(&desc_sel).next() {
                    item = item.with_description(&text_of(desc));
                }
                items.push(item.with_category(category));
            }
        }

        self.menus.insert_uniform(items);
    }
}

#[async_trait]
impl LunchScraper for OishiiScraper {
    fn name(&self) -> &'static str {
        "OishiiScraper"
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

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        <h1>Pokébowls</h1>
        <div class="pricelist_container">
            <div class="menurow">
                <div class="dotconnected">
                    <span class="endsofdots">Salmon bowl</span>
                    <span class="endsofdots">139:-</span>
                </div>
                <div class="description">lax, edamame, sjögräs</div>
            </div>
            <div class="menurow">
                <div class="dotconnected">
                    <span class="endsofdots">Veggie bowl</span>
                </div>
            </div>
        </div>
        <h1>Nigiri</h1>
        <div class="pricelist_container">
            <div class="menurow">
                <div class="dotconnected">
                    <span class="endsofdots">Lax nigiri 2 bitar</span>
                    <span class="endsofdots">45:-</span>
                </div>
            </div>
        </div>
    "#;

    #[test]
    fn rows_pick_up_the_preceding_heading_as_category() {
        let mut scraper = OishiiScraper::new(Client::new());
        scraper.parse(SAMPLE);

        let menu = scraper.menu_for_day("monday").unwrap();
        assert_eq!(menu.items.len(), 3);
        assert_eq!(menu.items[0].name, "Salmon bowl");
        assert_eq!(menu.items[0].price.as_deref(), Some("139:-"));
        assert_eq!(menu.items[0].description.as_deref(), Some("lax, edamame, sjögräs"));
        assert_eq!(menu.items[0].category.as_deref(), Some("Pokébowls"));
        assert_eq!(menu.items[1].price, None);
        assert_eq!(menu.items[2].category.as_deref(), Some("Nigiri"));
    }
}
