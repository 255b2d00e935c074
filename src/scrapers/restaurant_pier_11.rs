//! Restaurant Pier 11: per-weekday divs with a Swedish-language wrapper.
//! Dish rows read "name, description" and everything costs the same.

use async_trait::async_trait;
use reqwest::Client;
use scraper::Html;

use super::{LunchScraper, css, text_of};
use crate::error::ScrapeError;
use crate::model::{MenuItem, MenuSet, Weekday};

const PRICE: &str = "110 kr";

pub struct RestaurantPier11Scraper {
    client: Client,
    menus: MenuSet,
}

impl RestaurantPier11Scraper {
    const URL: &'static str =
        "https://ericssonbynordrest.se/restaurang/restaurant-pier-11/#lunch-menu";

    pub fn new(client: Client) -> Self {
        Self { client, menus: MenuSet::new() }
    }

    fn parse(&mut self, html: &str) {
        let document = Html::parse_document(html);
        let weekday_sel = css("div.weekday-item");
        let swe_sel = css(".sprak-wrapper-swe");
        let h3_sel = css("h3");
        let dish_sel = css(".ratter");

        for weekday_div in document.select(&weekday_sel) {
            let Some(wrapper) = weekday_div.select(&swe_sel).next() else {
                continue;
            };
            let Some(heading) = wrapper.select(&h3_sel).next() else {
                continue;
            };
            let Some(day) = Weekday::parse(&text_of(heading)) else {
                continue;
            };

            let mut items = Vec::new();
            for dish in wrapper.select(&dish_sel) {
                let full = text_of(dish);
                if full.is_empty() {
                    continue;
                }
                let (name, desc) = match full.split_once(',') {
                    Some((name, desc)) => (name.trim(), Some(desc.trim())),
                    None => (full.as_str(), None),
                };
                let Some(mut item) = MenuItem::new(name) else {
                    continue;
                };
                if let Some(desc) = desc {
                    item = item.with_description(desc);
                }
                items.push(item.with_category("Dagens").with_price(PRICE));
            }

            self.menus.insert_day(day, items);
        }

        let days: Vec<_> = self.menus.days().collect();
        tracing::info!(?days, "parsed Pier 11 menu");
    }
}

#[async_trait]
impl LunchScraper for RestaurantPier11Scraper {
    fn name(&self) -> &'static str {
        "RestaurantPier11Scraper"
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
        <div class="weekday-item">
            <div class="sprak-wrapper-swe">
                <h3>Monday</h3>
                <div class="ratter">Pankopanerad fisk, kall dillsås, kokt potatis</div>
                <div class="ratter">Grönsaksbiffar</div>
            </div>
            <div class="sprak-wrapper-eng">
                <h3>Monday</h3>
                <div class="ratter">Breaded fish, dill sauce</div>
            </div>
        </div>
    "#;

    #[test]
    fn swedish_wrapper_wins_and_commas_split() {
        let mut scraper = RestaurantPier11Scraper::new(Client::new());
        scraper.parse(SAMPLE);

        let monday = scraper.menu_for_day("monday").unwrap();
        assert_eq!(monday.items.len(), 2);
        assert_eq!(monday.items[0].name, "Pankopanerad fisk");
        assert_eq!(
            monday.items[0].description.as_deref(),
            Some("kall dillsås, kokt potatis")
        );
        assert_eq!(monday.items[0].price.as_deref(), Some(PRICE));
        assert_eq!(monday.items[1].description, None);
        assert_eq!(monday.items[1].category.as_deref(), Some("Dagens"));
    }
}
