//! L's Kitchen publishes its week on a screen-display app that only exists
//! after script execution, so the page goes through the headless renderer.
//! A missing browser degrades to an empty menu instead of sinking the batch.

use std::time::Duration;

use async_trait::async_trait;
use scraper::Html;

use super::{LunchScraper, css, text_of};
use crate::error::ScrapeError;
use crate::model::{MenuItem, MenuSet, Weekday};
use crate::render;

pub struct LsKitchenScraper {
    menus: MenuSet,
}

impl LsKitchenScraper {
    const URL: &'static str =
        "https://plateimpact-screen.azurewebsites.net/menu/week/ls-kitchen/c74da2cf-aa1a-4d3a-9ba6-08d5569587a1";
    const MARKER: &'static str = "div.day";
    const RENDER_TIMEOUT: Duration = Duration::from_secs(10);

    pub fn new() -> Self {
        Self { menus: MenuSet::new() }
    }

    fn parse(&mut self, html: &str) {
        let document = Html::parse_document(html);
        let day_sel = css("div.day");
        let heading_sel = css("h2");
        let dish_sel = css("crbn-week-menu-ls-kitchen-dish h3");

        for day_div in document.select(&day_sel) {
            let Some(heading) = day_div.select(&heading_sel).next() else {
                continue;
            };
            let Some(day) = Weekday::from_swedish(&text_of(heading)) else {
                continue;
            };

            let items: Vec<_> = day_div
                .select(&dish_sel)
                .filter_map(|h3| MenuItem::new(&text_of(h3)))
                .collect();

            self.menus.insert_day(day, items);
        }
    }
}

impl Default for LsKitchenScraper {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LunchScraper for LsKitchenScraper {
    fn name(&self) -> &'static str {
        "LsKitchenScraper"
    }

    fn menus(&self) -> &MenuSet {
        &self.menus
    }

    async fn fetch(&mut self) -> Result<(), ScrapeError> {
        self.menus.clear();
        match render::fetch_rendered(Self::URL, Self::MARKER, Self::RENDER_TIMEOUT).await {
            Ok(html) => {
                self.parse(&html);
                Ok(())
            }
            Err(ScrapeError::RendererUnavailable(reason)) => {
                tracing::warn!("no render environment, skipping L's Kitchen: {reason}");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        <div class="day">
            <h2>Måndag</h2>
            <crbn-week-menu-ls-kitchen-dish><h3>Kycklinggryta med dragon, serveras med pressad potatis och en sallad på säsongens grönsaker</h3></crbn-week-menu-ls-kitchen-dish>
            <crbn-week-menu-ls-kitchen-dish><h3>Sojabiffar</h3></crbn-week-menu-ls-kitchen-dish>
        </div>
        <div class="day">
            <h2>Helgen</h2>
            <crbn-week-menu-ls-kitchen-dish><h3>Stängt</h3></crbn-week-menu-ls-kitchen-dish>
        </div>
    "#;

    #[test]
    fn swedish_day_headers_key_the_menus() {
        let mut scraper = LsKitchenScraper::new();
        scraper.parse(SAMPLE);

        let monday = scraper.menu_for_day("Monday").unwrap();
        assert_eq!(monday.items.len(), 2);
        assert_eq!(monday.items[1].name, "Sojabiffar");
        assert_eq!(scraper.menus().days().count(), 1);
    }

    #[test]
    fn sentence_length_names_get_relabeled() {
        let mut scraper = LsKitchenScraper::new();
        scraper.parse(SAMPLE);
        let monday = scraper.menu_for_day("monday").unwrap();
        assert_eq!(monday.items[0].name, crate::model::LONG_NAME_MARKER);
        assert!(
            monday.items[0]
                .description
                .as_deref()
                .unwrap()
                .starts_with("Kycklinggryta")
        );
    }
}
