//! Mimolett: fixed weekly menu-list blocks, each with a title heading as
//! category and name/description list items.

use async_trait::async_trait;
use reqwest::Client;
use scraper::Html;

use super::{LunchScraper, css, text_of};
use crate::error::ScrapeError;
use crate::model::{MenuItem, MenuSet};

pub struct MimolettScraper {
    client: Client,
    menus: MenuSet,
}

impl MimolettScraper {
    const URL: &'static str = "https://restaurangmimolett.se/lunch/";

    pub fn new(client: Client) -> Self {
        Self { client, menus: MenuSet::new() }
    }

    fn parse(&mut self, html: &str) {
        let document = Html::parse_document(html);
        let container_sel = css("div.menu-list");
        let title_sel = css("h2.menu-list__title");
        let li_sel = css("li.menu-list__item");
        let name_sel = css(".item_title");
        let desc_sel = css(".desc__content");

        let mut items = Vec::new();

        for container in document.select(&container_sel) {
            let Some(category) = container.select(&title_sel).next().map(text_of) else {
                continue;
            };

            for li in container.select(&li_sel) {
                let Some(name) = li.select(&name_sel).next() else {
                    continue;
                };
                let Some(mut item) = MenuItem::new(&text_of(name)) else {
                    continue;
                };
                if let Some(desc) = li.select(&desc_sel).next() {
                    item = item.with_description(&text_of(desc));
                }
                items.push(item.with_category(&category));
            }
        }

        self.menus.insert_uniform(items);
    }
}

#[async_trait]
impl LunchScraper for MimolettScraper {
    fn name(&self) -> &'static str {
        "MimolettScraper"
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
        <div class="menu-list">
            <h2 class="menu-list__title">Veckans lunch</h2>
            <ul>
                <li class="menu-list__item">
                    <span class="item_title">Confiterad kyckling</span>
                    <div class="desc__content">sauce suprême, rostad potatis</div>
                </li>
                <li class="menu-list__item">
                    <span class="item_title">Quiche Lorraine</span>
                </li>
            </ul>
        </div>
    "#;

    #[test]
    fn list_titles_become_categories() {
        let mut scraper = MimolettScraper::new(Client::new());
        scraper.parse(SAMPLE);

        let menu = scraper.menu_for_day("thursday").unwrap();
        assert_eq!(menu.items.len(), 2);
        assert_eq!(menu.items[0].name, "Confiterad kyckling");
        assert_eq!(menu.items[0].category.as_deref(), Some("Veckans lunch"));
        assert_eq!(
            menu.items[0].description.as_deref(),
            Some("sauce suprême, rostad potatis")
        );
        assert_eq!(menu.items[1].description, None);
    }
}
