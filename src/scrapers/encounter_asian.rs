//! Encounter Asian Cuisine lives inside a script-rendered MUI app, so the
//! page goes through the headless renderer. Titles carry a category prefix
//! ("SUSHI - Mix 12 bitar" → category "SUSHI"), and the same menu applies
//! all week.

use std::time::Duration;

use async_trait::async_trait;
use scraper::Html;

use super::{LunchScraper, css, text_of};
use crate::error::ScrapeError;
use crate::model::{MenuItem, MenuSet};
use crate::render;

pub struct EncounterAsianScraper {
    menus: MenuSet,
}

impl EncounterAsianScraper {
    const URL: &'static str = "https://tamed.se/take-away-meny/encounter-sushi";
    const MARKER: &'static str = "ul[class*='MuiList-root']";
    const RENDER_TIMEOUT: Duration = Duration::from_secs(10);

    pub fn new() -> Self {
        Self { menus: MenuSet::new() }
    }

    fn parse(&mut self, html: &str) {
        let document = Html::parse_document(html);
        let list_sel = css("ul[class*='MuiList-root']");
        let Some(list) = document.select(&list_sel).next() else {
            tracing::warn!("menu list container not found");
            return;
        };

        let block_sel = css("div[class*='MuiListItemText-root']");
        let title_sel = css("span[class*='MuiListItemText-primary']");
        let desc_sel = css("p[class*='MuiListItemText-secondary']");

        let mut items = Vec::new();

        for block in list.select(&block_sel) {
            let Some(title) = block.select(&title_sel).next() else {
                continue;
            };
            let full = text_of(title);
            let (category, name) = split_category_prefix(&full);

            let Some(mut item) = MenuItem::new(name) else {
                continue;
            };
            if let Some(desc) = block.select(&desc_sel).next() {
                item = item.with_description(&text_of(desc));
            }
            items.push(item.with_category(category));
        }

        if items.is_empty() {
            tracing::warn!("no menu items parsed");
            return;
        }
        self.menus.insert_uniform(items);
    }
}

/// `"SUSHI - Mix 12 bitar"` → `("SUSHI", "Mix 12 bitar")`; without a dash the
/// first word is the category; a single word is both.
fn split_category_prefix(full: &str) -> (&str, &str) {
    if let Some((category, name)) = full.split_once(" - ") {
        (category.trim(), name.trim())
    } else if let Some((category, name)) = full.split_once(' ') {
        (category, name)
    } else {
        (full, full)
    }
}

impl Default for EncounterAsianScraper {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LunchScraper for EncounterAsianScraper {
    fn name(&self) -> &'static str {
        "EncounterAsianScraper"
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
                tracing::warn!("no render environment, skipping Encounter Asian: {reason}");
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
        <ul class="MuiList-root css-abc123">
            <div class="MuiListItemText-root">
                <span class="MuiListItemText-primary">SUSHI - Mix 12 bitar</span>
                <p class="MuiListItemText-secondary">lax, räka, avokado</p>
            </div>
            <div class="MuiListItemText-root">
                <span class="MuiListItemText-primary">POKE Lax</span>
            </div>
        </ul>
    "#;

    #[test]
    fn category_prefix_is_split_from_title() {
        let mut scraper = EncounterAsianScraper::new();
        scraper.parse(SAMPLE);

        let menu = scraper.menu_for_day("friday").unwrap();
        assert_eq!(menu.items[0].category.as_deref(), Some("SUSHI"));
        assert_eq!(menu.items[0].name, "Mix 12 bitar");
        assert_eq!(menu.items[0].description.as_deref(), Some("lax, räka, avokado"));
        assert_eq!(menu.items[1].category.as_deref(), Some("POKE"));
        assert_eq!(menu.items[1].name, "Lax");
    }

    #[test]
    fn split_rules() {
        assert_eq!(split_category_prefix("SUSHI - Mix"), ("SUSHI", "Mix"));
        assert_eq!(split_category_prefix("POKE Lax"), ("POKE", "Lax"));
        assert_eq!(split_category_prefix("Miso"), ("Miso", "Miso"));
    }
}
