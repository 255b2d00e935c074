//! Uni3 World of Food publishes a weekly RSS feed. Each `<item>` title is
//! `"<swedish weekday>, DD-MM-YYYY"` and the description holds HTML
//! paragraphs with a `<strong>` category lead-in and an `<em>` English
//! translation we discard.

use std::sync::LazyLock;

use async_trait::async_trait;
use quick_xml::Reader;
use quick_xml::events::Event;
use regex::Regex;
use reqwest::Client;
use scraper::Html;

use super::{LunchScraper, css, text_of, text_without};
use crate::error::ScrapeError;
use crate::model::{MenuItem, MenuSet, Weekday};

static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\p{L}+),\s*\d{2}-\d{2}-\d{4}").unwrap());

pub struct Uni3WorldOfFoodScraper {
    client: Client,
    menus: MenuSet,
}

impl Uni3WorldOfFoodScraper {
    const RSS_URL: &'static str =
        "https://www.compass-group.se/menuapi/feed/rss/current-week?costNumber=448305&language=sv";

    pub fn new(client: Client) -> Self {
        Self { client, menus: MenuSet::new() }
    }

    fn parse(&mut self, xml: &str) {
        for (title, description) in rss_items(xml) {
            let Some(caps) = TITLE_RE.captures(title.trim()) else {
                continue;
            };
            let Some(day) = Weekday::from_swedish(&caps[1]) else {
                continue;
            };

            let fragment = Html::parse_fragment(&description);
            let p_sel = css("p");
            let strong_sel = css("strong");
            let mut items = Vec::new();

            for p in fragment.select(&p_sel) {
                // Only paragraphs with a bold lead-in are dishes.
                let Some(strong) = p.select(&strong_sel).next() else {
                    continue;
                };
                let category = text_of(strong);
                let name = text_without(p, &["strong", "em"]);
                if let Some(item) = MenuItem::new(&name) {
                    items.push(item.with_category(&category));
                }
            }

            self.menus.insert_day(day, items);
        }

        let days: Vec<_> = self.menus.days().collect();
        tracing::info!(?days, "parsed Uni3 feed");
    }
}

/// `(title, description)` pairs of every `<item>` in an RSS document.
fn rss_items(xml: &str) -> Vec<(String, String)> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut items = Vec::new();
    let mut in_item = false;
    let mut field: Option<&'static str> = None;
    let mut title = String::new();
    let mut description = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"item" => {
                    in_item = true;
                    title.clear();
                    description.clear();
                }
                b"title" if in_item => field = Some("title"),
                b"description" if in_item => field = Some("description"),
                _ => field = None,
            },
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"item" => {
                    in_item = false;
                    items.push((title.clone(), description.clone()));
                }
                _ => field = None,
            },
            Ok(Event::Text(t)) => {
                if let Ok(text) = t.unescape() {
                    match field {
                        Some("title") => title.push_str(&text),
                        Some("description") => description.push_str(&text),
                        _ => {}
                    }
                }
            }
            Ok(Event::CData(t)) => {
                let text = String::from_utf8_lossy(&t.into_inner()).into_owned();
                match field {
                    Some("title") => title.push_str(&text),
                    Some("description") => description.push_str(&text),
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                tracing::warn!("rss parse error: {e}");
                break;
            }
        }
    }

    items
}

#[async_trait]
impl LunchScraper for Uni3WorldOfFoodScraper {
    fn name(&self) -> &'static str {
        "Uni3WorldOfFoodScraper"
    }

    fn menus(&self) -> &MenuSet {
        &self.menus
    }

    async fn fetch(&mut self) -> Result<(), ScrapeError> {
        self.menus.clear();
        let xml = self
            .client
            .get(Self::RSS_URL)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        self.parse(&xml);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
        <rss version="2.0"><channel>
            <title>World of Food</title>
            <item>
                <title>Måndag, 25-08-2025</title>
                <description>&lt;p&gt;&lt;strong&gt;Street food:&lt;/strong&gt; Bulgogi bowl med picklad rättika &lt;em&gt;Bulgogi bowl&lt;/em&gt;&lt;/p&gt;&lt;p&gt;&lt;strong&gt;Green:&lt;/strong&gt; Chana masala&lt;/p&gt;</description>
            </item>
            <item>
                <title>Lördag, 30-08-2025</title>
                <description>&lt;p&gt;&lt;strong&gt;Stängt&lt;/strong&gt;&lt;/p&gt;</description>
            </item>
        </channel></rss>"#;

    #[test]
    fn feed_entries_map_to_weekdays() {
        let mut scraper = Uni3WorldOfFoodScraper::new(Client::new());
        scraper.parse(SAMPLE);

        let monday = scraper.menu_for_day("monday").unwrap();
        assert_eq!(monday.items.len(), 2);
        assert_eq!(monday.items[0].name, "Bulgogi bowl med picklad rättika");
        assert_eq!(monday.items[0].category.as_deref(), Some("Street food"));
        assert_eq!(monday.items[1].category.as_deref(), Some("Green"));
    }

    #[test]
    fn weekend_entries_are_ignored() {
        let mut scraper = Uni3WorldOfFoodScraper::new(Client::new());
        scraper.parse(SAMPLE);
        assert_eq!(scraper.menus().days().count(), 1);
    }

    #[test]
    fn channel_title_outside_items_is_ignored() {
        let items = rss_items(SAMPLE);
        assert_eq!(items.len(), 2);
        assert!(items[0].0.starts_with("Måndag"));
    }
}
