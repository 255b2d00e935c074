//! Bistrot mixes per-day and shared sections in one menu list: "Meny vecka
//! NN" applies to every day, "Vegetarisk Måndag–Tis" to the days named in
//! its header, plain weekday headers to a single day, and a standing
//! caesar salad to all days. Within a section, bold title lines pair with
//! the following plain line as name/description.

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Client;
use scraper::Html;

use super::{LunchScraper, css, text_of};
use crate::error::ScrapeError;
use crate::model::{MenuItem, MenuSet, Weekday};
use crate::text;

const SECTION_KEYWORDS: [&str; 8] = [
    "vecka",
    "vegetarisk",
    "mandag",
    "tisdag",
    "onsdag",
    "torsdag",
    "fredag",
    "caesarsallad",
];

pub struct BistrotScraper {
    client: Client,
    menus: MenuSet,
}

impl BistrotScraper {
    const URL: &'static str = "https://bistrot.se/";

    pub fn new(client: Client) -> Self {
        Self { client, menus: MenuSet::new() }
    }

    fn parse(&mut self, html: &str) {
        let document = Html::parse_document(html);
        let menu_sel = css("div.fdm-the-menu ul.fdm-menu");
        let Some(section) = document.select(&menu_sel).next() else {
            tracing::debug!("no menu list on Bistrot page");
            return;
        };

        let li_sel = css("li.fdm-item");
        let title_sel = css("p.fdm-item-title");
        let content_sel = css("div.fdm-item-content p");

        let mut shared: HashMap<Weekday, Vec<MenuItem>> = HashMap::new();
        let mut daily: HashMap<Weekday, Vec<MenuItem>> = HashMap::new();

        for li in section.select(&li_sel) {
            let Some(title) = li.select(&title_sel).next() else {
                continue;
            };
            let header = text_of(title);
            let lines: Vec<String> = li
                .select(&content_sel)
                .map(text_of)
                .filter(|t| !t.is_empty())
                .collect();
            let groups = group_lines(&lines);
            let folded = text::fold_ascii_lower(&header);

            if folded.contains("vecka") {
                push_items(&mut shared, &Weekday::ALL, &groups, "Veckans");
            } else if folded.contains("vegetarisk") {
                let days: Vec<Weekday> = Weekday::ALL
                    .into_iter()
                    .filter(|d| folded.contains(swedish_name(*d)))
                    .collect();
                push_items(&mut shared, &days, &groups, &header);
            } else if let Some(day) = Weekday::from_swedish(&header) {
                push_items(&mut daily, &[day], &groups, "Lunch");
            } else if folded == "caesarsallad" {
                push_items(&mut shared, &Weekday::ALL, &groups, "Caesarsallad");
            }
        }

        for day in Weekday::ALL {
            let mut items = shared.remove(&day).unwrap_or_default();
            items.extend(daily.remove(&day).unwrap_or_default());
            self.menus.insert_day(day, items);
        }
    }
}

fn swedish_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Monday => "mandag",
        Weekday::Tuesday => "tisdag",
        Weekday::Wednesday => "onsdag",
        Weekday::Thursday => "torsdag",
        Weekday::Friday => "fredag",
    }
}

/// Pairs each title line with the following line as description, unless the
/// follower opens a new section of its own.
fn group_lines(lines: &[String]) -> Vec<(String, Option<String>)> {
    let mut pairs = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        let name = lines[i].clone();
        let mut desc = None;
        if let Some(next) = lines.get(i + 1) {
            if !is_new_dish(next) {
                desc = Some(next.clone());
                i += 1;
            }
        }
        pairs.push((name, desc));
        i += 1;
    }
    pairs
}

fn is_new_dish(line: &str) -> bool {
    let folded = text::fold_ascii_lower(line);
    SECTION_KEYWORDS.iter().any(|kw| folded.contains(kw))
}

fn push_items(
    target: &mut HashMap<Weekday, Vec<MenuItem>>,
    days: &[Weekday],
    groups: &[(String, Option<String>)],
    category: &str,
) {
    for &day in days {
        for (name, desc) in groups {
            let Some(mut item) = MenuItem::new(name) else {
                continue;
            };
            if let Some(desc) = desc {
                item = item.with_description(desc);
            }
            target.entry(day).or_default().push(item.with_category(category));
        }
    }
}

#[async_trait]
impl LunchScraper for BistrotScraper {
    fn name(&self) -> &'static str {
        "BistrotScraper"
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
        <div class="fdm-the-menu"><ul class="fdm-menu">
            <li class="fdm-item">
                <p class="fdm-item-title">Meny vecka 21</p>
                <div class="fdm-item-content">
                    <p>Moules frites</p>
                    <p>blåmusslor, pommes, aioli</p>
                </div>
            </li>
            <li class="fdm-item">
                <p class="fdm-item-title">Vegetarisk Måndag–Tisdag</p>
                <div class="fdm-item-content">
                    <p>Ratatouille</p>
                    <p>ugnsbakade grönsaker</p>
                </div>
            </li>
            <li class="fdm-item">
                <p class="fdm-item-title">Onsdag</p>
                <div class="fdm-item-content">
                    <p>Boeuf bourguignon</p>
                    <p>rödvinsbräserad högrev</p>
                </div>
            </li>
        </ul></div>
    "#;

    #[test]
    fn weekly_section_reaches_every_day() {
        let mut scraper = BistrotScraper::new(Client::new());
        scraper.parse(SAMPLE);

        for day in ["monday", "tuesday", "wednesday", "thursday", "friday"] {
            let menu = scraper.menu_for_day(day).unwrap();
            assert_eq!(menu.items[0].name, "Moules frites");
            assert_eq!(menu.items[0].category.as_deref(), Some("Veckans"));
            assert_eq!(
                menu.items[0].description.as_deref(),
                Some("blåmusslor, pommes, aioli")
            );
        }
    }

    #[test]
    fn vegetarian_section_hits_only_named_days() {
        let mut scraper = BistrotScraper::new(Client::new());
        scraper.parse(SAMPLE);

        let monday = scraper.menu_for_day("monday").unwrap();
        assert!(monday.items.iter().any(|i| i.name == "Ratatouille"));
        let wednesday = scraper.menu_for_day("wednesday").unwrap();
        assert!(wednesday.items.iter().all(|i| i.name != "Ratatouille"));
    }

    #[test]
    fn weekday_sections_land_after_shared_items() {
        let mut scraper = BistrotScraper::new(Client::new());
        scraper.parse(SAMPLE);

        let wednesday = scraper.menu_for_day("wednesday").unwrap();
        let last = wednesday.items.last().unwrap();
        assert_eq!(last.name, "Boeuf bourguignon");
        assert_eq!(last.category.as_deref(), Some("Lunch"));
    }
}
