//! Bombay Bistro rotates four numbered weekly menus ("LUNCH 1".."LUNCH 4").
//! The active section is picked by calendar week, weekday `<h5>` headers
//! partition its paragraphs, and a trailing "ANDRA ALTERNATIV" section
//! applies to every day of the week.
//!
//! Dish names are printed in all caps with the description on the following
//! lowercase lines.

use std::collections::HashMap;
use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use scraper::Html;

use super::{LunchScraper, css, text_lines, text_of};
use crate::cycle;
use crate::error::ScrapeError;
use crate::model::{MenuItem, MenuSet, Weekday};
use crate::text;

static LUNCH_HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^LUNCH\s+(\d+)$").unwrap());

const ALT_HEADER: &str = "ANDRA ALTERNATIV";
const LUNCH_PRICE: &str = "129 kr";
const CYCLE_COUNT: u32 = 4;

pub struct BombayBistroScraper {
    client: Client,
    menus: MenuSet,
}

impl BombayBistroScraper {
    const URL: &'static str = "https://www.bombaybistro.se/lunch/";

    pub fn new(client: Client) -> Self {
        Self { client, menus: MenuSet::new() }
    }

    fn parse(&mut self, html: &str, week: u32) {
        let target = cycle::cycle_index(week, CYCLE_COUNT);
        tracing::debug!(week, target, "selecting lunch cycle");

        let document = Html::parse_document(html);
        let stream_sel = css("h2, h5, p");

        let mut in_section = false;
        let mut current_day: Option<Weekday> = None;
        let mut collecting_alt = false;
        let mut day_blocks: HashMap<Weekday, Vec<String>> = HashMap::new();
        let mut alt_lines: Vec<String> = Vec::new();

        for el in document.select(&stream_sel) {
            match el.value().name() {
                "h2" => {
                    let heading = text_of(el);
                    if let Some(caps) = LUNCH_HEADER_RE.captures(heading.trim()) {
                        let number: u32 = caps[1].parse().unwrap_or(0);
                        in_section = number == target;
                        current_day = None;
                        collecting_alt = false;
                    }
                }
                "h5" => {
                    let heading = text_of(el);
                    collecting_alt = false;
                    if heading.to_uppercase() == ALT_HEADER {
                        collecting_alt = true;
                        current_day = None;
                    } else if let Some(day) = Weekday::from_swedish(&heading) {
                        current_day = in_section.then_some(day);
                    } else {
                        current_day = None;
                    }
                }
                _ => {
                    if collecting_alt {
                        alt_lines.extend(text_lines(el));
                    } else if in_section {
                        if let Some(day) = current_day {
                            day_blocks.entry(day).or_default().extend(text_lines(el));
                        }
                    }
                }
            }
        }

        for (day, lines) in day_blocks {
            let items = group_caps_items(&lines, Some(LUNCH_PRICE), None);
            self.menus.insert_day(day, items);
        }

        // The alternatives block is served every day alongside the rotation.
        let alt_items = group_caps_items(&alt_lines, None, Some(ALT_HEADER));
        if !alt_items.is_empty() {
            for day in Weekday::ALL {
                self.menus.append_day(day, alt_items.clone());
            }
        }
    }
}

/// True for lines that name a dish: all caps once a trailing price is
/// removed.
fn is_dish_header(line: &str) -> bool {
    let (residue, _) = text::extract_price(line);
    text::is_all_caps(&residue)
}

/// Groups a line stream into items: an all-caps line starts a dish, the
/// following non-caps lines (until the next all-caps line) are its
/// description. A caps line with no trailing description keeps its own text
/// as the description.
fn group_caps_items(
    lines: &[String],
    default_price: Option<&str>,
    category: Option<&str>,
) -> Vec<MenuItem> {
    let mut items = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i].trim();
        if text::is_noise(line) {
            i += 1;
            continue;
        }

        let (residue, found_price) = text::extract_price(line);
        let price = found_price.as_deref().or(default_price);

        let item = if text::is_all_caps(&residue) {
            let mut description = Vec::new();
            i += 1;
            while i < lines.len() && !is_dish_header(lines[i].trim()) {
                let extra = lines[i].trim();
                if !text::is_noise(extra) {
                    description.push(extra.to_string());
                }
                i += 1;
            }
            let description = if description.is_empty() {
                residue.clone()
            } else {
                description.join(" ")
            };
            MenuItem::new(&residue).map(|it| it.with_description(&description))
        } else {
            i += 1;
            MenuItem::new(&residue)
        };

        if let Some(mut item) = item {
            if let Some(price) = price {
                item = item.with_price(price);
            }
            if let Some(cat) = category {
                item = item.with_category(cat);
            }
            items.push(item);
        }
    }

    items
}

#[async_trait]
impl LunchScraper for BombayBistroScraper {
    fn name(&self) -> &'static str {
        "BombayBistroScraper"
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
        self.parse(&html, cycle::current_iso_week());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        <h2>LUNCH 1</h2>
        <h5>MÅNDAG</h5>
        <p>BUTTER CHICKEN 129 kr<br>kyckling i krämig tomatsås<br>med basmatiris</p>
        <h5>TISDAG</h5>
        <p>PALAK PANEER</p>
        <h2>LUNCH 2</h2>
        <h5>MÅNDAG</h5>
        <p>LAMB KORMA<br>lamm i mild currysås</p>
        <h5>ANDRA ALTERNATIV</h5>
        <p>GARLIC NAAN – 35 kr</p>
        <p>MANGO LASSI 25 kr</p>
    "#;

    #[test]
    fn selects_only_the_active_cycle() {
        let mut scraper = BombayBistroScraper::new(Client::new());
        // week 4 → 4 % 4 + 1 = cycle 1
        scraper.parse(SAMPLE, 4);

        let monday = scraper.menu_for_day("monday").unwrap();
        assert_eq!(monday.items[0].name, "BUTTER CHICKEN");
        assert_eq!(
            monday.items[0].description.as_deref(),
            Some("kyckling i krämig tomatsås med basmatiris")
        );
        assert_eq!(monday.items[0].price.as_deref(), Some("129 kr"));
        assert!(monday.items.iter().all(|i| i.name != "LAMB KORMA"));
    }

    #[test]
    fn cycle_two_is_selected_on_the_next_week() {
        let mut scraper = BombayBistroScraper::new(Client::new());
        scraper.parse(SAMPLE, 5);
        let monday = scraper.menu_for_day("monday").unwrap();
        assert_eq!(monday.items[0].name, "LAMB KORMA");
    }

    #[test]
    fn caps_line_without_description_keeps_its_own_text() {
        let mut scraper = BombayBistroScraper::new(Client::new());
        scraper.parse(SAMPLE, 4);
        let tuesday = scraper.menu_for_day("tuesday").unwrap();
        assert_eq!(tuesday.items[0].name, "PALAK PANEER");
        assert_eq!(tuesday.items[0].description.as_deref(), Some("PALAK PANEER"));
    }

    #[test]
    fn alternatives_are_merged_into_every_day() {
        let mut scraper = BombayBistroScraper::new(Client::new());
        scraper.parse(SAMPLE, 4);

        for day in ["monday", "tuesday", "wednesday", "thursday", "friday"] {
            let menu = scraper.menu_for_day(day).unwrap();
            let naan = menu
                .items
                .iter()
                .find(|i| i.name == "GARLIC NAAN")
                .unwrap_or_else(|| panic!("no naan on {day}"));
            assert_eq!(naan.price.as_deref(), Some("35 kr"));
            assert_eq!(naan.category.as_deref(), Some(ALT_HEADER));
        }
    }
}
