//! One source adapter per restaurant.
//!
//! Every site publishes its menu in a different, unstable shape — fixed
//! weekly lists, day-keyed paragraph streams, rotating multi-week cycles,
//! RSS feeds, script-rendered apps, even a pre-OCRed lookup table. Each
//! adapter turns its own document into the shared [`MenuSet`] form and
//! keeps its quirks to itself.

use std::path::Path;

use async_trait::async_trait;
use reqwest::Client;
use scraper::{ElementRef, Selector};

use crate::error::ScrapeError;
use crate::model::{DailyMenu, MenuSet};

mod benne_pastabar;
mod bistrot;
mod bombay_bistro;
mod cuckoos_nest;
mod district_one;
mod encounter_asian;
mod kooperativet;
mod ls_kitchen;
mod masala;
mod mat_minnen;
mod mimolett;
mod miss_f;
mod oishii;
mod restaurant_pier_11;
mod uni3_world_of_food;

pub use benne_pastabar::BennePastabarScraper;
pub use bistrot::BistrotScraper;
pub use bombay_bistro::BombayBistroScraper;
pub use cuckoos_nest::CuckoosNestScraper;
pub use district_one::DistrictOneScraper;
pub use encounter_asian::EncounterAsianScraper;
pub use kooperativet::KooperativetScraper;
pub use ls_kitchen::LsKitchenScraper;
pub use masala::MasalaScraper;
pub use mat_minnen::MatMinnenScraper;
pub use mimolett::MimolettScraper;
pub use miss_f::MissFScraper;
pub use oishii::OishiiScraper;
pub use restaurant_pier_11::RestaurantPier11Scraper;
pub use uni3_world_of_food::Uni3WorldOfFoodScraper;

/// Capability contract shared by all restaurant adapters.
#[async_trait]
pub trait LunchScraper: Send {
    /// Stable identifier used as the snapshot key and by the downstream
    /// renderer's links lookup.
    fn name(&self) -> &'static str;

    fn menus(&self) -> &MenuSet;

    /// One retrieval plus parse. Idempotent: each call fully replaces prior
    /// state. Structural misses leave the menu set empty or partial and are
    /// not errors; only transport-level failures bubble up to the retry
    /// layer.
    async fn fetch(&mut self) -> Result<(), ScrapeError>;

    /// Case-insensitive lookup by English day token.
    fn menu_for_day(&self, day: &str) -> Option<&DailyMenu> {
        self.menus().for_day(day)
    }

    fn all_menus(&self) -> &MenuSet {
        self.menus()
    }
}

/// All adapters in declaration order. The order is load-bearing: it decides
/// both snapshot key order and downstream render order.
pub fn default_registry(client: &Client, data_dir: &Path) -> Vec<Box<dyn LunchScraper>> {
    vec![
        Box::new(KooperativetScraper::new(client.clone())),
        Box::new(DistrictOneScraper::new(client.clone())),
        Box::new(BombayBistroScraper::new(client.clone())),
        Box::new(CuckoosNestScraper::new(client.clone())),
        Box::new(Uni3WorldOfFoodScraper::new(client.clone())),
        Box::new(MissFScraper::new(client.clone())),
        Box::new(BennePastabarScraper::new(client.clone())),
        Box::new(LsKitchenScraper::new()),
        Box::new(BistrotScraper::new(client.clone())),
        Box::new(MimolettScraper::new(client.clone())),
        Box::new(OishiiScraper::new(client.clone())),
        Box::new(MatMinnenScraper::new(client.clone())),
        Box::new(EncounterAsianScraper::new()),
        Box::new(RestaurantPier11Scraper::new(client.clone())),
        Box::new(MasalaScraper::new(data_dir)),
    ]
}

/// Static selectors are part of the source, not input data.
pub(crate) fn css(selector: &str) -> Selector {
    Selector::parse(selector).unwrap()
}

/// Whitespace-collapsed text content of an element.
pub(crate) fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Trimmed, non-empty text fragments of an element. `<br>` boundaries split
/// text nodes, so this approximates per-line extraction from prose markup.
pub(crate) fn text_lines(el: ElementRef<'_>) -> Vec<String> {
    el.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Text content of an element with whole subtrees (e.g. `<strong>` category
/// markers) excluded.
pub(crate) fn text_without(el: ElementRef<'_>, skip: &[&str]) -> String {
    let mut out = String::new();
    let mut stack: Vec<_> = el.children().rev().collect();
    while let Some(node) = stack.pop() {
        if let Some(text) = node.value().as_text() {
            out.push_str(text);
            out.push(' ');
        } else if let Some(element) = node.value().as_element() {
            if !skip.contains(&element.name()) {
                for child in node.children().rev() {
                    stack.push(child);
                }
            }
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}
