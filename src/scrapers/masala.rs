//! Masala Kitchen prints its rotation on paper; the menus were OCRed once
//! into a four-week lookup table that ships with the crate. No live fetch —
//! the adapter picks the active week and appends the standing and sides
//! groups to every day.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;

use super::LunchScraper;
use crate::cycle;
use crate::error::ScrapeError;
use crate::model::{MenuItem, MenuSet, Weekday};

const CYCLE_COUNT: u32 = 4;

#[derive(Debug, Deserialize)]
struct MasalaTable {
    weeks: HashMap<String, HashMap<String, Vec<MasalaDish>>>,
    #[serde(default)]
    standing: Vec<MasalaDish>,
    #[serde(default)]
    sides: Vec<MasalaDish>,
}

#[derive(Debug, Deserialize)]
struct MasalaDish {
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    price: Option<String>,
}

impl MasalaDish {
    fn to_item(&self, category: Option<&str>) -> Option<MenuItem> {
        let mut item = MenuItem::new(&self.name)?;
        if let Some(desc) = &self.description {
            item = item.with_description(desc);
        }
        if let Some(price) = &self.price {
            item = item.with_price(price);
        }
        if let Some(cat) = category {
            item = item.with_category(cat);
        }
        Some(item)
    }
}

pub struct MasalaScraper {
    table_path: PathBuf,
    menus: MenuSet,
}

impl MasalaScraper {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            table_path: data_dir.join("masala_lunch_all_weeks.json"),
            menus: MenuSet::new(),
        }
    }

    fn load(&mut self, table: &MasalaTable, week: u32) {
        // Note the offset: this table counts from (week - 1), unlike the
        // Bombay rotation.
        let week_key = format!("week{}", cycle::cycle_index_shifted(week, CYCLE_COUNT));
        let Some(days) = table.weeks.get(&week_key) else {
            tracing::warn!(week_key, "week missing from masala table");
            return;
        };

        let standing: Vec<MenuItem> = table
            .standing
            .iter()
            .filter_map(|d| d.to_item(Some("Stående meny")))
            .collect();
        let sides: Vec<MenuItem> = table
            .sides
            .iter()
            .filter_map(|d| d.to_item(Some("Tillbehör")))
            .collect();

        for (day_name, dishes) in days {
            let Some(day) = Weekday::parse(day_name) else {
                continue;
            };
            let mut items: Vec<MenuItem> =
                dishes.iter().filter_map(|d| d.to_item(None)).collect();
            items.extend(standing.iter().cloned());
            items.extend(sides.iter().cloned());
            self.menus.insert_day(day, items);
        }
    }
}

#[async_trait]
impl LunchScraper for MasalaScraper {
    fn name(&self) -> &'static str {
        "MasalaScraper"
    }

    fn menus(&self) -> &MenuSet {
        &self.menus
    }

    async fn fetch(&mut self) -> Result<(), ScrapeError> {
        self.menus.clear();
        let raw = std::fs::read_to_string(&self.table_path).map_err(|source| {
            ScrapeError::DataFile { path: self.table_path.clone(), source }
        })?;
        let table: MasalaTable = serde_json::from_str(&raw)?;
        self.load(&table, cycle::current_iso_week());
        Ok(())
    }
}
