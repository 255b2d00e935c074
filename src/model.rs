//! Normalized menu records shared by every source adapter.

use std::collections::HashMap;
use std::fmt;

use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};

use crate::text;

/// Weekdays the lunch sites publish menus for. Saturday and Sunday do not
/// exist in this domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Weekday {
    pub const ALL: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
        }
    }

    /// Case-insensitive parse of an English day token.
    pub fn parse(token: &str) -> Option<Weekday> {
        match token.trim().to_lowercase().as_str() {
            "monday" => Some(Weekday::Monday),
            "tuesday" => Some(Weekday::Tuesday),
            "wednesday" => Some(Weekday::Wednesday),
            "thursday" => Some(Weekday::Thursday),
            "friday" => Some(Weekday::Friday),
            _ => None,
        }
    }

    /// Parse a Swedish day name ("Måndag", "tisdag", ...). Diacritics are
    /// folded away first so encoding glitches in source markup do not break
    /// the match.
    pub fn from_swedish(token: &str) -> Option<Weekday> {
        match text::fold_ascii_lower(token).as_str() {
            "mandag" => Some(Weekday::Monday),
            "tisdag" => Some(Weekday::Tuesday),
            "onsdag" => Some(Weekday::Wednesday),
            "torsdag" => Some(Weekday::Thursday),
            "fredag" => Some(Weekday::Friday),
            _ => None,
        }
    }

    /// Today's weekday, or `None` on weekends.
    pub fn today() -> Option<Weekday> {
        match Local::now().weekday() {
            chrono::Weekday::Mon => Some(Weekday::Monday),
            chrono::Weekday::Tue => Some(Weekday::Tuesday),
            chrono::Weekday::Wed => Some(Weekday::Wednesday),
            chrono::Weekday::Thu => Some(Weekday::Thursday),
            chrono::Weekday::Fri => Some(Weekday::Friday),
            _ => None,
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One dish or offer. `name` is never empty; everything else is optional
/// free text (prices may encode several tiers, e.g. "122 kr, Guest 112 kr").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub name: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
}

impl MenuItem {
    /// Returns `None` when the trimmed name is empty — adapters must drop
    /// such candidates instead of emitting nameless records.
    pub fn new(name: &str) -> Option<MenuItem> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        Some(MenuItem {
            name: name.to_string(),
            category: None,
            description: None,
            price: None,
        })
    }

    pub fn with_category(mut self, category: &str) -> MenuItem {
        let category = text::clean_category(category);
        if !category.is_empty() {
            self.category = Some(category);
        }
        self
    }

    pub fn with_description(mut self, description: &str) -> MenuItem {
        let description = description.trim();
        if !description.is_empty() {
            self.description = Some(description.to_string());
        }
        self
    }

    pub fn with_price(mut self, price: &str) -> MenuItem {
        let price = price.trim();
        if !price.is_empty() {
            self.price = Some(price.to_string());
        }
        self
    }
}

/// One restaurant's offering for one weekday. Item order is the source
/// document order; there is no implied ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyMenu {
    pub day: Weekday,
    pub items: Vec<MenuItem>,
}

/// Per-adapter mapping from weekday to menu. A key is present only if
/// extraction produced at least one item for that day; absence means
/// "no data", not "empty menu".
#[derive(Debug, Clone, Default)]
pub struct MenuSet {
    menus: HashMap<Weekday, DailyMenu>,
}

impl MenuSet {
    pub fn new() -> MenuSet {
        MenuSet::default()
    }

    /// Drops all state. Called at the top of every `fetch()` so repeated
    /// fetches replace rather than accumulate.
    pub fn clear(&mut self) {
        self.menus.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.menus.is_empty()
    }

    /// Stores a day's menu, normalizing each item on the way in. Empty item
    /// lists are ignored.
    pub fn insert_day(&mut self, day: Weekday, items: Vec<MenuItem>) {
        let items: Vec<MenuItem> = items.into_iter().map(normalize_item).collect();
        if !items.is_empty() {
            self.menus.insert(day, DailyMenu { day, items });
        }
    }

    /// Same items for every weekday — the fixed-weekly-menu sources.
    pub fn insert_uniform(&mut self, items: Vec<MenuItem>) {
        for day in Weekday::ALL {
            self.insert_day(day, items.clone());
        }
    }

    /// Appends to a day's menu, creating it if needed.
    pub fn append_day(&mut self, day: Weekday, items: Vec<MenuItem>) {
        if items.is_empty() {
            return;
        }
        let items: Vec<MenuItem> = items.into_iter().map(normalize_item).collect();
        self.menus
            .entry(day)
            .or_insert_with(|| DailyMenu { day, items: Vec::new() })
            .items
            .extend(items);
    }

    /// Appends shared add-on items to every *already populated* day.
    /// Weekly salads and similar never create a day on their own.
    pub fn append_to_existing(&mut self, items: &[MenuItem]) {
        if items.is_empty() {
            return;
        }
        for menu in self.menus.values_mut() {
            menu.items.extend(items.iter().cloned().map(normalize_item));
        }
    }

    pub fn get(&self, day: Weekday) -> Option<&DailyMenu> {
        self.menus.get(&day)
    }

    /// Case-insensitive lookup by English day token.
    pub fn for_day(&self, day: &str) -> Option<&DailyMenu> {
        Weekday::parse(day).and_then(|d| self.menus.get(&d))
    }

    pub fn days(&self) -> impl Iterator<Item = Weekday> + '_ {
        Weekday::ALL
            .iter()
            .copied()
            .filter(|d| self.menus.contains_key(d))
    }
}

/// Marker used when a source publishes a sentence-length dish name with no
/// separate description.
pub const LONG_NAME_MARKER: &str = "Today's Special";

fn normalize_item(mut item: MenuItem) -> MenuItem {
    if item.description.is_none() && item.name.chars().count() > 50 {
        item.description = Some(std::mem::replace(
            &mut item.name,
            LONG_NAME_MARKER.to_string(),
        ));
    }
    item
}

/// Serialized form of one item. Absent optional fields become empty strings,
/// never null — the renderer relies on that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: String,
}

impl From<&MenuItem> for ItemRecord {
    fn from(item: &MenuItem) -> ItemRecord {
        ItemRecord {
            name: item.name.clone(),
            category: item.category.clone().unwrap_or_default(),
            description: item.description.clone().unwrap_or_default(),
            price: item.price.clone().unwrap_or_default(),
        }
    }
}

/// Serialized form of one restaurant's day, as stored in the snapshot file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRecord {
    pub day: String,
    pub items: Vec<ItemRecord>,
    #[serde(default)]
    pub emoji_tags: Vec<String>,
}

impl From<&DailyMenu> for DayRecord {
    fn from(menu: &DailyMenu) -> DayRecord {
        DayRecord {
            day: menu.day.as_str().to_string(),
            items: menu.items.iter().map(ItemRecord::from).collect(),
            emoji_tags: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekday_parse_is_case_insensitive() {
        assert_eq!(Weekday::parse("MONDAY"), Some(Weekday::Monday));
        assert_eq!(Weekday::parse("Friday "), Some(Weekday::Friday));
        assert_eq!(Weekday::parse("saturday"), None);
    }

    #[test]
    fn weekday_from_swedish_folds_diacritics() {
        assert_eq!(Weekday::from_swedish("Måndag"), Some(Weekday::Monday));
        assert_eq!(Weekday::from_swedish("TORSDAG"), Some(Weekday::Thursday));
        assert_eq!(Weekday::from_swedish("lördag"), None);
    }

    #[test]
    fn menu_item_drops_empty_names() {
        assert!(MenuItem::new("   ").is_none());
        let item = MenuItem::new(" Kyckling ").unwrap();
        assert_eq!(item.name, "Kyckling");
    }

    #[test]
    fn builder_ignores_blank_fields() {
        let item = MenuItem::new("Fisk")
            .unwrap()
            .with_category("  ")
            .with_description("")
            .with_price(" 110 kr ");
        assert_eq!(item.category, None);
        assert_eq!(item.description, None);
        assert_eq!(item.price.as_deref(), Some("110 kr"));
    }

    #[test]
    fn category_colon_is_stripped() {
        let item = MenuItem::new("Pasta").unwrap().with_category(" Veckans : ");
        assert_eq!(item.category.as_deref(), Some("Veckans"));
    }

    #[test]
    fn long_names_become_todays_special() {
        let name = "a".repeat(55);
        let mut set = MenuSet::new();
        set.insert_day(Weekday::Monday, vec![MenuItem::new(&name).unwrap()]);
        let menu = set.get(Weekday::Monday).unwrap();
        assert_eq!(menu.items[0].name, LONG_NAME_MARKER);
        assert_eq!(menu.items[0].description.as_deref(), Some(name.as_str()));
    }

    #[test]
    fn long_name_with_description_is_left_alone() {
        let name = "b".repeat(55);
        let mut set = MenuSet::new();
        set.insert_day(
            Weekday::Monday,
            vec![MenuItem::new(&name).unwrap().with_description("med ris")],
        );
        let menu = set.get(Weekday::Monday).unwrap();
        assert_eq!(menu.items[0].name, name);
    }

    #[test]
    fn lookup_is_case_insensitive_and_matches_get() {
        let mut set = MenuSet::new();
        set.insert_day(Weekday::Tuesday, vec![MenuItem::new("Soppa").unwrap()]);
        let via_token = set.for_day("TueSday").unwrap();
        let via_enum = set.get(Weekday::Tuesday).unwrap();
        assert_eq!(via_token, via_enum);
        assert!(set.for_day("sunday").is_none());
    }

    #[test]
    fn empty_day_is_absent_not_empty() {
        let mut set = MenuSet::new();
        set.insert_day(Weekday::Monday, Vec::new());
        assert!(set.get(Weekday::Monday).is_none());
        assert!(set.is_empty());
    }

    #[test]
    fn weekly_addons_only_touch_populated_days() {
        let mut set = MenuSet::new();
        set.insert_day(Weekday::Monday, vec![MenuItem::new("Dagens").unwrap()]);
        set.append_to_existing(&[MenuItem::new("Veckans sallad").unwrap()]);
        assert_eq!(set.get(Weekday::Monday).unwrap().items.len(), 2);
        assert!(set.get(Weekday::Tuesday).is_none());
    }

    #[test]
    fn item_record_serializes_missing_fields_as_empty_strings() {
        let record = ItemRecord::from(&MenuItem::new("Fisk").unwrap());
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["category"], "");
        assert_eq!(json["description"], "");
        assert_eq!(json["price"], "");
    }
}
