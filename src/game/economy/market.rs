use std::collections::HashMap;

use crate::protocol::{CommodityCategory, GridCoord, MarketLine, MarketView};

/// One commodity line of a system's market.
#[derive(Debug, Clone)]
pub struct MarketEntry {
    /// Index into the economy's commodity catalog.
    pub commodity: usize,
    pub name: String,
    pub category: CommodityCategory,
    pub buy_price: i64,
    pub sell_price: i64,
    pub quantity: u32,
}

/// Stations buy back at 80% of their asking price, rounded down.
pub fn sell_price_for(buy_price: i64) -> i64 {
    buy_price * 4 / 5
}

/// Materialized prices and stock for every commodity in one system,
/// sorted by (category, name).
#[derive(Debug, Clone)]
pub struct Market {
    pub system: GridCoord,
    pub entries: Vec<MarketEntry>,
}

impl Market {
    pub fn new(system: GridCoord, mut entries: Vec<MarketEntry>) -> Self {
        entries.sort_by(|a, b| (a.category, &a.name).cmp(&(b.category, &b.name)));
        Self { system, entries }
    }

    pub fn entry(&self, name: &str) -> Option<&MarketEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn entry_mut(&mut self, name: &str) -> Option<&mut MarketEntry> {
        self.entries.iter_mut().find(|e| e.name == name)
    }

    pub fn view(&self) -> MarketView {
        MarketView {
            system: self.system,
            lines: self
                .entries
                .iter()
                .map(|e| MarketLine {
                    commodity: e.name.clone(),
                    category: e.category,
                    buy_price: e.buy_price,
                    sell_price: e.sell_price,
                    quantity: e.quantity,
                })
                .collect(),
        }
    }
}

/// Per-system market snapshots. A snapshot lives until it is explicitly
/// invalidated; trades edit stock in place.
#[derive(Debug, Default)]
pub struct MarketCache {
    markets: HashMap<GridCoord, Market>,
}

impl MarketCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, system: GridCoord) -> bool {
        self.markets.contains_key(&system)
    }

    pub fn get(&self, system: GridCoord) -> Option<&Market> {
        self.markets.get(&system)
    }

    /// Returns the cached market, building it with `build` on a miss.
    pub fn get_or_build(&mut self, system: GridCoord, build: impl FnOnce() -> Market) -> &mut Market {
        self.markets.entry(system).or_insert_with(build)
    }

    pub fn invalidate(&mut self, system: GridCoord) {
        self.markets.remove(&system);
    }

    pub fn invalidate_all(&mut self) {
        self.markets.clear();
    }

    pub fn len(&self) -> usize {
        self.markets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markets.is_empty()
    }
}
