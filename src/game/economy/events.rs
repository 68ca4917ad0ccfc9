use serde::{Deserialize, Serialize};

use crate::protocol::GridCoord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketEventKind {
    Shortage,
    Surplus,
    PriceCrash,
    PriceSpike,
    TradeFestival,
    Blockade,
    Plague,
    LuxuryBoom,
}

impl MarketEventKind {
    pub const ALL: [MarketEventKind; 8] = [
        MarketEventKind::Shortage,
        MarketEventKind::Surplus,
        MarketEventKind::PriceCrash,
        MarketEventKind::PriceSpike,
        MarketEventKind::TradeFestival,
        MarketEventKind::Blockade,
        MarketEventKind::Plague,
        MarketEventKind::LuxuryBoom,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MarketEventKind::Shortage => "Shortage",
            MarketEventKind::Surplus => "Surplus",
            MarketEventKind::PriceCrash => "Price Crash",
            MarketEventKind::PriceSpike => "Price Spike",
            MarketEventKind::TradeFestival => "Trade Festival",
            MarketEventKind::Blockade => "Blockade",
            MarketEventKind::Plague => "Plague",
            MarketEventKind::LuxuryBoom => "Luxury Boom",
        }
    }

    pub fn price_modifier(self) -> f64 {
        match self {
            MarketEventKind::Shortage => 1.5,
            MarketEventKind::Surplus => 0.7,
            MarketEventKind::PriceCrash => 0.5,
            MarketEventKind::PriceSpike => 2.0,
            MarketEventKind::TradeFestival => 1.2,
            MarketEventKind::Blockade => 1.8,
            MarketEventKind::Plague => 0.8,
            MarketEventKind::LuxuryBoom => 1.5,
        }
    }

    pub fn quantity_modifier(self) -> f64 {
        match self {
            MarketEventKind::Shortage => 0.3,
            MarketEventKind::Surplus => 2.0,
            MarketEventKind::PriceCrash => 1.5,
            MarketEventKind::PriceSpike => 0.5,
            MarketEventKind::TradeFestival => 1.5,
            MarketEventKind::Blockade => 0.2,
            MarketEventKind::Plague => 0.7,
            MarketEventKind::LuxuryBoom => 0.8,
        }
    }

    pub fn describe(self, system_name: &str, commodities: &[String]) -> String {
        let goods = join_names(commodities);
        match self {
            MarketEventKind::Shortage => format!(
                "A shortage of {} has struck {} due to production issues.",
                goods, system_name
            ),
            MarketEventKind::Surplus => format!(
                "An unexpected surplus of {} has flooded the market in {}.",
                goods, system_name
            ),
            MarketEventKind::PriceCrash => format!(
                "Prices for {} have crashed in {} due to market panic.",
                goods, system_name
            ),
            MarketEventKind::PriceSpike => format!(
                "Prices for {} have spiked in {} due to high demand.",
                goods, system_name
            ),
            MarketEventKind::TradeFestival => format!(
                "A trade festival in {} has increased commerce in {}.",
                system_name, goods
            ),
            MarketEventKind::Blockade => format!(
                "A blockade in {} has restricted trade in {}.",
                system_name, goods
            ),
            MarketEventKind::Plague => format!(
                "A plague in {} has affected demand for {}.",
                system_name, goods
            ),
            MarketEventKind::LuxuryBoom => format!(
                "A luxury boom in {} has increased demand for {}.",
                system_name, goods
            ),
        }
    }
}

/// "A", "A and B", "A, B, and C".
fn join_names(names: &[String]) -> String {
    match names {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] => format!("{} and {}", first, second),
        [init @ .., last] => format!("{}, and {}", init.join(", "), last),
    }
}

/// A market disturbance in one system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketEvent {
    pub kind: MarketEventKind,
    pub system: GridCoord,
    pub system_name: String,
    pub duration_days: u32,
    /// Economy ticks left before the event is dropped.
    pub remaining_days: u32,
    pub commodities: Vec<String>,
    pub description: String,
}

impl MarketEvent {
    pub fn affects(&self, system: GridCoord, commodity: &str) -> bool {
        self.system == system && self.commodities.iter().any(|c| c == commodity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn joins_commodity_lists() {
        assert_eq!(join_names(&names(&["Food"])), "Food");
        assert_eq!(join_names(&names(&["Food", "Ore"])), "Food and Ore");
        assert_eq!(join_names(&names(&["Food", "Ore", "Art"])), "Food, Ore, and Art");
    }

    #[test]
    fn description_mentions_system_and_goods() {
        let text = MarketEventKind::Blockade.describe("Sigma Kalor", &names(&["Fuel"]));
        assert_eq!(text, "A blockade in Sigma Kalor has restricted trade in Fuel.");
    }

    #[test]
    fn affects_matches_system_and_name() {
        let event = MarketEvent {
            kind: MarketEventKind::Plague,
            system: GridCoord::new(1, 1),
            system_name: "X".to_string(),
            duration_days: 3,
            remaining_days: 3,
            commodities: names(&["Medicine"]),
            description: String::new(),
        };
        assert!(event.affects(GridCoord::new(1, 1), "Medicine"));
        assert!(!event.affects(GridCoord::new(1, 2), "Medicine"));
        assert!(!event.affects(GridCoord::new(1, 1), "Food"));
    }
}
