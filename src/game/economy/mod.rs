pub mod commodity;
pub mod events;
pub mod market;

use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info};

use crate::game::player::Player;
use crate::game::star_system::StarSystem;
use crate::protocol::GridCoord;

use commodity::Commodity;
use events::{MarketEvent, MarketEventKind};
use market::{Market, MarketCache, MarketEntry};

// ── Trade results ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TradeError {
    #[error("Commodity not found")]
    NotFound,
    #[error("Quantity must be positive")]
    InvalidQuantity,
    #[error("Not enough stock available")]
    InsufficientStock { requested: u32, available: u32 },
    #[error("Not enough credits")]
    InsufficientFunds { needed: i64, available: i64 },
    #[error("Not enough cargo space")]
    InsufficientCargoSpace { requested: u32, free: u32 },
    #[error("Not enough in cargo")]
    InsufficientCargoToSell { requested: u32, held: u32 },
    #[error("No market here")]
    NoMarket,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TradeReceipt {
    pub commodity: String,
    pub quantity: u32,
    pub unit_price: i64,
    pub total: i64,
    pub message: &'static str,
}

/// A profitable route from the current system to a known one.
#[derive(Debug, Clone, Serialize)]
pub struct TradeDeal {
    pub commodity: String,
    pub from_system: String,
    pub to_system: String,
    pub to_coord: GridCoord,
    pub buy_price: i64,
    pub sell_price: i64,
    pub profit_per_unit: i64,
    pub quantity_available: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceTrend {
    Rising,
    Falling,
    Stable,
    Unknown,
}

impl PriceTrend {
    pub fn arrow(self) -> &'static str {
        match self {
            PriceTrend::Rising => "↑",
            PriceTrend::Falling => "↓",
            PriceTrend::Stable => "→",
            PriceTrend::Unknown => "?",
        }
    }
}

/// Default seconds of simulated time between economy ticks.
pub const DEFAULT_TICK_INTERVAL: f32 = 300.0;

// ── Economy ─────────────────────────────────────────────────────────

/// Owns the commodity catalog, the per-system market cache and the active
/// market events. `tick` is the only path that walks prices.
pub struct Economy {
    commodities: Vec<Commodity>,
    markets: MarketCache,
    active_events: Vec<MarketEvent>,
    rng: StdRng,
    tick_interval: f32,
    elapsed: f32,
    ticks: u64,
}

impl Economy {
    pub fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let commodities = commodity::default_catalog(&mut rng);
        Self::with_catalog(commodities, rng)
    }

    pub fn with_catalog(commodities: Vec<Commodity>, rng: StdRng) -> Self {
        Self {
            commodities,
            markets: MarketCache::new(),
            active_events: Vec::new(),
            rng,
            tick_interval: DEFAULT_TICK_INTERVAL,
            elapsed: 0.0,
            ticks: 0,
        }
    }

    pub fn with_tick_interval(mut self, seconds: f32) -> Self {
        self.tick_interval = seconds;
        self
    }

    pub fn commodities(&self) -> &[Commodity] {
        &self.commodities
    }

    pub fn commodity(&self, name: &str) -> Option<&Commodity> {
        self.commodities.iter().find(|c| c.name() == name)
    }

    pub fn markets(&self) -> &MarketCache {
        &self.markets
    }

    pub fn active_events(&self) -> &[MarketEvent] {
        &self.active_events
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    // ── Markets ─────────────────────────────────────────────────────

    /// Returns the market snapshot for `system`, materializing it on a miss.
    pub fn get_market(&mut self, system: &StarSystem) -> &Market {
        self.market_mut(system)
    }

    fn market_mut(&mut self, system: &StarSystem) -> &mut Market {
        let commodities = &self.commodities;
        let events = &self.active_events;
        let rng = &mut self.rng;
        self.markets
            .get_or_build(system.coord, || build_market(commodities, events, system, rng))
    }

    // ── Trading ─────────────────────────────────────────────────────

    /// Buys `quantity` units for the player. Checks run in order: stock,
    /// credits, cargo space. Nothing changes on failure.
    pub fn buy(
        &mut self,
        player: &mut Player,
        system: &StarSystem,
        name: &str,
        quantity: u32,
    ) -> Result<TradeReceipt, TradeError> {
        let entry = self.market_mut(system).entry_mut(name).ok_or(TradeError::NotFound)?;
        if quantity == 0 {
            return Err(TradeError::InvalidQuantity);
        }
        if quantity > entry.quantity {
            return Err(TradeError::InsufficientStock {
                requested: quantity,
                available: entry.quantity,
            });
        }
        let total = entry.buy_price * quantity as i64;
        if player.credits < total {
            return Err(TradeError::InsufficientFunds {
                needed: total,
                available: player.credits,
            });
        }
        let free = player.cargo_space_remaining();
        if free < quantity || !player.add_cargo(name, quantity) {
            return Err(TradeError::InsufficientCargoSpace {
                requested: quantity,
                free,
            });
        }

        player.credits -= total;
        entry.quantity -= quantity;

        info!(
            "Bought {} x {} at {} in {:?} for {}",
            quantity, name, entry.buy_price, system.coord, total
        );

        Ok(TradeReceipt {
            commodity: name.to_string(),
            quantity,
            unit_price: entry.buy_price,
            total,
            message: "Purchase successful",
        })
    }

    /// Sells `quantity` units from the player's hold back to the market.
    pub fn sell(
        &mut self,
        player: &mut Player,
        system: &StarSystem,
        name: &str,
        quantity: u32,
    ) -> Result<TradeReceipt, TradeError> {
        let entry = self.market_mut(system).entry_mut(name).ok_or(TradeError::NotFound)?;
        if quantity == 0 {
            return Err(TradeError::InvalidQuantity);
        }
        let held = player.cargo_quantity(name);
        if held < quantity || !player.remove_cargo(name, quantity) {
            return Err(TradeError::InsufficientCargoToSell {
                requested: quantity,
                held,
            });
        }

        let total = entry.sell_price * quantity as i64;
        player.credits += total;
        entry.quantity += quantity;

        info!(
            "Sold {} x {} at {} in {:?} for {}",
            quantity, name, entry.sell_price, system.coord, total
        );

        Ok(TradeReceipt {
            commodity: name.to_string(),
            quantity,
            unit_price: entry.sell_price,
            total,
            message: "Sale successful",
        })
    }

    // ── Simulation ──────────────────────────────────────────────────

    /// Accumulates simulated time and runs a tick each time the interval
    /// elapses. Returns the number of ticks run.
    pub fn update(&mut self, delta_time: f32) -> u32 {
        if self.tick_interval <= 0.0 {
            return 0;
        }
        self.elapsed += delta_time;
        let mut ran = 0;
        while self.elapsed >= self.tick_interval {
            self.elapsed -= self.tick_interval;
            self.tick();
            ran += 1;
        }
        ran
    }

    /// Walks every commodity's price state, ages market events, then drops
    /// every cached market.
    pub fn tick(&mut self) {
        for commodity in &mut self.commodities {
            commodity.update_price_state(&mut self.rng);
        }

        for event in &mut self.active_events {
            event.remaining_days = event.remaining_days.saturating_sub(1);
        }
        let before = self.active_events.len();
        self.active_events.retain(|e| e.remaining_days > 0);
        let expired = before - self.active_events.len();

        self.markets.invalidate_all();
        self.ticks += 1;

        debug!(
            "Economy tick {}: {} events expired, {} active",
            self.ticks,
            expired,
            self.active_events.len()
        );
    }

    pub fn price_trend(&self, name: &str) -> PriceTrend {
        match self.commodity(name) {
            Some(c) if c.price_state() > 0.2 => PriceTrend::Rising,
            Some(c) if c.price_state() < -0.2 => PriceTrend::Falling,
            Some(_) => PriceTrend::Stable,
            None => PriceTrend::Unknown,
        }
    }

    /// Finds the most profitable single-hop trades from `origin` to any of
    /// `known_systems`, best first.
    pub fn best_deals(
        &mut self,
        origin: &StarSystem,
        known_systems: &[&StarSystem],
        top_n: usize,
    ) -> Vec<TradeDeal> {
        self.market_mut(origin);
        for dest in known_systems {
            self.market_mut(dest);
        }

        let Some(origin_market) = self.markets.get(origin.coord) else {
            return Vec::new();
        };

        let mut deals = Vec::new();
        for item in origin_market.entries.iter().filter(|e| e.quantity > 0) {
            for dest in known_systems.iter().filter(|d| d.coord != origin.coord) {
                let Some(dest_item) = self
                    .markets
                    .get(dest.coord)
                    .and_then(|m| m.entry(&item.name))
                else {
                    continue;
                };
                let profit = dest_item.sell_price - item.buy_price;
                if profit > 0 {
                    deals.push(TradeDeal {
                        commodity: item.name.clone(),
                        from_system: origin.name.clone(),
                        to_system: dest.name.clone(),
                        to_coord: dest.coord,
                        buy_price: item.buy_price,
                        sell_price: dest_item.sell_price,
                        profit_per_unit: profit,
                        quantity_available: item.quantity,
                    });
                }
            }
        }

        deals.sort_by(|a, b| b.profit_per_unit.cmp(&a.profit_per_unit));
        deals.truncate(top_n);
        deals
    }

    /// Rolls a random market event in `system` and applies it.
    pub fn trigger_event(&mut self, system: &StarSystem) -> MarketEvent {
        let kind = MarketEventKind::ALL[self.rng.gen_range(0..MarketEventKind::ALL.len())];
        let duration_days = self.rng.gen_range(3..=10);
        let count = self.rng.gen_range(1..=3).min(self.commodities.len());
        let picked = index::sample(&mut self.rng, self.commodities.len(), count).into_vec();
        self.apply_event(system, kind, duration_days, &picked)
    }

    /// Applies an event of a known kind to the commodities at `indices`.
    pub fn apply_event(
        &mut self,
        system: &StarSystem,
        kind: MarketEventKind,
        duration_days: u32,
        indices: &[usize],
    ) -> MarketEvent {
        let mut names = Vec::with_capacity(indices.len());
        for &i in indices {
            if let Some(commodity) = self.commodities.get_mut(i) {
                commodity.apply_price_shock(kind.price_modifier());
                names.push(commodity.name().to_string());
            }
        }
        self.markets.invalidate(system.coord);

        let event = MarketEvent {
            kind,
            system: system.coord,
            system_name: system.name.clone(),
            duration_days,
            remaining_days: duration_days,
            description: kind.describe(&system.name, &names),
            commodities: names,
        };
        info!("Market event: {}", event.description);
        self.active_events.push(event.clone());
        event
    }
}

fn build_market<R: Rng>(
    commodities: &[Commodity],
    events: &[MarketEvent],
    system: &StarSystem,
    rng: &mut R,
) -> Market {
    let entries = commodities
        .iter()
        .enumerate()
        .map(|(i, commodity)| {
            let buy_price = commodity.price(system);
            let mut quantity = commodity.quantity(system, rng);
            for event in events.iter().filter(|e| e.affects(system.coord, commodity.name())) {
                quantity = (quantity as f64 * event.kind.quantity_modifier()).round() as u32;
            }
            MarketEntry {
                commodity: i,
                name: commodity.name().to_string(),
                category: commodity.category(),
                buy_price,
                sell_price: market::sell_price_for(buy_price),
                quantity,
            }
        })
        .collect();
    Market::new(system.coord, entries)
}
