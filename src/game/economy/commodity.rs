use rand::Rng;

use crate::game::star_system::StarSystem;
use crate::protocol::{CommodityCategory, Faction, SystemType};

/// A tradable good. Identity fields never change; `price_state` is a
/// bounded random walk advanced once per economy tick.
#[derive(Debug, Clone)]
pub struct Commodity {
    name: String,
    category: CommodityCategory,
    base_price: i64,
    tech_level_min: u8,
    illegal: bool,
    volatility: f64,
    price_state: f64,
}

// ── Modifier tables ─────────────────────────────────────────────────

/// Price multiplier by system type.
pub fn system_modifier(system_type: SystemType, category: CommodityCategory) -> f64 {
    use CommodityCategory::*;
    match (system_type, category) {
        (SystemType::Agricultural, Raw) => 0.7,
        (SystemType::Agricultural, Manufactured) => 1.2,
        (SystemType::Agricultural, Luxury) => 1.1,
        (SystemType::Agricultural, Contraband) => 1.0,
        (SystemType::Industrial, Raw) => 1.2,
        (SystemType::Industrial, Manufactured) => 0.8,
        (SystemType::Industrial, Luxury) => 1.0,
        (SystemType::Industrial, Contraband) => 1.0,
        (SystemType::Mining, Raw) => 0.6,
        (SystemType::Mining, Manufactured) => 1.1,
        (SystemType::Mining, Luxury) => 1.2,
        (SystemType::Mining, Contraband) => 1.0,
        (SystemType::HighTech, Raw) => 1.3,
        (SystemType::HighTech, Manufactured) => 0.7,
        (SystemType::HighTech, Luxury) => 0.9,
        (SystemType::HighTech, Contraband) => 1.1,
        (SystemType::Tourist, Raw) => 1.2,
        (SystemType::Tourist, Manufactured) => 1.1,
        (SystemType::Tourist, Luxury) => 0.6,
        (SystemType::Tourist, Contraband) => 0.8,
        (SystemType::Frontier, Raw) => 1.1,
        (SystemType::Frontier, Manufactured) => 1.3,
        (SystemType::Frontier, Luxury) => 1.3,
        (SystemType::Frontier, Contraband) => 0.6,
    }
}

/// Price multiplier by controlling faction.
pub fn faction_modifier(faction: Faction, category: CommodityCategory) -> f64 {
    use CommodityCategory::*;
    match (faction, category) {
        (Faction::Federation, Raw) => 1.0,
        (Faction::Federation, Manufactured) => 0.9,
        (Faction::Federation, Luxury) => 1.1,
        (Faction::Federation, Contraband) => 1.5,
        (Faction::Empire, Raw) => 1.1,
        (Faction::Empire, Manufactured) => 1.0,
        (Faction::Empire, Luxury) => 0.8,
        (Faction::Empire, Contraband) => 1.3,
        (Faction::Independent, Raw) => 0.9,
        (Faction::Independent, Manufactured) => 1.1,
        (Faction::Independent, Luxury) => 1.0,
        (Faction::Independent, Contraband) => 0.9,
        (Faction::Rebel, Raw) => 1.2,
        (Faction::Rebel, Manufactured) => 1.2,
        (Faction::Rebel, Luxury) => 1.2,
        (Faction::Rebel, Contraband) => 0.7,
        (Faction::Corporate, Raw) => 0.8,
        (Faction::Corporate, Manufactured) => 0.8,
        (Faction::Corporate, Luxury) => 0.9,
        (Faction::Corporate, Contraband) => 1.2,
    }
}

/// Supply bias by system type. Positive means plentiful, negative scarce.
pub fn supply_modifier(system_type: SystemType, category: CommodityCategory) -> f64 {
    use CommodityCategory::*;
    match (system_type, category) {
        (SystemType::Agricultural, Raw) => 0.5,
        (SystemType::Agricultural, Manufactured) => -0.3,
        (SystemType::Agricultural, Luxury) => -0.1,
        (SystemType::Agricultural, Contraband) => 0.0,
        (SystemType::Industrial, Raw) => -0.3,
        (SystemType::Industrial, Manufactured) => 0.5,
        (SystemType::Industrial, Luxury) => 0.0,
        (SystemType::Industrial, Contraband) => 0.0,
        (SystemType::Mining, Raw) => 0.7,
        (SystemType::Mining, Manufactured) => -0.2,
        (SystemType::Mining, Luxury) => -0.3,
        (SystemType::Mining, Contraband) => 0.0,
        (SystemType::HighTech, Raw) => -0.4,
        (SystemType::HighTech, Manufactured) => 0.4,
        (SystemType::HighTech, Luxury) => 0.2,
        (SystemType::HighTech, Contraband) => -0.1,
        (SystemType::Tourist, Raw) => -0.2,
        (SystemType::Tourist, Manufactured) => -0.1,
        (SystemType::Tourist, Luxury) => 0.5,
        (SystemType::Tourist, Contraband) => 0.3,
        (SystemType::Frontier, Raw) => 0.3,
        (SystemType::Frontier, Manufactured) => -0.5,
        (SystemType::Frontier, Luxury) => -0.4,
        (SystemType::Frontier, Contraband) => 0.5,
    }
}

/// Floor on the high-tech discount.
const MIN_TECH_MOD: f64 = 0.7;

/// Fraction of `price_state` kept after each walk step.
const MEAN_REVERSION: f64 = 0.95;

impl Commodity {
    /// Creates a commodity with randomized volatility and starting price state.
    pub fn new<R: Rng>(
        name: &str,
        category: CommodityCategory,
        base_price: i64,
        tech_level_min: u8,
        illegal: bool,
        rng: &mut R,
    ) -> Self {
        let volatility = rng.gen_range(0.05..0.3);
        let price_state = rng.gen_range(-1.0..1.0);
        Self::with_state(name, category, base_price, tech_level_min, illegal, volatility, price_state)
    }

    pub fn with_state(
        name: &str,
        category: CommodityCategory,
        base_price: i64,
        tech_level_min: u8,
        illegal: bool,
        volatility: f64,
        price_state: f64,
    ) -> Self {
        Self {
            name: name.to_string(),
            category,
            base_price,
            tech_level_min,
            illegal,
            volatility: volatility.clamp(0.05, 0.3),
            price_state: price_state.clamp(-1.0, 1.0),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> CommodityCategory {
        self.category
    }

    pub fn base_price(&self) -> i64 {
        self.base_price
    }

    pub fn tech_level_min(&self) -> u8 {
        self.tech_level_min
    }

    pub fn is_illegal(&self) -> bool {
        self.illegal
    }

    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    pub fn price_state(&self) -> f64 {
        self.price_state
    }

    /// Discount applied by systems more advanced than the good requires.
    pub fn tech_modifier(&self, system_tech_level: u8) -> f64 {
        let tech_diff = (system_tech_level as i32 - self.tech_level_min as i32).max(0);
        (1.0 - 0.05 * tech_diff as f64).max(MIN_TECH_MOD)
    }

    /// Unit price of this commodity in `system`.
    pub fn price(&self, system: &StarSystem) -> i64 {
        let system_mod = system_modifier(system.system_type, self.category);
        let faction_mod = faction_modifier(system.faction, self.category);
        let tech_mod = self.tech_modifier(system.tech_level);
        let fluctuation = 1.0 + self.price_state * self.volatility;
        let price = self.base_price as f64 * system_mod * faction_mod * tech_mod * fluctuation;
        price.round().max(0.0) as i64
    }

    /// Units on offer in `system`. Systems below the good's tech minimum
    /// produce none.
    pub fn quantity<R: Rng>(&self, system: &StarSystem, rng: &mut R) -> u32 {
        let base = 10.0 + system.tech_level as f64 * 5.0;
        let supply_mod = supply_modifier(system.system_type, self.category);
        let mut quantity = base * (1.0 + supply_mod);
        if self.illegal {
            quantity *= 0.5;
        }
        quantity *= rng.gen_range(0.7..1.3);

        if system.tech_level < self.tech_level_min {
            return 0;
        }
        quantity.max(0.0).round() as u32
    }

    /// Advances the price random walk by one step.
    pub fn update_price_state<R: Rng>(&mut self, rng: &mut R) {
        self.price_state += rng.gen_range(-0.2..0.2);
        self.price_state = self.price_state.clamp(-1.0, 1.0);
        self.price_state *= MEAN_REVERSION;
    }

    /// Overwrites the price state with the shift implied by an event's
    /// price multiplier. The value may leave [-1, 1] until the next walk.
    pub fn apply_price_shock(&mut self, price_modifier: f64) {
        self.price_state = (price_modifier - 1.0) * 2.0;
    }
}

/// The fixed list of goods traded across the galaxy.
pub fn default_catalog<R: Rng>(rng: &mut R) -> Vec<Commodity> {
    use CommodityCategory::*;

    const GOODS: &[(&str, CommodityCategory, i64, u8, bool)] = &[
        // Raw materials
        ("Food", Raw, 50, 1, false),
        ("Water", Raw, 30, 1, false),
        ("Minerals", Raw, 80, 1, false),
        ("Ore", Raw, 100, 2, false),
        ("Crystals", Raw, 150, 3, false),
        ("Metals", Raw, 120, 2, false),
        ("Fuel", Raw, 90, 2, false),
        ("Gases", Raw, 70, 3, false),
        // Manufactured
        ("Electronics", Manufactured, 200, 5, false),
        ("Weapons", Manufactured, 350, 4, false),
        ("Medicine", Manufactured, 300, 5, false),
        ("Machinery", Manufactured, 250, 3, false),
        ("Tools", Manufactured, 180, 3, false),
        ("Construction Materials", Manufactured, 150, 2, false),
        ("Clothing", Manufactured, 120, 2, false),
        ("Robots", Manufactured, 400, 7, false),
        // Luxury
        ("Art", Luxury, 500, 4, false),
        ("Jewelry", Luxury, 600, 5, false),
        ("Exotic Foods", Luxury, 400, 4, false),
        ("Antiques", Luxury, 700, 3, false),
        ("Entertainment Systems", Luxury, 450, 6, false),
        ("Designer Clothes", Luxury, 350, 5, false),
        ("Luxury Vehicles", Luxury, 800, 7, false),
        ("Virtual Reality Equipment", Luxury, 650, 8, false),
        // Contraband
        ("Narcotics", Contraband, 900, 3, true),
        ("Stolen Goods", Contraband, 500, 2, true),
        ("Illegal Weapons", Contraband, 1200, 5, true),
        ("Slaves", Contraband, 2000, 4, true),
        ("Forbidden Technology", Contraband, 1500, 8, true),
    ];

    GOODS
        .iter()
        .map(|&(name, category, base_price, tech_min, illegal)| {
            Commodity::new(name, category, base_price, tech_min, illegal, rng)
        })
        .collect()
}
