use serde::{Deserialize, Serialize};

// ── Grid ───────────────────────────────────────────────────────────

/// Integer coordinate of a star system on the galaxy grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCoord {
    pub x: i32,
    pub y: i32,
}

impl GridCoord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring coordinate one step in `direction`.
    pub fn step(self, direction: Direction) -> Self {
        match direction {
            Direction::North => Self::new(self.x, self.y - 1),
            Direction::East => Self::new(self.x + 1, self.y),
            Direction::South => Self::new(self.x, self.y + 1),
            Direction::West => Self::new(self.x - 1, self.y),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// Unit offset from the system centre in screen space (y grows downward).
    pub fn unit_vector(self) -> (f32, f32) {
        match self {
            Direction::North => (0.0, -1.0),
            Direction::East => (1.0, 0.0),
            Direction::South => (0.0, 1.0),
            Direction::West => (-1.0, 0.0),
        }
    }
}

// ── System attributes ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SystemType {
    Agricultural,
    Industrial,
    Mining,
    HighTech,
    Tourist,
    Frontier,
}

impl SystemType {
    pub const ALL: [SystemType; 6] = [
        SystemType::Agricultural,
        SystemType::Industrial,
        SystemType::Mining,
        SystemType::HighTech,
        SystemType::Tourist,
        SystemType::Frontier,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SystemType::Agricultural => "Agricultural",
            SystemType::Industrial => "Industrial",
            SystemType::Mining => "Mining",
            SystemType::HighTech => "High-Tech",
            SystemType::Tourist => "Tourist",
            SystemType::Frontier => "Frontier",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    Federation,
    Empire,
    Independent,
    Rebel,
    Corporate,
}

impl Faction {
    pub const ALL: [Faction; 5] = [
        Faction::Federation,
        Faction::Empire,
        Faction::Independent,
        Faction::Rebel,
        Faction::Corporate,
    ];
}

/// Variants are declared alphabetically; market listings sort on this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CommodityCategory {
    Contraband,
    Luxury,
    Manufactured,
    Raw,
}

impl CommodityCategory {
    pub fn label(self) -> &'static str {
        match self {
            CommodityCategory::Raw => "Raw",
            CommodityCategory::Manufactured => "Manufactured",
            CommodityCategory::Luxury => "Luxury",
            CommodityCategory::Contraband => "Contraband",
        }
    }
}

// ── Entity kinds ───────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlanetKind {
    Terrestrial,
    GasGiant,
    IceWorld,
    Desert,
    Jungle,
    Ocean,
}

impl PlanetKind {
    pub const ALL: [PlanetKind; 6] = [
        PlanetKind::Terrestrial,
        PlanetKind::GasGiant,
        PlanetKind::IceWorld,
        PlanetKind::Desert,
        PlanetKind::Jungle,
        PlanetKind::Ocean,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StationKind {
    TradingPost,
    MilitaryBase,
    ResearchFacility,
    MiningOutpost,
}

impl StationKind {
    pub const ALL: [StationKind; 4] = [
        StationKind::TradingPost,
        StationKind::MilitaryBase,
        StationKind::ResearchFacility,
        StationKind::MiningOutpost,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyKind {
    Planet(PlanetKind),
    Station(StationKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AsteroidKind {
    Iron,
    Ice,
    Carbon,
    Precious,
}

impl AsteroidKind {
    pub const ALL: [AsteroidKind; 4] = [
        AsteroidKind::Iron,
        AsteroidKind::Ice,
        AsteroidKind::Carbon,
        AsteroidKind::Precious,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Pirate,
    Trader,
    Police,
    Military,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 4] = [
        EnemyKind::Pirate,
        EnemyKind::Trader,
        EnemyKind::Police,
        EnemyKind::Military,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiStateKind {
    Patrol,
    Attack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileKind {
    Laser,
    Missile,
    Mine,
}

// ── Snapshots for the presentation layer ───────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketLine {
    pub commodity: String,
    pub category: CommodityCategory,
    pub buy_price: i64,
    pub sell_price: i64,
    pub quantity: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketView {
    pub system: GridCoord,
    pub lines: Vec<MarketLine>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemySnapshot {
    pub kind: EnemyKind,
    pub level: u8,
    pub state: AiStateKind,
    pub x: f32,
    pub y: f32,
    pub health_pct: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemSnapshot {
    pub coord: GridCoord,
    pub name: String,
    pub system_type: SystemType,
    pub faction: Faction,
    pub tech_level: u8,
    pub danger_level: u8,
    pub explored: bool,
    pub main_body: Option<BodyKind>,
    pub gates: Vec<(Direction, Option<GridCoord>)>,
    pub asteroid_count: usize,
    pub enemies: Vec<EnemySnapshot>,
}

/// A single hit resolved by the combat system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatEvent {
    pub x: f32,
    pub y: f32,
    pub damage: f32,
    /// `None` when the player was hit.
    pub enemy: Option<EnemyKind>,
    pub is_kill: bool,
}
