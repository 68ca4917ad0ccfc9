use crate::protocol::{AiStateKind, AsteroidKind, BodyKind, EnemyKind, ProjectileKind};

// ── Spatial ──────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone)]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
}

impl Default for Velocity {
    fn default() -> Self {
        Self { x: 0.0, y: 0.0 }
    }
}

/// Facing angle in radians.
#[derive(Debug, Clone, Default)]
pub struct Heading {
    pub angle: f32,
}

/// Constant angular velocity in radians per second.
#[derive(Debug, Clone)]
pub struct Spin {
    pub speed: f32,
}

#[derive(Debug, Clone)]
pub struct Collider {
    pub radius: f32,
}

#[derive(Debug, Clone)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

// ── Celestial ────────────────────────────────────────────────────────

/// The planet or station a system is built around.
#[derive(Debug, Clone)]
pub struct CelestialBody {
    pub kind: BodyKind,
    pub name: String,
    pub tech_level: u8,
    pub can_trade: bool,
}

#[derive(Debug, Clone)]
pub struct Asteroid {
    pub kind: AsteroidKind,
}

// ── Enemy ships ──────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct EnemyShip {
    pub kind: EnemyKind,
    pub level: u8,
}

#[derive(Debug, Clone)]
pub struct EnemyAi {
    pub state: AiStateKind,
    pub target_x: f32,
    pub target_y: f32,
    pub waypoint_timer: f32,
    pub detection_range: f32,
    /// Negative is friendly, above 5 is hostile.
    pub aggression: i32,
}

#[derive(Debug, Clone)]
pub struct Thruster {
    pub thrust: f32,
}

#[derive(Debug, Clone)]
pub struct EnemyWeapon {
    pub kind: ProjectileKind,
    pub damage: f32,
    /// Shots per second.
    pub fire_rate: f32,
    pub fire_timer: f32,
}

// ── Projectiles ──────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Projectile {
    pub kind: ProjectileKind,
    pub owner_is_player: bool,
    pub damage: f32,
    pub speed: f32,
    pub lifetime: f32,
    pub max_lifetime: f32,
    pub size: f32,
    /// Mines only detonate once armed; lasers and missiles start armed.
    pub armed: bool,
    /// Maximum turn rate when homing on the player, radians per second.
    pub turn_rate: Option<f32>,
}
