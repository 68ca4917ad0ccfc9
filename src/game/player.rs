use std::collections::HashMap;

use hecs::World;

use crate::ecs::components::{CelestialBody, Position};
use crate::ecs::world::spawn_projectile;
use crate::game::collision::distance;
use crate::game::upgrades::ShipLevels;
use crate::protocol::{GridCoord, ProjectileKind};

/// Control intent for one frame, produced by whatever reads the input devices.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShipControls {
    pub turn_left: bool,
    pub turn_right: bool,
    pub thrust: bool,
    pub fire: bool,
}

/// The player's ship, hold and wallet. Lives outside any system's world
/// and follows the player between systems.
#[derive(Debug, Clone)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub angle: f32,
    pub vx: f32,
    pub vy: f32,

    pub thrust: f32,
    pub max_speed: f32,
    pub rotation_speed: f32,
    pub drag: f32,

    pub size: f32,
    pub hit_radius: f32,

    pub health: f32,
    pub max_health: f32,
    pub shield: f32,
    pub max_shield: f32,
    pub weapon_cooldown: f32,
    pub weapon_cooldown_max: f32,
    pub weapon_damage: f32,

    pub credits: i64,
    pub cargo: HashMap<String, u32>,
    pub cargo_capacity: u32,

    pub current_system: GridCoord,
    pub trade_range: f32,
    pub nearest_trade_entity: Option<hecs::Entity>,

    pub levels: ShipLevels,
}

impl Player {
    pub fn new(x: f32, y: f32, starting_system: GridCoord) -> Self {
        let size = 15.0;
        Self {
            x,
            y,
            angle: 0.0,
            vx: 0.0,
            vy: 0.0,
            thrust: 200.0,
            max_speed: 300.0,
            rotation_speed: 3.0,
            drag: 0.2,
            size,
            hit_radius: size,
            health: 100.0,
            max_health: 100.0,
            shield: 50.0,
            max_shield: 50.0,
            weapon_cooldown: 0.0,
            weapon_cooldown_max: 0.3,
            weapon_damage: 10.0,
            credits: 1000,
            cargo: HashMap::new(),
            cargo_capacity: 10,
            current_system: starting_system,
            trade_range: 100.0,
            nearest_trade_entity: None,
            levels: ShipLevels::default(),
        }
    }

    // ── Flight ───────────────────────────────────────────────────────

    /// Applies steering, thrust (clamped to max speed), drag and
    /// integration for one frame.
    pub fn update(&mut self, delta_time: f32, controls: &ShipControls) {
        if controls.turn_left {
            self.angle -= self.rotation_speed * delta_time;
        }
        if controls.turn_right {
            self.angle += self.rotation_speed * delta_time;
        }
        if controls.thrust {
            self.vx += self.thrust * self.angle.cos() * delta_time;
            self.vy += self.thrust * self.angle.sin() * delta_time;

            let speed = (self.vx * self.vx + self.vy * self.vy).sqrt();
            if speed > self.max_speed {
                self.vx = self.vx / speed * self.max_speed;
                self.vy = self.vy / speed * self.max_speed;
            }
        }

        let drag = (1.0 - self.drag * delta_time).max(0.0);
        self.vx *= drag;
        self.vy *= drag;

        self.x += self.vx * delta_time;
        self.y += self.vy * delta_time;

        if self.weapon_cooldown > 0.0 {
            self.weapon_cooldown -= delta_time;
        }
    }

    /// Spawns a laser from the ship's nose into `world` if the weapon is
    /// off cooldown.
    pub fn fire_weapon(&mut self, world: &mut World) -> Option<hecs::Entity> {
        if self.weapon_cooldown > 0.0 {
            return None;
        }
        self.weapon_cooldown = self.weapon_cooldown_max;
        let spawn_x = self.x + self.angle.cos() * self.size;
        let spawn_y = self.y + self.angle.sin() * self.size;
        Some(spawn_projectile(
            world,
            spawn_x,
            spawn_y,
            self.angle,
            ProjectileKind::Laser,
            self.weapon_damage,
            true,
        ))
    }

    // ── Damage ───────────────────────────────────────────────────────

    /// Shields absorb damage first; the rest hits the hull. Returns `true`
    /// when the hull is destroyed.
    pub fn take_damage(&mut self, amount: f32) -> bool {
        let mut remaining = amount.max(0.0);
        if self.shield > 0.0 {
            let absorbed = remaining.min(self.shield);
            self.shield -= absorbed;
            remaining -= absorbed;
        }
        if remaining > 0.0 {
            self.health -= remaining;
            if self.health <= 0.0 {
                self.health = 0.0;
                return true;
            }
        }
        false
    }

    pub fn heal(&mut self, amount: f32) {
        self.health = (self.health + amount).min(self.max_health);
    }

    pub fn recharge_shield(&mut self, amount: f32) {
        self.shield = (self.shield + amount).min(self.max_shield);
    }

    // ── Cargo ────────────────────────────────────────────────────────

    pub fn cargo_used(&self) -> u32 {
        self.cargo.values().sum()
    }

    pub fn cargo_space_remaining(&self) -> u32 {
        self.cargo_capacity.saturating_sub(self.cargo_used())
    }

    pub fn cargo_quantity(&self, item: &str) -> u32 {
        self.cargo.get(item).copied().unwrap_or(0)
    }

    /// Adds to the hold if it fits. Returns `false` without changes otherwise.
    pub fn add_cargo(&mut self, item: &str, quantity: u32) -> bool {
        let fits = self
            .cargo_used()
            .checked_add(quantity)
            .is_some_and(|total| total <= self.cargo_capacity);
        if !fits {
            return false;
        }
        *self.cargo.entry(item.to_string()).or_insert(0) += quantity;
        true
    }

    /// Removes from the hold, deleting the line when it reaches zero.
    pub fn remove_cargo(&mut self, item: &str, quantity: u32) -> bool {
        match self.cargo.get_mut(item) {
            Some(held) if *held >= quantity => {
                *held -= quantity;
                if *held == 0 {
                    self.cargo.remove(item);
                }
                true
            }
            _ => false,
        }
    }

    // ── Trading ──────────────────────────────────────────────────────

    /// Records the first tradable body within trade range, if any.
    pub fn update_trade_status(&mut self, world: &World) {
        self.nearest_trade_entity = world
            .query::<(&CelestialBody, &Position)>()
            .iter()
            .find(|(_e, (body, pos))| {
                body.can_trade && distance(self.x, self.y, pos.x, pos.y) <= self.trade_range
            })
            .map(|(e, _)| e);
    }

    pub fn can_trade(&self) -> bool {
        self.nearest_trade_entity.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::Projectile;
    use crate::ecs::world::spawn_celestial_body;
    use crate::protocol::{BodyKind, StationKind};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn player() -> Player {
        Player::new(0.0, 0.0, GridCoord::new(0, 0))
    }

    #[test]
    fn huge_cargo_request_is_refused() {
        let mut p = player();
        assert!(p.add_cargo("Food", 1));
        assert!(!p.add_cargo("Ore", u32::MAX));
        assert_eq!(p.cargo_quantity("Ore"), 0);
        assert_eq!(p.cargo_used(), 1);
    }

    #[test]
    fn shield_absorbs_before_hull() {
        let mut p = player();
        assert!(!p.take_damage(30.0));
        assert_eq!(p.shield, 20.0);
        assert_eq!(p.health, 100.0);

        assert!(!p.take_damage(50.0));
        assert_eq!(p.shield, 0.0);
        assert_eq!(p.health, 70.0);

        assert!(p.take_damage(70.0));
        assert_eq!(p.health, 0.0);
    }

    #[test]
    fn heal_and_recharge_clamp() {
        let mut p = player();
        p.take_damage(80.0);
        p.heal(500.0);
        p.recharge_shield(500.0);
        assert_eq!(p.health, p.max_health);
        assert_eq!(p.shield, p.max_shield);
    }

    #[test]
    fn cargo_respects_capacity_and_drops_empty_lines() {
        let mut p = player();
        assert!(p.add_cargo("Food", 6));
        assert!(!p.add_cargo("Ore", 5));
        assert_eq!(p.cargo_space_remaining(), 4);
        assert!(p.remove_cargo("Food", 6));
        assert!(!p.cargo.contains_key("Food"));
        assert!(!p.remove_cargo("Food", 1));
    }

    #[test]
    fn thrust_is_clamped_to_max_speed() {
        let mut p = player();
        let controls = ShipControls {
            thrust: true,
            ..Default::default()
        };
        for _ in 0..600 {
            p.update(1.0 / 60.0, &controls);
        }
        let speed = (p.vx * p.vx + p.vy * p.vy).sqrt();
        assert!(speed <= p.max_speed + 1e-3);
        assert!(p.x > 0.0);
    }

    #[test]
    fn weapon_respects_cooldown() {
        let mut p = player();
        let mut world = World::new();
        let laser = p.fire_weapon(&mut world).unwrap();
        assert!(p.fire_weapon(&mut world).is_none());
        assert!(world.get::<&Projectile>(laser).unwrap().owner_is_player);

        p.update(0.31, &ShipControls::default());
        assert!(p.fire_weapon(&mut world).is_some());
    }

    #[test]
    fn trade_status_finds_nearby_station() {
        let mut world = World::new();
        let mut rng = StdRng::seed_from_u64(4);
        spawn_celestial_body(
            &mut world,
            50.0,
            0.0,
            BodyKind::Station(StationKind::TradingPost),
            "Outpost",
            4,
            &mut rng,
        );
        let mut p = player();
        p.update_trade_status(&world);
        assert!(p.can_trade());

        p.x = 500.0;
        p.update_trade_status(&world);
        assert!(!p.can_trade());
    }
}
