use rand::Rng;

use super::components::{EnemyWeapon, Health, Projectile, Thruster};
use crate::protocol::{EnemyKind, ProjectileKind};

/// Hull size grows with level.
pub fn enemy_size(level: u8) -> f32 {
    10.0 + level as f32 * 2.0
}

pub fn enemy_health(level: u8) -> Health {
    let hp = 20.0 + level as f32 * 10.0;
    Health { current: hp, max: hp }
}

pub fn enemy_thruster(level: u8) -> Thruster {
    Thruster {
        thrust: 30.0 + level as f32 * 5.0,
    }
}

pub fn detection_range(level: u8) -> f32 {
    200.0 + level as f32 * 20.0
}

/// Returns the weapon loadout for a given ship type and level.
pub fn enemy_weapon(kind: EnemyKind, level: u8) -> EnemyWeapon {
    let projectile = match kind {
        EnemyKind::Military => ProjectileKind::Missile,
        EnemyKind::Trader => ProjectileKind::Mine,
        EnemyKind::Pirate | EnemyKind::Police => ProjectileKind::Laser,
    };
    EnemyWeapon {
        kind: projectile,
        damage: 5.0 + level as f32 * 2.0,
        fire_rate: 1.0 + level as f32 * 0.2,
        fire_timer: 0.0,
    }
}

/// Rolls the aggression of a freshly spawned ship.
pub fn roll_aggression<R: Rng>(kind: EnemyKind, rng: &mut R) -> i32 {
    match kind {
        EnemyKind::Pirate => rng.gen_range(5..=10),
        EnemyKind::Trader => rng.gen_range(-5..=0),
        EnemyKind::Police => 0,
        EnemyKind::Military => rng.gen_range(0..=5),
    }
}

/// Returns a fresh projectile of the given kind carrying `damage`.
///
/// Missiles and mines scale the base damage (x1.5 and x2).
pub fn projectile_stats(kind: ProjectileKind, damage: f32, owner_is_player: bool) -> Projectile {
    match kind {
        ProjectileKind::Laser => Projectile {
            kind,
            owner_is_player,
            damage,
            speed: 600.0,
            lifetime: 1.0,
            max_lifetime: 1.0,
            size: 2.0,
            armed: true,
            turn_rate: None,
        },
        ProjectileKind::Missile => Projectile {
            kind,
            owner_is_player,
            damage: damage * 1.5,
            speed: 200.0,
            lifetime: 5.0,
            max_lifetime: 5.0,
            size: 3.0,
            armed: true,
            turn_rate: Some(3.0),
        },
        ProjectileKind::Mine => Projectile {
            kind,
            owner_is_player,
            damage: damage * 2.0,
            speed: 0.0,
            lifetime: 20.0,
            max_lifetime: 20.0,
            size: 6.0,
            armed: false,
            turn_rate: None,
        },
    }
}

/// Seconds a mine must exist before it can detonate.
pub const MINE_ARM_TIME: f32 = 1.0;
