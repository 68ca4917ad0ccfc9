use hecs::World;
use rand::Rng;

use crate::protocol::{AiStateKind, AsteroidKind, BodyKind, EnemyKind, ProjectileKind};

use super::components::{
    Asteroid, CelestialBody, Collider, EnemyAi, EnemyShip, Heading, Position, Spin, Velocity,
};
use super::ship_stats;

/// Spawns the planet or station a system is built around.
pub fn spawn_celestial_body<R: Rng>(
    world: &mut World,
    x: f32,
    y: f32,
    kind: BodyKind,
    name: &str,
    tech_level: u8,
    rng: &mut R,
) -> hecs::Entity {
    let (size, spin) = match kind {
        BodyKind::Planet(_) => (rng.gen_range(40..=80), rng.gen_range(0.05..0.2)),
        BodyKind::Station(_) => (rng.gen_range(30..=60), rng.gen_range(0.1..0.3)),
    };
    world.spawn((
        CelestialBody {
            kind,
            name: name.to_string(),
            tech_level,
            can_trade: true,
        },
        Position { x, y },
        Heading::default(),
        Spin { speed: spin },
        Collider { radius: size as f32 },
    ))
}

pub fn spawn_asteroid<R: Rng>(
    world: &mut World,
    x: f32,
    y: f32,
    kind: AsteroidKind,
    rng: &mut R,
) -> hecs::Entity {
    world.spawn((
        Asteroid { kind },
        Position { x, y },
        Velocity {
            x: rng.gen_range(-5.0..5.0),
            y: rng.gen_range(-5.0..5.0),
        },
        Heading {
            angle: rng.gen_range(0.0..std::f32::consts::TAU),
        },
        Spin {
            speed: rng.gen_range(-0.5..0.5),
        },
        Collider {
            radius: rng.gen_range(5..=20) as f32,
        },
    ))
}

/// Spawns an enemy ship with level-scaled stats. Ships start on patrol with
/// their spawn point as the first waypoint.
pub fn spawn_enemy<R: Rng>(
    world: &mut World,
    x: f32,
    y: f32,
    kind: EnemyKind,
    level: u8,
    rng: &mut R,
) -> hecs::Entity {
    let aggression = ship_stats::roll_aggression(kind, rng);
    spawn_enemy_with_aggression(world, x, y, kind, level, aggression)
}

pub fn spawn_enemy_with_aggression(
    world: &mut World,
    x: f32,
    y: f32,
    kind: EnemyKind,
    level: u8,
    aggression: i32,
) -> hecs::Entity {
    world.spawn((
        EnemyShip { kind, level },
        Position { x, y },
        Velocity::default(),
        Heading::default(),
        Collider {
            radius: ship_stats::enemy_size(level),
        },
        ship_stats::enemy_health(level),
        ship_stats::enemy_thruster(level),
        ship_stats::enemy_weapon(kind, level),
        EnemyAi {
            state: AiStateKind::Patrol,
            target_x: x,
            target_y: y,
            waypoint_timer: 0.0,
            detection_range: ship_stats::detection_range(level),
            aggression,
        },
    ))
}

pub fn spawn_projectile(
    world: &mut World,
    x: f32,
    y: f32,
    angle: f32,
    kind: ProjectileKind,
    damage: f32,
    owner_is_player: bool,
) -> hecs::Entity {
    world.spawn((
        ship_stats::projectile_stats(kind, damage, owner_is_player),
        Position { x, y },
        Heading { angle },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::{EnemyWeapon, Health, Projectile};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn enemy_spawns_on_patrol_at_its_position() {
        let mut world = World::new();
        let mut rng = StdRng::seed_from_u64(1);
        let e = spawn_enemy(&mut world, 10.0, 20.0, EnemyKind::Military, 4, &mut rng);

        let ai = world.get::<&EnemyAi>(e).unwrap();
        assert_eq!(ai.state, AiStateKind::Patrol);
        assert_eq!((ai.target_x, ai.target_y), (10.0, 20.0));
        assert_eq!(ai.detection_range, 280.0);

        let health = world.get::<&Health>(e).unwrap();
        assert_eq!(health.current, 60.0);

        let weapon = world.get::<&EnemyWeapon>(e).unwrap();
        assert_eq!(weapon.kind, ProjectileKind::Missile);
    }

    #[test]
    fn body_is_tradable() {
        let mut world = World::new();
        let mut rng = StdRng::seed_from_u64(2);
        let e = spawn_celestial_body(
            &mut world,
            0.0,
            0.0,
            BodyKind::Planet(crate::protocol::PlanetKind::Ocean),
            "Tau Meridian",
            3,
            &mut rng,
        );
        let body = world.get::<&CelestialBody>(e).unwrap();
        assert!(body.can_trade);
        let collider = world.get::<&Collider>(e).unwrap();
        assert!((40.0..=80.0).contains(&collider.radius));
    }

    #[test]
    fn projectile_carries_owner() {
        let mut world = World::new();
        let e = spawn_projectile(&mut world, 0.0, 0.0, 1.0, ProjectileKind::Laser, 10.0, true);
        let proj = world.get::<&Projectile>(e).unwrap();
        assert!(proj.owner_is_player);
        assert_eq!(proj.damage, 10.0);
    }
}
