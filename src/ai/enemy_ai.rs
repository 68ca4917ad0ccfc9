use std::f32::consts::TAU;

use hecs::World;
use rand::Rng;
use tracing::debug;

use crate::ecs::components::{EnemyAi, EnemyWeapon, Heading, Position, Thruster, Velocity};
use crate::game::collision::{angle_difference, angle_to, distance};
use crate::protocol::{AiStateKind, ProjectileKind};

/// Hostile ships only shoot inside this radius.
pub const FIRE_RANGE: f32 = 150.0;
pub const WAYPOINT_INTERVAL: f32 = 5.0;
pub const WAYPOINT_SPREAD: f32 = 200.0;

const HOSTILE_AGGRESSION: i32 = 5;
const FRIENDLY_AGGRESSION: i32 = -5;

/// A shot the combat system should spawn on behalf of an enemy ship.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireOrder {
    pub shooter: hecs::Entity,
    pub weapon: ProjectileKind,
    pub target_x: f32,
    pub target_y: f32,
}

/// Runs the enemy state machine and steering for a single tick.
///
/// 1. Hostile ships (aggression > 5) that see the player switch to attack.
///    Attack never wears off.
/// 2. Friendly ships (aggression < -5) that see the player drop back to patrol.
///    No ship kind currently rolls that low, so this never fires.
/// 3. Attackers chase the player's live position and fire when close.
/// 4. Patrollers pick a new waypoint every few seconds.
/// 5. Every ship eases its heading toward its target, thrusts, and brakes
///    harder the closer it gets.
///
/// Returns the shots to spawn this tick.
pub fn enemy_ai_system<R: Rng>(
    world: &mut World,
    player: Option<(f32, f32)>,
    delta_time: f32,
    rng: &mut R,
) -> Vec<FireOrder> {
    let mut orders = Vec::new();

    for (entity, (ai, pos, vel, heading, thruster, weapon)) in world.query_mut::<(
        &mut EnemyAi,
        &mut Position,
        &mut Velocity,
        &mut Heading,
        &Thruster,
        &mut EnemyWeapon,
    )>() {
        // ── Perception ───────────────────────────────────────────────
        let mut player_distance = None;
        if let Some((px, py)) = player {
            let dist = distance(pos.x, pos.y, px, py);
            player_distance = Some(dist);

            if dist < ai.detection_range {
                if ai.aggression > HOSTILE_AGGRESSION {
                    if ai.state != AiStateKind::Attack {
                        debug!("Enemy {:?} engaging player at {:.0} units", entity, dist);
                    }
                    ai.state = AiStateKind::Attack;
                    ai.target_x = px;
                    ai.target_y = py;
                } else if ai.aggression < FRIENDLY_AGGRESSION {
                    ai.state = AiStateKind::Patrol;
                }
            }

            if ai.state == AiStateKind::Attack {
                ai.target_x = px;
                ai.target_y = py;

                if dist < FIRE_RANGE {
                    weapon.fire_timer += delta_time;
                    if weapon.fire_timer >= 1.0 / weapon.fire_rate {
                        weapon.fire_timer = 0.0;
                        orders.push(FireOrder {
                            shooter: entity,
                            weapon: weapon.kind,
                            target_x: px,
                            target_y: py,
                        });
                    }
                }
            }
        }

        // ── Patrol ───────────────────────────────────────────────────
        if ai.state == AiStateKind::Patrol {
            ai.waypoint_timer += delta_time;
            if ai.waypoint_timer >= WAYPOINT_INTERVAL {
                ai.waypoint_timer = 0.0;
                ai.target_x = pos.x + rng.gen_range(-WAYPOINT_SPREAD..=WAYPOINT_SPREAD);
                ai.target_y = pos.y + rng.gen_range(-WAYPOINT_SPREAD..=WAYPOINT_SPREAD);
            }
        }

        // ── Steering ─────────────────────────────────────────────────
        let desired = angle_to(pos.x, pos.y, ai.target_x, ai.target_y);
        heading.angle += angle_difference(heading.angle, desired) * 2.0 * delta_time;
        heading.angle = heading.angle.rem_euclid(TAU);

        let thrust_factor = match (ai.state, player_distance) {
            (AiStateKind::Attack, Some(dist)) => (dist / 100.0).min(1.0),
            _ => 1.0,
        };
        vel.x += heading.angle.cos() * thruster.thrust * thrust_factor * delta_time;
        vel.y += heading.angle.sin() * thruster.thrust * thrust_factor * delta_time;

        let target_distance = distance(pos.x, pos.y, ai.target_x, ai.target_y);
        let drag = 0.1 + 0.9 * (1.0 - target_distance / 100.0).max(0.0);
        vel.x *= 1.0 - drag * delta_time;
        vel.y *= 1.0 - drag * delta_time;

        pos.x += vel.x * delta_time;
        pos.y += vel.y * delta_time;
    }

    orders
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::world::spawn_enemy_with_aggression;
    use crate::protocol::EnemyKind;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn ai_of(world: &World, e: hecs::Entity) -> EnemyAi {
        (*world.get::<&EnemyAi>(e).unwrap()).clone()
    }

    #[test]
    fn hostile_ship_attacks_player_in_range() {
        let mut world = World::new();
        let mut rng = StdRng::seed_from_u64(1);
        let e = spawn_enemy_with_aggression(&mut world, 0.0, 0.0, EnemyKind::Pirate, 1, 8);
        assert_eq!(ai_of(&world, e).detection_range, 220.0);

        enemy_ai_system(&mut world, Some((150.0, 0.0)), 1.0 / 60.0, &mut rng);

        let ai = ai_of(&world, e);
        assert_eq!(ai.state, AiStateKind::Attack);
        assert_eq!((ai.target_x, ai.target_y), (150.0, 0.0));
    }

    #[test]
    fn neutral_ship_ignores_player() {
        let mut world = World::new();
        let mut rng = StdRng::seed_from_u64(2);
        let e = spawn_enemy_with_aggression(&mut world, 0.0, 0.0, EnemyKind::Police, 1, 0);
        enemy_ai_system(&mut world, Some((50.0, 0.0)), 0.1, &mut rng);
        assert_eq!(ai_of(&world, e).state, AiStateKind::Patrol);
    }

    #[test]
    fn attack_is_sticky_and_tracks_player() {
        let mut world = World::new();
        let mut rng = StdRng::seed_from_u64(3);
        let e = spawn_enemy_with_aggression(&mut world, 0.0, 0.0, EnemyKind::Pirate, 1, 9);
        enemy_ai_system(&mut world, Some((100.0, 0.0)), 0.1, &mut rng);
        enemy_ai_system(&mut world, Some((5000.0, 5000.0)), 0.1, &mut rng);

        let ai = ai_of(&world, e);
        assert_eq!(ai.state, AiStateKind::Attack);
        assert_eq!((ai.target_x, ai.target_y), (5000.0, 5000.0));
    }

    #[test]
    fn friendly_ship_drops_back_to_patrol() {
        let mut world = World::new();
        let mut rng = StdRng::seed_from_u64(4);
        let e = spawn_enemy_with_aggression(&mut world, 0.0, 0.0, EnemyKind::Trader, 1, -8);
        world.get::<&mut EnemyAi>(e).unwrap().state = AiStateKind::Attack;

        enemy_ai_system(&mut world, Some((50.0, 0.0)), 0.1, &mut rng);
        assert_eq!(ai_of(&world, e).state, AiStateKind::Patrol);
    }

    #[test]
    fn attacker_fires_at_its_rate() {
        let mut world = World::new();
        let mut rng = StdRng::seed_from_u64(5);
        // Level 1: 1.2 shots per second.
        let e = spawn_enemy_with_aggression(&mut world, 0.0, 0.0, EnemyKind::Pirate, 1, 10);

        let first = enemy_ai_system(&mut world, Some((100.0, 0.0)), 0.5, &mut rng);
        assert!(first.is_empty());
        let second = enemy_ai_system(&mut world, Some((100.0, 0.0)), 0.5, &mut rng);
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].shooter, e);
        assert_eq!(second[0].weapon, ProjectileKind::Laser);
        assert_eq!((second[0].target_x, second[0].target_y), (100.0, 0.0));
        assert_eq!(world.get::<&EnemyWeapon>(e).unwrap().fire_timer, 0.0);
    }

    #[test]
    fn attacker_holds_fire_out_of_range() {
        let mut world = World::new();
        let mut rng = StdRng::seed_from_u64(6);
        spawn_enemy_with_aggression(&mut world, 0.0, 0.0, EnemyKind::Pirate, 1, 10);
        for _ in 0..20 {
            let orders = enemy_ai_system(&mut world, Some((200.0, 0.0)), 0.5, &mut rng);
            assert!(orders.is_empty());
        }
    }

    #[test]
    fn patrol_picks_new_waypoint() {
        let mut world = World::new();
        let mut rng = StdRng::seed_from_u64(7);
        let e = spawn_enemy_with_aggression(&mut world, 0.0, 0.0, EnemyKind::Police, 1, 0);
        for _ in 0..10 {
            enemy_ai_system(&mut world, None, 0.5, &mut rng);
        }
        let ai = ai_of(&world, e);
        assert_eq!(ai.waypoint_timer, 0.0);
        assert_ne!((ai.target_x, ai.target_y), (0.0, 0.0));
    }

    #[test]
    fn ship_moves_toward_target() {
        let mut world = World::new();
        let mut rng = StdRng::seed_from_u64(8);
        let e = spawn_enemy_with_aggression(&mut world, 0.0, 0.0, EnemyKind::Pirate, 3, 10);
        for _ in 0..120 {
            enemy_ai_system(&mut world, Some((180.0, 0.0)), 1.0 / 60.0, &mut rng);
        }
        let pos = world.get::<&Position>(e).unwrap();
        assert!(pos.x > 0.0);
    }
}
