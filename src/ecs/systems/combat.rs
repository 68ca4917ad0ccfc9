use std::collections::HashSet;

use hecs::World;
use tracing::{info, warn};

use crate::ai::enemy_ai::FireOrder;
use crate::ecs::components::{Collider, EnemyShip, EnemyWeapon, Heading, Health, Position, Projectile};
use crate::ecs::world::spawn_projectile;
use crate::game::collision::{angle_to, circles_overlap};
use crate::game::player::Player;
use crate::protocol::{CombatEvent, EnemyKind, ProjectileKind};

/// The result of running the combat system for one tick.
pub struct CombatResult {
    pub killed_enemies: Vec<(hecs::Entity, EnemyKind, u8)>,
    pub player_damage_taken: f32,
    pub player_destroyed: bool,
    pub combat_events: Vec<CombatEvent>,
}

// ── Enemy weapons ────────────────────────────────────────────────────

struct Shooter {
    x: f32,
    y: f32,
    rotation: f32,
    size: f32,
    damage: f32,
}

fn shooter(world: &World, entity: hecs::Entity) -> Option<Shooter> {
    let mut query = world
        .query_one::<(&Position, &Heading, &Collider, &EnemyWeapon)>(entity)
        .ok()?;
    let (pos, heading, collider, weapon) = query.get()?;
    Some(Shooter {
        x: pos.x,
        y: pos.y,
        rotation: heading.angle,
        size: collider.radius,
        damage: weapon.damage,
    })
}

/// Fires a laser from the enemy's nose straight at the target point.
pub fn enemy_fire_laser(
    world: &mut World,
    enemy: hecs::Entity,
    target_x: f32,
    target_y: f32,
) -> Option<hecs::Entity> {
    let s = shooter(world, enemy)?;
    let angle = angle_to(s.x, s.y, target_x, target_y);
    Some(spawn_projectile(
        world,
        s.x + angle.cos() * s.size,
        s.y + angle.sin() * s.size,
        angle,
        ProjectileKind::Laser,
        s.damage,
        false,
    ))
}

/// Launches a homing missile along the enemy's current heading.
pub fn enemy_fire_missile(world: &mut World, enemy: hecs::Entity) -> Option<hecs::Entity> {
    let s = shooter(world, enemy)?;
    Some(spawn_projectile(
        world,
        s.x + s.rotation.cos() * s.size,
        s.y + s.rotation.sin() * s.size,
        s.rotation,
        ProjectileKind::Missile,
        s.damage,
        false,
    ))
}

/// Drops a mine where the enemy is.
pub fn enemy_deploy_mine(world: &mut World, enemy: hecs::Entity) -> Option<hecs::Entity> {
    let s = shooter(world, enemy)?;
    Some(spawn_projectile(
        world,
        s.x,
        s.y,
        0.0,
        ProjectileKind::Mine,
        s.damage,
        false,
    ))
}

/// Spawns the projectiles requested by the AI this tick. Orders from ships
/// that no longer exist are skipped.
pub fn execute_fire_orders(world: &mut World, orders: &[FireOrder]) -> Vec<hecs::Entity> {
    orders
        .iter()
        .filter_map(|order| match order.weapon {
            ProjectileKind::Laser => {
                enemy_fire_laser(world, order.shooter, order.target_x, order.target_y)
            }
            ProjectileKind::Missile => enemy_fire_missile(world, order.shooter),
            ProjectileKind::Mine => enemy_deploy_mine(world, order.shooter),
        })
        .collect()
}

// ── Hit resolution ───────────────────────────────────────────────────

/// Resolves projectile hits for one tick.
///
/// Enemy projectiles hit the player within `hit_radius + size`; damage goes
/// through the player's shield first. Player projectiles hit enemy hulls
/// directly and the ship is removed at zero health. A projectile is consumed
/// by its first hit. Unarmed mines never detonate.
pub fn combat_system(world: &mut World, player: &mut Player) -> CombatResult {
    let mut result = CombatResult {
        killed_enemies: Vec::new(),
        player_damage_taken: 0.0,
        player_destroyed: false,
        combat_events: Vec::new(),
    };

    // ── Gather projectiles ──────────────────────────────────────────
    let projectiles: Vec<(hecs::Entity, f32, f32, f32, f32, bool)> = world
        .query::<(&Projectile, &Position)>()
        .iter()
        .filter(|(_e, (proj, _pos))| proj.armed)
        .map(|(e, (proj, pos))| (e, pos.x, pos.y, proj.size, proj.damage, proj.owner_is_player))
        .collect();

    // ── Gather enemies ──────────────────────────────────────────────
    let enemies: Vec<(hecs::Entity, f32, f32, f32, EnemyKind, u8)> = world
        .query::<(&EnemyShip, &Position, &Collider)>()
        .iter()
        .map(|(e, (ship, pos, col))| (e, pos.x, pos.y, col.radius, ship.kind, ship.level))
        .collect();

    let mut consumed: Vec<hecs::Entity> = Vec::new();
    let mut dead: HashSet<hecs::Entity> = HashSet::new();

    for &(proj_entity, px, py, size, damage, from_player) in &projectiles {
        if !from_player {
            // ── Enemy fire hits the player ──────────────────────────
            if !circles_overlap(px, py, size, player.x, player.y, player.hit_radius) {
                continue;
            }
            let destroyed = player.take_damage(damage);
            result.player_damage_taken += damage;
            result.combat_events.push(CombatEvent {
                x: player.x,
                y: player.y,
                damage,
                enemy: None,
                is_kill: destroyed,
            });
            consumed.push(proj_entity);
            if destroyed && !result.player_destroyed {
                result.player_destroyed = true;
                warn!("Player ship destroyed at ({:.0}, {:.0})", player.x, player.y);
            }
            continue;
        }

        // ── Player fire hits an enemy ───────────────────────────────
        for &(enemy, ex, ey, radius, kind, level) in &enemies {
            if dead.contains(&enemy) || !circles_overlap(px, py, size, ex, ey, radius) {
                continue;
            }

            if let Ok(mut health) = world.get::<&mut Health>(enemy) {
                health.current -= damage;
                let is_kill = health.current <= 0.0;
                result.combat_events.push(CombatEvent {
                    x: ex,
                    y: ey,
                    damage,
                    enemy: Some(kind),
                    is_kill,
                });
                if is_kill {
                    dead.insert(enemy);
                    result.killed_enemies.push((enemy, kind, level));
                    info!("Destroyed level {} {:?} at ({:.0}, {:.0})", level, kind, ex, ey);
                }
            }

            consumed.push(proj_entity);
            break;
        }
    }

    for entity in &consumed {
        let _ = world.despawn(*entity);
    }

    for &(enemy, _kind, _level) in &result.killed_enemies {
        let _ = world.despawn(enemy);
    }

    result
}
