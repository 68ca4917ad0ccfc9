use hecs::World;

use crate::ecs::components::{Heading, Position, Projectile};
use crate::ecs::ship_stats::MINE_ARM_TIME;
use crate::game::collision::{angle_difference, angle_to};

pub struct ProjectileResult {
    pub expired: Vec<hecs::Entity>,
}

/// Advances every projectile by one tick.
///
/// Enemy missiles steer toward `homing_target` (the player) no faster than
/// their turn rate. Mines arm once they have existed for `MINE_ARM_TIME`.
/// Projectiles whose lifetime runs out are despawned.
pub fn projectile_system(
    world: &mut World,
    homing_target: Option<(f32, f32)>,
    delta_time: f32,
) -> ProjectileResult {
    let mut result = ProjectileResult {
        expired: Vec::new(),
    };

    for (entity, (proj, pos, heading)) in
        world.query_mut::<(&mut Projectile, &mut Position, &mut Heading)>()
    {
        if let (Some(turn_rate), Some((tx, ty)), false) =
            (proj.turn_rate, homing_target, proj.owner_is_player)
        {
            let desired = angle_to(pos.x, pos.y, tx, ty);
            let max_turn = turn_rate * delta_time;
            let turn = angle_difference(heading.angle, desired).clamp(-max_turn, max_turn);
            heading.angle += turn;
        }

        pos.x += heading.angle.cos() * proj.speed * delta_time;
        pos.y += heading.angle.sin() * proj.speed * delta_time;
        proj.lifetime -= delta_time;

        if !proj.armed && proj.max_lifetime - proj.lifetime >= MINE_ARM_TIME {
            proj.armed = true;
        }

        if proj.lifetime <= 0.0 {
            result.expired.push(entity);
        }
    }

    for entity in &result.expired {
        let _ = world.despawn(*entity);
    }

    result
}
