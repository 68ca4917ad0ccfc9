use std::f32::consts::TAU;

use hecs::World;

use crate::ecs::components::{Asteroid, Heading, Position, Spin, Velocity};

/// Asteroids leaving this box reappear on the opposite edge.
pub const WRAP_MIN: f32 = -500.0;
pub const WRAP_MAX: f32 = 1500.0;

fn wrap(value: f32) -> f32 {
    if value < WRAP_MIN {
        WRAP_MAX
    } else if value > WRAP_MAX {
        WRAP_MIN
    } else {
        value
    }
}

/// Spins every body with a `Spin` and drifts asteroids, wrapping them at
/// the system edges.
pub fn drift_system(world: &mut World, delta_time: f32) {
    for (_entity, (heading, spin)) in world.query_mut::<(&mut Heading, &Spin)>() {
        heading.angle = (heading.angle + spin.speed * delta_time).rem_euclid(TAU);
    }

    for (_entity, (_asteroid, pos, vel)) in
        world.query_mut::<(&Asteroid, &mut Position, &Velocity)>()
    {
        pos.x = wrap(pos.x + vel.x * delta_time);
        pos.y = wrap(pos.y + vel.y * delta_time);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::AsteroidKind;

    #[test]
    fn asteroid_wraps_to_far_edge() {
        let mut world = World::new();
        let e = world.spawn((
            Asteroid { kind: AsteroidKind::Ice },
            Position { x: 1499.0, y: -499.0 },
            Velocity { x: 5.0, y: -5.0 },
        ));
        drift_system(&mut world, 1.0);
        let pos = world.get::<&Position>(e).unwrap();
        assert_eq!(pos.x, WRAP_MIN);
        assert_eq!(pos.y, WRAP_MAX);
    }

    #[test]
    fn spin_keeps_heading_in_range() {
        let mut world = World::new();
        let e = world.spawn((Heading { angle: 6.2 }, Spin { speed: 0.5 }));
        drift_system(&mut world, 1.0);
        let heading = world.get::<&Heading>(e).unwrap();
        assert!(heading.angle >= 0.0 && heading.angle < TAU);
        assert!((heading.angle - (6.7 - TAU)).abs() < 1e-4);
    }
}
