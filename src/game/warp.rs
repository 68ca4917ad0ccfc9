use tracing::{info, warn};

use crate::game::player::Player;
use crate::game::star_system::{CENTER_X, CENTER_Y};
use crate::game::universe::Universe;
use crate::protocol::{Direction, GridCoord};

/// Distance past the exit gate the ship reappears, clear of its trigger radius.
pub const EXIT_OFFSET: f32 = 50.0;
pub const EXIT_SPEED: f32 = 50.0;

/// Moves the player into `destination` after entering a gate facing
/// `entry_direction`.
///
/// The ship appears just outside the destination's opposite gate, offset
/// along its current heading, keeps that heading and leaves at
/// `EXIT_SPEED`. Without a reciprocal gate it is parked at the system
/// centre at rest. Returns `false` if `destination` does not exist.
pub fn warp_to_system(
    universe: &mut Universe,
    player: &mut Player,
    destination: GridCoord,
    entry_direction: Direction,
) -> bool {
    let Some(system) = universe.get_system_mut(destination) else {
        warn!("Warp target {:?} does not exist", destination);
        return false;
    };

    player.current_system = destination;
    let angle = player.angle;

    match system.gate(entry_direction.opposite()) {
        Some(exit) => {
            player.x = exit.x + angle.cos() * EXIT_OFFSET;
            player.y = exit.y + angle.sin() * EXIT_OFFSET;
            player.vx = angle.cos() * EXIT_SPEED;
            player.vy = angle.sin() * EXIT_SPEED;
        }
        None => {
            warn!(
                "{} has no {:?} gate, placing ship at centre",
                system.name,
                entry_direction.opposite()
            );
            player.x = CENTER_X;
            player.y = CENTER_Y;
            player.vx = 0.0;
            player.vy = 0.0;
        }
    }

    let first_visit = !system.explored;
    system.explored = true;
    info!(
        "Warped to {} {:?}{}",
        system.name,
        destination,
        if first_visit { " (new system)" } else { "" }
    );
    true
}
