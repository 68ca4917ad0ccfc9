pub mod combat;
pub mod movement;
pub mod projectile;
