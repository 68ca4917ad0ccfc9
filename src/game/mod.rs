pub mod collision;
pub mod economy;
pub mod names;
pub mod player;
pub mod session;
pub mod star_system;
pub mod universe;
pub mod upgrades;
pub mod warp;
