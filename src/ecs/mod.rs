pub mod components;
pub mod ship_stats;
pub mod systems;
pub mod world;
