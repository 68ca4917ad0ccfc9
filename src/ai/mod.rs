pub mod enemy_ai;
