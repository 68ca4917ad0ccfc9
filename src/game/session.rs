use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::config::GameConfig;
use crate::ecs::systems::combat::{combat_system, execute_fire_orders};
use crate::ecs::systems::projectile::projectile_system;
use crate::game::economy::events::MarketEvent;
use crate::game::economy::{Economy, TradeDeal, TradeError, TradeReceipt};
use crate::game::player::{Player, ShipControls};
use crate::game::star_system::{StarSystem, CENTER_X, CENTER_Y};
use crate::game::universe::Universe;
use crate::game::upgrades::{self, UpgradeError, UpgradeKind};
use crate::game::warp::warp_to_system;
use crate::protocol::{CombatEvent, GridCoord, MarketView};

/// What happened during one call to `GameSession::update`.
#[derive(Debug, Default)]
pub struct FrameReport {
    pub player_fired: bool,
    pub warped_to: Option<GridCoord>,
    pub enemy_shots: usize,
    pub enemies_killed: usize,
    pub damage_taken: f32,
    pub combat_events: Vec<CombatEvent>,
    pub economy_ticks: u32,
}

/// A running game: the galaxy, its economy and the player's ship.
pub struct GameSession {
    pub universe: Universe,
    pub economy: Economy,
    pub player: Player,
    pub game_over: bool,
    pub elapsed: f32,
    rng: StdRng,
}

impl GameSession {
    pub fn new(config: &GameConfig) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);

        let mut universe = Universe::generate(
            config.galaxy_width,
            config.galaxy_height,
            config.asteroid_attempts,
            &mut rng,
        );
        let start = config.start_system;
        if let Some(system) = universe.get_system_mut(start) {
            system.explored = true;
        }

        let economy = Economy::new(seed.wrapping_add(1))
            .with_tick_interval(config.economy_tick_interval);
        let player = Player::new(CENTER_X, CENTER_Y, start);

        info!("New session, seed {}, starting in {:?}", seed, start);

        Self {
            universe,
            economy,
            player,
            game_over: false,
            elapsed: 0.0,
            rng,
        }
    }

    pub fn current_system(&self) -> Option<&StarSystem> {
        self.universe.get_system(self.player.current_system)
    }

    // ── Frame ────────────────────────────────────────────────────────

    /// Advances the whole game by `delta_time` seconds. Only the player's
    /// current system is simulated. Does nothing once the ship is lost.
    pub fn update(&mut self, delta_time: f32, controls: &ShipControls) -> FrameReport {
        let mut report = FrameReport::default();
        if self.game_over {
            return report;
        }
        self.elapsed += delta_time;

        // ── Player ──────────────────────────────────────────────────
        self.player.update(delta_time, controls);
        if controls.fire {
            if let Some(system) = self.universe.get_system_mut(self.player.current_system) {
                report.player_fired = self.player.fire_weapon(&mut system.world).is_some();
            }
        }

        // ── Warp gates ──────────────────────────────────────────────
        let jump = self
            .current_system()
            .and_then(|s| s.check_gate_collision(self.player.x, self.player.y))
            .and_then(|gate| gate.destination.map(|dest| (dest, gate.direction)));
        if let Some((destination, direction)) = jump {
            if warp_to_system(&mut self.universe, &mut self.player, destination, direction) {
                report.warped_to = Some(destination);
            }
        }

        // ── Current system ──────────────────────────────────────────
        let player_pos = (self.player.x, self.player.y);
        if let Some(system) = self.universe.get_system_mut(self.player.current_system) {
            let orders = system.update(delta_time, Some(player_pos), &mut self.rng);
            report.enemy_shots = execute_fire_orders(&mut system.world, &orders).len();

            projectile_system(&mut system.world, Some(player_pos), delta_time);

            let combat = combat_system(&mut system.world, &mut self.player);
            report.enemies_killed = combat.killed_enemies.len();
            report.damage_taken = combat.player_damage_taken;
            report.combat_events = combat.combat_events;
            if combat.player_destroyed {
                self.game_over = true;
            }

            self.player.update_trade_status(&system.world);
        }

        report.economy_ticks = self.economy.update(delta_time);
        report
    }

    // ── Trading ──────────────────────────────────────────────────────

    pub fn market(&mut self) -> Option<MarketView> {
        let system = self.universe.get_system(self.player.current_system)?;
        Some(self.economy.get_market(system).view())
    }

    pub fn buy(&mut self, commodity: &str, quantity: u32) -> Result<TradeReceipt, TradeError> {
        let system = self
            .universe
            .get_system(self.player.current_system)
            .ok_or(TradeError::NoMarket)?;
        self.economy.buy(&mut self.player, system, commodity, quantity)
    }

    pub fn sell(&mut self, commodity: &str, quantity: u32) -> Result<TradeReceipt, TradeError> {
        let system = self
            .universe
            .get_system(self.player.current_system)
            .ok_or(TradeError::NoMarket)?;
        self.economy.sell(&mut self.player, system, commodity, quantity)
    }

    /// Best trades from the current system to any explored one.
    pub fn best_deals(&mut self, top_n: usize) -> Vec<TradeDeal> {
        let Some(origin) = self.universe.get_system(self.player.current_system) else {
            return Vec::new();
        };
        let known = self.universe.explored_systems();
        self.economy.best_deals(origin, &known, top_n)
    }

    pub fn trigger_event(&mut self) -> Option<MarketEvent> {
        let system = self.universe.get_system(self.player.current_system)?;
        Some(self.economy.trigger_event(system))
    }

    pub fn upgrade(&mut self, kind: UpgradeKind) -> Result<u8, UpgradeError> {
        let level = upgrades::purchase(&mut self.player, kind)?;
        info!("Upgraded {:?} to level {}", kind, level);
        Ok(level)
    }
}
