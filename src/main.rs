use std::time::Duration;

use serde::Serialize;
use star_trader::config::GameConfig;
use star_trader::game::collision::{angle_difference, angle_to};
use star_trader::game::player::ShipControls;
use star_trader::game::session::GameSession;
use star_trader::protocol::{Direction, GridCoord};
use tracing::{debug, info, warn};

/// Simulated seconds between printed snapshots.
const SNAPSHOT_INTERVAL: f32 = 10.0;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = GameConfig::load();
    let mut session = GameSession::new(&config);
    let mut autopilot = Autopilot::default();
    autopilot.arrive(&mut session);

    let dt = config.frame_time();
    let frames = (config.run_seconds * config.tick_rate_hz as f32) as u64;
    let mut ticker = tokio::time::interval(Duration::from_secs_f32(dt));
    let mut next_snapshot = 0.0;
    let interrupt = tokio::signal::ctrl_c();
    tokio::pin!(interrupt);

    info!(
        "Running {} frames at {} Hz ({:.0}s simulated)",
        frames, config.tick_rate_hz, config.run_seconds
    );

    for _ in 0..frames {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = &mut interrupt => {
                info!("Interrupted");
                break;
            }
        }

        let controls = autopilot.controls(&session);
        let report = session.update(dt, &controls);

        if report.enemies_killed > 0 {
            debug!("Killed {} enemies", report.enemies_killed);
        }
        if report.warped_to.is_some() {
            autopilot.arrive(&mut session);
        }
        if session.game_over {
            warn!("Ship lost after {:.1}s", session.elapsed);
            break;
        }
        if session.elapsed >= next_snapshot {
            if let Some(system) = session.current_system() {
                print_json(&system.snapshot());
            }
            next_snapshot += SNAPSHOT_INTERVAL;
        }
    }

    info!(
        "Finished: {} credits, {} systems explored, {} economy ticks",
        session.player.credits,
        session.universe.explored_count(),
        session.economy.ticks()
    );
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => warn!("Failed to serialize snapshot: {}", e),
    }
}

// ── Autopilot ────────────────────────────────────────────────────────

/// Flies gate to gate, selling the hold on arrival and loading up for the
/// best known deal.
#[derive(Default)]
struct Autopilot {
    destination: Option<GridCoord>,
    hops: usize,
}

impl Autopilot {
    fn arrive(&mut self, session: &mut GameSession) {
        self.hops += 1;
        if let Some(market) = session.market() {
            for line in &market.lines {
                debug!(
                    "{:<20} {:>6} {:>6} {:>4} {}",
                    line.commodity,
                    line.buy_price,
                    line.sell_price,
                    line.quantity,
                    session.economy.price_trend(&line.commodity).arrow()
                );
            }
            print_json(&market);
        }

        let held: Vec<(String, u32)> = session
            .player
            .cargo
            .iter()
            .map(|(name, qty)| (name.clone(), *qty))
            .collect();
        for (name, qty) in held {
            match session.sell(&name, qty) {
                Ok(receipt) => info!("{}: {} x {} for {}", receipt.message, qty, name, receipt.total),
                Err(e) => debug!("Could not sell {}: {}", name, e),
            }
        }

        self.destination = None;
        let Some(deal) = session.best_deals(1).into_iter().next() else {
            return;
        };
        let affordable = (session.player.credits / deal.buy_price.max(1)) as u32;
        let quantity = affordable
            .min(deal.quantity_available)
            .min(session.player.cargo_space_remaining());
        if quantity == 0 {
            return;
        }
        match session.buy(&deal.commodity, quantity) {
            Ok(_) => {
                info!(
                    "Hauling {} x {} to {} (+{} each)",
                    quantity, deal.commodity, deal.to_system, deal.profit_per_unit
                );
                self.destination = Some(deal.to_coord);
            }
            Err(e) => debug!("Could not buy {}: {}", deal.commodity, e),
        }
    }

    fn controls(&self, session: &GameSession) -> ShipControls {
        let Some(system) = session.current_system() else {
            return ShipControls::default();
        };

        let heading = self.destination.and_then(|dest| toward(system.coord, dest));
        let gate = heading
            .and_then(|d| system.gate(d))
            .or_else(|| {
                let count = system.warp_gates.len();
                (count > 0).then(|| &system.warp_gates[self.hops % count])
            });
        let Some(gate) = gate else {
            return ShipControls::default();
        };

        let player = &session.player;
        let diff = angle_difference(player.angle, angle_to(player.x, player.y, gate.x, gate.y));
        ShipControls {
            turn_left: diff < -0.05,
            turn_right: diff > 0.05,
            thrust: diff.abs() < 0.5,
            fire: system.enemy_count() > 0,
        }
    }
}

fn toward(from: GridCoord, to: GridCoord) -> Option<Direction> {
    if to.x > from.x {
        Some(Direction::East)
    } else if to.x < from.x {
        Some(Direction::West)
    } else if to.y > from.y {
        Some(Direction::South)
    } else if to.y < from.y {
        Some(Direction::North)
    } else {
        None
    }
}
