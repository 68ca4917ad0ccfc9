use serde::{Deserialize, Serialize};

use crate::game::player::Player;

// ── Upgrade identifiers ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeKind {
    Engine,
    Weapon,
    Shield,
    Cargo,
    Sensor,
}

impl UpgradeKind {
    pub const ALL: [UpgradeKind; 5] = [
        UpgradeKind::Engine,
        UpgradeKind::Weapon,
        UpgradeKind::Shield,
        UpgradeKind::Cargo,
        UpgradeKind::Sensor,
    ];
}

pub const MAX_LEVEL: u8 = 5;

// ── Upgrade definition ──────────────────────────────────────────────

pub struct UpgradeDef {
    pub kind: UpgradeKind,
    pub name: &'static str,
    /// Price of reaching level `i + 2`, indexed by current level - 1.
    pub costs: [i64; 5],
    pub description: &'static str,
}

/// Returns the full catalogue of ship upgrades.
pub fn all_upgrades() -> &'static [UpgradeDef] {
    use UpgradeKind::*;

    static UPGRADES: &[UpgradeDef] = &[
        UpgradeDef {
            kind: Engine,
            name: "Engine",
            costs: [1000, 2500, 5000, 10000, 20000],
            description: "More thrust, top speed and turn rate",
        },
        UpgradeDef {
            kind: Weapon,
            name: "Weapons",
            costs: [1500, 3000, 6000, 12000, 24000],
            description: "Harder hitting, faster firing lasers",
        },
        UpgradeDef {
            kind: Shield,
            name: "Shields",
            costs: [2000, 4000, 8000, 16000, 32000],
            description: "Larger shield, fully recharged",
        },
        UpgradeDef {
            kind: Cargo,
            name: "Cargo",
            costs: [1000, 2000, 4000, 8000, 16000],
            description: "Five more units of hold space",
        },
        UpgradeDef {
            kind: Sensor,
            name: "Sensors",
            costs: [800, 1600, 3200, 6400, 12800],
            description: "Longer trading range",
        },
    ];

    UPGRADES
}

/// Looks up a single upgrade definition by kind.
pub fn get_upgrade(kind: UpgradeKind) -> &'static UpgradeDef {
    let index = match kind {
        UpgradeKind::Engine => 0,
        UpgradeKind::Weapon => 1,
        UpgradeKind::Shield => 2,
        UpgradeKind::Cargo => 3,
        UpgradeKind::Sensor => 4,
    };
    &all_upgrades()[index]
}

// ── Ship levels ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipLevels {
    pub engine: u8,
    pub weapon: u8,
    pub shield: u8,
    pub cargo: u8,
    pub sensor: u8,
}

impl Default for ShipLevels {
    fn default() -> Self {
        Self {
            engine: 1,
            weapon: 1,
            shield: 1,
            cargo: 1,
            sensor: 1,
        }
    }
}

impl ShipLevels {
    pub fn get(&self, kind: UpgradeKind) -> u8 {
        match kind {
            UpgradeKind::Engine => self.engine,
            UpgradeKind::Weapon => self.weapon,
            UpgradeKind::Shield => self.shield,
            UpgradeKind::Cargo => self.cargo,
            UpgradeKind::Sensor => self.sensor,
        }
    }

    fn slot_mut(&mut self, kind: UpgradeKind) -> &mut u8 {
        match kind {
            UpgradeKind::Engine => &mut self.engine,
            UpgradeKind::Weapon => &mut self.weapon,
            UpgradeKind::Shield => &mut self.shield,
            UpgradeKind::Cargo => &mut self.cargo,
            UpgradeKind::Sensor => &mut self.sensor,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UpgradeError {
    #[error("{0} already at maximum level")]
    AtMaxLevel(&'static str),
    #[error("Not enough credits for upgrade (need {need})")]
    InsufficientCredits { need: i64, have: i64 },
}

/// Price of the next level, or `None` at max level.
pub fn next_cost(levels: &ShipLevels, kind: UpgradeKind) -> Option<i64> {
    let level = levels.get(kind);
    if level >= MAX_LEVEL {
        return None;
    }
    get_upgrade(kind).costs.get(level.saturating_sub(1) as usize).copied()
}

/// Charges the player and applies the next level of `kind`. Returns the
/// new level.
pub fn purchase(player: &mut Player, kind: UpgradeKind) -> Result<u8, UpgradeError> {
    let def = get_upgrade(kind);
    let cost = next_cost(&player.levels, kind).ok_or(UpgradeError::AtMaxLevel(def.name))?;
    if player.credits < cost {
        return Err(UpgradeError::InsufficientCredits {
            need: cost,
            have: player.credits,
        });
    }
    player.credits -= cost;
    apply(player, kind);
    Ok(player.levels.get(kind))
}

/// Raises the level and the stats it governs.
fn apply(player: &mut Player, kind: UpgradeKind) {
    *player.levels.slot_mut(kind) += 1;
    match kind {
        UpgradeKind::Engine => {
            player.thrust *= 1.2;
            player.max_speed *= 1.1;
            player.rotation_speed *= 1.1;
        }
        UpgradeKind::Weapon => {
            player.weapon_damage *= 1.2;
            player.weapon_cooldown_max *= 0.9;
        }
        UpgradeKind::Shield => {
            player.max_shield *= 1.3;
            player.shield = player.max_shield;
        }
        UpgradeKind::Cargo => {
            player.cargo_capacity += 5;
        }
        UpgradeKind::Sensor => {
            player.trade_range *= 1.2;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::GridCoord;

    fn rich_player() -> Player {
        let mut p = Player::new(0.0, 0.0, GridCoord::new(0, 0));
        p.credits = 1_000_000;
        p
    }

    #[test]
    fn catalogue_lookup_matches_kind() {
        for kind in UpgradeKind::ALL {
            assert_eq!(get_upgrade(kind).kind, kind);
        }
    }

    #[test]
    fn cargo_upgrade_adds_space_and_charges() {
        let mut p = rich_player();
        let level = purchase(&mut p, UpgradeKind::Cargo).unwrap();
        assert_eq!(level, 2);
        assert_eq!(p.cargo_capacity, 15);
        assert_eq!(p.credits, 1_000_000 - 1000);
    }

    #[test]
    fn shield_upgrade_refills() {
        let mut p = rich_player();
        p.take_damage(40.0);
        purchase(&mut p, UpgradeKind::Shield).unwrap();
        assert!((p.max_shield - 65.0).abs() < 1e-3);
        assert_eq!(p.shield, p.max_shield);
    }

    #[test]
    fn levels_stop_at_five() {
        let mut p = rich_player();
        for expected in 2..=5 {
            assert_eq!(purchase(&mut p, UpgradeKind::Sensor).unwrap(), expected);
        }
        let err = purchase(&mut p, UpgradeKind::Sensor).unwrap_err();
        assert_eq!(err, UpgradeError::AtMaxLevel("Sensors"));
        assert_eq!(err.to_string(), "Sensors already at maximum level");
        assert_eq!(p.credits, 1_000_000 - 800 - 1600 - 3200 - 6400);
    }

    #[test]
    fn cannot_afford_upgrade() {
        let mut p = Player::new(0.0, 0.0, GridCoord::new(0, 0));
        let err = purchase(&mut p, UpgradeKind::Weapon).unwrap_err();
        assert_eq!(err, UpgradeError::InsufficientCredits { need: 1500, have: 1000 });
        assert_eq!(p.levels.weapon, 1);
        assert_eq!(p.weapon_damage, 10.0);
    }

    #[test]
    fn engine_upgrade_scales_flight_stats() {
        let mut p = rich_player();
        purchase(&mut p, UpgradeKind::Engine).unwrap();
        assert!((p.thrust - 240.0).abs() < 1e-3);
        assert!((p.max_speed - 330.0).abs() < 1e-3);
    }
}
