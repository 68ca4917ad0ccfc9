use std::f32::consts::TAU;

use hecs::World;
use rand::Rng;

use crate::ai::enemy_ai::{enemy_ai_system, FireOrder};
use crate::ecs::components::{Asteroid, CelestialBody, EnemyAi, EnemyShip, Health, Position};
use crate::ecs::systems::movement::drift_system;
use crate::ecs::world::{spawn_asteroid, spawn_celestial_body, spawn_enemy};
use crate::game::collision::{angle_difference, distance};
use crate::game::names;
use crate::protocol::{
    AsteroidKind, BodyKind, Direction, EnemyKind, EnemySnapshot, Faction, GridCoord, PlanetKind,
    StationKind, SystemSnapshot, SystemType,
};

/// Local-space centre of every system; the main body sits here.
pub const CENTER_X: f32 = 512.0;
pub const CENTER_Y: f32 = 384.0;

pub const GATE_DISTANCE: f32 = 1200.0;
/// The player enters a gate when closer than this to its centre.
pub const GATE_TRIGGER_RADIUS: f32 = 20.0;

/// Asteroids keep this far (radians) from any gate lane.
const GATE_LANE_HALF_WIDTH: f32 = 0.5;

/// Galaxy-map position of a grid cell.
pub fn map_position(coord: GridCoord) -> (f32, f32) {
    (100.0 + coord.x as f32 * 80.0, 100.0 + coord.y as f32 * 80.0)
}

// ── Warp gates ───────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct WarpGate {
    pub x: f32,
    pub y: f32,
    pub direction: Direction,
    /// Set once, after every system in the universe exists.
    pub destination: Option<GridCoord>,
    pub active: bool,
}

impl WarpGate {
    pub fn new(direction: Direction) -> Self {
        let (dx, dy) = direction.unit_vector();
        Self {
            x: CENTER_X + dx * GATE_DISTANCE,
            y: CENTER_Y + dy * GATE_DISTANCE,
            direction,
            destination: None,
            active: true,
        }
    }

    pub fn check_collision(&self, x: f32, y: f32) -> bool {
        distance(self.x, self.y, x, y) < GATE_TRIGGER_RADIUS
    }

    /// Angle of the lane from the system centre out to this gate.
    pub fn lane_angle(&self) -> f32 {
        (self.y - CENTER_Y).atan2(self.x - CENTER_X)
    }
}

// ── Star system ──────────────────────────────────────────────────────

pub struct StarSystem {
    pub coord: GridCoord,
    pub map_position: (f32, f32),
    pub name: String,
    pub system_type: SystemType,
    pub faction: Faction,
    pub tech_level: u8,
    pub danger_level: u8,
    pub explored: bool,
    pub world: World,
    pub warp_gates: Vec<WarpGate>,
    pub main_body: Option<hecs::Entity>,
}

impl StarSystem {
    /// An empty system with fixed attributes: no body, gates or ships.
    pub fn bare(
        coord: GridCoord,
        name: &str,
        system_type: SystemType,
        faction: Faction,
        tech_level: u8,
        danger_level: u8,
    ) -> Self {
        Self {
            coord,
            map_position: map_position(coord),
            name: name.to_string(),
            system_type,
            faction,
            tech_level,
            danger_level,
            explored: false,
            world: World::new(),
            warp_gates: Vec::new(),
            main_body: None,
        }
    }

    /// Rolls a new system at `coord` in a `width` x `height` galaxy and
    /// populates it. Gates are placed toward every in-grid neighbour but stay
    /// unlinked until `connect_warp_gates`.
    pub fn generate<R: Rng>(
        coord: GridCoord,
        width: i32,
        height: i32,
        asteroid_attempts: u32,
        rng: &mut R,
    ) -> Self {
        let name = names::system_name(rng);
        let system_type = SystemType::ALL[rng.gen_range(0..SystemType::ALL.len())];
        let faction = Faction::ALL[rng.gen_range(0..Faction::ALL.len())];
        let tech_level = rng.gen_range(1..=10);
        let danger_level = rng.gen_range(1..=10);

        let mut system = Self::bare(coord, &name, system_type, faction, tech_level, danger_level);
        system.spawn_main_body(rng);
        system.place_gates(width, height);
        system.spawn_asteroids(asteroid_attempts, rng);
        system.spawn_enemies(rng);
        system
    }

    fn spawn_main_body<R: Rng>(&mut self, rng: &mut R) {
        let kind = if rng.gen_bool(0.7) {
            BodyKind::Planet(PlanetKind::ALL[rng.gen_range(0..PlanetKind::ALL.len())])
        } else {
            BodyKind::Station(StationKind::ALL[rng.gen_range(0..StationKind::ALL.len())])
        };
        let entity = spawn_celestial_body(
            &mut self.world,
            CENTER_X,
            CENTER_Y,
            kind,
            &self.name,
            self.tech_level,
            rng,
        );
        self.main_body = Some(entity);
    }

    fn place_gates(&mut self, width: i32, height: i32) {
        for direction in Direction::ALL {
            let neighbour = self.coord.step(direction);
            if (0..width).contains(&neighbour.x) && (0..height).contains(&neighbour.y) {
                self.warp_gates.push(WarpGate::new(direction));
            }
        }
    }

    fn near_gate_lane(&self, angle: f32) -> bool {
        self.warp_gates
            .iter()
            .any(|gate| angle_difference(gate.lane_angle(), angle).abs() < GATE_LANE_HALF_WIDTH)
    }

    /// Scatters 5-20 asteroids in a ring around the centre, keeping the gate
    /// lanes clear. After `max_attempts` rejected angles the last candidate is
    /// used as is.
    fn spawn_asteroids<R: Rng>(&mut self, max_attempts: u32, rng: &mut R) {
        let count = rng.gen_range(5..=20);
        for _ in 0..count {
            let mut angle = rng.gen_range(0.0..TAU);
            let mut radius = rng.gen_range(100.0..350.0);
            let mut attempts = 1;
            while self.near_gate_lane(angle) && attempts < max_attempts {
                angle = rng.gen_range(0.0..TAU);
                radius = rng.gen_range(100.0..350.0);
                attempts += 1;
            }

            let kind = AsteroidKind::ALL[rng.gen_range(0..AsteroidKind::ALL.len())];
            spawn_asteroid(
                &mut self.world,
                CENTER_X + angle.cos() * radius,
                CENTER_Y + angle.sin() * radius,
                kind,
                rng,
            );
        }
    }

    fn spawn_enemies<R: Rng>(&mut self, rng: &mut R) {
        let count = rng.gen_range(0..=self.danger_level / 2);
        for _ in 0..count {
            let angle = rng.gen_range(0.0..TAU);
            let radius = rng.gen_range(150.0..350.0);
            let kind = EnemyKind::ALL[rng.gen_range(0..EnemyKind::ALL.len())];
            let level = rng.gen_range(1..=self.danger_level);
            spawn_enemy(
                &mut self.world,
                CENTER_X + angle.cos() * radius,
                CENTER_Y + angle.sin() * radius,
                kind,
                level,
                rng,
            );
        }
    }

    // ── Topology ─────────────────────────────────────────────────────

    /// Points each gate at the neighbouring coordinate in its direction,
    /// provided `exists` reports a system there.
    pub fn connect_warp_gates(&mut self, exists: impl Fn(GridCoord) -> bool) {
        let coord = self.coord;
        for gate in &mut self.warp_gates {
            let neighbour = coord.step(gate.direction);
            gate.destination = exists(neighbour).then_some(neighbour);
        }
    }

    pub fn gate(&self, direction: Direction) -> Option<&WarpGate> {
        self.warp_gates.iter().find(|g| g.direction == direction)
    }

    /// The first active, linked gate the point `(x, y)` is inside.
    pub fn check_gate_collision(&self, x: f32, y: f32) -> Option<&WarpGate> {
        self.warp_gates
            .iter()
            .find(|g| g.active && g.destination.is_some() && g.check_collision(x, y))
    }

    // ── Simulation ───────────────────────────────────────────────────

    /// Advances drift, spin and enemy AI. Returns the shots enemies want fired.
    pub fn update<R: Rng>(
        &mut self,
        delta_time: f32,
        player: Option<(f32, f32)>,
        rng: &mut R,
    ) -> Vec<FireOrder> {
        drift_system(&mut self.world, delta_time);
        enemy_ai_system(&mut self.world, player, delta_time, rng)
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn main_body_kind(&self) -> Option<BodyKind> {
        let entity = self.main_body?;
        let body = self.world.get::<&CelestialBody>(entity).ok()?;
        Some(body.kind)
    }

    pub fn asteroid_count(&self) -> usize {
        self.world.query::<&Asteroid>().iter().count()
    }

    pub fn enemy_count(&self) -> usize {
        self.world.query::<&EnemyShip>().iter().count()
    }

    pub fn enemies(&self) -> Vec<EnemySnapshot> {
        self.world
            .query::<(&EnemyShip, &EnemyAi, &Position, &Health)>()
            .iter()
            .map(|(_e, (ship, ai, pos, health))| EnemySnapshot {
                kind: ship.kind,
                level: ship.level,
                state: ai.state,
                x: pos.x,
                y: pos.y,
                health_pct: if health.max > 0.0 {
                    health.current / health.max
                } else {
                    0.0
                },
            })
            .collect()
    }

    pub fn snapshot(&self) -> SystemSnapshot {
        SystemSnapshot {
            coord: self.coord,
            name: self.name.clone(),
            system_type: self.system_type,
            faction: self.faction,
            tech_level: self.tech_level,
            danger_level: self.danger_level,
            explored: self.explored,
            main_body: self.main_body_kind(),
            gates: self
                .warp_gates
                .iter()
                .map(|g| (g.direction, g.destination))
                .collect(),
            asteroid_count: self.asteroid_count(),
            enemies: self.enemies(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::Collider;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn generate(coord: GridCoord, seed: u64) -> StarSystem {
        let mut rng = StdRng::seed_from_u64(seed);
        StarSystem::generate(coord, 10, 10, 64, &mut rng)
    }

    #[test]
    fn attributes_are_in_range() {
        for seed in 0..30 {
            let system = generate(GridCoord::new(4, 4), seed);
            assert!((1..=10).contains(&system.tech_level));
            assert!((1..=10).contains(&system.danger_level));
            assert!(!system.explored);
            assert_eq!(system.map_position, (420.0, 420.0));
        }
    }

    #[test]
    fn gate_count_follows_grid_position() {
        assert_eq!(generate(GridCoord::new(0, 0), 1).warp_gates.len(), 2);
        assert_eq!(generate(GridCoord::new(9, 9), 2).warp_gates.len(), 2);
        assert_eq!(generate(GridCoord::new(0, 5), 3).warp_gates.len(), 3);
        assert_eq!(generate(GridCoord::new(5, 5), 4).warp_gates.len(), 4);
    }

    #[test]
    fn gates_start_unlinked() {
        let system = generate(GridCoord::new(5, 5), 5);
        assert!(system.warp_gates.iter().all(|g| g.destination.is_none()));
        assert!(system.check_gate_collision(CENTER_X, CENTER_Y - GATE_DISTANCE).is_none());
    }

    #[test]
    fn gates_sit_on_the_compass_points() {
        let system = generate(GridCoord::new(5, 5), 6);
        let north = system.gate(Direction::North).unwrap();
        assert_eq!((north.x, north.y), (CENTER_X, CENTER_Y - GATE_DISTANCE));
        let west = system.gate(Direction::West).unwrap();
        assert_eq!((west.x, west.y), (CENTER_X - GATE_DISTANCE, CENTER_Y));
    }

    #[test]
    fn main_body_is_tradable_at_centre() {
        for seed in 0..10 {
            let system = generate(GridCoord::new(2, 3), seed);
            let entity = system.main_body.unwrap();
            let body = system.world.get::<&CelestialBody>(entity).unwrap();
            assert!(body.can_trade);
            assert_eq!(body.name, system.name);
            let pos = system.world.get::<&Position>(entity).unwrap();
            assert_eq!((pos.x, pos.y), (CENTER_X, CENTER_Y));
        }
    }

    #[test]
    fn asteroids_avoid_gate_lanes() {
        for seed in 0..20 {
            let system = generate(GridCoord::new(5, 5), seed);
            let count = system.asteroid_count();
            assert!((5..=20).contains(&count));

            for (_e, (_a, pos, col)) in system
                .world
                .query::<(&Asteroid, &Position, &Collider)>()
                .iter()
            {
                let r = distance(pos.x, pos.y, CENTER_X, CENTER_Y);
                assert!((99.9..=350.1).contains(&r), "radius {}", r);
                assert!((5.0..=20.0).contains(&col.radius));
                let angle = (pos.y - CENTER_Y).atan2(pos.x - CENTER_X);
                for gate in &system.warp_gates {
                    let gap = angle_difference(gate.lane_angle(), angle).abs();
                    assert!(gap > 0.49, "asteroid {} rad from {:?} lane", gap, gate.direction);
                }
            }
        }
    }

    #[test]
    fn placement_terminates_when_every_angle_is_blocked() {
        let mut system = StarSystem::bare(
            GridCoord::new(1, 1),
            "Crowded",
            SystemType::Mining,
            Faction::Independent,
            3,
            1,
        );
        // Sixteen lanes at PI/8 spacing leave no clear angle.
        for i in 0..16 {
            let mut gate = WarpGate::new(Direction::North);
            let angle = i as f32 * TAU / 16.0;
            gate.x = CENTER_X + angle.cos() * GATE_DISTANCE;
            gate.y = CENTER_Y + angle.sin() * GATE_DISTANCE;
            system.warp_gates.push(gate);
        }
        let mut rng = StdRng::seed_from_u64(9);
        system.spawn_asteroids(8, &mut rng);
        assert!((5..=20).contains(&system.asteroid_count()));
    }

    #[test]
    fn enemy_count_is_bounded_by_danger() {
        for seed in 0..30 {
            let system = generate(GridCoord::new(3, 3), seed);
            assert!(system.enemy_count() <= (system.danger_level / 2) as usize);
            for enemy in system.enemies() {
                assert!(enemy.level >= 1 && enemy.level <= system.danger_level);
                assert_eq!(enemy.health_pct, 1.0);
            }
        }
    }

    #[test]
    fn connect_only_links_existing_neighbours() {
        let mut system = generate(GridCoord::new(5, 5), 7);
        system.connect_warp_gates(|c| c.y != 4);
        assert_eq!(system.gate(Direction::North).unwrap().destination, None);
        assert_eq!(
            system.gate(Direction::East).unwrap().destination,
            Some(GridCoord::new(6, 5))
        );
    }

    #[test]
    fn snapshot_reports_contents() {
        let mut system = generate(GridCoord::new(0, 0), 8);
        system.connect_warp_gates(|_| true);
        let snap = system.snapshot();
        assert_eq!(snap.name, system.name);
        assert_eq!(snap.gates.len(), 2);
        assert!(snap.gates.iter().all(|(_, dest)| dest.is_some()));
        assert!(snap.main_body.is_some());
        assert_eq!(snap.asteroid_count, system.asteroid_count());
        let json = serde_json::to_string(&snap).unwrap();
        assert!(json.contains("\"coord\""));
    }
}
