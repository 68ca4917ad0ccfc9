use std::collections::{HashMap, HashSet};

use rand::Rng;
use tracing::info;

use crate::game::star_system::StarSystem;
use crate::protocol::GridCoord;

/// Fixed-size grid of star systems keyed by coordinate.
pub struct Universe {
    pub width: i32,
    pub height: i32,
    pub systems: HashMap<GridCoord, StarSystem>,
}

impl Universe {
    /// Builds every system first, then links all warp gates.
    pub fn generate<R: Rng>(width: i32, height: i32, asteroid_attempts: u32, rng: &mut R) -> Self {
        let mut universe = Self {
            width,
            height,
            systems: HashMap::new(),
        };
        universe.generate_systems(asteroid_attempts, rng);
        universe.connect_systems();

        let enemies: usize = universe.systems.values().map(|s| s.enemy_count()).sum();
        info!(
            "Generated {}x{} galaxy: {} systems, {} enemy ships",
            width,
            height,
            universe.systems.len(),
            enemies
        );
        universe
    }

    fn generate_systems<R: Rng>(&mut self, asteroid_attempts: u32, rng: &mut R) {
        for x in 0..self.width {
            for y in 0..self.height {
                let coord = GridCoord::new(x, y);
                let system =
                    StarSystem::generate(coord, self.width, self.height, asteroid_attempts, rng);
                self.systems.insert(coord, system);
            }
        }
    }

    /// Resolves every gate's destination. Only valid once all systems exist.
    pub fn connect_systems(&mut self) {
        let existing: HashSet<GridCoord> = self.systems.keys().copied().collect();
        for system in self.systems.values_mut() {
            system.connect_warp_gates(|c| existing.contains(&c));
        }
    }

    pub fn in_bounds(&self, coord: GridCoord) -> bool {
        (0..self.width).contains(&coord.x) && (0..self.height).contains(&coord.y)
    }

    pub fn get_system(&self, coord: GridCoord) -> Option<&StarSystem> {
        if !self.in_bounds(coord) {
            return None;
        }
        self.systems.get(&coord)
    }

    pub fn get_system_mut(&mut self, coord: GridCoord) -> Option<&mut StarSystem> {
        if !self.in_bounds(coord) {
            return None;
        }
        self.systems.get_mut(&coord)
    }

    /// Explored systems in grid order; the trade planner only knows these.
    pub fn explored_systems(&self) -> Vec<&StarSystem> {
        let mut explored: Vec<&StarSystem> = self.systems.values().filter(|s| s.explored).collect();
        explored.sort_by_key(|s| s.coord);
        explored
    }

    pub fn explored_count(&self) -> usize {
        self.systems.values().filter(|s| s.explored).count()
    }
}
