//! Exploration de Tremaux : le robot parcourt le labyrinthe en préférant les
//! passages les moins empruntés, jusqu'à ce que toutes les cellules soient connues.

use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};

use crate::config::ExplorerConfig;
use crate::direction::{normalize_heading, signed_delta, Direction};
use crate::error::{MazeError, Result};
use crate::maze::Maze;
use crate::robot::{FloorMarker, Robot};

/// Résultat d'un pas d'exploration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Toutes les cellules sont connues.
    Finished,
    Moved {
        from: (i32, i32),
        to: (i32, i32),
        direction: Direction,
        /// Passages par le mur franchi, celui-ci compris.
        visits: u32,
    },
}

/// Bilan d'une exploration complète.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplorationReport {
    pub steps: usize,
    pub forced_walls: usize,
    pub visited_cells: usize,
    /// Cellules occupées successivement, départ compris.
    pub trail: Vec<(i32, i32)>,
}

/// Choisit le passage à emprunter parmi `(passages, direction)`.
///
/// Le moins emprunté l'emporte ; à égalité on continue tout droit, sinon on
/// fait demi-tour, sinon on prend le premier dans l'ordre `(passages, direction)`.
pub fn choose_direction(candidates: &[(u32, Direction)], facing: Direction) -> Option<Direction> {
    let mut sorted = candidates.to_vec();
    sorted.sort();
    let &(least, first) = sorted.first()?;
    if sorted.contains(&(least, facing)) {
        Some(facing)
    } else if sorted.contains(&(least, facing.turn_back())) {
        Some(facing.turn_back())
    } else {
        Some(first)
    }
}

pub struct Explorer<R: Robot> {
    maze: Maze,
    robot: R,
    config: ExplorerConfig,
    steps: usize,
    trail: Vec<(i32, i32)>,
}

impl<R: Robot> Explorer<R> {
    pub fn new(maze: Maze, robot: R, config: ExplorerConfig) -> Self {
        let mut explorer = Self {
            maze,
            robot,
            config,
            steps: 0,
            trail: Vec::new(),
        };
        let start = explorer.current_cell_location();
        explorer.trail.push(start);
        explorer
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn robot(&self) -> &R {
        &self.robot
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn trail(&self) -> &[(i32, i32)] {
        &self.trail
    }

    pub fn into_parts(self) -> (Maze, R) {
        (self.maze, self.robot)
    }

    /// Cellule occupée, déduite de la position odométrique.
    pub fn current_cell_location(&self) -> (i32, i32) {
        let (x, y) = self.robot.current_position();
        let to_cell =
            |v: f64| ((v + self.config.origin_offset_mm) / self.config.cell_length_mm).floor() as i32;
        (to_cell(x), to_cell(y))
    }

    pub fn facing_wall(&self) -> Direction {
        Direction::from_heading(self.robot.current_heading())
    }

    /// Lit le mur face au robot et l'enregistre ; rend `true` si le mur est présent.
    ///
    /// Un mur déjà connu n'est pas mesuré à nouveau. `full` indique que le
    /// robot est aligné sur le mur : la tolérance longue s'applique et la
    /// lecture peut servir à ouvrir les murs suivants dans l'axe.
    pub fn check_forward_wall(&mut self, full: bool) -> bool {
        let (x, y) = self.current_cell_location();
        let facing = self.facing_wall();
        if self.maze.wall_known(x, y, facing) {
            return self.maze.wall_present(x, y, facing);
        }

        let distance = self.robot.front_distance();
        let tolerance = if full {
            self.config.long_tolerance_mm
        } else {
            self.config.short_tolerance_mm
        };
        let mut present = distance < tolerance;
        if self.config.use_floor_markers {
            match (self.robot.floor_marker(), facing) {
                (Some(FloorMarker::Goal), Direction::North) | (Some(FloorMarker::Start), Direction::South) => {
                    present = true
                }
                _ => {}
            }
        }
        debug!(
            "({}, {}) {:?}: {:.0} mm -> {}",
            x,
            y,
            facing,
            distance,
            if present { "wall" } else { "open" }
        );

        if full && !present && self.config.lookahead {
            self.look_ahead(x, y, facing, distance);
        }
        self.maze.update_cell(x, y, facing, present);
        self.maze.settle(self.config.forced_visits);
        present
    }

    /// Une lecture longue traverse plusieurs cellules : les `n` murs devant sont
    /// ouverts et le suivant est présent.
    ///
    /// Seuls les murs internes encore inconnus sont enregistrés. Une lecture
    /// infinie ou invalide ouvre l'axe jusqu'au bord de la grille.
    fn look_ahead(&mut self, x: i32, y: i32, facing: Direction, distance: f64) {
        let reach = self.maze.width().max(self.maze.height()) as f64;
        let open = if distance.is_finite() {
            ((distance - self.config.long_tolerance_mm) / self.config.cell_length_mm).floor() + 1.0
        } else {
            reach
        };
        let open = open.clamp(0.0, reach) as i32;

        let (dx, dy) = facing.offset();
        for step in 0..=open {
            let (cx, cy) = (x + dx * step, y + dy * step);
            let (nx, ny) = facing.new_position(cx, cy);
            if !self.maze.cell_exists(cx, cy) || !self.maze.cell_exists(nx, ny) {
                break;
            }
            if self.maze.wall_known(cx, cy, facing) {
                if self.maze.wall_present(cx, cy, facing) {
                    break;
                }
                continue;
            }
            let present = step == open && distance.is_finite();
            self.maze.update_cell(cx, cy, facing, present);
            if present {
                break;
            }
        }
    }

    /// Se tourne face au mur puis le lit avec la tolérance longue.
    pub fn turn_to_wall(&mut self, wall: Direction) -> Result<bool> {
        self.robot.turn_to_heading(wall.heading())?;
        Ok(self.check_forward_wall(true))
    }

    /// S'arrête à `short_turn_offset_deg` du cap du mur, du côté anti-horaire
    /// ou horaire.
    pub fn turn_short_to_wall(&mut self, wall: Direction, clockwise: bool) -> Result<()> {
        let offset = self.config.short_turn_offset_deg;
        let mut heading = wall.heading() + offset;
        if clockwise {
            heading -= 2.0 * offset;
        }
        self.robot.turn_to_heading(normalize_heading(heading))
    }

    /// Lecture en biais, du côté du mur le plus proche du cap actuel.
    fn short_check(&mut self, wall: Direction) -> Result<bool> {
        let (x, y) = self.current_cell_location();
        if self.maze.wall_known(x, y, wall) {
            return Ok(self.maze.wall_present(x, y, wall));
        }
        let delta = signed_delta(self.robot.current_heading(), wall.heading());
        self.turn_short_to_wall(wall, delta > 0.0)?;
        Ok(self.check_forward_wall(false))
    }

    /// Détermine les quatre murs de la cellule courante en limitant les rotations.
    ///
    /// Rend la présence des murs indexée par direction. Un mur resté inconnu
    /// est considéré comme présent.
    pub fn check_junction(&mut self) -> Result<[bool; 4]> {
        let facing = self.facing_wall();
        self.turn_to_wall(facing)?;

        let (x, y) = self.current_cell_location();
        let (left, right, back) = (facing.turn_left(), facing.turn_right(), facing.turn_back());
        let unknown = |maze: &Maze, d: Direction| !maze.wall_known(x, y, d);

        match (
            unknown(&self.maze, left),
            unknown(&self.maze, right),
            unknown(&self.maze, back),
        ) {
            (true, right_unknown, true) => {
                self.turn_to_wall(left)?;
                if right_unknown {
                    self.turn_to_wall(back)?;
                    self.short_check(right)?;
                } else {
                    self.short_check(back)?;
                }
            }
            (true, true, false) => {
                self.short_check(left)?;
                self.short_check(right)?;
            }
            (true, false, false) => {
                self.short_check(left)?;
            }
            (false, true, true) => {
                self.turn_to_wall(right)?;
                self.short_check(back)?;
            }
            (false, true, false) => {
                self.short_check(right)?;
            }
            (false, false, true) => {
                self.turn_to_wall(right)?;
                self.short_check(back)?;
            }
            (false, false, false) => {}
        }

        let (x, y) = self.current_cell_location();
        let walls = Direction::ALL.map(|d| self.maze.wall_present(x, y, d));
        debug!("Junction ({}, {}) facing {:?}: N/E/S/W present = {:?}", x, y, facing, walls);
        Ok(walls)
    }

    /// Traverse le mur choisi : en marche avant s'il est devant ou sur le côté,
    /// en marche arrière s'il est derrière.
    pub fn drive_through_wall(&mut self, wall: Direction) -> Result<()> {
        let facing = self.facing_wall();
        if wall == facing || wall.index() % 2 != facing.index() % 2 {
            self.robot.turn_to_heading(wall.heading())?;
            self.robot.drive_one_cell(true)
        } else {
            self.robot.turn_to_heading(facing.heading())?;
            self.robot.drive_one_cell(false)
        }
    }

    /// Un pas de l'algorithme de Tremaux.
    pub fn step(&mut self) -> Result<Step> {
        self.maze.settle(self.config.forced_visits);
        if self.maze.all_cells_known() {
            return Ok(Step::Finished);
        }

        let from = self.current_cell_location();
        let facing = self.facing_wall();
        let walls = self.check_junction()?;

        let candidates: Vec<(u32, Direction)> = Direction::ALL
            .into_iter()
            .filter(|d| !walls[d.index()])
            .map(|d| (self.maze.visits(from.0, from.1, d), d))
            .collect();
        let Some(direction) = choose_direction(&candidates, facing) else {
            error!("No passage out of ({}, {}): the map contradicts a connected maze", from.0, from.1);
            return Err(MazeError::NoPassage { x: from.0, y: from.1 });
        };
        debug!("({}, {}) candidates {:?} -> {:?}", from.0, from.1, candidates, direction);

        self.maze.visit_wall(from.0, from.1, direction);
        self.drive_through_wall(direction)?;
        self.steps += 1;

        let to = self.current_cell_location();
        if to != direction.new_position(from.0, from.1) {
            warn!("Expected to reach {:?} but odometry says {:?}", direction.new_position(from.0, from.1), to);
        }
        self.trail.push(to);
        Ok(Step::Moved {
            from,
            to,
            direction,
            visits: self.maze.visits(from.0, from.1, direction),
        })
    }

    /// Explore jusqu'à ce que toutes les cellules soient connues.
    pub fn explore(&mut self) -> Result<ExplorationReport> {
        info!(
            "Exploring {}x{} maze from {:?}",
            self.maze.width(),
            self.maze.height(),
            self.current_cell_location()
        );
        loop {
            if self.steps >= self.config.max_steps {
                error!("Step limit reached with {} cell(s) known", self.maze.known_cells());
                return Err(MazeError::StepLimit(self.steps));
            }
            if self.step()? == Step::Finished {
                break;
            }
        }

        let mut visited = self.trail.clone();
        visited.sort();
        visited.dedup();
        let report = ExplorationReport {
            steps: self.steps,
            forced_walls: self.maze.forced_walls(),
            visited_cells: visited.len(),
            trail: self.trail.clone(),
        };
        info!(
            "Maze mapped in {} step(s), {} cell(s) visited, {} wall(s) inferred",
            report.steps, report.visited_cells, report.forced_walls
        );
        Ok(report)
    }
}
