//! Carte du labyrinthe : la grille de cellules et les sommets qu'elles partagent.

use log::{trace, warn};

use crate::cell::Cell;
use crate::config::MazeConfig;
use crate::direction::Direction;
use crate::error::Result;
use crate::topology::{Corner, Vertex, VertexGrid};
use crate::wall::{Wall, Walls};

/// Carte du labyrinthe, de dimensions fixes.
///
/// Les opérations de mise à jour sur des coordonnées hors grille sont ignorées
/// silencieusement ; les requêtes rendent alors une valeur neutre.
#[derive(Debug, Clone)]
pub struct Maze {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    vertices: VertexGrid,
}

impl Maze {
    /// Crée une carte vide et relie chaque cellule à ses coins et voisines.
    pub fn new(width: usize, height: usize) -> Self {
        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                cells.push(Cell::new(x, y, width, height));
            }
        }
        Self {
            width,
            height,
            cells,
            vertices: VertexGrid::new(width, height),
        }
    }

    /// Crée la carte décrite par la configuration et y applique les données statiques.
    pub fn from_config(config: &MazeConfig) -> Result<Self> {
        config.validate()?;
        let mut maze = Self::new(config.width, config.height);
        if config.known_perimeter {
            maze.mark_perimeter();
        }
        for wall in &config.static_walls {
            maze.update_cell(wall.x, wall.y, wall.wall, wall.present);
        }
        Ok(maze)
    }

    /// Marque tous les murs du pourtour comme présents.
    pub fn mark_perimeter(&mut self) {
        let (w, h) = (self.width as i32, self.height as i32);
        for x in 0..w {
            self.update_cell(x, 0, Direction::South, true);
            self.update_cell(x, h - 1, Direction::North, true);
        }
        for y in 0..h {
            self.update_cell(0, y, Direction::West, true);
            self.update_cell(w - 1, y, Direction::East, true);
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell_exists(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some()
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x < self.width && y < self.height {
            Some(y * self.width + x)
        } else {
            None
        }
    }

    /// Récupère une cellule en lecture seule.
    pub fn get_cell(&self, x: i32, y: i32) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn vertex(&self, corner: Corner) -> Option<&Vertex> {
        self.vertices.get(corner)
    }

    /// Enregistre l'état d'un mur de la cellule `(x, y)`.
    ///
    /// La cellule voisine partage les mêmes sommets et voit donc la mise à
    /// jour. Un mur connu garde son état : une mesure contraire est ignorée,
    /// si bien que les données statiques l'emportent sur les capteurs.
    pub fn update_cell(&mut self, x: i32, y: i32, wall: Direction, present: bool) {
        let Some(index) = self.index(x, y) else {
            return;
        };
        let cell = &self.cells[index];
        if cell.wall_known(&self.vertices, wall) && cell.wall_present(&self.vertices, wall) != present {
            warn!(
                "Ignoring {} reported at ({}, {}) {:?}: already known {}",
                if present { "wall" } else { "passage" },
                x,
                y,
                wall,
                if present { "open" } else { "present" }
            );
            return;
        }
        trace!("update_cell ({}, {}) {:?} present={}", x, y, wall, present);
        cell.update_wall(&mut self.vertices, wall, present);
    }

    /// État tri-valué d'un mur.
    pub fn wall(&self, x: i32, y: i32, wall: Direction) -> Wall {
        self.get_cell(x, y)
            .map_or(Wall::Undefined, |cell| cell.wall(&self.vertices, wall))
    }

    pub fn walls(&self, x: i32, y: i32) -> Walls {
        self.get_cell(x, y)
            .map_or_else(Walls::default, |cell| cell.walls(&self.vertices))
    }

    /// Vrai si aucun passage n'est confirmé de ce côté (mur présent ou inconnu).
    pub fn wall_present(&self, x: i32, y: i32, wall: Direction) -> bool {
        self.get_cell(x, y)
            .map_or(true, |cell| cell.wall_present(&self.vertices, wall))
    }

    pub fn wall_known(&self, x: i32, y: i32, wall: Direction) -> bool {
        self.get_cell(x, y)
            .is_some_and(|cell| cell.wall_known(&self.vertices, wall))
    }

    pub fn is_forced(&self, x: i32, y: i32, wall: Direction) -> bool {
        self.get_cell(x, y)
            .is_some_and(|cell| cell.is_forced(&self.vertices, wall))
    }

    pub fn visits(&self, x: i32, y: i32, wall: Direction) -> u32 {
        self.get_cell(x, y)
            .map_or(0, |cell| cell.visits(&self.vertices, wall))
    }

    /// Compte un passage du robot par ce mur.
    pub fn visit_wall(&mut self, x: i32, y: i32, wall: Direction) {
        if let Some(index) = self.index(x, y) {
            self.cells[index].visit_wall(&mut self.vertices, wall);
        }
    }

    /// Ouvre un mur par déduction.
    pub fn force_wall(&mut self, x: i32, y: i32, wall: Direction, synthetic_visits: u32) {
        if let Some(index) = self.index(x, y) {
            trace!("force_wall ({}, {}) {:?}", x, y, wall);
            self.cells[index].force_wall(&mut self.vertices, wall, synthetic_visits);
        }
    }

    pub fn cell_fully_known(&self, x: i32, y: i32) -> bool {
        self.get_cell(x, y)
            .is_some_and(|cell| cell.fully_known(&self.vertices))
    }

    pub fn all_cells_known(&self) -> bool {
        self.cells.iter().all(|cell| cell.fully_known(&self.vertices))
    }

    pub fn known_cells(&self) -> usize {
        self.cells
            .iter()
            .filter(|cell| cell.fully_known(&self.vertices))
            .count()
    }

    /// Nombre de murs ouverts par déduction.
    ///
    /// Chaque mur est compté une fois : les côtés nord et est de chaque
    /// cellule, plus les côtés sud et ouest du pourtour.
    pub fn forced_walls(&self) -> usize {
        self.cells
            .iter()
            .map(|cell| {
                let (x, y) = cell.position();
                let mut sides = vec![Direction::North, Direction::East];
                if y == 0 {
                    sides.push(Direction::South);
                }
                if x == 0 {
                    sides.push(Direction::West);
                }
                sides
                    .into_iter()
                    .filter(|&d| cell.is_forced(&self.vertices, d))
                    .count()
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_symmetric(maze: &Maze) {
        for cell in maze.cells() {
            let (x, y) = cell.position();
            for d in Direction::ALL {
                let (nx, ny) = d.new_position(x, y);
                if !maze.cell_exists(nx, ny) {
                    continue;
                }
                assert_eq!(
                    maze.wall_present(x, y, d),
                    maze.wall_present(nx, ny, d.turn_back()),
                    "asymmetric wall at ({}, {}) {:?}",
                    x,
                    y,
                    d
                );
                assert_eq!(maze.wall(x, y, d), maze.wall(nx, ny, d.turn_back()));
            }
        }
    }

    #[test]
    fn test_new_maze_is_unknown() {
        let maze = Maze::new(3, 2);
        assert_eq!(maze.width(), 3);
        assert_eq!(maze.height(), 2);
        assert_eq!(maze.cells().count(), 6);
        assert!(!maze.all_cells_known());
        assert_eq!(maze.wall(1, 1, Direction::North), Wall::Undefined);
    }

    #[test]
    fn test_wall_symmetry_after_updates() {
        let mut maze = Maze::new(3, 3);
        maze.update_cell(1, 1, Direction::North, false);
        maze.update_cell(1, 1, Direction::East, true);
        maze.update_cell(0, 0, Direction::East, false);
        maze.update_cell(2, 2, Direction::South, true);
        maze.update_cell(0, 2, Direction::East, false);
        assert_symmetric(&maze);
        assert_eq!(maze.wall(1, 2, Direction::South), Wall::Open);
        assert_eq!(maze.wall(2, 1, Direction::West), Wall::Wall);
    }

    #[test]
    fn test_knowledge_is_monotonic() {
        let mut maze = Maze::new(2, 1);
        maze.update_cell(0, 0, Direction::East, false);
        maze.update_cell(1, 0, Direction::West, true);
        assert!(maze.wall_known(0, 0, Direction::East));
        assert_eq!(maze.wall(0, 0, Direction::East), Wall::Open);

        maze.update_cell(0, 0, Direction::North, true);
        maze.update_cell(0, 0, Direction::North, false);
        assert!(maze.wall_known(0, 0, Direction::North));
        assert!(maze.wall_present(0, 0, Direction::North));
        assert_eq!(maze.wall(0, 0, Direction::North), Wall::Wall);
    }

    #[test]
    fn test_static_walls_override_later_readings() {
        let mut maze = Maze::from_config(&MazeConfig::default()).unwrap();
        maze.update_cell(3, 7, Direction::North, false);
        maze.update_cell(4, 0, Direction::South, false);
        assert_eq!(maze.wall(3, 7, Direction::North), Wall::Wall);
        assert_eq!(maze.wall(4, 0, Direction::South), Wall::Wall);
    }

    #[test]
    fn test_forced_walls_counts_boundary_sides() {
        let mut maze = Maze::new(2, 2);
        maze.force_wall(0, 0, Direction::West, 2);
        maze.force_wall(1, 0, Direction::South, 2);
        maze.force_wall(0, 0, Direction::East, 2);
        maze.force_wall(1, 1, Direction::North, 2);
        assert_eq!(maze.forced_walls(), 4);
    }

    #[test]
    fn test_out_of_range_is_ignored() {
        let mut maze = Maze::new(2, 2);
        maze.update_cell(-1, 0, Direction::East, false);
        maze.update_cell(2, 0, Direction::West, false);
        maze.visit_wall(5, 5, Direction::North);
        maze.force_wall(0, 9, Direction::North, 2);
        assert!(!maze.wall_known(0, 0, Direction::West));
        assert!(!maze.wall_known(1, 0, Direction::East));
        assert_eq!(maze.wall(-1, 0, Direction::East), Wall::Undefined);
        assert!(maze.wall_present(7, 7, Direction::North));
        assert_eq!(maze.visits(5, 5, Direction::North), 0);
        assert!(!maze.cell_fully_known(9, 9));
    }

    #[test]
    fn test_perimeter_from_config() {
        let config = MazeConfig::with_size(3, 2);
        let maze = Maze::from_config(&config).unwrap();
        for x in 0..3 {
            assert_eq!(maze.wall(x, 0, Direction::South), Wall::Wall);
            assert_eq!(maze.wall(x, 1, Direction::North), Wall::Wall);
            assert_eq!(maze.wall(x, 0, Direction::North), Wall::Undefined);
        }
        for y in 0..2 {
            assert_eq!(maze.wall(0, y, Direction::West), Wall::Wall);
            assert_eq!(maze.wall(2, y, Direction::East), Wall::Wall);
        }
    }

    #[test]
    fn test_default_config_static_walls() {
        let maze = Maze::from_config(&MazeConfig::default()).unwrap();
        assert_eq!(maze.wall(4, 0, Direction::South), Wall::Wall);
        assert_eq!(maze.wall(3, 7, Direction::North), Wall::Wall);
        assert_eq!(maze.known_cells(), 0);
    }

    #[test]
    fn test_visits_shared_between_cells() {
        let mut maze = Maze::new(1, 2);
        maze.update_cell(0, 0, Direction::North, false);
        maze.visit_wall(0, 0, Direction::North);
        assert_eq!(maze.visits(0, 1, Direction::South), 1);
        maze.visit_wall(0, 1, Direction::South);
        assert_eq!(maze.visits(0, 0, Direction::North), 2);
    }

    #[test]
    fn test_all_cells_known() {
        let mut maze = Maze::new(2, 1);
        maze.mark_perimeter();
        assert!(!maze.all_cells_known());
        maze.update_cell(0, 0, Direction::East, false);
        assert!(maze.all_cells_known());
        assert_eq!(maze.known_cells(), 2);
    }
}
