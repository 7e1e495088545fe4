use crate::direction::Direction;
use crate::topology::{Corner, VertexGrid};
use crate::wall::{Wall, Walls};

/// Représente une cellule du labyrinthe.
///
/// Une cellule ne stocke aucun état de mur : elle connaît seulement ses quatre
/// coins et ses voisines, et lit tout le reste dans la [`VertexGrid`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    x: usize,
    y: usize,
    /// Cellules voisines, indexées par direction (`None` au bord de la grille).
    neighbors: [Option<(usize, usize)>; 4],
}

impl Cell {
    /// Crée la cellule `(x, y)` d'une grille `width x height` et calcule ses voisines.
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        let neighbors = Direction::ALL.map(|d| {
            let (nx, ny) = d.new_position(x as i32, y as i32);
            if nx >= 0 && ny >= 0 && (nx as usize) < width && (ny as usize) < height {
                Some((nx as usize, ny as usize))
            } else {
                None
            }
        });
        Self { x, y, neighbors }
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x as i32, self.y as i32)
    }

    pub fn neighbor(&self, direction: Direction) -> Option<(usize, usize)> {
        self.neighbors[direction.index()]
    }

    pub fn top_right(&self) -> Corner {
        (self.x + 1, self.y + 1)
    }

    pub fn top_left(&self) -> Corner {
        (self.x, self.y + 1)
    }

    pub fn bottom_left(&self) -> Corner {
        (self.x, self.y)
    }

    pub fn bottom_right(&self) -> Corner {
        (self.x + 1, self.y)
    }

    /// Segment qui porte le mur `wall` : sommet de départ et sens du segment.
    fn edge(&self, wall: Direction) -> (Corner, Direction) {
        match wall {
            Direction::North => (self.top_left(), Direction::East),
            Direction::East => (self.bottom_right(), Direction::North),
            Direction::South => (self.bottom_left(), Direction::East),
            Direction::West => (self.bottom_left(), Direction::North),
        }
    }

    pub fn wall_known(&self, vertices: &VertexGrid, wall: Direction) -> bool {
        let (corner, along) = self.edge(wall);
        vertices.is_known(corner, along)
    }

    /// Vrai tant que les deux sommets ne sont pas reliés, même si le mur est inconnu.
    pub fn wall_present(&self, vertices: &VertexGrid, wall: Direction) -> bool {
        let (corner, along) = self.edge(wall);
        !vertices.is_linked(corner, along)
    }

    pub fn wall(&self, vertices: &VertexGrid, wall: Direction) -> Wall {
        if self.wall_known(vertices, wall) {
            Wall::from_presence(self.wall_present(vertices, wall))
        } else {
            Wall::Undefined
        }
    }

    pub fn walls(&self, vertices: &VertexGrid) -> Walls {
        let mut walls = Walls::default();
        for d in Direction::ALL {
            walls.set(d, self.wall(vertices, d));
        }
        walls
    }

    pub fn is_forced(&self, vertices: &VertexGrid, wall: Direction) -> bool {
        let (corner, along) = self.edge(wall);
        vertices.is_forced(corner, along)
    }

    pub fn visits(&self, vertices: &VertexGrid, wall: Direction) -> u32 {
        let (corner, along) = self.edge(wall);
        vertices.visits(corner, along)
    }

    /// Chaque coin doit connaître ses deux côtés tournés vers la cellule.
    pub fn fully_known(&self, vertices: &VertexGrid) -> bool {
        let corner_known = |corner: Corner, a: Direction, b: Direction| {
            vertices
                .get(corner)
                .is_some_and(|vertex| vertex.is_known(a) && vertex.is_known(b))
        };
        corner_known(self.top_right(), Direction::West, Direction::South)
            && corner_known(self.top_left(), Direction::East, Direction::South)
            && corner_known(self.bottom_right(), Direction::North, Direction::West)
            && corner_known(self.bottom_left(), Direction::East, Direction::North)
    }

    /// Enregistre l'état mesuré d'un mur. Un mur absent relie les deux sommets.
    pub fn update_wall(&self, vertices: &mut VertexGrid, wall: Direction, present: bool) {
        let (corner, along) = self.edge(wall);
        vertices.mark_known(corner, along);
        if !present {
            vertices.link(corner, along);
        }
    }

    pub fn visit_wall(&self, vertices: &mut VertexGrid, wall: Direction) {
        let (corner, along) = self.edge(wall);
        vertices.visit(corner, along);
    }

    /// Ouvre un mur par déduction et le compte `synthetic_visits` fois comme parcouru.
    pub fn force_wall(&self, vertices: &mut VertexGrid, wall: Direction, synthetic_visits: u32) {
        for _ in 0..synthetic_visits {
            self.visit_wall(vertices, wall);
        }
        self.update_wall(vertices, wall, false);
        let (corner, along) = self.edge(wall);
        vertices.mark_forced(corner, along);
    }
}
