//! Modèle topologique de la grille.
//!
//! Les murs ne sont pas stockés sur les cellules mais sur les coins (sommets)
//! qu'elles partagent. Un mur est le segment entre deux sommets voisins ; les
//! deux extrémités sont toujours mises à jour ensemble, si bien que deux
//! cellules qui partagent un mur voient forcément le même état.

use serde::{Deserialize, Serialize};

use crate::direction::Direction;

/// Coordonnées d'un sommet dans la grille `(width + 1) x (height + 1)`.
pub type Corner = (usize, usize);

/// Un coin de la grille, partagé par jusqu'à 4 cellules.
///
/// Chaque tableau est indexé par [`Direction::index`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vertex {
    /// Sommet voisin, présent ssi le mur de ce côté est confirmé absent.
    neighbor: [Option<Corner>; 4],
    known: [bool; 4],
    visits: [u32; 4],
    forced: [bool; 4],
}

impl Vertex {
    pub fn neighbor(&self, side: Direction) -> Option<Corner> {
        self.neighbor[side.index()]
    }

    pub fn is_known(&self, side: Direction) -> bool {
        self.known[side.index()]
    }

    pub fn visits(&self, side: Direction) -> u32 {
        self.visits[side.index()]
    }

    pub fn is_forced(&self, side: Direction) -> bool {
        self.forced[side.index()]
    }

    /// Vrai si un mur connu part de ce coin dans la direction donnée.
    pub fn has_wall(&self, side: Direction) -> bool {
        self.is_known(side) && self.neighbor(side).is_none()
    }

    /// Forme de jonction dessinée par les murs connus qui partent de ce coin.
    pub fn junction(&self) -> Junction {
        Junction {
            north: self.has_wall(Direction::North),
            east: self.has_wall(Direction::East),
            south: self.has_wall(Direction::South),
            west: self.has_wall(Direction::West),
        }
    }
}

/// Forme d'un coin : quels bras de mur en partent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Junction {
    pub north: bool,
    pub east: bool,
    pub south: bool,
    pub west: bool,
}

impl Junction {
    /// Caractère de dessin de boîte correspondant à la jonction.
    pub fn glyph(&self) -> char {
        match (self.north, self.east, self.south, self.west) {
            (false, false, false, false) => ' ',
            (true, false, false, false) => '│',
            (false, true, false, false) => '─',
            (false, false, true, false) => '│',
            (false, false, false, true) => '─',
            (true, true, false, false) => '└',
            (true, false, true, false) => '│',
            (true, false, false, true) => '┘',
            (false, true, true, false) => '┌',
            (false, true, false, true) => '─',
            (false, false, true, true) => '┐',
            (true, true, true, false) => '├',
            (true, true, false, true) => '┴',
            (true, false, true, true) => '┤',
            (false, true, true, true) => '┬',
            (true, true, true, true) => '┼',
        }
    }
}

/// Stockage indexé de tous les sommets.
///
/// Un mur est désigné par `(corner, along)` : le sommet de départ et la
/// direction dans laquelle le segment s'étend jusqu'au second sommet.
#[derive(Debug, Clone)]
pub struct VertexGrid {
    columns: usize,
    rows: usize,
    vertices: Vec<Vertex>,
}

impl VertexGrid {
    /// Crée les sommets d'une grille de `width x height` cellules.
    pub fn new(width: usize, height: usize) -> Self {
        let columns = width + 1;
        let rows = height + 1;
        Self {
            columns,
            rows,
            vertices: vec![Vertex::default(); columns * rows],
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    fn index(&self, (x, y): Corner) -> Option<usize> {
        if x < self.columns && y < self.rows {
            Some(y * self.columns + x)
        } else {
            None
        }
    }

    pub fn get(&self, corner: Corner) -> Option<&Vertex> {
        self.index(corner).map(|i| &self.vertices[i])
    }

    fn get_mut(&mut self, corner: Corner) -> Option<&mut Vertex> {
        let index = self.index(corner)?;
        Some(&mut self.vertices[index])
    }

    /// Sommet à l'autre bout du segment qui part de `corner` vers `along`.
    pub fn far_end(&self, (x, y): Corner, along: Direction) -> Option<Corner> {
        let (dx, dy) = along.offset();
        let fx = x as i64 + dx as i64;
        let fy = y as i64 + dy as i64;
        if fx < 0 || fy < 0 {
            return None;
        }
        let far = (fx as usize, fy as usize);
        self.index(far).map(|_| far)
    }

    /// Applique `f` aux deux extrémités du segment, chacune avec son côté.
    fn update_edge(&mut self, corner: Corner, along: Direction, mut f: impl FnMut(&mut Vertex, Direction, Corner)) {
        let Some(far) = self.far_end(corner, along) else {
            return;
        };
        if let Some(vertex) = self.get_mut(corner) {
            f(vertex, along, far);
        }
        if let Some(vertex) = self.get_mut(far) {
            f(vertex, along.turn_back(), corner);
        }
    }

    /// Relie les deux sommets : le mur est absent.
    pub fn link(&mut self, corner: Corner, along: Direction) {
        self.update_edge(corner, along, |vertex, side, other| {
            vertex.neighbor[side.index()] = Some(other);
        });
    }

    pub fn mark_known(&mut self, corner: Corner, along: Direction) {
        self.update_edge(corner, along, |vertex, side, _| {
            vertex.known[side.index()] = true;
        });
    }

    pub fn mark_forced(&mut self, corner: Corner, along: Direction) {
        self.update_edge(corner, along, |vertex, side, _| {
            vertex.forced[side.index()] = true;
        });
    }

    pub fn visit(&mut self, corner: Corner, along: Direction) {
        self.update_edge(corner, along, |vertex, side, _| {
            vertex.visits[side.index()] += 1;
        });
    }

    fn both_ends(&self, corner: Corner, along: Direction, f: impl Fn(&Vertex, Direction) -> bool) -> bool {
        let Some(far) = self.far_end(corner, along) else {
            return false;
        };
        match (self.get(corner), self.get(far)) {
            (Some(a), Some(b)) => f(a, along) && f(b, along.turn_back()),
            _ => false,
        }
    }

    pub fn is_linked(&self, corner: Corner, along: Direction) -> bool {
        self.both_ends(corner, along, |vertex, side| vertex.neighbor(side).is_some())
    }

    pub fn is_known(&self, corner: Corner, along: Direction) -> bool {
        self.both_ends(corner, along, |vertex, side| vertex.is_known(side))
    }

    pub fn is_forced(&self, corner: Corner, along: Direction) -> bool {
        self.get(corner).is_some_and(|vertex| vertex.is_forced(along))
    }

    /// Nombre de passages par ce segment (lu sur le sommet de départ).
    pub fn visits(&self, corner: Corner, along: Direction) -> u32 {
        self.get(corner).map_or(0, |vertex| vertex.visits(along))
    }
}
