//! Vue figée de la carte, destinée à l'affichage et à l'export JSON.

use serde::{Deserialize, Serialize};

use crate::direction::Direction;
use crate::error::Result;
use crate::maze::Maze;
use crate::topology::Junction;
use crate::wall::Walls;

/// État d'une cellule au moment de la capture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellSnapshot {
    pub x: i32,
    pub y: i32,
    pub walls: Walls,
    /// Passages par mur, indexés par direction (N, E, S, O).
    pub visits: [u32; 4],
    pub forced: [bool; 4],
}

/// Forme d'un coin de la grille.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CornerSnapshot {
    pub x: usize,
    pub y: usize,
    pub junction: Junction,
    pub glyph: char,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazeSnapshot {
    pub width: usize,
    pub height: usize,
    /// Cellules ligne par ligne, en partant de `y = 0`.
    pub cells: Vec<CellSnapshot>,
    /// Coins ligne par ligne, `(width + 1) x (height + 1)`.
    pub corners: Vec<CornerSnapshot>,
}

impl MazeSnapshot {
    pub fn cell(&self, x: i32, y: i32) -> Option<&CellSnapshot> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        self.cells.get(y as usize * self.width + x as usize)
    }

    pub fn corner(&self, x: usize, y: usize) -> Option<&CornerSnapshot> {
        if x > self.width || y > self.height {
            return None;
        }
        self.corners.get(y * (self.width + 1) + x)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Maze {
    /// Capture l'état courant de toutes les cellules et de tous les coins.
    pub fn snapshot(&self) -> MazeSnapshot {
        let cells = self
            .cells()
            .map(|cell| {
                let (x, y) = cell.position();
                CellSnapshot {
                    x,
                    y,
                    walls: self.walls(x, y),
                    visits: Direction::ALL.map(|d| self.visits(x, y, d)),
                    forced: Direction::ALL.map(|d| self.is_forced(x, y, d)),
                }
            })
            .collect();

        let mut corners = Vec::with_capacity((self.width() + 1) * (self.height() + 1));
        for y in 0..=self.height() {
            for x in 0..=self.width() {
                let junction = self
                    .vertex((x, y))
                    .map(|vertex| vertex.junction())
                    .unwrap_or_default();
                corners.push(CornerSnapshot {
                    x,
                    y,
                    junction,
                    glyph: junction.glyph(),
                });
            }
        }

        MazeSnapshot {
            width: self.width(),
            height: self.height(),
            cells,
            corners,
        }
    }
}
