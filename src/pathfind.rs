//! Recherche du plus court chemin sur la carte découverte.

use std::collections::VecDeque;

use log::debug;

use crate::direction::Direction;
use crate::error::{MazeError, Result};
use crate::maze::Maze;

impl Maze {
    /// Plus court chemin de `start` à `end`, bornes incluses.
    ///
    /// Parcours en largeur : seules les cellules séparées par un mur confirmé
    /// ouvert sont reliées. Les voisines sont examinées dans l'ordre N, E, S, O,
    /// et le prédécesseur d'une cellule est la première qui l'a découverte.
    pub fn pathfind(&self, start: (i32, i32), end: (i32, i32)) -> Result<Vec<(i32, i32)>> {
        for (x, y) in [start, end] {
            if !self.cell_exists(x, y) {
                return Err(MazeError::OutOfBounds {
                    x,
                    y,
                    width: self.width(),
                    height: self.height(),
                });
            }
        }

        let width = self.width();
        let index = |(x, y): (i32, i32)| y as usize * width + x as usize;
        let mut previous: Vec<Option<(i32, i32)>> = vec![None; width * self.height()];
        let mut seen = vec![false; width * self.height()];
        seen[index(start)] = true;

        let mut queue = VecDeque::from([start]);
        while let Some(cell) = queue.pop_front() {
            if cell == end {
                break;
            }
            for d in Direction::ALL {
                if self.wall_present(cell.0, cell.1, d) {
                    continue;
                }
                let next = d.new_position(cell.0, cell.1);
                if !self.cell_exists(next.0, next.1) || seen[index(next)] {
                    continue;
                }
                seen[index(next)] = true;
                previous[index(next)] = Some(cell);
                queue.push_back(next);
            }
        }

        if !seen[index(end)] {
            return Err(MazeError::Unreachable { from: start, to: end });
        }

        let mut path = vec![end];
        let mut current = end;
        while let Some(prev) = previous[index(current)] {
            path.push(prev);
            current = prev;
        }
        path.reverse();
        debug!("Route {:?} -> {:?}: {} move(s)", start, end, path.len() - 1);
        Ok(path)
    }
}
