//! Déduction des murs non observés.
//!
//! Toute cellule du labyrinthe est atteignable : une cellule entourée de trois
//! côtés fermés doit donc être ouverte sur le quatrième. Un côté ouvert par
//! déduction compte lui aussi comme fermé, car la zone derrière lui n'a pas
//! d'autre issue que ce passage.

use log::debug;

use crate::direction::Direction;
use crate::maze::Maze;

/// Passages fictifs par défaut sur un mur déduit.
pub const DEFAULT_FORCED_VISITS: u32 = 2;

impl Maze {
    /// Ouvre le 4e côté d'une cellule dont exactement 3 côtés sont fermés.
    ///
    /// Retourne le nombre de murs modifiés (0 ou 1).
    pub fn extrapolate_edges(&mut self, x: i32, y: i32, synthetic_visits: u32) -> usize {
        if !self.cell_exists(x, y) || self.cell_fully_known(x, y) {
            return 0;
        }
        let closed = Direction::ALL.map(|d| {
            (self.wall_known(x, y, d) && self.wall_present(x, y, d)) || self.is_forced(x, y, d)
        });
        if closed.iter().filter(|&&c| c).count() != 3 {
            return 0;
        }
        let Some(open) = Direction::ALL.into_iter().find(|d| !closed[d.index()]) else {
            return 0;
        };
        self.force_wall(x, y, open, synthetic_visits);
        1
    }

    /// Un passage complet sur toutes les cellules ; retourne le nombre de murs déduits.
    pub fn fix_known_corners(&mut self, synthetic_visits: u32) -> usize {
        let mut changed = 0;
        for y in 0..self.height() as i32 {
            for x in 0..self.width() as i32 {
                changed += self.extrapolate_edges(x, y, synthetic_visits);
            }
        }
        changed
    }

    /// Répète les passages jusqu'à ce qu'aucun mur ne change.
    ///
    /// Retourne le nombre total de murs déduits.
    pub fn settle(&mut self, synthetic_visits: u32) -> usize {
        let mut total = 0;
        let mut sweeps = 0;
        loop {
            let changed = self.fix_known_corners(synthetic_visits);
            sweeps += 1;
            if changed == 0 {
                break;
            }
            total += changed;
        }
        if total > 0 {
            debug!("Inferred {} wall(s) in {} sweep(s)", total, sweeps);
        }
        total
    }
}
