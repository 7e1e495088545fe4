//! Labyrinthe de référence (vérité terrain) pour la simulation et les tests.

use std::collections::VecDeque;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::direction::Direction;

/// Murs réels d'un labyrinthe rectangulaire. Le pourtour est toujours fermé.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazeLayout {
    width: usize,
    height: usize,
    /// Passages ouverts de chaque cellule, indexés par direction.
    open: Vec<[bool; 4]>,
}

impl MazeLayout {
    /// Labyrinthe où toutes les cellules sont fermées.
    pub fn closed(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            open: vec![[false; 4]; width * height],
        }
    }

    /// Génère un labyrinthe parfait (un seul chemin entre deux cellules).
    ///
    /// Parcours en profondeur avec retour arrière, à partir de (0, 0).
    pub fn generate<R: Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> Self {
        let mut layout = Self::closed(width, height);
        if width == 0 || height == 0 {
            return layout;
        }
        let mut visited = vec![false; width * height];
        let mut stack = vec![(0i32, 0i32)];
        visited[0] = true;

        while let Some(&(x, y)) = stack.last() {
            let mut candidates: Vec<Direction> = Direction::ALL
                .into_iter()
                .filter(|d| {
                    let (nx, ny) = d.new_position(x, y);
                    layout.index(nx, ny).is_some_and(|i| !visited[i])
                })
                .collect();
            if candidates.is_empty() {
                stack.pop();
                continue;
            }
            candidates.shuffle(rng);
            let direction = candidates[0];
            let (nx, ny) = direction.new_position(x, y);
            layout.open_wall(x, y, direction);
            if let Some(i) = layout.index(nx, ny) {
                visited[i] = true;
            }
            stack.push((nx, ny));
        }
        layout
    }

    /// Ouvre jusqu'à `extra` murs internes supplémentaires pour créer des boucles.
    ///
    /// Retourne le nombre de murs réellement ouverts.
    pub fn braid<R: Rng + ?Sized>(&mut self, extra: usize, rng: &mut R) -> usize {
        let mut closed: Vec<((i32, i32), Direction)> = self
            .cells()
            .flat_map(|(x, y)| {
                [Direction::North, Direction::East]
                    .into_iter()
                    .map(move |d| ((x, y), d))
            })
            .filter(|&((x, y), d)| {
                let (nx, ny) = d.new_position(x, y);
                self.index(nx, ny).is_some() && !self.is_open(x, y, d)
            })
            .collect();
        closed.shuffle(rng);
        let opened = extra.min(closed.len());
        for &((x, y), d) in closed.iter().take(opened) {
            self.open_wall(x, y, d);
        }
        opened
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            None
        } else {
            Some(y as usize * self.width + x as usize)
        }
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some()
    }

    /// Toutes les coordonnées de cellules, ligne par ligne.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> {
        let (width, height) = (self.width as i32, self.height as i32);
        (0..height).flat_map(move |y| (0..width).map(move |x| (x, y)))
    }

    /// Ouvre le mur entre `(x, y)` et sa voisine. Sans effet vers l'extérieur.
    pub fn open_wall(&mut self, x: i32, y: i32, direction: Direction) {
        let (nx, ny) = direction.new_position(x, y);
        let (Some(here), Some(there)) = (self.index(x, y), self.index(nx, ny)) else {
            return;
        };
        self.open[here][direction.index()] = true;
        self.open[there][direction.turn_back().index()] = true;
    }

    pub fn is_open(&self, x: i32, y: i32, direction: Direction) -> bool {
        self.index(x, y)
            .is_some_and(|i| self.open[i][direction.index()])
    }

    /// Nombre de murs internes ouverts.
    pub fn open_walls(&self) -> usize {
        self.open.iter().flatten().filter(|&&o| o).count() / 2
    }

    /// Distance (en déplacements) du plus court chemin, par BFS sur la vérité terrain.
    pub fn shortest_distance(&self, from: (i32, i32), to: (i32, i32)) -> Option<usize> {
        let start = self.index(from.0, from.1)?;
        self.index(to.0, to.1)?;
        let mut distance = vec![None; self.width * self.height];
        distance[start] = Some(0);
        let mut queue = VecDeque::from([from]);
        while let Some((x, y)) = queue.pop_front() {
            let here = distance[self.index(x, y)?]?;
            if (x, y) == to {
                return Some(here);
            }
            for d in Direction::ALL {
                if !self.is_open(x, y, d) {
                    continue;
                }
                let (nx, ny) = d.new_position(x, y);
                if let Some(i) = self.index(nx, ny) {
                    if distance[i].is_none() {
                        distance[i] = Some(here + 1);
                        queue.push_back((nx, ny));
                    }
                }
            }
        }
        None
    }
}
