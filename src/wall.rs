use serde::{Deserialize, Serialize};

use crate::direction::Direction;

/// État connu d'un mur entre deux cellules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Wall {
    /// Jamais mesuré ni déduit.
    #[default]
    Undefined,
    /// Passage confirmé.
    Open,
    /// Mur confirmé.
    Wall,
}

impl Wall {
    pub fn is_known(self) -> bool {
        self != Wall::Undefined
    }

    pub fn from_presence(present: bool) -> Self {
        if present {
            Wall::Wall
        } else {
            Wall::Open
        }
    }
}

/// Ensemble des 4 murs d'une cellule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Walls {
    pub north: Wall,
    pub east: Wall,
    pub south: Wall,
    pub west: Wall,
}

impl Walls {
    pub fn get(&self, direction: Direction) -> Wall {
        match direction {
            Direction::North => self.north,
            Direction::East => self.east,
            Direction::South => self.south,
            Direction::West => self.west,
        }
    }

    pub fn set(&mut self, direction: Direction, wall: Wall) {
        match direction {
            Direction::North => self.north = wall,
            Direction::East => self.east = wall,
            Direction::South => self.south = wall,
            Direction::West => self.west = wall,
        }
    }

    pub fn is_fully_known(&self) -> bool {
        Direction::ALL.iter().all(|&d| self.get(d).is_known())
    }
}
