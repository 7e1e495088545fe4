use serde::{Deserialize, Serialize};

/// Représente une des quatre directions absolues de la grille.
///
/// L'ordre des variantes est celui du cycle horaire : l'index d'une direction
/// sert directement d'index dans les tableaux par côté des sommets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Les quatre directions, dans l'ordre d'expansion (N, E, S, O).
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 4]
    }

    /// Tourne à gauche (par ex. North -> West)
    pub fn turn_left(self) -> Self {
        Self::from_index(self.index() + 3)
    }

    /// Tourne à droite (par ex. North -> East)
    pub fn turn_right(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Fait demi tour (par ex. North -> South)
    pub fn turn_back(self) -> Self {
        Self::from_index(self.index() + 2)
    }

    /// Décalage (dx, dy) vers la cellule voisine. Le nord est vers les y croissants.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, 1),
            Direction::East => (1, 0),
            Direction::South => (0, -1),
            Direction::West => (-1, 0),
        }
    }

    /// Nouvelle position après un déplacement d'une cellule dans cette direction.
    pub fn new_position(self, x: i32, y: i32) -> (i32, i32) {
        let (dx, dy) = self.offset();
        (x + dx, y + dy)
    }

    /// Cap en degrés (boussole : 0 = nord, 90 = est).
    pub fn heading(self) -> f64 {
        90.0 * self.index() as f64
    }

    /// Convertit un cap en direction par secteurs de 90° centrés sur N/E/S/O.
    ///
    /// Le nord couvre `[315, 360) ∪ [0, 45)`.
    pub fn from_heading(degrees: f64) -> Self {
        let heading = normalize_heading(degrees);
        if heading >= 315.0 || heading < 45.0 {
            Direction::North
        } else if heading < 135.0 {
            Direction::East
        } else if heading < 225.0 {
            Direction::South
        } else {
            Direction::West
        }
    }
}

/// Ramène un angle quelconque dans `[0, 360)`.
pub fn normalize_heading(degrees: f64) -> f64 {
    let heading = degrees.rem_euclid(360.0);
    // rem_euclid peut rendre 360.0 pour de très petites valeurs négatives
    if heading >= 360.0 {
        0.0
    } else {
        heading
    }
}

/// Écart signé le plus court pour passer de `from` à `to`, dans `(-180, 180]`.
pub fn signed_delta(from: f64, to: f64) -> f64 {
    let delta = normalize_heading(to - from);
    if delta > 180.0 {
        delta - 360.0
    } else {
        delta
    }
}
