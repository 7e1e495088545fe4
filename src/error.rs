//! Types d'erreur de la crate.

use crate::direction::Direction;

/// Alias de résultat utilisé partout dans la crate.
pub type Result<T> = std::result::Result<T, MazeError>;

#[derive(Debug, thiserror::Error)]
pub enum MazeError {
    /// Coordonnées hors de la grille pour une opération qui ne peut pas les ignorer.
    #[error("cell ({x}, {y}) is outside the {width}x{height} maze")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },

    /// Aucun chemin par des murs confirmés ouverts.
    #[error("no known route from {from:?} to {to:?}")]
    Unreachable { from: (i32, i32), to: (i32, i32) },

    /// Jonction sans aucun passage : la carte contredit la connexité du labyrinthe.
    #[error("no passable wall around cell ({x}, {y})")]
    NoPassage { x: i32, y: i32 },

    /// Le robot a tenté de traverser un mur.
    #[error("robot drove into the {wall:?} wall of cell ({x}, {y})")]
    Collision { x: i32, y: i32, wall: Direction },

    #[error("exploration aborted after {0} steps")]
    StepLimit(usize),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MazeError::OutOfBounds {
            x: 9,
            y: -1,
            width: 8,
            height: 8,
        };
        assert_eq!(err.to_string(), "cell (9, -1) is outside the 8x8 maze");

        let err = MazeError::Collision {
            x: 1,
            y: 2,
            wall: Direction::West,
        };
        assert_eq!(err.to_string(), "robot drove into the West wall of cell (1, 2)");
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: MazeError = json_err.into();
        assert!(matches!(err, MazeError::Json(_)));
    }
}
