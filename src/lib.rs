//! Cartographie et résolution d'un labyrinthe par un robot.
//!
//! Le robot découvre les murs un à un ; la carte ([`Maze`]) garde les murs
//! partagés cohérents entre cellules voisines, déduit les murs manquants et,
//! une fois complète, fournit le plus court chemin entre deux cellules.

pub mod ascii;
pub mod cell;
pub mod config;
pub mod direction;
pub mod error;
pub mod explorer;
pub mod inference;
pub mod layout;
pub mod maze;
pub mod pathfind;
pub mod robot;
pub mod simulator;
pub mod snapshot;
pub mod topology;
pub mod wall;

pub use config::{Config, ExplorerConfig, MazeConfig, StaticWall};
pub use direction::Direction;
pub use error::{MazeError, Result};
pub use explorer::{ExplorationReport, Explorer, Step};
pub use layout::MazeLayout;
pub use maze::Maze;
pub use robot::{FloorMarker, Robot, TurnDirection};
pub use simulator::SimulatedRobot;
pub use snapshot::MazeSnapshot;
pub use wall::{Wall, Walls};

/// Marque utilisée pour tracer le chemin sur la carte ASCII.
pub const PATH_MARK: char = '•';
