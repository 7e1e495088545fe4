//! Configuration du labyrinthe et de l'explorateur, chargée depuis du JSON.
//!
//! Tous les champs ont une valeur par défaut : un fichier partiel (voire `{}`)
//! est valide.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::direction::Direction;
use crate::error::{MazeError, Result};

/// Configuration complète d'une exploration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub maze: MazeConfig,

    #[serde(default)]
    pub explorer: ExplorerConfig,
}

impl Config {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<()> {
        self.maze.validate()?;
        self.explorer.validate()
    }
}

/// Mur connu à l'avance, appliqué avant l'exploration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticWall {
    pub x: i32,
    pub y: i32,
    pub wall: Direction,
    pub present: bool,
}

/// Dimensions du labyrinthe et données statiques.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MazeConfig {
    #[serde(default = "default_side")]
    pub width: usize,

    #[serde(default = "default_side")]
    pub height: usize,

    /// Cellule de départ (entrée).
    #[serde(default = "default_start")]
    pub start: (i32, i32),

    /// Cellule d'arrivée (sortie).
    #[serde(default = "default_goal")]
    pub goal: (i32, i32),

    /// Le pourtour est toujours fermé : on le marque connu dès le départ.
    #[serde(default = "default_true")]
    pub known_perimeter: bool,

    #[serde(default = "default_static_walls")]
    pub static_walls: Vec<StaticWall>,
}

fn default_side() -> usize {
    8
}

fn default_start() -> (i32, i32) {
    (4, 0)
}

fn default_goal() -> (i32, i32) {
    (3, 7)
}

fn default_true() -> bool {
    true
}

/// L'entrée est fermée au sud et la sortie au nord.
fn default_static_walls() -> Vec<StaticWall> {
    let (sx, sy) = default_start();
    let (gx, gy) = default_goal();
    vec![
        StaticWall {
            x: sx,
            y: sy,
            wall: Direction::South,
            present: true,
        },
        StaticWall {
            x: gx,
            y: gy,
            wall: Direction::North,
            present: true,
        },
    ]
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            width: default_side(),
            height: default_side(),
            start: default_start(),
            goal: default_goal(),
            known_perimeter: true,
            static_walls: default_static_walls(),
        }
    }
}

impl MazeConfig {
    /// Une grille sans données statiques autres que le pourtour.
    pub fn with_size(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            start: (0, 0),
            goal: (width as i32 - 1, height as i32 - 1),
            known_perimeter: true,
            static_walls: Vec::new(),
        }
    }

    fn contains(&self, (x, y): (i32, i32)) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(MazeError::Config(format!(
                "maze dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        for (name, cell) in [("start", self.start), ("goal", self.goal)] {
            if !self.contains(cell) {
                return Err(MazeError::Config(format!(
                    "{} cell {:?} is outside the {}x{} maze",
                    name, cell, self.width, self.height
                )));
            }
        }
        Ok(())
    }
}

/// Paramètres physiques et comportement de l'explorateur.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExplorerConfig {
    /// Côté d'une cellule en mm.
    #[serde(default = "default_cell_length")]
    pub cell_length_mm: f64,

    /// Décalage ajouté à la position du robot avant division par la taille de cellule.
    #[serde(default = "default_origin_offset")]
    pub origin_offset_mm: f64,

    /// Seuil de détection d'un mur vu de face.
    #[serde(default = "default_long_tolerance")]
    pub long_tolerance_mm: f64,

    /// Seuil de détection d'un mur vu en biais (lecture moins fiable).
    #[serde(default = "default_short_tolerance")]
    pub short_tolerance_mm: f64,

    /// Angle du demi-tour partiel utilisé pour les lectures en biais.
    #[serde(default = "default_short_turn_offset")]
    pub short_turn_offset_deg: f64,

    /// Passages fictifs enregistrés sur un mur ouvert par déduction.
    #[serde(default = "default_forced_visits")]
    pub forced_visits: u32,

    /// Exploite les lectures longues pour ouvrir les murs suivants dans l'axe.
    #[serde(default)]
    pub lookahead: bool,

    /// Utilise les marques au sol (départ / arrivée) pour fermer les murs d'entrée et de sortie.
    #[serde(default)]
    pub use_floor_markers: bool,

    #[serde(default = "default_max_steps")]
    pub max_steps: usize,
}

fn default_cell_length() -> f64 {
    250.0
}

fn default_origin_offset() -> f64 {
    1000.0
}

fn default_long_tolerance() -> f64 {
    150.0
}

fn default_short_tolerance() -> f64 {
    100.0
}

fn default_short_turn_offset() -> f64 {
    30.0
}

fn default_forced_visits() -> u32 {
    2
}

fn default_max_steps() -> usize {
    10_000
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            cell_length_mm: default_cell_length(),
            origin_offset_mm: default_origin_offset(),
            long_tolerance_mm: default_long_tolerance(),
            short_tolerance_mm: default_short_tolerance(),
            short_turn_offset_deg: default_short_turn_offset(),
            forced_visits: default_forced_visits(),
            lookahead: false,
            use_floor_markers: false,
            max_steps: default_max_steps(),
        }
    }
}

impl ExplorerConfig {
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("cell length", self.cell_length_mm),
            ("long tolerance", self.long_tolerance_mm),
            ("short tolerance", self.short_tolerance_mm),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(MazeError::Config(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }
        if !self.origin_offset_mm.is_finite() {
            return Err(MazeError::Config(format!(
                "origin offset must be finite, got {}",
                self.origin_offset_mm
            )));
        }
        if self.short_tolerance_mm > self.long_tolerance_mm {
            return Err(MazeError::Config(format!(
                "short tolerance {} exceeds long tolerance {}",
                self.short_tolerance_mm, self.long_tolerance_mm
            )));
        }
        if !(0.0..45.0).contains(&self.short_turn_offset_deg) {
            return Err(MazeError::Config(format!(
                "short turn offset must stay inside the wall sector, got {}",
                self.short_turn_offset_deg
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.maze.width, 8);
        assert_eq!(config.maze.start, (4, 0));
        assert_eq!(config.maze.goal, (3, 7));
        assert_eq!(config.maze.static_walls.len(), 2);
        assert_eq!(config.explorer.cell_length_mm, 250.0);
        assert_eq!(config.explorer.forced_visits, 2);
        assert!(!config.explorer.lookahead);
    }

    #[test]
    fn test_empty_json_gives_defaults() {
        let config = Config::from_json_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_json() {
        let json = r#"{
            "maze": { "width": 4, "height": 3, "start": [0, 0], "goal": [3, 2] },
            "explorer": { "lookahead": true, "max_steps": 50 }
        }"#;
        let config = Config::from_json_str(json).unwrap();
        assert_eq!(config.maze.width, 4);
        assert_eq!(config.maze.height, 3);
        assert!(config.maze.known_perimeter);
        assert!(config.explorer.lookahead);
        assert_eq!(config.explorer.max_steps, 50);
        assert_eq!(config.explorer.long_tolerance_mm, 150.0);
    }

    #[test]
    fn test_static_wall_json() {
        let json = r#"{ "maze": { "static_walls": [ { "x": 1, "y": 2, "wall": "East", "present": false } ] } }"#;
        let config = Config::from_json_str(json).unwrap();
        assert_eq!(
            config.maze.static_walls,
            vec![StaticWall {
                x: 1,
                y: 2,
                wall: Direction::East,
                present: false
            }]
        );
    }

    #[test]
    fn test_invalid_dimensions() {
        let err = Config::from_json_str(r#"{ "maze": { "width": 0 } }"#).unwrap_err();
        assert!(matches!(err, MazeError::Config(_)));
    }

    #[test]
    fn test_goal_outside_maze() {
        let json = r#"{ "maze": { "width": 2, "height": 2, "start": [0, 0], "goal": [3, 7] } }"#;
        assert!(matches!(Config::from_json_str(json), Err(MazeError::Config(_))));
    }

    #[test]
    fn test_non_finite_lengths_are_rejected() {
        let cases = [
            ExplorerConfig {
                cell_length_mm: f64::NAN,
                ..ExplorerConfig::default()
            },
            ExplorerConfig {
                cell_length_mm: -250.0,
                ..ExplorerConfig::default()
            },
            ExplorerConfig {
                long_tolerance_mm: f64::NAN,
                ..ExplorerConfig::default()
            },
            ExplorerConfig {
                short_tolerance_mm: f64::INFINITY,
                ..ExplorerConfig::default()
            },
            ExplorerConfig {
                origin_offset_mm: f64::NAN,
                ..ExplorerConfig::default()
            },
        ];
        for config in cases {
            assert!(matches!(config.validate(), Err(MazeError::Config(_))), "{:?}", config);
        }
        assert!(ExplorerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(Config::from_json_str("{ nope"), Err(MazeError::Json(_))));
    }
}
