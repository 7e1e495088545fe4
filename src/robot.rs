//! Interface entre l'explorateur et le robot (réel ou simulé).

use serde::{Deserialize, Serialize};

use crate::direction::signed_delta;
use crate::error::Result;

/// Sens de rotation sur place. Le cap suit la boussole : `Right` l'augmente.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnDirection {
    Left,
    Right,
}

/// Marque peinte au sol, lue par le capteur orienté vers le bas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FloorMarker {
    Start,
    Goal,
}

/// Capacités de déplacement et de mesure dont l'explorateur a besoin.
///
/// Tous les appels sont bloquants : ils ne rendent la main qu'une fois le
/// mouvement terminé ou la mesure disponible.
///
/// # Example
///
/// ```ignore
/// struct Drivetrain { /* moteurs, capteurs */ }
///
/// impl Robot for Drivetrain {
///     fn drive_one_cell(&mut self, forward: bool) -> Result<()> {
///         self.drive_for(if forward { 250.0 } else { -250.0 })
///     }
///     fn turn_by(&mut self, degrees: f64, direction: TurnDirection) -> Result<()> { /* ... */ }
///     fn current_heading(&self) -> f64 { self.gyro.heading() }
///     fn current_position(&self) -> (f64, f64) { self.odometry.position() }
///     fn front_distance(&mut self) -> f64 { self.front_eye.distance_mm() }
/// }
/// ```
pub trait Robot {
    /// Avance (ou recule) d'exactement une cellule dans l'axe du robot.
    fn drive_one_cell(&mut self, forward: bool) -> Result<()>;

    /// Tourne sur place de `degrees` (valeur positive) dans le sens donné.
    fn turn_by(&mut self, degrees: f64, direction: TurnDirection) -> Result<()>;

    /// Tourne par le plus court chemin jusqu'au cap absolu donné.
    fn turn_to_heading(&mut self, degrees: f64) -> Result<()> {
        let delta = signed_delta(self.current_heading(), degrees);
        if delta == 0.0 {
            Ok(())
        } else if delta > 0.0 {
            self.turn_by(delta, TurnDirection::Right)
        } else {
            self.turn_by(-delta, TurnDirection::Left)
        }
    }

    /// Cap courant dans `[0, 360)`.
    fn current_heading(&self) -> f64;

    /// Position en mm dans le repère de l'odométrie.
    fn current_position(&self) -> (f64, f64);

    /// Distance mesurée par le capteur frontal, en mm.
    fn front_distance(&mut self) -> f64;

    /// Marque au sol sous le robot, si le robot sait en lire.
    fn floor_marker(&self) -> Option<FloorMarker> {
        None
    }
}
