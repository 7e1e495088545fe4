//! Robot simulé qui se déplace dans un [`MazeLayout`].
//!
//! Les mesures sont exactes : le capteur frontal rend la distance jusqu'au
//! premier mur présent dans le secteur visé, allongée selon l'écart angulaire
//! au cap du mur.

use log::trace;
use serde::{Deserialize, Serialize};

use crate::config::ExplorerConfig;
use crate::direction::{normalize_heading, signed_delta, Direction};
use crate::error::{MazeError, Result};
use crate::layout::MazeLayout;
use crate::robot::{FloorMarker, Robot, TurnDirection};

/// Distance entre le capteur frontal et le centre du robot, en mm.
pub const SENSOR_OFFSET_MM: f64 = 50.0;

/// Compteurs de mouvements du robot simulé.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Odometer {
    pub cells_driven: usize,
    pub turns: usize,
    pub degrees_turned: f64,
}

#[derive(Debug, Clone)]
pub struct SimulatedRobot {
    layout: MazeLayout,
    cell: (i32, i32),
    heading: f64,
    cell_length: f64,
    origin_offset: f64,
    start_marker: Option<(i32, i32)>,
    goal_marker: Option<(i32, i32)>,
    odometer: Odometer,
}

impl SimulatedRobot {
    /// Place le robot au centre de `cell`, orienté selon `heading`.
    pub fn new(layout: MazeLayout, cell: (i32, i32), heading: f64) -> Self {
        let defaults = ExplorerConfig::default();
        Self {
            layout,
            cell,
            heading: normalize_heading(heading),
            cell_length: defaults.cell_length_mm,
            origin_offset: defaults.origin_offset_mm,
            start_marker: None,
            goal_marker: None,
            odometer: Odometer::default(),
        }
    }

    /// Reprend les dimensions physiques de la configuration de l'explorateur.
    pub fn with_config(mut self, config: &ExplorerConfig) -> Self {
        self.cell_length = config.cell_length_mm;
        self.origin_offset = config.origin_offset_mm;
        self
    }

    /// Peint les marques de départ et d'arrivée au sol.
    pub fn with_markers(mut self, start: (i32, i32), goal: (i32, i32)) -> Self {
        self.start_marker = Some(start);
        self.goal_marker = Some(goal);
        self
    }

    pub fn layout(&self) -> &MazeLayout {
        &self.layout
    }

    pub fn cell(&self) -> (i32, i32) {
        self.cell
    }

    pub fn odometer(&self) -> Odometer {
        self.odometer
    }

    /// Nombre de murs ouverts consécutifs devant le robot dans la direction donnée.
    fn open_run(&self, direction: Direction) -> usize {
        let (mut x, mut y) = self.cell;
        let mut run = 0;
        while self.layout.is_open(x, y, direction) {
            run += 1;
            (x, y) = direction.new_position(x, y);
        }
        run
    }
}

impl Robot for SimulatedRobot {
    fn drive_one_cell(&mut self, forward: bool) -> Result<()> {
        let facing = Direction::from_heading(self.heading);
        let direction = if forward { facing } else { facing.turn_back() };
        let (x, y) = self.cell;
        if !self.layout.is_open(x, y, direction) {
            return Err(MazeError::Collision { x, y, wall: direction });
        }
        self.cell = direction.new_position(x, y);
        self.odometer.cells_driven += 1;
        trace!("simulated robot moved {:?} to {:?}", direction, self.cell);
        Ok(())
    }

    fn turn_by(&mut self, degrees: f64, direction: TurnDirection) -> Result<()> {
        let signed = match direction {
            TurnDirection::Right => degrees,
            TurnDirection::Left => -degrees,
        };
        self.heading = normalize_heading(self.heading + signed);
        self.odometer.turns += 1;
        self.odometer.degrees_turned += degrees.abs();
        Ok(())
    }

    fn current_heading(&self) -> f64 {
        self.heading
    }

    fn current_position(&self) -> (f64, f64) {
        let centre = |c: i32| (c as f64 + 0.5) * self.cell_length - self.origin_offset;
        (centre(self.cell.0), centre(self.cell.1))
    }

    fn front_distance(&mut self) -> f64 {
        let facing = Direction::from_heading(self.heading);
        let deviation = signed_delta(facing.heading(), self.heading).to_radians();
        let straight = self.cell_length / 2.0 - SENSOR_OFFSET_MM
            + self.open_run(facing) as f64 * self.cell_length;
        straight / deviation.cos()
    }

    fn floor_marker(&self) -> Option<FloorMarker> {
        if self.goal_marker == Some(self.cell) {
            Some(FloorMarker::Goal)
        } else if self.start_marker == Some(self.cell) {
            Some(FloorMarker::Start)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corridor() -> MazeLayout {
        let mut layout = MazeLayout::closed(4, 1);
        layout.open_wall(0, 0, Direction::East);
        layout.open_wall(1, 0, Direction::East);
        layout
    }

    #[test]
    fn test_position_maps_back_to_cell() {
        let robot = SimulatedRobot::new(corridor(), (2, 0), 0.0);
        let (x, y) = robot.current_position();
        assert_eq!(((x + 1000.0) / 250.0).floor() as i32, 2);
        assert_eq!(((y + 1000.0) / 250.0).floor() as i32, 0);
    }

    #[test]
    fn test_front_distance_counts_open_walls() {
        let mut robot = SimulatedRobot::new(corridor(), (0, 0), 90.0);
        assert_eq!(robot.front_distance(), 75.0 + 2.0 * 250.0);
        robot.turn_to_heading(0.0).unwrap();
        assert_eq!(robot.front_distance(), 75.0);
        robot.turn_to_heading(270.0).unwrap();
        assert_eq!(robot.front_distance(), 75.0);
    }

    #[test]
    fn test_oblique_reading_is_longer() {
        let mut robot = SimulatedRobot::new(corridor(), (3, 0), 30.0);
        let reading = robot.front_distance();
        assert!(reading > 75.0 && reading < 100.0, "reading {}", reading);
    }

    #[test]
    fn test_drive_and_collide() {
        let mut robot = SimulatedRobot::new(corridor(), (0, 0), 90.0);
        robot.drive_one_cell(true).unwrap();
        robot.drive_one_cell(true).unwrap();
        assert_eq!(robot.cell(), (2, 0));
        let err = robot.drive_one_cell(true).unwrap_err();
        assert!(matches!(
            err,
            MazeError::Collision {
                x: 2,
                y: 0,
                wall: Direction::East
            }
        ));
        robot.drive_one_cell(false).unwrap();
        assert_eq!(robot.cell(), (1, 0));
        assert_eq!(robot.odometer().cells_driven, 3);
    }

    #[test]
    fn test_turns_are_counted() {
        let mut robot = SimulatedRobot::new(corridor(), (0, 0), 0.0);
        robot.turn_to_heading(270.0).unwrap();
        robot.turn_to_heading(90.0).unwrap();
        let odometer = robot.odometer();
        assert_eq!(odometer.turns, 2);
        assert_eq!(odometer.degrees_turned, 270.0);
        assert_eq!(robot.current_heading(), 90.0);
    }

    #[test]
    fn test_floor_markers() {
        let mut robot = SimulatedRobot::new(corridor(), (0, 0), 90.0).with_markers((0, 0), (2, 0));
        assert_eq!(robot.floor_marker(), Some(FloorMarker::Start));
        robot.drive_one_cell(true).unwrap();
        assert_eq!(robot.floor_marker(), None);
        robot.drive_one_cell(true).unwrap();
        assert_eq!(robot.floor_marker(), Some(FloorMarker::Goal));
    }
}
