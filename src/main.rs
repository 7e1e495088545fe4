//! Explore un labyrinthe généré aléatoirement avec le robot simulé, puis
//! affiche la carte obtenue et le plus court chemin de l'entrée à la sortie.
//!
//! Usage:
//!   cargo run -- --seed 42 --braid 6
//!   RUST_LOG=debug cargo run -- --config maze.json --json

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use tremaux_maze::ascii::{render_path, render_plain};
use tremaux_maze::{Config, Explorer, Maze, MazeLayout, SimulatedRobot, PATH_MARK};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Fichier de configuration JSON (valeurs par défaut sinon)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Graine du générateur de labyrinthe (aléatoire si absente)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Nombre de murs internes supplémentaires à ouvrir (boucles)
    #[arg(short, long, default_value = "0")]
    braid: usize,

    /// Cap initial du robot, en degrés (0 = nord)
    #[arg(long, default_value = "0")]
    heading: f64,

    /// Affiche la carte finale en JSON
    #[arg(long)]
    json: bool,
}

fn run(args: Args) -> tremaux_maze::Result<()> {
    let config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    config.validate()?;

    let seed = args.seed.unwrap_or_else(|| rand::rng().random());
    info!("Generating {}x{} maze with seed {}", config.maze.width, config.maze.height, seed);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut layout = MazeLayout::generate(config.maze.width, config.maze.height, &mut rng);
    let loops = layout.braid(args.braid, &mut rng);
    if loops > 0 {
        info!("Opened {} extra wall(s)", loops);
    }

    let maze = Maze::from_config(&config.maze)?;
    let robot = SimulatedRobot::new(layout, config.maze.start, args.heading)
        .with_config(&config.explorer)
        .with_markers(config.maze.start, config.maze.goal);
    let mut explorer = Explorer::new(maze, robot, config.explorer.clone());
    let report = explorer.explore()?;

    let (maze, robot) = explorer.into_parts();
    let snapshot = maze.snapshot();
    println!("{}", render_plain(&snapshot));

    let route = maze.pathfind(config.maze.start, config.maze.goal)?;
    println!("{}", render_path(&snapshot, &route, PATH_MARK));

    let odometer = robot.odometer();
    println!("Seed:           {}", seed);
    println!("Steps:          {}", report.steps);
    println!("Cells visited:  {}/{}", report.visited_cells, maze.width() * maze.height());
    println!("Walls inferred: {}", report.forced_walls);
    println!("Turns:          {} ({:.0}°)", odometer.turns, odometer.degrees_turned);
    println!("Route length:   {} move(s)", route.len() - 1);

    if args.json {
        println!("{}", snapshot.to_json()?);
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
