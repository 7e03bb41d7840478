//! Command-line driver for robot mazes.
//!
//! Examples:
//!   robot-maze-cli new 10 0.3
//!   robot-maze-cli verify 10-30-12345
//!   robot-maze-cli run 5-0-7 move move "turn left" sense:ahead
//!   robot-maze-cli snapshot 5-0-7 move
//!
//! Pass `--config file.json` before the command to override `MazeConfig`.

use std::process;

use robot_maze::prelude::*;
use tracing::{info, warn};

fn usage() -> ! {
    eprintln!("robot-maze-cli (reproducible robot mazes)");
    eprintln!("Usage: robot-maze-cli [--config file.json] <command> [args]\n");
    eprintln!("Commands:");
    eprintln!("  new [size] [wall_probability]   Generate a fresh maze and print its id");
    eprintln!("  verify <id>                     Check that <id> rebuilds the same layout");
    eprintln!("  run <id> <command>...           Execute commands and print outcomes");
    eprintln!("  snapshot <id> [command]...      Execute commands and print the JSON snapshot");
    eprintln!();
    eprintln!("Robot commands (whitespace or ':' separated):");
    eprintln!("  move | reset");
    eprintln!("  sense <ahead|behind|left|right>");
    eprintln!("  turn <ahead|behind|left|right>");
    eprintln!("  heading <north|east|south|west>");
    process::exit(1);
}

fn parse_args() -> (MazeConfig, Vec<String>) {
    let mut args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        usage();
    }

    let mut config = MazeConfig::default();
    if args.len() >= 2 && args[0] == "--config" {
        config = MazeConfig::load(&args[1]).unwrap_or_else(|e| {
            eprintln!("{e}");
            process::exit(1);
        });
        args.drain(0..2);
    }

    if args.is_empty() {
        usage();
    }

    (config, args)
}

fn print_state(maze: &RobotMaze) {
    let p = maze.position();
    let t = maze.target();
    println!(
        "id={} run={} pos=({},{}) heading={} target=({},{}) steps={} fuel={} status={:?} at_target={}",
        maze.maze_id(),
        maze.run_count(),
        p.x,
        p.y,
        maze.heading(),
        t.x,
        t.y,
        maze.step_count(),
        maze.remaining_fuel(),
        maze.status(),
        maze.at_target(),
    );
}

fn print_console(maze: &RobotMaze) {
    if maze.console().is_empty() {
        return;
    }
    println!("console:");
    for line in maze.console().lines() {
        println!("  {line}");
    }
}

fn run_commands(maze: &mut RobotMaze, commands: &[String], echo: bool) -> Result<(), MazeError> {
    for raw in commands {
        let command: Command = raw.parse()?;
        let response = maze.execute(command);
        if echo {
            let shown = command.to_string();
            println!("{shown:<16} -> {response}");
        }
    }
    Ok(())
}

fn main() {
    // Logs go to stderr so `snapshot` output stays valid JSON.
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let (config, args) = parse_args();
    let cmd = &args[0];

    let make_error = |e: MazeError| -> ! {
        eprintln!("{e}");
        process::exit(1);
    };

    match cmd.as_str() {
        "new" => {
            let mut config = config;
            if let Some(size) = args.get(1) {
                config.size = size
                    .parse()
                    .unwrap_or_else(|_| make_error(MazeError::InvalidConfig("size must be a number")));
            }
            if let Some(p) = args.get(2) {
                config.wall_probability = p.parse().unwrap_or_else(|_| {
                    make_error(MazeError::InvalidConfig(
                        "wall_probability must be a number in [0, 1]",
                    ))
                });
            }
            let maze = RobotMaze::new(config).unwrap_or_else(|e| make_error(e));
            info!(id = %maze.maze_id(), "generated maze");
            println!("{}", maze.maze_id());
            print_state(&maze);
        }
        "verify" => {
            let Some(id) = args.get(1) else { usage() };
            let same = verify_reproducibility(id, &config).unwrap_or_else(|e| make_error(e));
            if same {
                println!("SUCCESS: mazes with id '{id}' are identical");
            } else {
                warn!(%id, "reproducibility check failed");
                println!("FAIL: mazes with id '{id}' differ");
                process::exit(1);
            }
        }
        "run" => {
            let Some(id) = args.get(1) else { usage() };
            let mut maze = RobotMaze::from_id(id, config).unwrap_or_else(|e| make_error(e));
            run_commands(&mut maze, &args[2..], true).unwrap_or_else(|e| make_error(e));
            print_state(&maze);
            print_console(&maze);
        }
        "snapshot" => {
            let Some(id) = args.get(1) else { usage() };
            let mut maze = RobotMaze::from_id(id, config).unwrap_or_else(|e| make_error(e));
            run_commands(&mut maze, &args[2..], false).unwrap_or_else(|e| make_error(e));
            let json = maze
                .snapshot()
                .to_json()
                .unwrap_or_else(|e| make_error(MazeError::Json(e)));
            println!("{json}");
        }
        "help" | "--help" | "-h" => usage(),
        other => {
            eprintln!("Unknown command: {other}");
            usage();
        }
    }
}
