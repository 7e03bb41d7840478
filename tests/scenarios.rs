//! End-to-end runs against fixed maze identifiers.

use robot_maze::prelude::*;

fn open_5x5(max_steps: u32) -> RobotMaze {
    RobotMaze::from_id("5-0-7", MazeConfig::default().with_max_steps(max_steps)).unwrap()
}

#[test]
fn zero_wall_maze_is_open_and_solvable_by_hand() {
    let mut maze = open_5x5(1000);
    assert_eq!(maze.grid().wall_count(), 0);
    assert_eq!(maze.position(), Position::new(0, 0));
    assert_eq!(maze.heading(), Heading::South);

    for _ in 0..4 {
        assert!(maze.move_forward().is_success());
    }
    assert_eq!(maze.position(), Position::new(0, 4));
    assert!(!maze.at_target());

    maze.turn(Relative::Left);
    for _ in 0..4 {
        maze.move_forward();
    }
    assert_eq!(maze.position(), Position::new(4, 4));
    assert!(maze.at_target());
    assert_eq!(maze.step_count(), 9);
}

#[test]
fn nth_command_exhausts_fuel_and_next_is_a_no_op() {
    let n = 3;
    let mut maze = open_5x5(n);

    assert_eq!(maze.move_forward(), CommandOutcome::Moved);
    assert_eq!(maze.move_forward(), CommandOutcome::Moved);
    assert!(!maze.is_out_of_fuel());

    // The N-th call only does the bookkeeping.
    assert_eq!(maze.move_forward(), CommandOutcome::FuelExhausted);
    assert!(maze.is_out_of_fuel());
    assert_eq!(maze.position(), Position::new(0, 2));
    assert_eq!(maze.step_count(), n);

    assert_eq!(maze.move_forward(), CommandOutcome::OutOfFuel);
    assert_eq!(maze.position(), Position::new(0, 2));
    assert_eq!(maze.step_count(), n);
    assert!(maze.is_out_of_fuel());
}

#[test]
fn moving_into_the_boundary_costs_a_step() {
    let mut maze = open_5x5(1000);
    maze.set_heading(Heading::North);
    assert_eq!(maze.step_count(), 1);

    let outcome = maze.move_forward();
    assert_eq!(outcome, CommandOutcome::Blocked);
    assert!(!outcome.is_success());
    assert_eq!(maze.position(), Position::new(0, 0));
    assert_eq!(maze.step_count(), 2);
}

#[test]
fn both_origin_boundaries_block() {
    let mut maze = open_5x5(1000);
    for heading in [Heading::North, Heading::West] {
        maze.reset();
        maze.set_heading(heading);
        assert_eq!(maze.sense(Relative::Ahead), Cell::Wall);
        assert_eq!(maze.move_forward(), CommandOutcome::Blocked);
        assert_eq!(maze.position(), Position::new(0, 0));
        assert_eq!(maze.step_count(), 2);
        assert_eq!(
            maze.console().last(),
            Some("I tried to walk forward... ow that's a wall!")
        );
    }
}

#[test]
fn reset_restores_the_run_but_not_the_layout() {
    let mut maze = RobotMaze::from_id("10-30-12345", MazeConfig::default()).unwrap();
    let walls_before = maze.grid().wall_layout();

    // Wander: move when possible, otherwise turn right.
    for _ in 0..200 {
        if maze.sense(Relative::Ahead) == Cell::Wall {
            maze.turn(Relative::Right);
        } else {
            maze.move_forward();
        }
    }
    assert!(maze.step_count() > 0);
    let visited_before = maze
        .grid()
        .cells()
        .iter()
        .filter(|c| **c == Cell::Visited)
        .count();
    assert!(visited_before > 1);

    let runs = maze.run_count();
    maze.reset();

    assert_eq!(maze.position(), Position::new(0, 0));
    assert_eq!(maze.heading(), Heading::South);
    assert_eq!(maze.step_count(), 0);
    assert!(!maze.is_out_of_fuel());
    assert_eq!(maze.run_count(), runs + 1);
    assert_eq!(maze.grid().wall_layout(), walls_before);

    // Only the cell the robot stands on is marked.
    let visited: Vec<usize> = maze
        .grid()
        .cells()
        .iter()
        .enumerate()
        .filter(|(_, c)| **c == Cell::Visited)
        .map(|(i, _)| i)
        .collect();
    assert_eq!(visited, vec![0]);
}

#[test]
fn reset_after_exhaustion_refuels() {
    let mut maze = open_5x5(2);
    maze.move_forward();
    maze.move_forward();
    assert!(maze.is_out_of_fuel());

    maze.reset();
    assert!(!maze.is_out_of_fuel());
    assert_eq!(maze.remaining_fuel(), 2);
    assert_eq!(maze.move_forward(), CommandOutcome::Moved);
}

#[test]
fn same_identifier_builds_identical_mazes() {
    for id in ["10-30-12345", "6-40-99", "20-25-0", "15-35-4242"] {
        let a = RobotMaze::from_id(id, MazeConfig::default()).unwrap();
        let b = RobotMaze::from_id(id, MazeConfig::default()).unwrap();
        assert_eq!(a.grid(), b.grid(), "{id}");
        assert_eq!(a.maze_id(), id);
        assert!(verify_reproducibility(id, &MazeConfig::default()).unwrap());
    }
}

#[test]
fn parallel_construction_matches_sequential() {
    let ids: Vec<String> = (0..8).map(|s| format!("12-30-{s}")).collect();
    let expected: Vec<Vec<bool>> = ids
        .iter()
        .map(|id| {
            RobotMaze::from_id(id, MazeConfig::default())
                .unwrap()
                .grid()
                .wall_layout()
        })
        .collect();

    let handles: Vec<_> = ids
        .iter()
        .cloned()
        .map(|id| {
            std::thread::spawn(move || {
                RobotMaze::from_id(&id, MazeConfig::default())
                    .unwrap()
                    .grid()
                    .wall_layout()
            })
        })
        .collect();

    for (h, want) in handles.into_iter().zip(expected) {
        assert_eq!(h.join().unwrap(), want);
    }
}

#[test]
fn impossible_parameters_fail_cleanly() {
    let cfg = MazeConfig::default().with_max_attempts(5);
    let err = RobotMaze::from_id("4-100-1", cfg).unwrap_err();
    assert!(matches!(err, MazeError::GenerationFailure { attempts: 5, .. }));
    assert!(err.to_string().contains("5 attempts"));
}

#[test]
fn short_run_preset_uses_a_hundred_steps() {
    let mut maze = RobotMaze::from_id("5-0-7", MazeConfig::short_run()).unwrap();
    assert_eq!(maze.remaining_fuel(), 100);
    for _ in 0..99 {
        maze.turn(Relative::Right);
    }
    assert!(!maze.is_out_of_fuel());
    assert_eq!(maze.turn(Relative::Right), CommandOutcome::FuelExhausted);
    assert_eq!(
        maze.console().last(),
        Some("Search unsuccessful: Target not reached by 100 steps.")
    );
}

#[test]
fn oversized_identifiers_are_errors() {
    for id in ["4000000000-0-1", "2000-0-1"] {
        let err = RobotMaze::from_id(id, MazeConfig::default()).unwrap_err();
        assert!(matches!(err, MazeError::MalformedIdentifier { .. }), "{id}");
    }
    let err = RobotMaze::from_params(MazeParams::new(2000, 0, 1), MazeConfig::default()).unwrap_err();
    assert!(matches!(err, MazeError::InvalidConfig(_)));
}

#[test]
fn maze_id_matches_the_identifier_supplied() {
    let maze = RobotMaze::from_id("10-30-12345", MazeConfig::default()).unwrap();
    assert_eq!(maze.maze_id(), "10-30-12345");
    assert!(RobotMaze::from_id("010-30-12345", MazeConfig::default()).is_err());
}
