//! End-to-end play through hand-built corridors.

use laby_rs::{
    Cell, Command, Game, Maze, Phase,
    engine::Projection,
    renderer::{DrawCall, RendererExt, Software, WALL},
    sim::{FORWARD_STEPS, MoveKind, Pose, TURN_STEPS},
    world::Dir,
};

fn corridor(width: usize, height: usize) -> Maze {
    let mut maze = Maze::new(width, height).unwrap();
    for x in 0..width - 1 {
        maze.crunch(Cell::new(x, 0), Dir::East);
    }
    // hang the remaining rows off the last column
    for y in 0..height - 1 {
        maze.crunch(Cell::new(width - 1, y), Dir::South);
    }
    for y in 1..height {
        for x in 0..width - 1 {
            maze.crunch(Cell::new(x, y), Dir::East);
        }
    }
    maze
}

fn play(game: &mut Game, cmd: Command, ticks: u32) {
    assert!(game.issue_command(cmd), "{cmd:?} refused");
    for _ in 0..ticks {
        game.tick();
    }
}

#[test]
fn first_steps_along_the_top_row() {
    let mut game = Game::with_maze(corridor(3, 3));
    assert!(game.issue_command(Command::Forward));

    let Phase::Animating(mv) = game.phase() else {
        panic!("expected a move");
    };
    assert_eq!(mv.kind(), MoveKind::Forward { to: Cell::new(1, 0) });
    assert_eq!(mv.from(), Pose::new(0.0, 0.0, 0.0));
    assert_eq!(mv.to(), Pose::new(1.0, 0.0, 0.0));

    for _ in 0..FORWARD_STEPS {
        game.tick();
    }
    assert!(game.is_idle());
    assert_eq!(game.pawn().cell, Cell::new(1, 0));

    play(&mut game, Command::Forward, FORWARD_STEPS);
    assert_eq!(game.pawn().cell, Cell::new(2, 0));
    assert!(!game.is_solved());
}

#[test]
fn exit_at_the_end_of_a_straight_corridor() {
    let mut game = Game::with_maze(corridor(3, 1));
    assert_eq!(game.pawn().exit, Cell::new(2, 0));

    play(&mut game, Command::Forward, FORWARD_STEPS);
    assert!(game.is_idle());
    assert!(game.issue_command(Command::Forward));
    for _ in 0..FORWARD_STEPS - 1 {
        game.tick();
        assert!(!game.is_solved());
    }
    game.tick();
    assert!(game.is_solved());
}

#[test]
fn winding_route_to_the_far_corner() {
    let mut game = Game::with_maze(corridor(3, 3));
    play(&mut game, Command::Forward, FORWARD_STEPS);
    play(&mut game, Command::Forward, FORWARD_STEPS);
    play(&mut game, Command::TurnRight, TURN_STEPS);
    play(&mut game, Command::Forward, FORWARD_STEPS);
    play(&mut game, Command::Forward, FORWARD_STEPS);
    assert!(game.is_solved());
    assert_eq!(game.pawn().cell, Cell::new(2, 2));
}

#[test]
fn strafing_keeps_the_heading() {
    let mut game = Game::with_maze(corridor(3, 2));
    play(&mut game, Command::Forward, FORWARD_STEPS);
    play(&mut game, Command::Forward, FORWARD_STEPS);
    // facing east at (2, 0); right is south
    play(&mut game, Command::StrafeRight, FORWARD_STEPS);
    assert_eq!(game.pawn().cell, Cell::new(2, 1));
    assert!(game.is_solved());
}

#[test]
fn rendered_frame_reaches_the_frame_buffer() {
    let game = Game::with_maze(corridor(4, 3));
    let proj = Projection::new(200, 150, 4.0, 0.5);
    let calls = game.render_frame(&proj);
    assert!(!calls.is_empty());
    assert!(calls.iter().all(|c| matches!(c, DrawCall::Line(l) if l.colour == WALL)));

    let mut sw = Software::default();
    let blue = sw.draw_frame(200, 150, &calls, |fb, _, _| {
        fb.iter().filter(|&&px| px == WALL).count()
    });
    assert!(blue > 0);
}
