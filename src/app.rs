//! Window-independent controller.
//!
//! The binary feeds it keyboard snapshots and the current time; the
//! controller owns the game, the two step timers and the focal distance,
//! and produces the draw list for the whole window.

use std::time::Instant;

use bitflags::bitflags;
use glam::ivec2;
use log::{debug, info};
use rand::{SeedableRng, rngs::StdRng};

use crate::{
    config::{Config, ConfigError, DIST_D_STEP, MAX_DIST_D, MIN_DIST_D},
    engine::{FirstPerson, map},
    renderer::{DIVIDER, DrawCall},
    sim::{Command, Game, Timer},
    world::MazeError,
};

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Keys: u16 {
        const UP        = 1 << 0;
        const DOWN      = 1 << 1;
        const LEFT      = 1 << 2;
        const RIGHT     = 1 << 3;
        const SHIFT     = 1 << 4;
        /// `n`
        const NEW       = 1 << 5;
        /// `r`
        const REVEAL    = 1 << 6;
        /// `d`: shorter focal distance
        const FOCAL_DEC = 1 << 7;
        /// `D`: longer focal distance
        const FOCAL_INC = 1 << 8;

        const ARROWS = Self::UP.bits() | Self::DOWN.bits() | Self::LEFT.bits() | Self::RIGHT.bits();
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Start,
    Creating,
    Playing,
    Won,
}

impl Status {
    pub fn message(self) -> &'static str {
        match self {
            Status::Start => "Labyrinth",
            Status::Creating => "Creation in progress ...",
            Status::Playing => "Find the exit!",
            Status::Won => "Well done !!",
        }
    }
}

pub struct App {
    config: Config,
    game: Option<Game>,
    rng: StdRng,
    dist_d: f64,
    /// Last arrow pressed, while it is still held.
    arrow: Option<Keys>,
    shift: bool,
    gen_timer: Timer,
    move_timer: Timer,
    view: FirstPerson,
}

impl App {
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            dist_d: config.dist_d,
            view: FirstPerson::new(config.view_width),
            config,
            game: None,
            rng,
            arrow: None,
            shift: false,
            gen_timer: Timer::new(),
            move_timer: Timer::new(),
        })
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[inline]
    pub fn game(&self) -> Option<&Game> {
        self.game.as_ref()
    }

    #[inline]
    pub fn dist_d(&self) -> f64 {
        self.dist_d
    }

    pub fn status(&self) -> Status {
        match &self.game {
            None => Status::Start,
            Some(g) if g.is_generating() => Status::Creating,
            Some(g) if g.is_solved() => Status::Won,
            Some(_) => Status::Playing,
        }
    }

    pub fn title(&self) -> String {
        format!(
            "{}  |  d,D: focal dist {:.2}",
            self.status().message(),
            self.dist_d
        )
    }

    /// Discard any current game and start generating a fresh maze.
    pub fn new_maze(&mut self, now: Instant) -> Result<(), MazeError> {
        match &mut self.game {
            Some(g) => g.restart(&mut self.rng),
            None => {
                self.game = Some(Game::new(self.config.width, self.config.height, &mut self.rng)?)
            }
        }
        self.move_timer.cancel();
        self.gen_timer.start(now, self.config.gen_delay_ms);
        Ok(())
    }

    fn command(&self) -> Option<Command> {
        let arrow = self.arrow?;
        let cmd = if arrow == Keys::UP {
            Command::Forward
        } else if arrow == Keys::DOWN {
            Command::Backward
        } else if arrow == Keys::LEFT {
            if self.shift { Command::StrafeLeft } else { Command::TurnLeft }
        } else if arrow == Keys::RIGHT {
            if self.shift { Command::StrafeRight } else { Command::TurnRight }
        } else {
            return None;
        };
        Some(cmd)
    }

    /// Apply one keyboard snapshot: `held` is everything currently down,
    /// `pressed` what went down since the previous call.
    pub fn handle_keys(&mut self, held: Keys, pressed: Keys, now: Instant) -> Result<(), MazeError> {
        self.shift = held.contains(Keys::SHIFT);
        if let Some(a) = (pressed & Keys::ARROWS).iter().next() {
            self.arrow = Some(a);
        }
        if self.arrow.is_some_and(|a| !held.contains(a)) {
            self.arrow = None;
        }

        let cmd = self.command();
        if let Some(game) = &mut self.game {
            game.set_held(cmd);
            if let Some(cmd) = cmd.filter(|_| pressed.intersects(Keys::ARROWS)) {
                if game.issue_command(cmd) {
                    self.move_timer.start(now, self.config.move_delay_ms);
                }
            }
            if pressed.contains(Keys::REVEAL) && game.reveal() {
                debug!("all walls revealed");
            }
        }

        if pressed.contains(Keys::FOCAL_DEC) {
            self.dist_d = (self.dist_d / DIST_D_STEP).max(MIN_DIST_D);
        }
        if pressed.contains(Keys::FOCAL_INC) {
            self.dist_d = (self.dist_d * DIST_D_STEP).min(MAX_DIST_D);
        }
        if pressed.contains(Keys::NEW) {
            self.new_maze(now)?;
        }
        Ok(())
    }

    /// Run whatever the timers say is due.
    pub fn update(&mut self, now: Instant) {
        let Some(game) = &mut self.game else {
            return;
        };

        if self.gen_timer.expired(now) {
            if game.step_generation(&mut self.rng) {
                info!(
                    "maze ready: {}x{}, exit at ({}, {})",
                    game.maze().width(),
                    game.maze().height(),
                    game.pawn().exit.x,
                    game.pawn().exit.y
                );
            } else {
                self.gen_timer.start(now, self.config.gen_delay_ms);
            }
        }

        if self.move_timer.expired(now) {
            game.tick();
            if game.is_animating() {
                self.move_timer.start(now, self.config.move_delay_ms);
            }
        }
    }

    /// Window size in pixels: map panel then first-person view.
    #[inline]
    pub fn frame_size(&self) -> (usize, usize) {
        self.config.window_size()
    }

    /// Everything to draw this frame, in window coordinates.
    pub fn draw_calls(&mut self) -> Vec<DrawCall> {
        let mut out = Vec::new();
        let Some(game) = &self.game else {
            return out;
        };
        map::draw(game, &mut out);

        let (map_w, _) = self.config.map_size();
        let (_, h) = self.frame_size();
        out.push(DrawCall::line(map_w as f64 - 1.0, 0.0, map_w as f64 - 1.0, h as f64, DIVIDER));

        if !game.is_generating() {
            let proj = self.config.projection(self.dist_d);
            let mut view = Vec::new();
            self.view.render(game.maze(), game.pose(), &proj, &mut view);
            let shift = ivec2(map_w as i32, 0);
            out.extend(view.into_iter().map(|c| c.offset(shift)));
        }
        out
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Facing, Phase, TURN_STEPS};
    use std::time::Duration;

    fn app(width: usize, height: usize) -> App {
        App::new(Config {
            width,
            height,
            seed: Some(17),
            ..Config::default()
        })
        .unwrap()
    }

    /// Step the clock in 20 ms increments until `done` or `limit` steps.
    fn run_until(app: &mut App, t: &mut Instant, limit: usize, done: impl Fn(&App) -> bool) -> usize {
        for n in 0..limit {
            if done(app) {
                return n;
            }
            *t += Duration::from_millis(20);
            app.update(*t);
        }
        panic!("condition not reached after {limit} steps");
    }

    #[test]
    fn invalid_config_is_refused() {
        let bad = Config {
            width: 0,
            ..Config::default()
        };
        assert!(App::new(bad).is_err());
    }

    #[test]
    fn new_maze_walks_through_creation() {
        let mut a = app(4, 3);
        let mut t = Instant::now();
        assert_eq!(a.status(), Status::Start);
        assert!(a.draw_calls().is_empty());

        a.handle_keys(Keys::NEW, Keys::NEW, t).unwrap();
        assert_eq!(a.status(), Status::Creating);
        a.update(t);
        assert_eq!(a.status(), Status::Creating);

        let steps = run_until(&mut a, &mut t, 100, |a| a.status() == Status::Playing);
        assert_eq!(steps, 4 * 3 - 1);
        assert!(a.title().starts_with("Find the exit!"));
    }

    #[test]
    fn focal_distance_is_clamped() {
        let mut a = app(2, 2);
        let t = Instant::now();
        for _ in 0..100 {
            a.handle_keys(Keys::empty(), Keys::FOCAL_DEC, t).unwrap();
        }
        assert_eq!(a.dist_d(), MIN_DIST_D);
        for _ in 0..100 {
            a.handle_keys(Keys::empty(), Keys::FOCAL_INC, t).unwrap();
        }
        assert_eq!(a.dist_d(), MAX_DIST_D);
        assert!(a.title().ends_with("10.00"));
    }

    #[test]
    fn arrow_press_starts_a_timed_move() {
        let mut a = app(3, 3);
        let mut t = Instant::now();
        a.handle_keys(Keys::NEW, Keys::NEW, t).unwrap();
        run_until(&mut a, &mut t, 100, |a| a.status() == Status::Playing);

        a.handle_keys(Keys::RIGHT, Keys::RIGHT, t).unwrap();
        assert!(a.game().unwrap().is_animating());
        a.handle_keys(Keys::empty(), Keys::empty(), t).unwrap();

        let ticks = run_until(&mut a, &mut t, 100, |a| a.game().unwrap().is_idle());
        assert_eq!(ticks, TURN_STEPS as usize);
        assert_eq!(a.game().unwrap().pawn().facing, Facing::South);
    }

    #[test]
    fn held_arrow_keeps_turning() {
        let mut a = app(3, 3);
        let mut t = Instant::now();
        a.handle_keys(Keys::NEW, Keys::NEW, t).unwrap();
        run_until(&mut a, &mut t, 100, |a| a.status() == Status::Playing);

        a.handle_keys(Keys::LEFT, Keys::LEFT, t).unwrap();
        run_until(&mut a, &mut t, 100, |a| {
            a.game().unwrap().pawn().facing == Facing::North
        });
        // still held: the next turn started straight away
        assert!(matches!(a.game().unwrap().phase(), Phase::Animating(_)));

        a.handle_keys(Keys::empty(), Keys::empty(), t).unwrap();
        run_until(&mut a, &mut t, 100, |a| a.game().unwrap().is_idle());
        assert_eq!(a.game().unwrap().pawn().facing, Facing::West);
    }

    #[test]
    fn shift_turns_arrows_into_strafes() {
        let mut a = app(3, 3);
        a.arrow = Some(Keys::LEFT);
        a.shift = true;
        assert_eq!(a.command(), Some(Command::StrafeLeft));
        a.shift = false;
        assert_eq!(a.command(), Some(Command::TurnLeft));
    }

    #[test]
    fn releasing_another_arrow_keeps_the_last_one() {
        let mut a = app(3, 3);
        let t = Instant::now();
        a.handle_keys(Keys::UP, Keys::UP, t).unwrap();
        a.handle_keys(Keys::UP | Keys::LEFT, Keys::LEFT, t).unwrap();
        assert_eq!(a.command(), Some(Command::TurnLeft));

        a.handle_keys(Keys::LEFT, Keys::empty(), t).unwrap();
        assert_eq!(a.command(), Some(Command::TurnLeft));
        a.handle_keys(Keys::empty(), Keys::empty(), t).unwrap();
        assert_eq!(a.command(), None);
    }

    #[test]
    fn view_is_drawn_right_of_the_map() {
        let mut a = app(3, 3);
        let mut t = Instant::now();
        a.handle_keys(Keys::NEW, Keys::NEW, t).unwrap();
        run_until(&mut a, &mut t, 100, |a| a.status() == Status::Playing);

        let (map_w, _) = a.config().map_size();
        let calls = a.draw_calls();
        assert!(calls.iter().any(|c| matches!(
            c,
            DrawCall::Line(l) if l.colour == crate::renderer::WALL && l.from.x > map_w as i32
        )));
    }
}
