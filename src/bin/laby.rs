//! First-person maze game.
//!
//! ```bash
//! cargo run --release -- --width 20 --height 15 --seed 7
//! ```
//!
//! Left panel: top-down map.  Right panel: wireframe first-person view.
//! Arrows move and turn, shift+←/→ strafe, `n` new maze, `r` reveal,
//! `d`/`D` focal distance, `q`/Esc quit.

use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use log::info;
use minifb::{Key, KeyRepeat, Window, WindowOptions};

use laby_rs::{
    App, Config, Keys,
    renderer::{RendererExt, Software},
};

/// CLI options handled via `clap` derive.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Opts {
    /// Maze width in cells
    #[arg(long, default_value_t = 15)]
    width: usize,

    /// Maze height in cells
    #[arg(long, default_value_t = 12)]
    height: usize,

    /// Seed for maze generation (random when omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Initial focal distance, 2 to 10
    #[arg(long, default_value_t = 4.0)]
    dist_d: f64,

    /// Projection scale factor
    #[arg(long, default_value_t = 0.5)]
    scale: f64,

    /// First-person view width in pixels
    #[arg(long, default_value_t = 400)]
    view_width: usize,

    /// First-person view height in pixels
    #[arg(long, default_value_t = 400)]
    view_height: usize,

    /// Delay between two generation steps
    #[arg(long, value_name = "MS", default_value_t = 20)]
    gen_delay_ms: i64,

    /// Delay between two animation steps
    #[arg(long, value_name = "MS", default_value_t = 20)]
    move_delay_ms: i64,

    /// Log level (error, warn, info, debug, trace); RUST_LOG wins if set
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl From<&Opts> for Config {
    fn from(o: &Opts) -> Self {
        Config {
            width: o.width,
            height: o.height,
            seed: o.seed,
            dist_d: o.dist_d,
            scale: o.scale,
            view_width: o.view_width,
            view_height: o.view_height,
            gen_delay_ms: o.gen_delay_ms,
            move_delay_ms: o.move_delay_ms,
        }
    }
}

/// Keyboard state → controller flags.
fn keys(win: &Window, list: &[Key]) -> Keys {
    let shift = win.is_key_down(Key::LeftShift) || win.is_key_down(Key::RightShift);
    let mut k = Keys::empty();
    for key in list {
        k |= match key {
            Key::Up => Keys::UP,
            Key::Down => Keys::DOWN,
            Key::Left => Keys::LEFT,
            Key::Right => Keys::RIGHT,
            Key::LeftShift | Key::RightShift => Keys::SHIFT,
            Key::N => Keys::NEW,
            Key::R => Keys::REVEAL,
            Key::D if shift => Keys::FOCAL_INC,
            Key::D => Keys::FOCAL_DEC,
            _ => Keys::empty(),
        };
    }
    k
}

fn main() -> anyhow::Result<()> {
    let opts = Opts::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&opts.log_level))
        .init();

    let mut app = App::new(Config::from(&opts)).context("invalid settings")?;
    let (w, h) = app.frame_size();
    info!("window {w}x{h}, press 'n' to start");

    let mut win = Window::new(&app.title(), w, h, WindowOptions::default())
        .context("cannot open window")?;
    win.set_target_fps(60);

    let mut renderer = Software::default();
    let mut title = String::new();

    while win.is_open() && !win.is_key_down(Key::Escape) && !win.is_key_down(Key::Q) {
        let now = Instant::now();
        let held = keys(&win, &win.get_keys());
        let pressed = keys(&win, &win.get_keys_pressed(KeyRepeat::No));
        app.handle_keys(held, pressed, now)?;
        app.update(now);

        let t = app.title();
        if t != title {
            win.set_title(&t);
            title = t;
        }

        let calls = app.draw_calls();
        renderer.draw_frame(w, h, &calls, |fb, fw, fh| win.update_with_buffer(fb, fw, fh))?;
    }
    Ok(())
}
