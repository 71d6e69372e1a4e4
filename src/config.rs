use thiserror::Error;

use crate::{
    engine::{Projection, map},
    sim::STEP_DELAY_MS,
};

pub const MIN_DIST_D: f64 = 2.0;
pub const MAX_DIST_D: f64 = 10.0;
/// Factor applied per focal-distance key press.
pub const DIST_D_STEP: f64 = 1.05;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("maze size must be at least 1x1, got {width}x{height}")]
    MazeSize { width: usize, height: usize },
    #[error("view size must be at least 1x1, got {width}x{height}")]
    ViewSize { width: usize, height: usize },
    #[error("focal distance {0} outside [{MIN_DIST_D}, {MAX_DIST_D}]")]
    DistD(f64),
    #[error("scale factor must be positive, got {0}")]
    Scale(f64),
    #[error("{name} delay must not be negative, got {ms} ms")]
    Delay { name: &'static str, ms: i64 },
}

/// Runtime settings.  `Default` is the classic 15×12 game.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub width: usize,
    pub height: usize,
    /// Seed for maze generation; `None` draws one from the OS.
    pub seed: Option<u64>,
    pub dist_d: f64,
    pub scale: f64,
    pub view_width: usize,
    pub view_height: usize,
    pub gen_delay_ms: i64,
    pub move_delay_ms: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 15,
            height: 12,
            seed: None,
            dist_d: 4.0,
            scale: 0.5,
            view_width: 400,
            view_height: 400,
            gen_delay_ms: STEP_DELAY_MS,
            move_delay_ms: STEP_DELAY_MS,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::MazeSize {
                width: self.width,
                height: self.height,
            });
        }
        if self.view_width == 0 || self.view_height == 0 {
            return Err(ConfigError::ViewSize {
                width: self.view_width,
                height: self.view_height,
            });
        }
        if !(MIN_DIST_D..=MAX_DIST_D).contains(&self.dist_d) {
            return Err(ConfigError::DistD(self.dist_d));
        }
        if self.scale.is_nan() || self.scale <= 0.0 {
            return Err(ConfigError::Scale(self.scale));
        }
        for (name, ms) in [("generation", self.gen_delay_ms), ("move", self.move_delay_ms)] {
            if ms < 0 {
                return Err(ConfigError::Delay { name, ms });
            }
        }
        Ok(())
    }

    pub fn projection(&self, dist_d: f64) -> Projection {
        Projection::new(self.view_width, self.view_height, dist_d, self.scale)
    }

    #[inline]
    pub fn map_size(&self) -> (usize, usize) {
        map::panel_size(self.width, self.height)
    }

    /// Map on the left, first-person view on the right.
    pub fn window_size(&self) -> (usize, usize) {
        let (mw, mh) = self.map_size();
        (mw + self.view_width, mh.max(self.view_height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let c = Config::default();
        assert_eq!(c.validate(), Ok(()));
        assert_eq!(c.window_size(), (780, 400));
    }

    #[test]
    fn rejects_bad_values() {
        let bad = |f: fn(&mut Config)| {
            let mut c = Config::default();
            f(&mut c);
            c.validate().unwrap_err()
        };
        assert_eq!(
            bad(|c| c.height = 0),
            ConfigError::MazeSize {
                width: 15,
                height: 0
            }
        );
        assert!(matches!(bad(|c| c.view_width = 0), ConfigError::ViewSize { .. }));
        assert_eq!(bad(|c| c.dist_d = 11.0), ConfigError::DistD(11.0));
        assert!(bad(|c| c.scale = f64::NAN).to_string().contains("positive"));
        assert_eq!(
            bad(|c| c.move_delay_ms = -1),
            ConfigError::Delay { name: "move", ms: -1 }
        );
    }
}
