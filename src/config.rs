use std::str::FromStr;

use clap::{Parser, ValueEnum};
use thiserror::Error;

use crate::geometry::{Point, Segment};
use crate::player::{Bounds, PlayerState, normalize_degrees};
use crate::world::{WallError, WallStore, World};

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("--rays must be at least 1")]
    NoRays,
    #[error("--fov must be in (0, 360], got {0}")]
    Fov(f32),
    #[error("--max-distance must be positive, got {0}")]
    MaxDistance(f32),
    #[error("--pixels-per-meter must be positive, got {0}")]
    PixelsPerMeter(f32),
    #[error("map canvas must be at least 1x1, got {width}x{height}")]
    Canvas { width: u32, height: u32 },
    #[error("--eye-height {eye} must lie within the wall height {wall}")]
    EyeHeight { eye: f32, wall: f32 },
    #[error("wall spec '{0}' must be four numbers: x1,y1,x2,y2")]
    WallSpec(String),
    #[error("seed wall: {0}")]
    SeedWall(#[from] WallError),
}

/// Unit used for `--max-distance` and `--step`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Units {
    Pixels,
    Meters,
}

/// `x1,y1,x2,y2` as given on the command line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallSpec(pub Segment);

impl FromStr for WallSpec {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split(',')
            .map(|part| part.trim().parse::<f32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| ConfigError::WallSpec(s.to_string()))?;

        match values[..] {
            [x1, y1, x2, y2] => Ok(WallSpec(Segment::new(Point::new(x1, y1), Point::new(x2, y2)))),
            _ => Err(ConfigError::WallSpec(s.to_string())),
        }
    }
}

/// First-person raycaster over hand-drawn walls
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Config {
    /// Map canvas width in pixels; the window is twice as wide
    #[arg(long, default_value_t = 400)]
    pub width: u32,

    /// Map canvas height in pixels
    #[arg(long, default_value_t = 300)]
    pub height: u32,

    /// Initial heading in degrees, counterclockwise from +x
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub facing: f32,

    /// Total angular spread of the ray fan in degrees
    #[arg(long, default_value_t = 100.0)]
    pub fov: f32,

    /// Number of rays, one per screen column
    #[arg(long, default_value_t = 100)]
    pub rays: usize,

    /// Unit for --max-distance and --step
    #[arg(long, value_enum, default_value_t = Units::Pixels)]
    pub units: Units,

    /// Cast cutoff [default: 100 px or 20 m]
    #[arg(long)]
    pub max_distance: Option<f32>,

    /// Distance per move command [default: 2 px or 0.5 m]
    #[arg(long)]
    pub step: Option<f32>,

    /// Degrees per turn command
    #[arg(long, default_value_t = 5.0)]
    pub turn_rate: f32,

    /// Wall height in meters
    #[arg(long, default_value_t = 5.0)]
    pub wall_height: f32,

    /// Eye height in meters; walls are split at this level on screen
    #[arg(long, default_value_t = 1.8)]
    pub eye_height: f32,

    /// Map pixels per meter, used for projection and --units meters
    #[arg(long, default_value_t = 10.0)]
    pub pixels_per_meter: f32,

    /// Seed wall as x1,y1,x2,y2 in map pixels (repeatable)
    #[arg(long = "wall", value_name = "X1,Y1,X2,Y2")]
    pub walls: Vec<WallSpec>,
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rays == 0 {
            return Err(ConfigError::NoRays);
        }
        if !(self.fov > 0.0 && self.fov <= 360.0) {
            return Err(ConfigError::Fov(self.fov));
        }
        if !(self.pixels_per_meter > 0.0) {
            return Err(ConfigError::PixelsPerMeter(self.pixels_per_meter));
        }
        if !(self.max_distance_px() > 0.0) {
            return Err(ConfigError::MaxDistance(self.max_distance_px()));
        }
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Canvas {
                width: self.width,
                height: self.height,
            });
        }
        if !(0.0..=self.wall_height).contains(&self.eye_height) {
            return Err(ConfigError::EyeHeight {
                eye: self.eye_height,
                wall: self.wall_height,
            });
        }
        Ok(())
    }

    fn to_pixels(&self, value: f32) -> f32 {
        match self.units {
            Units::Pixels => value,
            Units::Meters => value * self.pixels_per_meter,
        }
    }

    pub fn max_distance_px(&self) -> f32 {
        let default = match self.units {
            Units::Pixels => 100.0,
            Units::Meters => 20.0,
        };
        self.to_pixels(self.max_distance.unwrap_or(default))
    }

    pub fn step_px(&self) -> f32 {
        let default = match self.units {
            Units::Pixels => 2.0,
            Units::Meters => 0.5,
        };
        self.to_pixels(self.step.unwrap_or(default))
    }

    pub fn bounds(&self) -> Bounds {
        Bounds {
            width: self.width as f32,
            height: self.height as f32,
        }
    }

    /// Validated startup world: player in the middle of the map, seed walls loaded.
    pub fn build_world(&self) -> Result<World, ConfigError> {
        self.validate()?;

        let bounds = self.bounds();
        let player = PlayerState {
            position: Point::new(bounds.width / 2.0, bounds.height / 2.0),
            facing_deg: normalize_degrees(self.facing),
            fov_deg: self.fov,
            ray_count: self.rays,
            max_distance: self.max_distance_px(),
            eye_height_m: self.eye_height,
            wall_height_m: self.wall_height,
            pixels_per_meter: self.pixels_per_meter,
            step_size: self.step_px(),
            turn_rate: self.turn_rate,
        };

        let mut walls = WallStore::new();
        for WallSpec(segment) in &self.walls {
            walls.add_wall(*segment)?;
        }

        Ok(World {
            player,
            walls,
            bounds,
        })
    }
}
