use bevy::color::{Color, Srgba};
use clap::Parser;
use once_cell::sync::Lazy;

use crate::error::ConfigError;
use crate::sim_struct::ParamRange;

pub const DEFAULT_PALETTE: &str = "FF6D00,FF3D00,7C4DFF,FFD600,00E5FF,FF4081,76FF03,EA80FC";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Particle bursts from a flipping card
pub struct Args {
    /// Initial window size, as width,height
    #[arg(long, default_value = "600,800", value_parser = parse_window_size)]
    pub win: WindowSize,
    /// Number of particles in a click or flip burst
    #[arg(long, default_value = "50")]
    pub burst: u32,
    /// Downward acceleration, in units per tick squared
    #[arg(long, default_value = "0.12")]
    pub gravity: f32,
    /// Horizontal velocity multiplier applied every tick
    #[arg(long, default_value = "0.99")]
    pub damping: f32,
    /// Initial speed range, as min,max
    #[arg(long, default_value = "3,11", value_parser = parse_range)]
    pub speed: ParamRange,
    /// Per-tick life decay range, as min,max
    #[arg(long, default_value = "0.004,0.016", value_parser = parse_range)]
    pub decay: ParamRange,
    /// Base radius range, as min,max
    #[arg(long, default_value = "2,7", value_parser = parse_range)]
    pub size: ParamRange,
    /// Particle colors, as comma separated hex values
    #[arg(long, value_delimiter = ',', default_value = DEFAULT_PALETTE, value_parser = parse_color)]
    pub palette: Vec<Color>,
    /// Upper bound on live particles. Unbounded when not given.
    #[arg(long)]
    pub max_particles: Option<usize>,
    /// Seed for the particle random source. Seeded from the OS when not given.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Number of floating orbs in the background
    #[arg(long, default_value = "8")]
    pub orbs: usize,
}

pub static ARGS: Lazy<Args> = Lazy::new(Args::parse);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WindowSize {
    pub width: u32,
    pub height: u32,
}

fn split_pair(s: &str) -> Option<(&str, &str)> {
    let (a, b) = s.split_once(',')?;
    Some((a.trim(), b.trim()))
}

pub fn parse_window_size(s: &str) -> Result<WindowSize, ConfigError> {
    let invalid = || ConfigError::InvalidWindowSize(s.to_string());
    let (w, h) = split_pair(s).ok_or_else(invalid)?;
    let width: u32 = w.parse().map_err(|_| invalid())?;
    let height: u32 = h.parse().map_err(|_| invalid())?;
    if width == 0 || height == 0 {
        return Err(invalid());
    }
    Ok(WindowSize { width, height })
}

pub fn parse_range(s: &str) -> Result<ParamRange, ConfigError> {
    let invalid = || ConfigError::InvalidRange(s.to_string());
    let (a, b) = split_pair(s).ok_or_else(invalid)?;
    let min: f32 = a.parse().map_err(|_| invalid())?;
    let max: f32 = b.parse().map_err(|_| invalid())?;
    if !min.is_finite() || !max.is_finite() {
        return Err(invalid());
    }
    Ok(ParamRange::new(min, max))
}

pub fn parse_color(s: &str) -> Result<Color, ConfigError> {
    Srgba::hex(s.trim())
        .map(Color::from)
        .map_err(|e| ConfigError::InvalidColor {
            value: s.to_string(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_parse() {
        let args = Args::try_parse_from(["card-sparks"]).unwrap();
        assert_eq!(args.win, WindowSize { width: 600, height: 800 });
        assert_eq!(args.burst, 50);
        assert_eq!(args.speed, ParamRange::new(3.0, 11.0));
        assert_eq!(args.decay, ParamRange::new(0.004, 0.016));
        assert_eq!(args.palette.len(), 8);
        assert!(args.max_particles.is_none());
    }

    #[test]
    fn test_window_size() {
        assert_eq!(
            parse_window_size("1024, 768"),
            Ok(WindowSize { width: 1024, height: 768 })
        );
        assert!(parse_window_size("1024").is_err());
        assert!(parse_window_size("0,768").is_err());
        assert!(parse_window_size("wide,tall").is_err());
    }

    #[test]
    fn test_range() {
        assert_eq!(parse_range("0.5,2"), Ok(ParamRange::new(0.5, 2.0)));
        assert!(matches!(parse_range("1;2"), Err(ConfigError::InvalidRange(_))));
        assert!(parse_range("nan,2").is_err());
    }

    #[test]
    fn test_color() {
        assert_eq!(parse_color("FF0000"), Ok(Color::from(Srgba::rgb(1.0, 0.0, 0.0))));
        assert!(matches!(parse_color("not-a-color"), Err(ConfigError::InvalidColor { .. })));
    }

    #[test]
    fn test_palette_override() {
        let args = Args::try_parse_from(["card-sparks", "--palette", "FFFFFF,000000"]).unwrap();
        assert_eq!(args.palette.len(), 2);
    }
}
