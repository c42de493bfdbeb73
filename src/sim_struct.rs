use std::fmt::{Debug, Formatter};

use bevy::color::Color;
use bevy::prelude::Resource;
use rand::rngs::StdRng;
use rand::Rng;

use crate::args::{parse_color, Args, DEFAULT_PALETTE};
use crate::error::ConfigError;
use crate::particle::Particle;

/// Bounds for a per-particle random parameter. Sampled as `[min, max)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParamRange {
    pub min: f32,
    pub max: f32,
}

impl ParamRange {
    pub const fn new(min: f32, max: f32) -> Self {
        ParamRange { min, max }
    }

    /// A degenerate range (`max <= min`) always yields `min`.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> f32 {
        if self.max > self.min {
            rng.random_range(self.min..self.max)
        } else {
            self.min
        }
    }
}

#[derive(Clone, Debug)]
pub struct SimParams {
    pub gravity: f32,
    pub damping: f32,
    pub speed: ParamRange,
    pub decay: ParamRange,
    pub size: ParamRange,
    pub palette: Vec<Color>,
    pub max_particles: Option<usize>,
}

impl Default for SimParams {
    fn default() -> Self {
        SimParams {
            gravity: 0.12,
            damping: 0.99,
            speed: ParamRange::new(3.0, 11.0),
            decay: ParamRange::new(0.004, 0.016),
            size: ParamRange::new(2.0, 7.0),
            palette: DEFAULT_PALETTE.split(',').filter_map(|hex| parse_color(hex).ok()).collect(),
            max_particles: None,
        }
    }
}

impl SimParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.gravity.is_finite() || self.gravity < 0.0 {
            return Err(ConfigError::InvalidGravity(self.gravity));
        }
        if !(self.damping > 0.0 && self.damping <= 1.0) {
            return Err(ConfigError::InvalidDamping(self.damping));
        }
        for (name, range) in [("speed", self.speed), ("decay", self.decay), ("size", self.size)] {
            if range.min > range.max {
                return Err(ConfigError::InvertedRange {
                    name,
                    min: range.min,
                    max: range.max,
                });
            }
        }
        // Zero decay would make particles immortal.
        if self.decay.min <= 0.0 {
            return Err(ConfigError::NonPositiveDecay(self.decay.min));
        }
        if self.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        Ok(())
    }
}

impl TryFrom<&Args> for SimParams {
    type Error = ConfigError;

    fn try_from(args: &Args) -> Result<Self, Self::Error> {
        let params = SimParams {
            gravity: args.gravity,
            damping: args.damping,
            speed: args.speed,
            decay: args.decay,
            size: args.size,
            palette: args.palette.clone(),
            max_particles: args.max_particles,
        };
        params.validate()?;
        Ok(params)
    }
}

/// Owns every live particle. Bevy hands out `ResMut` to the tick and burst
/// systems and `Res` to the draw pass, never both at once.
#[derive(Resource)]
pub struct ParticleSystem {
    pub(crate) params: SimParams,
    pub(crate) particles: Vec<Particle>,
    pub(crate) rng: StdRng,

    pub debug: DebugParams,
}

impl Debug for ParticleSystem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "ParticleSystem:")?;
        writeln!(f, "    live particles: {}", self.particles.len())?;
        writeln!(f, "    gravity: {}", self.params.gravity)?;
        writeln!(f, "    damping: {}", self.params.damping)?;
        writeln!(f, "    speed: {:?}", self.params.speed)?;
        writeln!(f, "    decay: {:?}", self.params.decay)?;
        writeln!(f, "    size: {:?}", self.params.size)?;
        writeln!(f, "    palette colors: {}", self.params.palette.len())?;
        writeln!(f, "    max_particles: {:?}", self.params.max_particles)
    }
}

pub struct DebugParams {
    pub current_frame: u32,
    pub frames_to_show: u32,
    pub log_frame: u32,
    pub show_trails: bool,
    pub show_orbs: bool,
}

impl Default for DebugParams {
    fn default() -> Self {
        DebugParams {
            current_frame: 0,
            frames_to_show: u32::MAX,
            log_frame: u32::MAX,
            show_trails: true,
            show_orbs: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_default_params_are_valid() {
        let params = SimParams::default();
        assert_eq!(params.palette.len(), 8);
        assert_eq!(params.validate(), Ok(()));
    }

    #[test]
    fn test_degenerate_range_yields_min() {
        let mut rng = StdRng::seed_from_u64(7);
        let range = ParamRange::new(0.01, 0.01);
        assert_eq!(range.sample(&mut rng), 0.01);
    }

    #[test]
    fn test_range_sample_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let range = ParamRange::new(3.0, 11.0);
        for _ in 0..1000 {
            let v = range.sample(&mut rng);
            assert!((3.0..11.0).contains(&v));
        }
    }

    #[test]
    fn test_validate_rejects_bad_params() {
        let params = SimParams { damping: 1.5, ..SimParams::default() };
        assert_eq!(params.validate(), Err(ConfigError::InvalidDamping(1.5)));

        let params = SimParams { damping: 0.0, ..SimParams::default() };
        assert!(params.validate().is_err());

        let params = SimParams { gravity: -1.0, ..SimParams::default() };
        assert_eq!(params.validate(), Err(ConfigError::InvalidGravity(-1.0)));

        let params = SimParams { size: ParamRange::new(7.0, 2.0), ..SimParams::default() };
        assert!(matches!(params.validate(), Err(ConfigError::InvertedRange { name: "size", .. })));

        let params = SimParams { decay: ParamRange::new(0.0, 0.01), ..SimParams::default() };
        assert_eq!(params.validate(), Err(ConfigError::NonPositiveDecay(0.0)));

        let params = SimParams { palette: Vec::new(), ..SimParams::default() };
        assert_eq!(params.validate(), Err(ConfigError::EmptyPalette));
    }

    #[test]
    fn test_params_from_args() {
        use clap::Parser;

        let args = Args::try_parse_from(["card-sparks", "--gravity", "0.2", "--max-particles", "300"]).unwrap();
        let params = SimParams::try_from(&args).unwrap();
        assert_eq!(params.gravity, 0.2);
        assert_eq!(params.max_particles, Some(300));

        let args = Args::try_parse_from(["card-sparks", "--damping", "2"]).unwrap();
        assert_eq!(SimParams::try_from(&args).err(), Some(ConfigError::InvalidDamping(2.0)));
    }
}
