use bevy::color::{Alpha, Color};
use bevy::math::Vec2;
use bevy::prelude::Resource;
use rand::Rng;

/// Seconds for the drift phase to run from 0 to `PHASE_SPAN`.
const CYCLE_SECS: f32 = 100.0;
const PHASE_SPAN: f32 = 1000.0;
/// Orbs wrap around a slightly oversized field so they slide fully offscreen.
const WRAP: f32 = 1.2;
const ORB_ALPHA: f32 = 0.25;

pub struct Orb {
    /// Normalized starting point in `[0, 1)`.
    pub anchor: Vec2,
    pub radius: f32,
    pub drift: Vec2,
    pub color: Color,
}

/// Large translucent lights drifting behind the sparks.
#[derive(Resource, Default)]
pub struct FloatingOrbs {
    pub orbs: Vec<Orb>,
}

impl FloatingOrbs {
    pub fn scatter<R: Rng>(rng: &mut R, palette: &[Color], count: usize) -> FloatingOrbs {
        let orbs = (0..count)
            .map(|i| Orb {
                anchor: Vec2::new(rng.random(), rng.random()),
                radius: rng.random_range(30.0..90.0),
                drift: Vec2::new(rng.random::<f32>() - 0.5, rng.random::<f32>() - 0.5) * 0.002,
                color: palette
                    .get(i % palette.len().max(1))
                    .copied()
                    .unwrap_or(Color::WHITE)
                    .with_alpha(ORB_ALPHA),
            })
            .collect();
        FloatingOrbs { orbs }
    }

    pub fn phase(elapsed_secs: f32) -> f32 {
        elapsed_secs.rem_euclid(CYCLE_SECS) / CYCLE_SECS * PHASE_SPAN
    }

    /// Normalized position of orb `index`, always in `[0, WRAP)` on both axes.
    pub fn position(&self, index: usize, phase: f32) -> Option<Vec2> {
        let orb = self.orbs.get(index)?;
        let stagger = Vec2::new(0.1, 0.07) * index as f32;
        Some((orb.anchor + orb.drift * phase + stagger).rem_euclid(Vec2::splat(WRAP)))
    }

    /// Maps a normalized position onto a window centered at the world origin.
    pub fn to_world(normalized: Vec2, window: Vec2) -> Vec2 {
        Vec2::new(normalized.x * window.x - window.x / 2.0, window.y / 2.0 - normalized.y * window.y)
    }
}
