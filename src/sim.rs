use std::f32::consts::TAU;

use bevy::color::Color;
use bevy::log::debug;
use bevy::math::Vec2;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::particle::Particle;
use crate::sim_struct::{DebugParams, ParticleSystem, SimParams};

const INITIAL_CAPACITY: usize = 256;

impl ParticleSystem {
    pub fn new(params: SimParams) -> ParticleSystem {
        Self::with_rng(params, StdRng::from_os_rng())
    }

    pub fn with_seed(params: SimParams, seed: u64) -> ParticleSystem {
        Self::with_rng(params, StdRng::seed_from_u64(seed))
    }

    fn with_rng(params: SimParams, rng: StdRng) -> ParticleSystem {
        ParticleSystem {
            particles: Vec::with_capacity(params.max_particles.map_or(INITIAL_CAPACITY, |max| max.min(INITIAL_CAPACITY))),
            params,
            rng,
            debug: DebugParams::default(),
        }
    }

    pub fn params(&self) -> &SimParams {
        &self.params
    }

    /// Live particles in spawn order.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Appends `count` particles at `origin`, flying outward at random angles.
    /// With `max_particles` set, only as many as fit are created; live
    /// particles are never evicted. Returns the number created.
    pub fn spawn_burst(&mut self, origin: Vec2, count: usize) -> usize {
        let count = match self.params.max_particles {
            Some(max) => count.min(max.saturating_sub(self.particles.len())),
            None => count,
        };
        if count == 0 {
            return 0;
        }

        self.particles.reserve(count);
        for _ in 0..count {
            let angle = self.rng.random_range(0.0..TAU);
            let speed = self.params.speed.sample(&mut self.rng);
            let decay = self.params.decay.sample(&mut self.rng);
            let size = self.params.size.sample(&mut self.rng);
            let color = self.params.palette.choose(&mut self.rng).copied().unwrap_or(Color::WHITE);
            self.particles
                .push(Particle::new(origin, Vec2::from_angle(angle) * speed, decay, size, color));
        }
        debug!("Burst of {count} at ({}, {}), {} live", origin.x, origin.y, self.particles.len());
        count
    }

    /// Advances every live particle by one fixed step and retires the ones
    /// whose life ran out. Returns the number retired.
    pub fn tick(&mut self) -> usize {
        if self.particles.is_empty() {
            return 0;
        }

        let gravity = self.params.gravity;
        let damping = self.params.damping;
        self.particles
            .par_iter_mut()
            .filter(|p| p.is_alive())
            .for_each(|p| p.step(gravity, damping));

        let before = self.particles.len();
        self.particles.retain(Particle::is_alive);
        before - self.particles.len()
    }
}
