use bevy::log::info;

use crate::sim_struct::ParticleSystem;

const MIN_DAMPING: f32 = 0.5;

impl ParticleSystem {
    pub fn frames_to_advance(&self) -> u32 {
        self.debug.frames_to_show
    }

    pub fn set_frames_to_show(&mut self, val: u32) {
        self.debug.frames_to_show = val;
    }

    pub fn is_paused(&self) -> bool {
        self.frames_to_advance() == 0
    }

    /// Called by the tick driver after each tick it runs.
    pub fn frame_done(&mut self) {
        self.debug.current_frame = self.debug.current_frame.wrapping_add(1);
        if self.debug.frames_to_show != u32::MAX {
            self.debug.frames_to_show = self.debug.frames_to_show.saturating_sub(1);
        }
    }

    /// Logs on the frame requested by `log_next_frame`; `message` is only built then.
    pub fn debug(&self, message: impl FnOnce() -> String) {
        if self.debug.log_frame == self.debug.current_frame {
            info!("{}", message());
        }
    }

    pub fn log_next_frame(&mut self) {
        self.debug.log_frame = self.debug.current_frame.wrapping_add(1);
    }

    pub fn toggle_trails(&mut self) {
        self.debug.show_trails = !self.debug.show_trails;
    }

    pub fn toggle_orbs(&mut self) {
        self.debug.show_orbs = !self.debug.show_orbs;
    }

    pub fn adj_gravity(&mut self, increment: f32) {
        self.params.gravity = (self.params.gravity + increment).max(0.0);
    }

    pub fn adj_damping(&mut self, increment: f32) {
        self.params.damping = (self.params.damping + increment).clamp(MIN_DAMPING, 1.0);
    }
}
