use bevy::color::Color;
use bevy::math::Vec2;

/// One spark. Coordinates are relative to the surface center with y pointing down.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Position before the most recent step, the tail of the motion trail.
    pub prev_position: Vec2,
    pub life: f32,
    decay: f32,
    size: f32,
    color: Color,
    age: u32,
}

impl Particle {
    pub fn new(position: Vec2, velocity: Vec2, decay: f32, size: f32, color: Color) -> Self {
        Particle {
            position,
            velocity,
            prev_position: position,
            life: 1.0,
            decay,
            size,
            color,
            age: 0,
        }
    }

    pub fn decay(&self) -> f32 {
        self.decay
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }

    /// Life clamped to `[0, 1]`.
    pub fn opacity(&self) -> f32 {
        self.life.clamp(0.0, 1.0)
    }

    /// Radius to draw at; shrinks as the particle fades.
    pub fn radius(&self) -> f32 {
        self.size * self.opacity()
    }

    /// Stroke width of the motion trail; unlike `radius` it does not fade.
    pub fn trail_width(&self) -> f32 {
        self.size * 0.6
    }

    /// Advances one fixed tick: explicit Euler, then gravity, drag and decay.
    pub fn step(&mut self, gravity: f32, damping: f32) {
        self.prev_position = self.position;
        self.position += self.velocity;
        self.velocity.y += gravity;
        self.velocity.x *= damping;
        // Recomputed from the tick count so repeated subtraction can't drift.
        self.age += 1;
        self.life = 1.0 - self.age as f32 * self.decay;
    }
}
