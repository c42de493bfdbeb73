use std::time::{Duration, Instant};

use bevy::color::Alpha;
use bevy::prelude::*;
use bevy::window::WindowResolution;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::args::ARGS;
use crate::error::ConfigError;
use crate::keyboard::{handle_keypress, KeyboardCommands};
use crate::orbs::FloatingOrbs;
use crate::sim_struct::{ParticleSystem, SimParams};

mod args;
mod digit_keys;
mod error;
mod keyboard;
mod orbs;
mod particle;
mod sim;
mod sim_settings;
mod sim_struct;

const BACKGROUND: Color = Color::srgb(0.031, 0.031, 0.094);
const TRAIL_ALPHA: f32 = 0.4;

fn main() -> Result<(), ConfigError> {
    let params = SimParams::try_from(&*ARGS)?;
    let sim = match ARGS.seed {
        Some(seed) => ParticleSystem::with_seed(params, seed),
        None => ParticleSystem::new(params),
    };

    let mut resolution = WindowResolution::default();
    resolution.set(ARGS.win.width as f32, ARGS.win.height as f32);

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Card Sparks".to_string(),
                resolution,
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(BACKGROUND))
        .insert_resource(sim)
        .insert_resource(KeyboardCommands::create())
        .init_resource::<Toasts>()
        .add_systems(Startup, setup)
        .add_systems(
            Update,
            (
                handle_keypress,
                handle_click,
                advance_particles,
                draw_orbs,
                draw_particles,
                show_toasts,
            )
                .chain(),
        )
        .run();

    Ok(())
}

/// A short-lived line of on-screen feedback.
pub struct Toast {
    pub text: String,
    pub start_time: Instant,
    pub duration: Duration,
}

#[derive(Resource, Default)]
pub struct Toasts {
    pub toasts: Vec<Toast>,
}

impl Toasts {
    pub fn show(&mut self, text: impl Into<String>, secs: u64) {
        self.toasts.push(Toast {
            text: text.into(),
            start_time: Instant::now(),
            duration: Duration::from_secs(secs),
        });
    }
}

#[derive(Component)]
struct ToastText;

fn setup(mut commands: Commands, sim: Res<ParticleSystem>, mut toasts: ResMut<Toasts>) {
    commands.spawn(Camera2d);
    commands.spawn((
        Text::new(""),
        TextColor(Color::WHITE.with_alpha(0.7)),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            left: Val::Px(12.0),
            ..default()
        },
        ToastText,
    ));

    let orbs = match ARGS.seed {
        Some(seed) => FloatingOrbs::scatter(&mut StdRng::seed_from_u64(seed), &sim.params().palette, ARGS.orbs),
        None => FloatingOrbs::scatter(&mut rand::rng(), &sim.params().palette, ARGS.orbs),
    };
    commands.insert_resource(orbs);

    info!("{:?}", *sim);
    toasts.show("Click or press F to flip, ? for help", 5);
}

/// Particles live in surface coordinates (y down); Bevy's world is y up.
pub fn flip_y(p: Vec2) -> Vec2 {
    Vec2::new(p.x, -p.y)
}

pub fn cursor_surface_pos(window: &Window, camera: &Camera, camera_transform: &GlobalTransform) -> Option<Vec2> {
    let cursor_position = window.cursor_position()?;
    camera
        .viewport_to_world_2d(camera_transform, cursor_position)
        .ok()
        .map(flip_y)
}

fn handle_click(
    mouse: Res<ButtonInput<MouseButton>>,
    mut sim: ResMut<ParticleSystem>,
    camera_query: Single<(&Camera, &GlobalTransform)>,
    window: Single<&Window>,
) {
    if !mouse.just_pressed(MouseButton::Left) {
        return;
    }
    let (camera, camera_transform) = *camera_query;
    if let Some(origin) = cursor_surface_pos(&window, camera, camera_transform) {
        sim.spawn_burst(origin, ARGS.burst as usize);
    }
}

/// One tick per frame, independent of frame time.
fn advance_particles(mut sim: ResMut<ParticleSystem>) {
    if sim.is_paused() {
        return;
    }
    let retired = sim.tick();
    sim.debug(|| {
        format!(
            "Frame {}: {} live, {} retired\n{:?}",
            sim.debug.current_frame,
            sim.len(),
            retired,
            *sim
        )
    });
    sim.frame_done();
}

fn draw_orbs(
    sim: Res<ParticleSystem>,
    orbs: Res<FloatingOrbs>,
    time: Res<Time>,
    window: Single<&Window>,
    mut gizmos: Gizmos,
) {
    if !sim.debug.show_orbs {
        return;
    }
    let phase = FloatingOrbs::phase(time.elapsed_secs());
    let size = window.size();
    for (i, orb) in orbs.orbs.iter().enumerate() {
        if let Some(pos) = orbs.position(i, phase) {
            gizmos.circle_2d(FloatingOrbs::to_world(pos, size), orb.radius, orb.color);
        }
    }
}

/// Perpendicular offsets of the 1px gizmo lines that together cover a stroke `width` wide.
pub fn stroke_offsets(width: f32) -> impl Iterator<Item = f32> {
    let lines = width.round().max(1.0) as usize;
    let first = (lines - 1) as f32 / 2.0;
    (0..lines).map(move |i| i as f32 - first)
}

fn draw_particles(sim: Res<ParticleSystem>, mut gizmos: Gizmos) {
    for p in sim.particles() {
        let alpha = p.opacity();
        let position = flip_y(p.position);
        if sim.debug.show_trails {
            let start = flip_y(p.prev_position);
            let normal = (position - start).perp().normalize_or_zero();
            let color = p.color().with_alpha(alpha * TRAIL_ALPHA);
            for offset in stroke_offsets(p.trail_width()) {
                gizmos.line_2d(start + normal * offset, position + normal * offset, color);
            }
        }
        gizmos.circle_2d(position, p.radius(), p.color().with_alpha(alpha));
    }
}

fn show_toasts(mut toasts: ResMut<Toasts>, mut text: Single<&mut Text, With<ToastText>>) {
    let now = Instant::now();
    toasts.toasts.retain(|toast| now.duration_since(toast.start_time) < toast.duration);
    let joined = toasts
        .toasts
        .iter()
        .map(|toast| toast.text.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    if text.0 != joined {
        text.0 = joined;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flip_y_round_trips() {
        let p = Vec2::new(3.0, -7.5);
        assert_eq!(flip_y(p), Vec2::new(3.0, 7.5));
        assert_eq!(flip_y(flip_y(p)), p);
    }

    #[test]
    fn test_stroke_offsets_cover_width() {
        assert_eq!(stroke_offsets(0.3).collect::<Vec<_>>(), vec![0.0]);
        assert_eq!(stroke_offsets(1.2).collect::<Vec<_>>(), vec![0.0]);
        assert_eq!(stroke_offsets(3.0).collect::<Vec<_>>(), vec![-1.0, 0.0, 1.0]);
        assert_eq!(stroke_offsets(3.6).collect::<Vec<_>>(), vec![-1.5, -0.5, 0.5, 1.5]);
    }

    #[test]
    fn test_toasts_expire() {
        let mut toasts = Toasts::default();
        toasts.show("hello", 0);
        toasts.show("world", 5);
        let now = Instant::now();
        toasts.toasts.retain(|toast| now.duration_since(toast.start_time) < toast.duration);
        assert_eq!(toasts.toasts.len(), 1);
        assert_eq!(toasts.toasts[0].text, "world");
    }
}
