use std::collections::HashMap;
use std::time::{Duration, Instant};

use bevy::app::AppExit;
use bevy::input::ButtonInput;
use bevy::prelude::*;

use crate::args::ARGS;
use crate::digit_keys::burst_size;
use crate::sim_struct::ParticleSystem;
use crate::{cursor_surface_pos, Toasts};

/// Defines a keyboard command to associate with a keypress.
/// Each command can have a different repeat rate.
pub struct KeyboardCommand {
    pub description: String,
    pub last_action_time: Instant,
    pub interval: Duration,
    pub action: KeyboardAction,
}

/// The function that invokes the keyboard action.
/// The parameters are a mishmash of things the various actions happen to need.
type KeyboardAction = fn(
    sim: &mut ParticleSystem,
    // true == shift is pressed
    shift: bool,
    // cursor position in surface coordinates, if it is over the window
    cursor_pos: Option<Vec2>,
    // particles per click/flip burst
    burst: usize,
    toasts: &mut Toasts,
);

/// Contains the collection of keyboard commands.
#[derive(Resource)]
pub struct KeyboardCommands {
    pub commands: HashMap<KeyCode, KeyboardCommand>,
}

impl KeyboardCommands {
    pub fn create() -> Self {
        let mut kb_cmds = KeyboardCommands {
            commands: HashMap::new(),
        };

        // Space: freeze / unfreeze particle motion.
        kb_cmds.add_command(KeyCode::Space, "Pause", 250, pause);
        // .: advance 1 tick.
        kb_cmds.add_command(KeyCode::Period, "Advance 1 tick", 150, |sim, _, _, _, _| sim.set_frames_to_show(1));
        // F: flip the card, bursting sparks from its center.
        kb_cmds.add_command(KeyCode::KeyF, "Flip (burst at center)", 250, flip);
        // D: increase/decrease damping
        kb_cmds.add_command(KeyCode::KeyD, "Decrease damping (shift: increase)", 50, adj_damping);
        // G: increase/decrease gravity
        kb_cmds.add_command(KeyCode::KeyG, "Decrease gravity (shift: increase)", 50, adj_gravity);
        // L: log debug info in the next frame
        kb_cmds.add_command(KeyCode::KeyL, "Log debug info", 250, |sim, _, _, _, _| sim.log_next_frame());
        // O: toggle background orbs
        kb_cmds.add_command(KeyCode::KeyO, "Toggle floating orbs", 250, |sim, _, _, _, _| sim.toggle_orbs());
        // T: toggle motion trails
        kb_cmds.add_command(KeyCode::KeyT, "Toggle trails", 250, toggle_trails);

        kb_cmds
    }

    pub fn add_command(&mut self, key: KeyCode, description: &str, interval_millis: u64, action: KeyboardAction) {
        self.commands.insert(
            key,
            KeyboardCommand {
                description: description.into(),
                last_action_time: Instant::now(),
                interval: Duration::from_millis(interval_millis),
                action,
            },
        );
    }

    pub fn help_text(&self) -> String {
        let mut lines: Vec<String> = self
            .commands
            .iter()
            .map(|(key, cmd)| format!("{key:?} - {}", cmd.description))
            .collect();
        lines.sort();
        lines.insert(0, "Keyboard commands:".into());
        lines.push("1..0 - Burst of 10..100 at cursor".into());
        lines.push("Click - Burst at cursor".into());
        lines.join("\n")
    }
}

fn pause(sim: &mut ParticleSystem, _shift: bool, _cursor_pos: Option<Vec2>, _burst: usize, toasts: &mut Toasts) {
    if sim.frames_to_advance() == 0 {
        sim.set_frames_to_show(u32::MAX);
        toasts.show("Running", 1);
    } else {
        sim.set_frames_to_show(0);
        toasts.show("Paused", 1);
    }
}

fn flip(sim: &mut ParticleSystem, _shift: bool, _cursor_pos: Option<Vec2>, burst: usize, _toasts: &mut Toasts) {
    sim.spawn_burst(Vec2::ZERO, burst);
}

fn adj_gravity(sim: &mut ParticleSystem, shift: bool, _cursor_pos: Option<Vec2>, _burst: usize, toasts: &mut Toasts) {
    if shift {
        sim.adj_gravity(0.02);
    } else {
        sim.adj_gravity(-0.02);
    }
    toasts.show(format!("Gravity: {:.2}", sim.params().gravity), 1);
}

fn adj_damping(sim: &mut ParticleSystem, shift: bool, _cursor_pos: Option<Vec2>, _burst: usize, toasts: &mut Toasts) {
    if shift {
        sim.adj_damping(0.005);
    } else {
        sim.adj_damping(-0.005);
    }
    toasts.show(format!("Damping: {:.3}", sim.params().damping), 1);
}

fn toggle_trails(sim: &mut ParticleSystem, _shift: bool, _cursor_pos: Option<Vec2>, _burst: usize, toasts: &mut Toasts) {
    sim.toggle_trails();
    toasts.show(format!("Trails {}", if sim.debug.show_trails { "on" } else { "off" }), 1);
}

pub fn handle_keypress(
    kb: Res<ButtonInput<KeyCode>>,
    mut app_exit: MessageWriter<AppExit>,
    mut sim: ResMut<ParticleSystem>,
    camera_query: Single<(&Camera, &GlobalTransform)>,
    window: Single<&Window>,
    mut kb_cmds: ResMut<KeyboardCommands>,
    mut toasts: ResMut<Toasts>,
) {
    // Esc / Q: quit the app
    if kb.pressed(KeyCode::Escape) || kb.pressed(KeyCode::KeyQ) {
        app_exit.write(AppExit::Success);
    }

    let shift = kb.pressed(KeyCode::ShiftLeft) || kb.pressed(KeyCode::ShiftRight);

    // ?: display help
    if kb.just_pressed(KeyCode::Slash) && shift {
        let kb_help = kb_cmds.help_text();
        // Are we already displaying it?
        if !toasts.toasts.iter().any(|toast| toast.text == kb_help) {
            toasts.show(kb_help, 5);
        }
    }

    let (camera, camera_transform) = *camera_query;
    let cursor_pos = cursor_surface_pos(&window, camera, camera_transform);

    if let Some(origin) = cursor_pos {
        for count in kb.get_just_pressed().filter_map(burst_size) {
            sim.spawn_burst(origin, count);
        }
    }

    let now = Instant::now();
    for key in kb.get_pressed() {
        if let Some(command) = kb_cmds.commands.get_mut(key) {
            if now.duration_since(command.last_action_time) >= command.interval {
                command.last_action_time = now;
                (command.action)(&mut sim, shift, cursor_pos, ARGS.burst as usize, &mut toasts);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim_struct::SimParams;

    fn sim() -> ParticleSystem {
        ParticleSystem::with_seed(SimParams::default(), 1)
    }

    #[test]
    fn test_pause_toggles() {
        let mut sim = sim();
        let mut toasts = Toasts::default();
        pause(&mut sim, false, None, 50, &mut toasts);
        assert!(sim.is_paused());
        pause(&mut sim, false, None, 50, &mut toasts);
        assert!(!sim.is_paused());
        assert_eq!(toasts.toasts.len(), 2);
        assert_eq!(toasts.toasts[1].text, "Running");
    }

    #[test]
    fn test_flip_bursts_at_center() {
        let mut sim = sim();
        let mut toasts = Toasts::default();
        flip(&mut sim, false, Some(Vec2::new(40.0, 40.0)), 50, &mut toasts);
        assert_eq!(sim.len(), 50);
        assert!(sim.particles().iter().all(|p| p.position == Vec2::ZERO));
    }

    #[test]
    fn test_gravity_keys() {
        let mut sim = sim();
        let mut toasts = Toasts::default();
        adj_gravity(&mut sim, true, None, 50, &mut toasts);
        assert!((sim.params().gravity - 0.14).abs() < 1e-6);
        adj_gravity(&mut sim, false, None, 50, &mut toasts);
        adj_gravity(&mut sim, false, None, 50, &mut toasts);
        assert!((sim.params().gravity - 0.10).abs() < 1e-6);
        assert_eq!(toasts.toasts.last().map(|t| t.text.as_str()), Some("Gravity: 0.10"));
    }

    #[test]
    fn test_help_lists_every_command() {
        let kb_cmds = KeyboardCommands::create();
        let help = kb_cmds.help_text();
        assert!(help.starts_with("Keyboard commands:"));
        for cmd in kb_cmds.commands.values() {
            assert!(help.contains(&cmd.description));
        }
    }
}
