//! Live match state and the per-frame simulation step.
//!
//! `MatchState::update` is a pure function of state plus sampled input;
//! drawing happens separately in the renderer, so every rule here is
//! exercised headless by the tests below.

use crate::audio::AudioManager;
use crate::config;
use crate::input::{self, InputEvent, MatchInput};
use crate::render::{AvatarSet, Renderer};
use crate::screens::PauseOverlay;
use crate::types::{PauseAction, PlayerIdentity};
use ::rand::prelude::*;
use log::info;
use macroquad::prelude::*;

/// One of the two active players within a running match.
#[derive(Debug, Clone)]
pub struct Combatant {
    pub name: String,
    pub pos: Vec2,
    pub color: Color,
    pub health: f32,
    pub armed: bool,
}

impl Combatant {
    fn new(name: String, pos: Vec2, color: Color) -> Self {
        Combatant {
            name,
            pos,
            color,
            health: config::MAX_HEALTH,
            armed: false,
        }
    }
}

/// A collectible that grants an effect on contact and relocates afterward.
#[derive(Debug, Clone, Copy)]
pub struct Pickup {
    pub pos: Vec2,
    pub size: f32,
}

impl Pickup {
    /// A pickup at a uniformly random position within the spawn range.
    pub fn spawn(size: f32) -> Self {
        let mut rng = thread_rng();
        Pickup {
            pos: vec2(
                rng.gen_range(config::SPAWN_MIN_X..=config::SPAWN_MAX_X),
                rng.gen_range(config::SPAWN_MIN_Y..=config::SPAWN_MAX_Y),
            ),
            size,
        }
    }

    fn grab_radius(&self) -> f32 {
        self.size / 1.2 + config::PICKUP_GRAB_MARGIN
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchPhase {
    Playing,
    /// Win banner is showing; the match resets in place when it runs out.
    WinDisplay { winner: usize, remaining: f32 },
}

/// Gameplay effects produced by one update step, for sound and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchEvent {
    BladeTaken(usize),
    Healed(usize),
    Win(usize),
}

/// The complete state of a running match.
pub struct MatchState {
    pub fighters: [Combatant; 2],
    pub blade: Pickup,
    pub heart: Pickup,
    pub aura_angle: f32,
    pub paused: bool,
    pub phase: MatchPhase,
}

fn start_post(slot: usize) -> Vec2 {
    let mid_y = config::WINDOW_HEIGHT as f32 / 2.0;
    match slot {
        0 => vec2(180.0, mid_y),
        _ => vec2(config::WINDOW_WIDTH as f32 - 180.0, mid_y),
    }
}

fn slot_color(slot: usize) -> Color {
    match slot {
        0 => Color::from_rgba(70, 150, 230, 255),
        _ => Color::from_rgba(235, 80, 80, 255),
    }
}

/// Clamps a position into the playable rectangle.
pub fn clamp_to_play_area(pos: Vec2) -> Vec2 {
    vec2(
        pos.x.clamp(config::PLAY_MIN_X, config::PLAY_MAX_X),
        pos.y.clamp(config::PLAY_MIN_Y, config::PLAY_MAX_Y),
    )
}

impl MatchState {
    /// Builds a fresh match from two resolved player identities.
    pub fn new(identities: &[PlayerIdentity; 2]) -> Self {
        MatchState {
            fighters: [
                Combatant::new(identities[0].name.clone(), start_post(0), slot_color(0)),
                Combatant::new(identities[1].name.clone(), start_post(1), slot_color(1)),
            ],
            blade: Pickup::spawn(config::BLADE_SIZE),
            heart: Pickup::spawn(config::HEART_SIZE),
            aura_angle: 0.0,
            paused: false,
            phase: MatchPhase::Playing,
        }
    }

    /// Resets the match in place, keeping names and colors.
    pub fn reset(&mut self) {
        for (slot, fighter) in self.fighters.iter_mut().enumerate() {
            fighter.pos = start_post(slot);
            fighter.health = config::MAX_HEALTH;
            fighter.armed = false;
        }
        self.blade = Pickup::spawn(config::BLADE_SIZE);
        self.heart = Pickup::spawn(config::HEART_SIZE);
        self.aura_angle = 0.0;
        self.phase = MatchPhase::Playing;
    }

    /// Advances the simulation by `dt` seconds. No-op while paused; during
    /// the win banner only the banner timer runs.
    pub fn update(&mut self, dt: f32, input: &MatchInput) -> Vec<MatchEvent> {
        let mut events = Vec::new();
        if self.paused {
            return events;
        }

        if let MatchPhase::WinDisplay { remaining, winner } = self.phase {
            let remaining = remaining - dt;
            if remaining <= 0.0 {
                self.reset();
            } else {
                self.phase = MatchPhase::WinDisplay { winner, remaining };
            }
            return events;
        }

        self.aura_angle = (self.aura_angle + config::AURA_SPIN_DEG_PER_SEC * dt) % 360.0;

        // Movement, clamped to the playable rectangle
        let step = config::MOVE_SPEED * dt;
        for (fighter, held) in self.fighters.iter_mut().zip([input.p1, input.p2]) {
            if held.up {
                fighter.pos.y -= step;
            }
            if held.down {
                fighter.pos.y += step;
            }
            if held.left {
                fighter.pos.x -= step;
            }
            if held.right {
                fighter.pos.x += step;
            }
            fighter.pos = clamp_to_play_area(fighter.pos);
        }

        // Blade acquisition: armed state is mutually exclusive, grabbing
        // forcibly disarms the other combatant
        for slot in 0..2 {
            if self.fighters[slot].pos.distance(self.blade.pos) < self.blade.grab_radius() {
                self.fighters[slot].armed = true;
                self.fighters[1 - slot].armed = false;
                self.blade = Pickup::spawn(config::BLADE_SIZE);
                events.push(MatchEvent::BladeTaken(slot));
            }
        }

        // Heal acquisition
        for slot in 0..2 {
            if self.fighters[slot].pos.distance(self.heart.pos) < self.heart.grab_radius() {
                self.fighters[slot].health =
                    (self.fighters[slot].health + config::HEAL_AMOUNT).min(config::MAX_HEALTH);
                self.heart = Pickup::spawn(config::HEART_SIZE);
                events.push(MatchEvent::Healed(slot));
            }
        }

        // Melee: continuous drain while in contact, only when exactly one
        // side is armed
        let gap = self.fighters[0].pos.distance(self.fighters[1].pos);
        if gap < config::MELEE_RANGE {
            let drain = config::BLADE_DRAIN_PER_SEC * dt;
            if self.fighters[0].armed && !self.fighters[1].armed {
                self.fighters[1].health = (self.fighters[1].health - drain).max(0.0);
            } else if self.fighters[1].armed && !self.fighters[0].armed {
                self.fighters[0].health = (self.fighters[0].health - drain).max(0.0);
            }
        }

        // Win check ends the frame immediately
        if let Some(loser) = (0..2).find(|&slot| self.fighters[slot].health <= 0.0) {
            let winner = 1 - loser;
            self.phase = MatchPhase::WinDisplay {
                winner,
                remaining: config::WIN_BANNER_SECS,
            };
            events.push(MatchEvent::Win(winner));
        }

        events
    }
}

/// Drives a match to completion: simulation, pause handling, drawing.
/// Returns when the player chooses Main Menu from the pause overlay.
pub async fn run_match(
    state: &mut MatchState,
    avatars: &AvatarSet,
    renderer: &Renderer,
    audio: &AudioManager,
) {
    info!(
        "Match started: {} vs {}",
        state.fighters[0].name, state.fighters[1].name
    );
    let mut pause = PauseOverlay::new();

    loop {
        let now = get_time();
        for event in input::collect_events() {
            if event == InputEvent::Quit {
                std::process::exit(0);
            }
            if state.paused {
                if let Some(action) = pause.handle_event(&event, now) {
                    match action {
                        PauseAction::Resume => state.paused = false,
                        PauseAction::Restart => {
                            state.reset();
                            state.paused = false;
                        }
                        PauseAction::MainMenu => {
                            info!("Leaving match for the main menu");
                            return;
                        }
                    }
                } else if event == InputEvent::KeyDown(KeyCode::Escape) {
                    state.paused = false;
                }
            } else {
                match event {
                    InputEvent::KeyDown(KeyCode::Escape) => {
                        state.paused = true;
                        crate::debug_match!("Paused");
                    }
                    InputEvent::KeyDown(KeyCode::R) => {
                        state.reset();
                        crate::debug_match!("Manual restart");
                    }
                    _ => {}
                }
            }
        }

        let dt = get_frame_time();
        let movement = input::sample_movement();
        for event in state.update(dt, &movement) {
            match event {
                MatchEvent::BladeTaken(slot) => {
                    crate::debug_match!("{} took the blade", state.fighters[slot].name);
                    audio.play_blade();
                }
                MatchEvent::Healed(slot) => {
                    crate::debug_match!("{} picked up a heart", state.fighters[slot].name);
                    audio.play_heal();
                }
                MatchEvent::Win(slot) => {
                    info!("{} wins the round", state.fighters[slot].name);
                    audio.play_win();
                }
            }
        }

        renderer.draw_match(state, avatars);
        if state.paused {
            pause.draw(&renderer.fonts);
        }
        next_frame().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::HeldKeys;
    use assert_approx_eq::assert_approx_eq;

    fn identities() -> [PlayerIdentity; 2] {
        [
            PlayerIdentity {
                name: "Ann".to_string(),
                photo: None,
            },
            PlayerIdentity {
                name: "Ben".to_string(),
                photo: None,
            },
        ]
    }

    // A state with both pickups parked far from the fighters so tests only
    // trigger the mechanics they mean to.
    fn isolated_state() -> MatchState {
        let mut state = MatchState::new(&identities());
        state.blade.pos = vec2(config::SPAWN_MAX_X, config::SPAWN_MAX_Y);
        state.heart.pos = vec2(config::SPAWN_MIN_X, config::SPAWN_MAX_Y);
        state
    }

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_new_match_starts_full_health_unarmed() {
        let state = MatchState::new(&identities());
        for fighter in &state.fighters {
            assert_approx_eq!(fighter.health, config::MAX_HEALTH);
            assert!(!fighter.armed);
        }
        assert_eq!(state.fighters[0].name, "Ann");
        assert_eq!(state.fighters[1].name, "Ben");
        assert!(!state.paused);
        assert_eq!(state.phase, MatchPhase::Playing);
    }

    #[test]
    fn test_movement_displaces_and_clamps() {
        let mut state = isolated_state();
        let input = MatchInput {
            p1: HeldKeys {
                right: true,
                ..Default::default()
            },
            ..Default::default()
        };
        let x0 = state.fighters[0].pos.x;
        state.update(DT, &input);
        assert_approx_eq!(state.fighters[0].pos.x, x0 + config::MOVE_SPEED * DT, 1e-3);

        // Holding right for a long time pins the fighter at the boundary
        for _ in 0..2000 {
            state.update(DT, &input);
        }
        assert_approx_eq!(state.fighters[0].pos.x, config::PLAY_MAX_X);
        // Round-trip property: a clamped position clamps to itself
        assert_eq!(
            clamp_to_play_area(state.fighters[0].pos),
            state.fighters[0].pos
        );
    }

    #[test]
    fn test_blade_grab_is_mutually_exclusive() {
        let mut state = isolated_state();
        state.fighters[0].armed = true;
        state.blade.pos = state.fighters[1].pos;
        let old_blade = state.blade.pos;

        let events = state.update(0.0, &MatchInput::default());

        assert!(state.fighters[1].armed);
        assert!(!state.fighters[0].armed);
        assert!(events.contains(&MatchEvent::BladeTaken(1)));
        // The blade relocated somewhere else in the spawn range
        assert_ne!(state.blade.pos, old_blade);
        assert!(state.blade.pos.x >= config::SPAWN_MIN_X && state.blade.pos.x <= config::SPAWN_MAX_X);
        assert!(state.blade.pos.y >= config::SPAWN_MIN_Y && state.blade.pos.y <= config::SPAWN_MAX_Y);
    }

    #[test]
    fn test_at_most_one_armed_over_many_steps() {
        let mut state = isolated_state();
        // Alternate the blade onto each fighter repeatedly
        for round in 0..50 {
            let slot = round % 2;
            state.blade.pos = state.fighters[slot].pos;
            state.update(DT, &MatchInput::default());
            let armed_count = state.fighters.iter().filter(|f| f.armed).count();
            assert!(armed_count <= 1, "both fighters armed after round {}", round);
        }
    }

    #[test]
    fn test_heal_caps_at_max_health() {
        let mut state = isolated_state();
        state.fighters[0].health = 4.5;
        state.heart.pos = state.fighters[0].pos;

        let events = state.update(0.0, &MatchInput::default());

        assert_approx_eq!(state.fighters[0].health, config::MAX_HEALTH);
        assert!(events.contains(&MatchEvent::Healed(0)));
        // Heart relocated inside the spawn range
        assert!(state.heart.pos.y >= config::SPAWN_MIN_Y && state.heart.pos.y <= config::SPAWN_MAX_Y);
    }

    #[test]
    fn test_pickup_respawn_varies_position() {
        let mut seen = std::collections::HashSet::new();
        for _ in 0..50 {
            let pickup = Pickup::spawn(config::BLADE_SIZE);
            seen.insert((pickup.pos.x as i32, pickup.pos.y as i32));
        }
        // Uniform respawn over the full range collides vanishingly rarely
        assert!(seen.len() > 40);
    }

    #[test]
    fn test_contact_without_blade_is_harmless() {
        let mut state = isolated_state();
        state.fighters[1].pos = state.fighters[0].pos + vec2(10.0, 0.0);
        for _ in 0..60 {
            state.update(DT, &MatchInput::default());
        }
        assert_approx_eq!(state.fighters[0].health, config::MAX_HEALTH);
        assert_approx_eq!(state.fighters[1].health, config::MAX_HEALTH);
    }

    #[test]
    fn test_armed_contact_drains_at_fixed_rate() {
        let mut state = isolated_state();
        state.fighters[0].armed = true;
        state.fighters[1].pos = state.fighters[0].pos + vec2(10.0, 0.0);

        // Half a second of contact at 60 Hz
        for _ in 0..30 {
            state.update(DT, &MatchInput::default());
        }
        let expected = config::MAX_HEALTH - config::BLADE_DRAIN_PER_SEC * 0.5;
        assert_approx_eq!(state.fighters[1].health, expected, 1e-3);
        // The armed fighter is untouched
        assert_approx_eq!(state.fighters[0].health, config::MAX_HEALTH);
    }

    #[test]
    fn test_full_second_of_contact_clamps_to_zero_and_wins() {
        let mut state = isolated_state();
        state.fighters[0].armed = true;
        state.fighters[1].pos = state.fighters[0].pos + vec2(10.0, 0.0);

        let mut win = None;
        for _ in 0..60 {
            for event in state.update(DT, &MatchInput::default()) {
                if let MatchEvent::Win(slot) = event {
                    win = Some(slot);
                }
            }
        }
        // 60 * 0.09 = 5.4 > 5.0: the drain bottoms out at zero and the
        // armed fighter is declared winner
        assert_approx_eq!(state.fighters[1].health, 0.0);
        assert_eq!(win, Some(0));
        assert!(matches!(state.phase, MatchPhase::WinDisplay { winner: 0, .. }));
    }

    #[test]
    fn test_health_never_leaves_range() {
        let mut state = isolated_state();
        state.fighters[0].armed = true;
        state.fighters[1].pos = state.fighters[0].pos + vec2(10.0, 0.0);
        for _ in 0..600 {
            state.update(DT, &MatchInput::default());
            for fighter in &state.fighters {
                assert!(fighter.health >= 0.0 && fighter.health <= config::MAX_HEALTH);
            }
        }
    }

    #[test]
    fn test_win_banner_runs_out_then_resets_in_place() {
        let mut state = isolated_state();
        state.fighters[1].health = 0.05;
        state.fighters[0].armed = true;
        state.fighters[1].pos = state.fighters[0].pos + vec2(10.0, 0.0);

        state.update(DT, &MatchInput::default());
        assert!(matches!(state.phase, MatchPhase::WinDisplay { winner: 0, .. }));

        // Simulation is frozen during the banner
        let pos_before = state.fighters[0].pos;
        let input = MatchInput {
            p1: HeldKeys {
                left: true,
                ..Default::default()
            },
            ..Default::default()
        };
        state.update(DT, &input);
        assert_eq!(state.fighters[0].pos, pos_before);

        // After the banner delay the match resets, identities preserved
        state.update(config::WIN_BANNER_SECS, &MatchInput::default());
        assert_eq!(state.phase, MatchPhase::Playing);
        assert_eq!(state.fighters[0].name, "Ann");
        for fighter in &state.fighters {
            assert_approx_eq!(fighter.health, config::MAX_HEALTH);
            assert!(!fighter.armed);
        }
    }

    #[test]
    fn test_reset_restores_posts_and_clears_armed() {
        let mut state = isolated_state();
        state.fighters[0].pos = vec2(500.0, 300.0);
        state.fighters[0].armed = true;
        state.fighters[0].health = 1.25;
        state.fighters[1].health = 0.5;

        state.reset();

        assert_eq!(state.fighters[0].pos, start_post(0));
        assert_eq!(state.fighters[1].pos, start_post(1));
        for fighter in &state.fighters {
            assert_approx_eq!(fighter.health, config::MAX_HEALTH);
            assert!(!fighter.armed);
        }
        assert_eq!(state.fighters[0].name, "Ann");
        assert_eq!(state.fighters[1].name, "Ben");
    }

    #[test]
    fn test_paused_state_does_not_advance() {
        let mut state = isolated_state();
        state.paused = true;
        state.fighters[0].armed = true;
        state.fighters[1].pos = state.fighters[0].pos + vec2(10.0, 0.0);
        let input = MatchInput {
            p1: HeldKeys {
                right: true,
                ..Default::default()
            },
            ..Default::default()
        };

        let events = state.update(DT, &input);

        assert!(events.is_empty());
        assert_eq!(state.fighters[0].pos, start_post(0));
        assert_approx_eq!(state.fighters[1].health, config::MAX_HEALTH);
    }

    #[test]
    fn test_positions_stay_clamped_every_frame() {
        let mut state = isolated_state();
        let input = MatchInput {
            p1: HeldKeys {
                up: true,
                left: true,
                ..Default::default()
            },
            p2: HeldKeys {
                down: true,
                right: true,
                ..Default::default()
            },
        };
        for _ in 0..1200 {
            state.update(DT, &input);
            for fighter in &state.fighters {
                assert_eq!(clamp_to_play_area(fighter.pos), fighter.pos);
            }
        }
        assert_eq!(state.fighters[0].pos, vec2(config::PLAY_MIN_X, config::PLAY_MIN_Y));
        assert_eq!(state.fighters[1].pos, vec2(config::PLAY_MAX_X, config::PLAY_MAX_Y));
    }
}
