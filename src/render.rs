//! Match frame rendering.
//!
//! The renderer is a pure consumer of `MatchState`: it owns the fonts and
//! the per-match avatar textures and turns the current state into draw
//! calls, so the simulation itself never touches the backend.

use crate::avatar;
use crate::config;
use crate::game::{MatchPhase, MatchState};
use crate::types::PlayerIdentity;
use crate::ui::{self, Fonts};
use macroquad::prelude::*;
use std::path::Path;

const W: f32 = config::WINDOW_WIDTH as f32;
const H: f32 = config::WINDOW_HEIGHT as f32;

/// Avatar textures for the two combatants, uploaded once per match.
pub struct AvatarSet {
    pub textures: [Texture2D; 2],
}

fn placeholder_image(slot: usize) -> Image {
    let color = match slot {
        0 => Color::from_rgba(130, 140, 150, 255),
        _ => Color::from_rgba(150, 120, 120, 255),
    };
    avatar::placeholder(config::AVATAR_SIZE, color)
}

async fn avatar_texture(identity: &PlayerIdentity, slot: usize) -> Texture2D {
    let image = match &identity.photo {
        Some(photo) => match load_image(photo).await {
            Ok(image) => avatar::circular(&image, config::AVATAR_SIZE),
            Err(e) => {
                log::warn!("Failed to load portrait {}: {}", photo, e);
                placeholder_image(slot)
            }
        },
        None => placeholder_image(slot),
    };
    Texture2D::from_image(&image)
}

/// Builds the avatar pair for a match, falling back to placeholder discs
/// for players without a loadable portrait.
pub async fn load_avatars(identities: &[PlayerIdentity; 2]) -> AvatarSet {
    let first = avatar_texture(&identities[0], 0).await;
    let second = avatar_texture(&identities[1], 1).await;
    AvatarSet {
        textures: [first, second],
    }
}

pub struct Renderer {
    pub fonts: Fonts,
}

impl Renderer {
    pub async fn load(assets_dir: &Path) -> Self {
        Renderer {
            fonts: Fonts::load(assets_dir).await,
        }
    }

    /// Draws one full match frame: HUD, pickups, aura, avatars, win banner.
    pub fn draw_match(&self, state: &MatchState, avatars: &AvatarSet) {
        clear_background(Color::from_rgba(14, 16, 22, 255));
        self.draw_hud(state);

        // Pickups
        ui::draw_heart(
            state.heart.pos.x,
            state.heart.pos.y,
            state.heart.size,
            Color::from_rgba(220, 40, 40, 255),
        );
        ui::draw_blade(
            state.blade.pos.x,
            state.blade.pos.y,
            state.blade.size,
            Color::from_rgba(245, 245, 245, 255),
        );

        // Aura behind the armed combatant, drawn before the avatars
        for fighter in &state.fighters {
            if fighter.armed {
                Self::draw_aura(fighter.pos, state.aura_angle);
            }
        }

        // Avatars on top
        let half = config::AVATAR_SIZE as f32 / 2.0;
        for (slot, fighter) in state.fighters.iter().enumerate() {
            draw_texture(
                &avatars.textures[slot],
                fighter.pos.x - half,
                fighter.pos.y - half,
                WHITE,
            );
        }

        draw_text_ex(
            "WASD | Arrows   ESC: Pause   R: Restart",
            20.0,
            H - 20.0,
            TextParams {
                font: self.fonts.body.as_ref(),
                font_size: ui::SMALL_FONT_SIZE,
                color: Color::from_rgba(170, 170, 170, 255),
                ..Default::default()
            },
        );

        if let MatchPhase::WinDisplay { winner, .. } = state.phase {
            self.draw_win_banner(&state.fighters[winner].name);
        }
    }

    fn draw_hud(&self, state: &MatchState) {
        draw_rectangle(0.0, 0.0, W, config::HUD_HEIGHT, Color::from_rgba(20, 22, 28, 255));

        let heart_color = Color::from_rgba(235, 60, 60, 255);

        // Left side: slot 0 name and hearts
        let left = &state.fighters[0];
        draw_text_ex(
            &left.name,
            24.0,
            44.0,
            TextParams {
                font: self.fonts.title.as_ref(),
                font_size: ui::TITLE_FONT_SIZE,
                color: left.color,
                ..Default::default()
            },
        );
        for i in 0..left.health.floor() as i32 {
            ui::draw_heart(24.0 + i as f32 * 34.0 + 2.0, 70.0, 14.0, heart_color);
        }

        // Right side: slot 1 name right-aligned, hearts growing leftwards
        let right = &state.fighters[1];
        let dims = measure_text(&right.name, self.fonts.title.as_ref(), ui::TITLE_FONT_SIZE, 1.0);
        draw_text_ex(
            &right.name,
            W - dims.width - 24.0,
            44.0,
            TextParams {
                font: self.fonts.title.as_ref(),
                font_size: ui::TITLE_FONT_SIZE,
                color: right.color,
                ..Default::default()
            },
        );
        for i in 0..right.health.floor() as i32 {
            ui::draw_heart(W - (i + 1) as f32 * 34.0 - 24.0, 70.0, 14.0, heart_color);
        }
    }

    // Six rotating spokes plus a core glow
    fn draw_aura(center: Vec2, angle_deg: f32) {
        let spoke_color = Color::from_rgba(200, 24, 24, 140);
        for k in 0..6 {
            let rad = (angle_deg + k as f32 * 60.0).to_radians();
            let dir = vec2(rad.cos(), rad.sin());
            let inner = center + dir * 36.0;
            let outer = center + dir * 72.0;
            draw_line(inner.x, inner.y, outer.x, outer.y, 3.0, spoke_color);
        }
        draw_circle(center.x, center.y, 12.0, Color::from_rgba(255, 120, 120, 120));
    }

    fn draw_win_banner(&self, name: &str) {
        draw_rectangle(0.0, 0.0, W, H, Color::from_rgba(6, 8, 10, 210));
        ui::draw_text_centered(
            &format!("{} Wins!", name),
            H / 2.0 - 20.0,
            ui::TITLE_FONT_SIZE,
            WHITE,
            self.fonts.title.as_ref(),
        );
        // The reset is timer driven; the button is a visual cue
        let rect = Rect::new(W / 2.0 - 120.0, H / 2.0 + 20.0, 240.0, 56.0);
        ui::rounded_rect(rect, 10.0, Color::from_rgba(30, 160, 120, 255));
        let dims = measure_text("Restart", self.fonts.body.as_ref(), ui::BODY_FONT_SIZE, 1.0);
        draw_text_ex(
            "Restart",
            rect.x + (rect.w - dims.width) / 2.0,
            rect.y + (rect.h + dims.height) / 2.0,
            TextParams {
                font: self.fonts.body.as_ref(),
                font_size: ui::BODY_FONT_SIZE,
                color: Color::from_rgba(245, 245, 245, 255),
                ..Default::default()
            },
        );
    }
}
