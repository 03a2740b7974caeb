//! UI widgets and drawing primitives shared by every screen.

use crate::config;
use crate::input::InputEvent;
use crate::roster::PlayerRecord;
use macroquad::prelude::*;
use std::path::Path;

pub const TITLE_FONT_SIZE: u16 = 30;
pub const BODY_FONT_SIZE: u16 = 18;
pub const SMALL_FONT_SIZE: u16 = 14;

/// TTF fonts loaded from the assets directory; `None` falls back to the
/// built-in font.
pub struct Fonts {
    pub title: Option<Font>,
    pub body: Option<Font>,
}

impl Fonts {
    pub async fn load(assets_dir: &Path) -> Self {
        let title = match load_ttf_font(&assets_dir.join("title.ttf").to_string_lossy()).await {
            Ok(font) => Some(font),
            Err(e) => {
                log::warn!("Failed to load title font: {}", e);
                None
            }
        };
        let body = match load_ttf_font(&assets_dir.join("default.ttf").to_string_lossy()).await {
            Ok(font) => Some(font),
            Err(e) => {
                log::warn!("Failed to load UI font: {}", e);
                None
            }
        };
        Fonts { title, body }
    }
}

/// Filled rectangle with rounded corners.
pub fn rounded_rect(rect: Rect, radius: f32, color: Color) {
    let r = radius.min(rect.w / 2.0).min(rect.h / 2.0);
    draw_rectangle(rect.x + r, rect.y, rect.w - 2.0 * r, rect.h, color);
    draw_rectangle(rect.x, rect.y + r, rect.w, rect.h - 2.0 * r, color);
    draw_circle(rect.x + r, rect.y + r, r, color);
    draw_circle(rect.x + rect.w - r, rect.y + r, r, color);
    draw_circle(rect.x + r, rect.y + rect.h - r, r, color);
    draw_circle(rect.x + rect.w - r, rect.y + rect.h - r, r, color);
}

/// Text centered horizontally on the window, `y` is the baseline.
pub fn draw_text_centered(text: &str, y: f32, size: u16, color: Color, font: Option<&Font>) {
    let dims = measure_text(text, font, size, 1.0);
    draw_text_ex(
        text,
        (config::WINDOW_WIDTH as f32 - dims.width) / 2.0,
        y,
        TextParams {
            font,
            font_size: size,
            color,
            ..Default::default()
        },
    );
}

/// The heal pickup / HUD heart glyph.
pub fn draw_heart(x: f32, y: f32, size: f32, color: Color) {
    let r = size * 0.45;
    draw_circle(x - r / 2.0, y - r / 2.0, r, color);
    draw_circle(x + r / 2.0, y - r / 2.0, r, color);
    draw_triangle(
        vec2(x - size, y),
        vec2(x + size, y),
        vec2(x, y + size * 1.15),
        color,
    );
}

/// The blade pickup glyph, an upward triangle.
pub fn draw_blade(x: f32, y: f32, size: f32, color: Color) {
    let h = size * 0.866;
    draw_triangle(
        vec2(x, y - 2.0 * h / 3.0),
        vec2(x - size / 2.0, y + h / 3.0),
        vec2(x + size / 2.0, y + h / 3.0),
        color,
    );
}

/// A clickable button with hover tracking and click debouncing: a second
/// activation within the debounce window is ignored, so one physical click
/// never registers twice across overlapping event queues.
pub struct Button {
    pub rect: Rect,
    pub label: String,
    pub primary: bool,
    pub hover: bool,
    last_click: f64,
}

impl Button {
    pub fn new(rect: Rect, label: impl Into<String>, primary: bool) -> Self {
        Button {
            rect,
            label: label.into(),
            primary,
            hover: false,
            last_click: f64::NEG_INFINITY,
        }
    }

    /// Returns true when the event is an accepted activation of this button.
    pub fn handle_event(&mut self, event: &InputEvent, now: f64) -> bool {
        match *event {
            InputEvent::PointerMove { x, y } => {
                self.hover = self.rect.contains(vec2(x, y));
                false
            }
            InputEvent::PointerUp { x, y } => {
                if self.rect.contains(vec2(x, y))
                    && now - self.last_click > config::BUTTON_DEBOUNCE_SECS
                {
                    self.last_click = now;
                    true
                } else {
                    false
                }
            }
            _ => false,
        }
    }

    pub fn draw(&self, fonts: &Fonts) {
        let bg = if self.primary {
            Color::from_rgba(30, 160, 120, 255)
        } else if self.hover {
            Color::from_rgba(58, 62, 74, 255)
        } else {
            Color::from_rgba(40, 44, 54, 255)
        };
        rounded_rect(self.rect, 10.0, bg);
        let font = fonts.body.as_ref();
        let dims = measure_text(&self.label, font, BODY_FONT_SIZE, 1.0);
        draw_text_ex(
            &self.label,
            self.rect.x + (self.rect.w - dims.width) / 2.0,
            self.rect.y + (self.rect.h + dims.height) / 2.0,
            TextParams {
                font,
                font_size: BODY_FONT_SIZE,
                color: Color::from_rgba(245, 245, 245, 255),
                ..Default::default()
            },
        );
    }
}

/// What a pointer release over a roster card means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    Select,
    Delete,
}

/// One roster entry rendered as a selectable card with an inline delete
/// button. The stored rect is the unscrolled position; the current scroll
/// offset is applied for both drawing and hit testing.
pub struct Card {
    pub rect: Rect,
    pub record: PlayerRecord,
    pub hover: bool,
    pub del_hover: bool,
    pub thumb: Option<Texture2D>,
}

impl Card {
    pub fn new(rect: Rect, record: PlayerRecord, thumb: Option<Texture2D>) -> Self {
        Card {
            rect,
            record,
            hover: false,
            del_hover: false,
            thumb,
        }
    }

    fn scrolled(&self, scroll: f32) -> Rect {
        self.rect.offset(vec2(0.0, scroll))
    }

    fn del_rect(&self, scroll: f32) -> Rect {
        let rect = self.scrolled(scroll);
        Rect::new(rect.x + rect.w - 36.0, rect.y + 8.0, 28.0, 28.0)
    }

    pub fn update_hover(&mut self, x: f32, y: f32, scroll: f32) {
        let p = vec2(x, y);
        self.hover = self.scrolled(scroll).contains(p);
        self.del_hover = self.del_rect(scroll).contains(p);
    }

    /// Hit test for a pointer release. The delete button wins over the card.
    pub fn hit(&self, x: f32, y: f32, scroll: f32) -> Option<CardAction> {
        let p = vec2(x, y);
        if self.del_rect(scroll).contains(p) {
            Some(CardAction::Delete)
        } else if self.scrolled(scroll).contains(p) {
            Some(CardAction::Select)
        } else {
            None
        }
    }

    pub fn draw(&self, fonts: &Fonts, scroll: f32) {
        let rect = self.scrolled(scroll);
        rounded_rect(rect, 12.0, Color::from_rgba(28, 30, 36, 255));
        if self.hover {
            draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 2.0, Color::from_rgba(80, 90, 110, 255));
        }

        // Avatar thumb, or a neutral disc when the photo failed to load
        let thumb_size = config::CARD_THUMB_SIZE as f32;
        match &self.thumb {
            Some(texture) => {
                draw_texture(texture, rect.x + 12.0, rect.y + (rect.h - thumb_size) / 2.0, WHITE);
            }
            None => {
                draw_circle(rect.x + 52.0, rect.y + rect.h / 2.0, 40.0, Color::from_rgba(90, 90, 100, 255));
            }
        }

        draw_text_ex(
            &self.record.name,
            rect.x + 110.0,
            rect.y + 46.0,
            TextParams {
                font: fonts.title.as_ref(),
                font_size: TITLE_FONT_SIZE,
                color: Color::from_rgba(230, 230, 230, 255),
                ..Default::default()
            },
        );
        let created: String = self.record.created.chars().take(10).collect();
        draw_text_ex(
            &format!("Added: {}", created),
            rect.x + 110.0,
            rect.y + 74.0,
            TextParams {
                font: fonts.body.as_ref(),
                font_size: SMALL_FONT_SIZE,
                color: Color::from_rgba(170, 170, 170, 255),
                ..Default::default()
            },
        );

        // Delete button
        let del = self.del_rect(scroll);
        let del_bg = if self.del_hover {
            Color::from_rgba(200, 50, 50, 255)
        } else {
            Color::from_rgba(160, 40, 40, 255)
        };
        rounded_rect(del, 6.0, del_bg);
        draw_text_ex(
            "Del",
            del.x + 4.0,
            del.y + 19.0,
            TextParams {
                font: fonts.body.as_ref(),
                font_size: SMALL_FONT_SIZE,
                color: Color::from_rgba(245, 245, 245, 255),
                ..Default::default()
            },
        );
    }
}
