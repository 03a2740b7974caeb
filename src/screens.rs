//! Screen navigator: menu, roster, modals and the pause overlay.
//!
//! Each screen is a state struct whose `handle_event` is a pure transition
//! function from input events to an outcome, with drawing kept separate.
//! The async drivers below feed backend events to the screens and block
//! their caller until the screen resolves, so screens stay modal for their
//! callers while every transition table remains unit-testable.

use crate::avatar;
use crate::capture::{CaptureOutcome, PortraitSource};
use crate::config;
use crate::input::{self, InputEvent};
use crate::roster::Roster;
use crate::types::{MenuAction, PauseAction, PlayerIdentity};
use crate::ui::{self, Button, Card, CardAction, Fonts};
use ::rand::prelude::*;
use macroquad::prelude::*;
use std::path::{Path, PathBuf};
use std::process;

const W: f32 = config::WINDOW_WIDTH as f32;
const H: f32 = config::WINDOW_HEIGHT as f32;

fn overlay() {
    draw_rectangle(0.0, 0.0, W, H, Color::from_rgba(0, 0, 0, 160));
}

fn modal_box() -> Rect {
    Rect::new(W / 2.0 - 320.0, H / 2.0 - 80.0, 640.0, 160.0)
}

// ---------------- Main menu ----------------

pub struct MainMenuScreen {
    buttons: Vec<(Button, MenuAction)>,
}

impl MainMenuScreen {
    pub fn new() -> Self {
        let buttons = vec![
            (
                Button::new(Rect::new(W / 2.0 - 150.0, 200.0, 300.0, 64.0), "Quick Start", true),
                MenuAction::QuickStart,
            ),
            (
                Button::new(Rect::new(W / 2.0 - 150.0, 290.0, 300.0, 54.0), "Player Select", false),
                MenuAction::PlayerSelect,
            ),
            (
                Button::new(Rect::new(W / 2.0 - 150.0, 354.0, 300.0, 54.0), "Settings", false),
                MenuAction::Settings,
            ),
            (
                Button::new(Rect::new(W / 2.0 - 150.0, 418.0, 300.0, 54.0), "Credits", false),
                MenuAction::Credits,
            ),
            (
                Button::new(Rect::new(W / 2.0 - 150.0, 482.0, 300.0, 54.0), "Quit", false),
                MenuAction::Quit,
            ),
        ];
        MainMenuScreen { buttons }
    }

    pub fn handle_event(&mut self, event: &InputEvent, now: f64) -> Option<MenuAction> {
        for (button, action) in &mut self.buttons {
            if button.handle_event(event, now) {
                return Some(*action);
            }
        }
        None
    }

    pub fn draw(&self, fonts: &Fonts) {
        clear_background(Color::from_rgba(10, 12, 18, 255));
        ui::draw_text_centered("Blade Arena", 102.0, ui::TITLE_FONT_SIZE, WHITE, fonts.title.as_ref());
        for (button, _) in &self.buttons {
            button.draw(fonts);
        }
    }
}

pub async fn main_menu(fonts: &Fonts) -> MenuAction {
    let mut screen = MainMenuScreen::new();
    loop {
        let now = get_time();
        for event in input::collect_events() {
            if matches!(event, InputEvent::Quit) {
                process::exit(0);
            }
            if let Some(action) = screen.handle_event(&event, now) {
                crate::debug_ui!("Main menu -> {:?}", action);
                if action == MenuAction::Quit {
                    process::exit(0);
                }
                return action;
            }
        }
        screen.draw(fonts);
        next_frame().await;
    }
}

// ---------------- Name entry modal ----------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameEntryOutcome {
    Confirmed(String),
    Cancelled,
}

pub struct NameEntryScreen {
    pub prompt: String,
    pub value: String,
}

impl NameEntryScreen {
    pub fn new(prompt: impl Into<String>) -> Self {
        NameEntryScreen {
            prompt: prompt.into(),
            value: String::new(),
        }
    }

    pub fn handle_event(&mut self, event: &InputEvent) -> Option<NameEntryOutcome> {
        match *event {
            InputEvent::KeyDown(KeyCode::Enter | KeyCode::KpEnter) => {
                let trimmed = self.value.trim();
                if trimmed.is_empty() {
                    None // Enter is a no-op until there is a name
                } else {
                    Some(NameEntryOutcome::Confirmed(trimmed.to_string()))
                }
            }
            InputEvent::KeyDown(KeyCode::Escape) => Some(NameEntryOutcome::Cancelled),
            InputEvent::KeyDown(KeyCode::Backspace) => {
                self.value.pop();
                None
            }
            InputEvent::Char(ch) => {
                if self.value.chars().count() < config::NAME_MAX_LEN {
                    self.value.push(ch);
                }
                None
            }
            _ => None,
        }
    }

    pub fn draw(&self, fonts: &Fonts, now: f64) {
        clear_background(Color::from_rgba(12, 14, 20, 255));
        overlay();
        let rect = modal_box();
        ui::rounded_rect(rect, 12.0, Color::from_rgba(26, 28, 34, 255));
        ui::draw_text_centered(&self.prompt, H / 2.0 - 30.0, ui::TITLE_FONT_SIZE, WHITE, fonts.title.as_ref());

        let caret = if now.fract() < 0.5 { "|" } else { "" };
        draw_text_ex(
            &format!("{}{}", self.value, caret),
            rect.x + 40.0,
            H / 2.0 + 15.0,
            TextParams {
                font: fonts.body.as_ref(),
                font_size: ui::BODY_FONT_SIZE,
                color: Color::from_rgba(230, 230, 230, 255),
                ..Default::default()
            },
        );
        draw_text_ex(
            "Enter = OK. Esc = Cancel",
            rect.x + 40.0,
            rect.y + rect.h - 24.0,
            TextParams {
                font: fonts.body.as_ref(),
                font_size: ui::SMALL_FONT_SIZE,
                color: Color::from_rgba(150, 150, 150, 255),
                ..Default::default()
            },
        );
    }
}

pub async fn name_entry(prompt: &str, fonts: &Fonts) -> Option<String> {
    let mut screen = NameEntryScreen::new(prompt);
    loop {
        let now = get_time();
        for event in input::collect_events() {
            if matches!(event, InputEvent::Quit) {
                process::exit(0);
            }
            match screen.handle_event(&event) {
                Some(NameEntryOutcome::Confirmed(name)) => return Some(name),
                Some(NameEntryOutcome::Cancelled) => return None,
                None => {}
            }
        }
        screen.draw(fonts, now);
        next_frame().await;
    }
}

// ---------------- Confirm delete modal ----------------

pub struct ConfirmDeleteScreen {
    pub prompt: String,
    confirm: Button,
    cancel: Button,
}

impl ConfirmDeleteScreen {
    // Neither button starts highlighted; hover appears only once the
    // pointer actually moves over one.
    pub fn new(prompt: impl Into<String>) -> Self {
        ConfirmDeleteScreen {
            prompt: prompt.into(),
            confirm: Button::new(Rect::new(W / 2.0 - 140.0, H / 2.0 + 10.0, 120.0, 42.0), "Delete", true),
            cancel: Button::new(Rect::new(W / 2.0 + 20.0, H / 2.0 + 10.0, 120.0, 42.0), "Cancel", false),
        }
    }

    pub fn handle_event(&mut self, event: &InputEvent, now: f64) -> Option<bool> {
        if self.confirm.handle_event(event, now) {
            return Some(true);
        }
        if self.cancel.handle_event(event, now) {
            return Some(false);
        }
        None
    }

    pub fn draw(&self, fonts: &Fonts) {
        clear_background(Color::from_rgba(12, 14, 20, 255));
        overlay();
        let rect = modal_box();
        ui::rounded_rect(rect, 12.0, Color::from_rgba(26, 28, 34, 255));
        ui::draw_text_centered(&self.prompt, H / 2.0 - 20.0, ui::TITLE_FONT_SIZE, WHITE, fonts.title.as_ref());
        self.confirm.draw(fonts);
        self.cancel.draw(fonts);
    }
}

pub async fn confirm_delete(prompt: &str, fonts: &Fonts) -> bool {
    let mut screen = ConfirmDeleteScreen::new(prompt);
    loop {
        let now = get_time();
        for event in input::collect_events() {
            if matches!(event, InputEvent::Quit) {
                process::exit(0);
            }
            if let Some(confirmed) = screen.handle_event(&event, now) {
                return confirmed;
            }
        }
        screen.draw(fonts);
        next_frame().await;
    }
}

// ---------------- Settings ----------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsOutcome {
    ToggleMusic,
    Back,
}

pub struct SettingsScreen {
    pub music_on: bool,
    toggle: Button,
    back: Button,
}

impl SettingsScreen {
    pub fn new(music_on: bool) -> Self {
        let mut screen = SettingsScreen {
            music_on,
            toggle: Button::new(Rect::new(W / 2.0 - 120.0, 150.0, 240.0, 50.0), "", false),
            back: Button::new(Rect::new(W / 2.0 - 70.0, H - 90.0, 140.0, 44.0), "Back", false),
        };
        screen.set_music(music_on);
        screen
    }

    pub fn set_music(&mut self, on: bool) {
        self.music_on = on;
        self.toggle.label = format!("Music: {}", if on { "ON" } else { "OFF" });
    }

    pub fn handle_event(&mut self, event: &InputEvent, now: f64) -> Option<SettingsOutcome> {
        if self.toggle.handle_event(event, now) {
            return Some(SettingsOutcome::ToggleMusic);
        }
        if self.back.handle_event(event, now) {
            return Some(SettingsOutcome::Back);
        }
        None
    }

    pub fn draw(&self, fonts: &Fonts) {
        clear_background(Color::from_rgba(10, 10, 14, 255));
        ui::draw_text_centered("Settings", 90.0, ui::TITLE_FONT_SIZE, WHITE, fonts.title.as_ref());
        self.toggle.draw(fonts);
        self.back.draw(fonts);
    }
}

pub async fn settings(fonts: &Fonts, audio: &mut crate::audio::AudioManager) {
    let mut screen = SettingsScreen::new(audio.music_enabled());
    loop {
        let now = get_time();
        for event in input::collect_events() {
            if matches!(event, InputEvent::Quit) {
                process::exit(0);
            }
            match screen.handle_event(&event, now) {
                Some(SettingsOutcome::ToggleMusic) => {
                    audio.toggle_music();
                    screen.set_music(audio.music_enabled());
                    crate::debug_ui!("Music toggled {}", if screen.music_on { "on" } else { "off" });
                }
                Some(SettingsOutcome::Back) => return,
                None => {}
            }
        }
        screen.draw(fonts);
        next_frame().await;
    }
}

// ---------------- Credits ----------------

const CREDIT_LINES: [&str; 4] = [
    "Made with Rust and macroquad",
    "Portrait capture + local player roster",
    "Controls: Player1 - WASD | Player2 - Arrow keys",
    "ESC - Pause | R - Restart",
];

pub struct CreditsScreen {
    back: Button,
}

impl CreditsScreen {
    pub fn new() -> Self {
        CreditsScreen {
            back: Button::new(Rect::new(W / 2.0 - 70.0, H - 90.0, 140.0, 44.0), "Back", false),
        }
    }

    /// Returns true when the screen is done.
    pub fn handle_event(&mut self, event: &InputEvent, now: f64) -> bool {
        self.back.handle_event(event, now)
    }

    pub fn draw(&self, fonts: &Fonts) {
        clear_background(Color::from_rgba(10, 10, 14, 255));
        ui::draw_text_centered("Credits & Info", 90.0, ui::TITLE_FONT_SIZE, WHITE, fonts.title.as_ref());
        for (index, line) in CREDIT_LINES.iter().enumerate() {
            ui::draw_text_centered(
                line,
                170.0 + index as f32 * 28.0,
                ui::BODY_FONT_SIZE,
                Color::from_rgba(245, 245, 245, 255),
                fonts.body.as_ref(),
            );
        }
        self.back.draw(fonts);
    }
}

pub async fn credits(fonts: &Fonts) {
    let mut screen = CreditsScreen::new();
    loop {
        let now = get_time();
        for event in input::collect_events() {
            if matches!(event, InputEvent::Quit) {
                process::exit(0);
            }
            if screen.handle_event(&event, now) {
                return;
            }
        }
        screen.draw(fonts);
        next_frame().await;
    }
}

// ---------------- Roster select ----------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterOutcome {
    Select(usize),
    DeleteRequest(usize),
    CreateNew,
    Back,
}

/// Grid position for the card at `index`, three per row.
pub fn card_rect(index: usize) -> Rect {
    let per_row = config::CARDS_PER_ROW;
    let row_width =
        config::CARD_WIDTH * per_row as f32 + config::CARD_PADDING * (per_row as f32 - 1.0);
    let x0 = (W - row_width) / 2.0;
    let col = index % per_row;
    let row = index / per_row;
    Rect::new(
        x0 + col as f32 * (config::CARD_WIDTH + config::CARD_PADDING),
        config::ROSTER_TOP_MARGIN + row as f32 * (config::CARD_HEIGHT + config::CARD_PADDING),
        config::CARD_WIDTH,
        config::CARD_HEIGHT,
    )
}

pub struct RosterSelectScreen {
    pub slot: usize,
    pub cards: Vec<Card>,
    pub scroll: f32,
    back: Button,
    create: Button,
    dragging: bool,
    drag_last_y: f32,
}

impl RosterSelectScreen {
    pub fn new(slot: usize, cards: Vec<Card>) -> Self {
        RosterSelectScreen {
            slot,
            cards,
            scroll: 0.0,
            back: Button::new(Rect::new(18.0, 18.0, 120.0, 44.0), "Back", false),
            create: Button::new(Rect::new(W - 170.0, 18.0, 150.0, 44.0), "Create New", true),
            dragging: false,
            drag_last_y: 0.0,
        }
    }

    fn content_height(&self) -> f32 {
        let per_row = config::CARDS_PER_ROW;
        let rows = (self.cards.len() + per_row - 1) / per_row;
        rows as f32 * (config::CARD_HEIGHT + config::CARD_PADDING)
    }

    /// Lowest allowed scroll offset; content never scrolls past its bottom.
    pub fn min_scroll(&self) -> f32 {
        (H - config::ROSTER_TOP_MARGIN - self.content_height() - config::ROSTER_BOTTOM_MARGIN)
            .min(0.0)
    }

    fn clamp_scroll(&mut self) {
        self.scroll = self.scroll.clamp(self.min_scroll(), 0.0);
    }

    pub fn handle_event(&mut self, event: &InputEvent, now: f64) -> Option<RosterOutcome> {
        if self.back.handle_event(event, now) {
            return Some(RosterOutcome::Back);
        }
        if self.create.handle_event(event, now) {
            return Some(RosterOutcome::CreateNew);
        }
        match *event {
            InputEvent::PointerDown { y, .. } => {
                self.dragging = true;
                self.drag_last_y = y;
            }
            InputEvent::PointerUp { x, y } => {
                self.dragging = false;
                for (index, card) in self.cards.iter().enumerate() {
                    match card.hit(x, y, self.scroll) {
                        Some(CardAction::Delete) => return Some(RosterOutcome::DeleteRequest(index)),
                        Some(CardAction::Select) => return Some(RosterOutcome::Select(index)),
                        None => {}
                    }
                }
            }
            InputEvent::PointerMove { x, y } => {
                if self.dragging {
                    self.scroll += y - self.drag_last_y;
                    self.drag_last_y = y;
                    self.clamp_scroll();
                }
                for card in &mut self.cards {
                    card.update_hover(x, y, self.scroll);
                }
            }
            InputEvent::Wheel { dy } => {
                self.scroll += dy.signum() * config::WHEEL_SCROLL_STEP;
                self.clamp_scroll();
            }
            _ => {}
        }
        None
    }

    pub fn draw(&self, fonts: &Fonts) {
        clear_background(Color::from_rgba(12, 14, 20, 255));
        ui::draw_text_centered(
            &format!("Select Player {}", self.slot + 1),
            68.0,
            ui::TITLE_FONT_SIZE,
            WHITE,
            fonts.title.as_ref(),
        );
        self.back.draw(fonts);
        self.create.draw(fonts);
        for card in &self.cards {
            card.draw(fonts, self.scroll);
        }
        ui::draw_text_centered(
            "Click card to select. 'Del' to remove. Drag/scroll to view.",
            H - 18.0,
            ui::SMALL_FONT_SIZE,
            Color::from_rgba(160, 160, 160, 255),
            fonts.body.as_ref(),
        );
    }
}

async fn load_card_thumb(photo: &str) -> Option<Texture2D> {
    match load_image(photo).await {
        Ok(image) => Some(Texture2D::from_image(&avatar::circular(
            &image,
            config::CARD_THUMB_SIZE,
        ))),
        Err(e) => {
            crate::debug_ui!("No thumbnail for {}: {}", photo, e);
            None
        }
    }
}

fn portrait_path(assets_dir: &Path, name: &str) -> PathBuf {
    let mut rng = thread_rng();
    assets_dir.join(format!("{}_{}.jpg", name, rng.gen_range(1000..10000)))
}

// Create-new flow: name entry, then capture. Cancellation at either step
// resolves to None and the roster screen stays active.
async fn create_player(
    slot: usize,
    roster: &Roster,
    capture: &dyn PortraitSource,
    fonts: &Fonts,
    assets_dir: &Path,
) -> Option<PlayerIdentity> {
    let name = name_entry(&format!("Enter name for Player {}", slot + 1), fonts).await?;
    let photo_path = portrait_path(assets_dir, &name);
    match capture.acquire(&name, &photo_path) {
        CaptureOutcome::Captured => {
            let photo = photo_path.to_string_lossy().into_owned();
            if let Err(e) = roster.append(&name, &photo) {
                log::error!("Failed to save record for {}: {}", name, e);
            }
            Some(PlayerIdentity {
                name,
                photo: Some(photo),
            })
        }
        CaptureOutcome::Cancelled => None,
    }
}

/// Roster selection for one slot. Returns None when the user backs out;
/// the caller substitutes the fallback identity.
pub async fn roster_select(
    slot: usize,
    roster: &Roster,
    capture: &dyn PortraitSource,
    fonts: &Fonts,
    assets_dir: &Path,
) -> Option<PlayerIdentity> {
    'reload: loop {
        // Fresh read on every entry so deletes are observed immediately
        let records = match roster.list() {
            Ok(records) => records,
            Err(e) => {
                log::error!("Failed to read player store: {}", e);
                Vec::new()
            }
        };
        let mut cards = Vec::with_capacity(records.len());
        for (index, record) in records.into_iter().enumerate() {
            let thumb = load_card_thumb(&record.photo).await;
            cards.push(Card::new(card_rect(index), record, thumb));
        }
        let mut screen = RosterSelectScreen::new(slot, cards);

        loop {
            let now = get_time();
            for event in input::collect_events() {
                if matches!(event, InputEvent::Quit) {
                    process::exit(0);
                }
                match screen.handle_event(&event, now) {
                    Some(RosterOutcome::Back) => return None,
                    Some(RosterOutcome::Select(index)) => {
                        let record = &screen.cards[index].record;
                        crate::debug_ui!("Slot {} selected {}", slot + 1, record.name);
                        return Some(PlayerIdentity {
                            name: record.name.clone(),
                            photo: Some(record.photo.clone()),
                        });
                    }
                    Some(RosterOutcome::CreateNew) => {
                        if let Some(identity) =
                            create_player(slot, roster, capture, fonts, assets_dir).await
                        {
                            return Some(identity);
                        }
                        continue 'reload;
                    }
                    Some(RosterOutcome::DeleteRequest(index)) => {
                        let record = screen.cards[index].record.clone();
                        let prompt = format!("Delete {}? This removes their photo.", record.name);
                        if confirm_delete(&prompt, fonts).await {
                            if let Err(e) = roster.delete_by_photo(&record.photo) {
                                log::error!("Failed to delete {}: {}", record.name, e);
                            }
                        }
                        // Rebuild from the store either way; stale cards are
                        // never consulted again
                        continue 'reload;
                    }
                    None => {}
                }
            }
            screen.draw(fonts);
            next_frame().await;
        }
    }
}

// ---------------- Identity resolution flows ----------------

async fn quick_start_slot(
    slot: usize,
    roster: &Roster,
    capture: &dyn PortraitSource,
    fonts: &Fonts,
    assets_dir: &Path,
) -> PlayerIdentity {
    let name = name_entry(&format!("Enter Player {} Name", slot + 1), fonts)
        .await
        .unwrap_or_else(|| PlayerIdentity::default_for_slot(slot).name);
    let photo_path = portrait_path(assets_dir, &name);
    let photo = match capture.acquire(&name, &photo_path) {
        CaptureOutcome::Captured => {
            let photo = photo_path.to_string_lossy().into_owned();
            if let Err(e) = roster.append(&name, &photo) {
                log::error!("Failed to save record for {}: {}", name, e);
            }
            Some(photo)
        }
        CaptureOutcome::Cancelled => None,
    };
    PlayerIdentity { name, photo }
}

/// Quick start: two name entries, each followed by portrait capture.
/// Declining capture leaves the portrait unset, never cancels the match.
pub async fn quick_start(
    roster: &Roster,
    capture: &dyn PortraitSource,
    fonts: &Fonts,
    assets_dir: &Path,
) -> [PlayerIdentity; 2] {
    let first = quick_start_slot(0, roster, capture, fonts, assets_dir).await;
    let second = quick_start_slot(1, roster, capture, fonts, assets_dir).await;
    [first, second]
}

/// Player select: two sequential roster selections. A backed-out slot falls
/// back to the previous match identity when there is one, or the default.
pub async fn player_select(
    roster: &Roster,
    capture: &dyn PortraitSource,
    fonts: &Fonts,
    assets_dir: &Path,
    previous: Option<&[PlayerIdentity; 2]>,
) -> [PlayerIdentity; 2] {
    let mut identities = match previous {
        Some(previous) => previous.clone(),
        None => [
            PlayerIdentity::default_for_slot(0),
            PlayerIdentity::default_for_slot(1),
        ],
    };
    for slot in 0..2 {
        if let Some(identity) = roster_select(slot, roster, capture, fonts, assets_dir).await {
            identities[slot] = identity;
        }
    }
    identities
}

// ---------------- Pause overlay ----------------

pub struct PauseOverlay {
    resume: Button,
    restart: Button,
    menu: Button,
}

impl PauseOverlay {
    pub fn new() -> Self {
        PauseOverlay {
            resume: Button::new(Rect::new(W / 2.0 - 120.0, 240.0, 240.0, 52.0), "Resume", true),
            restart: Button::new(Rect::new(W / 2.0 - 120.0, 310.0, 240.0, 44.0), "Restart", false),
            menu: Button::new(Rect::new(W / 2.0 - 120.0, 370.0, 240.0, 44.0), "Main Menu", false),
        }
    }

    pub fn handle_event(&mut self, event: &InputEvent, now: f64) -> Option<PauseAction> {
        if self.resume.handle_event(event, now) {
            return Some(PauseAction::Resume);
        }
        if self.restart.handle_event(event, now) {
            return Some(PauseAction::Restart);
        }
        if self.menu.handle_event(event, now) {
            return Some(PauseAction::MainMenu);
        }
        None
    }

    pub fn draw(&self, fonts: &Fonts) {
        overlay();
        ui::draw_text_centered("Paused", 170.0, ui::TITLE_FONT_SIZE, WHITE, fonts.title.as_ref());
        self.resume.draw(fonts);
        self.restart.draw(fonts);
        self.menu.draw(fonts);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::PlayerRecord;

    fn up(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerUp { x, y }
    }

    #[test]
    fn test_main_menu_buttons_map_to_actions() {
        let mut screen = MainMenuScreen::new();
        assert_eq!(screen.handle_event(&up(500.0, 230.0), 1.0), Some(MenuAction::QuickStart));
        assert_eq!(screen.handle_event(&up(500.0, 310.0), 2.0), Some(MenuAction::PlayerSelect));
        assert_eq!(screen.handle_event(&up(500.0, 380.0), 3.0), Some(MenuAction::Settings));
        assert_eq!(screen.handle_event(&up(500.0, 440.0), 4.0), Some(MenuAction::Credits));
        assert_eq!(screen.handle_event(&up(500.0, 500.0), 5.0), Some(MenuAction::Quit));
        assert_eq!(screen.handle_event(&up(20.0, 20.0), 6.0), None);
    }

    #[test]
    fn test_main_menu_double_click_is_debounced() {
        let mut screen = MainMenuScreen::new();
        assert_eq!(screen.handle_event(&up(500.0, 230.0), 1.0), Some(MenuAction::QuickStart));
        assert_eq!(screen.handle_event(&up(500.0, 230.0), 1.1), None);
    }

    #[test]
    fn test_name_entry_typing_and_confirm() {
        let mut screen = NameEntryScreen::new("Enter Player 1 Name");
        for ch in "Ann".chars() {
            assert_eq!(screen.handle_event(&InputEvent::Char(ch)), None);
        }
        assert_eq!(
            screen.handle_event(&InputEvent::KeyDown(KeyCode::Enter)),
            Some(NameEntryOutcome::Confirmed("Ann".to_string()))
        );
    }

    #[test]
    fn test_name_entry_rejects_empty_and_whitespace() {
        let mut screen = NameEntryScreen::new("Name");
        assert_eq!(screen.handle_event(&InputEvent::KeyDown(KeyCode::Enter)), None);
        screen.handle_event(&InputEvent::Char(' '));
        screen.handle_event(&InputEvent::Char(' '));
        assert_eq!(screen.handle_event(&InputEvent::KeyDown(KeyCode::Enter)), None);
    }

    #[test]
    fn test_name_entry_trims_whitespace_on_confirm() {
        let mut screen = NameEntryScreen::new("Name");
        for ch in " Ann ".chars() {
            screen.handle_event(&InputEvent::Char(ch));
        }
        assert_eq!(
            screen.handle_event(&InputEvent::KeyDown(KeyCode::Enter)),
            Some(NameEntryOutcome::Confirmed("Ann".to_string()))
        );
    }

    #[test]
    fn test_name_entry_backspace_and_cancel() {
        let mut screen = NameEntryScreen::new("Name");
        for ch in "Anne".chars() {
            screen.handle_event(&InputEvent::Char(ch));
        }
        screen.handle_event(&InputEvent::KeyDown(KeyCode::Backspace));
        assert_eq!(screen.value, "Ann");
        assert_eq!(
            screen.handle_event(&InputEvent::KeyDown(KeyCode::Escape)),
            Some(NameEntryOutcome::Cancelled)
        );
    }

    #[test]
    fn test_name_entry_caps_at_limit() {
        let mut screen = NameEntryScreen::new("Name");
        for ch in "abcdefghijklmnopqrstuvwxyz".chars() {
            screen.handle_event(&InputEvent::Char(ch));
        }
        assert_eq!(screen.value.chars().count(), config::NAME_MAX_LEN);
    }

    #[test]
    fn test_confirm_delete_choices() {
        let mut screen = ConfirmDeleteScreen::new("Delete Ann?");
        // Confirm button sits left of center, cancel right of it
        assert_eq!(screen.handle_event(&up(W / 2.0 - 80.0, H / 2.0 + 30.0), 1.0), Some(true));
        let mut screen = ConfirmDeleteScreen::new("Delete Ann?");
        assert_eq!(screen.handle_event(&up(W / 2.0 + 80.0, H / 2.0 + 30.0), 1.0), Some(false));
    }

    #[test]
    fn test_confirm_delete_starts_without_hover() {
        let screen = ConfirmDeleteScreen::new("Delete Ann?");
        assert!(!screen.confirm.hover);
        assert!(!screen.cancel.hover);
    }

    #[test]
    fn test_settings_toggle_and_back() {
        let mut screen = SettingsScreen::new(true);
        assert_eq!(screen.toggle.label, "Music: ON");
        assert_eq!(
            screen.handle_event(&up(W / 2.0, 175.0), 1.0),
            Some(SettingsOutcome::ToggleMusic)
        );
        screen.set_music(false);
        assert_eq!(screen.toggle.label, "Music: OFF");
        assert_eq!(
            screen.handle_event(&up(W / 2.0, H - 70.0), 2.0),
            Some(SettingsOutcome::Back)
        );
    }

    fn record(name: &str, photo: &str) -> PlayerRecord {
        PlayerRecord {
            name: name.to_string(),
            photo: photo.to_string(),
            created: "2026-08-05T12:00:00+00:00".to_string(),
        }
    }

    fn roster_screen(count: usize) -> RosterSelectScreen {
        let cards = (0..count)
            .map(|index| {
                Card::new(
                    card_rect(index),
                    record(&format!("P{}", index), &format!("assets/p{}.jpg", index)),
                    None,
                )
            })
            .collect();
        RosterSelectScreen::new(0, cards)
    }

    #[test]
    fn test_roster_card_select_and_delete() {
        let mut screen = roster_screen(2);
        let rect = card_rect(1);
        // Click the middle of the second card
        assert_eq!(
            screen.handle_event(&up(rect.x + 100.0, rect.y + 80.0), 1.0),
            Some(RosterOutcome::Select(1))
        );
        // Click its delete button (top-right corner)
        assert_eq!(
            screen.handle_event(&up(rect.x + rect.w - 20.0, rect.y + 20.0), 2.0),
            Some(RosterOutcome::DeleteRequest(1))
        );
    }

    #[test]
    fn test_roster_header_buttons() {
        let mut screen = roster_screen(1);
        assert_eq!(screen.handle_event(&up(60.0, 40.0), 1.0), Some(RosterOutcome::Back));
        assert_eq!(
            screen.handle_event(&up(W - 100.0, 40.0), 2.0),
            Some(RosterOutcome::CreateNew)
        );
    }

    #[test]
    fn test_roster_scroll_locked_when_content_fits() {
        let mut screen = roster_screen(2);
        assert_eq!(screen.min_scroll(), 0.0);
        screen.handle_event(&InputEvent::Wheel { dy: -1.0 }, 1.0);
        assert_eq!(screen.scroll, 0.0);
        screen.handle_event(&InputEvent::Wheel { dy: 1.0 }, 2.0);
        assert_eq!(screen.scroll, 0.0);
    }

    #[test]
    fn test_roster_scroll_clamps_to_content_extent() {
        // 12 records make four rows, taller than the window allows
        let mut screen = roster_screen(12);
        let min = screen.min_scroll();
        assert!(min < 0.0);
        for _ in 0..100 {
            screen.handle_event(&InputEvent::Wheel { dy: -1.0 }, 1.0);
        }
        assert_eq!(screen.scroll, min);
        for _ in 0..100 {
            screen.handle_event(&InputEvent::Wheel { dy: 1.0 }, 2.0);
        }
        assert_eq!(screen.scroll, 0.0);
    }

    #[test]
    fn test_roster_drag_scrolls_and_clamps() {
        let mut screen = roster_screen(12);
        screen.handle_event(&InputEvent::PointerDown { x: 500.0, y: 400.0 }, 1.0);
        screen.handle_event(&InputEvent::PointerMove { x: 500.0, y: 360.0 }, 1.1);
        assert_eq!(screen.scroll, -40.0);
        // Dragging far past the bottom extent clamps
        screen.handle_event(&InputEvent::PointerMove { x: 500.0, y: -2000.0 }, 1.2);
        assert_eq!(screen.scroll, screen.min_scroll());
        screen.handle_event(&InputEvent::PointerUp { x: 500.0, y: -2000.0 }, 1.3);
    }

    #[test]
    fn test_roster_select_respects_scroll_offset() {
        let mut screen = roster_screen(12);
        screen.scroll = -(config::CARD_HEIGHT + config::CARD_PADDING);
        // With one full row scrolled away, the first row's slot now shows
        // the cards of the second row
        let rect = card_rect(3).offset(vec2(0.0, screen.scroll));
        assert_eq!(
            screen.handle_event(&up(rect.x + 100.0, rect.y + 80.0), 1.0),
            Some(RosterOutcome::Select(3))
        );
    }

    #[test]
    fn test_pause_overlay_actions() {
        let mut overlay = PauseOverlay::new();
        assert_eq!(overlay.handle_event(&up(W / 2.0, 266.0), 1.0), Some(PauseAction::Resume));
        assert_eq!(overlay.handle_event(&up(W / 2.0, 332.0), 2.0), Some(PauseAction::Restart));
        assert_eq!(overlay.handle_event(&up(W / 2.0, 392.0), 3.0), Some(PauseAction::MainMenu));
        assert_eq!(overlay.handle_event(&up(10.0, 10.0), 4.0), None);
    }

    #[test]
    fn test_card_rect_layout_three_per_row() {
        let first = card_rect(0);
        let second = card_rect(1);
        let fourth = card_rect(3);
        // Same row: offset by card width plus padding
        assert_eq!(second.x - first.x, config::CARD_WIDTH + config::CARD_PADDING);
        assert_eq!(second.y, first.y);
        // Next row: same column, offset by card height plus padding
        assert_eq!(fourth.x, first.x);
        assert_eq!(fourth.y - first.y, config::CARD_HEIGHT + config::CARD_PADDING);
    }
}
