//! Configuration constants for the Blade Arena game.

// Window and HUD layout
pub const WINDOW_WIDTH: i32 = 1000;
pub const WINDOW_HEIGHT: i32 = 660;
pub const HUD_HEIGHT: f32 = 110.0; // Top band holding names and hearts

// Playable rectangle (keeps avatars fully visible and below the HUD band)
pub const PLAY_MIN_X: f32 = 90.0;
pub const PLAY_MAX_X: f32 = WINDOW_WIDTH as f32 - 90.0;
pub const PLAY_MIN_Y: f32 = 160.0;
pub const PLAY_MAX_Y: f32 = WINDOW_HEIGHT as f32 - 90.0;

// Pickup respawn range (covers the full usable arena)
pub const SPAWN_MIN_X: f32 = 120.0;
pub const SPAWN_MAX_X: f32 = WINDOW_WIDTH as f32 - 120.0;
pub const SPAWN_MIN_Y: f32 = 160.0;
pub const SPAWN_MAX_Y: f32 = WINDOW_HEIGHT as f32 - 120.0;

// Match rules
pub const MOVE_SPEED: f32 = 240.0; // Units per second per held direction key
pub const MELEE_RANGE: f32 = 82.0;
pub const BLADE_DRAIN_PER_SEC: f32 = 5.4; // 0.09 health per frame at 60 Hz
pub const MAX_HEALTH: f32 = 5.0;
pub const HEAL_AMOUNT: f32 = 1.0;
pub const BLADE_SIZE: f32 = 34.0;
pub const HEART_SIZE: f32 = 22.0;
pub const PICKUP_GRAB_MARGIN: f32 = 40.0; // Grab when dist < size / 1.2 + margin
pub const AURA_SPIN_DEG_PER_SEC: f32 = 360.0;
pub const WIN_BANNER_SECS: f32 = 1.2;

// UI behaviour
pub const BUTTON_DEBOUNCE_SECS: f64 = 0.18; // One physical click, one activation
pub const NAME_MAX_LEN: usize = 18;
pub const AVATAR_SIZE: u16 = 96;

// Roster grid
pub const CARDS_PER_ROW: usize = 3;
pub const CARD_WIDTH: f32 = 320.0;
pub const CARD_HEIGHT: f32 = 120.0;
pub const CARD_PADDING: f32 = 22.0;
pub const CARD_THUMB_SIZE: u16 = 80;
pub const ROSTER_TOP_MARGIN: f32 = 120.0;
pub const ROSTER_BOTTOM_MARGIN: f32 = 40.0;
pub const WHEEL_SCROLL_STEP: f32 = 40.0;

// External portrait capture
pub const CAPTURE_TIMEOUT_SECS: u64 = 90; // Safety fallback if the tool hangs

// Audio
pub const MUSIC_VOLUME: f32 = 0.4;
