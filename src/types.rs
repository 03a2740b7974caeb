//! Shared data types passed between the screen navigator and the match simulator.

/// A resolved player identity handed from the navigator to a new match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerIdentity {
    pub name: String,
    /// Path of the captured portrait, if any. A missing portrait falls back
    /// to a generated placeholder avatar.
    pub photo: Option<String>,
}

impl PlayerIdentity {
    /// The default identity a slot resolves to when selection is backed out.
    pub fn default_for_slot(slot: usize) -> Self {
        PlayerIdentity {
            name: format!("Player{}", slot + 1),
            photo: None,
        }
    }
}

/// Actions exposed by the main menu screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    QuickStart,
    PlayerSelect,
    Settings,
    Credits,
    Quit,
}

/// Actions exposed by the pause overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseAction {
    Resume,
    Restart,
    MainMenu,
}
