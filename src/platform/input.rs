//! Input mapping
//!
//! The two game keys, mouse buttons and touches all collapse into the same
//! game action: a flap while running, a restart after game over. A few
//! extra keys drive host-side toggles that never reach the simulation.

/// Where an input came from (for logging only; every source acts the same)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    Key,
    Pointer,
    Touch,
}

/// What the host should do with a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostAction {
    /// Forward to `GameSession::on_input`
    Flap,
    /// Toggle the demo pilot
    ToggleAutopilot,
    /// Toggle sound
    ToggleMute,
    /// Toggle the FPS readout
    ToggleFps,
}

/// Keys that act like a click
pub const GAME_KEYS: [&str; 2] = ["Space", "ArrowUp"];

/// Map a `KeyboardEvent.code` to a host action; unbound keys are ignored
pub fn map_key(code: &str) -> Option<HostAction> {
    match code {
        c if GAME_KEYS.contains(&c) => Some(HostAction::Flap),
        "KeyI" => Some(HostAction::ToggleAutopilot),
        "KeyM" => Some(HostAction::ToggleMute),
        "KeyF" => Some(HostAction::ToggleFps),
        _ => None,
    }
}
