//! Keyboard bindings and input handling.
//!
//! Centralizes all keyboard shortcuts and key mapping logic.

use nannou::prelude::*;

/// Volume change per Up/Down press
pub const VOLUME_STEP: f32 = 0.05;

/// Actions that can be triggered by key presses
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // App-level
    Quit,
    ToggleHelp,
    CloseHelp,

    // Transport
    TogglePlay,
    SkipBack,
    SkipForward,
    VolumeUp,
    VolumeDown,

    // Track list
    NextTrack,
    PrevTrack,
    SelectTrack(usize),
}

/// Parse a key into an action; Escape only means something while the help
/// overlay is shown
pub fn parse_key(key: Key, help_visible: bool) -> Option<Action> {
    // Global quit key
    if key == Key::Q {
        return Some(Action::Quit);
    }

    if help_visible && key == Key::Escape {
        return Some(Action::CloseHelp);
    }

    match key {
        Key::H => Some(Action::ToggleHelp),
        Key::Space => Some(Action::TogglePlay),
        Key::Left => Some(Action::SkipBack),
        Key::Right => Some(Action::SkipForward),
        Key::Up => Some(Action::VolumeUp),
        Key::Down => Some(Action::VolumeDown),
        Key::N => Some(Action::NextTrack),
        Key::P => Some(Action::PrevTrack),
        _ => parse_number_key(key).map(Action::SelectTrack),
    }
}

/// Parse number keys 1-9 into zero-based track indices
fn parse_number_key(key: Key) -> Option<usize> {
    match key {
        Key::Key1 => Some(0),
        Key::Key2 => Some(1),
        Key::Key3 => Some(2),
        Key::Key4 => Some(3),
        Key::Key5 => Some(4),
        Key::Key6 => Some(5),
        Key::Key7 => Some(6),
        Key::Key8 => Some(7),
        Key::Key9 => Some(8),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_keys() {
        assert_eq!(parse_key(Key::Space, false), Some(Action::TogglePlay));
        assert_eq!(parse_key(Key::Left, false), Some(Action::SkipBack));
        assert_eq!(parse_key(Key::Right, false), Some(Action::SkipForward));
        assert_eq!(parse_key(Key::Up, false), Some(Action::VolumeUp));
        assert_eq!(parse_key(Key::Down, false), Some(Action::VolumeDown));
    }

    #[test]
    fn test_number_keys_are_zero_based() {
        assert_eq!(parse_key(Key::Key1, false), Some(Action::SelectTrack(0)));
        assert_eq!(parse_key(Key::Key9, false), Some(Action::SelectTrack(8)));
        assert_eq!(parse_key(Key::Key0, false), None);
    }

    #[test]
    fn test_escape_only_with_help() {
        assert_eq!(parse_key(Key::Escape, false), None);
        assert_eq!(parse_key(Key::Escape, true), Some(Action::CloseHelp));
        assert_eq!(parse_key(Key::Q, true), Some(Action::Quit));
    }
}
