//! Routing table from input symbols to switcher actions.
//!
//! Escape confirms the first (most recently used) entry instead of
//! cancelling; that matches the behavior users of this tool rely on, so it
//! is spelled out here as its own action rather than hidden in a fallthrough.

/// Key symbols delivered by the key-capture collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    AltPressed,
    AltReleased,
    ShiftPressed,
    ShiftReleased,
    TabPressed,
    SpacePressed,
    EscapePressed,
    UpPressed,
    DownPressed,
}

/// What a key symbol means for the switcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Activate the currently highlighted window.
    Confirm,
    /// Reset the selection to the first entry, then activate it.
    ConfirmFirst,
    CycleForward,
    CycleBackward,
    Ignore,
}

/// Map a key symbol to an action. `shift_held` turns Tab into a backward
/// cycle (Shift+Tab).
pub fn route_key(event: KeyEvent, shift_held: bool) -> KeyAction {
    match event {
        KeyEvent::AltPressed | KeyEvent::AltReleased | KeyEvent::SpacePressed => {
            KeyAction::Confirm
        }
        KeyEvent::EscapePressed => KeyAction::ConfirmFirst,
        KeyEvent::TabPressed => {
            if shift_held {
                KeyAction::CycleBackward
            } else {
                KeyAction::CycleForward
            }
        }
        KeyEvent::DownPressed => KeyAction::CycleForward,
        KeyEvent::UpPressed => KeyAction::CycleBackward,
        KeyEvent::ShiftPressed | KeyEvent::ShiftReleased => KeyAction::Ignore,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alt_and_space_confirm() {
        assert_eq!(route_key(KeyEvent::AltPressed, false), KeyAction::Confirm);
        assert_eq!(route_key(KeyEvent::AltReleased, false), KeyAction::Confirm);
        assert_eq!(route_key(KeyEvent::SpacePressed, false), KeyAction::Confirm);
    }

    #[test]
    fn test_escape_confirms_first() {
        assert_eq!(
            route_key(KeyEvent::EscapePressed, false),
            KeyAction::ConfirmFirst
        );
    }

    #[test]
    fn test_tab_cycles_forward() {
        assert_eq!(route_key(KeyEvent::TabPressed, false), KeyAction::CycleForward);
    }

    #[test]
    fn test_shift_tab_cycles_backward() {
        assert_eq!(route_key(KeyEvent::TabPressed, true), KeyAction::CycleBackward);
    }

    #[test]
    fn test_arrows_cycle() {
        assert_eq!(route_key(KeyEvent::DownPressed, false), KeyAction::CycleForward);
        assert_eq!(route_key(KeyEvent::UpPressed, false), KeyAction::CycleBackward);
    }

    #[test]
    fn test_shift_state_changes_are_ignored() {
        assert_eq!(route_key(KeyEvent::ShiftPressed, false), KeyAction::Ignore);
        assert_eq!(route_key(KeyEvent::ShiftReleased, true), KeyAction::Ignore);
    }
}
