use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key press means for the current screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    Submit,
    Cancel,
    Insert(char),
    Delete,
    SelectPrev,
    SelectNext,
    ScrollUp,
    ScrollDown,
    Save,
    Quit,
    None,
}

/// Translate a key event into an action
pub fn map_key(key: KeyEvent) -> InputAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => InputAction::Quit,
            KeyCode::Char('s') => InputAction::Save,
            _ => InputAction::None,
        };
    }

    match key.code {
        KeyCode::Enter => InputAction::Submit,
        KeyCode::Esc => InputAction::Cancel,
        KeyCode::Char(c) => InputAction::Insert(c),
        KeyCode::Backspace => InputAction::Delete,
        KeyCode::Up => InputAction::SelectPrev,
        KeyCode::Down => InputAction::SelectNext,
        KeyCode::PageUp => InputAction::ScrollUp,
        KeyCode::PageDown => InputAction::ScrollDown,
        _ => InputAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_plain_keys() {
        assert_eq!(map_key(key(KeyCode::Enter)), InputAction::Submit);
        assert_eq!(map_key(key(KeyCode::Char('s'))), InputAction::Insert('s'));
        assert_eq!(map_key(key(KeyCode::Backspace)), InputAction::Delete);
        assert_eq!(map_key(key(KeyCode::Up)), InputAction::SelectPrev);
        assert_eq!(map_key(key(KeyCode::PageDown)), InputAction::ScrollDown);
        assert_eq!(map_key(key(KeyCode::F(1))), InputAction::None);
    }

    #[test]
    fn test_shifted_characters_are_inserted() {
        let event = KeyEvent::new(KeyCode::Char('Á'), KeyModifiers::SHIFT);
        assert_eq!(map_key(event), InputAction::Insert('Á'));
    }

    #[test]
    fn test_control_shortcuts() {
        assert_eq!(map_key(ctrl('s')), InputAction::Save);
        assert_eq!(map_key(ctrl('c')), InputAction::Quit);
        assert_eq!(map_key(ctrl('x')), InputAction::None);
    }
}
