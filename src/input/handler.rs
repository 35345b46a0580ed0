use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::InputAction;

/// What a key press asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Delivered to the active layer on the next frame
    Game(InputAction),
    Pause,
    Restart,
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            KeyCode::Up => KeyAction::Game(InputAction::Forward),
            KeyCode::Down => KeyAction::Game(InputAction::Backward),
            KeyCode::Left => KeyAction::Game(InputAction::TurnLeft),
            KeyCode::Right | KeyCode::Enter => KeyAction::Game(InputAction::TurnRight),

            KeyCode::Char(c) => match c.to_ascii_lowercase() {
                'w' => KeyAction::Game(InputAction::Forward),
                's' => KeyAction::Game(InputAction::Backward),
                'a' => KeyAction::Game(InputAction::TurnLeft),
                'd' => KeyAction::Game(InputAction::TurnRight),
                'p' => KeyAction::Pause,
                'r' => KeyAction::Restart,
                'q' => KeyAction::Quit,
                _ => KeyAction::None,
            },

            KeyCode::Esc => KeyAction::Game(InputAction::Exit),

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyAction {
        InputHandler::new().handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_arrow_keys() {
        assert_eq!(press(KeyCode::Up), KeyAction::Game(InputAction::Forward));
        assert_eq!(press(KeyCode::Down), KeyAction::Game(InputAction::Backward));
        assert_eq!(press(KeyCode::Left), KeyAction::Game(InputAction::TurnLeft));
        assert_eq!(press(KeyCode::Right), KeyAction::Game(InputAction::TurnRight));
    }

    #[test]
    fn test_wasd_keys() {
        assert_eq!(press(KeyCode::Char('w')), KeyAction::Game(InputAction::Forward));
        assert_eq!(press(KeyCode::Char('a')), KeyAction::Game(InputAction::TurnLeft));
        assert_eq!(press(KeyCode::Char('s')), KeyAction::Game(InputAction::Backward));
        assert_eq!(press(KeyCode::Char('d')), KeyAction::Game(InputAction::TurnRight));
    }

    #[test]
    fn test_wasd_uppercase() {
        let handler = InputHandler::new();

        let d_upper = KeyEvent::new(KeyCode::Char('D'), KeyModifiers::SHIFT);
        assert_eq!(
            handler.handle_key_event(d_upper),
            KeyAction::Game(InputAction::TurnRight)
        );
    }

    #[test]
    fn test_enter_selects() {
        assert_eq!(press(KeyCode::Enter), KeyAction::Game(InputAction::TurnRight));
    }

    #[test]
    fn test_escape_is_exit() {
        assert_eq!(press(KeyCode::Esc), KeyAction::Game(InputAction::Exit));
    }

    #[test]
    fn test_control_keys() {
        assert_eq!(press(KeyCode::Char('p')), KeyAction::Pause);
        assert_eq!(press(KeyCode::Char('R')), KeyAction::Restart);
        assert_eq!(press(KeyCode::Char('q')), KeyAction::Quit);
        assert_eq!(press(KeyCode::Char('x')), KeyAction::None);
        assert_eq!(press(KeyCode::Tab), KeyAction::None);
    }

    #[test]
    fn test_ctrl_c() {
        let handler = InputHandler::new();

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handler.handle_key_event(ctrl_c), KeyAction::Quit);
    }
}
