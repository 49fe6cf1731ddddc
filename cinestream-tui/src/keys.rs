use cinestream_core::Input;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use smol_str::{SmolStr, ToSmolStr};

/// Centrally defined key actions for the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Add,
    Edit,
    Delete,
    Logs,
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    NextField,
    PreviousField,
    PageUp,
    PageDown,
    GotoTop,
    GotoBottom,
    Select,
    Back,
    ClearLine,
    Char(char),
    DeleteChar,
}

// ── Key code constants ───────────────────────────────────────────

pub const KEY_QUIT: KeyCode = KeyCode::Char('q');
pub const KEY_ADD: KeyCode = KeyCode::Char('a');
pub const KEY_EDIT: KeyCode = KeyCode::Char('e');
pub const KEY_DELETE: KeyCode = KeyCode::Char('x');
pub const KEY_DELETE_ALT: KeyCode = KeyCode::Delete;
pub const KEY_LOGS: KeyCode = KeyCode::Char('L');
pub const KEY_SELECT: KeyCode = KeyCode::Enter;
pub const KEY_BACK: KeyCode = KeyCode::Esc;
pub const KEY_BACK_ALT: KeyCode = KeyCode::Backspace;
pub const KEY_UP: KeyCode = KeyCode::Up;
pub const KEY_DOWN: KeyCode = KeyCode::Down;
pub const KEY_LEFT: KeyCode = KeyCode::Left;
pub const KEY_RIGHT: KeyCode = KeyCode::Right;
pub const KEY_NEXT_FIELD: KeyCode = KeyCode::Tab;
pub const KEY_PREVIOUS_FIELD: KeyCode = KeyCode::BackTab;
pub const KEY_PAGE_UP: KeyCode = KeyCode::PageUp;
pub const KEY_PAGE_DOWN: KeyCode = KeyCode::PageDown;
pub const KEY_GOTO_TOP: KeyCode = KeyCode::Home;
pub const KEY_GOTO_BOTTOM: KeyCode = KeyCode::End;
pub const KEY_DELETE_CHAR: KeyCode = KeyCode::Backspace;
pub const KEY_CONFIRM_YES: KeyCode = KeyCode::Char('y');
pub const KEY_CONFIRM_NO: KeyCode = KeyCode::Char('n');

impl Action {
    /// The navigator input this action stands for, if any.
    pub fn as_input(&self) -> Option<Input> {
        Some(match self {
            Action::MoveUp | Action::PreviousField => Input::Up,
            Action::MoveDown | Action::NextField => Input::Down,
            Action::MoveLeft => Input::Left,
            Action::MoveRight => Input::Right,
            Action::Select => Input::Activate,
            Action::Back => Input::Back,
            _ => return None,
        })
    }

    /// Label shown in the help bar. Returns `None` for actions that
    /// shouldn't appear (directions, text input, etc.).
    ///
    /// `select` names what Enter does in the current context.
    pub fn help_label(&self, select: &str) -> Option<(SmolStr, SmolStr)> {
        let (key, desc): (KeyCode, SmolStr) = match self {
            Action::Quit => (KEY_QUIT, "quit".into()),
            Action::Add => (KEY_ADD, "add".into()),
            Action::Edit => (KEY_EDIT, "edit".into()),
            Action::Delete => (KEY_DELETE, "delete".into()),
            Action::Logs => (KEY_LOGS, "logs".into()),
            Action::Select => (KEY_SELECT, select.into()),
            Action::Back => (KEY_BACK, "back".into()),
            Action::NextField => (KEY_NEXT_FIELD, "next field".into()),
            Action::ClearLine => return Some(("ctrl+u".into(), "clear".into())),
            _ => return None,
        };
        let key_str: SmolStr = key.to_smolstr().to_lowercase().into();
        Some((key_str, desc))
    }
}

/// Resolve a key event into an action while browsing the catalogue.
pub fn browse_action(key: &KeyEvent) -> Option<Action> {
    match key.code {
        KEY_QUIT => Some(Action::Quit),
        KEY_ADD => Some(Action::Add),
        KEY_EDIT => Some(Action::Edit),
        KEY_DELETE | KEY_DELETE_ALT => Some(Action::Delete),
        KEY_LOGS => Some(Action::Logs),
        KEY_UP => Some(Action::MoveUp),
        KEY_DOWN => Some(Action::MoveDown),
        KEY_LEFT => Some(Action::MoveLeft),
        KEY_RIGHT => Some(Action::MoveRight),
        KEY_SELECT => Some(Action::Select),
        KEY_BACK | KEY_BACK_ALT => Some(Action::Back),
        _ => None,
    }
}

/// Resolve a key event into an action while the player is open.
pub fn player_action(key: &KeyEvent) -> Option<Action> {
    match key.code {
        KEY_BACK | KEY_BACK_ALT => Some(Action::Back),
        KEY_SELECT => Some(Action::Select),
        KEY_QUIT => Some(Action::Quit),
        KEY_LOGS => Some(Action::Logs),
        _ => None,
    }
}

/// Resolve a key event into an action while the edit form is open.
/// Printable characters are typed into the focused field.
pub fn form_action(key: &KeyEvent) -> Option<Action> {
    match key.code {
        KEY_BACK => Some(Action::Back),
        KEY_SELECT => Some(Action::Select),
        KEY_UP => Some(Action::MoveUp),
        KEY_DOWN => Some(Action::MoveDown),
        KEY_LEFT => Some(Action::MoveLeft),
        KEY_RIGHT => Some(Action::MoveRight),
        KEY_NEXT_FIELD => Some(Action::NextField),
        KEY_PREVIOUS_FIELD => Some(Action::PreviousField),
        KEY_DELETE_CHAR => Some(Action::DeleteChar),
        KeyCode::Char(c) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                (c == 'u').then_some(Action::ClearLine)
            } else {
                Some(Action::Char(c))
            }
        }
        _ => None,
    }
}

/// Resolve a key event into an action in logs context.
pub fn logs_action(key: &KeyEvent) -> Option<Action> {
    match key.code {
        KEY_BACK | KEY_BACK_ALT | KEY_LOGS | KEY_QUIT => Some(Action::Back),
        KEY_UP => Some(Action::MoveUp),
        KEY_DOWN => Some(Action::MoveDown),
        KEY_PAGE_UP => Some(Action::PageUp),
        KEY_PAGE_DOWN => Some(Action::PageDown),
        KEY_GOTO_TOP => Some(Action::GotoTop),
        KEY_GOTO_BOTTOM => Some(Action::GotoBottom),
        _ => None,
    }
}

/// Resolve a key event into an action in a yes/no confirmation.
/// `y` / Enter confirms; any other key cancels.
pub fn confirm_action(key: &KeyEvent) -> Action {
    match key.code {
        KEY_CONFIRM_YES | KEY_SELECT => Action::Select,
        _ => Action::Back,
    }
}

/// Ordered list of actions to show in the browse help bar.
pub const BROWSE_HELP: &[Action] = &[
    Action::Quit,
    Action::Select,
    Action::Back,
    Action::Add,
    Action::Edit,
    Action::Delete,
    Action::Logs,
];

/// Ordered list of actions to show in the player help bar.
pub const PLAYER_HELP: &[Action] = &[Action::Back, Action::Select, Action::Quit];

/// Ordered list of actions to show in the form help bar.
pub const FORM_HELP: &[Action] = &[
    Action::Back,
    Action::Select,
    Action::NextField,
    Action::ClearLine,
];

/// Ordered list of actions to show in the logs help bar.
pub const LOGS_HELP: &[Action] = &[Action::Back];

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn backspace_is_back_when_browsing_but_deletes_in_the_form() {
        assert_eq!(
            browse_action(&press(KeyCode::Backspace)),
            Some(Action::Back)
        );
        assert_eq!(
            form_action(&press(KeyCode::Backspace)),
            Some(Action::DeleteChar)
        );
    }

    #[test]
    fn letters_are_typed_in_the_form() {
        assert_eq!(
            form_action(&press(KeyCode::Char('q'))),
            Some(Action::Char('q'))
        );
        assert_eq!(
            form_action(&KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL)),
            Some(Action::ClearLine)
        );
        assert_eq!(
            form_action(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            None
        );
    }

    #[test]
    fn directional_keys_map_to_inputs() {
        for (code, input) in [
            (KeyCode::Up, Input::Up),
            (KeyCode::Down, Input::Down),
            (KeyCode::Left, Input::Left),
            (KeyCode::Right, Input::Right),
            (KeyCode::Enter, Input::Activate),
            (KeyCode::Esc, Input::Back),
        ] {
            let action = browse_action(&press(code)).unwrap();
            assert_eq!(action.as_input(), Some(input));
        }
        assert_eq!(Action::NextField.as_input(), Some(Input::Down));
        assert_eq!(Action::Add.as_input(), None);
    }
}
