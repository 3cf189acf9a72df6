//! Input handling for the TUI.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

use crate::api::Stage;

use super::app::Action;

/// Convert a crossterm key event to an Action.
pub fn handle_key_event(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
        // Two controls close the overlay with identical effect.
        KeyCode::Esc => Some(Action::Close),
        KeyCode::Char('x') => Some(Action::Close),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::Up),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::Down),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Select),
        KeyCode::Char('r') | KeyCode::F(5) => Some(Action::Refresh),
        KeyCode::Char('1') => Some(Action::Trigger(Stage::Setup)),
        KeyCode::Char('2') => Some(Action::Trigger(Stage::Tokenizer)),
        KeyCode::Char('3') => Some(Action::Trigger(Stage::Pretrain)),
        KeyCode::Char('4') => Some(Action::Trigger(Stage::Midtrain)),
        KeyCode::Char('5') => Some(Action::Trigger(Stage::Sft)),
        _ => None,
    }
}

/// Convert a crossterm Event to an Action.
pub fn handle_event(event: Event) -> Option<Action> {
    match event {
        Event::Key(key) => handle_key_event(key),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_keys_map_in_pipeline_order() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('1'))),
            Some(Action::Trigger(Stage::Setup))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('5'))),
            Some(Action::Trigger(Stage::Sft))
        );
    }

    #[test]
    fn both_close_controls_emit_the_same_action() {
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Esc)), Some(Action::Close));
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('x'))),
            Some(Action::Close)
        );
    }
}
