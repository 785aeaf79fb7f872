use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use std::time::Duration;

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    // Core actions (mapped to core::Action by the loop)
    ForceQuit,
    Submit,
    SwitchTab,
    Previous,
    Next,
    ToggleProjection,
    Escape,

    // TUI-local events (handled directly in TUI)
    InputChar(char),
    Paste(String),
    Backspace,
    Resize,
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(Duration::ZERO)
}

/// Poll for an event, blocking up to `timeout`.
pub fn poll_event_timeout(timeout: Duration) -> Option<TuiEvent> {
    match event::poll(timeout) {
        Ok(true) => {}
        Ok(false) => return None,
        Err(e) => {
            log::warn!("Event poll failed: {}", e);
            return None;
        }
    }

    match event::read() {
        Ok(event) => translate(event),
        Err(e) => {
            log::warn!("Event read failed: {}", e);
            None
        }
    }
}

fn translate(event: Event) -> Option<TuiEvent> {
    match event {
        Event::Key(key_event) => {
            // Some platforms report releases too
            if key_event.kind != KeyEventKind::Press {
                return None;
            }
            log::debug!(
                "Key event: {:?} with modifiers {:?}",
                key_event.code,
                key_event.modifiers
            );
            match (key_event.modifiers, key_event.code) {
                (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::ForceQuit),
                (KeyModifiers::CONTROL, KeyCode::Char('p')) => Some(TuiEvent::ToggleProjection),
                (_, KeyCode::F(5)) => Some(TuiEvent::ToggleProjection),
                (_, KeyCode::Tab | KeyCode::BackTab) => Some(TuiEvent::SwitchTab),
                (_, KeyCode::Enter) => Some(TuiEvent::Submit),
                (_, KeyCode::Esc) => Some(TuiEvent::Escape),
                (_, KeyCode::Left | KeyCode::Up | KeyCode::PageUp) => Some(TuiEvent::Previous),
                (_, KeyCode::Right | KeyCode::Down | KeyCode::PageDown) => Some(TuiEvent::Next),
                (_, KeyCode::Backspace) => Some(TuiEvent::Backspace),
                (_, KeyCode::Char(c)) => Some(TuiEvent::InputChar(c)),
                _ => None,
            }
        }
        Event::Paste(data) => Some(TuiEvent::Paste(data)),
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn test_control_keys() {
        assert_eq!(
            translate(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(TuiEvent::ForceQuit)
        );
        assert_eq!(
            translate(key(KeyCode::Char('p'), KeyModifiers::CONTROL)),
            Some(TuiEvent::ToggleProjection)
        );
        assert_eq!(
            translate(key(KeyCode::F(5), KeyModifiers::NONE)),
            Some(TuiEvent::ToggleProjection)
        );
    }

    #[test]
    fn test_navigation_keys() {
        assert_eq!(
            translate(key(KeyCode::Left, KeyModifiers::NONE)),
            Some(TuiEvent::Previous)
        );
        assert_eq!(
            translate(key(KeyCode::PageDown, KeyModifiers::NONE)),
            Some(TuiEvent::Next)
        );
        assert_eq!(
            translate(key(KeyCode::Tab, KeyModifiers::NONE)),
            Some(TuiEvent::SwitchTab)
        );
    }

    #[test]
    fn test_plain_chars_are_input() {
        assert_eq!(
            translate(key(KeyCode::Char('J'), KeyModifiers::SHIFT)),
            Some(TuiEvent::InputChar('J'))
        );
        assert_eq!(translate(Event::Resize(80, 24)), Some(TuiEvent::Resize));
    }
}
