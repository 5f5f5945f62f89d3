use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::application::{ChatWidget, SendTicket};

/// What the event loop should do after a key press.
#[derive(Debug)]
pub enum KeyAction {
    None,
    Quit,
    Send(SendTicket),
}

/// Apply a key press to the widget.
///
/// Ctrl+O toggles the chat window from anywhere; Esc closes it, or quits
/// when it is already closed. While closed, Enter opens the window and `q`
/// quits. While open, keys edit the input buffer and Enter submits it.
pub fn handle_key(widget: &mut ChatWidget, key: KeyEvent) -> KeyAction {
    if key.kind != KeyEventKind::Press {
        return KeyAction::None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => return KeyAction::Quit,
        KeyCode::Char('o') if ctrl => {
            widget.toggle();
            return KeyAction::None;
        }
        KeyCode::Esc => {
            if widget.is_open() {
                widget.close();
                return KeyAction::None;
            }
            return KeyAction::Quit;
        }
        _ => {}
    }

    if !widget.is_open() {
        return match key.code {
            KeyCode::Enter => {
                widget.open();
                KeyAction::None
            }
            KeyCode::Char('q') => KeyAction::Quit,
            _ => KeyAction::None,
        };
    }

    match key.code {
        KeyCode::Enter => match widget.submit() {
            Some(ticket) => KeyAction::Send(ticket),
            None => KeyAction::None,
        },
        KeyCode::Backspace => {
            widget.pop_char();
            KeyAction::None
        }
        KeyCode::Char(c) if !ctrl => {
            widget.push_char(c);
            KeyAction::None
        }
        _ => KeyAction::None,
    }
}
