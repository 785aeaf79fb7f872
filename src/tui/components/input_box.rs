//! # InputBox Component
//!
//! Single-line entry for a hymn number or a scripture reference.
//!
//! The buffer is internal state. The title and placeholder are props that
//! follow the active tab.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    ContentChanged,
}

pub struct InputBox {
    /// Text buffer (Internal State)
    pub buffer: String,
    /// Block title (Prop)
    pub title: String,
    /// Hint shown while the buffer is empty (Prop)
    pub placeholder: String,
}

impl InputBox {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            title: String::new(),
            placeholder: String::new(),
        }
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Trimmed buffer contents, ready to hand to the core.
    pub fn value(&self) -> String {
        self.buffer.trim().to_string()
    }
}

impl Default for InputBox {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(self.title.as_str());

        let inner_width = area.width.saturating_sub(2);
        let text_width = self.buffer.width() as u16;

        // Keep the tail visible when the text is wider than the box
        let paragraph = if self.buffer.is_empty() {
            Paragraph::new(self.placeholder.as_str()).style(
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )
        } else {
            let scroll = text_width.saturating_sub(inner_width.saturating_sub(1));
            Paragraph::new(self.buffer.as_str())
                .style(Style::default().fg(Color::Green))
                .scroll((0, scroll))
        };

        frame.render_widget(paragraph.block(block), area);

        let cursor_x = area.x + 1 + text_width.min(inner_width.saturating_sub(1));
        frame.set_cursor_position((cursor_x, area.y + 1));
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.push(*c);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                // Single line only
                let line = text.lines().next().unwrap_or_default();
                self.buffer.push_str(line);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace => self.buffer.pop().map(|_| InputEvent::ContentChanged),
            _ => None,
        }
    }
}
