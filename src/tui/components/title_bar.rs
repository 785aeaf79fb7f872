//! # TitleBar Component
//!
//! Top status line: app name, data status badge, status message.
//!
//! Stateless. All three props come from the core `App`:
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar::new(app.data_status().clone(), app.status_message.clone());
//! title_bar.render(frame, area);
//! ```
//!
//! Renders as `"Pulpit | [Ready] | Loaded Hymn #100 - ..."`. The status
//! message is dropped when empty so the bar never ends in a separator.

use crate::library::DataStatus;
use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

pub const APP_NAME: &str = "Pulpit";

pub struct TitleBar {
    pub data_status: DataStatus,
    pub status_message: String,
}

impl TitleBar {
    pub fn new(data_status: DataStatus, status_message: String) -> Self {
        Self {
            data_status,
            status_message,
        }
    }

    fn badge_style(&self) -> Style {
        let color = match self.data_status {
            DataStatus::Ready => Color::Green,
            DataStatus::Loading => Color::Yellow,
            DataStatus::Unavailable(_) => Color::Red,
        };
        Style::default().fg(color)
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled(APP_NAME, Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" | "),
            Span::styled(format!("[{}]", self.data_status.label()), self.badge_style()),
        ];
        if !self.status_message.is_empty() {
            spans.push(Span::raw(" | "));
            spans.push(Span::raw(self.status_message.as_str()));
        }

        frame.render_widget(Line::from(spans), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(title_bar: &mut TitleBar) -> String {
        let backend = TestBackend::new(80, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                title_bar.render(f, f.area());
            })
            .unwrap();

        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_title_bar_with_status_message() {
        let mut title_bar = TitleBar::new(DataStatus::Ready, "Loaded Hymn #100".to_string());
        let text = render(&mut title_bar);

        assert!(text.contains("Pulpit"));
        assert!(text.contains("[Ready]"));
        assert!(text.contains("Loaded Hymn #100"));
    }

    #[test]
    fn test_title_bar_loading() {
        let mut title_bar = TitleBar::new(DataStatus::Loading, String::new());
        let text = render(&mut title_bar);

        assert!(text.contains("[Loading data...]"));
        assert_eq!(text.matches('|').count(), 1);
    }

    #[test]
    fn test_title_bar_unavailable() {
        let mut title_bar = TitleBar::new(
            DataStatus::Unavailable("missing".to_string()),
            "Data unavailable".to_string(),
        );
        let text = render(&mut title_bar);

        assert!(text.contains("[Error]"));
        assert!(text.contains("Data unavailable"));
    }
}
