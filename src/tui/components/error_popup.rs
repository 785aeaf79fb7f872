use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Clear, Padding, Paragraph, Wrap};

use crate::tui::component::Component;

/// Centered overlay for a user-facing error. Dismissed with Enter or Esc.
pub struct ErrorPopup<'a> {
    pub message: &'a str,
}

impl<'a> ErrorPopup<'a> {
    pub fn new(message: &'a str) -> Self {
        Self { message }
    }
}

/// A rectangle of `percent_x` by `percent_y` centered in `area`.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Percentage(percent_y)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .areas(row);
    cell
}

impl Component for ErrorPopup<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(60, 30, area);
        frame.render_widget(Clear, overlay);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Red))
            .title(" Error ")
            .title_bottom(Line::from(" Enter/Esc Dismiss ").centered())
            .padding(Padding::uniform(1));

        let paragraph = Paragraph::new(self.message)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, overlay);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_centered_rect_is_inside_area() {
        let area = Rect::new(0, 0, 100, 50);
        let rect = centered_rect(60, 30, area);
        assert_eq!(rect.width, 60);
        assert_eq!(rect.height, 15);
        assert_eq!(rect.x, 20);
    }

    #[test]
    fn test_error_popup_renders_message() {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal
            .draw(|f| ErrorPopup::new("Song #999 not found.").render(f, f.area()))
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Error"));
        assert!(text.contains("Song #999 not found."));
    }
}
