//! # Preview Component
//!
//! Operator-side view of the current item: position and citation, the
//! item text, and previous/next hints that dim when a step would go
//! nowhere.
//!
//! Transient wrapper, created each frame with borrowed props.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Wrap};

use crate::core::navigation::ContentItem;
use crate::tui::component::Component;

pub struct Preview<'a> {
    pub main_title: &'a str,
    pub item: Option<&'a ContentItem>,
    /// "2 of 5"
    pub position: Option<String>,
    pub can_step_backward: bool,
    pub can_step_forward: bool,
    /// Shown when nothing is loaded.
    pub empty_hint: &'a str,
}

impl Preview<'_> {
    fn header(&self, item: &ContentItem) -> Line<'static> {
        let text = match &self.position {
            Some(position) => format!("{} - {}", position, item.citation),
            None => item.citation.clone(),
        };
        Line::styled(text, Style::default().fg(Color::Cyan))
    }

    fn hints(&self) -> Line<'static> {
        let style = |enabled: bool| {
            if enabled {
                Style::default().fg(Color::White)
            } else {
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::DIM)
            }
        };
        Line::from(vec![
            Span::styled("◀ Previous", style(self.can_step_backward)),
            Span::raw("    "),
            Span::styled("Next ▶", style(self.can_step_forward)),
        ])
        .alignment(Alignment::Center)
    }
}

impl Component for Preview<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title = if self.main_title.is_empty() {
            " Preview ".to_string()
        } else {
            format!(" {} ", self.main_title)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(title)
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(item) = self.item else {
            let hint = Paragraph::new(self.empty_hint)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true });
            frame.render_widget(hint, inner);
            return;
        };

        use Constraint::{Length, Min};
        let [header_area, body_area, hint_area] =
            Layout::vertical([Length(2), Min(0), Length(1)]).areas(inner);

        frame.render_widget(Paragraph::new(self.header(item)), header_area);

        let [title_area, text_area] = Layout::vertical([Length(2), Min(0)]).areas(body_area);
        frame.render_widget(
            Line::styled(
                item.title.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            title_area,
        );
        frame.render_widget(
            Paragraph::new(item.text.as_str()).wrap(Wrap { trim: false }),
            text_area,
        );

        frame.render_widget(Paragraph::new(self.hints()), hint_area);
    }
}
