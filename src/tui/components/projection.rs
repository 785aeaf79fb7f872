//! # Projection Component
//!
//! The full-screen congregation view. Title at the top, the text wrapped
//! and centered in the middle, the citation along the bottom.
//!
//! Text is wrapped with `textwrap` up front so the block can be centered
//! vertically; ratatui's own wrapping doesn't report its line count.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Padding, Paragraph};

use crate::core::navigation::ContentItem;
use crate::tui::component::Component;

const SIDE_MARGIN: u16 = 4;

pub struct Projection<'a> {
    pub item: &'a ContentItem,
}

impl<'a> Projection<'a> {
    pub fn new(item: &'a ContentItem) -> Self {
        Self { item }
    }
}

/// Wrap every paragraph of `text` to `width` columns, keeping blank lines
/// between stanza blocks.
pub fn wrap_for_projection(text: &str, width: u16) -> Vec<String> {
    let width = usize::from(width.max(1));
    text.lines()
        .flat_map(|line| {
            if line.trim().is_empty() {
                vec![String::new()]
            } else {
                textwrap::wrap(line, width)
                    .into_iter()
                    .map(|l| l.into_owned())
                    .collect()
            }
        })
        .collect()
}

impl Component for Projection<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Clear, area);
        let block = Block::default()
            .style(Style::default().bg(Color::Black).fg(Color::White))
            .padding(Padding::new(SIDE_MARGIN, SIDE_MARGIN, 1, 1));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        use Constraint::{Length, Min};
        let [title_area, body_area, citation_area] =
            Layout::vertical([Length(2), Min(0), Length(1)]).areas(inner);

        frame.render_widget(
            Paragraph::new(self.item.title.as_str())
                .style(
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )
                .alignment(Alignment::Center),
            title_area,
        );

        let lines = wrap_for_projection(&self.item.text, body_area.width);
        let top_pad = body_area.height.saturating_sub(lines.len() as u16) / 2;

        let body: Vec<Line> = std::iter::repeat_n(Line::raw(""), usize::from(top_pad))
            .chain(lines.into_iter().map(Line::raw))
            .collect();
        frame.render_widget(
            Paragraph::new(body).alignment(Alignment::Center),
            body_area,
        );

        frame.render_widget(
            Paragraph::new(self.item.citation.as_str())
                .style(
                    Style::default()
                        .fg(Color::Gray)
                        .add_modifier(Modifier::ITALIC),
                )
                .alignment(Alignment::Right),
            citation_area,
        );
    }
}
