use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Tabs;

use crate::core::state::Tab;
use crate::tui::component::Component;

const TABS: [Tab; 2] = [Tab::Song, Tab::Verse];

pub struct TabBar {
    pub active: Tab,
}

impl TabBar {
    pub fn new(active: Tab) -> Self {
        Self { active }
    }
}

impl Component for TabBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let selected = TABS.iter().position(|t| *t == self.active);
        let tabs = Tabs::new(TABS.iter().map(|t| t.label()))
            .select(selected)
            .style(Style::default().fg(Color::DarkGray))
            .highlight_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            )
            .divider(" ");
        frame.render_widget(tabs, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_tab_bar_lists_both_tabs() {
        let mut terminal = Terminal::new(TestBackend::new(40, 1)).unwrap();
        let mut bar = TabBar::new(Tab::Verse);
        terminal.draw(|f| bar.render(f, f.area())).unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Hymns"));
        assert!(text.contains("Scripture"));
    }
}
