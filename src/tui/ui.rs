use crate::core::state::{App, Tab};
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{ErrorPopup, Preview, Projection, TabBar, TitleBar};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::Line;

const OPERATOR_HELP: &str =
    " Tab Switch | Enter Load | ←/→ Navigate | F5/Ctrl+P Project | Esc Quit ";
const PROJECTION_HELP: &str = " ←/→ Navigate | F5/Esc Close ";

fn input_props(tab: Tab) -> (&'static str, &'static str) {
    match tab {
        Tab::Song => (" Hymn Number ", "e.g. 100"),
        Tab::Verse => (" Reference ", "e.g. John 3:16, Psalms 23, 1 John 4:7-8"),
    }
}

fn empty_hint(app: &App) -> &'static str {
    match app.tab {
        Tab::Song => "Type a hymn number and press Enter",
        Tab::Verse if app.is_fetching() => "Fetching passage...",
        Tab::Verse => "Type a reference and press Enter",
    }
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    let area = frame.area();

    match app.navigator.current() {
        Some(item) if app.projecting => {
            Projection::new(item).render(frame, area);
            let [_, help_area] =
                Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);
            frame.render_widget(
                Line::styled(PROJECTION_HELP, Style::default().fg(Color::DarkGray)),
                help_area,
            );
        }
        _ => draw_operator_view(frame, app, tui),
    }

    if let Some(message) = &app.error {
        ErrorPopup::new(message).render(frame, area);
    }
}

fn draw_operator_view(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let [title_area, tab_area, input_area, preview_area, help_area] =
        Layout::vertical([Length(1), Length(1), Length(3), Min(0), Length(1)])
            .areas(frame.area());

    TitleBar::new(app.data_status().clone(), app.status_message.clone())
        .render(frame, title_area);
    TabBar::new(app.tab).render(frame, tab_area);

    let (title, placeholder) = input_props(app.tab);
    tui.input_box.title = title.to_string();
    tui.input_box.placeholder = placeholder.to_string();
    tui.input_box.render(frame, input_area);

    Preview {
        main_title: app.navigator.main_title(),
        item: app.navigator.current(),
        position: app.navigator.position_label(),
        can_step_backward: app.can_step_backward(),
        can_step_forward: app.can_step_forward(),
        empty_hint: empty_hint(app),
    }
    .render(frame, preview_area);

    frame.render_widget(
        Line::styled(OPERATOR_HELP, Style::default().fg(Color::DarkGray)),
        help_area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use crate::test_support::test_app;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(app: &App, tui: &mut TuiState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| draw_ui(f, app, tui)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_draw_ui_empty() {
        let app = test_app();
        let mut tui = TuiState::new();
        let text = render(&app, &mut tui);
        assert!(text.contains("Pulpit"));
        assert!(text.contains("Hymn Number"));
        assert!(text.contains("Type a hymn number"));
        assert!(text.contains("Esc Quit"));
    }

    #[test]
    fn test_draw_ui_with_song_loaded() {
        let mut app = test_app();
        update(&mut app, Action::LoadSong("100".into()));
        let mut tui = TuiState::new();
        let text = render(&app, &mut tui);
        assert!(text.contains("Hymn #100"));
        assert!(text.contains("1 of 2 - Hymn #100 - Great Is Thy Faithfulness"));
        assert!(text.contains("O God my Father"));
    }

    #[test]
    fn test_draw_ui_projection() {
        let mut app = test_app();
        update(&mut app, Action::SwitchTab(Tab::Verse));
        update(&mut app, Action::LoadPassage("John 3:16".into()));
        update(&mut app, Action::ToggleProjection);
        let mut tui = TuiState::new();
        let text = render(&app, &mut tui);
        assert!(text.contains("For God so loved the world"));
        assert!(text.contains("John 3:16 (KJV)"));
        assert!(!text.contains("Reference"));
    }

    #[test]
    fn test_draw_ui_error_popup() {
        let mut app = test_app();
        update(&mut app, Action::LoadSong("999".into()));
        let mut tui = TuiState::new();
        let text = render(&app, &mut tui);
        assert!(text.contains("Song #999 not found."));
    }
}
