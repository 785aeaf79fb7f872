//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Background Work
//!
//! Two kinds of work leave the UI thread, both on tokio tasks that report
//! back through an `mpsc` channel as `Action`s:
//!
//! - the startup load of the verse and hymnal files (concurrently)
//! - remote passage fetches requested via `Effect::FetchPassage`
//!
//! ## Redraw Strategy
//!
//! The loop sleeps up to 500ms waiting for input (100ms while something is
//! in flight) and only redraws after an event or a background action.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::navigation::Direction;
use crate::core::reference::Reference;
use crate::core::state::{App, Tab};
use crate::library::{
    BibleApiSource, DataStatus, FallbackSource, Hymnal, PassageSource, VerseStore,
    fetch_with_fallback,
};
use crate::tui::component::EventHandler;
use crate::tui::components::{InputBox, InputEvent};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub input_box: InputBox,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            input_box: InputBox::new(),
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableBracketedPaste)?;
        info!("Terminal modes enabled (bracketed paste)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableBracketedPaste);
    }
}

/// Build the remote passage source, or `None` when remote lookups are off
/// or the client can't be built.
pub fn build_remote_source(config: &ResolvedConfig) -> Option<Arc<dyn PassageSource>> {
    if !config.remote_enabled {
        info!("Remote passage source disabled");
        return None;
    }
    match BibleApiSource::new(
        Some(config.remote_base_url.clone()),
        &config.translation,
        config.remote_timeout,
    ) {
        Ok(source) => Some(Arc::new(source)),
        Err(e) => {
            warn!("Remote passage source unavailable: {}", e);
            None
        }
    }
}

/// Map a terminal event to a core action, updating TUI-local state on the
/// way. Returns `None` for events the TUI handles by itself.
pub fn map_event(app: &App, tui: &mut TuiState, event: &TuiEvent) -> Option<Action> {
    if matches!(event, TuiEvent::ForceQuit) {
        return Some(Action::Quit);
    }

    // An open error popup swallows everything but its own dismissal
    if app.error.is_some() {
        return match event {
            TuiEvent::Escape | TuiEvent::Submit => Some(Action::DismissError),
            _ => None,
        };
    }

    if app.projecting {
        return match event {
            TuiEvent::Escape => Some(Action::CloseProjection),
            TuiEvent::ToggleProjection => Some(Action::ToggleProjection),
            TuiEvent::Next | TuiEvent::InputChar(' ') => Some(Action::Navigate(Direction::Forward)),
            TuiEvent::Previous => Some(Action::Navigate(Direction::Backward)),
            _ => None,
        };
    }

    match event {
        TuiEvent::Escape => Some(Action::Quit),
        TuiEvent::SwitchTab => {
            tui.input_box.clear();
            Some(Action::SwitchTab(app.tab.next()))
        }
        TuiEvent::Submit => {
            let input = tui.input_box.value();
            Some(match app.tab {
                Tab::Song => Action::LoadSong(input),
                Tab::Verse => Action::LoadPassage(input),
            })
        }
        TuiEvent::Next => Some(Action::Navigate(Direction::Forward)),
        TuiEvent::Previous => Some(Action::Navigate(Direction::Backward)),
        TuiEvent::ToggleProjection => Some(Action::ToggleProjection),
        TuiEvent::InputChar(_) | TuiEvent::Paste(_) | TuiEvent::Backspace => {
            if let Some(InputEvent::ContentChanged) = tui.input_box.handle_event(event) {
                debug!("Input: {:?}", tui.input_box.buffer);
            }
            None
        }
        TuiEvent::ForceQuit | TuiEvent::Resize => None,
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let mut app = App::from_config(&config);
    let mut tui = TuiState::new();

    let remote = build_remote_source(&config);
    if remote.is_none() {
        app.remote_enabled = false;
    }

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    spawn_data_load(&config, tx.clone());

    let mut needs_redraw = true; // Force first frame

    loop {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        let busy = app.is_fetching() || app.data_status() == &DataStatus::Loading;
        let timeout = if busy {
            Duration::from_millis(100)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let Some(action) = map_event(&app, &mut tui, &event) else {
                continue;
            };
            debug!("Dispatching {:?}", action);
            match update(&mut app, action) {
                Effect::Quit => should_quit = true,
                Effect::FetchPassage(reference) => {
                    spawn_fetch(remote.clone(), reference, tx.clone());
                }
                Effect::None => {}
            }
        }

        if should_quit {
            break;
        }

        // Handle background task actions
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            if let Effect::FetchPassage(reference) = update(&mut app, action) {
                spawn_fetch(remote.clone(), reference, tx.clone());
            }
        }
    }

    info!("Shutting down");
    ratatui::restore();
    Ok(())
}

fn spawn_data_load(config: &ResolvedConfig, tx: mpsc::Sender<Action>) {
    let verses_path = config.verses_path.clone();
    let hymnal_path = config.hymnal_path.clone();
    let hymnal_format = config.hymnal_format;
    info!(
        "Loading data: verses={}, hymnal={} ({:?})",
        verses_path.display(),
        hymnal_path.display(),
        hymnal_format
    );

    tokio::spawn(async move {
        let (verses, hymnal) = futures::join!(
            VerseStore::load(&verses_path),
            Hymnal::load(&hymnal_path, hymnal_format)
        );
        if let Err(e) = &verses {
            warn!("Verse data unavailable: {}", e);
        }
        if let Err(e) = &hymnal {
            warn!("Hymnal data unavailable: {}", e);
        }
        if tx.send(Action::DataLoaded { verses, hymnal }).is_err() {
            warn!("Failed to send DataLoaded: receiver dropped");
        }
    });
}

fn spawn_fetch(
    remote: Option<Arc<dyn PassageSource>>,
    reference: Reference,
    tx: mpsc::Sender<Action>,
) {
    info!("Spawning passage fetch for {}", reference);
    tokio::spawn(async move {
        let fallback = FallbackSource::new();
        let verses = match &remote {
            Some(primary) => fetch_with_fallback(primary.as_ref(), &fallback, &reference).await,
            None => fallback.passage(&reference),
        };
        if tx
            .send(Action::RemotePassageLoaded { reference, verses })
            .is_err()
        {
            warn!("Failed to send passage: receiver dropped");
        }
    });
}
