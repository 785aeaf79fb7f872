//! # Actions
//!
//! Everything that can happen in Pulpit becomes an `Action`.
//! Operator presses Enter on a reference? That's `Action::LoadPassage(text)`.
//! Remote source answers? That's `Action::RemotePassageLoaded { .. }`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state and returns an `Effect` describing any I/O the caller should
//! start. No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Parse failures, missing songs and missing verses all end up as
//! `app.error` or `app.status_message`; nothing here can fail the process.

use log::{debug, info, warn};

use crate::core::navigation::{Anchor, ContentItem, ContentKind, Direction};
use crate::core::reference::{self, Reference};
use crate::core::state::{App, Tab};
use crate::library::{
    DataError, DataStatus, Hymnal, Lookup, RemoteVerse, VerseKey, VerseStore,
};

pub const SCRIPTURE_TITLE: &str = "Scripture Reading";

#[derive(Debug)]
pub enum Action {
    /// Startup load of both data files finished.
    DataLoaded {
        verses: Result<VerseStore, DataError>,
        hymnal: Result<Hymnal, DataError>,
    },
    SwitchTab(Tab),
    /// Raw hymn number as typed.
    LoadSong(String),
    /// Raw reference as typed.
    LoadPassage(String),
    /// Remote (or fallback) answer to an earlier `Effect::FetchPassage`.
    RemotePassageLoaded {
        reference: Reference,
        verses: Vec<RemoteVerse>,
    },
    Navigate(Direction),
    ToggleProjection,
    CloseProjection,
    DismissError,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    /// Nothing local matched; ask the passage source.
    FetchPassage(Reference),
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::DataLoaded { verses, hymnal } => {
            data_loaded(app, verses, hymnal);
            Effect::None
        }
        Action::SwitchTab(tab) => {
            app.tab = tab;
            app.pending_fetch = None;
            app.navigator.reset();
            app.projecting = false;
            app.error = None;
            app.status_message = format!("{} tab", tab.label());
            Effect::None
        }
        Action::LoadSong(input) => load_song(app, &input),
        Action::LoadPassage(input) => load_passage(app, &input),
        Action::RemotePassageLoaded { reference, verses } => {
            remote_passage_loaded(app, reference, verses)
        }
        Action::Navigate(direction) => {
            if app.navigator.step(direction, &app.verses).is_none() {
                debug!("Navigate {:?}: nothing further", direction);
            }
            Effect::None
        }
        Action::ToggleProjection => {
            if !app.projecting && app.navigator.is_empty() {
                return fail(app, "Please load some content first!");
            }
            app.projecting = !app.projecting;
            Effect::None
        }
        Action::CloseProjection => {
            app.projecting = false;
            Effect::None
        }
        Action::DismissError => {
            app.error = None;
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

fn fail(app: &mut App, message: impl Into<String>) -> Effect {
    let message = message.into();
    warn!("{}", message);
    app.error = Some(message);
    Effect::None
}

fn data_loaded(
    app: &mut App,
    verses: Result<VerseStore, DataError>,
    hymnal: Result<Hymnal, DataError>,
) {
    let mut problems = Vec::new();

    match verses {
        Ok(store) => {
            app.verses = store;
            app.verse_status = DataStatus::Ready;
        }
        Err(e) => {
            problems.push(format!("verses: {e}"));
            app.verse_status = DataStatus::Unavailable(e.to_string());
        }
    }
    match hymnal {
        Ok(hymnal) => {
            app.hymnal = hymnal;
            app.hymnal_status = DataStatus::Ready;
        }
        Err(e) => {
            problems.push(format!("hymnal: {e}"));
            app.hymnal_status = DataStatus::Unavailable(e.to_string());
        }
    }

    if problems.is_empty() {
        app.status_message = format!(
            "Ready: {} verses, {} hymns",
            app.verses.len(),
            app.hymnal.len()
        );
        info!("{}", app.status_message);
    } else {
        app.status_message = "Data unavailable".to_string();
        fail(
            app,
            format!("Failed to load local data files ({})", problems.join("; ")),
        );
    }
}

fn load_song(app: &mut App, input: &str) -> Effect {
    app.pending_fetch = None;
    let input = input.trim();
    if input.is_empty() {
        return fail(app, "Please enter a song number.");
    }
    if let DataStatus::Unavailable(reason) = &app.hymnal_status {
        let message = format!("No hymnal data available ({reason}).");
        return fail(app, message);
    }

    let hymn = input.parse::<u32>().ok().and_then(|n| app.hymnal.get(n));
    let Some(hymn) = hymn else {
        return fail(app, format!("Song #{input} not found."));
    };

    let citation = format!("Hymn #{} - {}", hymn.number, hymn.title);
    let items: Vec<ContentItem> = hymn
        .stanzas
        .iter()
        .map(|stanza| {
            ContentItem::stanza(
                format!("{} - {}", hymn.title, stanza.title),
                stanza.text.clone(),
                citation.clone(),
            )
        })
        .collect();
    let main_title = format!("Hymn #{}", hymn.number);

    if items.is_empty() {
        return fail(app, format!("{citation} has no lyrics."));
    }

    app.navigator
        .load(items, ContentKind::Song, main_title, None);
    app.status_message = format!("Loaded {citation}");
    info!("{}", app.status_message);
    Effect::None
}

fn load_passage(app: &mut App, input: &str) -> Effect {
    app.pending_fetch = None;
    let reference = match reference::parse(input) {
        Ok(r) => r.canonicalized(),
        Err(e) => return fail(app, format!("Invalid reference: {e}")),
    };

    match app.verses.passage(&reference) {
        Ok(passage) if passage.is_empty() => {
            app.navigator.reset();
            app.status_message = format!("{reference} contains no verses");
            Effect::None
        }
        Ok(passage) if passage.iter().any(|(_, lookup)| lookup.is_found()) => {
            let items = passage
                .into_iter()
                .map(|(key, lookup)| match lookup {
                    Lookup::Found(text) => ContentItem::verse(key, text, &app.translation),
                    Lookup::NotFound => ContentItem::missing_verse(key, &app.translation),
                })
                .collect();
            show_passage(app, &reference, items);
            Effect::None
        }
        result => {
            if app.remote_enabled {
                app.pending_fetch = Some(reference.clone());
                app.status_message = format!("Fetching {reference}...");
                return Effect::FetchPassage(reference);
            }
            if matches!(app.verse_status, DataStatus::Unavailable(_)) {
                return fail(app, "No verse data available.");
            }
            match result {
                Err(e) => fail(app, format!("{e}.")),
                Ok(_) => fail(app, format!("{reference} not found.")),
            }
        }
    }
}

fn remote_passage_loaded(app: &mut App, reference: Reference, verses: Vec<RemoteVerse>) -> Effect {
    if app.pending_fetch.as_ref() != Some(&reference) {
        debug!("Dropping stale passage for {}", reference);
        return Effect::None;
    }
    app.pending_fetch = None;

    let items: Vec<ContentItem> = verses
        .into_iter()
        .filter(|v| v.chapter == reference.chapter)
        .map(|v| {
            let key = VerseKey::new(reference.book.clone(), v.chapter, v.verse);
            if !v.placeholder {
                app.verses.insert(&key, v.text.clone());
            }
            ContentItem::verse(key, v.text, &app.translation)
        })
        .collect();

    if items.is_empty() {
        return fail(app, format!("{reference} not found."));
    }
    show_passage(app, &reference, items);
    Effect::None
}

fn show_passage(app: &mut App, reference: &Reference, items: Vec<ContentItem>) {
    let anchor = Anchor {
        book: reference.book.clone(),
        chapter: reference.chapter,
        translation: app.translation.clone(),
    };
    app.navigator
        .load(items, ContentKind::Verse, SCRIPTURE_TITLE, Some(anchor));
    app.status_message = format!("Loaded {reference}");
    info!("{}", app.status_message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::VerseLookup;
    use crate::test_support::test_app;

    fn jude_verse(chapter: u32, verse: u32, text: &str, placeholder: bool) -> RemoteVerse {
        RemoteVerse {
            book: "Jude".into(),
            chapter,
            verse,
            text: text.into(),
            placeholder,
        }
    }

    #[test]
    fn test_load_song_builds_stanza_items() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::LoadSong(" 100 ".into())), Effect::None);
        assert!(app.error.is_none());

        let nav = &app.navigator;
        assert_eq!(nav.kind(), ContentKind::Song);
        assert_eq!(nav.main_title(), "Hymn #100");
        assert_eq!(nav.items().len(), 2);
        let first = nav.current().unwrap();
        assert_eq!(first.title, "Great Is Thy Faithfulness - 1");
        assert_eq!(first.citation, "Hymn #100 - Great Is Thy Faithfulness");
    }

    #[test]
    fn test_load_song_errors() {
        let mut app = test_app();
        update(&mut app, Action::LoadSong("   ".into()));
        assert_eq!(app.error.as_deref(), Some("Please enter a song number."));

        update(&mut app, Action::LoadSong("999".into()));
        assert_eq!(app.error.as_deref(), Some("Song #999 not found."));

        update(&mut app, Action::LoadSong("abc".into()));
        assert_eq!(app.error.as_deref(), Some("Song #abc not found."));
        assert!(app.navigator.is_empty());
    }

    #[test]
    fn test_load_song_without_hymnal_data() {
        let mut app = test_app();
        app.hymnal_status = DataStatus::Unavailable("missing file".into());
        update(&mut app, Action::LoadSong("100".into()));
        assert!(app.error.unwrap().starts_with("No hymnal data available"));
    }

    #[test]
    fn test_load_passage_range_with_placeholder() {
        let mut app = test_app();
        let effect = update(&mut app, Action::LoadPassage("john 3:16-18".into()));
        assert_eq!(effect, Effect::None);

        let nav = &app.navigator;
        assert_eq!(nav.kind(), ContentKind::Verse);
        assert_eq!(nav.main_title(), SCRIPTURE_TITLE);
        assert_eq!(nav.items().len(), 3);
        assert_eq!(nav.items()[0].citation, "John 3:16 (KJV)");
        assert_eq!(nav.items()[2].text, "[John 3:18 not found]");
        assert_eq!(nav.anchor().unwrap().book, "John");
    }

    #[test]
    fn test_load_passage_parse_error() {
        let mut app = test_app();
        update(&mut app, Action::LoadPassage("not a reference".into()));
        assert!(app.error.unwrap().contains("Book Chapter:Verse"));
    }

    #[test]
    fn test_load_passage_reversed_range_is_empty_not_error() {
        let mut app = test_app();
        update(&mut app, Action::LoadPassage("John 3:17-16".into()));
        assert!(app.error.is_none());
        assert!(app.navigator.is_empty());
        assert_eq!(app.status_message, "John 3:17-16 contains no verses");
    }

    #[test]
    fn test_load_passage_offline_not_found() {
        let mut app = test_app();
        update(&mut app, Action::LoadPassage("John 99".into()));
        assert_eq!(app.error.as_deref(), Some("John 99 not found."));

        update(&mut app, Action::LoadPassage("John 3:40".into()));
        assert_eq!(app.error.as_deref(), Some("John 3:40 not found."));
    }

    #[test]
    fn test_load_passage_without_verse_data() {
        let mut app = test_app();
        app.verses = VerseStore::empty();
        app.verse_status = DataStatus::Unavailable("missing".into());
        update(&mut app, Action::LoadPassage("John 3:16".into()));
        assert_eq!(app.error.as_deref(), Some("No verse data available."));
    }

    #[test]
    fn test_load_passage_missing_locally_requests_fetch() {
        let mut app = test_app();
        app.remote_enabled = true;
        let effect = update(&mut app, Action::LoadPassage("Jude 1:24".into()));
        assert_eq!(
            effect,
            Effect::FetchPassage(Reference::range("Jude", 1, 24, 24))
        );
        assert!(app.is_fetching());
        assert_eq!(app.pending_fetch, Some(Reference::range("Jude", 1, 24, 24)));
        assert!(app.error.is_none());
    }

    #[test]
    fn test_remote_passage_is_cached_for_extension() {
        let mut app = test_app();
        app.tab = Tab::Verse;
        let reference = Reference::range("Jude", 1, 24, 24);
        app.pending_fetch = Some(reference.clone());
        let verses = vec![
            jude_verse(1, 24, "Now unto him that is able", false),
            jude_verse(1, 25, "[Verse 25 not available in fallback data]", true),
        ];
        update(
            &mut app,
            Action::RemotePassageLoaded {
                reference,
                verses,
            },
        );

        assert_eq!(app.navigator.items().len(), 2);
        assert!(app.verses.contains(&VerseKey::new("Jude", 1, 24)));
        assert!(!app.verses.contains(&VerseKey::new("Jude", 1, 25)));
        assert!(!app.is_fetching());
    }

    #[test]
    fn test_remote_passage_after_tab_switch_is_dropped() {
        let mut app = test_app();
        app.remote_enabled = true;
        update(&mut app, Action::SwitchTab(Tab::Verse));
        update(&mut app, Action::LoadPassage("Jude 1:24".into()));
        update(&mut app, Action::SwitchTab(Tab::Song));
        assert!(!app.is_fetching());
        update(
            &mut app,
            Action::RemotePassageLoaded {
                reference: Reference::range("Jude", 1, 24, 24),
                verses: Vec::new(),
            },
        );
        assert!(app.navigator.is_empty());
        assert!(app.error.is_none());
    }

    #[test]
    fn test_late_remote_answer_does_not_replace_local_passage() {
        let mut app = test_app();
        app.remote_enabled = true;
        update(&mut app, Action::SwitchTab(Tab::Verse));
        let effect = update(&mut app, Action::LoadPassage("Jude 1:24".into()));
        assert!(matches!(effect, Effect::FetchPassage(_)));

        update(&mut app, Action::LoadPassage("John 3:16".into()));
        assert!(!app.is_fetching());
        assert_eq!(app.navigator.current().unwrap().title, "John 3:16");

        update(
            &mut app,
            Action::RemotePassageLoaded {
                reference: Reference::range("Jude", 1, 24, 24),
                verses: vec![jude_verse(1, 24, "Now unto him that is able", false)],
            },
        );
        assert_eq!(app.navigator.current().unwrap().title, "John 3:16");
        assert!(!app.verses.contains(&VerseKey::new("Jude", 1, 24)));
    }

    #[test]
    fn test_only_the_latest_fetch_is_shown() {
        let mut app = test_app();
        app.remote_enabled = true;
        app.tab = Tab::Verse;
        update(&mut app, Action::LoadPassage("Jude 1:24".into()));
        update(&mut app, Action::LoadPassage("Jude 1:25".into()));

        update(
            &mut app,
            Action::RemotePassageLoaded {
                reference: Reference::range("Jude", 1, 24, 24),
                verses: vec![jude_verse(1, 24, "Now unto him", false)],
            },
        );
        assert!(app.navigator.is_empty());
        assert!(app.is_fetching());

        update(
            &mut app,
            Action::RemotePassageLoaded {
                reference: Reference::range("Jude", 1, 25, 25),
                verses: vec![jude_verse(1, 25, "To the only wise God", false)],
            },
        );
        assert_eq!(app.navigator.current().unwrap().title, "Jude 1:25");
        assert!(!app.is_fetching());
    }

    #[test]
    fn test_remote_answer_for_other_chapter_is_not_found() {
        let mut app = test_app();
        app.tab = Tab::Verse;
        let reference = Reference::range("Jude", 1, 24, 24);
        app.pending_fetch = Some(reference.clone());
        update(
            &mut app,
            Action::RemotePassageLoaded {
                reference,
                verses: vec![jude_verse(2, 1, "wrong chapter", false)],
            },
        );
        assert!(app.navigator.is_empty());
        assert_eq!(app.error.as_deref(), Some("Jude 1:24 not found."));
        assert!(!app.status_message.starts_with("Loaded"));
    }

    #[test]
    fn test_load_passage_huge_range_is_bounded() {
        let mut app = test_app();
        update(&mut app, Action::LoadPassage("John 3:16-20000000".into()));
        assert!(app.error.is_none());
        assert_eq!(app.navigator.items().len(), 161);
        assert_eq!(app.navigator.current().unwrap().title, "John 3:16");
    }

    #[test]
    fn test_navigate_extends_verse_passage() {
        let mut app = test_app();
        update(&mut app, Action::LoadPassage("John 3:16".into()));
        assert!(app.can_step_forward());
        update(&mut app, Action::Navigate(Direction::Forward));
        assert_eq!(app.navigator.current().unwrap().title, "John 3:17");
        update(&mut app, Action::Navigate(Direction::Forward));
        assert_eq!(app.navigator.current().unwrap().title, "John 3:17");
        assert!(!app.can_step_forward());
    }

    #[test]
    fn test_switch_tab_resets_navigation() {
        let mut app = test_app();
        update(&mut app, Action::LoadSong("100".into()));
        update(&mut app, Action::ToggleProjection);
        assert!(app.projecting);

        update(&mut app, Action::SwitchTab(Tab::Verse));
        assert!(app.navigator.is_empty());
        assert!(!app.projecting);
        assert_eq!(app.tab, Tab::Verse);
    }

    #[test]
    fn test_projection_requires_content() {
        let mut app = test_app();
        update(&mut app, Action::ToggleProjection);
        assert!(!app.projecting);
        assert_eq!(app.error.as_deref(), Some("Please load some content first!"));

        update(&mut app, Action::DismissError);
        assert!(app.error.is_none());
    }

    #[test]
    fn test_data_loaded_failure_is_explicit() {
        let mut app = App::new("KJV", false);
        update(
            &mut app,
            Action::DataLoaded {
                verses: Err(DataError::Empty("verse file".into())),
                hymnal: Ok(Hymnal::empty()),
            },
        );
        assert_eq!(app.verse_status, DataStatus::Unavailable("verse file contains no entries".into()));
        assert_eq!(app.hymnal_status, DataStatus::Ready);
        assert!(app.error.unwrap().contains("verse file contains no entries"));
    }

    #[test]
    fn test_quit() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
