//! Shelf presenter: owns what the shelf shows and reports changes as events.
//!
//! The presenter keeps the book list, the resolved current book and the
//! player/loading flags. UI code subscribes to [`ShelfEvent`]s and forwards
//! them to the shelf controller on the main thread.

use std::sync::Arc;

use {
    async_channel::{Receiver, Sender, unbounded},
    parking_lot::RwLock,
    tokio::{sync::Mutex, task::spawn_blocking},
    tracing::{debug, info},
};

use crate::{
    config::{SettingsEvent, SettingsManager},
    error::{ErrorReporter, ResultExt, Severity, domain::LibraryError},
    library::{Book, BookDatabase, BookScanner},
};

/// Receiver of play/pause requests coming from the shelf.
pub trait PlayPauseRequester {
    /// The user pressed the play/pause button.
    fn play_pause_requested(&self);
}

/// Presenter callbacks delivered to the shelf.
#[derive(Debug, Clone, PartialEq)]
pub enum ShelfEvent {
    /// A completely new set of books.
    NewBooks(Vec<Book>),
    /// The book loaded in the player changed.
    CurrentBookChanged(Option<Book>),
    /// The player started or stopped.
    PlayerPlaying(bool),
    /// No audiobook folder is configured.
    NoFolderWarning,
    /// A library load started or finished.
    Loading(bool),
}

#[derive(Debug, Default)]
struct PresenterState {
    books: Vec<Book>,
    current_book: Option<Book>,
    playing: bool,
    loading: bool,
}

/// Shelf state holder with event fan-out.
#[derive(Debug)]
pub struct ShelfPresenter {
    settings: Arc<SettingsManager>,
    state: RwLock<PresenterState>,
    subscribers: RwLock<Vec<Sender<ShelfEvent>>>,
    /// Held while the shelf is loaded from the library, one load at a time.
    library: Mutex<()>,
}

impl ShelfPresenter {
    /// Creates a presenter with an empty shelf.
    pub fn new(settings: Arc<SettingsManager>) -> Self {
        Self {
            settings,
            state: RwLock::new(PresenterState::default()),
            subscribers: RwLock::new(Vec::new()),
            library: Mutex::new(()),
        }
    }

    /// Subscribes a view and replays the current state to it.
    ///
    /// The returned receiver first yields `Loading`, `NewBooks`,
    /// `CurrentBookChanged` and `PlayerPlaying`, followed by
    /// `NoFolderWarning` when no audiobook folder is configured. Later
    /// changes follow as they happen.
    pub fn attach(&self) -> Receiver<ShelfEvent> {
        let (tx, rx) = unbounded();
        {
            let state = self.state.read();
            let snapshot = [
                ShelfEvent::Loading(state.loading),
                ShelfEvent::NewBooks(state.books.clone()),
                ShelfEvent::CurrentBookChanged(state.current_book.clone()),
                ShelfEvent::PlayerPlaying(state.playing),
            ];
            for event in snapshot {
                let _ = tx.try_send(event);
            }
        }
        if self.settings.get_settings().audiobook_directories.is_empty() {
            let _ = tx.try_send(ShelfEvent::NoFolderWarning);
        }

        self.subscribers.write().push(tx);
        debug!("Shelf view attached to presenter");
        rx
    }

    /// Replaces the book list and re-resolves the current book.
    pub fn set_books(&self, books: Vec<Book>) {
        info!("{} books on the shelf", books.len());
        self.state.write().books = books.clone();
        self.broadcast_event(&ShelfEvent::NewBooks(books));
        self.resolve_current_book();
    }

    /// Sets the player state.
    pub fn set_playing(&self, playing: bool) {
        let changed = {
            let mut state = self.state.write();
            let changed = state.playing != playing;
            state.playing = playing;
            changed
        };
        if changed {
            self.broadcast_event(&ShelfEvent::PlayerPlaying(playing));
        }
    }

    /// Shows or hides the loading indicator.
    pub fn set_loading(&self, loading: bool) {
        self.state.write().loading = loading;
        self.broadcast_event(&ShelfEvent::Loading(loading));
    }

    /// Reacts to a settings change.
    pub fn handle_settings_event(&self, event: &SettingsEvent) {
        match event {
            SettingsEvent::CurrentBookChanged(_) => self.resolve_current_book(),
            SettingsEvent::DirectoriesChanged(directories) if directories.is_empty() => {
                self.broadcast_event(&ShelfEvent::NoFolderWarning);
            }
            SettingsEvent::DirectoriesChanged(_)
            | SettingsEvent::DisplayModeChanged(_)
            | SettingsEvent::CoverWidthChanged(_) => {}
        }
    }

    /// Scans the audiobook folders, stores what was found and reloads the
    /// shelf from the database.
    ///
    /// Scan problems are logged and the shelf still shows what the database
    /// holds. `Loading(false)` is emitted even when the database fails.
    /// Overlapping reloads and refreshes wait for each other.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError` if the stored books cannot be read.
    pub async fn reload(
        &self,
        database: &BookDatabase,
        scanner: &BookScanner,
    ) -> Result<(), LibraryError> {
        let _library = self.library.lock().await;
        self.set_loading(true);
        let result = self.load(database, scanner).await;
        self.set_loading(false);
        result
    }

    /// Reloads the shelf from the database without scanning.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError` if the stored books cannot be read.
    pub async fn refresh(&self, database: &BookDatabase) -> Result<(), LibraryError> {
        let _library = self.library.lock().await;
        self.show_stored_books(database).await
    }

    async fn show_stored_books(&self, database: &BookDatabase) -> Result<(), LibraryError> {
        let books = database.get_books().await?;
        self.set_books(books);
        Ok(())
    }

    async fn load(&self, database: &BookDatabase, scanner: &BookScanner) -> Result<(), LibraryError> {
        let scanner = scanner.clone();
        let scanned = spawn_blocking(move || scanner.scan())
            .await
            .add_context("Scan task did not complete")
            .and_then(|scan| scan.add_context("Scanning audiobook folders"));

        match scanned {
            Ok(found) => {
                for new_book in &found {
                    if let Err(e) = database
                        .upsert_book(new_book)
                        .await
                        .add_contextf(format!("Storing book at {}", new_book.root))
                    {
                        ErrorReporter::report(Severity::Warn, &e, "reload");
                    }
                }
            }
            Err(e) => ErrorReporter::report(Severity::Warn, &e, "reload"),
        }

        self.show_stored_books(database).await
    }

    /// Books currently on the shelf.
    pub fn books(&self) -> Vec<Book> {
        self.state.read().books.clone()
    }

    /// Looks up a shelf book by id.
    pub fn book(&self, id: i64) -> Option<Book> {
        self.state.read().books.iter().find(|b| b.id == id).cloned()
    }

    /// The book loaded in the player.
    pub fn current_book(&self) -> Option<Book> {
        self.state.read().current_book.clone()
    }

    /// Whether the player is playing.
    pub fn is_playing(&self) -> bool {
        self.state.read().playing
    }

    /// Whether a library load is running.
    pub fn is_loading(&self) -> bool {
        self.state.read().loading
    }

    fn resolve_current_book(&self) {
        let current_id = self.settings.get_settings().current_book_id;
        let (changed, resolved, stopped) = {
            let mut state = self.state.write();
            let resolved = current_id.and_then(|id| state.books.iter().find(|b| b.id == id).cloned());
            let changed = state.current_book.as_ref().map(|b| b.id) != resolved.as_ref().map(|b| b.id);
            // Nothing left to play once the current book disappears.
            let stopped = resolved.is_none() && state.playing;
            if stopped {
                state.playing = false;
            }
            state.current_book = resolved.clone();
            (changed, resolved, stopped)
        };

        if changed {
            debug!("Current book resolved to {:?}", resolved.as_ref().map(|b| b.id));
            self.broadcast_event(&ShelfEvent::CurrentBookChanged(resolved));
        }
        if stopped {
            self.broadcast_event(&ShelfEvent::PlayerPlaying(false));
        }
    }

    fn broadcast_event(&self, event: &ShelfEvent) {
        self.subscribers
            .write()
            .retain(|tx| tx.try_send(event.clone()).is_ok());
    }
}

impl PlayPauseRequester for ShelfPresenter {
    fn play_pause_requested(&self) {
        if self.current_book().is_none() {
            debug!("Ignoring play/pause without a current book");
            return;
        }
        let playing = !self.is_playing();
        self.set_playing(playing);
    }
}

impl<T: PlayPauseRequester + ?Sized> PlayPauseRequester for Arc<T> {
    fn play_pause_requested(&self) {
        (**self).play_pause_requested();
    }
}

#[cfg(test)]
mod tests {
    use std::{fs::File, sync::Arc};

    use {
        async_channel::Receiver,
        tempfile::{TempDir, tempdir},
    };

    use crate::{
        config::SettingsManager,
        library::{Book, BookDatabase, BookScanner, NewBook},
        state::presenter::{PlayPauseRequester, ShelfEvent, ShelfPresenter},
    };

    fn book(id: i64, name: &str) -> Book {
        Book {
            id,
            name: name.to_string(),
            root: format!("/books/{}", name),
            ..Book::default()
        }
    }

    fn presenter() -> (TempDir, Arc<SettingsManager>, ShelfPresenter) {
        let dir = tempdir().unwrap();
        let settings =
            Arc::new(SettingsManager::with_config_path(dir.path().join("settings.json")).unwrap());
        let presenter = ShelfPresenter::new(settings.clone());
        (dir, settings, presenter)
    }

    fn drain(rx: &Receiver<ShelfEvent>) -> Vec<ShelfEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    #[test]
    fn test_attach_replays_state_and_warns_without_folders() {
        let (_dir, _settings, presenter) = presenter();
        presenter.set_books(vec![book(1, "a")]);

        let events = drain(&presenter.attach());

        assert_eq!(
            events,
            vec![
                ShelfEvent::Loading(false),
                ShelfEvent::NewBooks(vec![book(1, "a")]),
                ShelfEvent::CurrentBookChanged(None),
                ShelfEvent::PlayerPlaying(false),
                ShelfEvent::NoFolderWarning,
            ]
        );
    }

    #[test]
    fn test_attach_without_warning_when_folder_configured() {
        let (_dir, settings, presenter) = presenter();
        settings
            .modify(|s| s.audiobook_directories = vec!["/books".to_string()])
            .unwrap();

        let events = drain(&presenter.attach());

        assert!(!events.contains(&ShelfEvent::NoFolderWarning));
    }

    #[test]
    fn test_current_book_follows_settings() {
        let (_dir, settings, presenter) = presenter();
        let changes = settings.subscribe();
        presenter.set_books(vec![book(1, "a"), book(2, "b")]);
        let rx = presenter.attach();
        drain(&rx);

        settings.modify(|s| s.current_book_id = Some(2)).unwrap();
        presenter.handle_settings_event(&changes.try_recv().unwrap());

        assert_eq!(
            drain(&rx),
            vec![ShelfEvent::CurrentBookChanged(Some(book(2, "b")))]
        );
        assert_eq!(presenter.current_book(), Some(book(2, "b")));
    }

    #[test]
    fn test_removed_current_book_stops_playback() {
        let (_dir, settings, presenter) = presenter();
        settings.modify(|s| s.current_book_id = Some(1)).unwrap();
        presenter.set_books(vec![book(1, "a")]);
        presenter.play_pause_requested();
        assert!(presenter.is_playing());
        let rx = presenter.attach();
        drain(&rx);

        presenter.set_books(vec![book(2, "b")]);

        assert_eq!(
            drain(&rx),
            vec![
                ShelfEvent::NewBooks(vec![book(2, "b")]),
                ShelfEvent::CurrentBookChanged(None),
                ShelfEvent::PlayerPlaying(false),
            ]
        );
    }

    #[test]
    fn test_play_pause_toggles_only_with_current_book() {
        let (_dir, settings, presenter) = presenter();
        presenter.set_books(vec![book(1, "a")]);

        presenter.play_pause_requested();
        assert!(!presenter.is_playing());

        settings.modify(|s| s.current_book_id = Some(1)).unwrap();
        presenter.set_books(presenter.books());
        let rx = presenter.attach();
        drain(&rx);

        presenter.play_pause_requested();
        presenter.play_pause_requested();

        assert_eq!(
            drain(&rx),
            vec![
                ShelfEvent::PlayerPlaying(true),
                ShelfEvent::PlayerPlaying(false)
            ]
        );
    }

    #[test]
    fn test_clearing_folders_warns() {
        let (_dir, settings, presenter) = presenter();
        settings
            .modify(|s| s.audiobook_directories = vec!["/books".to_string()])
            .unwrap();
        let changes = settings.subscribe();
        let rx = presenter.attach();
        drain(&rx);

        settings.modify(|s| s.audiobook_directories.clear()).unwrap();
        presenter.handle_settings_event(&changes.try_recv().unwrap());

        assert_eq!(drain(&rx), vec![ShelfEvent::NoFolderWarning]);
    }

    #[tokio::test]
    async fn test_reload_scans_and_wraps_in_loading() {
        let (dir, settings, presenter) = presenter();
        let library = dir.path().join("library");
        std::fs::create_dir_all(library.join("Persuasion")).unwrap();
        File::create(library.join("Persuasion").join("01.mp3")).unwrap();
        settings
            .modify(|s| s.audiobook_directories = vec![library.to_string_lossy().into_owned()])
            .unwrap();
        let database = BookDatabase::in_memory().await.unwrap();
        let rx = presenter.attach();
        drain(&rx);

        presenter
            .reload(&database, &BookScanner::new([library]))
            .await
            .unwrap();

        let events = drain(&rx);
        assert_eq!(events.first(), Some(&ShelfEvent::Loading(true)));
        assert_eq!(events.last(), Some(&ShelfEvent::Loading(false)));
        let names: Vec<String> = presenter.books().into_iter().map(|b| b.name).collect();
        assert_eq!(names, ["Persuasion"]);
        assert!(!presenter.is_loading());
    }

    #[tokio::test]
    async fn test_overlapping_reloads_run_one_after_another() {
        let (dir, settings, presenter) = presenter();
        let library = dir.path().join("library");
        std::fs::create_dir_all(library.join("Emma")).unwrap();
        File::create(library.join("Emma").join("01.mp3")).unwrap();
        settings
            .modify(|s| s.audiobook_directories = vec![library.to_string_lossy().into_owned()])
            .unwrap();
        let database = BookDatabase::in_memory().await.unwrap();
        let scanner = BookScanner::new([library]);
        let rx = presenter.attach();
        drain(&rx);

        let (first, second) = tokio::join!(
            presenter.reload(&database, &scanner),
            presenter.reload(&database, &scanner)
        );
        first.unwrap();
        second.unwrap();

        let loading: Vec<ShelfEvent> = drain(&rx)
            .into_iter()
            .filter(|event| matches!(event, ShelfEvent::Loading(_)))
            .collect();
        assert_eq!(
            loading,
            [
                ShelfEvent::Loading(true),
                ShelfEvent::Loading(false),
                ShelfEvent::Loading(true),
                ShelfEvent::Loading(false),
            ]
        );
        assert!(!presenter.is_loading());
    }

    #[tokio::test]
    async fn test_refresh_reads_database_without_loading() {
        let (_dir, _settings, presenter) = presenter();
        let database = BookDatabase::in_memory().await.unwrap();
        let stored = database
            .upsert_book(&NewBook {
                name: "Kim".to_string(),
                author: None,
                root: "/books/kim".to_string(),
                duration_ms: 0,
            })
            .await
            .unwrap();
        let rx = presenter.attach();
        drain(&rx);

        presenter.refresh(&database).await.unwrap();

        assert_eq!(drain(&rx), vec![ShelfEvent::NewBooks(vec![stored])]);
    }
}
