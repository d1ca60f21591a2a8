//! Shelf controller: binds the row list, preferences, presenter and
//! navigation together.
//!
//! All methods run on the UI thread. Nothing here fails: missing rows only
//! skip optional visual updates.

use tracing::{debug, info};

use crate::{
    config::ShelfPreferences,
    library::Book,
    state::{PlayPauseRequester, ShelfEvent},
    ui::{
        navigation::{Navigator, Route},
        shelf::{
            layout::ShelfLayout,
            surface::{PlayIcon, ShelfAdapter, ShelfView},
        },
    },
};

/// Menu entries of the shelf header bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// Open settings.
    Settings,
    /// Open the current book.
    Current,
    /// Toggle grid/list.
    ChangeLayout,
}

impl MenuAction {
    /// All entries in menu order.
    pub const ALL: [MenuAction; 3] = [
        MenuAction::Current,
        MenuAction::ChangeLayout,
        MenuAction::Settings,
    ];

    /// Action name used by the header bar.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            MenuAction::Settings => "settings",
            MenuAction::Current => "current",
            MenuAction::ChangeLayout => "change-layout",
        }
    }

    /// Parses an action name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.name() == name)
    }
}

/// How a row was clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickType {
    /// Plain click: open the book.
    Regular,
    /// Long press: edit the book.
    Long,
}

/// What the header bar menu should currently show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShelfMenu {
    /// "Current book" entry visibility.
    pub current_visible: bool,
    /// Icon of the layout toggle: the mode a press switches to.
    pub layout_icon: &'static str,
}

/// Orchestrates the shelf.
pub struct ShelfController<S, N, P, R> {
    surface: S,
    navigator: N,
    prefs: P,
    presenter: R,
    columns: u32,
    current_book: Option<Book>,
    first_play_state_update: bool,
}

impl<S, N, P, R> ShelfController<S, N, P, R>
where
    S: ShelfAdapter + ShelfView,
    N: Navigator,
    P: ShelfPreferences,
    R: PlayPauseRequester,
{
    /// Creates the controller and applies the persisted display mode.
    ///
    /// # Arguments
    ///
    /// * `surface` - Row list and surrounding widgets
    /// * `navigator` - Navigation stack
    /// * `prefs` - Display mode and current book storage
    /// * `presenter` - Receiver of play/pause requests
    /// * `columns` - Grid column count, see `amount_of_columns`
    pub fn new(surface: S, navigator: N, prefs: P, presenter: R, columns: u32) -> Self {
        let mut controller = Self {
            surface,
            navigator,
            prefs,
            presenter,
            columns,
            current_book: None,
            first_play_state_update: true,
        };
        controller.init_layout();
        controller
    }

    /// The shelf surface the controller drives.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the shelf surface.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// The navigator that opens settings and book pages.
    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// The book loaded in the player, as last reported.
    pub fn current_book(&self) -> Option<&Book> {
        self.current_book.as_ref()
    }

    /// Current grid column count.
    pub fn columns(&self) -> u32 {
        self.columns
    }

    /// Menu state derived from the current book and display mode.
    pub fn menu(&self) -> ShelfMenu {
        ShelfMenu {
            current_visible: self.current_book.is_some(),
            layout_icon: self.prefs.display_mode().inverted().icon_name(),
        }
    }

    /// Handles a menu entry.
    pub fn on_menu_action(&mut self, action: MenuAction) {
        match action {
            MenuAction::Settings => self.navigator.push(Route::Settings),
            MenuAction::Current => match self.prefs.current_book_id() {
                Some(book_id) => self.invoke_book_selection(book_id),
                None => debug!("No current book to open"),
            },
            MenuAction::ChangeLayout => {
                let mode = self.prefs.display_mode().inverted();
                info!("Switching shelf to {:?}", mode);
                self.prefs.set_display_mode(mode);
                self.init_layout();
            }
        }
    }

    /// Handles a menu entry by name. Returns `false` for unknown names.
    pub fn on_menu_item(&mut self, name: &str) -> bool {
        match MenuAction::from_name(name) {
            Some(action) => {
                self.on_menu_action(action);
                true
            }
            None => false,
        }
    }

    /// Handles a click on a shelf row.
    pub fn on_book_clicked(&mut self, book_id: i64, click: ClickType) {
        match click {
            ClickType::Regular => self.invoke_book_selection(book_id),
            ClickType::Long => {
                let book = self.surface.books().iter().find(|b| b.id == book_id).cloned();
                if let Some(book) = book {
                    self.surface.show_edit_book(&book);
                }
            }
        }
    }

    /// Handles a press on the play/pause button.
    pub fn on_fab_clicked(&self) {
        self.presenter.play_pause_requested();
    }

    /// Updates the grid column count, relaying out when it changed.
    pub fn set_columns(&mut self, columns: u32) {
        if self.columns != columns {
            self.columns = columns;
            self.init_layout();
        }
    }

    /// Dispatches a presenter event.
    pub fn handle_event(&mut self, event: ShelfEvent) {
        match event {
            ShelfEvent::NewBooks(books) => self.new_books(books),
            ShelfEvent::CurrentBookChanged(book) => self.current_book_changed(book),
            ShelfEvent::PlayerPlaying(playing) => self.set_player_playing(playing),
            ShelfEvent::NoFolderWarning => self.show_no_folder_warning(),
            ShelfEvent::Loading(loading) => self.show_loading(loading),
        }
    }

    /// There is a completely new set of books.
    pub fn new_books(&mut self, books: Vec<Book>) {
        info!("{} new books", books.len());
        self.surface.new_data_set(books);
    }

    /// The book marked as current changed. Refreshes the affected rows and
    /// the play/pause button.
    pub fn current_book_changed(&mut self, current_book: Option<Book>) {
        info!(
            "Current book changed: {:?}",
            current_book.as_ref().map(|b| b.name.as_str())
        );
        let had_current = self.current_book.is_some();
        let current_id = current_book.as_ref().map(|b| b.id);
        self.current_book = current_book;

        for position in 0..self.surface.item_count() {
            let Some(item_id) = self.surface.item_id(position) else {
                continue;
            };
            let shows_indicator = self
                .surface
                .visible_row(item_id)
                .is_some_and(|row| row.indicator_visible);
            if Some(item_id) == current_id || shows_indicator {
                self.surface.notify_item_changed(position);
            }
        }

        let has_current = self.current_book.is_some();
        self.surface.set_fab_visible(has_current);
        if had_current != has_current {
            self.surface.invalidate_menu();
        }
    }

    /// Switches the play/pause icon. The very first update is not animated.
    pub fn set_player_playing(&mut self, playing: bool) {
        debug!("Player playing: {}", playing);
        let icon = if playing {
            PlayIcon::Pause
        } else {
            PlayIcon::Play
        };
        self.surface
            .set_play_icon(icon, !self.first_play_state_update);
        self.first_play_state_update = false;
    }

    /// Shows the no-folder warning unless it is already up.
    pub fn show_no_folder_warning(&mut self) {
        if !self.surface.is_no_folder_warning_showing() {
            self.surface.show_no_folder_warning();
        }
    }

    /// Shows or hides the loading indicator.
    pub fn show_loading(&mut self, loading: bool) {
        self.surface.set_loading_visible(loading);
    }

    fn init_layout(&mut self) {
        let mode = self.prefs.display_mode();
        self.surface
            .apply_layout(ShelfLayout::for_mode(mode, self.columns));
        self.surface.set_display_mode(mode);
        self.surface.invalidate_menu();
    }

    fn invoke_book_selection(&mut self, book_id: i64) {
        self.prefs.set_current_book_id(book_id);
        self.navigator.push(Route::BookDetail { book_id });
    }
}

#[cfg(test)]
mod tests {
    use std::{
        cell::Cell,
        collections::HashSet,
        rc::Rc,
    };

    use crate::{
        config::ShelfPreferences,
        library::Book,
        state::{
            DisplayMode::{self, Grid, List},
            PlayPauseRequester, ShelfEvent,
        },
        ui::{
            navigation::{Navigator, Route},
            shelf::{
                controller::{ClickType, MenuAction, ShelfController},
                layout::{LayoutManager, ShelfLayout},
                surface::{PlayIcon, ShelfAdapter, ShelfView, VisibleRow},
            },
        },
    };

    #[derive(Default)]
    struct FakePrefs {
        mode: Cell<DisplayMode>,
        current: Cell<Option<i64>>,
    }

    impl ShelfPreferences for Rc<FakePrefs> {
        fn display_mode(&self) -> DisplayMode {
            self.mode.get()
        }

        fn set_display_mode(&self, mode: DisplayMode) {
            self.mode.set(mode);
        }

        fn current_book_id(&self) -> Option<i64> {
            self.current.get()
        }

        fn set_current_book_id(&self, book_id: i64) {
            self.current.set(Some(book_id));
        }
    }

    #[derive(Default)]
    struct FakeSurface {
        books: Vec<Book>,
        mode: Option<DisplayMode>,
        layout: Option<ShelfLayout>,
        indicator_rows: HashSet<i64>,
        visible: HashSet<i64>,
        changed: Vec<usize>,
        fab_visible: Option<bool>,
        play_icons: Vec<(PlayIcon, bool)>,
        loading: bool,
        warning_showing: bool,
        warnings_shown: usize,
        edited: Vec<i64>,
        menu_invalidations: usize,
    }

    impl ShelfAdapter for FakeSurface {
        fn new_data_set(&mut self, books: Vec<Book>) {
            self.books = books;
        }

        fn books(&self) -> &[Book] {
            &self.books
        }

        fn set_display_mode(&mut self, mode: DisplayMode) {
            self.mode = Some(mode);
        }

        fn notify_item_changed(&mut self, position: usize) {
            self.changed.push(position);
        }
    }

    impl ShelfView for FakeSurface {
        fn apply_layout(&mut self, layout: ShelfLayout) {
            self.layout = Some(layout);
        }

        fn visible_row(&self, book_id: i64) -> Option<VisibleRow> {
            self.visible.contains(&book_id).then(|| VisibleRow {
                indicator_visible: self.indicator_rows.contains(&book_id),
            })
        }

        fn set_fab_visible(&mut self, visible: bool) {
            self.fab_visible = Some(visible);
        }

        fn set_play_icon(&mut self, icon: PlayIcon, animate: bool) {
            self.play_icons.push((icon, animate));
        }

        fn set_loading_visible(&mut self, visible: bool) {
            self.loading = visible;
        }

        fn is_no_folder_warning_showing(&self) -> bool {
            self.warning_showing
        }

        fn show_no_folder_warning(&mut self) {
            self.warning_showing = true;
            self.warnings_shown += 1;
        }

        fn show_edit_book(&mut self, book: &Book) {
            self.edited.push(book.id);
        }

        fn invalidate_menu(&mut self) {
            self.menu_invalidations += 1;
        }
    }

    /// Records each push together with the current book id persisted at
    /// that moment.
    struct FakeNavigator {
        prefs: Rc<FakePrefs>,
        pushed: Vec<(Route, Option<i64>)>,
    }

    impl Navigator for FakeNavigator {
        fn push(&mut self, route: Route) {
            self.pushed.push((route, self.prefs.current_book_id()));
        }
    }

    #[derive(Default)]
    struct FakePresenter {
        requests: Cell<usize>,
    }

    impl PlayPauseRequester for Rc<FakePresenter> {
        fn play_pause_requested(&self) {
            self.requests.set(self.requests.get() + 1);
        }
    }

    type Controller =
        ShelfController<FakeSurface, FakeNavigator, Rc<FakePrefs>, Rc<FakePresenter>>;

    fn book(id: i64) -> Book {
        Book {
            id,
            name: format!("Book {}", id),
            root: format!("/books/{}", id),
            ..Book::default()
        }
    }

    fn controller_with(mode: DisplayMode) -> (Controller, Rc<FakePrefs>, Rc<FakePresenter>) {
        let prefs = Rc::new(FakePrefs::default());
        prefs.mode.set(mode);
        let presenter = Rc::new(FakePresenter::default());
        let navigator = FakeNavigator {
            prefs: prefs.clone(),
            pushed: Vec::new(),
        };
        let controller = ShelfController::new(
            FakeSurface::default(),
            navigator,
            prefs.clone(),
            presenter.clone(),
            4,
        );
        (controller, prefs, presenter)
    }

    #[test]
    fn test_initial_layout_follows_preference() {
        let (grid, _, _) = controller_with(Grid);
        assert_eq!(
            grid.surface().layout.unwrap().manager,
            LayoutManager::Grid { columns: 4 }
        );
        assert_eq!(grid.surface().mode, Some(Grid));

        let (list, _, _) = controller_with(List);
        assert_eq!(list.surface().layout, Some(ShelfLayout::for_mode(List, 4)));
        assert!(list.surface().layout.unwrap().list_divider);
    }

    #[test]
    fn test_toggle_twice_restores_layout() {
        let (mut controller, prefs, _) = controller_with(Grid);
        let original = controller.surface().layout;

        controller.on_menu_action(MenuAction::ChangeLayout);
        assert_eq!(prefs.display_mode(), List);
        assert_eq!(controller.surface().layout, Some(ShelfLayout::for_mode(List, 4)));
        assert_eq!(controller.surface().mode, Some(List));

        controller.on_menu_action(MenuAction::ChangeLayout);
        assert_eq!(prefs.display_mode(), Grid);
        assert_eq!(controller.surface().layout, original);
    }

    #[test]
    fn test_menu_shows_inverted_icon_and_current_entry() {
        let (mut controller, _, _) = controller_with(Grid);
        let menu = controller.menu();
        assert_eq!(menu.layout_icon, List.icon_name());
        assert!(!menu.current_visible);

        controller.current_book_changed(Some(book(1)));
        controller.on_menu_action(MenuAction::ChangeLayout);

        let menu = controller.menu();
        assert_eq!(menu.layout_icon, Grid.icon_name());
        assert!(menu.current_visible);
    }

    #[test]
    fn test_new_books_replace_dataset_in_order() {
        let (mut controller, _, _) = controller_with(Grid);
        controller.new_books(vec![book(1), book(2)]);
        controller.handle_event(ShelfEvent::NewBooks(vec![book(3), book(1)]));

        assert_eq!(controller.surface().books(), [book(3), book(1)]);
    }

    #[test]
    fn test_selection_persists_before_navigation() {
        let (mut controller, prefs, _) = controller_with(Grid);
        controller.new_books(vec![book(7)]);

        controller.on_book_clicked(7, ClickType::Regular);

        assert_eq!(prefs.current_book_id(), Some(7));
        assert_eq!(
            controller.navigator().pushed,
            [(Route::BookDetail { book_id: 7 }, Some(7))]
        );
    }

    #[test]
    fn test_long_click_edits_instead_of_navigating() {
        let (mut controller, prefs, _) = controller_with(Grid);
        controller.new_books(vec![book(7)]);

        controller.on_book_clicked(7, ClickType::Long);
        controller.on_book_clicked(99, ClickType::Long);

        assert_eq!(controller.surface().edited, [7]);
        assert!(controller.navigator().pushed.is_empty());
        assert_eq!(prefs.current_book_id(), None);
    }

    #[test]
    fn test_current_menu_entry_opens_persisted_book() {
        let (mut controller, prefs, _) = controller_with(Grid);

        controller.on_menu_action(MenuAction::Current);
        assert!(controller.navigator().pushed.is_empty());

        prefs.set_current_book_id(3);
        controller.on_menu_action(MenuAction::Current);
        assert_eq!(
            controller.navigator().pushed,
            [(Route::BookDetail { book_id: 3 }, Some(3))]
        );
    }

    #[test]
    fn test_menu_items_by_name() {
        let (mut controller, _, _) = controller_with(Grid);

        assert!(controller.on_menu_item("settings"));
        assert!(!controller.on_menu_item("search"));
        assert_eq!(controller.navigator().pushed, [(Route::Settings, None)]);
    }

    #[test]
    fn test_current_book_changed_refreshes_only_affected_rows() {
        let (mut controller, _, _) = controller_with(Grid);
        controller.new_books(vec![book(1), book(2), book(3), book(4)]);
        {
            let surface = controller.surface_mut();
            // Row 2 is on screen with the old indicator; row 4 shows it too
            // but is scrolled away.
            surface.visible.extend([1, 2, 3]);
            surface.indicator_rows.extend([2, 4]);
        }

        controller.current_book_changed(Some(book(3)));

        assert_eq!(controller.surface().changed, [1, 2]);
        assert_eq!(controller.current_book(), Some(&book(3)));
    }

    #[test]
    fn test_fab_visibility_tracks_current_book() {
        let (mut controller, _, _) = controller_with(Grid);
        let invalidations = controller.surface().menu_invalidations;

        controller.current_book_changed(Some(book(1)));
        assert_eq!(controller.surface().fab_visible, Some(true));

        controller.current_book_changed(Some(book(2)));
        assert_eq!(controller.surface().fab_visible, Some(true));

        controller.handle_event(ShelfEvent::CurrentBookChanged(None));
        assert_eq!(controller.surface().fab_visible, Some(false));

        // Only the two presence flips rebuild the menu.
        assert_eq!(controller.surface().menu_invalidations, invalidations + 2);
    }

    #[test]
    fn test_first_play_state_is_not_animated() {
        let (mut controller, _, _) = controller_with(Grid);

        controller.set_player_playing(false);
        controller.set_player_playing(true);
        controller.handle_event(ShelfEvent::PlayerPlaying(false));

        assert_eq!(
            controller.surface().play_icons,
            [
                (PlayIcon::Play, false),
                (PlayIcon::Pause, true),
                (PlayIcon::Play, true)
            ]
        );
    }

    #[test]
    fn test_fab_forwards_play_pause() {
        let (controller, _, presenter) = controller_with(Grid);
        controller.on_fab_clicked();
        controller.on_fab_clicked();
        assert_eq!(presenter.requests.get(), 2);
    }

    #[test]
    fn test_no_folder_warning_is_not_stacked() {
        let (mut controller, _, _) = controller_with(Grid);

        controller.show_no_folder_warning();
        controller.handle_event(ShelfEvent::NoFolderWarning);

        assert_eq!(controller.surface().warnings_shown, 1);
    }

    #[test]
    fn test_loading_indicator() {
        let (mut controller, _, _) = controller_with(Grid);

        controller.handle_event(ShelfEvent::Loading(true));
        assert!(controller.surface().loading);

        controller.show_loading(false);
        assert!(!controller.surface().loading);
    }

    #[test]
    fn test_column_change_relayouts_grid() {
        let (mut controller, _, _) = controller_with(Grid);

        controller.set_columns(6);

        assert_eq!(controller.columns(), 6);
        assert_eq!(
            controller.surface().layout.unwrap().manager,
            LayoutManager::Grid { columns: 6 }
        );
    }

    #[test]
    fn test_action_names_round_trip() {
        for action in MenuAction::ALL {
            assert_eq!(MenuAction::from_name(action.name()), Some(action));
        }
    }
}
