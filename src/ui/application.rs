//! Main application window and navigation structure.
//!
//! This module implements the `AudioshelfApplication` which owns settings,
//! database and presenter, builds the window around the shelf and runs the
//! loops that feed presenter events, user input and settings changes to the
//! shelf controller on the main thread.

use std::{cell::RefCell, rc::Rc, sync::Arc};

use {
    async_channel::{Receiver, Sender, unbounded},
    libadwaita::{
        Application, ApplicationWindow, NavigationPage, NavigationView,
        glib::{ExitCode, MainContext, idle_add_local_once},
        prelude::*,
    },
    tokio::runtime::Handle,
    tracing::{debug, info},
};

use crate::{
    config::{SettingsEvent, SettingsManager, get_data_dir},
    error::{ErrorReporter, ResultExt, Severity, UiError},
    library::{BookDatabase, BookScanner},
    state::{ShelfEvent, ShelfPresenter},
    ui::{
        router::NavigationRouter,
        shelf::{ShelfController, ShelfInput, amount_of_columns},
        views::book_shelf::BookShelfPage,
    },
};

/// Application id registered with GTK.
pub const APP_ID: &str = "io.github.audioshelf";

/// Database file inside the data directory.
const DATABASE_FILE: &str = "books.db";

const DEFAULT_WIDTH: i32 = 960;
const DEFAULT_HEIGHT: i32 = 720;

type Controller = ShelfController<
    BookShelfPage,
    NavigationRouter,
    Arc<SettingsManager>,
    Arc<ShelfPresenter>,
>;

/// Handles shared by the window and the background work.
#[derive(Clone)]
struct Services {
    settings: Arc<SettingsManager>,
    database: BookDatabase,
    presenter: Arc<ShelfPresenter>,
    runtime: Handle,
}

impl Services {
    /// Rescans the configured folders on the tokio runtime.
    fn spawn_reload(&self) {
        let directories = self.settings.get_settings().audiobook_directories.clone();
        let scanner = BookScanner::new(directories);
        let presenter = self.presenter.clone();
        let database = self.database.clone();
        self.runtime.spawn(async move {
            if let Err(e) = presenter
                .reload(&database, &scanner)
                .await
                .add_context("Reloading the shelf")
            {
                ErrorReporter::report(Severity::Error, &e, "reload");
            }
        });
    }

    /// Renames a book and refreshes the shelf on the tokio runtime.
    fn spawn_rename(&self, book_id: i64, name: String) {
        let presenter = self.presenter.clone();
        let database = self.database.clone();
        self.runtime.spawn(async move {
            let result = async {
                database
                    .rename_book(book_id, &name)
                    .await
                    .add_contextf(format!("Renaming book {}", book_id))?;
                presenter
                    .refresh(&database)
                    .await
                    .add_context("Refreshing the shelf")
            }
            .await;
            if let Err(e) = result {
                ErrorReporter::report(Severity::Warn, &e, "rename");
            }
        });
    }
}

/// Main application class with window management.
pub struct AudioshelfApplication {
    /// The main application instance.
    pub app: Application,
    /// User settings manager.
    pub settings: Arc<SettingsManager>,
    /// Book database.
    pub database: BookDatabase,
    /// Shelf state holder.
    pub presenter: Arc<ShelfPresenter>,
    runtime: Handle,
}

impl AudioshelfApplication {
    /// Creates a new application instance.
    ///
    /// Must be called from within a tokio runtime; background work of the
    /// window is spawned onto it.
    ///
    /// # Errors
    ///
    /// Returns `UiError` if settings or the book database cannot be opened.
    pub async fn new() -> Result<Self, UiError> {
        let settings = Arc::new(SettingsManager::new()?);
        let database = BookDatabase::open(&get_data_dir().join(DATABASE_FILE)).await?;
        let presenter = Arc::new(ShelfPresenter::new(settings.clone()));

        let app = Application::builder().application_id(APP_ID).build();

        Ok(AudioshelfApplication {
            app,
            settings,
            database,
            presenter,
            runtime: Handle::current(),
        })
    }

    /// Runs the application.
    ///
    /// This method starts the GTK main loop and displays the main window.
    pub fn run(&self) -> ExitCode {
        let services = Services {
            settings: self.settings.clone(),
            database: self.database.clone(),
            presenter: self.presenter.clone(),
            runtime: self.runtime.clone(),
        };
        self.app.connect_activate(move |app| build_ui(app, &services));

        self.app.run()
    }
}

/// Builds the main window and starts the shelf loops.
fn build_ui(app: &Application, services: &Services) {
    let window = ApplicationWindow::builder()
        .application(app)
        .title("Audioshelf")
        .default_width(DEFAULT_WIDTH)
        .default_height(DEFAULT_HEIGHT)
        .build();

    let (inputs, input_rx) = unbounded();
    let page = BookShelfPage::new(services.settings.clone(), inputs.clone());

    let navigation_view = NavigationView::new();
    let shelf_page = NavigationPage::builder()
        .title("Audioshelf")
        .tag("shelf")
        .child(&page.widget)
        .build();
    navigation_view.add(&shelf_page);

    let router = NavigationRouter::new(
        navigation_view.clone(),
        services.settings.clone(),
        services.presenter.clone(),
    );
    let columns = amount_of_columns(
        DEFAULT_WIDTH.unsigned_abs(),
        services.settings.get_settings().desired_cover_width,
    );
    let controller: Rc<RefCell<Controller>> = Rc::new(RefCell::new(ShelfController::new(
        page,
        router,
        services.settings.clone(),
        services.presenter.clone(),
        columns,
    )));

    watch_window_size(&window, &inputs);

    spawn_event_loop(&controller, services.presenter.attach());
    spawn_input_loop(&controller, input_rx, services.clone());
    spawn_settings_loop(services.clone(), inputs);
    services.spawn_reload();

    window.set_content(Some(&navigation_view));
    window.present();
    info!("Main window presented");
}

/// Queues a relayout whenever the window size changes.
///
/// Maximize and fullscreen leave `default-width` untouched, so they are
/// watched as well. The relayout runs from an idle callback, after GTK has
/// allocated the new size.
fn watch_window_size(window: &ApplicationWindow, inputs: &Sender<ShelfInput>) {
    for property in ["default-width", "maximized", "fullscreened"] {
        let inputs = inputs.clone();
        window.connect_notify_local(Some(property), move |_, _| {
            let inputs = inputs.clone();
            idle_add_local_once(move || {
                let _ = inputs.try_send(ShelfInput::Relayout);
            });
        });
    }
}

/// Forwards presenter events to the controller.
fn spawn_event_loop(controller: &Rc<RefCell<Controller>>, events: Receiver<ShelfEvent>) {
    let controller = controller.clone();
    MainContext::default().spawn_local(async move {
        while let Ok(event) = events.recv().await {
            controller.borrow_mut().handle_event(event);
        }
        debug!("Presenter event loop finished");
    });
}

/// Hands queued user input to the controller.
fn spawn_input_loop(
    controller: &Rc<RefCell<Controller>>,
    inputs: Receiver<ShelfInput>,
    services: Services,
) {
    let controller = controller.clone();
    MainContext::default().spawn_local(async move {
        while let Ok(input) = inputs.recv().await {
            handle_input(&controller, &services, input);
        }
    });
}

fn handle_input(controller: &Rc<RefCell<Controller>>, services: &Services, input: ShelfInput) {
    match input {
        ShelfInput::BookClicked { book_id, click } => {
            controller.borrow_mut().on_book_clicked(book_id, click);
        }
        ShelfInput::PlayPause => controller.borrow().on_fab_clicked(),
        ShelfInput::Menu(action) => controller.borrow_mut().on_menu_action(action),
        ShelfInput::RefreshMenu => {
            let controller = controller.borrow();
            controller.surface().header_bar.apply_menu(&controller.menu());
        }
        ShelfInput::RenameBook { book_id, name } => services.spawn_rename(book_id, name),
        ShelfInput::Rescan => services.spawn_reload(),
        ShelfInput::WidthChanged(width) => {
            let desired = services.settings.get_settings().desired_cover_width;
            controller
                .borrow_mut()
                .set_columns(amount_of_columns(width, desired));
        }
        ShelfInput::Relayout => {
            let width = controller.borrow().surface().widget.width();
            if width > 0 {
                handle_input(
                    controller,
                    services,
                    ShelfInput::WidthChanged(width.unsigned_abs()),
                );
            }
        }
    }
}

/// Relays settings changes to the presenter. Rescans when the folders
/// change and relayouts when the cover width changes.
fn spawn_settings_loop(services: Services, inputs: Sender<ShelfInput>) {
    let changes = services.settings.subscribe();
    MainContext::default().spawn_local(async move {
        while let Ok(event) = changes.recv().await {
            services.presenter.handle_settings_event(&event);
            match &event {
                SettingsEvent::DirectoriesChanged(directories) if !directories.is_empty() => {
                    services.spawn_reload();
                }
                SettingsEvent::CoverWidthChanged(_) => {
                    let _ = inputs.try_send(ShelfInput::Relayout);
                }
                _ => {}
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use {
        async_channel::unbounded,
        libadwaita::{ApplicationWindow, glib::MainContext, prelude::*},
    };

    use crate::ui::{application::watch_window_size, shelf::ShelfInput};

    #[test]
    #[ignore = "Requires GTK display for UI testing"]
    fn test_window_resize_queues_relayout() {
        if libadwaita::init().is_err() {
            return;
        }
        let window = ApplicationWindow::builder().default_width(960).build();
        let (inputs, input_rx) = unbounded();
        watch_window_size(&window, &inputs);

        window.set_default_width(480);
        assert!(input_rx.try_recv().is_err());

        let context = MainContext::default();
        while context.iteration(false) {}

        assert_eq!(input_rx.try_recv().unwrap(), ShelfInput::Relayout);
    }
}
