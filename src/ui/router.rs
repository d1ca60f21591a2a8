//! GTK navigator backed by a Libadwaita navigation view.

use std::sync::Arc;

use {
    libadwaita::{NavigationView, prelude::*},
    tracing::{debug, warn},
};

use crate::{
    config::SettingsManager,
    state::ShelfPresenter,
    ui::{
        navigation::{Navigator, Route},
        views::{
            book_detail::{BookDetailPage, DETAIL_TAG},
            settings_page::{SETTINGS_TAG, SettingsPage},
        },
    },
};

/// Pushes settings and book detail pages onto a navigation view.
pub struct NavigationRouter {
    view: NavigationView,
    settings: Arc<SettingsManager>,
    presenter: Arc<ShelfPresenter>,
}

impl NavigationRouter {
    /// Creates a router over `view`.
    pub fn new(
        view: NavigationView,
        settings: Arc<SettingsManager>,
        presenter: Arc<ShelfPresenter>,
    ) -> Self {
        Self {
            view,
            settings,
            presenter,
        }
    }

    fn is_on_top(&self, tag: &str) -> bool {
        self.view
            .visible_page()
            .and_then(|page| page.tag())
            .is_some_and(|visible| visible.as_str() == tag)
    }
}

impl Navigator for NavigationRouter {
    fn push(&mut self, route: Route) {
        debug!("Navigating to {:?}", route);
        match route {
            Route::Settings => {
                if !self.is_on_top(SETTINGS_TAG) {
                    let page = SettingsPage::new(self.settings.clone());
                    self.view.push(&page.widget);
                }
            }
            Route::BookDetail { book_id } => {
                let Some(book) = self.presenter.book(book_id) else {
                    warn!("Book {} is not on the shelf", book_id);
                    return;
                };
                if self.is_on_top(DETAIL_TAG) {
                    self.view.pop();
                }
                let page = BookDetailPage::new(&book, self.presenter.clone());
                self.view.push(&page.widget);
            }
        }
    }
}
