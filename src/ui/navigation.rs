//! Navigation requests leaving the shelf.

/// Screen the shelf can navigate to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Application settings.
    Settings,
    /// Detail screen of a single book.
    BookDetail { book_id: i64 },
}

/// Pushes screens onto the navigation stack.
pub trait Navigator {
    /// Pushes a screen.
    fn push(&mut self, route: Route);
}
