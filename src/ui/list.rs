//! The local collection and its list display.

use std::sync::{Arc, Mutex, PoisonError, RwLock};

use crate::client::Entity;

/// Container that list rows are drawn into.
pub trait ListDisplay: Send + Sync {
    fn clear(&self);
    fn append_row(&self, text: String);
}

/// In-memory list display; the front end prints its rows.
#[derive(Clone, Default, Debug)]
pub struct ListView {
    rows: Arc<Mutex<Vec<String>>>,
}

impl ListView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> Vec<String> {
        self.rows
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ListDisplay for ListView {
    fn clear(&self) {
        self.rows
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn append_row(&self, text: String) {
        self.rows
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(text);
    }
}

/// Last successfully fetched collection.
///
/// The collection is only ever replaced wholesale. Rendering reads nothing but
/// the collection, so the display is always a render of some completed fetch.
pub struct ListCache<E> {
    items: RwLock<Vec<E>>,
    display: Arc<dyn ListDisplay>,
}

impl<E: Entity> ListCache<E> {
    pub fn new(display: Arc<dyn ListDisplay>) -> Self {
        Self {
            items: RwLock::new(Vec::new()),
            display,
        }
    }

    pub fn replace(&self, items: Vec<E>) {
        *self.items.write().unwrap_or_else(PoisonError::into_inner) = items;
    }

    pub fn items(&self) -> Vec<E> {
        self.items
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_empty(&self) -> bool {
        self.items
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }

    /// First entity whose name equals `name`, ignoring case.
    pub fn find_by_name(&self, name: &str) -> Option<E> {
        self.items
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|item| item.matches_name(name))
            .cloned()
    }

    pub fn render(&self) {
        let items = self.items.read().unwrap_or_else(PoisonError::into_inner);
        self.display.clear();
        for item in items.iter() {
            self.display.append_row(item.display_row());
        }
    }
}
