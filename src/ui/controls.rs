//! Handles to the controls a page reads from and writes to.
//!
//! Controllers receive these at construction instead of looking controls up
//! by name. Every handle is a cheap clone over shared state, so the front end
//! that fills an input and the controller that reads it see the same value.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::client::ClientError;

/// A text field.
#[derive(Clone, Default)]
pub struct TextInput {
    value: Arc<Mutex<String>>,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> String {
        self.value
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set_value(&self, value: impl Into<String>) {
        *self.value.lock().unwrap_or_else(PoisonError::into_inner) = value.into();
    }

    pub fn clear(&self) {
        self.set_value(String::new());
    }

    /// Trimmed value, or an invalid-input error naming the field when blank.
    pub fn required(&self, field: &str) -> Result<String, ClientError> {
        let value = self.value().trim().to_string();
        if value.is_empty() {
            return Err(ClientError::invalid_input(format!("Invalid {}", field)));
        }
        Ok(value)
    }
}

impl fmt::Debug for TextInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TextInput").field(&self.value()).finish()
    }
}

/// Visibility of a control that starts hidden.
#[derive(Clone, Default, Debug)]
pub struct Toggle {
    visible: Arc<AtomicBool>,
}

impl Toggle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }

    pub fn set_visible(&self, visible: bool) {
        self.visible.store(visible, Ordering::SeqCst);
    }
}

/// Surfaces one message to the user.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// The pages of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageId {
    Login,
    Register,
    Recipes,
    Ingredients,
}

impl PageId {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Register => "register",
            Self::Recipes => "recipes",
            Self::Ingredients => "ingredients",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "login" => Some(Self::Login),
            "register" => Some(Self::Register),
            "recipes" => Some(Self::Recipes),
            "ingredients" => Some(Self::Ingredients),
            _ => None,
        }
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub trait Navigator: Send + Sync {
    fn navigate(&self, page: PageId);
}

/// Current page, shared between the controllers that navigate and the front
/// end that follows.
#[derive(Clone, Debug)]
pub struct Location {
    current: Arc<Mutex<PageId>>,
}

impl Location {
    pub fn new(start: PageId) -> Self {
        Self {
            current: Arc::new(Mutex::new(start)),
        }
    }

    pub fn current(&self) -> PageId {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Navigator for Location {
    fn navigate(&self, page: PageId) {
        tracing::debug!("Navigating to {} page", page);
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = page;
    }
}
