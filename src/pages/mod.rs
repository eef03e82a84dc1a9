//! # Page Controllers
//!
//! One controller per page. Each user action follows the same cycle: read
//! and validate the page's inputs, call the backend, then either refetch and
//! redraw the list or report the failure. Every action surfaces exactly one
//! message through the [`Notifier`].
//!
//! - [`LoginPage`] - credentials form, plus logout when a session exists
//! - [`RegisterPage`] - account creation
//! - [`RecipesPage`] - recipe list with search, add, update, delete and paging
//! - [`IngredientsPage`] - ingredient list with search, add, rename, delete and paging

use std::sync::Arc;

use crate::client::{ClientError, Entity, PageOptions, RecipeClient, SessionStore};
use crate::ui::{ListCache, ListDisplay, Navigator, Notifier, PageId};

pub mod ingredients;
pub mod login;
pub mod recipes;
pub mod register;

pub use ingredients::{IngredientControls, IngredientsPage};
pub use login::{LoginControls, LoginPage};
pub use recipes::{RecipeControls, RecipesPage};
pub use register::{RegisterControls, RegisterPage};

pub type ActionResult = Result<(), ClientError>;

/// What to tell the user when an action fails.
#[derive(Debug, Clone, Copy)]
pub struct FailureText {
    /// Shown for server-reported failures that carry no body.
    pub rejected: &'static str,
    /// Shown for transport and decoding failures.
    pub errored: &'static str,
}

impl FailureText {
    pub const fn new(rejected: &'static str, errored: &'static str) -> Self {
        Self { rejected, errored }
    }

    pub fn message_for(&self, error: &ClientError) -> String {
        match error {
            ClientError::Server { detail, .. } => detail
                .clone()
                .unwrap_or_else(|| self.rejected.to_string()),
            e if e.is_technical() => self.errored.to_string(),
            e => e.to_string(),
        }
    }
}

/// Collaborators every page controller is built from.
#[derive(Clone)]
pub struct PageContext {
    pub client: RecipeClient,
    pub notifier: Arc<dyn Notifier>,
    pub navigator: Arc<dyn Navigator>,
}

impl PageContext {
    pub fn new(
        client: RecipeClient,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            client,
            notifier,
            navigator,
        }
    }

    pub fn session(&self) -> &SessionStore {
        self.client.session()
    }

    /// Surfaces the single message for a finished action.
    pub fn finish(&self, result: Result<String, ClientError>, failure: FailureText) -> ActionResult {
        match result {
            Ok(message) => {
                self.notifier.notify(&message);
                Ok(())
            }
            Err(e) => {
                if e.is_technical() {
                    tracing::error!("{}: {:?}", failure.errored, e);
                }
                self.notifier.notify(&failure.message_for(&e));
                Err(e)
            }
        }
    }

    /// Logout shared by every page that offers it.
    ///
    /// The session is gone and the login page is shown whatever the outcome.
    pub async fn logout(&self) -> ActionResult {
        let result = self
            .client
            .logout()
            .await
            .map(|()| "Logged out".to_string());
        let outcome = self.finish(
            result,
            FailureText::new("Failed to logout", "Logout failed"),
        );
        self.navigator.navigate(PageId::Login);
        outcome
    }
}

/// Fetch, cache and render cycle for one entity kind.
pub struct Collection<E> {
    client: RecipeClient,
    cache: ListCache<E>,
}

impl<E: Entity> Collection<E> {
    pub fn new(client: RecipeClient, display: Arc<dyn ListDisplay>) -> Self {
        Self {
            client,
            cache: ListCache::new(display),
        }
    }

    pub fn cache(&self) -> &ListCache<E> {
        &self.cache
    }

    /// Refetches the list and redraws it. On failure the cached list and the
    /// display are left as they were.
    pub async fn refresh(&self, search: Option<&str>) -> Result<usize, ClientError> {
        let items: Vec<E> = self.client.list(search).await?;
        let count = items.len();
        self.cache.replace(items);
        self.cache.render();
        Ok(count)
    }

    /// Fetches one page, filtered by `search` when it is not blank, and shows
    /// its items as the current list.
    pub async fn show_page(
        &self,
        options: &PageOptions,
        search: Option<&str>,
    ) -> Result<String, ClientError> {
        if options.page == 0 {
            return Err(ClientError::invalid_input("Invalid page number"));
        }
        let page = self.client.list_page::<E>(options, search).await?;
        let summary = format!(
            "Page {} of {} ({} {}s)",
            page.page_number, page.total_pages, page.total_elements, E::KIND
        );
        self.cache.replace(page.items);
        self.cache.render();
        Ok(summary)
    }

    /// Finds the entity a form refers to by name.
    ///
    /// An empty cache is refilled first. When nothing matches, no request
    /// beyond that refill is made.
    pub async fn resolve(&self, name: &str) -> Result<E, ClientError> {
        if self.cache.is_empty() {
            self.refresh(None).await?;
        }
        self.cache.find_by_name(name).ok_or_else(|| ClientError::NotFound {
            kind: E::KIND,
            name: name.to_string(),
        })
    }
}

pub(crate) fn parse_page_number(input: &str) -> Result<u32, ClientError> {
    input
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|page| *page > 0)
        .ok_or_else(|| ClientError::invalid_input("Invalid page number"))
}
