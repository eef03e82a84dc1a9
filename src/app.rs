use std::sync::Arc;

use crate::client::RecipeClient;
use crate::pages::{
    ActionResult, IngredientsPage, LoginPage, PageContext, RecipesPage, RegisterPage,
};
use crate::ui::{Location, Navigator, Notifier, PageId};

/// All four pages wired to one session, one notifier and one location.
///
/// Controls are created once here and handed to the controllers; the front
/// end reaches them through each page's `controls()`.
pub struct App {
    pub login: LoginPage,
    pub register: RegisterPage,
    pub recipes: RecipesPage,
    pub ingredients: IngredientsPage,
    location: Location,
}

impl App {
    pub fn new(client: RecipeClient, notifier: Arc<dyn Notifier>, start: PageId) -> Self {
        let location = Location::new(start);
        let context = PageContext::new(client, notifier, Arc::new(location.clone()));

        Self {
            login: LoginPage::new(context.clone(), Default::default()),
            register: RegisterPage::new(context.clone(), Default::default()),
            recipes: RecipesPage::new(context.clone(), Default::default()),
            ingredients: IngredientsPage::new(context, Default::default()),
            location,
        }
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn navigate(&self, page: PageId) {
        self.location.navigate(page);
    }

    pub fn current_page(&self) -> PageId {
        self.location.current()
    }

    /// Runs the load step of the current page.
    pub async fn enter(&self) -> ActionResult {
        let page = self.current_page();
        tracing::debug!("Entering {} page", page);
        match page {
            PageId::Login => {
                self.login.load();
                Ok(())
            }
            PageId::Register => Ok(()),
            PageId::Recipes => self.recipes.load().await,
            PageId::Ingredients => self.ingredients.load().await,
        }
    }
}
