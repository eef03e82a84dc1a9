use std::sync::Arc;

use crate::client::{
    ClientError, CreateRecipeRequest, Entity, PageOptions, Recipe, UpdateRecipeRequest,
};
use crate::pages::{parse_page_number, ActionResult, Collection, FailureText, PageContext};
use crate::ui::{ListCache, ListView, PageId, TextInput, Toggle};

#[derive(Clone, Default, Debug)]
pub struct RecipeControls {
    pub search: TextInput,
    pub add_name: TextInput,
    pub add_instructions: TextInput,
    pub update_name: TextInput,
    pub update_instructions: TextInput,
    pub delete_name: TextInput,
    pub page: TextInput,
    pub list: ListView,
    pub admin_link: Toggle,
    pub logout_button: Toggle,
}

pub struct RecipesPage {
    context: PageContext,
    controls: RecipeControls,
    recipes: Collection<Recipe>,
}

impl RecipesPage {
    pub fn new(context: PageContext, controls: RecipeControls) -> Self {
        let recipes = Collection::new(context.client.clone(), Arc::new(controls.list.clone()));
        Self {
            context,
            controls,
            recipes,
        }
    }

    pub fn controls(&self) -> &RecipeControls {
        &self.controls
    }

    pub fn cache(&self) -> &ListCache<Recipe> {
        self.recipes.cache()
    }

    /// Sets control visibility from the session and draws the initial list.
    ///
    /// Visibility is decided here only; later session changes on the same
    /// page view do not move it.
    pub async fn load(&self) -> ActionResult {
        let session = self.context.session();
        self.controls.logout_button.set_visible(session.has_token());
        self.controls.admin_link.set_visible(session.is_admin());

        if let Err(e) = self.recipes.refresh(None).await {
            return self.context.finish(
                Err(e),
                FailureText::new("Failed to get recipes", "Get failed"),
            );
        }
        Ok(())
    }

    pub async fn search(&self) -> ActionResult {
        let term = self.controls.search.value();
        let result = self
            .recipes
            .refresh(Some(term.trim()))
            .await
            .map(|count| format!("{} recipe(s) found", count));
        self.context.finish(
            result,
            FailureText::new("Search response was not successful", "Search failed"),
        )
    }

    pub async fn add(&self) -> ActionResult {
        let result = self.try_add().await;
        self.context
            .finish(result, FailureText::new("Failed to add recipe", "Add recipe failed"))
    }

    async fn try_add(&self) -> Result<String, ClientError> {
        let name = self.controls.add_name.required("name")?;
        let instructions = self.controls.add_instructions.required("instructions")?;

        self.context
            .client
            .create_recipe(&CreateRecipeRequest { name, instructions })
            .await?;
        self.controls.add_name.clear();
        self.controls.add_instructions.clear();

        self.recipes.refresh(None).await?;
        Ok("Recipe added".to_string())
    }

    pub async fn update(&self) -> ActionResult {
        let result = self.try_update().await;
        self.context
            .finish(result, FailureText::new("Failed to update recipe", "Update failed"))
    }

    async fn try_update(&self) -> Result<String, ClientError> {
        let name = self.controls.update_name.required("name")?;
        let instructions = self.controls.update_instructions.required("instructions")?;

        let recipe = self.recipes.resolve(&name).await?;
        self.context
            .client
            .update_recipe(recipe.id(), &UpdateRecipeRequest { instructions })
            .await?;
        self.controls.update_name.clear();
        self.controls.update_instructions.clear();

        self.recipes.refresh(None).await?;
        Ok("Recipe updated".to_string())
    }

    pub async fn delete(&self) -> ActionResult {
        let result = self.try_delete().await;
        self.context
            .finish(result, FailureText::new("Failed to delete recipe", "Delete failed"))
    }

    async fn try_delete(&self) -> Result<String, ClientError> {
        let name = self.controls.delete_name.required("name")?;

        let recipe = self.recipes.resolve(&name).await?;
        self.context.client.delete::<Recipe>(recipe.id()).await?;
        self.controls.delete_name.clear();

        self.recipes.refresh(None).await?;
        Ok("Recipe deleted".to_string())
    }

    pub async fn show_page(&self) -> ActionResult {
        let result = match parse_page_number(&self.controls.page.value()) {
            Ok(page) => {
                let search = self.controls.search.value();
                self.recipes
                    .show_page(&PageOptions::page(page), Some(search.trim()))
                    .await
            }
            Err(e) => Err(e),
        };
        self.context
            .finish(result, FailureText::new("Failed to get recipes", "Get failed"))
    }

    pub fn open_admin(&self) -> ActionResult {
        if !self.controls.admin_link.is_visible() {
            let error = ClientError::invalid_input("Admin access required");
            self.context.notifier.notify(&error.to_string());
            return Err(error);
        }
        self.context.navigator.navigate(PageId::Ingredients);
        Ok(())
    }

    pub async fn logout(&self) -> ActionResult {
        self.context.logout().await
    }
}
