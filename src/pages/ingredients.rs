use std::sync::Arc;

use crate::client::{
    ClientError, CreateIngredientRequest, Entity, Ingredient, PageOptions, UpdateIngredientRequest,
};
use crate::pages::{parse_page_number, ActionResult, Collection, FailureText, PageContext};
use crate::ui::{ListCache, ListView, PageId, TextInput, Toggle};

#[derive(Clone, Default, Debug)]
pub struct IngredientControls {
    pub search: TextInput,
    pub add_name: TextInput,
    pub rename_name: TextInput,
    pub rename_new_name: TextInput,
    pub delete_name: TextInput,
    pub page: TextInput,
    pub list: ListView,
    pub logout_button: Toggle,
}

pub struct IngredientsPage {
    context: PageContext,
    controls: IngredientControls,
    ingredients: Collection<Ingredient>,
}

impl IngredientsPage {
    pub fn new(context: PageContext, controls: IngredientControls) -> Self {
        let ingredients =
            Collection::new(context.client.clone(), Arc::new(controls.list.clone()));
        Self {
            context,
            controls,
            ingredients,
        }
    }

    pub fn controls(&self) -> &IngredientControls {
        &self.controls
    }

    pub fn cache(&self) -> &ListCache<Ingredient> {
        self.ingredients.cache()
    }

    pub async fn load(&self) -> ActionResult {
        self.controls
            .logout_button
            .set_visible(self.context.session().has_token());

        if let Err(e) = self.ingredients.refresh(None).await {
            return self.context.finish(
                Err(e),
                FailureText::new("Failed to get ingredients", "Get ingredient failed"),
            );
        }
        Ok(())
    }

    pub async fn search(&self) -> ActionResult {
        let term = self.controls.search.value();
        let result = self
            .ingredients
            .refresh(Some(term.trim()))
            .await
            .map(|count| format!("{} ingredient(s) found", count));
        self.context.finish(
            result,
            FailureText::new("Failed to get ingredients", "Search failed"),
        )
    }

    pub async fn add(&self) -> ActionResult {
        let result = self.try_add().await;
        self.context.finish(
            result,
            FailureText::new("Failed to add ingredient", "Add ingredient failed"),
        )
    }

    async fn try_add(&self) -> Result<String, ClientError> {
        let name = self.controls.add_name.required("name")?;

        self.context
            .client
            .create_ingredient(&CreateIngredientRequest { name })
            .await?;
        self.controls.add_name.clear();

        self.ingredients.refresh(None).await?;
        Ok("Ingredient added".to_string())
    }

    pub async fn rename(&self) -> ActionResult {
        let result = self.try_rename().await;
        self.context.finish(
            result,
            FailureText::new("Failed to update ingredient", "Update failed"),
        )
    }

    async fn try_rename(&self) -> Result<String, ClientError> {
        let name = self.controls.rename_name.required("name")?;
        let new_name = self.controls.rename_new_name.required("new name")?;

        let ingredient = self.ingredients.resolve(&name).await?;
        self.context
            .client
            .update_ingredient(&UpdateIngredientRequest {
                id: ingredient.id().clone(),
                name: new_name,
            })
            .await?;
        self.controls.rename_name.clear();
        self.controls.rename_new_name.clear();

        self.ingredients.refresh(None).await?;
        Ok("Ingredient updated".to_string())
    }

    pub async fn delete(&self) -> ActionResult {
        let result = self.try_delete().await;
        self.context.finish(
            result,
            FailureText::new("Failed to delete ingredient", "Delete failed"),
        )
    }

    async fn try_delete(&self) -> Result<String, ClientError> {
        let name = self.controls.delete_name.required("name")?;

        let ingredient = self.ingredients.resolve(&name).await?;
        self.context
            .client
            .delete::<Ingredient>(ingredient.id())
            .await?;
        self.controls.delete_name.clear();

        self.ingredients.refresh(None).await?;
        Ok("Ingredient deleted".to_string())
    }

    pub async fn show_page(&self) -> ActionResult {
        let result = match parse_page_number(&self.controls.page.value()) {
            Ok(page) => {
                let search = self.controls.search.value();
                self.ingredients
                    .show_page(&PageOptions::page(page), Some(search.trim()))
                    .await
            }
            Err(e) => Err(e),
        };
        self.context.finish(
            result,
            FailureText::new("Failed to get ingredients", "Get ingredient failed"),
        )
    }

    pub fn back_to_recipes(&self) {
        self.context.navigator.navigate(PageId::Recipes);
    }

    pub async fn logout(&self) -> ActionResult {
        self.context.logout().await
    }
}
