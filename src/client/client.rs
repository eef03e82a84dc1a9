use std::sync::Arc;

use reqwest::Method;

use crate::client::{
    error::{ClientError, Result},
    headers::build_headers,
    session::SessionStore,
    transport::{ApiRequest, ApiResponse, HttpTransport, Transport},
    types::*,
};

/// Client for the recipe backend.
///
/// Each operation issues exactly one HTTP call with headers derived from the
/// session at call time, and interprets the status into a [`Result`].
/// Failures to reach the server or to decode its answer come back as
/// technical errors ([`ClientError::is_technical`]); everything else the
/// server says is a [`ClientError::Server`] (or one of the dedicated login and
/// registration variants).
#[derive(Clone)]
pub struct RecipeClient {
    transport: Arc<dyn Transport>,
    session: SessionStore,
}

impl RecipeClient {
    pub fn new(base_url: impl Into<String>, session: SessionStore) -> Self {
        Self::with_transport(Arc::new(HttpTransport::new(base_url)), session)
    }

    pub fn with_transport(transport: Arc<dyn Transport>, session: SessionStore) -> Self {
        Self { transport, session }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    fn request(&self, method: Method, path: impl Into<String>) -> ApiRequest {
        ApiRequest::new(method, path, build_headers(&self.session))
    }

    fn item_path<E: Entity>(id: &EntityId) -> String {
        format!("{}/{}", E::COLLECTION, urlencoding::encode(id.as_str()))
    }

    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let method = request.method.clone();
        let path = request.path.clone();
        let response = self.transport.send(request).await?;
        tracing::debug!("{} {} -> {}", method, path, response.status);
        Ok(response)
    }

    // Authentication

    /// Exchanges credentials for a session.
    ///
    /// On 200 the `"<token> <isAdmin>"` body is parsed and stored in the
    /// session. 401 maps to [`ClientError::InvalidCredentials`]; the session is
    /// left untouched on every failure path.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginReply> {
        tracing::info!("Attempting login for user: {}", username);

        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response = self
            .send(self.request(Method::POST, "/login").json(&body)?)
            .await?;

        match response.status {
            200 => {
                let reply: LoginReply = response.body.parse()?;
                self.session.set_session(&reply.token, reply.is_admin);
                tracing::info!(
                    "Login successful for user: {} (admin: {})",
                    username,
                    reply.is_admin
                );
                Ok(reply)
            }
            401 => {
                tracing::warn!("Login rejected for user: {}", username);
                Err(ClientError::InvalidCredentials)
            }
            _ => {
                tracing::warn!("Login failed with status {}", response.status);
                Err(response.into_server_error())
            }
        }
    }

    pub async fn register(&self, username: &str, email: &str, password: &str) -> Result<()> {
        tracing::info!("Registering user: {}", username);

        let body = RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self
            .send(self.request(Method::POST, "/register").json(&body)?)
            .await?;

        match response.status {
            201 => Ok(()),
            409 => Err(ClientError::AlreadyExists),
            _ => {
                tracing::warn!("Registration failed with status {}", response.status);
                Err(response.into_server_error())
            }
        }
    }

    /// Ends the session on the server and locally.
    ///
    /// The local session is cleared whatever happens to the call, including
    /// when it never reaches the server.
    pub async fn logout(&self) -> Result<()> {
        tracing::info!(
            "Logging out (token: {})",
            self.session.token_preview().unwrap_or_else(|| "none".into())
        );

        let result = self.send(self.request(Method::POST, "/logout")).await;
        self.session.clear_session();

        let response = result?;
        if !response.is_success() {
            tracing::warn!("Logout failed with status {}", response.status);
            return Err(response.into_server_error());
        }
        Ok(())
    }

    // Listing

    /// Lists a collection, optionally filtered by the backend's search parameter.
    ///
    /// A blank search term lists everything.
    pub async fn list<E: Entity>(&self, search: Option<&str>) -> Result<Vec<E>> {
        let mut request = self.request(Method::GET, E::COLLECTION);
        if let Some(term) = search.map(str::trim).filter(|t| !t.is_empty()) {
            request = request.query(E::SEARCH_PARAM, term);
        }

        let response = self.send(request).await?;
        if !response.is_success() {
            tracing::warn!("Failed to list {}s: status {}", E::KIND, response.status);
            return Err(response.into_server_error());
        }

        let items: Vec<E> = serde_json::from_str(&response.body).map_err(|e| {
            tracing::error!("Failed to parse {} list: {}", E::KIND, e);
            ClientError::from(e)
        })?;
        tracing::debug!("Retrieved {} {}s", items.len(), E::KIND);
        Ok(items)
    }

    pub async fn list_page<E: Entity>(
        &self,
        options: &PageOptions,
        term: Option<&str>,
    ) -> Result<Page<E>> {
        let mut request = self
            .request(Method::GET, E::COLLECTION)
            .query("page", options.page)
            .query("pageSize", options.page_size)
            .query("sortBy", &options.sort_by)
            .query("sortDirection", options.sort_direction.as_str());
        if let Some(term) = term.map(str::trim).filter(|t| !t.is_empty()) {
            request = request.query("term", term);
        }

        let response = self.send(request).await?;
        if !response.is_success() {
            return Err(response.into_server_error());
        }

        let page: Page<E> = serde_json::from_str(&response.body).map_err(|e| {
            tracing::error!("Failed to parse {} page: {}", E::KIND, e);
            ClientError::from(e)
        })?;
        Ok(page)
    }

    pub async fn list_recipes(&self) -> Result<Vec<Recipe>> {
        self.list(None).await
    }

    pub async fn search_recipes(&self, name: &str) -> Result<Vec<Recipe>> {
        self.list(Some(name)).await
    }

    pub async fn list_ingredients(&self) -> Result<Vec<Ingredient>> {
        self.list(None).await
    }

    pub async fn search_ingredients(&self, term: &str) -> Result<Vec<Ingredient>> {
        self.list(Some(term)).await
    }

    // Mutations

    async fn expect_success(&self, request: ApiRequest, action: &str) -> Result<()> {
        let response = self.send(request).await?;
        if response.is_success() {
            Ok(())
        } else {
            tracing::warn!("Failed to {}: status {}", action, response.status);
            Err(response.into_server_error())
        }
    }

    pub async fn create_recipe(&self, request: &CreateRecipeRequest) -> Result<()> {
        let call = self.request(Method::POST, Recipe::COLLECTION).json(request)?;
        self.expect_success(call, "create recipe").await
    }

    pub async fn update_recipe(&self, id: &EntityId, request: &UpdateRecipeRequest) -> Result<()> {
        let call = self
            .request(Method::PUT, Self::item_path::<Recipe>(id))
            .json(request)?;
        self.expect_success(call, "update recipe").await
    }

    pub async fn create_ingredient(&self, request: &CreateIngredientRequest) -> Result<()> {
        let call = self
            .request(Method::POST, Ingredient::COLLECTION)
            .json(request)?;
        self.expect_success(call, "create ingredient").await
    }

    pub async fn update_ingredient(&self, request: &UpdateIngredientRequest) -> Result<()> {
        let call = self
            .request(Method::PUT, Self::item_path::<Ingredient>(&request.id))
            .json(request)?;
        self.expect_success(call, "update ingredient").await
    }

    pub async fn delete<E: Entity>(&self, id: &EntityId) -> Result<()> {
        let call = self.request(Method::DELETE, Self::item_path::<E>(id));
        self.expect_success(call, &format!("delete {}", E::KIND)).await
    }
}
