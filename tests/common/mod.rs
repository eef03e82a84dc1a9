#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use recipe_client::client::{ApiRequest, ApiResponse, ClientError, Transport};
use recipe_client::ui::{Notifier, PageId};
use recipe_client::{App, RecipeClient, SessionStore};
use reqwest::Method;
use serde_json::{json, Value};

/// A request as the transport saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
}

impl Recorded {
    fn from_request(request: &ApiRequest) -> Self {
        let header = |name: &str| {
            request
                .headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        Self {
            method: request.method.clone(),
            path: request.path.clone(),
            query: request.query.clone(),
            body: request.body.clone(),
            authorization: header("authorization"),
            content_type: header("content-type"),
        }
    }

    pub fn line(&self) -> String {
        format!("{} {}", self.method, self.path)
    }
}

pub enum Scripted {
    Respond(ApiResponse),
    Fail(String),
}

/// Transport answering from a queue of scripted responses, in order.
///
/// Running out of script is reported as a transport failure so unexpected
/// calls show up in assertions.
#[derive(Default)]
pub struct MockTransport {
    script: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<Recorded>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, status: u16, body: &str) -> &Self {
        self.script
            .lock()
            .unwrap()
            .push_back(Scripted::Respond(ApiResponse::new(status, body)));
        self
    }

    pub fn respond_json(&self, status: u16, body: Value) -> &Self {
        self.respond(status, &body.to_string())
    }

    pub fn fail(&self, message: &str) -> &Self {
        self.script
            .lock()
            .unwrap()
            .push_back(Scripted::Fail(message.to_string()));
        self
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_lines(&self) -> Vec<String> {
        self.requests().iter().map(Recorded::line).collect()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        self.requests
            .lock()
            .unwrap()
            .push(Recorded::from_request(&request));

        match self.script.lock().unwrap().pop_front() {
            Some(Scripted::Respond(response)) => Ok(response),
            Some(Scripted::Fail(message)) => Err(ClientError::transport(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                message,
            ))),
            None => Err(ClientError::transport(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("no scripted response for {} {}", request.method, request.path),
            ))),
        }
    }
}

#[derive(Debug, Clone)]
struct User {
    username: String,
    email: String,
    password: String,
    is_admin: bool,
}

#[derive(Default)]
struct BackendState {
    users: Vec<User>,
    tokens: Vec<(String, String)>,
    recipes: Vec<(u64, String, String)>,
    ingredients: Vec<(u64, String)>,
    next_id: u64,
}

/// In-memory stand-in for the recipe backend, answering the routes the
/// client uses with the backend's status codes and body formats.
#[derive(Default)]
pub struct FakeBackend {
    state: Mutex<BackendState>,
    requests: Mutex<Vec<Recorded>>,
}

impl FakeBackend {
    pub fn new() -> Arc<Self> {
        let backend = Self::default();
        backend.state.lock().unwrap().next_id = 1;
        Arc::new(backend)
    }

    pub fn with_user(self: Arc<Self>, username: &str, password: &str, is_admin: bool) -> Arc<Self> {
        self.state.lock().unwrap().users.push(User {
            username: username.to_string(),
            email: format!("{}@example.com", username),
            password: password.to_string(),
            is_admin,
        });
        self
    }

    pub fn with_recipe(self: Arc<Self>, name: &str, instructions: &str) -> Arc<Self> {
        {
            let mut state = self.state.lock().unwrap();
            let id = state.next_id;
            state.next_id += 1;
            state
                .recipes
                .push((id, name.to_string(), instructions.to_string()));
        }
        self
    }

    pub fn with_ingredient(self: Arc<Self>, name: &str) -> Arc<Self> {
        {
            let mut state = self.state.lock().unwrap();
            let id = state.next_id;
            state.next_id += 1;
            state.ingredients.push((id, name.to_string()));
        }
        self
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_lines(&self) -> Vec<String> {
        self.requests().iter().map(Recorded::line).collect()
    }

    pub fn recipe_names(&self) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .recipes
            .iter()
            .map(|(_, name, _)| name.clone())
            .collect()
    }

    pub fn active_tokens(&self) -> usize {
        self.state.lock().unwrap().tokens.len()
    }

    fn handle(&self, request: &Recorded) -> ApiResponse {
        let mut state = self.state.lock().unwrap();
        let token = request
            .authorization
            .as_deref()
            .and_then(|h| h.strip_prefix("Bearer "))
            .map(str::to_string);
        let authenticated = token
            .as_ref()
            .map(|t| state.tokens.iter().any(|(known, _)| known == t))
            .unwrap_or(false);
        let body = request.body.clone().unwrap_or(Value::Null);
        let field = |name: &str| body.get(name).and_then(Value::as_str).unwrap_or("").to_string();
        let segments: Vec<&str> = request.path.trim_start_matches('/').split('/').collect();
        let query = |key: &str| {
            request
                .query
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
        };

        match (request.method.as_str(), segments.as_slice()) {
            ("POST", ["login"]) => {
                let user = state
                    .users
                    .iter()
                    .find(|u| u.username == field("username") && u.password == field("password"))
                    .cloned();
                match user {
                    Some(user) => {
                        let token = format!("token-{}-{}", user.username, state.tokens.len() + 1);
                        state.tokens.push((token.clone(), user.username.clone()));
                        ApiResponse::new(200, format!("{} {}", token, user.is_admin))
                    }
                    None => ApiResponse::new(401, "Invalid username or password"),
                }
            }
            ("POST", ["register"]) => {
                if state.users.iter().any(|u| u.username == field("username")) {
                    return ApiResponse::new(409, "Username already exists");
                }
                state.users.push(User {
                    username: field("username"),
                    email: field("email"),
                    password: field("password"),
                    is_admin: false,
                });
                ApiResponse::new(201, "")
            }
            ("POST", ["logout"]) => {
                if let Some(token) = token {
                    state.tokens.retain(|(known, _)| *known != token);
                }
                ApiResponse::new(200, "Logout successful")
            }
            (_, ["recipes", ..] | ["ingredients", ..]) if !authenticated => {
                ApiResponse::new(401, "")
            }

            ("GET", ["recipes"]) => {
                let filter = query("name")
                    .or_else(|| query("term"))
                    .map(|n| n.to_lowercase());
                let items: Vec<Value> = state
                    .recipes
                    .iter()
                    .filter(|(_, name, _)| {
                        filter
                            .as_ref()
                            .map(|f| name.to_lowercase().contains(f))
                            .unwrap_or(true)
                    })
                    .map(|(id, name, instructions)| {
                        json!({ "id": id, "name": name, "instructions": instructions, "author": null })
                    })
                    .collect();
                if let Some(page) = query("page") {
                    return paged(items, &page, query("pageSize"));
                }
                if items.is_empty() {
                    return ApiResponse::new(404, "No recipes found");
                }
                ApiResponse::new(200, Value::Array(items).to_string())
            }
            ("POST", ["recipes"]) => {
                let id = state.next_id;
                state.next_id += 1;
                state
                    .recipes
                    .push((id, field("name"), field("instructions")));
                ApiResponse::new(201, "")
            }
            ("PUT", ["recipes", id]) => {
                let instructions = field("instructions");
                match state.recipes.iter_mut().find(|(rid, _, _)| rid.to_string() == *id) {
                    Some(recipe) => {
                        recipe.2 = instructions;
                        ApiResponse::new(200, "")
                    }
                    None => ApiResponse::new(404, "Recipe not found."),
                }
            }
            ("DELETE", ["recipes", id]) => {
                let before = state.recipes.len();
                state.recipes.retain(|(rid, _, _)| rid.to_string() != *id);
                if state.recipes.len() < before {
                    ApiResponse::new(200, "Recipe deleted successfully.")
                } else {
                    ApiResponse::new(404, "Recipe not found.")
                }
            }

            ("GET", ["ingredients"]) => {
                let filter = query("term").map(|n| n.to_lowercase());
                let items: Vec<Value> = state
                    .ingredients
                    .iter()
                    .filter(|(_, name)| {
                        filter
                            .as_ref()
                            .map(|f| name.to_lowercase().contains(f))
                            .unwrap_or(true)
                    })
                    .map(|(id, name)| json!({ "id": id, "name": name }))
                    .collect();
                if let Some(page) = query("page") {
                    return paged(items, &page, query("pageSize"));
                }
                ApiResponse::new(200, Value::Array(items).to_string())
            }
            ("POST", ["ingredients"]) => {
                let id = state.next_id;
                state.next_id += 1;
                state.ingredients.push((id, field("name")));
                ApiResponse::new(201, "")
            }
            ("PUT", ["ingredients", id]) => {
                let name = field("name");
                match state.ingredients.iter_mut().find(|(iid, _)| iid.to_string() == *id) {
                    Some(ingredient) => {
                        ingredient.1 = name;
                        ApiResponse::new(204, "")
                    }
                    None => ApiResponse::new(404, ""),
                }
            }
            ("DELETE", ["ingredients", id]) => {
                state.ingredients.retain(|(iid, _)| iid.to_string() != *id);
                ApiResponse::new(204, "")
            }

            _ => ApiResponse::new(404, "Not Found"),
        }
    }
}

fn paged(items: Vec<Value>, page: &str, page_size: Option<String>) -> ApiResponse {
    let page: usize = page.parse().unwrap_or(1);
    let size: usize = page_size.and_then(|s| s.parse().ok()).unwrap_or(10);
    let total = items.len();
    let total_pages = (total + size - 1) / size;
    let slice: Vec<Value> = items.into_iter().skip((page - 1) * size).take(size).collect();
    ApiResponse::new(
        200,
        json!({
            "pageNumber": page,
            "pageSize": size,
            "totalPages": total_pages,
            "totalElements": total,
            "items": slice,
        })
        .to_string(),
    )
}

#[async_trait]
impl Transport for FakeBackend {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        let recorded = Recorded::from_request(&request);
        self.requests.lock().unwrap().push(recorded.clone());
        Ok(self.handle(&recorded))
    }
}

/// Notifier that remembers every message.
#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.messages.lock().unwrap())
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

pub struct Harness {
    pub app: App,
    pub session: SessionStore,
    pub notifier: Arc<RecordingNotifier>,
}

pub fn client_with(transport: Arc<dyn Transport>) -> (RecipeClient, SessionStore) {
    let session = SessionStore::in_memory();
    let client = RecipeClient::with_transport(transport, session.clone());
    (client, session)
}

pub fn harness(transport: Arc<dyn Transport>, start: PageId) -> Harness {
    let (client, session) = client_with(transport);
    let notifier = RecordingNotifier::new();
    let app = App::new(client, notifier.clone(), start);
    Harness {
        app,
        session,
        notifier,
    }
}

pub fn recipe_json(id: u64, name: &str, instructions: &str) -> Value {
    json!({ "id": id, "name": name, "instructions": instructions })
}
