//! # Recipe Client Library
//!
//! Client side of a recipe management application: login, registration and
//! recipe and ingredient management against a REST backend.
//!
//! ## Client Module
//!
//! The [`client`] module holds the session store, the request builder and the
//! API operations, each returning a normalized `Result<_, ClientError>`.
//!
//! ## Pages
//!
//! The [`pages`] module wires user actions to the client: validate the inputs,
//! call the backend, then refetch and redraw the list (see [`ui`]) or report
//! the failure. [`app::App`] bundles the four pages and [`terminal`] drives them
//! from stdin.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use recipe_client::{App, RecipeClient, SessionStore, ui::PageId, terminal::ConsoleNotifier};
//!
//! # async fn example() {
//! let client = RecipeClient::new("http://localhost:8081", SessionStore::in_memory());
//! let app = App::new(client, Arc::new(ConsoleNotifier::new()), PageId::Login);
//!
//! app.login.controls().username.set_value("chef");
//! app.login.controls().password.set_value("secret");
//! let _ = app.login.login().await;
//! # }
//! ```

pub mod app;
pub mod client;
pub mod config;
pub mod pages;
pub mod terminal;
pub mod ui;

pub use app::App;
pub use client::{ClientError, RecipeClient, SessionStore};
pub use config::Config;
